//! Logical LED identifiers, colours and brightness channels.
//!
//! The numbering matches the EC host protocol: `LedId` is the `led_id`
//! byte of the LED control command and the colour channels index the
//! fixed-size brightness arrays carried by it.

use serde::{Deserialize, Serialize};

/// Number of colour channels in a brightness array.
pub const LED_COLOR_COUNT: usize = 6;

/// Per-channel brightness, indexed by [`LedColor::channel`].
///
/// In a range array: 0 = channel not present, 1 = on/off only,
/// anything else = PWM controlled with that maximum.
pub type BrightnessArray = [u8; LED_COLOR_COUNT];

/// The LEDs a board wires up, in no particular order.
pub type SupportedLeds = heapless::Vec<LedId, { LedId::COUNT }>;

/// Logical LEDs a board may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LedId {
    Battery = 0,
    Power = 1,
    Adapter = 2,
    Left = 3,
    Right = 4,
    RecoveryHwReinit = 5,
    SysrqDebug = 6,
}

impl LedId {
    pub const COUNT: usize = 7;

    pub const ALL: [LedId; Self::COUNT] = [
        Self::Battery,
        Self::Power,
        Self::Adapter,
        Self::Left,
        Self::Right,
        Self::RecoveryHwReinit,
        Self::SysrqDebug,
    ];

    /// Decode a raw protocol id. Out-of-range values yield `None`.
    pub fn from_u8(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Bit for this LED in an auto-control mask.
    pub const fn mask(self) -> u32 {
        1 << self as u32
    }
}

/// LED colours. `Off` is not a channel; it drives every channel dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LedColor {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
    White = 4,
    Amber = 5,
    Off = 6,
}

impl LedColor {
    /// Every colour that owns a brightness channel, in channel order.
    pub const CHANNELS: [LedColor; LED_COLOR_COUNT] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::White,
        Self::Amber,
    ];

    /// Brightness-array index, or `None` for `Off`.
    pub const fn channel(self) -> Option<usize> {
        match self {
            Self::Off => None,
            other => Some(other as usize),
        }
    }

    pub const fn is_off(self) -> bool {
        matches!(self, Self::Off)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::White => "white",
            Self::Amber => "amber",
            Self::Off => "off",
        }
    }
}

impl core::fmt::Display for LedColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.name())
    }
}
