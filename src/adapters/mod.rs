//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements      | Connects to                        |
//! |------------|-----------------|------------------------------------|
//! | `gpio`     | LedDriver       | embedded-hal `OutputPin`s          |
//! | `pwm`      | LedDriver       | embedded-hal `SetDutyCycle`s       |
//! | `board`    | LedOutputPort   | one battery + optional power LED   |
//! | `log_sink` | EventSink       | `log` facade                       |
//!
//! The GPIO and PWM drivers are configured with a [`ColorMap`] instead of
//! per-board code: each colour the LED can show maps to the output levels
//! that produce it.

pub mod board;
pub mod gpio;
pub mod log_sink;
pub mod pwm;

use crate::error::Result;
use crate::led::{BrightnessArray, LED_COLOR_COUNT, LedColor};

/// One physical LED, possibly multi-colour.
pub trait LedDriver {
    fn set_color(&mut self, color: LedColor) -> Result<()>;

    /// Per-channel maximum brightness; 0 where the LED cannot show a colour.
    fn brightness_range(&self) -> BrightnessArray;

    /// Show the first colour with a non-zero brightness, or go dark.
    fn set_brightness(&mut self, brightness: &BrightnessArray) -> Result<()> {
        let range = self.brightness_range();
        let color = LedColor::CHANNELS
            .iter()
            .zip(brightness.iter().zip(range.iter()))
            .find(|(_, (b, r))| **b != 0 && **r != 0)
            .map_or(LedColor::Off, |(c, _)| *c);
        self.set_color(color)
    }
}

/// Colour → output setting for one LED. `Off` is never mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMap<T> {
    entries: [Option<T>; LED_COLOR_COUNT],
}

impl<T: Copy> Default for ColorMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> ColorMap<T> {
    pub const fn new() -> Self {
        Self {
            entries: [None; LED_COLOR_COUNT],
        }
    }

    /// Map `color` to `value`. Mapping `Off` has no effect.
    #[must_use]
    pub fn with(mut self, color: LedColor, value: T) -> Self {
        if let Some(i) = color.channel() {
            self.entries[i] = Some(value);
        }
        self
    }

    pub fn get(&self, color: LedColor) -> Option<T> {
        color.channel().and_then(|i| self.entries[i])
    }

    pub fn contains(&self, color: LedColor) -> bool {
        self.get(color).is_some()
    }

    /// Brightness range with `max` on every mapped channel.
    pub fn range(&self, max: u8) -> BrightnessArray {
        let mut out = [0; LED_COLOR_COUNT];
        for (slot, entry) in out.iter_mut().zip(self.entries.iter()) {
            if entry.is_some() {
                *slot = max;
            }
        }
        out
    }
}
