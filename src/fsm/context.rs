//! Power-status inputs read once per tick.
//!
//! `PowerSnapshot` is everything the resolvers look at: the charger's
//! discrete mode, battery percentage, charger flags and the SoC power
//! state. It is rebuilt from the collaborators every tick; nothing here
//! is persisted.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Charger
// ---------------------------------------------------------------------------

/// Charger state machine mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeState {
    /// Transient: charger initialising.
    #[default]
    Init,
    /// Transient: charger re-initialising.
    Reinit,
    /// Transient: idle before the first charge decision.
    Idle0,
    /// External power present, not charging.
    Idle,
    Discharge,
    /// Discharging with a full battery.
    DischargeFull,
    Charge,
    ChargeNearFull,
    Error,
    /// Charging inhibited by request (factory / host).
    ForcedIdle,
}

/// Charger flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeFlags(u32);

impl ChargeFlags {
    pub const NONE: Self = Self(0);
    /// Charging is forced idle.
    pub const FORCE_IDLE: Self = Self(1 << 0);
    /// External power is present.
    pub const EXTERNAL_POWER: Self = Self(1 << 1);
    /// The battery answers on its bus.
    pub const BATT_RESPONSIVE: Self = Self(1 << 2);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl core::ops::BitOr for ChargeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

// ---------------------------------------------------------------------------
// Chipset
// ---------------------------------------------------------------------------

/// SoC power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipsetState {
    /// G3: no rails up.
    #[default]
    HardOff,
    /// S5.
    SoftOff,
    /// S3.
    Suspend,
    /// S0.
    On,
    /// S0ix.
    Standby,
}

impl ChipsetState {
    pub const HARD_OFF: u8 = 1 << 0;
    pub const SOFT_OFF: u8 = 1 << 1;
    pub const SUSPEND: u8 = 1 << 2;
    pub const ON: u8 = 1 << 3;
    pub const STANDBY: u8 = 1 << 4;
    pub const ANY_OFF: u8 = Self::HARD_OFF | Self::SOFT_OFF;
    pub const ANY_SUSPEND: u8 = Self::SUSPEND | Self::STANDBY;

    pub const fn mask(self) -> u8 {
        match self {
            Self::HardOff => Self::HARD_OFF,
            Self::SoftOff => Self::SOFT_OFF,
            Self::Suspend => Self::SUSPEND,
            Self::On => Self::ON,
            Self::Standby => Self::STANDBY,
        }
    }

    /// True if the current state is any of the states in `mask`.
    pub const fn in_state(self, mask: u8) -> bool {
        self.mask() & mask != 0
    }

    pub const fn is_on(self) -> bool {
        self.in_state(Self::ON)
    }

    pub const fn is_any_suspend(self) -> bool {
        self.in_state(Self::ANY_SUSPEND)
    }

    pub const fn is_any_off(self) -> bool {
        self.in_state(Self::ANY_OFF)
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Point-in-time view of charger and chipset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerSnapshot {
    pub charge_state: ChargeState,
    /// State of charge, 0–100.
    pub percent: u8,
    pub flags: ChargeFlags,
    pub chipset: ChipsetState,
}

impl PowerSnapshot {
    pub const fn new(charge_state: ChargeState, percent: u8, chipset: ChipsetState) -> Self {
        Self {
            charge_state,
            percent,
            flags: ChargeFlags::NONE,
            chipset,
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: ChargeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub const fn external_power(&self) -> bool {
        self.flags.contains(ChargeFlags::EXTERNAL_POWER)
    }

    pub const fn force_idle(&self) -> bool {
        self.flags.contains(ChargeFlags::FORCE_IDLE)
    }
}

/// Battery percentage breakpoints used by the battery resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeThresholds {
    /// Below this: charging level 1.
    pub lvl_1: u8,
    /// Below this: charging level 2; at or above: full.
    pub lvl_2: u8,
    /// Below this while discharging in S0: battery-low sub-state.
    pub bat_low: Option<u8>,
}
