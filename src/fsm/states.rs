//! Concrete LED states and the resolvers that pick them.
//!
//! ```text
//!  charger      chipset   percent
//!     │            │         │
//!     ▼            ▼         ▼
//!  resolve_battery_state ──▶ BatteryLedState ──▶ BoardPolicy ──▶ cursor
//!  resolve_power_state   ──▶ PowerLedState   ───────────────────▶ cursor
//! ```
//!
//! Both resolvers are pure functions of the snapshot.

use serde::{Deserialize, Serialize};

use super::LedState;
use super::context::{ChargeState, ChargeThresholds, PowerSnapshot};

// ═══════════════════════════════════════════════════════════════════════════
//  Battery LED
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BatteryLedState {
    ChargingLvl1 = 0,
    ChargingLvl2 = 1,
    ChargingFullCharge = 2,
    /// Optional: full with the chipset off. Falls back to `ChargingFullCharge`.
    ChargingFullS5 = 3,
    DischargeS0 = 4,
    /// Optional: discharging in S0 under the low-battery threshold.
    DischargeS0BatLow = 5,
    DischargeS3 = 6,
    DischargeS5 = 7,
    BatteryError = 8,
    FactoryTest = 9,
}

impl LedState for BatteryLedState {
    const ALL: &'static [Self] = &[
        Self::ChargingLvl1,
        Self::ChargingLvl2,
        Self::ChargingFullCharge,
        Self::ChargingFullS5,
        Self::DischargeS0,
        Self::DischargeS0BatLow,
        Self::DischargeS3,
        Self::DischargeS5,
        Self::BatteryError,
        Self::FactoryTest,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::ChargingLvl1 => "ChargingLvl1",
            Self::ChargingLvl2 => "ChargingLvl2",
            Self::ChargingFullCharge => "ChargingFullCharge",
            Self::ChargingFullS5 => "ChargingFullS5",
            Self::DischargeS0 => "DischargeS0",
            Self::DischargeS0BatLow => "DischargeS0BatLow",
            Self::DischargeS3 => "DischargeS3",
            Self::DischargeS5 => "DischargeS5",
            Self::BatteryError => "BatteryError",
            Self::FactoryTest => "FactoryTest",
        }
    }

    fn fallback(self) -> Option<Self> {
        match self {
            Self::ChargingFullS5 => Some(Self::ChargingFullCharge),
            _ => None,
        }
    }
}

/// Map charger/chipset status onto a battery LED state.
///
/// Returns `None` for transient charger modes; the LED keeps whatever it
/// was showing.
pub fn resolve_battery_state(
    snap: &PowerSnapshot,
    thresholds: &ChargeThresholds,
) -> Option<BatteryLedState> {
    let full = || {
        if snap.chipset.is_any_off() {
            BatteryLedState::ChargingFullS5
        } else {
            BatteryLedState::ChargingFullCharge
        }
    };
    let discharging = || {
        if snap.chipset.is_on() {
            match thresholds.bat_low {
                Some(low) if snap.percent < low => BatteryLedState::DischargeS0BatLow,
                _ => BatteryLedState::DischargeS0,
            }
        } else if snap.chipset.is_any_suspend() {
            BatteryLedState::DischargeS3
        } else {
            BatteryLedState::DischargeS5
        }
    };

    match snap.charge_state {
        ChargeState::Charge => Some(if snap.percent < thresholds.lvl_1 {
            BatteryLedState::ChargingLvl1
        } else if snap.percent < thresholds.lvl_2 {
            BatteryLedState::ChargingLvl2
        } else {
            full()
        }),
        ChargeState::DischargeFull if snap.external_power() => Some(full()),
        ChargeState::DischargeFull | ChargeState::Discharge => Some(discharging()),
        ChargeState::Error => Some(BatteryLedState::BatteryError),
        ChargeState::ChargeNearFull => Some(full()),
        ChargeState::Idle if snap.force_idle() => Some(BatteryLedState::FactoryTest),
        ChargeState::Idle => Some(BatteryLedState::DischargeS0),
        ChargeState::ForcedIdle => Some(BatteryLedState::FactoryTest),
        ChargeState::Init | ChargeState::Reinit | ChargeState::Idle0 => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Power LED
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PowerLedState {
    On = 0,
    SuspendAc = 1,
    SuspendNoAc = 2,
    Off = 3,
    /// Optional: off and too little power to boot. Falls back to `Off`.
    OffLowPower = 4,
}

impl LedState for PowerLedState {
    const ALL: &'static [Self] = &[
        Self::On,
        Self::SuspendAc,
        Self::SuspendNoAc,
        Self::Off,
        Self::OffLowPower,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::SuspendAc => "SuspendAc",
            Self::SuspendNoAc => "SuspendNoAc",
            Self::Off => "Off",
            Self::OffLowPower => "OffLowPower",
        }
    }

    fn fallback(self) -> Option<Self> {
        match self {
            Self::OffLowPower => Some(Self::Off),
            _ => None,
        }
    }
}

/// Map chipset status onto a power LED state.
///
/// `can_boot_ap` reports whether the available power is enough to boot
/// the application processor.
pub fn resolve_power_state(snap: &PowerSnapshot, can_boot_ap: bool) -> PowerLedState {
    if snap.chipset.is_any_suspend() {
        if snap.external_power() {
            PowerLedState::SuspendAc
        } else {
            PowerLedState::SuspendNoAc
        }
    } else if snap.chipset.is_any_off() {
        if can_boot_ap {
            PowerLedState::Off
        } else {
            PowerLedState::OffLowPower
        }
    } else {
        PowerLedState::On
    }
}
