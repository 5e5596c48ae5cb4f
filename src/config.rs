//! LED policy configuration.
//!
//! Board-tunable parameters for the battery and power LEDs. The state
//! tables themselves live in [`BoardProfile`](crate::profile::BoardProfile);
//! this struct carries the scalar knobs the resolvers and the service use.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fsm::context::ChargeThresholds;

/// Which hook drives the LED update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickSource {
    /// The 200 ms hook tick.
    #[default]
    HookTick,
    /// The once-per-second hook. Table durations still count updates.
    Second,
}

/// Core LED configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedConfig {
    // --- Battery thresholds ---
    /// Below this percentage a charging battery shows level 1.
    pub charge_lvl_1: u8,
    /// Below this percentage a charging battery shows level 2; at or above, full.
    pub charge_lvl_2: u8,
    /// Discharging in S0 below this percentage selects the battery-low state.
    /// `None` disables the state.
    pub bat_low_percent: Option<u8>,

    // --- Scheduling ---
    pub tick_source: TickSource,

    // --- Outputs ---
    /// Drive the power LED as well as the battery LED.
    pub power_led: bool,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            charge_lvl_1: 5,
            charge_lvl_2: 95,
            bat_low_percent: None,
            tick_source: TickSource::HookTick,
            power_led: true,
        }
    }
}

impl LedConfig {
    /// Reject threshold combinations the resolver cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.charge_lvl_1 > 100 || self.charge_lvl_2 > 100 {
            return Err(Error::Config("charge level above 100%"));
        }
        if self.charge_lvl_1 > self.charge_lvl_2 {
            return Err(Error::Config("charge_lvl_1 must not exceed charge_lvl_2"));
        }
        if matches!(self.bat_low_percent, Some(p) if p > 100) {
            return Err(Error::Config("bat_low_percent above 100%"));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> ChargeThresholds {
        ChargeThresholds {
            lvl_1: self.charge_lvl_1,
            lvl_2: self.charge_lvl_2,
            bat_low: self.bat_low_percent,
        }
    }
}
