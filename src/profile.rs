//! Board profiles: configuration, state tables and wired LEDs in one bundle.
//!
//! A profile is what a board contributes to the LED policy. Profiles can be
//! built in code or loaded from JSON; an empty table is legal and keeps
//! every LED off.

use serde::{Deserialize, Serialize};

use crate::config::LedConfig;
use crate::error::{Error, Result};
use crate::fsm::states::{BatteryLedState, PowerLedState};
use crate::fsm::{LedDescriptor, StateTable, Ticks};
use crate::led::{LedColor, LedId, SupportedLeds};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardProfile {
    pub name: heapless::String<32>,
    pub config: LedConfig,
    pub supported: SupportedLeds,
    pub battery: StateTable<BatteryLedState>,
    pub power: StateTable<PowerLedState>,
}

impl Default for BoardProfile {
    fn default() -> Self {
        let supported =
            SupportedLeds::from_slice(&[LedId::Battery, LedId::Power]).unwrap_or_default();
        Self {
            name: heapless::String::new(),
            config: LedConfig::default(),
            supported,
            battery: StateTable::empty(),
            power: StateTable::empty(),
        }
    }
}

impl BoardProfile {
    /// Two single-colour-per-state LEDs: a red/amber/green battery LED and
    /// a white power LED that breathes slowly in suspend.
    pub fn reference() -> Self {
        use BatteryLedState as B;
        use PowerLedState as P;
        use LedColor::{Amber, Green, Off, Red, White};

        let battery = StateTable::empty()
            .solid(B::ChargingLvl1, Red)
            .solid(B::ChargingLvl2, Amber)
            .solid(B::ChargingFullCharge, Green)
            .solid(B::DischargeS0, Off)
            .solid(B::DischargeS3, Off)
            .solid(B::DischargeS5, Off)
            .with(
                B::BatteryError,
                LedDescriptor::new(Red, Ticks::secs(1)),
                LedDescriptor::new(Off, Ticks::secs(1)),
            )
            .with(
                B::FactoryTest,
                LedDescriptor::new(Red, Ticks::secs(2)),
                LedDescriptor::new(Green, Ticks::secs(2)),
            );

        let suspend = (
            LedDescriptor::new(White, Ticks::secs(1)),
            LedDescriptor::new(Off, Ticks::secs(3)),
        );
        let power = StateTable::empty()
            .solid(P::On, White)
            .with(P::SuspendAc, suspend.0, suspend.1)
            .with(P::SuspendNoAc, suspend.0, suspend.1)
            .solid(P::Off, Off);

        let mut name = heapless::String::new();
        let _ = name.push_str("reference");

        Self {
            name,
            config: LedConfig {
                charge_lvl_1: 5,
                charge_lvl_2: 97,
                ..LedConfig::default()
            },
            battery,
            power,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        if !self.supports(LedId::Battery) {
            return Err(Error::Config("profile must wire the battery LED"));
        }
        for (i, id) in self.supported.iter().enumerate() {
            if self.supported[..i].contains(id) {
                return Err(Error::Config("duplicate LED in supported list"));
            }
        }
        if self.config.power_led && !self.supports(LedId::Power) {
            return Err(Error::Config("power_led set but power LED not wired"));
        }
        Ok(())
    }

    pub fn supports(&self, led: LedId) -> bool {
        self.supported.contains(&led)
    }

    /// Compact postcard encoding, as stored in flash.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| Error::Config("profile encode failed"))
    }

    /// Decode a stored profile. Corrupt or invalid profiles are refused.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let profile: Self =
            postcard::from_bytes(bytes).map_err(|_| Error::Config("corrupted profile bytes"))?;
        profile.validate()?;
        Ok(profile)
    }
}
