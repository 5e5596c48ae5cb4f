//! Board-level LED output: routes logical LED ids to physical drivers.

use super::LedDriver;
use crate::app::ports::LedOutputPort;
use crate::error::{Error, Result};
use crate::led::{BrightnessArray, LED_COLOR_COUNT, LedColor, LedId, SupportedLeds};

/// Placeholder for an LED the board does not have.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLed;

impl LedDriver for NoLed {
    fn set_color(&mut self, _color: LedColor) -> Result<()> {
        Ok(())
    }

    fn brightness_range(&self) -> BrightnessArray {
        [0; LED_COLOR_COUNT]
    }
}

/// A battery LED and an optional power LED.
pub struct BoardLeds<B, W = NoLed> {
    battery: B,
    power: Option<W>,
}

impl<B: LedDriver> BoardLeds<B, NoLed> {
    pub fn battery_only(battery: B) -> Self {
        Self {
            battery,
            power: None,
        }
    }
}

impl<B: LedDriver, W: LedDriver> BoardLeds<B, W> {
    pub fn new(battery: B, power: W) -> Self {
        Self {
            battery,
            power: Some(power),
        }
    }

    /// The LEDs this board wires, for a [`BoardProfile`](crate::profile::BoardProfile).
    pub fn supported(&self) -> SupportedLeds {
        let mut leds = SupportedLeds::new();
        let _ = leds.push(LedId::Battery);
        if self.power.is_some() {
            let _ = leds.push(LedId::Power);
        }
        leds
    }

    fn driver(&mut self, led: LedId) -> Result<&mut dyn LedDriver> {
        match led {
            LedId::Battery => Ok(&mut self.battery),
            LedId::Power => match self.power.as_mut() {
                Some(p) => Ok(p),
                None => Err(Error::UnsupportedLed(led)),
            },
            _ => Err(Error::UnsupportedLed(led)),
        }
    }
}

impl<B: LedDriver, W: LedDriver> LedOutputPort for BoardLeds<B, W> {
    fn set_color(&mut self, led: LedId, color: LedColor) -> Result<()> {
        self.driver(led)?.set_color(color)
    }

    fn brightness_range(&self, led: LedId) -> BrightnessArray {
        match (led, self.power.as_ref()) {
            (LedId::Battery, _) => self.battery.brightness_range(),
            (LedId::Power, Some(p)) => p.brightness_range(),
            _ => [0; LED_COLOR_COUNT],
        }
    }

    fn set_brightness(&mut self, led: LedId, brightness: &BrightnessArray) -> Result<()> {
        self.driver(led)?.set_brightness(brightness)
    }
}
