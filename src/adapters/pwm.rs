//! PWM-dimmed LEDs.
//!
//! Each colour maps to a duty cycle (percent) per channel, so a single
//! RGB package can show mixed colours like amber or white.

use embedded_hal::pwm::SetDutyCycle;

use super::{ColorMap, LedDriver};
use crate::error::{Error, Result};
use crate::led::{BrightnessArray, LedColor};

/// Maximum brightness reported for a PWM colour.
pub const PWM_BRIGHTNESS_MAX: u8 = 100;

pub struct PwmLed<C, const N: usize> {
    channels: [C; N],
    map: ColorMap<[u8; N]>,
}

impl<C: SetDutyCycle, const N: usize> PwmLed<C, N> {
    pub fn new(channels: [C; N], map: ColorMap<[u8; N]>) -> Self {
        Self { channels, map }
    }

    fn apply(&mut self, duties: [u8; N]) -> Result<()> {
        for (ch, duty) in self.channels.iter_mut().zip(duties) {
            ch.set_duty_cycle_percent(duty.min(100))
                .map_err(|_| Error::Output("pwm duty write failed"))?;
        }
        Ok(())
    }
}

impl<C: SetDutyCycle, const N: usize> LedDriver for PwmLed<C, N> {
    fn set_color(&mut self, color: LedColor) -> Result<()> {
        self.apply(self.map.get(color).unwrap_or([0; N]))
    }

    fn brightness_range(&self) -> BrightnessArray {
        self.map.range(PWM_BRIGHTNESS_MAX)
    }

    /// Show the first lit colour scaled to the requested brightness.
    fn set_brightness(&mut self, brightness: &BrightnessArray) -> Result<()> {
        let lit = LedColor::CHANNELS
            .iter()
            .zip(brightness.iter())
            .find_map(|(c, &b)| (b != 0).then(|| self.map.get(*c).map(|d| (d, b))).flatten());
        let Some((duties, level)) = lit else {
            return self.apply([0; N]);
        };
        let level = u16::from(level.min(PWM_BRIGHTNESS_MAX));
        let scaled = duties.map(|d| (u16::from(d) * level / u16::from(PWM_BRIGHTNESS_MAX)) as u8);
        self.apply(scaled)
    }
}
