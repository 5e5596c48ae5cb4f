//! On/off LEDs wired to GPIOs.
//!
//! A bi-colour LED is typically two pins; amber is shown by lighting both.
//! The [`ColorMap`] lists, for each colour, which pins are lit:
//!
//! ```text
//!   ColorMap<[bool; 2]>
//!     Red   → [true,  false]
//!     Green → [false, true ]
//!     Amber → [true,  true ]
//! ```
//!
//! Colours not in the map (and `Off`) darken every pin.

use embedded_hal::digital::{OutputPin, PinState};

use super::{ColorMap, LedDriver};
use crate::error::{Error, Result};
use crate::led::{BrightnessArray, LedColor};

pub struct GpioLed<P, const N: usize> {
    pins: [P; N],
    map: ColorMap<[bool; N]>,
    active_low: bool,
}

impl<P: OutputPin, const N: usize> GpioLed<P, N> {
    pub fn new(pins: [P; N], map: ColorMap<[bool; N]>) -> Self {
        Self {
            pins,
            map,
            active_low: false,
        }
    }

    /// Pins sink current: driving low lights the LED.
    #[must_use]
    pub fn active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    /// Hand the pins back, left in their last state.
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P: OutputPin, const N: usize> LedDriver for GpioLed<P, N> {
    fn set_color(&mut self, color: LedColor) -> Result<()> {
        let lit = self.map.get(color).unwrap_or([false; N]);
        for (pin, on) in self.pins.iter_mut().zip(lit) {
            pin.set_state(PinState::from(on != self.active_low))
                .map_err(|_| Error::Output("gpio write failed"))?;
        }
        Ok(())
    }

    fn brightness_range(&self) -> BrightnessArray {
        self.map.range(1)
    }
}
