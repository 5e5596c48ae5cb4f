//! LED control host command: parameter and response layouts.
//!
//! ```text
//! params   (8 bytes)  ┌────────┬───────┬──────────────────────┐
//!                     │ led_id │ flags │ brightness[6]        │
//!                     └────────┴───────┴──────────────────────┘
//! response (6 bytes)  ┌──────────────────────┐
//!                     │ brightness_range[6]  │
//!                     └──────────────────────┘
//! ```
//!
//! Framing and checksums belong to the transport; this module only
//! deals with the command body. The command itself is executed by
//! [`LedService::handle_control`](crate::app::service::LedService::handle_control).

use serde::{Deserialize, Serialize};

use crate::error::{EcStatus, Error, Result};
use crate::led::{BrightnessArray, LED_COLOR_COUNT};

/// Only report the brightness range; change nothing.
pub const EC_LED_FLAGS_QUERY: u8 = 1 << 0;
/// Hand the LED back to automatic control.
pub const EC_LED_FLAGS_AUTO: u8 = 1 << 1;

pub const PARAMS_LEN: usize = 2 + LED_COLOR_COUNT;
pub const RESPONSE_LEN: usize = LED_COLOR_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedControlParams {
    pub led_id: u8,
    pub flags: u8,
    pub brightness: BrightnessArray,
}

impl LedControlParams {
    pub const fn query(led_id: u8) -> Self {
        Self {
            led_id,
            flags: EC_LED_FLAGS_QUERY,
            brightness: [0; LED_COLOR_COUNT],
        }
    }

    pub const fn auto(led_id: u8) -> Self {
        Self {
            led_id,
            flags: EC_LED_FLAGS_AUTO,
            brightness: [0; LED_COLOR_COUNT],
        }
    }

    pub const fn set(led_id: u8, brightness: BrightnessArray) -> Self {
        Self {
            led_id,
            flags: 0,
            brightness,
        }
    }

    pub const fn is_query(&self) -> bool {
        self.flags & EC_LED_FLAGS_QUERY != 0
    }

    pub const fn is_auto(&self) -> bool {
        self.flags & EC_LED_FLAGS_AUTO != 0
    }

    /// Decode a command body. Bytes past the fixed layout are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let Some(body) = bytes.get(..PARAMS_LEN) else {
            return Err(Error::InvalidParam("short LED control params"));
        };
        let mut brightness = [0u8; LED_COLOR_COUNT];
        brightness.copy_from_slice(&body[2..]);
        Ok(Self {
            led_id: body[0],
            flags: body[1],
            brightness,
        })
    }

    pub fn encode(&self) -> [u8; PARAMS_LEN] {
        let mut out = [0u8; PARAMS_LEN];
        out[0] = self.led_id;
        out[1] = self.flags;
        out[2..].copy_from_slice(&self.brightness);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedControlResponse {
    pub brightness_range: BrightnessArray,
}

impl LedControlResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let Some(body) = bytes.get(..RESPONSE_LEN) else {
            return Err(Error::InvalidParam("short LED control response"));
        };
        let mut brightness_range = [0u8; LED_COLOR_COUNT];
        brightness_range.copy_from_slice(body);
        Ok(Self { brightness_range })
    }

    pub fn encode(&self) -> [u8; RESPONSE_LEN] {
        self.brightness_range
    }
}

/// Collapse a command outcome into the status code and response body the
/// transport sends back. Failed commands return an all-zero body.
pub fn to_wire(result: Result<LedControlResponse>) -> (EcStatus, [u8; RESPONSE_LEN]) {
    match result {
        Ok(resp) => (EcStatus::Success, resp.encode()),
        Err(e) => (e.ec_status(), [0; RESPONSE_LEN]),
    }
}
