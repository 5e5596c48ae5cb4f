//! Fuzz target: LED control command handling
//!
//! Decodes arbitrary bytes as LED control params and runs them through a
//! service wired to a fake board. The command must never panic, and a
//! rejected command must not change the auto-control mask.
//!
//! cargo fuzz run fuzz_led_control

#![no_main]

use ecled::app::events::LedEvent;
use ecled::app::ports::{EventSink, LedOutputPort};
use ecled::app::service::LedService;
use ecled::auto_control::LedShared;
use ecled::error::Result;
use ecled::host_cmd::{self, LedControlParams};
use ecled::led::{BrightnessArray, LedColor, LedId};
use ecled::profile::BoardProfile;
use libfuzzer_sys::fuzz_target;

struct Board;

impl LedOutputPort for Board {
    fn set_color(&mut self, _led: LedId, _color: LedColor) -> Result<()> {
        Ok(())
    }

    fn brightness_range(&self, led: LedId) -> BrightnessArray {
        match led {
            LedId::Battery => [1, 1, 0, 0, 0, 1],
            _ => [0, 0, 0, 0, 100, 0],
        }
    }

    fn set_brightness(&mut self, _led: LedId, _brightness: &BrightnessArray) -> Result<()> {
        Ok(())
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &LedEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(params) = LedControlParams::decode(data) else {
        return;
    };
    assert_eq!(&params.encode()[..], &data[..host_cmd::PARAMS_LEN]);

    let shared = LedShared::new();
    let Ok(mut svc) = LedService::new(&BoardProfile::reference(), &shared) else {
        return;
    };
    svc.init(&mut Board, &mut Discard);
    let before = shared.auto.mask();

    let result = svc.handle_control(&params, &mut Board, &mut Discard);
    if result.is_err() {
        assert_eq!(shared.auto.mask(), before);
    }
    let _ = host_cmd::to_wire(result);
});
