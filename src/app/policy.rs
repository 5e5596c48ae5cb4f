//! Board overrides applied between resolution and the blink cursor.
//!
//! Boards that need to bend the generic battery mapping supply a
//! [`BoardPolicy`] when building the service. The default is the identity.

use crate::fsm::context::PowerSnapshot;
use crate::fsm::states::BatteryLedState;

/// Hook called with every resolved battery state before it is shown.
pub trait BoardPolicy {
    fn battery_state(&self, state: BatteryLedState, _snap: &PowerSnapshot) -> BatteryLedState {
        state
    }
}

/// No overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl BoardPolicy for DefaultPolicy {}

/// Show a battery error only while the AP is running; otherwise fall
/// through to the discharge state for the current chipset state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorOnlyInS0;

impl BoardPolicy for ErrorOnlyInS0 {
    fn battery_state(&self, state: BatteryLedState, snap: &PowerSnapshot) -> BatteryLedState {
        if state != BatteryLedState::BatteryError || snap.chipset.is_on() {
            return state;
        }
        if snap.chipset.is_any_suspend() {
            BatteryLedState::DischargeS3
        } else {
            BatteryLedState::DischargeS5
        }
    }
}

/// Policy built from a plain function.
#[derive(Clone, Copy)]
pub struct FnPolicy(pub fn(BatteryLedState, &PowerSnapshot) -> BatteryLedState);

impl BoardPolicy for FnPolicy {
    fn battery_state(&self, state: BatteryLedState, snap: &PowerSnapshot) -> BatteryLedState {
        (self.0)(state, snap)
    }
}
