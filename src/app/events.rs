//! Outbound LED events.
//!
//! The [`LedService`](super::service::LedService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters decide what to do
//! with them; the stock one writes them to the log.

use crate::error::Error;
use crate::fsm::states::{BatteryLedState, PowerLedState};
use crate::led::{LedColor, LedId};

/// Structured events emitted by the LED core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedEvent {
    /// `init` ran; carries the auto-control mask it installed.
    Initialised { auto_mask: u32 },

    /// The battery LED entered a new state.
    BatteryStateChanged {
        from: Option<BatteryLedState>,
        to: BatteryLedState,
    },

    /// The power LED entered a new state.
    PowerStateChanged {
        from: Option<PowerLedState>,
        to: PowerLedState,
    },

    /// A state with no table entry was selected; the LED is held off.
    UndefinedState { led: LedId, state: &'static str },

    /// Auto control was switched on or off for an LED.
    AutoControlChanged { led: LedId, enabled: bool },

    /// A control request or host command was refused.
    ControlRejected { led_id: u8, error: Error },

    /// The output driver failed to show a colour.
    OutputFailed {
        led: LedId,
        color: LedColor,
        error: Error,
    },
}
