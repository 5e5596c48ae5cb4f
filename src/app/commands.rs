//! Inbound LED requests.
//!
//! These come from the host interface or the board console and are
//! interpreted by [`LedService`](super::service::LedService), either
//! directly or after crossing the [`LedShared`](crate::auto_control::LedShared)
//! request queue.

use serde::{Deserialize, Serialize};

use crate::host_cmd::LedControlParams;
use crate::led::LedId;

/// Manual override for one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedControlState {
    /// Take the LED away from the state machine and turn it off.
    Off,
    /// Take the LED away from the state machine and light its first colour.
    On,
    /// Hand the LED back to the state machine.
    Reset,
}

/// Requests queued for the tick owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedRequest {
    Control { led: LedId, state: LedControlState },
    /// A decoded LED control host command.
    Host(LedControlParams),
}
