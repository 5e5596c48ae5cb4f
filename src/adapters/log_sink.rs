//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured LED events through the
//! `log` facade. Whatever logger the binary installs decides where they go.

use log::{info, warn};

use crate::app::events::LedEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`LedEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &LedEvent) {
        match event {
            LedEvent::Initialised { auto_mask } => {
                info!("START | auto_mask=0b{:07b}", auto_mask);
            }
            LedEvent::BatteryStateChanged { from, to } => {
                info!("BATT  | {:?} -> {:?}", from, to);
            }
            LedEvent::PowerStateChanged { from, to } => {
                info!("PWR   | {:?} -> {:?}", from, to);
            }
            LedEvent::UndefinedState { led, state } => {
                warn!("UNDEF | led={:?} state={}", led, state);
            }
            LedEvent::AutoControlChanged { led, enabled } => {
                info!("AUTO  | led={:?} enabled={}", led, enabled);
            }
            LedEvent::ControlRejected { led_id, error } => {
                warn!("CTRL  | led_id={} rejected: {}", led_id, error);
            }
            LedEvent::OutputFailed { led, color, error } => {
                warn!("OUT   | led={:?} color={} failed: {}", led, color, error);
            }
        }
    }
}
