//! Mock board for integration tests.
//!
//! Serves a settable power snapshot and records every LED output call so
//! tests can assert on the full command history without real GPIO/PWM.

use ecled::app::events::LedEvent;
use ecled::app::ports::{EventSink, LedOutputPort, PowerStatusPort};
use ecled::error::{Error, Result};
use ecled::fsm::context::{ChargeFlags, ChargeState, ChipsetState, PowerSnapshot};
use ecled::led::{BrightnessArray, LedColor, LedId};

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum OutputCall {
    SetColor(LedId, LedColor),
    SetBrightness(LedId, BrightnessArray),
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub status: PowerSnapshot,
    pub can_boot_ap: bool,
    pub calls: Vec<OutputCall>,
    /// Red/green/amber battery LED, white power LED.
    pub battery_range: BrightnessArray,
    pub power_range: BrightnessArray,
    /// Make every write fail.
    pub broken: bool,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            status: PowerSnapshot::new(ChargeState::Discharge, 50, ChipsetState::On),
            can_boot_ap: true,
            calls: Vec::new(),
            battery_range: [1, 1, 0, 0, 0, 1],
            power_range: [0, 0, 0, 0, 1, 0],
            broken: false,
        }
    }

    pub fn set_status(&mut self, state: ChargeState, percent: u8, chipset: ChipsetState) {
        self.status = PowerSnapshot::new(state, percent, chipset);
    }

    pub fn set_flags(&mut self, flags: ChargeFlags) {
        self.status.flags = flags;
    }

    /// Colours written to `led`, in order.
    pub fn colors(&self, led: LedId) -> Vec<LedColor> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                OutputCall::SetColor(id, color) if *id == led => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn last_color(&self, led: LedId) -> Option<LedColor> {
        self.colors(led).last().copied()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerStatusPort for MockBoard {
    fn read_status(&mut self) -> PowerSnapshot {
        self.status
    }

    fn can_boot_ap(&mut self) -> bool {
        self.can_boot_ap
    }
}

impl LedOutputPort for MockBoard {
    fn set_color(&mut self, led: LedId, color: LedColor) -> Result<()> {
        if self.broken {
            return Err(Error::Output("mock write failed"));
        }
        self.calls.push(OutputCall::SetColor(led, color));
        Ok(())
    }

    fn brightness_range(&self, led: LedId) -> BrightnessArray {
        match led {
            LedId::Battery => self.battery_range,
            LedId::Power => self.power_range,
            _ => [0; 6],
        }
    }

    fn set_brightness(&mut self, led: LedId, brightness: &BrightnessArray) -> Result<()> {
        if self.broken {
            return Err(Error::Output("mock write failed"));
        }
        self.calls.push(OutputCall::SetBrightness(led, *brightness));
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<LedEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&LedEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &LedEvent) {
        self.events.push(event.clone());
    }
}
