//! Port traits: the hexagonal boundary between the LED policy and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LedService (domain)
//! ```
//!
//! Driven adapters (charger/chipset status, LED outputs, event sinks)
//! implement these traits. The [`LedService`](super::service::LedService)
//! consumes them via generics, so the policy never touches hardware.

use crate::error::Result;
use crate::fsm::context::PowerSnapshot;
use crate::led::{BrightnessArray, LedColor, LedId};

// ───────────────────────────────────────────────────────────────
// Power status port (driven adapter: charger / chipset → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per update.
pub trait PowerStatusPort {
    /// Charger state, battery percentage, charger flags and chipset state.
    fn read_status(&mut self) -> PowerSnapshot;

    /// Whether the available power is enough to boot the AP.
    fn can_boot_ap(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// LED output port (driven adapter: domain → GPIO / PWM)
// ───────────────────────────────────────────────────────────────

/// Write-side port: drives the physical LEDs.
pub trait LedOutputPort {
    /// Show `color` on `led`. [`LedColor::Off`] darkens every channel.
    fn set_color(&mut self, led: LedId, color: LedColor) -> Result<()>;

    /// Per-channel maximum brightness; 0 marks a channel the LED lacks.
    fn brightness_range(&self, led: LedId) -> BrightnessArray;

    /// Drive raw per-channel brightness (manual control).
    fn set_brightness(&mut self, led: LedId, brightness: &BrightnessArray) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`LedEvent`](super::events::LedEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::LedEvent);
}
