//! State shared between the tick owner and the host interface.
//!
//! ```text
//! ┌──────────────┐ LedRequest  ┌──────────────┐
//! │ Host command │────────────▶│  LedService  │
//! │ task (async) │             │  (tick)      │
//! └──────┬───────┘             └──────┬───────┘
//!        │      AutoControl (atomic)  │
//!        └────────────────────────────┘
//! ```
//!
//! The auto-control mask is read every tick and written by manual control;
//! relaxed ordering is enough since each bit is independent. Requests that
//! touch the outputs are queued and applied at the next tick boundary so
//! the service stays the only writer of the LEDs.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::app::commands::LedRequest;
use crate::error::{Error, Result};
use crate::led::LedId;

/// Queue depth for pending LED requests.
pub const REQUEST_DEPTH: usize = 4;

/// Per-LED "driven by the state machine" bits.
#[derive(Debug)]
pub struct AutoControl(AtomicU32);

impl Default for AutoControl {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoControl {
    /// Every LED starts under manual control until `enable_all`.
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    pub fn is_enabled(&self, led: LedId) -> bool {
        self.0.load(Ordering::Relaxed) & led.mask() != 0
    }

    /// Returns the previous setting.
    pub fn set(&self, led: LedId, enable: bool) -> bool {
        let prev = if enable {
            self.0.fetch_or(led.mask(), Ordering::Relaxed)
        } else {
            self.0.fetch_and(!led.mask(), Ordering::Relaxed)
        };
        prev & led.mask() != 0
    }

    pub fn enable_all(&self, leds: &[LedId]) {
        let mask = leds.iter().fold(0, |acc, id| acc | id.mask());
        self.0.store(mask, Ordering::Relaxed);
    }

    pub fn mask(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything the service shares with other tasks; usually a `static`.
pub struct LedShared {
    pub auto: AutoControl,
    requests: Channel<CriticalSectionRawMutex, LedRequest, REQUEST_DEPTH>,
}

impl Default for LedShared {
    fn default() -> Self {
        Self::new()
    }
}

impl LedShared {
    pub const fn new() -> Self {
        Self {
            auto: AutoControl::new(),
            requests: Channel::new(),
        }
    }

    /// Handle for tasks that do not own the LEDs.
    pub fn host(&self) -> HostLedControl<'_> {
        HostLedControl { shared: self }
    }

    /// Next pending request, if any.
    pub(crate) fn try_next(&self) -> Option<LedRequest> {
        self.requests.try_receive().ok()
    }
}

/// Producer side of the request queue.
#[derive(Clone, Copy)]
pub struct HostLedControl<'a> {
    shared: &'a LedShared,
}

impl HostLedControl<'_> {
    /// Queue a request without waiting. Fails with [`Error::QueueFull`].
    pub fn submit(&self, request: LedRequest) -> Result<()> {
        self.shared
            .requests
            .try_send(request)
            .map_err(|_| Error::QueueFull)
    }

    /// Queue a request, waiting for room.
    pub async fn send(&self, request: LedRequest) {
        self.shared.requests.send(request).await;
    }

    pub fn is_auto(&self, led: LedId) -> bool {
        self.shared.auto.is_enabled(led)
    }
}
