//! Hook scheduler.
//!
//! Drives the two periodic hooks the LED policy can run on: the fast hook
//! tick and a once-per-second hook derived from it. The scheduler notifies
//! a [`HookDelegate`] and knows nothing about LEDs.
//!
//! ```text
//!  Timer (200 ms) ──▶ HookScheduler ──▶ HookDelegate::on_hook(Tick)
//!                          │
//!                          └── every 5th tick ──▶ on_hook(Second)
//! ```

use core::time::Duration;

use async_io_mini::Timer;
use log::debug;

use crate::fsm::{HOOK_TICK_INTERVAL_MS, LED_ONE_SEC};

/// Which periodic hook fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Tick,
    Second,
}

/// Callback invoked for every hook.
pub trait HookDelegate {
    fn on_hook(&mut self, kind: HookKind);
}

pub struct HookScheduler {
    period: Duration,
    ticks: u64,
}

impl Default for HookScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl HookScheduler {
    pub const fn new() -> Self {
        Self {
            period: Duration::from_millis(HOOK_TICK_INTERVAL_MS as u64),
            ticks: 0,
        }
    }

    /// Override the wall-clock tick period (simulation speed-up).
    #[must_use]
    pub const fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Fire one hook tick, plus the second hook on every
    /// [`LED_ONE_SEC`]th tick.
    pub fn advance(&mut self, delegate: &mut impl HookDelegate) {
        self.ticks += 1;
        delegate.on_hook(HookKind::Tick);
        if self.ticks % u64::from(LED_ONE_SEC) == 0 {
            delegate.on_hook(HookKind::Second);
        }
    }

    /// Run the hooks on a timer. Stops after `limit` ticks when given.
    pub async fn run(&mut self, delegate: &mut impl HookDelegate, limit: Option<u64>) {
        debug!("hooks: period={:?} limit={:?}", self.period, limit);
        let start = self.ticks;
        while limit.is_none_or(|n| self.ticks - start < n) {
            Timer::after(self.period).await;
            self.advance(delegate);
        }
    }
}
