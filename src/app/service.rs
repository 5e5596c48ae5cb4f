//! LED service: the hexagonal core.
//!
//! [`LedService`] owns the two blink cursors, the board's state tables and
//! its policy hook. Every update it reads the power status, resolves the
//! desired battery and power LED states, steps the cursors and writes one
//! colour per auto-controlled LED. All I/O flows through port traits
//! injected at call sites.
//!
//! ```text
//!  PowerStatusPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                      │         LedService          │
//!    LedOutputPort ◀── │ resolve · policy · cursors  │
//!                      └──────────────▲──────────────┘
//!                                     │ LedRequest / AutoControl
//!                                  LedShared
//! ```

use log::{debug, info, warn};

use crate::auto_control::LedShared;
use crate::config::{LedConfig, TickSource};
use crate::error::{Error, Result};
use crate::fsm::context::{ChargeThresholds, PowerSnapshot};
use crate::fsm::states::{BatteryLedState, PowerLedState, resolve_battery_state, resolve_power_state};
use crate::fsm::{BlinkCursor, BlinkStep, LedState, StateTable};
use crate::host_cmd::{LedControlParams, LedControlResponse};
use crate::led::{LedColor, LedId, SupportedLeds};
use crate::profile::BoardProfile;
use crate::scheduler::{HookDelegate, HookKind};

use super::commands::{LedControlState, LedRequest};
use super::events::LedEvent;
use super::policy::{BoardPolicy, DefaultPolicy};
use super::ports::{EventSink, LedOutputPort, PowerStatusPort};

// ───────────────────────────────────────────────────────────────
// LedService
// ───────────────────────────────────────────────────────────────

pub struct LedService<'a, P: BoardPolicy = DefaultPolicy> {
    config: LedConfig,
    thresholds: ChargeThresholds,
    battery_table: StateTable<BatteryLedState>,
    power_table: StateTable<PowerLedState>,
    supported: SupportedLeds,
    policy: P,
    shared: &'a LedShared,
    battery: BlinkCursor<BatteryLedState>,
    power: BlinkCursor<PowerLedState>,
    tick_count: u64,
    /// Set while queued requests are being applied.
    in_tick: bool,
}

impl<'a> LedService<'a, DefaultPolicy> {
    pub fn new(profile: &BoardProfile, shared: &'a LedShared) -> Result<Self> {
        Self::with_policy(profile, shared, DefaultPolicy)
    }
}

impl<'a, P: BoardPolicy> LedService<'a, P> {
    /// Build the service from a validated profile.
    ///
    /// Does **not** touch the LEDs; call [`init`](Self::init) next.
    pub fn with_policy(profile: &BoardProfile, shared: &'a LedShared, policy: P) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            config: profile.config.clone(),
            thresholds: profile.config.thresholds(),
            battery_table: profile.battery,
            power_table: profile.power,
            supported: profile.supported.clone(),
            policy,
            shared,
            battery: BlinkCursor::new(),
            power: BlinkCursor::new(),
            tick_count: 0,
            in_tick: false,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Hand every supported LED to the state machine and turn the driven
    /// ones off.
    pub fn init(&mut self, out: &mut impl LedOutputPort, sink: &mut impl EventSink) {
        self.shared.auto.enable_all(&self.supported);
        self.battery.reset();
        self.power.reset();

        for led in [LedId::Battery, LedId::Power] {
            if self.drives(led) {
                self.show(led, LedColor::Off, out, sink);
            }
        }

        let auto_mask = self.shared.auto.mask();
        info!("LED service started, auto mask=0b{:07b}", auto_mask);
        sink.emit(&LedEvent::Initialised { auto_mask });
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Apply queued requests, then update every auto-controlled LED.
    ///
    /// Each driven LED receives exactly one colour per tick, including
    /// one reset by a queued request.
    pub fn tick(
        &mut self,
        hw: &mut (impl PowerStatusPort + LedOutputPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.in_tick = true;
        while let Some(request) = self.shared.try_next() {
            self.apply_request(request, hw, sink);
        }
        self.in_tick = false;
        self.update(hw, sink);
    }

    /// Entry point for the hook scheduler. Only the hook selected by
    /// [`LedConfig::tick_source`] drives the LEDs.
    pub fn on_hook(
        &mut self,
        kind: HookKind,
        hw: &mut (impl PowerStatusPort + LedOutputPort),
        sink: &mut impl EventSink,
    ) {
        let wanted = match self.config.tick_source {
            TickSource::HookTick => HookKind::Tick,
            TickSource::Second => HookKind::Second,
        };
        if kind == wanted {
            self.tick(hw, sink);
        }
    }

    // ── Manual control ────────────────────────────────────────

    /// Force an LED off or on, or hand it back to the state machine.
    ///
    /// Reset restarts the LED's pattern. Called between ticks it shows the
    /// new pattern immediately; from a queued request the tick's own
    /// update does it. The other LED is never touched.
    pub fn control(
        &mut self,
        led: LedId,
        state: LedControlState,
        hw: &mut (impl PowerStatusPort + LedOutputPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if !self.supports(led) {
            return Err(Error::UnsupportedLed(led));
        }

        if state == LedControlState::Reset {
            self.set_auto(led, true, sink);
            match led {
                LedId::Battery => self.battery.reset(),
                LedId::Power => self.power.reset(),
                _ => {}
            }
            if !self.in_tick {
                let snap = hw.read_status();
                self.update_led(led, &snap, hw, sink);
            }
            return Ok(());
        }

        self.set_auto(led, false, sink);
        let mut brightness = [0u8; crate::led::LED_COLOR_COUNT];
        if state == LedControlState::On {
            let range = hw.brightness_range(led);
            if let Some(i) = range.iter().position(|&r| r != 0) {
                brightness[i] = 1;
            }
        }
        hw.set_brightness(led, &brightness)
    }

    /// Execute an LED control host command.
    pub fn handle_control(
        &mut self,
        params: &LedControlParams,
        out: &mut impl LedOutputPort,
        sink: &mut impl EventSink,
    ) -> Result<LedControlResponse> {
        let led = LedId::from_u8(params.led_id).ok_or(Error::UnknownLed(params.led_id))?;
        if !self.supports(led) {
            return Err(Error::UnsupportedLed(led));
        }

        let brightness_range = out.brightness_range(led);
        let resp = LedControlResponse { brightness_range };
        if params.is_query() {
            return Ok(resp);
        }

        for (color, (&want, &max)) in LedColor::CHANNELS
            .iter()
            .zip(params.brightness.iter().zip(brightness_range.iter()))
        {
            if want != 0 && max == 0 {
                return Err(Error::UnsupportedColor(led, *color));
            }
        }

        if params.is_auto() {
            self.set_auto(led, true, sink);
        } else {
            out.set_brightness(led, &params.brightness)?;
            self.set_auto(led, false, sink);
        }
        Ok(resp)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn battery_state(&self) -> Option<BatteryLedState> {
        self.battery.current()
    }

    pub fn power_state(&self) -> Option<PowerLedState> {
        self.power.current()
    }

    pub fn battery_cursor(&self) -> &BlinkCursor<BatteryLedState> {
        &self.battery
    }

    pub fn power_cursor(&self) -> &BlinkCursor<PowerLedState> {
        &self.power
    }

    /// Updates requested since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &LedConfig {
        &self.config
    }

    pub fn supports(&self, led: LedId) -> bool {
        self.supported.contains(&led)
    }

    pub fn is_auto(&self, led: LedId) -> bool {
        self.shared.auto.is_enabled(led)
    }

    // ── Internal ──────────────────────────────────────────────

    /// LEDs the state machine owns on this board.
    fn drives(&self, led: LedId) -> bool {
        match led {
            LedId::Battery => self.supports(led),
            LedId::Power => self.config.power_led && self.supports(led),
            _ => false,
        }
    }

    fn update(&mut self, hw: &mut (impl PowerStatusPort + LedOutputPort), sink: &mut impl EventSink) {
        let snap = hw.read_status();
        debug!(
            "status: {:?} {}% flags=0x{:x} chipset={:?}",
            snap.charge_state,
            snap.percent,
            snap.flags.bits(),
            snap.chipset
        );

        self.update_led(LedId::Battery, &snap, hw, sink);
        self.update_led(LedId::Power, &snap, hw, sink);
    }

    /// Step one LED's cursor and show the result.
    fn update_led(
        &mut self,
        led: LedId,
        snap: &PowerSnapshot,
        hw: &mut (impl PowerStatusPort + LedOutputPort),
        sink: &mut impl EventSink,
    ) {
        if !self.drives(led) || !self.is_auto(led) {
            return;
        }
        if led == LedId::Battery {
            let desired = resolve_battery_state(snap, &self.thresholds)
                .map(|s| self.policy.battery_state(s, snap));
            let step = self.battery.step(desired, &self.battery_table);
            if let Some(t) = step.transition {
                info!("battery LED: {:?} -> {}", t.from.map(LedState::name), t.to.name());
                sink.emit(&LedEvent::BatteryStateChanged {
                    from: t.from,
                    to: t.to,
                });
            }
            self.finish_step(LedId::Battery, &step, self.battery.current(), hw, sink);
        } else {
            let desired = resolve_power_state(snap, hw.can_boot_ap());
            let step = self.power.step(Some(desired), &self.power_table);
            if let Some(t) = step.transition {
                info!("power LED: {:?} -> {}", t.from.map(LedState::name), t.to.name());
                sink.emit(&LedEvent::PowerStateChanged {
                    from: t.from,
                    to: t.to,
                });
            }
            self.finish_step(LedId::Power, &step, self.power.current(), hw, sink);
        }
    }

    fn finish_step<S: LedState>(
        &self,
        led: LedId,
        step: &BlinkStep<S>,
        current: Option<S>,
        out: &mut impl LedOutputPort,
        sink: &mut impl EventSink,
    ) {
        if step.entered_undefined {
            let state = current.map_or("none", LedState::name);
            warn!("{:?} LED: state {} has no pattern, holding off", led, state);
            sink.emit(&LedEvent::UndefinedState { led, state });
        }
        self.show(led, step.color, out, sink);
    }

    fn show(
        &self,
        led: LedId,
        color: LedColor,
        out: &mut impl LedOutputPort,
        sink: &mut impl EventSink,
    ) {
        if let Err(error) = out.set_color(led, color) {
            warn!("{:?} LED: set {} failed: {}", led, color, error);
            sink.emit(&LedEvent::OutputFailed { led, color, error });
        }
    }

    fn set_auto(&self, led: LedId, enabled: bool, sink: &mut impl EventSink) {
        if self.shared.auto.set(led, enabled) != enabled {
            info!("{:?} LED: auto control {}", led, if enabled { "on" } else { "off" });
            sink.emit(&LedEvent::AutoControlChanged { led, enabled });
        }
    }

    fn apply_request(
        &mut self,
        request: LedRequest,
        hw: &mut (impl PowerStatusPort + LedOutputPort),
        sink: &mut impl EventSink,
    ) {
        let (led_id, result) = match request {
            LedRequest::Control { led, state } => {
                (led as u8, self.control(led, state, hw, sink))
            }
            LedRequest::Host(params) => {
                let result = self.handle_control(&params, hw, sink).map(|resp| {
                    debug!("LED {} range {:?}", params.led_id, resp.brightness_range);
                });
                (params.led_id, result)
            }
        };
        if let Err(error) = result {
            warn!("LED {} request rejected: {}", led_id, error);
            sink.emit(&LedEvent::ControlRejected { led_id, error });
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Scheduler glue
// ───────────────────────────────────────────────────────────────

/// Binds a service to its ports so the [`HookScheduler`](crate::scheduler::HookScheduler)
/// can drive it.
pub struct ServiceHooks<'s, 'a, P: BoardPolicy, H, E> {
    pub service: &'s mut LedService<'a, P>,
    pub hw: &'s mut H,
    pub sink: &'s mut E,
}

impl<P, H, E> HookDelegate for ServiceHooks<'_, '_, P, H, E>
where
    P: BoardPolicy,
    H: PowerStatusPort + LedOutputPort,
    E: EventSink,
{
    fn on_hook(&mut self, kind: HookKind) {
        self.service.on_hook(kind, &mut *self.hw, &mut *self.sink);
    }
}
