//! Integration tests for manual control: the LED control command, the
//! on/off/reset overrides and the cross-task request queue.

use crate::mock_hw::{MockBoard, OutputCall, RecordingSink};

use ecled::app::commands::{LedControlState, LedRequest};
use ecled::app::events::LedEvent;
use ecled::app::service::LedService;
use ecled::auto_control::{LedShared, REQUEST_DEPTH};
use ecled::error::{EcError, EcStatus, Error};
use ecled::fsm::context::{ChargeFlags, ChargeState, ChipsetState};
use ecled::fsm::states::{BatteryLedState, PowerLedState};
use ecled::host_cmd::{self, EC_LED_FLAGS_AUTO, LedControlParams};
use ecled::led::{LedColor, LedId};
use ecled::profile::BoardProfile;

fn started(shared: &LedShared) -> (LedService<'_>, MockBoard, RecordingSink) {
    let mut svc = LedService::new(&BoardProfile::reference(), shared).unwrap();
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();
    svc.init(&mut hw, &mut sink);
    hw.clear();
    sink.events.clear();
    (svc, hw, sink)
}

// ── LED control host command ──────────────────────────────────

#[test]
fn query_reports_range_and_changes_nothing() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);

    let resp = svc
        .handle_control(&LedControlParams::query(LedId::Battery as u8), &mut hw, &mut sink)
        .unwrap();
    assert_eq!(resp.brightness_range, [1, 1, 0, 0, 0, 1]);
    assert!(hw.calls.is_empty());
    assert!(svc.is_auto(LedId::Battery));
    assert!(sink.events.is_empty());
}

#[test]
fn unknown_and_unwired_ids_are_invalid_param() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);

    let unknown = svc.handle_control(&LedControlParams::query(9), &mut hw, &mut sink);
    assert_eq!(unknown, Err(Error::UnknownLed(9)));
    assert_eq!(host_cmd::to_wire(unknown).0, EcStatus::InvalidParam);

    let unwired = svc.handle_control(
        &LedControlParams::query(LedId::Adapter as u8),
        &mut hw,
        &mut sink,
    );
    assert_eq!(unwired, Err(Error::UnsupportedLed(LedId::Adapter)));
    assert_eq!(host_cmd::to_wire(unwired).0, EcStatus::InvalidParam);
}

#[test]
fn brightness_on_missing_channel_is_rejected() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);

    let blue = LedControlParams::set(LedId::Battery as u8, [0, 0, 1, 0, 0, 0]);
    assert_eq!(
        svc.handle_control(&blue, &mut hw, &mut sink),
        Err(Error::UnsupportedColor(LedId::Battery, LedColor::Blue))
    );
    assert!(hw.calls.is_empty());
    assert!(svc.is_auto(LedId::Battery), "rejected command keeps auto control");
}

#[test]
fn set_brightness_takes_led_from_state_machine() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);

    let green = LedControlParams::set(LedId::Battery as u8, [0, 1, 0, 0, 0, 0]);
    let (status, range) = host_cmd::to_wire(svc.handle_control(&green, &mut hw, &mut sink));
    assert_eq!(status, EcStatus::Success);
    assert_eq!(range, [1, 1, 0, 0, 0, 1]);
    assert_eq!(
        hw.calls,
        [OutputCall::SetBrightness(LedId::Battery, [0, 1, 0, 0, 0, 0])]
    );
    assert!(!svc.is_auto(LedId::Battery));

    // Ticks now leave the battery LED alone.
    hw.clear();
    hw.set_status(ChargeState::Error, 50, ChipsetState::On);
    svc.tick(&mut hw, &mut sink);
    assert!(hw.colors(LedId::Battery).is_empty());
    assert_eq!(hw.colors(LedId::Power), [LedColor::White]);
}

#[test]
fn auto_flag_hands_led_back() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);
    svc.handle_control(
        &LedControlParams::set(LedId::Power as u8, [0, 0, 0, 0, 1, 0]),
        &mut hw,
        &mut sink,
    )
    .unwrap();
    assert!(!svc.is_auto(LedId::Power));

    let params = LedControlParams::decode(&[LedId::Power as u8, EC_LED_FLAGS_AUTO, 0, 0, 0, 0, 0, 0])
        .unwrap();
    svc.handle_control(&params, &mut hw, &mut sink).unwrap();
    assert!(svc.is_auto(LedId::Power));
    assert_eq!(
        sink.count(|e| matches!(e, LedEvent::AutoControlChanged { led: LedId::Power, .. })),
        2
    );
}

// ── On / Off / Reset ──────────────────────────────────────────

#[test]
fn control_on_lights_first_channel() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);
    svc.control(LedId::Battery, LedControlState::On, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(
        hw.calls,
        [OutputCall::SetBrightness(LedId::Battery, [1, 0, 0, 0, 0, 0])]
    );
    assert!(!svc.is_auto(LedId::Battery));
}

#[test]
fn control_off_darkens_all_channels() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);
    svc.control(LedId::Power, LedControlState::Off, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(hw.calls, [OutputCall::SetBrightness(LedId::Power, [0; 6])]);
}

#[test]
fn reset_reevaluates_immediately() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);
    hw.set_status(ChargeState::Charge, 3, ChipsetState::On);
    svc.control(LedId::Battery, LedControlState::Off, &mut hw, &mut sink)
        .unwrap();
    hw.clear();

    svc.control(LedId::Battery, LedControlState::Reset, &mut hw, &mut sink)
        .unwrap();
    assert!(svc.is_auto(LedId::Battery));
    assert_eq!(svc.battery_state(), Some(BatteryLedState::ChargingLvl1));
    assert_eq!(hw.last_color(LedId::Battery), Some(LedColor::Red));
}

/// Power LED blinking in SuspendAc, battery solid Amber, one tick in.
fn blinking(shared: &LedShared) -> (LedService<'_>, MockBoard, RecordingSink) {
    let (mut svc, mut hw, mut sink) = started(shared);
    hw.set_status(ChargeState::Charge, 50, ChipsetState::Suspend);
    hw.set_flags(ChargeFlags::EXTERNAL_POWER);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.power_state(), Some(PowerLedState::SuspendAc));
    assert_eq!(svc.power_cursor().ticks(), 1);
    hw.clear();
    sink.events.clear();
    (svc, hw, sink)
}

#[test]
fn queued_reset_shows_each_led_once_per_tick() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = blinking(&shared);
    shared
        .host()
        .submit(LedRequest::Control {
            led: LedId::Battery,
            state: LedControlState::Reset,
        })
        .unwrap();

    svc.tick(&mut hw, &mut sink);
    assert_eq!(hw.colors(LedId::Battery), [LedColor::Amber]);
    assert_eq!(hw.colors(LedId::Power), [LedColor::White]);
    assert_eq!(svc.power_cursor().ticks(), 2);
    assert_eq!(
        sink.count(|e| matches!(e, LedEvent::BatteryStateChanged { from: None, .. })),
        1
    );
}

#[test]
fn queued_off_then_reset_in_one_tick_shows_battery_once() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = blinking(&shared);
    let host = shared.host();
    for state in [LedControlState::Off, LedControlState::Reset] {
        host.submit(LedRequest::Control {
            led: LedId::Battery,
            state,
        })
        .unwrap();
    }

    svc.tick(&mut hw, &mut sink);
    assert!(svc.is_auto(LedId::Battery));
    assert_eq!(hw.colors(LedId::Battery), [LedColor::Amber]);
    assert_eq!(hw.colors(LedId::Power).len(), 1);
}

#[test]
fn direct_reset_leaves_other_led_alone() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = blinking(&shared);

    svc.control(LedId::Battery, LedControlState::Reset, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(hw.colors(LedId::Battery), [LedColor::Amber]);
    assert!(hw.colors(LedId::Power).is_empty());
    assert_eq!(svc.power_cursor().ticks(), 1);
}

#[test]
fn control_unwired_led_fails_with_param1() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);
    let r = svc.control(LedId::SysrqDebug, LedControlState::On, &mut hw, &mut sink);
    assert_eq!(r, Err(Error::UnsupportedLed(LedId::SysrqDebug)));
    assert_eq!(EcError::from(r), EcError::Param1);
}

// ── Request queue ─────────────────────────────────────────────

#[test]
fn queued_requests_apply_on_next_tick() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);
    let host = shared.host();

    host.submit(LedRequest::Control {
        led: LedId::Power,
        state: LedControlState::Off,
    })
    .unwrap();
    assert!(svc.is_auto(LedId::Power), "nothing happens before the tick");

    svc.tick(&mut hw, &mut sink);
    assert!(!host.is_auto(LedId::Power));
    assert_eq!(hw.calls.first(), Some(&OutputCall::SetBrightness(LedId::Power, [0; 6])));
    assert!(hw.colors(LedId::Power).is_empty());
}

#[test]
fn full_queue_reports_busy() {
    let shared = LedShared::new();
    let host = shared.host();
    let req = LedRequest::Host(LedControlParams::query(0));
    for _ in 0..REQUEST_DEPTH {
        host.submit(req.clone()).unwrap();
    }
    let err = host.submit(req).unwrap_err();
    assert_eq!(err, Error::QueueFull);
    assert_eq!(err.ec_status(), EcStatus::Busy);
}

#[test]
fn rejected_queued_request_is_reported() {
    let shared = LedShared::new();
    let (mut svc, mut hw, mut sink) = started(&shared);
    shared
        .host()
        .submit(LedRequest::Host(LedControlParams::set(42, [1, 0, 0, 0, 0, 0])))
        .unwrap();
    svc.tick(&mut hw, &mut sink);
    assert!(sink.events.contains(&LedEvent::ControlRejected {
        led_id: 42,
        error: Error::UnknownLed(42),
    }));
}
