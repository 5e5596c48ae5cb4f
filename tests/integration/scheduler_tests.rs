//! Integration tests for the hook scheduler driving the service.

use core::time::Duration;

use crate::mock_hw::{MockBoard, RecordingSink};

use ecled::app::service::{LedService, ServiceHooks};
use ecled::auto_control::LedShared;
use ecled::config::TickSource;
use ecled::fsm::context::{ChargeState, ChipsetState};
use ecled::led::{LedColor, LedId};
use ecled::profile::BoardProfile;
use ecled::scheduler::HookScheduler;

#[test]
fn hook_tick_drives_every_update() {
    let shared = LedShared::new();
    let mut svc = LedService::new(&BoardProfile::reference(), &shared).unwrap();
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();
    svc.init(&mut hw, &mut sink);
    hw.set_status(ChargeState::Error, 50, ChipsetState::On);

    let mut sched = HookScheduler::new().with_period(Duration::ZERO);
    let mut hooks = ServiceHooks {
        service: &mut svc,
        hw: &mut hw,
        sink: &mut sink,
    };
    futures_lite::future::block_on(sched.run(&mut hooks, Some(10)));

    assert_eq!(svc.tick_count(), 10);
    // Init wrote one Off, then one full Red/Off period.
    let colors = hw.colors(LedId::Battery);
    assert_eq!(colors.len(), 11);
    assert_eq!(colors[1..6], [LedColor::Red; 5]);
    assert_eq!(colors[6..], [LedColor::Off; 5]);
}

#[test]
fn second_hook_slows_the_pattern() {
    let shared = LedShared::new();
    let mut profile = BoardProfile::reference();
    profile.config.tick_source = TickSource::Second;
    let mut svc = LedService::new(&profile, &shared).unwrap();
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();
    svc.init(&mut hw, &mut sink);

    let mut sched = HookScheduler::new();
    let mut hooks = ServiceHooks {
        service: &mut svc,
        hw: &mut hw,
        sink: &mut sink,
    };
    for _ in 0..25 {
        sched.advance(&mut hooks);
    }

    assert_eq!(sched.ticks(), 25);
    assert_eq!(svc.tick_count(), 5);
}
