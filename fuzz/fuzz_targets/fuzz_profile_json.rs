//! Fuzz target: board profile parsing
//!
//! Any JSON that deserialises into a profile must either be rejected by
//! `validate` or build a working service.
//!
//! cargo fuzz run fuzz_profile_json

#![no_main]

use ecled::auto_control::LedShared;
use ecled::app::service::LedService;
use ecled::profile::BoardProfile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(profile) = serde_json::from_slice::<BoardProfile>(data) else {
        return;
    };
    let shared = LedShared::new();
    assert_eq!(
        profile.validate().is_ok(),
        LedService::new(&profile, &shared).is_ok()
    );
});
