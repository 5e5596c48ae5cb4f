//! Application core: LED policy, zero I/O.
//!
//! Resolution of the desired battery and power LED states, the blink
//! cursors, auto-control bookkeeping and manual control all live here.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod policy;
pub mod ports;
pub mod service;
