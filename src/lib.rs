//! Battery and power LED policy for embedded controllers.
//!
//! Resolves the desired LED state from charger and chipset status, then
//! drives a two-phase blink pattern from a board-supplied table. Boards
//! plug in through the port traits in [`app::ports`] and the drivers in
//! [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod auto_control;
pub mod config;
pub mod error;
pub mod fsm;
pub mod host_cmd;
pub mod led;
pub mod profile;
pub mod scheduler;
