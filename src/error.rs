//! Unified error types for the LED core.
//!
//! A single `Copy` error enum that every subsystem converts into, plus the
//! two EC status vocabularies it maps onto: host-command result codes
//! ([`EcStatus`]) and the legacy board accessor codes ([`EcError`]).

use core::fmt;

use crate::led::{LedColor, LedId};

// ---------------------------------------------------------------------------
// Crate error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Raw LED id outside the protocol range.
    UnknownLed(u8),
    /// Valid LED id the board does not wire up.
    UnsupportedLed(LedId),
    /// Brightness requested on a channel the LED does not have.
    UnsupportedColor(LedId, LedColor),
    /// Malformed command parameters.
    InvalidParam(&'static str),
    /// The output driver rejected a write.
    Output(&'static str),
    /// Configuration or board profile is invalid.
    Config(&'static str),
    /// The request queue is full; retry on a later tick.
    QueueFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLed(raw) => write!(f, "unknown LED id {raw}"),
            Self::UnsupportedLed(id) => write!(f, "LED {id:?} not supported"),
            Self::UnsupportedColor(id, c) => write!(f, "LED {id:?} has no {c} channel"),
            Self::InvalidParam(msg) => write!(f, "invalid param: {msg}"),
            Self::Output(msg) => write!(f, "output: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::QueueFull => write!(f, "request queue full"),
        }
    }
}

impl core::error::Error for Error {}

impl Error {
    /// Result code reported through the LED control command.
    pub const fn ec_status(self) -> EcStatus {
        match self {
            Self::QueueFull => EcStatus::Busy,
            _ => EcStatus::InvalidParam,
        }
    }

    /// Code reported by the board accessor functions.
    pub const fn ec_error(self) -> EcError {
        match self {
            Self::UnknownLed(_) | Self::UnsupportedLed(_) => EcError::Param1,
            Self::QueueFull => EcError::Busy,
            _ => EcError::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// EC status codes
// ---------------------------------------------------------------------------

/// Host command result codes (subset used by the LED control command).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EcStatus {
    Success = 0,
    InvalidParam = 3,
    Busy = 16,
}

/// Legacy EC error codes returned by board-level LED accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EcError {
    Success = 0,
    Unknown = 1,
    Busy = 6,
    Param1 = 11,
}

impl From<Result<()>> for EcError {
    fn from(r: Result<()>) -> Self {
        match r {
            Ok(()) => Self::Success,
            Err(e) => e.ec_error(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
