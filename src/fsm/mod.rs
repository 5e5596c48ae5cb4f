//! Table-driven two-phase blink engine.
//!
//! Every LED state owns one row of a [`StateTable`]: two
//! [`LedDescriptor`]s, each a colour held for a number of hook ticks.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌──────────────────┬─────────────────┬────────────────┐ │
//! │  │ state            │ phase 0         │ phase 1        │ │
//! │  ├──────────────────┼─────────────────┼────────────────┤ │
//! │  │ ChargingLvl1     │ Red, indefinite │ -              │ │
//! │  │ BatteryError     │ Red, 1 s        │ Off, 1 s       │ │
//! │  │ FactoryTest      │ Red, 2 s        │ Green, 2 s     │ │
//! │  └──────────────────┴─────────────────┴────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`BlinkCursor`] tracks the active state and a tick counter. Each
//! tick the phase is `0` while `ticks < t0` and `1` afterwards, and the
//! counter advances modulo `t0 + t1`. Entering a new state restarts the
//! counter so the change shows up immediately. A row whose two phases
//! are both zero-length is undefined and always renders `Off`.

pub mod context;
pub mod states;

use core::fmt::Debug;
use core::marker::PhantomData;

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::led::LedColor;

/// Period of the fast hook tick.
pub const HOOK_TICK_INTERVAL_MS: u32 = 200;

/// Hook ticks per second.
pub const LED_ONE_SEC: u16 = (1000 / HOOK_TICK_INTERVAL_MS) as u16;

/// Upper bound on the number of states a table can hold.
pub const MAX_STATES: usize = 16;

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// Duration of one phase, in hook ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ticks {
    Count(u16),
    /// The phase never ends.
    Indefinite,
}

impl Ticks {
    pub const ZERO: Self = Self::Count(0);

    /// `n` seconds worth of hook ticks.
    pub const fn secs(n: u16) -> Self {
        Self::Count(n.saturating_mul(LED_ONE_SEC))
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }
}

/// One phase of a state's blink pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedDescriptor {
    pub color: LedColor,
    pub time: Ticks,
}

impl LedDescriptor {
    /// An omitted phase.
    pub const UNDEFINED: Self = Self {
        color: LedColor::Off,
        time: Ticks::ZERO,
    };

    pub const fn new(color: LedColor, time: Ticks) -> Self {
        Self { color, time }
    }

    /// A colour shown for as long as the state lasts.
    pub const fn solid(color: LedColor) -> Self {
        Self::new(color, Ticks::Indefinite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Zero = 0,
    One = 1,
}

impl Phase {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Shape of a row's timing, derived from its two durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Both phases are zero-length.
    Undefined,
    /// Phase 0 is indefinite; never blinks.
    Solid,
    /// Phase 0 for `first` ticks, then phase 1 for good.
    Hold { first: u16 },
    /// Repeats with length `total`, phase 0 for the first `first` ticks.
    Blink { first: u16, total: u16 },
}

impl Period {
    pub fn of(phases: &[LedDescriptor; 2]) -> Self {
        match (phases[0].time, phases[1].time) {
            (Ticks::Indefinite, _) => Self::Solid,
            (Ticks::Count(first), Ticks::Indefinite) => Self::Hold { first },
            (Ticks::Count(0), Ticks::Count(0)) => Self::Undefined,
            (Ticks::Count(first), Ticks::Count(second)) => Self::Blink {
                first,
                total: first.saturating_add(second),
            },
        }
    }

    /// Phase shown at counter value `ticks`; `None` when undefined.
    pub const fn phase_at(self, ticks: u16) -> Option<Phase> {
        match self {
            Self::Undefined => None,
            Self::Solid => Some(Phase::Zero),
            Self::Hold { first } | Self::Blink { first, .. } => {
                if ticks < first {
                    Some(Phase::Zero)
                } else {
                    Some(Phase::One)
                }
            }
        }
    }

    /// Counter value after `ticks`.
    pub const fn advance(self, ticks: u16) -> u16 {
        match self {
            Self::Undefined | Self::Solid => 0,
            Self::Hold { first } => {
                if ticks < first {
                    ticks + 1
                } else {
                    ticks
                }
            }
            Self::Blink { total, .. } => (ticks + 1) % total,
        }
    }
}

// ---------------------------------------------------------------------------
// State tables
// ---------------------------------------------------------------------------

/// A closed set of LED states that can index a [`StateTable`].
///
/// Implementations must keep `index()` below [`MAX_STATES`].
pub trait LedState: Copy + Eq + Debug + 'static {
    /// Every state, in index order.
    const ALL: &'static [Self];

    fn index(self) -> usize;

    fn name(self) -> &'static str;

    /// Defined sibling used when this optional state has a zero-length
    /// first phase.
    fn fallback(self) -> Option<Self> {
        None
    }
}

/// `[state][phase] -> descriptor`, supplied by the board.
///
/// The default table is empty: every state is undefined and renders off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTable<S> {
    rows: [[LedDescriptor; 2]; MAX_STATES],
    _state: PhantomData<S>,
}

impl<S: LedState> Default for StateTable<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: LedState> StateTable<S> {
    pub const fn empty() -> Self {
        Self {
            rows: [[LedDescriptor::UNDEFINED; 2]; MAX_STATES],
            _state: PhantomData,
        }
    }

    /// Builder form of [`set_phases`](Self::set_phases).
    pub fn with(mut self, state: S, phase0: LedDescriptor, phase1: LedDescriptor) -> Self {
        self.rows[state.index()] = [phase0, phase1];
        self
    }

    /// Builder shortcut for a non-blinking state.
    pub fn solid(self, state: S, color: LedColor) -> Self {
        self.with(state, LedDescriptor::solid(color), LedDescriptor::UNDEFINED)
    }

    /// Replace a state's row with one or two phases.
    pub fn set_phases(&mut self, state: S, phases: &[LedDescriptor]) -> Result<()> {
        if phases.is_empty() || phases.len() > 2 {
            return Err(Error::Config("a state takes one or two phases"));
        }
        let row = &mut self.rows[state.index()];
        *row = [LedDescriptor::UNDEFINED; 2];
        row[..phases.len()].copy_from_slice(phases);
        Ok(())
    }

    pub fn phases(&self, state: S) -> &[LedDescriptor; 2] {
        &self.rows[state.index()]
    }

    pub fn get(&self, state: S, phase: Phase) -> LedDescriptor {
        self.rows[state.index()][phase.index()]
    }

    pub fn period(&self, state: S) -> Period {
        Period::of(self.phases(state))
    }

    pub fn is_defined(&self, state: S) -> bool {
        self.period(state) != Period::Undefined
    }

    /// Colour shown in `state` at counter value `ticks`.
    pub fn color_at(&self, state: S, ticks: u16) -> LedColor {
        match self.period(state).phase_at(ticks) {
            Some(phase) => self.get(state, phase).color,
            None => LedColor::Off,
        }
    }

    /// Substitute the defined sibling for an optional state left empty.
    pub fn resolve(&self, state: S) -> S {
        match state.fallback() {
            Some(sibling) if self.phases(state)[0].time.is_zero() => sibling,
            _ => state,
        }
    }

    fn is_blank(&self, state: S) -> bool {
        *self.phases(state) == [LedDescriptor::UNDEFINED; 2]
    }
}

/// Serialised form of one table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateEntry<S> {
    state: S,
    phases: heapless::Vec<LedDescriptor, 2>,
}

impl<S: LedState + Serialize> Serialize for StateTable<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> core::result::Result<Ser::Ok, Ser::Error> {
        let rows = S::ALL.iter().filter(|s| !self.is_blank(**s)).count();
        let mut seq = serializer.serialize_seq(Some(rows))?;
        for &state in S::ALL.iter().filter(|s| !self.is_blank(**s)) {
            let [p0, p1] = *self.phases(state);
            let mut phases = heapless::Vec::<LedDescriptor, 2>::new();
            // Capacity is exactly two; pushes cannot fail.
            let _ = phases.push(p0);
            if p1 != LedDescriptor::UNDEFINED {
                let _ = phases.push(p1);
            }
            seq.serialize_element(&StateEntry { state, phases })?;
        }
        seq.end()
    }
}

impl<'de, S: LedState + Deserialize<'de>> Deserialize<'de> for StateTable<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let entries = heapless::Vec::<StateEntry<S>, MAX_STATES>::deserialize(deserializer)?;
        let mut table = Self::empty();
        for entry in entries {
            table
                .set_phases(entry.state, &entry.phases)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// Runtime cursor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    pub from: Option<S>,
    pub to: S,
}

/// Outcome of one [`BlinkCursor::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkStep<S> {
    /// Colour to drive this tick.
    pub color: LedColor,
    /// `None` when no state is active or the state is undefined.
    pub phase: Option<Phase>,
    pub transition: Option<Transition<S>>,
    /// Set on the first tick spent in an undefined state.
    pub entered_undefined: bool,
}

/// Per-LED runtime state: active state, tick counter and period.
#[derive(Debug, Clone)]
pub struct BlinkCursor<S> {
    current: Option<S>,
    ticks: u16,
    period: Period,
    reported: bool,
}

impl<S: LedState> Default for BlinkCursor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LedState> BlinkCursor<S> {
    pub const fn new() -> Self {
        Self {
            current: None,
            ticks: 0,
            period: Period::Undefined,
            reported: false,
        }
    }

    pub fn current(&self) -> Option<S> {
        self.current
    }

    pub fn ticks(&self) -> u16 {
        self.ticks
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Forget the active state so the next step counts as a change.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance one tick toward `desired` (`None` leaves the state as is).
    pub fn step(&mut self, desired: Option<S>, table: &StateTable<S>) -> BlinkStep<S> {
        let mut transition = None;

        if let Some(desired) = desired.map(|s| table.resolve(s)) {
            if self.current != Some(desired) {
                transition = Some(Transition {
                    from: self.current,
                    to: desired,
                });
                self.current = Some(desired);
                self.ticks = 0;
                self.period = table.period(desired);
                self.reported = false;
            }
        }

        let Some(state) = self.current else {
            return BlinkStep {
                color: LedColor::Off,
                phase: None,
                transition,
                entered_undefined: false,
            };
        };

        let Some(phase) = self.period.phase_at(self.ticks) else {
            let first = !self.reported;
            self.reported = true;
            return BlinkStep {
                color: LedColor::Off,
                phase: None,
                transition,
                entered_undefined: first,
            };
        };
        self.ticks = self.period.advance(self.ticks);

        BlinkStep {
            color: table.get(state, phase).color,
            phase: Some(phase),
            transition,
            entered_undefined: false,
        }
    }
}
