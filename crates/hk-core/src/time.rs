//! Simulated time.
//!
//! This simulator's clock is continuous rather than tick-based: the engine
//! advances it by
//! `1 / event_rate` (or an exponential draw) after every step, not by a
//! fixed-size tick. `Minutes` is the canonical unit; "month" is an
//! approximation used only for bucketing follow-weight schedules and
//! degree-distribution snapshots, never for the clock itself.

use std::fmt;

/// Minutes used to approximate one month, for bucketing purposes only.
pub const APPROX_MONTH_MINUTES: f64 = 30.0 * 24.0 * 60.0;

#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct Minutes(pub f64);

impl Minutes {
    pub const ZERO: Minutes = Minutes(0.0);

    /// Month index (0-based) this instant falls into, per `APPROX_MONTH_MINUTES`.
    #[inline]
    pub fn month(self) -> usize {
        (self.0 / APPROX_MONTH_MINUTES).floor().max(0.0) as usize
    }

    #[inline]
    pub fn advance(self, dt: f64) -> Minutes {
        Minutes(self.0 + dt)
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}min", self.0)
    }
}

/// Number of months spanned by a run lasting `max_time` minutes, i.e. the
/// highest valid month index plus one. Used to pre-size month-indexed arrays.
pub fn month_horizon(max_time: Minutes) -> usize {
    max_time.month() + 1
}
