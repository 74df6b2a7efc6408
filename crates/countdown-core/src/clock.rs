//! Wall-clock countdown to a fixed target instant.
//!
//! The clock is polled by the shell at a 1-second cadence. It never reads the
//! system time itself: callers pass `now_ms` (milliseconds since the Unix
//! epoch), so the same code runs against `Date.now()` in the browser and
//! against synthetic timestamps in tests.

use crate::constants::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use std::fmt;

/// Labels for the four display units, in the order of [`TimeRemaining::padded`].
pub const UNIT_LABELS: [&str; 4] = ["DAYS", "HRS", "MIN", "SEC"];

/// Remaining duration split into display units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimeRemaining {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeRemaining {
    pub const ZERO: TimeRemaining = TimeRemaining::new(0, 0, 0, 0);

    pub const fn new(days: u32, hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Split a millisecond difference into units, flooring each one.
    ///
    /// Non-positive differences yield [`TimeRemaining::ZERO`].
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::ZERO;
        }
        Self {
            days: (diff_ms / MS_PER_DAY) as u32,
            hours: ((diff_ms / MS_PER_HOUR) % 24) as u32,
            minutes: ((diff_ms / MS_PER_MINUTE) % 60) as u32,
            seconds: ((diff_ms / MS_PER_SECOND) % 60) as u32,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days as u64 * 86_400
            + self.hours as u64 * 3_600
            + self.minutes as u64 * 60
            + self.seconds as u64
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Two-digit values for days, hours, minutes and seconds.
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Snapshot published to the emitter and the audio sequencer each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountdownState {
    pub remaining: TimeRemaining,
    pub reached_target: bool,
}

impl CountdownState {
    pub const REACHED: CountdownState = CountdownState {
        remaining: TimeRemaining::ZERO,
        reached_target: true,
    };

    pub fn counting(remaining: TimeRemaining) -> Self {
        Self {
            remaining,
            reached_target: false,
        }
    }
}

/// Countdown towards `target_ms`.
///
/// Once the target has been reached the clock latches: every later tick
/// reports zero with `reached_target == true`, even if the wall clock moves
/// backwards.
#[derive(Clone, Debug)]
pub struct Clock {
    target_ms: i64,
    last: CountdownState,
}

impl Clock {
    pub fn new(target_ms: i64) -> Self {
        Self {
            target_ms,
            last: CountdownState::default(),
        }
    }

    pub fn target_ms(&self) -> i64 {
        self.target_ms
    }

    /// Recompute the countdown from `target - now`.
    pub fn tick(&mut self, now_ms: i64) -> CountdownState {
        if self.last.reached_target {
            return self.last;
        }
        let diff = self.target_ms.saturating_sub(now_ms);
        self.last = if diff > 0 {
            CountdownState::counting(TimeRemaining::from_millis(diff))
        } else {
            log::info!("[clock] target reached");
            CountdownState::REACHED
        };
        self.last
    }

    pub fn state(&self) -> CountdownState {
        self.last
    }

    pub fn reached_target(&self) -> bool {
        self.last.reached_target
    }
}
