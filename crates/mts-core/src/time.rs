//! Simulation time model.
//!
//! # Design
//!
//! Load and cross durations are integers in simulated *units*.  `SimConfig`
//! maps one unit to a wall-clock `Duration` (default 100 ms, i.e. the input
//! file counts tenths of a second).  Agents sleep for `units * time_unit`.
//!
//! All timestamps are measured on the monotonic clock relative to the
//! instant the simulation started, held by `SimClock`:
//!
//!   elapsed = Instant::now() - start
//!
//! Ready timestamps are stored as whole nanoseconds (`u64`) so they compare
//! exactly inside the ready queues.

use std::time::{Duration, Instant};

use crate::{MtsError, MtsResult};

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Wall-clock length of one simulated load/cross unit.  Default: 100 ms.
    pub time_unit: Duration,
}

impl SimConfig {
    pub const DEFAULT_TIME_UNIT: Duration = Duration::from_millis(100);

    /// Config with a time unit of `ms` milliseconds.
    pub fn with_unit_ms(ms: u64) -> MtsResult<Self> {
        if ms == 0 {
            return Err(MtsError::Config("time unit must be at least 1 ms".into()));
        }
        Ok(Self { time_unit: Duration::from_millis(ms) })
    }

    /// Wall-clock span of `units` simulated units.
    #[inline]
    pub fn span(&self, units: u32) -> Duration {
        self.time_unit * units
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { time_unit: Self::DEFAULT_TIME_UNIT }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic clock anchored at simulation start.
///
/// `SimClock` is `Copy`; every thread holds its own copy of the same anchor.
#[derive(Copy, Clone, Debug)]
pub struct SimClock {
    start: Instant,
}

impl SimClock {
    /// Anchor a clock at the current instant.
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Time elapsed since the anchor.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Whole nanoseconds in `d`, saturating at `u64::MAX` (~584 years).
#[inline]
pub fn duration_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Format an elapsed duration as `HH:MM:SS.T` (T = tenths, truncated).
///
/// Hours are not wrapped at 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let hours = total_ms / 3_600_000;
    let mins = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let tenths = (total_ms % 1_000) / 100;
    format!("{hours:02}:{mins:02}:{secs:02}.{tenths}")
}
