//! Train descriptors.
//!
//! A [`TrainSpec`] is built once by the input loader and never mutated.  Its
//! `direction` and `priority` together select one of the four ready queues.

use std::fmt;

use crate::{MtsError, MtsResult, TrainId};

/// Inclusive bounds for load and cross durations, in simulated units.
pub const MIN_UNITS: u32 = 1;
pub const MAX_UNITS: u32 = 99;

// ── Direction ─────────────────────────────────────────────────────────────────

/// Travel direction over the single shared track.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::East, Direction::West];

    /// The other direction.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Word used in event log lines.
    pub fn label(self) -> &'static str {
        match self {
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Priority ──────────────────────────────────────────────────────────────────

/// Priority class.  `High` always sorts before `Low`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    High,
    Low,
}

impl Priority {
    /// Highest first.
    pub const ALL: [Priority; 2] = [Priority::High, Priority::Low];

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decode a direction character: the letter picks the direction, its case
/// picks the priority (`E`/`W` high, `e`/`w` low).
pub fn decode_direction(code: char) -> MtsResult<(Direction, Priority)> {
    match code {
        'E' => Ok((Direction::East, Priority::High)),
        'e' => Ok((Direction::East, Priority::Low)),
        'W' => Ok((Direction::West, Priority::High)),
        'w' => Ok((Direction::West, Priority::Low)),
        other => Err(MtsError::InvalidDirection(other)),
    }
}

// ── TrainSpec ─────────────────────────────────────────────────────────────────

/// Immutable description of one train.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainSpec {
    pub id:          TrainId,
    pub direction:   Direction,
    pub priority:    Priority,
    /// Loading time in simulated units.
    pub load_units:  u32,
    /// Crossing time in simulated units.
    pub cross_units: u32,
}

impl TrainSpec {
    /// Build a train, checking both durations are within `1..=99`.
    pub fn new(
        id:          TrainId,
        direction:   Direction,
        priority:    Priority,
        load_units:  i64,
        cross_units: i64,
    ) -> MtsResult<Self> {
        Ok(Self {
            id,
            direction,
            priority,
            load_units:  check_units(id, "loading", load_units)?,
            cross_units: check_units(id, "crossing", cross_units)?,
        })
    }

    /// Build a train from the input-file direction code.
    pub fn from_code(id: TrainId, code: char, load_units: i64, cross_units: i64) -> MtsResult<Self> {
        let (direction, priority) = decode_direction(code)?;
        Self::new(id, direction, priority, load_units, cross_units)
    }

    /// The direction code this train would be written with in an input file.
    pub fn code(&self) -> char {
        match (self.direction, self.priority) {
            (Direction::East, Priority::High) => 'E',
            (Direction::East, Priority::Low) => 'e',
            (Direction::West, Priority::High) => 'W',
            (Direction::West, Priority::Low) => 'w',
        }
    }
}

fn check_units(train: TrainId, what: &'static str, got: i64) -> MtsResult<u32> {
    if got < MIN_UNITS as i64 || got > MAX_UNITS as i64 {
        return Err(MtsError::DurationOutOfRange { train, what, got });
    }
    Ok(got as u32)
}
