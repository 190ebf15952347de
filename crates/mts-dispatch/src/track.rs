//! The shared track and its fairness counters.

use log::trace;
use mts_core::{Direction, TrainId};

use crate::{DispatchError, DispatchResult};

/// After this many consecutive crossings in one direction, the opposite
/// direction is served first if it has a train waiting.
pub const STREAK_LIMIT: u32 = 2;

/// Occupancy of the single track plus the counters used by the fairness
/// rules.
///
/// Only the dispatcher calls [`occupy`][Self::occupy]; only the train on the
/// track calls [`release`][Self::release].
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct TrackState {
    occupant:       Option<TrainId>,
    last_direction: Option<Direction>,
    /// Completed crossings in a row sharing `last_direction`.
    consecutive:    u32,
    crossings:      u64,
}

impl TrackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the track busy with `train`.
    pub fn occupy(&mut self, train: TrainId) -> DispatchResult<()> {
        if let Some(holder) = self.occupant {
            return Err(DispatchError::TrackOccupied { holder, requested: train });
        }
        self.occupant = Some(train);
        Ok(())
    }

    /// Free the track after `train` finished crossing in `direction` and
    /// update the fairness counters.
    pub fn release(&mut self, train: TrainId, direction: Direction) -> DispatchResult<()> {
        if self.occupant != Some(train) {
            return Err(DispatchError::NotOnTrack { train, holder: self.occupant });
        }
        self.occupant = None;
        self.crossings += 1;

        if self.last_direction == Some(direction) {
            self.consecutive += 1;
        } else {
            self.last_direction = Some(direction);
            self.consecutive = 1;
        }
        trace!("{train} released the track: {direction} streak {}", self.consecutive);
        Ok(())
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn occupant(&self) -> Option<TrainId> {
        self.occupant
    }

    #[inline]
    pub fn has_ever_crossed(&self) -> bool {
        self.crossings > 0
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }

    /// Completed crossings so far.
    pub fn crossings(&self) -> u64 {
        self.crossings
    }

    /// The direction the streak rule wants next, if the streak has reached
    /// [`STREAK_LIMIT`].
    pub fn forced_direction(&self) -> Option<Direction> {
        match self.last_direction {
            Some(last) if self.consecutive >= STREAK_LIMIT => Some(last.opposite()),
            _ => None,
        }
    }
}
