//! What a run returns.

use std::time::Duration;

use mts_core::{Direction, TrainId};
use mts_dispatch::Selection;

/// One dispatcher decision.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Dispatch {
    pub selection:      Selection,
    /// Time since simulation start at which the decision was made.
    pub at:             Duration,
    /// Fairness counters the decision was made against.
    pub last_direction: Option<Direction>,
    pub consecutive:    u32,
}

/// Summary of a completed run.
#[derive(Clone, Debug, Default)]
pub struct SimReport {
    /// Every dispatch, in decision order.
    pub dispatches: Vec<Dispatch>,
    pub trains:     usize,
    pub elapsed:    Duration,
}

impl SimReport {
    /// Train ids in the order they were given the track.
    pub fn order(&self) -> Vec<TrainId> {
        self.dispatches.iter().map(|d| d.selection.train).collect()
    }

    /// Directions in the order they used the track.
    pub fn directions(&self) -> Vec<Direction> {
        self.dispatches.iter().map(|d| d.selection.direction).collect()
    }
}
