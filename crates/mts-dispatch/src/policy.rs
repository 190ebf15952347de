//! The `DispatchPolicy` trait and the default fairness policy.

use std::fmt;

use mts_core::{Direction, Priority, TrainId};

use crate::{ReadyEntry, ReadyQueues, TrackState};

// ── Selection ─────────────────────────────────────────────────────────────────

/// Which rule picked the train.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchRule {
    /// First crossing of the run, WEST preferred.
    OpeningBias,
    /// Opposite direction forced after a same-direction streak.
    StreakBreak,
    /// Priority class, then earliest ready, then lowest id.
    Priority,
}

impl DispatchRule {
    pub fn label(self) -> &'static str {
        match self {
            DispatchRule::OpeningBias => "opening-bias",
            DispatchRule::StreakBreak => "streak-break",
            DispatchRule::Priority => "priority",
        }
    }
}

impl fmt::Display for DispatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The train removed from a ready queue by a policy decision.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub train:     TrainId,
    pub direction: Direction,
    pub priority:  Priority,
    pub ready_ns:  u64,
    pub rule:      DispatchRule,
}

// ── DispatchPolicy ────────────────────────────────────────────────────────────

/// Pluggable selection policy.
///
/// `select` is called with the scheduling lock held, only when the track is
/// free.  It must pop exactly one entry from `queues` and return it, or
/// leave `queues` untouched and return `None` when every lane is empty.
pub trait DispatchPolicy: Send + Sync {
    fn select(&self, queues: &mut ReadyQueues, track: &TrackState) -> Option<Selection>;
}

/// Opening bias, then streak break, then priority with FIFO tie-break.
#[derive(Copy, Clone, Default, Debug)]
pub struct FairnessPolicy;

impl DispatchPolicy for FairnessPolicy {
    fn select(&self, queues: &mut ReadyQueues, track: &TrackState) -> Option<Selection> {
        if !track.has_ever_crossed() {
            if let Some(s) = pop_direction(queues, Direction::West, DispatchRule::OpeningBias) {
                return Some(s);
            }
        }

        // Best effort only: if the opposite side has nobody waiting right now,
        // the streak simply continues.
        if let Some(wanted) = track.forced_direction() {
            if let Some(s) = pop_direction(queues, wanted, DispatchRule::StreakBreak) {
                return Some(s);
            }
        }

        Priority::ALL
            .into_iter()
            .find_map(|priority| pop_earliest(queues, priority))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Pop the head of `direction`'s highest non-empty lane.
fn pop_direction(
    queues:    &mut ReadyQueues,
    direction: Direction,
    rule:      DispatchRule,
) -> Option<Selection> {
    Priority::ALL.into_iter().find_map(|priority| {
        queues
            .lane_mut(direction, priority)
            .pop_entry()
            .map(|entry| selection(entry, direction, priority, rule))
    })
}

/// Pop whichever of the EAST/WEST heads in `priority` comes first.
fn pop_earliest(queues: &mut ReadyQueues, priority: Priority) -> Option<Selection> {
    let east = queues.lane(Direction::East, priority).peek();
    let west = queues.lane(Direction::West, priority).peek();

    let direction = match (east, west) {
        (Some(e), Some(w)) if w.comes_before(&e) => Direction::West,
        (Some(_), _) => Direction::East,
        (None, Some(_)) => Direction::West,
        (None, None) => return None,
    };

    queues
        .lane_mut(direction, priority)
        .pop_entry()
        .map(|entry| selection(entry, direction, priority, DispatchRule::Priority))
}

fn selection(
    entry:     ReadyEntry,
    direction: Direction,
    priority:  Priority,
    rule:      DispatchRule,
) -> Selection {
    Selection {
        train: entry.train,
        direction,
        priority,
        ready_ns: entry.ready_ns,
        rule,
    }
}
