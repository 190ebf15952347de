//! Per-lane ready queues.
//!
//! A lane is one `(Direction, Priority)` pair.  Each lane keeps its trains in
//! a `BTreeSet<ReadyEntry>`; the derived `Ord` on `ReadyEntry` compares the
//! ready timestamp first and the `TrainId` second, which is exactly the
//! queue order (earliest ready first, lower id on a tie).
//!
//! `BTreeSet` gives O(log n) insert and O(log n) head removal.  Queues hold at
//! most a few hundred trains so the constant does not matter.

use std::collections::BTreeSet;

use mts_core::{Direction, Priority, TrainId};

// ── ReadyEntry ────────────────────────────────────────────────────────────────

/// One waiting train.  Field order defines the queue order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadyEntry {
    /// Nanoseconds since simulation start at which loading finished.
    pub ready_ns: u64,
    pub train:    TrainId,
}

impl ReadyEntry {
    pub fn new(train: TrainId, ready_ns: u64) -> Self {
        Self { ready_ns, train }
    }

    /// `true` if `self` must be served before `other`.
    #[inline]
    pub fn comes_before(&self, other: &ReadyEntry) -> bool {
        self < other
    }
}

// ── ReadyQueue ────────────────────────────────────────────────────────────────

/// Trains of one lane, ordered by readiness then id.
#[derive(Default, Clone, Debug)]
pub struct ReadyQueue {
    inner:  BTreeSet<ReadyEntry>,
    /// Ids currently in `inner`.
    queued: BTreeSet<TrainId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `train` at its ordered position.
    ///
    /// Returns `false` (and leaves the queue unchanged) if `train` is already
    /// queued, whatever its ready time.
    pub fn push(&mut self, train: TrainId, ready_ns: u64) -> bool {
        if !self.queued.insert(train) {
            return false;
        }
        self.inner.insert(ReadyEntry::new(train, ready_ns))
    }

    pub fn contains(&self, train: TrainId) -> bool {
        self.queued.contains(&train)
    }

    /// Remove and return the head train, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<TrainId> {
        self.pop_entry().map(|e| e.train)
    }

    /// Remove and return the head entry.
    pub fn pop_entry(&mut self) -> Option<ReadyEntry> {
        let entry = self.inner.pop_first()?;
        self.queued.remove(&entry.train);
        Some(entry)
    }

    /// The head entry without removing it.
    pub fn peek(&self) -> Option<ReadyEntry> {
        self.inner.first().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── ReadyQueues ───────────────────────────────────────────────────────────────

/// The four lanes, indexed by `(Direction, Priority)`.
#[derive(Default, Clone, Debug)]
pub struct ReadyQueues {
    lanes: [ReadyQueue; 4],
}

#[inline]
fn lane_index(direction: Direction, priority: Priority) -> usize {
    let d = match direction {
        Direction::East => 0,
        Direction::West => 2,
    };
    let p = match priority {
        Priority::High => 0,
        Priority::Low => 1,
    };
    d + p
}

impl ReadyQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `train` in its lane.
    ///
    /// Returns `false` (and changes nothing) if `train` is already waiting in
    /// any lane.
    pub fn push(
        &mut self,
        direction: Direction,
        priority:  Priority,
        train:     TrainId,
        ready_ns:  u64,
    ) -> bool {
        if self.contains(train) {
            return false;
        }
        self.lane_mut(direction, priority).push(train, ready_ns)
    }

    /// `true` if `train` is waiting in any lane.
    pub fn contains(&self, train: TrainId) -> bool {
        self.lanes.iter().any(|lane| lane.contains(train))
    }

    pub fn lane(&self, direction: Direction, priority: Priority) -> &ReadyQueue {
        &self.lanes[lane_index(direction, priority)]
    }

    pub fn lane_mut(&mut self, direction: Direction, priority: Priority) -> &mut ReadyQueue {
        &mut self.lanes[lane_index(direction, priority)]
    }

    /// `true` if any train travelling `direction` is waiting.
    pub fn has_ready(&self, direction: Direction) -> bool {
        Priority::ALL.iter().any(|&p| !self.lane(direction, p).is_empty())
    }

    /// Total queued trains across all lanes.
    pub fn len(&self) -> usize {
        self.lanes.iter().map(ReadyQueue::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(ReadyQueue::is_empty)
    }
}
