//! Shared scheduling state and the lock that guards it.
//!
//! # Protocol
//!
//! ```text
//! train:      lock → push into lane → notify_dispatcher → unlock → wait turn
//! dispatcher: lock → wait_for_work → select → occupy → grant → (loop)
//! train:      lock → release track → finished += 1 → notify_all → unlock
//! ```
//!
//! `wait_for_work` re-checks its whole predicate on every wakeup, so
//! spurious or unrelated notifications are harmless.  Every change that can
//! make the predicate true (a push, a release, the last finish, an abort)
//! notifies before the lock is released.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use log::warn;
use mts_core::TrainId;
use mts_dispatch::{ReadyQueues, TrackState};

use crate::Dispatch;
use crate::turn::TurnSignal;

/// Everything guarded by the scheduling lock.
#[derive(Default)]
pub struct ScheduleState {
    pub queues:     ReadyQueues,
    pub track:      TrackState,
    /// Number of trains whose threads were started.
    pub roster:     usize,
    pub finished:   usize,
    pub aborted:    bool,
    pub dispatches: Vec<Dispatch>,
}

impl ScheduleState {
    #[inline]
    pub fn all_finished(&self) -> bool {
        self.finished >= self.roster
    }

    /// Track free and somebody waiting.
    #[inline]
    pub fn can_dispatch(&self) -> bool {
        self.track.is_free() && !self.queues.is_empty()
    }
}

/// The monitor shared by reference between the dispatcher and train
/// threads.
pub struct Schedule {
    state:   Mutex<ScheduleState>,
    changed: Condvar,
    turns:   Vec<TurnSignal>,
}

impl Schedule {
    /// A schedule for `trains` trains with ids `0..trains`.
    pub fn new(trains: usize) -> Self {
        Self {
            state:   Mutex::new(ScheduleState { roster: trains, ..Default::default() }),
            changed: Condvar::new(),
            turns:   (0..trains).map(|_| TurnSignal::new()).collect(),
        }
    }

    /// Take the scheduling lock.
    ///
    /// A poisoned lock means some thread panicked inside a critical section;
    /// that thread's guard has already aborted the run, so the state is only
    /// read to wind down.
    pub fn lock(&self) -> MutexGuard<'_, ScheduleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until a dispatch is possible, every train has finished, or the
    /// run was aborted.
    pub fn wait_for_work<'a>(
        &'a self,
        guard: MutexGuard<'a, ScheduleState>,
    ) -> MutexGuard<'a, ScheduleState> {
        self.changed
            .wait_while(guard, |s| !(s.aborted || s.all_finished() || s.can_dispatch()))
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Wake the dispatcher after a push.  Only the dispatcher waits on the
    /// condvar, so one wakeup is enough.
    pub fn notify_dispatcher(&self) {
        self.changed.notify_one();
    }

    /// Wake every condvar waiter.
    pub fn notify_all(&self) {
        self.changed.notify_all();
    }

    /// The turn signal of `train`.
    ///
    /// # Panics
    /// Panics if `train` is outside the roster the schedule was built for.
    pub fn turn(&self, train: TrainId) -> &TurnSignal {
        &self.turns[train.index()]
    }

    /// Stop the run: no further dispatches, every waiting train is told to
    /// give up, and trains that have not queued yet will not.
    pub fn abort(&self) {
        {
            let mut state = self.lock();
            if state.aborted {
                return;
            }
            state.aborted = true;
            // Trains only queue while `aborted` is false under this lock, so
            // every queued train is already waiting on (or about to wait on)
            // its slot when the revocations below land.
            self.changed.notify_all();
        }
        warn!("run aborted; revoking {} turn signals", self.turns.len());
        for turn in &self.turns {
            turn.revoke();
        }
    }

    pub fn into_state(self) -> ScheduleState {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Aborts the run if the owning thread unwinds, so a panicking train or
/// dispatcher cannot leave the others blocked forever.
pub struct AbortOnPanic<'a> {
    schedule: &'a Schedule,
}

impl<'a> AbortOnPanic<'a> {
    pub fn new(schedule: &'a Schedule) -> Self {
        Self { schedule }
    }
}

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.schedule.abort();
        }
    }
}
