//! The dispatcher thread body.
//!
//! ```text
//! WAITING → SELECTING → DISPATCHED → WAITING …   DONE
//! ```
//!
//! The scheduling lock is held for the whole loop except while blocked in
//! [`Schedule::wait_for_work`].

use log::{debug, error, info, warn};
use mts_core::SimClock;
use mts_dispatch::DispatchPolicy;

use crate::schedule::{AbortOnPanic, Schedule, ScheduleState};
use crate::{Dispatch, SimError, SimResult, TrackObserver};

/// Dispatch trains until all have finished or the run is aborted.
///
/// Returns an error only for invariant violations detected here; an abort
/// caused elsewhere ends the loop with `Ok`.
pub(crate) fn run_dispatcher<P, O>(
    schedule: &Schedule,
    policy:   &P,
    observer: &O,
    clock:    SimClock,
) -> SimResult<()>
where
    P: DispatchPolicy + ?Sized,
    O: TrackObserver + ?Sized,
{
    let _guard = AbortOnPanic::new(schedule);
    let mut state = schedule.lock();

    loop {
        // ── WAITING ───────────────────────────────────────────────────────
        state = schedule.wait_for_work(state);

        if state.aborted {
            warn!("dispatcher stopping: run aborted after {} dispatches", state.dispatches.len());
            return Ok(());
        }
        if state.all_finished() {
            info!("dispatcher done: {} trains crossed", state.finished);
            return Ok(());
        }

        // ── SELECTING ─────────────────────────────────────────────────────
        let ScheduleState { queues, track, .. } = &mut *state;
        let Some(selection) = policy.select(queues, track) else {
            // The wait predicate guarantees a non-empty queue, so declining
            // here would spin forever.
            let waiting = queues.len();
            drop(state);
            error!("policy selected nothing with {waiting} trains waiting");
            schedule.abort();
            return Err(SimError::PolicyDeclined { waiting });
        };

        // ── DISPATCHED ────────────────────────────────────────────────────
        let dispatch = Dispatch {
            selection,
            at: clock.elapsed(),
            last_direction: track.last_direction(),
            consecutive: track.consecutive(),
        };
        if let Err(e) = track.occupy(selection.train) {
            drop(state);
            error!("{e}");
            schedule.abort();
            return Err(e.into());
        }
        debug!(
            "dispatch {} ({} {}) by {} [last {:?} x{}]",
            selection.train,
            selection.direction,
            selection.priority,
            selection.rule,
            dispatch.last_direction,
            dispatch.consecutive,
        );
        state.dispatches.push(dispatch);
        observer.on_dispatch(&dispatch);

        if !schedule.turn(selection.train).grant() {
            drop(state);
            error!("{} already had an unconsumed turn", selection.train);
            schedule.abort();
            return Err(SimError::DoubleGrant(selection.train));
        }
    }
}
