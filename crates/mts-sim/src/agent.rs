//! The per-train thread body.
//!
//! ```text
//! LOADING → READY → WAITING_TURN → CROSSING → FINISHED
//! ```

use std::thread;

use log::{error, trace};
use mts_core::{SimClock, SimConfig, TrainSpec, duration_nanos};

use crate::schedule::{AbortOnPanic, Schedule};
use crate::turn::Turn;
use crate::{SimError, SimResult, TrackObserver};

/// Run one train from loading to leaving the track.
///
/// Returns [`SimError::Aborted`] if the run was aborted before this train
/// got the track.
pub(crate) fn run_agent<O: TrackObserver + ?Sized>(
    train:    &TrainSpec,
    schedule: &Schedule,
    observer: &O,
    clock:    SimClock,
    config:   &SimConfig,
) -> SimResult<()> {
    let _guard = AbortOnPanic::new(schedule);

    // ── LOADING ───────────────────────────────────────────────────────────
    trace!("{} loading for {} units", train.id, train.load_units);
    thread::sleep(config.span(train.load_units));

    // ── READY ─────────────────────────────────────────────────────────────
    let ready_at = clock.elapsed();
    observer.on_ready(train, ready_at);
    {
        let mut state = schedule.lock();
        if state.aborted {
            return Err(SimError::Aborted);
        }
        let queued = state.queues.push(
            train.direction,
            train.priority,
            train.id,
            duration_nanos(ready_at),
        );
        if !queued {
            drop(state);
            error!("{} is already queued", train.id);
            schedule.abort();
            return Err(SimError::DuplicateReady(train.id));
        }
        schedule.notify_dispatcher();
    }

    // ── WAITING_TURN ──────────────────────────────────────────────────────
    if schedule.turn(train.id).wait() == Turn::Revoked {
        trace!("{} turn revoked", train.id);
        return Err(SimError::Aborted);
    }

    // ── CROSSING ──────────────────────────────────────────────────────────
    observer.on_enter(train, clock.elapsed());
    thread::sleep(config.span(train.cross_units));
    observer.on_exit(train, clock.elapsed());

    // ── FINISHED ──────────────────────────────────────────────────────────
    let mut state = schedule.lock();
    let released = state.track.release(train.id, train.direction);
    state.finished += 1;
    schedule.notify_all();
    drop(state);

    if let Err(e) = released {
        error!("{e}");
        schedule.abort();
        return Err(e.into());
    }
    trace!("{} finished", train.id);
    Ok(())
}
