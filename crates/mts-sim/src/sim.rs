//! The `Sim` struct and its run loop.

use std::thread;

use log::{error, info};
use mts_core::{SimClock, SimConfig, TrainSpec};
use mts_dispatch::{DispatchPolicy, FairnessPolicy};

use crate::agent::run_agent;
use crate::dispatcher::run_dispatcher;
use crate::schedule::Schedule;
use crate::{SimError, SimReport, SimResult, TrackObserver};

/// A fixed set of trains plus the policy that arbitrates between them.
///
/// `run` starts one dispatcher thread and one thread per train, waits for all
/// of them, and returns the dispatch record.  A `Sim` can be run more than
/// once; each run starts from an empty track.
///
/// Create via [`SimBuilder`][crate::SimBuilder], which checks that train `i`
/// carries `TrainId(i)`.
pub struct Sim<P: DispatchPolicy = FairnessPolicy> {
    pub(crate) config: SimConfig,
    /// Trains indexed by `TrainId`.
    pub(crate) trains: Vec<TrainSpec>,
    pub(crate) policy: P,
}

impl<P: DispatchPolicy> Sim<P> {
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn trains(&self) -> &[TrainSpec] {
        &self.trains
    }

    /// Run every train to completion.
    ///
    /// On a thread-spawn failure or a panic in any thread, the run is
    /// aborted: trains not yet on the track give up, every started thread is
    /// joined, and the root-cause error is returned.
    pub fn run<O: TrackObserver + ?Sized>(&self, observer: &O) -> SimResult<SimReport> {
        let schedule = Schedule::new(self.trains.len());
        let clock = SimClock::start();
        info!(
            "starting run: {} trains, time unit {:?}",
            self.trains.len(),
            self.config.time_unit
        );

        let outcome = thread::scope(|scope| {
            let schedule = &schedule;
            let policy = &self.policy;
            let config = &self.config;

            let dispatcher = thread::Builder::new()
                .name("dispatcher".into())
                .spawn_scoped(scope, move || run_dispatcher(schedule, policy, observer, clock))
                .map_err(|source| SimError::Spawn { what: "dispatcher".into(), source })?;

            let mut first_error: Option<SimError> = None;
            let mut agents = Vec::with_capacity(self.trains.len());

            for train in &self.trains {
                let spawned = thread::Builder::new()
                    .name(format!("train-{}", train.id.0))
                    .spawn_scoped(scope, move || {
                        run_agent(train, schedule, observer, clock, config)
                    });
                match spawned {
                    Ok(handle) => agents.push((train.id, handle)),
                    Err(source) => {
                        error!("could not start thread for {}: {source}", train.id);
                        schedule.abort();
                        first_error = Some(SimError::Spawn {
                            what: format!("train {}", train.id.0),
                            source,
                        });
                        break;
                    }
                }
            }

            for (id, handle) in agents {
                let result = handle.join().unwrap_or(Err(SimError::AgentPanicked(id)));
                keep_root_cause(&mut first_error, result);
            }
            let result = dispatcher.join().unwrap_or(Err(SimError::DispatcherPanicked));
            keep_root_cause(&mut first_error, result);

            first_error.map_or(Ok(()), Err)
        });

        let elapsed = clock.elapsed();
        observer.on_sim_end(elapsed);
        outcome?;

        let state = schedule.into_state();
        info!("run finished in {elapsed:?}: {} crossings", state.track.crossings());
        Ok(SimReport {
            dispatches: state.dispatches,
            trains: self.trains.len(),
            elapsed,
        })
    }
}

/// Remember the first real failure; an `Aborted` only counts if nothing
/// better turns up.
fn keep_root_cause(slot: &mut Option<SimError>, result: SimResult<()>) {
    let Err(e) = result else { return };
    match slot {
        None => *slot = Some(e),
        Some(existing) if existing.is_abort() && !e.is_abort() => *slot = Some(e),
        Some(_) => {}
    }
}
