//! Fluent builder for constructing a [`Sim`].

use mts_core::{SimConfig, TrainSpec};
use mts_dispatch::{DispatchPolicy, FairnessPolicy};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                         |
/// |---------------|---------------------------------|
/// | `.config(c)`  | `SimConfig::default()` (100 ms) |
/// | `.policy(p)`  | `FairnessPolicy`                |
///
/// # Example
///
/// ```rust,ignore
/// let trains = load_trains_file(path)?;
/// let sim = SimBuilder::new(trains)
///     .config(SimConfig::with_unit_ms(10)?)
///     .build()?;
/// let report = sim.run(&NoopObserver)?;
/// ```
pub struct SimBuilder<P: DispatchPolicy = FairnessPolicy> {
    config: SimConfig,
    trains: Vec<TrainSpec>,
    policy: P,
}

impl SimBuilder {
    /// A builder for `trains` with the default config and policy.
    pub fn new(trains: Vec<TrainSpec>) -> Self {
        Self {
            config: SimConfig::default(),
            trains,
            policy: FairnessPolicy,
        }
    }
}

impl<P: DispatchPolicy> SimBuilder<P> {
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the dispatch policy.
    pub fn policy<Q: DispatchPolicy>(self, policy: Q) -> SimBuilder<Q> {
        SimBuilder {
            config: self.config,
            trains: self.trains,
            policy,
        }
    }

    /// Check that train `i` carries `TrainId(i)` and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        if self.config.time_unit.is_zero() {
            return Err(SimError::Config("time unit must be non-zero".into()));
        }
        if let Some((i, t)) = self
            .trains
            .iter()
            .enumerate()
            .find(|(i, t)| t.id.index() != *i)
        {
            return Err(SimError::Config(format!(
                "train at position {i} has id {}; ids must be 0..{}",
                t.id,
                self.trains.len()
            )));
        }

        Ok(Sim {
            config: self.config,
            trains: self.trains,
            policy: self.policy,
        })
    }
}
