//! `mts-sim` — threaded runtime for the mts track scheduler.
//!
//! # Threads
//!
//! ```text
//! Sim::run
//!   ├─ dispatcher     wait for work → select → occupy → grant turn
//!   ├─ train-0        load → queue → wait turn → cross → release
//!   ├─ train-1        …
//!   └─ train-n
//! ```
//!
//! All threads share one [`Schedule`][schedule::Schedule]: a mutex over the
//! ready queues and track state plus a condvar the dispatcher sleeps on.
//! Each train also owns a one-slot [`TurnSignal`] the dispatcher fills when
//! it picks that train.
//!
//! # Crate layout
//!
//! | Module         | Contents                                           |
//! |----------------|----------------------------------------------------|
//! | [`builder`]    | `SimBuilder`                                       |
//! | [`sim`]        | `Sim::run`                                         |
//! | [`schedule`]   | `Schedule`, `ScheduleState`, `AbortOnPanic`        |
//! | [`turn`]       | `Turn`, `TurnSignal`                               |
//! | [`observer`]   | `TrackObserver`, `NoopObserver`                    |
//! | [`report`]     | `Dispatch`, `SimReport`                            |
//! | [`error`]      | `SimError`, `SimResult<T>`                         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mts_core::SimConfig;
//! use mts_sim::{NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::new(trains).config(SimConfig::default()).build()?;
//! let report = sim.run(&NoopObserver)?;
//! println!("{:?}", report.order());
//! ```

mod agent;
mod dispatcher;

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod schedule;
pub mod sim;
pub mod turn;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, TrackObserver};
pub use report::{Dispatch, SimReport};
pub use sim::Sim;
pub use turn::{Turn, TurnSignal};
