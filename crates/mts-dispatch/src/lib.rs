//! `mts-dispatch` — the arbitration core, free of threads.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`ready_queue`] | `ReadyEntry`, `ReadyQueue`, `ReadyQueues`              |
//! | [`track`]       | `TrackState` (occupancy + fairness counters)           |
//! | [`policy`]      | `DispatchPolicy` trait, `FairnessPolicy`, `Selection`  |
//! | [`error`]       | `DispatchError`, `DispatchResult<T>`                   |
//!
//! Everything here is plain data mutated through `&mut`; `mts-sim` owns the
//! lock that serialises access from the agent and dispatcher threads.
//!
//! # Selection rules (summary)
//!
//! ```text
//! 1. no crossing yet and WEST has a ready train  → head of WEST (high, then low)
//! 2. consecutive same-direction crossings >= 2
//!    and the opposite direction has a ready train → head of opposite (high, then low)
//! 3. earliest head of the two HIGH queues, else of the two LOW queues
//!    (equal ready times → lower TrainId)
//! ```

pub mod error;
pub mod policy;
pub mod ready_queue;
pub mod track;

#[cfg(test)]
mod tests;

pub use error::{DispatchError, DispatchResult};
pub use policy::{DispatchPolicy, DispatchRule, FairnessPolicy, Selection};
pub use ready_queue::{ReadyEntry, ReadyQueue, ReadyQueues};
pub use track::{STREAK_LIMIT, TrackState};
