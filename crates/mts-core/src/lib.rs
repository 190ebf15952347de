//! `mts-core` — foundational types for the `mts` track scheduler.
//!
//! This crate is a dependency of every other `mts-*` crate.  It has no
//! `mts-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                               |
//! |-----------|--------------------------------------------------------|
//! | [`ids`]   | `TrainId`                                              |
//! | [`train`] | `Direction`, `Priority`, `TrainSpec`                   |
//! | [`time`]  | `SimClock`, `SimConfig`, `format_elapsed`, `duration_nanos` |
//! | [`error`] | `MtsError`, `MtsResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod time;
pub mod train;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{MtsError, MtsResult};
pub use ids::TrainId;
pub use time::{SimClock, SimConfig, duration_nanos, format_elapsed};
pub use train::{Direction, Priority, TrainSpec};
