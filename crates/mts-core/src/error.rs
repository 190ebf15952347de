//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `MtsError` as one variant
//! where they need to surface a core validation failure.

use thiserror::Error;

use crate::TrainId;

/// Validation failures for core train data.
#[derive(Debug, Error)]
pub enum MtsError {
    #[error("invalid direction code {0:?}: expected one of E, e, W, w")]
    InvalidDirection(char),

    #[error("{what} time {got} for {train} is outside 1..=99")]
    DurationOutOfRange {
        train: TrainId,
        what:  &'static str,
        got:   i64,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `mts-core`.
pub type MtsResult<T> = Result<T, MtsError>;
