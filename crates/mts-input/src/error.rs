use std::path::PathBuf;

use mts_core::MtsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open {}", path.display())]
    Open {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: {cause}")]
    Invalid { line: usize, cause: MtsError },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InputResult<T> = Result<T, InputError>;
