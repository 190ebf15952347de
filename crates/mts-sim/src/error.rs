use mts_core::TrainId;
use mts_dispatch::DispatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("failed to start {what} thread")]
    Spawn {
        what:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("track invariant violated: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("{0} was queued twice")]
    DuplicateReady(TrainId),

    #[error("{0} was granted the track twice")]
    DoubleGrant(TrainId),

    #[error("dispatch policy selected nothing with {waiting} trains waiting")]
    PolicyDeclined { waiting: usize },

    #[error("{0} thread panicked")]
    AgentPanicked(TrainId),

    #[error("dispatcher thread panicked")]
    DispatcherPanicked,

    #[error("run aborted")]
    Aborted,
}

impl SimError {
    /// `true` for the secondary error every thread reports once a run has
    /// been aborted by some other failure.
    pub fn is_abort(&self) -> bool {
        matches!(self, SimError::Aborted)
    }
}

pub type SimResult<T> = Result<T, SimError>;
