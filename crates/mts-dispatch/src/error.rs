use mts_core::TrainId;
use thiserror::Error;

/// Violations of the track's single-holder invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("cannot give the track to {requested}: {holder} is on it")]
    TrackOccupied { holder: TrainId, requested: TrainId },

    #[error("{train} released the track but does not hold it")]
    NotOnTrack { train: TrainId, holder: Option<TrainId> },
}

pub type DispatchResult<T> = Result<T, DispatchError>;
