use crate::{LiftID, NameError, PercentageError, ProgressionError, RepsError, WeightError};

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("lift {0} not found")]
    LiftNotFound(LiftID),
    #[error("no smallest denomination configured")]
    NoSmallestDenom,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("lift {0} not found")]
    NotFound(LiftID),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<CreateError> for UpdateError {
    fn from(value: CreateError) -> Self {
        match value {
            CreateError::Storage(storage) => UpdateError::Storage(storage),
            CreateError::Other(other) => UpdateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage lock poisoned")]
    Lock,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum NextLiftError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Progression(#[from] ProgressionError),
}

#[derive(thiserror::Error, Debug)]
pub enum RecordLiftError {
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    NextLift(#[from] NextLiftError),
}

#[derive(thiserror::Error, Debug)]
pub enum SkipWeekError {
    #[error("week {0} is not optional")]
    NotOptional(u32),
    #[error("week {0} is not part of the routine")]
    WeekOutOfRange(u32),
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    NextLift(#[from] NextLiftError),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error(transparent)]
    Weight(#[from] WeightError),
    #[error(transparent)]
    Reps(#[from] RepsError),
    #[error(transparent)]
    Percentage(#[from] PercentageError),
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("{0}")]
    Other(String),
}
