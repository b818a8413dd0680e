#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod comparable;
mod error;
mod exercise;
mod lift;
pub mod progression;
mod routine;
mod service;
mod skipped_week;
mod training_max;
mod weight;

pub use comparable::ComparableLifts;
pub use error::{
    CreateError, NextLiftError, ReadError, RecordLiftError, SkipWeekError, StorageError,
    UpdateError, ValidationError,
};
pub use exercise::{Exercise, ExerciseIter, SetType};
pub use lift::{
    Lift, LiftID, LiftRepository, LiftService, NewLift, Position, Reps, RepsError,
};
pub use progression::{
    NextLift, PlannedMovement, PlannedSet, ProgressionError, ProgressionService,
};
pub use routine::{Day, Movement, Name, NameError, Routine, RoutineError, Set, Week};
pub use service::Service;
pub use skipped_week::{SkippedWeek, SkippedWeekRepository};
pub use training_max::{
    SmallestDenomRepository, TrainingMax, TrainingMaxRepository, TrainingMaxService,
    training_max_of, training_maxes,
};
pub use weight::{
    EPLEY_FACTOR, MAX_POUNDS, Percentage, PercentageError, Weight, WeightError, WeightUnit,
};
