use derive_more::{Deref, Display, Into};

use crate::{
    ComparableLifts, CreateError, Exercise, NextLift, ReadError, RecordLiftError, SetType,
    UpdateError, ValidationError, Weight,
};

pub trait LiftService {
    fn get_lift(&self, id: LiftID) -> Result<Lift, ReadError>;
    /// Stores a performed set and determines the set to do next.
    fn record_lift(&self, lift: NewLift) -> Result<(LiftID, NextLift), RecordLiftError>;
    /// Only the note and the reps of a lift can be changed.
    fn edit_lift(&self, id: LiftID, note: String, reps: Reps) -> Result<(), UpdateError>;

    fn validate_lift_weight(&self, weight: &str) -> Result<Weight, ValidationError> {
        Ok(Weight::try_from(weight)?)
    }

    fn validate_lift_reps(&self, reps: u32) -> Result<Reps, ValidationError> {
        Ok(Reps::new(reps)?)
    }
}

pub trait LiftRepository {
    fn create_lift(&self, lift: NewLift) -> Result<LiftID, CreateError>;
    fn read_lift(&self, id: LiftID) -> Result<Lift, ReadError>;
    fn modify_lift(&self, id: LiftID, note: String, reps: Reps) -> Result<(), UpdateError>;
    /// Most recent lifts first. The number of returned lifts may be bounded.
    fn read_recent_lifts(&self) -> Result<Vec<Lift>, ReadError>;
    fn read_comparable_lifts(
        &self,
        exercise: Exercise,
        weight: Weight,
    ) -> Result<ComparableLifts, ReadError>;
}

/// A performed set.
#[derive(Debug, Clone, PartialEq)]
pub struct Lift {
    pub id: LiftID,
    pub exercise: Exercise,
    pub set_type: SetType,
    pub weight: Weight,
    pub set_number: u32,
    pub reps: Reps,
    pub note: String,
    pub position: Position,
    pub to_failure: bool,
}

impl Lift {
    #[must_use]
    pub fn new(id: LiftID, lift: NewLift) -> Self {
        Self {
            id,
            exercise: lift.exercise,
            set_type: lift.set_type,
            weight: lift.weight,
            set_number: lift.set_number,
            reps: lift.reps,
            note: lift.note,
            position: lift.position,
            to_failure: lift.to_failure,
        }
    }

    #[must_use]
    pub fn one_rep_max(&self) -> Weight {
        self.weight.one_rep_max(self.reps)
    }

    #[must_use]
    pub fn equivalent_reps(&self, target: Weight) -> Option<f64> {
        self.weight.equivalent_reps(self.reps, target)
    }

    /// Key of the history ordering: program position first, then insertion order.
    #[must_use]
    pub fn chronology(&self) -> (Position, LiftID) {
        (self.position, self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLift {
    pub exercise: Exercise,
    pub set_type: SetType,
    pub weight: Weight,
    pub set_number: u32,
    pub reps: Reps,
    pub note: String,
    pub position: Position,
    pub to_failure: bool,
}

/// Identifier assigned on creation. Identifiers increase with every created lift.
#[derive(Deref, Debug, Display, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LiftID(u64);

impl From<u64> for LiftID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Location of a day in the program timeline.
///
/// The field order defines the ordering: iteration, then week, then day.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub iteration: u32,
    pub week: u32,
    pub day: u32,
}

impl Position {
    #[must_use]
    pub fn new(iteration: u32, week: u32, day: u32) -> Self {
        Self {
            iteration,
            week,
            day,
        }
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
}
