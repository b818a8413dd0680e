use crate::{CreateError, Exercise, ReadError, ValidationError, Weight};

pub trait TrainingMaxService {
    /// Current training maxes and the smallest denomination, if configured.
    fn get_training_maxes(&self) -> Result<(Vec<TrainingMax>, Option<Weight>), ReadError>;
    fn set_training_maxes(
        &self,
        training_maxes: [Weight; 4],
        smallest_denom: Option<Weight>,
    ) -> Result<(), CreateError>;

    fn validate_training_max(&self, max: &str) -> Result<Weight, ValidationError> {
        let max = Weight::try_from(max)?;
        if max.is_zero() {
            return Err(ValidationError::Other(
                "Training max must be greater than 0".to_string(),
            ));
        }
        Ok(max)
    }

    /// An empty value keeps the current smallest denomination.
    fn validate_smallest_denom(&self, denom: &str) -> Result<Option<Weight>, ValidationError> {
        if denom.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Weight::parse_increment(denom)?))
    }
}

pub trait TrainingMaxRepository {
    /// Only the most recently created max of each exercise is current.
    fn read_training_maxes(&self) -> Result<Vec<TrainingMax>, ReadError>;
    /// Stores the maxes of overhead press, squat, bench press and deadlift in one transaction.
    fn create_training_maxes(&self, training_maxes: [Weight; 4]) -> Result<(), CreateError>;
}

pub trait SmallestDenomRepository {
    /// Fails with [`ReadError::NoSmallestDenom`] if no smallest denomination was ever written.
    fn read_smallest_denom(&self) -> Result<Weight, ReadError>;
    fn write_smallest_denom(&self, denom: Weight) -> Result<(), CreateError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingMax {
    pub exercise: Exercise,
    pub max: Weight,
}

/// Pairs the maxes of a [`TrainingMaxRepository::create_training_maxes`] call with their
/// exercises.
#[must_use]
pub fn training_maxes(maxes: [Weight; 4]) -> Vec<TrainingMax> {
    Exercise::iter()
        .zip(maxes)
        .map(|(exercise, max)| TrainingMax { exercise, max })
        .collect()
}

/// The current training max of `exercise`.
#[must_use]
pub fn training_max_of(training_maxes: &[TrainingMax], exercise: Exercise) -> Option<Weight> {
    training_maxes
        .iter()
        .find(|tm| tm.exercise == exercise)
        .map(|tm| tm.max)
}
