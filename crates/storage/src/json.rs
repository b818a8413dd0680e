#![allow(clippy::missing_errors_doc)]

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stronk_domain::{self as domain, LiftService, TrainingMaxService};

// Routine document

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Routine {
    pub name: String,
    pub weeks: Vec<RoutineWeek>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RoutineWeek {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    pub days: Vec<RoutineDay>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RoutineDay {
    pub name: String,
    pub movements: Vec<RoutineMovement>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RoutineMovement {
    pub exercise: String,
    pub set_type: String,
    pub sets: Vec<RoutineSet>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RoutineSet {
    pub rep_target: u32,
    pub training_max_percentage: u32,
    #[serde(default)]
    pub to_failure: bool,
}

impl From<&domain::Routine> for Routine {
    fn from(value: &domain::Routine) -> Self {
        Self {
            name: value.name.to_string(),
            weeks: value
                .weeks
                .iter()
                .map(|week| RoutineWeek {
                    name: week.name.to_string(),
                    optional: week.optional,
                    days: week
                        .days
                        .iter()
                        .map(|day| RoutineDay {
                            name: day.name.to_string(),
                            movements: day
                                .movements
                                .iter()
                                .map(|movement| RoutineMovement {
                                    exercise: movement.exercise.as_ref().to_string(),
                                    set_type: movement.set_type.as_ref().to_string(),
                                    sets: movement.sets.iter().map(RoutineSet::from).collect(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl TryFrom<Routine> for domain::Routine {
    type Error = domain::ValidationError;

    fn try_from(value: Routine) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            weeks: value
                .weeks
                .into_iter()
                .map(domain::Week::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<RoutineWeek> for domain::Week {
    type Error = domain::ValidationError;

    fn try_from(value: RoutineWeek) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            optional: value.optional,
            days: value
                .days
                .into_iter()
                .map(domain::Day::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<RoutineDay> for domain::Day {
    type Error = domain::ValidationError;

    fn try_from(value: RoutineDay) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            movements: value
                .movements
                .into_iter()
                .map(domain::Movement::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<RoutineMovement> for domain::Movement {
    type Error = domain::ValidationError;

    fn try_from(value: RoutineMovement) -> Result<Self, Self::Error> {
        if value.sets.is_empty() {
            return Err(domain::ValidationError::Other(format!(
                "Movement {} must contain at least one set",
                value.exercise
            )));
        }
        Ok(Self {
            exercise: exercise(&value.exercise)?,
            set_type: set_type(&value.set_type)?,
            sets: value
                .sets
                .into_iter()
                .map(domain::Set::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<&domain::Set> for RoutineSet {
    fn from(value: &domain::Set) -> Self {
        Self {
            rep_target: value.rep_target.into(),
            training_max_percentage: u32::from(u8::from(value.training_max_percentage)),
            to_failure: value.to_failure,
        }
    }
}

impl TryFrom<RoutineSet> for domain::Set {
    type Error = domain::ValidationError;

    fn try_from(value: RoutineSet) -> Result<Self, Self::Error> {
        Ok(Self {
            rep_target: domain::Reps::new(value.rep_target)?,
            training_max_percentage: domain::Percentage::try_from(value.training_max_percentage)?,
            to_failure: value.to_failure,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Weight {
    pub unit: WeightUnit,
    pub value: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightUnit {
    DeciPounds,
    CentiPounds,
}

impl From<domain::Weight> for Weight {
    fn from(value: domain::Weight) -> Self {
        Self {
            unit: match value.unit() {
                domain::WeightUnit::DeciPounds => WeightUnit::DeciPounds,
                domain::WeightUnit::CentiPounds => WeightUnit::CentiPounds,
            },
            value: value.value(),
        }
    }
}

impl From<Weight> for domain::Weight {
    fn from(value: Weight) -> Self {
        domain::Weight::new(
            value.value,
            match value.unit {
                WeightUnit::DeciPounds => domain::WeightUnit::DeciPounds,
                WeightUnit::CentiPounds => domain::WeightUnit::CentiPounds,
            },
        )
    }
}

// Requests

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SetTrainingMaxesRequest {
    pub overhead_press: String,
    pub squat: String,
    pub bench_press: String,
    pub deadlift: String,
    /// Empty to keep the current smallest denomination.
    #[serde(default)]
    pub smallest_denom: String,
}

impl SetTrainingMaxesRequest {
    pub fn validate(
        &self,
        service: &impl TrainingMaxService,
    ) -> Result<([domain::Weight; 4], Option<domain::Weight>), domain::ValidationError> {
        Ok((
            [
                service.validate_training_max(&self.overhead_press)?,
                service.validate_training_max(&self.squat)?,
                service.validate_training_max(&self.bench_press)?,
                service.validate_training_max(&self.deadlift)?,
            ],
            service.validate_smallest_denom(&self.smallest_denom)?,
        ))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RecordLiftRequest {
    pub exercise: String,
    pub set_type: String,
    pub weight: String,
    pub set: u32,
    pub reps: u32,
    #[serde(default)]
    pub note: String,
    pub day: u32,
    pub week: u32,
    pub iteration: u32,
    #[serde(default)]
    pub to_failure: bool,
}

impl RecordLiftRequest {
    pub fn validate(
        &self,
        service: &impl LiftService,
    ) -> Result<domain::NewLift, domain::ValidationError> {
        Ok(domain::NewLift {
            exercise: exercise(&self.exercise)?,
            set_type: set_type(&self.set_type)?,
            weight: service.validate_lift_weight(&self.weight)?,
            set_number: self.set,
            reps: service.validate_lift_reps(self.reps)?,
            note: self.note.trim().to_string(),
            position: domain::Position::new(self.iteration, self.week, self.day),
            to_failure: self.to_failure,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct EditLiftRequest {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(default)]
    pub note: String,
    pub reps: u32,
}

impl EditLiftRequest {
    pub fn validate(
        &self,
        service: &impl LiftService,
    ) -> Result<(domain::LiftID, String, domain::Reps), domain::ValidationError> {
        Ok((
            self.id.into(),
            self.note.trim().to_string(),
            service.validate_lift_reps(self.reps)?,
        ))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SkipOptionalWeekRequest {
    pub week: u32,
    pub iteration: u32,
    #[serde(default)]
    pub note: String,
}

// Responses

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingMax {
    pub exercise: String,
    pub max: Weight,
}

impl From<&domain::TrainingMax> for TrainingMax {
    fn from(value: &domain::TrainingMax) -> Self {
        Self {
            exercise: value.exercise.as_ref().to_string(),
            max: value.max.into(),
        }
    }
}

impl TryFrom<TrainingMax> for domain::TrainingMax {
    type Error = domain::ValidationError;

    fn try_from(value: TrainingMax) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise: exercise(&value.exercise)?,
            max: value.max.into(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingMaxesResponse {
    pub training_maxes: Vec<TrainingMax>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smallest_denom: Option<Weight>,
}

impl From<&(Vec<domain::TrainingMax>, Option<domain::Weight>)> for TrainingMaxesResponse {
    fn from(
        (training_maxes, smallest_denom): &(Vec<domain::TrainingMax>, Option<domain::Weight>),
    ) -> Self {
        Self {
            training_maxes: training_maxes.iter().map(TrainingMax::from).collect(),
            smallest_denom: smallest_denom.map(Weight::from),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Lift {
    #[serde(rename = "ID")]
    pub id: u64,
    pub exercise: String,
    pub set_type: String,
    pub weight: Weight,
    pub set_number: u32,
    pub reps: u32,
    pub note: String,
    pub day_number: u32,
    pub week_number: u32,
    pub iteration_number: u32,
    pub to_failure: bool,
}

impl From<&domain::Lift> for Lift {
    fn from(value: &domain::Lift) -> Self {
        Self {
            id: *value.id,
            exercise: value.exercise.as_ref().to_string(),
            set_type: value.set_type.as_ref().to_string(),
            weight: value.weight.into(),
            set_number: value.set_number,
            reps: value.reps.into(),
            note: value.note.clone(),
            day_number: value.position.day,
            week_number: value.position.week,
            iteration_number: value.position.iteration,
            to_failure: value.to_failure,
        }
    }
}

impl TryFrom<Lift> for domain::Lift {
    type Error = domain::ValidationError;

    fn try_from(value: Lift) -> Result<Self, Self::Error> {
        Ok(domain::Lift::new(
            value.id.into(),
            domain::NewLift {
                exercise: exercise(&value.exercise)?,
                set_type: set_type(&value.set_type)?,
                weight: value.weight.into(),
                set_number: value.set_number,
                reps: domain::Reps::new(value.reps)?,
                note: value.note,
                position: domain::Position::new(
                    value.iteration_number,
                    value.week_number,
                    value.day_number,
                ),
                to_failure: value.to_failure,
            },
        ))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ComparableLifts {
    pub closest_weight: Option<Lift>,
    pub personal_record: Option<Lift>,
    #[serde(rename = "PREquivalentReps")]
    pub pr_equivalent_reps: f64,
}

impl From<&domain::ComparableLifts> for ComparableLifts {
    fn from(value: &domain::ComparableLifts) -> Self {
        Self {
            closest_weight: value.closest_weight.as_ref().map(Lift::from),
            personal_record: value.personal_record.as_ref().map(Lift::from),
            pr_equivalent_reps: value.pr_equivalent_reps,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Set {
    pub rep_target: u32,
    pub training_max_percentage: u32,
    pub to_failure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_target: Option<Weight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_comparables: Option<ComparableLifts>,
    #[serde(rename = "AssociatedLiftID", skip_serializing_if = "Option::is_none")]
    pub associated_lift_id: Option<u64>,
}

impl From<&domain::PlannedSet> for Set {
    fn from(value: &domain::PlannedSet) -> Self {
        let template = RoutineSet::from(&value.set);
        Self {
            rep_target: template.rep_target,
            training_max_percentage: template.training_max_percentage,
            to_failure: template.to_failure,
            weight_target: value.weight_target.map(Weight::from),
            failure_comparables: value.failure_comparables.as_ref().map(ComparableLifts::from),
            associated_lift_id: value.associated_lift_id.map(|id| *id),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Movement {
    pub exercise: String,
    pub set_type: String,
    pub sets: Vec<Set>,
}

impl From<&domain::PlannedMovement> for Movement {
    fn from(value: &domain::PlannedMovement) -> Self {
        Self {
            exercise: value.exercise.as_ref().to_string(),
            set_type: value.set_type.as_ref().to_string(),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct NextLiftResponse {
    pub day_number: u32,
    pub week_number: u32,
    pub iteration_number: u32,
    pub day_name: String,
    pub week_name: String,
    pub workout: Vec<Movement>,
    pub next_movement_index: usize,
    pub next_set_index: usize,
    pub optional_week: bool,
}

impl From<&domain::NextLift> for NextLiftResponse {
    fn from(value: &domain::NextLift) -> Self {
        Self {
            day_number: value.position.day,
            week_number: value.position.week,
            iteration_number: value.position.iteration,
            day_name: value.day_name.to_string(),
            week_name: value.week_name.to_string(),
            workout: value.workout.iter().map(Movement::from).collect(),
            next_movement_index: value.next_movement_index,
            next_set_index: value.next_set_index,
            optional_week: value.optional_week,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RecordLiftResponse {
    #[serde(rename = "LiftID")]
    pub lift_id: u64,
    pub next_lift: NextLiftResponse,
}

impl From<&(domain::LiftID, domain::NextLift)> for RecordLiftResponse {
    fn from((lift_id, next_lift): &(domain::LiftID, domain::NextLift)) -> Self {
        Self {
            lift_id: **lift_id,
            next_lift: NextLiftResponse::from(next_lift),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SkippedWeek {
    pub week: u32,
    pub iteration: u32,
    pub note: String,
}

impl From<&domain::SkippedWeek> for SkippedWeek {
    fn from(value: &domain::SkippedWeek) -> Self {
        Self {
            week: value.week,
            iteration: value.iteration,
            note: value.note.clone(),
        }
    }
}

impl From<SkippedWeek> for domain::SkippedWeek {
    fn from(value: SkippedWeek) -> Self {
        Self {
            week: value.week,
            iteration: value.iteration,
            note: value.note,
        }
    }
}

fn exercise(value: &str) -> Result<domain::Exercise, domain::ValidationError> {
    domain::Exercise::from_str(value)
        .map_err(|_| domain::ValidationError::Other(format!("Unknown exercise {value:?}")))
}

fn set_type(value: &str) -> Result<domain::SetType, domain::ValidationError> {
    domain::SetType::from_str(value)
        .map_err(|_| domain::ValidationError::Other(format!("Unknown set type {value:?}")))
}
