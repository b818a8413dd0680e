use derive_more::{AsRef, Display};

use crate::{Exercise, Percentage, Reps, SetType};

/// The static program definition. It is loaded once and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub name: Name,
    pub weeks: Vec<Week>,
}

impl Routine {
    #[must_use]
    pub fn week(&self, week: u32) -> Option<&Week> {
        self.weeks.get(usize::try_from(week).ok()?)
    }

    #[must_use]
    pub fn num_weeks(&self) -> u32 {
        u32::try_from(self.weeks.len()).unwrap_or(u32::MAX)
    }

    /// Checks that every week has days to do.
    pub fn validate(&self) -> Result<(), RoutineError> {
        if self.weeks.is_empty() {
            return Err(RoutineError::NoWeeks);
        }
        if let Some(week) = self.weeks.iter().find(|w| w.days.is_empty()) {
            return Err(RoutineError::NoDays(week.name.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub name: Name,
    /// Optional weeks (e.g. a deload) may be skipped.
    pub optional: bool,
    pub days: Vec<Day>,
}

impl Week {
    #[must_use]
    pub fn day(&self, day: u32) -> Option<&Day> {
        self.days.get(usize::try_from(day).ok()?)
    }

    #[must_use]
    pub fn num_days(&self) -> u32 {
        u32::try_from(self.days.len()).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub name: Name,
    pub movements: Vec<Movement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    pub exercise: Exercise,
    pub set_type: SetType,
    pub sets: Vec<Set>,
}

/// Target of a single set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub rep_target: Reps,
    pub training_max_percentage: Percentage,
    /// As many reps as possible.
    pub to_failure: bool,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RoutineError {
    #[error("Routine must contain at least one week")]
    NoWeeks,
    #[error("Week \"{0}\" must contain at least one day")]
    NoDays(String),
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = name.chars().count();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}
