use std::fmt;

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

/// The four main lifts of the program.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Exercise {
    OverheadPress,
    Squat,
    BenchPress,
    Deadlift,
}

impl Exercise {
    pub fn iter() -> ExerciseIter {
        <Self as IntoEnumIterator>::iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Exercise::OverheadPress => "Overhead Press",
            Exercise::Squat => "Squat",
            Exercise::BenchPress => "Bench Press",
            Exercise::Deadlift => "Deadlift",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SetType {
    Warmup,
    Main,
    Assistance,
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SetType::Warmup => "warmup",
                SetType::Main => "main",
                SetType::Assistance => "assistance",
            }
        )
    }
}
