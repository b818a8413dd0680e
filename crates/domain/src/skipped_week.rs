use crate::{CreateError, ReadError};

pub trait SkippedWeekRepository {
    /// Most recent skips first. The number of returned skips may be bounded.
    fn read_skipped_weeks(&self) -> Result<Vec<SkippedWeek>, ReadError>;
    fn create_skipped_week(&self, note: String, week: u32, iteration: u32)
    -> Result<(), CreateError>;
}

/// An optional week the lifter decided not to do in a specific iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedWeek {
    pub week: u32,
    pub iteration: u32,
    pub note: String,
}

impl SkippedWeek {
    #[must_use]
    pub fn matches(&self, week: u32, iteration: u32) -> bool {
        self.week == week && self.iteration == iteration
    }
}
