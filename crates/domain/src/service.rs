use log::{debug, error, info};

use crate::{
    CreateError, Lift, LiftID, LiftRepository, LiftService, NewLift, NextLift, NextLiftError,
    ProgressionService, ReadError, RecordLiftError, Reps, Routine, SkipWeekError,
    SkippedWeekRepository, SmallestDenomRepository, TrainingMax, TrainingMaxRepository,
    TrainingMaxService, UpdateError, Weight, progression,
};

pub struct Service<R> {
    repository: R,
    routine: Routine,
}

impl<R> Service<R> {
    pub fn new(repository: R, routine: Routine) -> Self {
        Self {
            repository,
            routine,
        }
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
    ($func: expr, $expected: pat, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $expected => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R> Service<R>
where
    R: LiftRepository + TrainingMaxRepository + SmallestDenomRepository + SkippedWeekRepository,
{
    fn next_lift(&self) -> Result<NextLift, NextLiftError> {
        let smallest_denom = self.repository.read_smallest_denom()?;
        let lifts = self.repository.read_recent_lifts()?;
        let skipped_weeks = self.repository.read_skipped_weeks()?;
        let training_maxes = self.repository.read_training_maxes()?;

        let cursor = progression::resolve(&self.routine, &lifts, &skipped_weeks)?;
        cursor.plan(
            &self.routine,
            &training_maxes,
            smallest_denom,
            |exercise, weight| self.repository.read_comparable_lifts(exercise, weight),
        )
    }

    fn record(&self, lift: NewLift) -> Result<(LiftID, NextLift), RecordLiftError> {
        let id = self.repository.create_lift(lift)?;
        debug!("recorded lift {id}");
        Ok((id, self.next_lift()?))
    }

    fn skip_week(
        &self,
        week: u32,
        iteration: u32,
        note: String,
    ) -> Result<NextLift, SkipWeekError> {
        let optional = self
            .routine
            .week(week)
            .ok_or(SkipWeekError::WeekOutOfRange(week))?
            .optional;
        if !optional {
            return Err(SkipWeekError::NotOptional(week));
        }
        self.repository
            .create_skipped_week(note, week, iteration)?;
        info!("skipped week {week} of iteration {iteration}");
        Ok(self.next_lift()?)
    }
}

impl<R> ProgressionService for Service<R>
where
    R: LiftRepository + TrainingMaxRepository + SmallestDenomRepository + SkippedWeekRepository,
{
    fn get_next_lift(&self) -> Result<NextLift, NextLiftError> {
        log_on_error!(
            self.next_lift(),
            NextLiftError::Read(ReadError::NoSmallestDenom),
            "get",
            "next lift"
        )
    }

    fn skip_optional_week(
        &self,
        week: u32,
        iteration: u32,
        note: String,
    ) -> Result<NextLift, SkipWeekError> {
        log_on_error!(
            self.skip_week(week, iteration, note),
            SkipWeekError::NotOptional(_) | SkipWeekError::WeekOutOfRange(_),
            "skip",
            "week"
        )
    }
}

impl<R> LiftService for Service<R>
where
    R: LiftRepository + TrainingMaxRepository + SmallestDenomRepository + SkippedWeekRepository,
{
    fn get_lift(&self, id: LiftID) -> Result<Lift, ReadError> {
        log_on_error!(
            self.repository.read_lift(id),
            ReadError::LiftNotFound(_),
            "get",
            "lift"
        )
    }

    fn record_lift(&self, lift: NewLift) -> Result<(LiftID, NextLift), RecordLiftError> {
        log_on_error!(
            self.record(lift),
            RecordLiftError::NextLift(NextLiftError::Read(ReadError::NoSmallestDenom)),
            "record",
            "lift"
        )
    }

    fn edit_lift(&self, id: LiftID, note: String, reps: Reps) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.modify_lift(id, note, reps),
            UpdateError::NotFound(_),
            "edit",
            "lift"
        )
    }
}

impl<R> TrainingMaxService for Service<R>
where
    R: TrainingMaxRepository + SmallestDenomRepository,
{
    fn get_training_maxes(&self) -> Result<(Vec<TrainingMax>, Option<Weight>), ReadError> {
        let training_maxes = log_on_error!(
            self.repository.read_training_maxes(),
            "get",
            "training maxes"
        )?;
        let smallest_denom = match log_on_error!(
            self.repository.read_smallest_denom(),
            ReadError::NoSmallestDenom,
            "get",
            "smallest denomination"
        ) {
            Ok(denom) => Some(denom),
            Err(ReadError::NoSmallestDenom) => None,
            Err(err) => return Err(err),
        };
        Ok((training_maxes, smallest_denom))
    }

    fn set_training_maxes(
        &self,
        training_maxes: [Weight; 4],
        smallest_denom: Option<Weight>,
    ) -> Result<(), CreateError> {
        log_on_error!(
            self.repository.create_training_maxes(training_maxes),
            "set",
            "training maxes"
        )?;
        if let Some(denom) = smallest_denom {
            log_on_error!(
                self.repository.write_smallest_denom(denom),
                "set",
                "smallest denomination"
            )?;
        }
        Ok(())
    }
}
