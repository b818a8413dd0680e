use std::cmp::Reverse;

use crate::{
    ComparableLifts, Day, Exercise, Lift, LiftID, Name, NextLiftError, Position, ReadError,
    Routine, RoutineError, Set, SetType, SkipWeekError, SkippedWeek, TrainingMax, Weight, Week,
    training_max_of,
};

pub trait ProgressionService {
    fn get_next_lift(&self) -> Result<NextLift, NextLiftError>;
    /// Skips an optional week of an iteration and returns the next lift afterwards.
    fn skip_optional_week(
        &self,
        week: u32,
        iteration: u32,
        note: String,
    ) -> Result<NextLift, SkipWeekError>;
}

/// The set the lifter should do next, together with the whole workout of that day.
#[derive(Debug, Clone, PartialEq)]
pub struct NextLift {
    pub position: Position,
    pub day_name: Name,
    pub week_name: Name,
    pub workout: Vec<PlannedMovement>,
    pub next_movement_index: usize,
    pub next_set_index: usize,
    /// The lifter is about to start an optional week and may skip it.
    pub optional_week: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedMovement {
    pub exercise: Exercise,
    pub set_type: SetType,
    pub sets: Vec<PlannedSet>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSet {
    pub set: Set,
    /// Missing if no training max is known for the exercise.
    pub weight_target: Option<Weight>,
    pub failure_comparables: Option<ComparableLifts>,
    /// The lift that was recorded for this set today.
    pub associated_lift_id: Option<LiftID>,
}

/// Location of the next set in the routine.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Cursor {
    pub position: Position,
    pub movement: usize,
    pub set: usize,
    performed: Vec<((usize, usize), LiftID)>,
}

/// Determines the next set from the lift history.
///
/// The most recent lift defines the current day. The lifts of that day are matched greedily
/// against the movements of the day: a lift that does not fit the expected exercise and set
/// type moves the matching on to the next movement. Lifts that could not be matched at all
/// mark the day as done. Skipped weeks are jumped over.
pub fn resolve(
    routine: &Routine,
    lifts: &[Lift],
    skipped_weeks: &[SkippedWeek],
) -> Result<Cursor, ProgressionError> {
    routine.validate()?;

    let mut history = lifts.iter().collect::<Vec<_>>();
    history.sort_by_key(|lift| Reverse(lift.chronology()));

    let mut cursor = match history.first() {
        None => Cursor::default(),
        Some(latest) => {
            let position = latest.position;
            let (_, day) = lookup(routine, position)?;
            let today = history
                .iter()
                .rev()
                .filter(|lift| lift.position == position)
                .copied();
            replay(routine, position, day, today)
        }
    };

    while skipped_weeks
        .iter()
        .any(|skipped| skipped.matches(cursor.position.week, cursor.position.iteration))
    {
        cursor.next_week(routine);
    }

    Ok(cursor)
}

fn replay<'a>(
    routine: &Routine,
    position: Position,
    day: &Day,
    today: impl Iterator<Item = &'a Lift>,
) -> Cursor {
    let mut today = today.peekable();
    let mut performed = vec![];

    'movements: for (m, movement) in day.movements.iter().enumerate() {
        for s in 0..movement.sets.len() {
            let Some(lift) = today.peek() else {
                break 'movements;
            };
            if lift.exercise != movement.exercise || lift.set_type != movement.set_type {
                continue 'movements;
            }
            performed.push(((m, s), lift.id));
            today.next();
        }
    }

    let last = performed.last().map(|(index, _)| *index);
    let mut cursor = Cursor {
        position,
        movement: 0,
        set: 0,
        performed,
    };

    match last.and_then(|last| following_set(day, last)) {
        Some((movement, set)) if today.peek().is_none() => {
            cursor.movement = movement;
            cursor.set = set;
        }
        _ => cursor.next_day(routine),
    }

    cursor
}

fn following_set(day: &Day, (movement, set): (usize, usize)) -> Option<(usize, usize)> {
    if day
        .movements
        .get(movement)
        .is_some_and(|m| set + 1 < m.sets.len())
    {
        Some((movement, set + 1))
    } else if movement + 1 < day.movements.len() {
        Some((movement + 1, 0))
    } else {
        None
    }
}

fn lookup(routine: &Routine, position: Position) -> Result<(&Week, &Day), ProgressionError> {
    let week = routine
        .week(position.week)
        .ok_or(ProgressionError::WeekOutOfRange(position.week))?;
    let day = week.day(position.day).ok_or(ProgressionError::DayOutOfRange {
        week: position.week,
        day: position.day,
    })?;
    Ok((week, day))
}

impl Cursor {
    fn next_day(&mut self, routine: &Routine) {
        let days = routine.week(self.position.week).map_or(0, Week::num_days);
        if self.position.day + 1 < days {
            self.position.day += 1;
            self.reset();
        } else {
            self.next_week(routine);
        }
    }

    fn next_week(&mut self, routine: &Routine) {
        if self.position.week + 1 < routine.num_weeks() {
            self.position.week += 1;
        } else {
            self.position.week = 0;
            self.position.iteration += 1;
        }
        self.position.day = 0;
        self.reset();
    }

    fn reset(&mut self) {
        self.movement = 0;
        self.set = 0;
        self.performed.clear();
    }

    fn performed(&self, movement: usize, set: usize) -> Option<LiftID> {
        self.performed
            .iter()
            .find(|(index, _)| *index == (movement, set))
            .map(|(_, id)| *id)
    }

    /// Builds the workout of the resolved day.
    ///
    /// Targets are the training max percentages rounded to multiples of `smallest_denom`.
    /// `comparables` is only queried for to-failure sets with a target.
    pub fn plan<C>(
        &self,
        routine: &Routine,
        training_maxes: &[TrainingMax],
        smallest_denom: Weight,
        mut comparables: C,
    ) -> Result<NextLift, NextLiftError>
    where
        C: FnMut(Exercise, Weight) -> Result<ComparableLifts, ReadError>,
    {
        let (week, day) = lookup(routine, self.position)?;

        let mut workout = Vec::with_capacity(day.movements.len());
        for (m, movement) in day.movements.iter().enumerate() {
            let training_max = training_max_of(training_maxes, movement.exercise);
            let mut sets = Vec::with_capacity(movement.sets.len());
            for (s, set) in movement.sets.iter().enumerate() {
                let weight_target = training_max.map(|training_max| {
                    let (training_max, increment) = training_max.align(smallest_denom);
                    training_max.round_to_increment(set.training_max_percentage, increment)
                });
                let failure_comparables = match weight_target {
                    Some(target) if set.to_failure => Some(comparables(movement.exercise, target)?),
                    _ => None,
                };
                sets.push(PlannedSet {
                    set: *set,
                    weight_target,
                    failure_comparables,
                    associated_lift_id: self.performed(m, s),
                });
            }
            workout.push(PlannedMovement {
                exercise: movement.exercise,
                set_type: movement.set_type,
                sets,
            });
        }

        Ok(NextLift {
            position: self.position,
            day_name: day.name.clone(),
            week_name: week.name.clone(),
            workout,
            next_movement_index: self.movement,
            next_set_index: self.set,
            optional_week: self.position.day == 0
                && self.movement == 0
                && self.set == 0
                && week.optional,
        })
    }
}

/// The lift history does not fit the routine.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProgressionError {
    #[error("routine has no weeks")]
    EmptyRoutine,
    #[error("week \"{0}\" has no days")]
    NoDays(String),
    #[error("week {0} is not part of the routine")]
    WeekOutOfRange(u32),
    #[error("day {day} is not part of week {week}")]
    DayOutOfRange { week: u32, day: u32 },
}

impl From<RoutineError> for ProgressionError {
    fn from(value: RoutineError) -> Self {
        match value {
            RoutineError::NoWeeks => ProgressionError::EmptyRoutine,
            RoutineError::NoDays(week) => ProgressionError::NoDays(week),
        }
    }
}
