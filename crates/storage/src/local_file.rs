#![allow(clippy::missing_errors_doc)]

use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use stronk_domain as domain;

use crate::json;

const RECENT_LIFTS_LIMIT: usize = 100;
const SKIPPED_WEEKS_LIMIT: usize = 100;
const COMPARABLE_LIFTS_LIMIT: usize = 250;

/// Store keeping all data in memory and, if opened with a path, in a JSON file.
///
/// The file is replaced atomically after every successful write.
pub struct LocalFile {
    path: Option<PathBuf>,
    state: Mutex<State>,
}

#[derive(Debug, Default, Clone)]
struct State {
    last_lift_id: u64,
    lifts: Vec<domain::Lift>,
    training_maxes: Vec<domain::TrainingMax>,
    smallest_denoms: Vec<domain::Weight>,
    skipped_weeks: Vec<domain::SkippedWeek>,
}

impl LocalFile {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(State::default()),
        }
    }

    /// Loads the file at `path`. A missing file is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, domain::StorageError> {
        let path = path.into();
        let state = if path.exists() {
            let content = fs::read_to_string(&path).map_err(storage_error)?;
            let snapshot: Snapshot = serde_json::from_str(&content).map_err(storage_error)?;
            let state = State::try_from(snapshot).map_err(storage_error)?;
            debug!(
                "loaded {} lifts from {}",
                state.lifts.len(),
                path.display()
            );
            state
        } else {
            debug!("{} does not exist yet", path.display());
            State::default()
        };
        Ok(Self {
            path: Some(path),
            state: Mutex::new(state),
        })
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> Result<T, domain::StorageError> {
        let state = self.state.lock().map_err(|_| domain::StorageError::Lock)?;
        Ok(f(&state))
    }

    /// Runs `f` on a copy of the state and commits the copy once it has been persisted.
    ///
    /// The lock is held for the whole transaction, so concurrent transactions are serialized.
    fn transact<T, E>(&self, f: impl FnOnce(&mut State) -> Result<T, E>) -> Result<T, E>
    where
        E: From<domain::StorageError>,
    {
        let mut state = self.state.lock().map_err(|_| domain::StorageError::Lock)?;
        let mut next = state.clone();
        let result = f(&mut next)?;
        if let Some(path) = &self.path {
            if let Err(err) = persist(path, &next) {
                warn!("failed to write {}: {err}", path.display());
                return Err(err.into());
            }
        }
        *state = next;
        Ok(result)
    }
}

fn persist(path: &Path, state: &State) -> Result<(), domain::StorageError> {
    let content = serde_json::to_string(&Snapshot::from(state)).map_err(storage_error)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(storage_error)?;
    }
    let mut temporary = path.as_os_str().to_owned();
    temporary.push(".tmp");
    fs::write(&temporary, content).map_err(storage_error)?;
    fs::rename(&temporary, path).map_err(storage_error)
}

fn storage_error(err: impl std::error::Error + Send + Sync + 'static) -> domain::StorageError {
    domain::StorageError::Other(Box::new(err))
}

fn newest_first(lifts: impl Iterator<Item = domain::Lift>) -> Vec<domain::Lift> {
    let mut lifts = lifts.collect::<Vec<_>>();
    lifts.sort_by_key(|lift| Reverse(lift.chronology()));
    lifts
}

impl domain::LiftRepository for LocalFile {
    fn create_lift(&self, lift: domain::NewLift) -> Result<domain::LiftID, domain::CreateError> {
        self.transact(|state| {
            state.last_lift_id += 1;
            let id = domain::LiftID::from(state.last_lift_id);
            state.lifts.push(domain::Lift::new(id, lift));
            Ok(id)
        })
    }

    fn read_lift(&self, id: domain::LiftID) -> Result<domain::Lift, domain::ReadError> {
        self.read(|state| state.lifts.iter().find(|lift| lift.id == id).cloned())?
            .ok_or(domain::ReadError::LiftNotFound(id))
    }

    fn modify_lift(
        &self,
        id: domain::LiftID,
        note: String,
        reps: domain::Reps,
    ) -> Result<(), domain::UpdateError> {
        self.transact(|state| {
            let lift = state
                .lifts
                .iter_mut()
                .find(|lift| lift.id == id)
                .ok_or(domain::UpdateError::NotFound(id))?;
            lift.note = note;
            lift.reps = reps;
            Ok(())
        })
    }

    fn read_recent_lifts(&self) -> Result<Vec<domain::Lift>, domain::ReadError> {
        let mut lifts = self.read(|state| newest_first(state.lifts.iter().cloned()))?;
        lifts.truncate(RECENT_LIFTS_LIMIT);
        Ok(lifts)
    }

    fn read_comparable_lifts(
        &self,
        exercise: domain::Exercise,
        weight: domain::Weight,
    ) -> Result<domain::ComparableLifts, domain::ReadError> {
        let mut lifts = self.read(|state| {
            newest_first(
                state
                    .lifts
                    .iter()
                    .filter(|lift| lift.exercise == exercise && lift.to_failure)
                    .cloned(),
            )
        })?;
        lifts.truncate(COMPARABLE_LIFTS_LIMIT);
        Ok(domain::ComparableLifts::find(&lifts, weight))
    }
}

impl domain::TrainingMaxRepository for LocalFile {
    fn read_training_maxes(&self) -> Result<Vec<domain::TrainingMax>, domain::ReadError> {
        Ok(self.read(|state| {
            domain::Exercise::iter()
                .filter_map(|exercise| {
                    state
                        .training_maxes
                        .iter()
                        .rev()
                        .find(|tm| tm.exercise == exercise)
                        .copied()
                })
                .collect()
        })?)
    }

    fn create_training_maxes(
        &self,
        training_maxes: [domain::Weight; 4],
    ) -> Result<(), domain::CreateError> {
        self.transact(|state| {
            state
                .training_maxes
                .extend(domain::training_maxes(training_maxes));
            Ok(())
        })
    }
}

impl domain::SmallestDenomRepository for LocalFile {
    fn read_smallest_denom(&self) -> Result<domain::Weight, domain::ReadError> {
        self.read(|state| state.smallest_denoms.last().copied())?
            .ok_or(domain::ReadError::NoSmallestDenom)
    }

    fn write_smallest_denom(&self, denom: domain::Weight) -> Result<(), domain::CreateError> {
        self.transact(|state| {
            state.smallest_denoms.push(denom);
            Ok(())
        })
    }
}

impl domain::SkippedWeekRepository for LocalFile {
    fn read_skipped_weeks(&self) -> Result<Vec<domain::SkippedWeek>, domain::ReadError> {
        Ok(self.read(|state| {
            state
                .skipped_weeks
                .iter()
                .rev()
                .take(SKIPPED_WEEKS_LIMIT)
                .cloned()
                .collect()
        })?)
    }

    fn create_skipped_week(
        &self,
        note: String,
        week: u32,
        iteration: u32,
    ) -> Result<(), domain::CreateError> {
        self.transact(|state| {
            state.skipped_weeks.push(domain::SkippedWeek {
                week,
                iteration,
                note,
            });
            Ok(())
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Snapshot {
    #[serde(rename = "LastLiftID")]
    last_lift_id: u64,
    lifts: Vec<json::Lift>,
    training_maxes: Vec<json::TrainingMax>,
    smallest_denoms: Vec<json::Weight>,
    skipped_weeks: Vec<json::SkippedWeek>,
}

impl From<&State> for Snapshot {
    fn from(value: &State) -> Self {
        Self {
            last_lift_id: value.last_lift_id,
            lifts: value.lifts.iter().map(json::Lift::from).collect(),
            training_maxes: value
                .training_maxes
                .iter()
                .map(json::TrainingMax::from)
                .collect(),
            smallest_denoms: value
                .smallest_denoms
                .iter()
                .copied()
                .map(json::Weight::from)
                .collect(),
            skipped_weeks: value
                .skipped_weeks
                .iter()
                .map(json::SkippedWeek::from)
                .collect(),
        }
    }
}

impl TryFrom<Snapshot> for State {
    type Error = domain::ValidationError;

    fn try_from(value: Snapshot) -> Result<Self, Self::Error> {
        let lifts = value
            .lifts
            .into_iter()
            .map(domain::Lift::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            last_lift_id: lifts
                .iter()
                .map(|lift| *lift.id)
                .fold(value.last_lift_id, u64::max),
            lifts,
            training_maxes: value
                .training_maxes
                .into_iter()
                .map(domain::TrainingMax::try_from)
                .collect::<Result<_, _>>()?,
            smallest_denoms: value
                .smallest_denoms
                .into_iter()
                .map(domain::Weight::from)
                .collect(),
            skipped_weeks: value
                .skipped_weeks
                .into_iter()
                .map(domain::SkippedWeek::from)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use stronk_domain::{
        LiftRepository, SkippedWeekRepository, SmallestDenomRepository, TrainingMaxRepository,
    };

    use crate::tests::data::{LIFT, new_lift};

    use super::*;

    fn ids(lifts: &[domain::Lift]) -> Vec<u64> {
        lifts.iter().map(|lift| *lift.id).collect()
    }

    #[test]
    fn test_create_lift() {
        let store = LocalFile::in_memory();
        let id = store.create_lift(new_lift(&LIFT)).unwrap();
        assert_eq!(id, 1_u64.into());
        assert_eq!(store.create_lift(new_lift(&LIFT)).unwrap(), 2_u64.into());
        assert_eq!(
            store.read_lift(id).unwrap(),
            domain::Lift::new(id, new_lift(&LIFT))
        );
    }

    #[test]
    fn test_read_lift_not_found() {
        let store = LocalFile::in_memory();
        assert!(matches!(
            store.read_lift(1_u64.into()),
            Err(domain::ReadError::LiftNotFound(_))
        ));
    }

    #[test]
    fn test_modify_lift() {
        let store = LocalFile::in_memory();
        let id = store.create_lift(new_lift(&LIFT)).unwrap();
        store
            .modify_lift(id, "grindy".to_string(), domain::Reps::new(6).unwrap())
            .unwrap();
        let lift = store.read_lift(id).unwrap();
        assert_eq!(lift.note, "grindy");
        assert_eq!(lift.reps, domain::Reps::new(6).unwrap());
        assert_eq!(lift.weight, LIFT.weight);

        assert!(matches!(
            store.modify_lift(9_u64.into(), String::new(), domain::Reps::default()),
            Err(domain::UpdateError::NotFound(_))
        ));
    }

    #[test]
    fn test_read_recent_lifts() {
        let store = LocalFile::in_memory();
        for (iteration, week, day) in [(0, 1, 0), (0, 0, 3), (1, 0, 0), (0, 1, 0)] {
            store
                .create_lift(domain::NewLift {
                    position: domain::Position::new(iteration, week, day),
                    ..new_lift(&LIFT)
                })
                .unwrap();
        }
        assert_eq!(ids(&store.read_recent_lifts().unwrap()), vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_read_recent_lifts_limit() {
        let store = LocalFile::in_memory();
        for _ in 0..RECENT_LIFTS_LIMIT + 5 {
            store.create_lift(new_lift(&LIFT)).unwrap();
        }
        let lifts = store.read_recent_lifts().unwrap();
        assert_eq!(lifts.len(), RECENT_LIFTS_LIMIT);
        assert_eq!(*lifts[0].id, 105);
    }

    #[test]
    fn test_read_comparable_lifts() {
        let store = LocalFile::in_memory();
        let lifts = [
            (domain::Exercise::Squat, 1800, 8, true),
            (domain::Exercise::Squat, 2000, 5, true),
            (domain::Exercise::Squat, 2200, 10, false),
            (domain::Exercise::Deadlift, 3000, 5, true),
        ];
        for (exercise, weight, reps, to_failure) in lifts {
            store
                .create_lift(domain::NewLift {
                    exercise,
                    weight: domain::Weight::deci_pounds(weight),
                    reps: domain::Reps::new(reps).unwrap(),
                    to_failure,
                    ..new_lift(&LIFT)
                })
                .unwrap();
        }

        let comparables = store
            .read_comparable_lifts(domain::Exercise::Squat, domain::Weight::deci_pounds(1950))
            .unwrap();

        assert_eq!(
            comparables.closest_weight.map(|lift| *lift.id),
            Some(2)
        );
        assert_eq!(
            comparables.personal_record.map(|lift| *lift.id),
            Some(2)
        );

        let none = store
            .read_comparable_lifts(
                domain::Exercise::OverheadPress,
                domain::Weight::deci_pounds(1000),
            )
            .unwrap();
        assert_eq!(none, domain::ComparableLifts::default());
    }

    #[test]
    fn test_training_maxes() {
        let store = LocalFile::in_memory();
        assert_eq!(store.read_training_maxes().unwrap(), vec![]);

        store
            .create_training_maxes([domain::Weight::deci_pounds(1000); 4])
            .unwrap();
        store
            .create_training_maxes([
                domain::Weight::deci_pounds(1275),
                domain::Weight::deci_pounds(2300),
                domain::Weight::deci_pounds(1900),
                domain::Weight::deci_pounds(2800),
            ])
            .unwrap();

        assert_eq!(
            store
                .read_training_maxes()
                .unwrap()
                .iter()
                .map(|tm| (tm.exercise, tm.max.value()))
                .collect::<Vec<_>>(),
            vec![
                (domain::Exercise::OverheadPress, 1275),
                (domain::Exercise::Squat, 2300),
                (domain::Exercise::BenchPress, 1900),
                (domain::Exercise::Deadlift, 2800),
            ]
        );
    }

    #[test]
    fn test_smallest_denom() {
        let store = LocalFile::in_memory();
        assert!(matches!(
            store.read_smallest_denom(),
            Err(domain::ReadError::NoSmallestDenom)
        ));

        store
            .write_smallest_denom(domain::Weight::deci_pounds(50))
            .unwrap();
        store
            .write_smallest_denom(domain::Weight::centi_pounds(125))
            .unwrap();

        assert_eq!(
            store.read_smallest_denom().unwrap(),
            domain::Weight::centi_pounds(125)
        );
    }

    #[test]
    fn test_skipped_weeks() {
        let store = LocalFile::in_memory();
        store
            .create_skipped_week("first".to_string(), 3, 0)
            .unwrap();
        store
            .create_skipped_week("second".to_string(), 3, 1)
            .unwrap();
        assert_eq!(
            store
                .read_skipped_weeks()
                .unwrap()
                .iter()
                .map(|skipped| (skipped.iteration, skipped.note.as_str()))
                .collect::<Vec<_>>(),
            vec![(1, "second"), (0, "first")]
        );
    }

    #[test]
    fn test_open_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("stronk.json");

        {
            let store = LocalFile::open(&path).unwrap();
            store.create_lift(new_lift(&LIFT)).unwrap();
            store
                .create_training_maxes([domain::Weight::deci_pounds(1000); 4])
                .unwrap();
            store
                .write_smallest_denom(domain::Weight::centi_pounds(125))
                .unwrap();
            store
                .create_skipped_week("deload".to_string(), 3, 0)
                .unwrap();
        }

        let store = LocalFile::open(&path).unwrap();
        assert_eq!(
            store.read_lift(1_u64.into()).unwrap(),
            domain::Lift::new(1_u64.into(), new_lift(&LIFT))
        );
        assert_eq!(store.read_training_maxes().unwrap().len(), 4);
        assert_eq!(
            store.read_smallest_denom().unwrap(),
            domain::Weight::centi_pounds(125)
        );
        assert_eq!(store.read_skipped_weeks().unwrap().len(), 1);
        assert_eq!(store.create_lift(new_lift(&LIFT)).unwrap(), 2_u64.into());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stronk.json");
        let store = LocalFile::open(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(store.read_recent_lifts().unwrap(), vec![]);
    }

    #[rstest]
    #[case("not json")]
    #[case(
        r#"{"LastLiftID": 1, "Lifts": [], "SmallestDenoms": [], "SkippedWeeks": [],
            "TrainingMaxes": [{"Exercise": "CURL", "Max": {"Unit": "DECI_POUNDS", "Value": 100}}]}"#
    )]
    fn test_open_invalid_file(#[case] content: &str) {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), content).unwrap();
        assert!(matches!(
            LocalFile::open(file.path()),
            Err(domain::StorageError::Other(_))
        ));
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        // the parent directory cannot be created over a regular file
        let store = LocalFile::open(blocker.join("stronk.json")).unwrap();

        assert!(matches!(
            store.create_lift(new_lift(&LIFT)),
            Err(domain::CreateError::Storage(domain::StorageError::Other(_)))
        ));
        assert_eq!(store.read_recent_lifts().unwrap(), vec![]);
    }
}
