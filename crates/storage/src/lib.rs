#![warn(clippy::pedantic)]

use std::{
    fs,
    path::Path,
    sync::{Arc, Mutex},
};

use anyhow::Context;
use stronk_domain as domain;

pub mod json;
pub mod local_file;
pub mod log;
pub mod settings;

pub use local_file::LocalFile;
pub use settings::{Settings, read_settings};

/// Parses and checks a routine document.
pub fn parse_routine(content: &str) -> anyhow::Result<domain::Routine> {
    let routine: json::Routine =
        serde_json::from_str(content).context("invalid routine document")?;
    let routine = domain::Routine::try_from(routine)?;
    routine.validate()?;
    Ok(routine)
}

pub fn load_routine(path: &Path) -> anyhow::Result<domain::Routine> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_routine(&content).with_context(|| format!("failed to load {}", path.display()))
}

/// Installs the logger, loads the routine and opens the store.
pub fn init(settings: &Settings) -> anyhow::Result<domain::Service<LocalFile>> {
    let entries: Arc<Mutex<dyn crate::log::Repository>> =
        Arc::new(Mutex::new(crate::log::Memory::default()));
    if let Err(err) = crate::log::init(entries, settings.log_level) {
        ::log::warn!("{err}");
    }

    let routine = load_routine(&settings.routine_file)?;
    let repository = match &settings.database_file {
        Some(path) => LocalFile::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?,
        None => LocalFile::in_memory(),
    };
    ::log::info!(
        "loaded routine \"{}\" with {} weeks",
        routine.name,
        routine.num_weeks()
    );

    Ok(domain::Service::new(repository, routine))
}
