use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

const MAX_ENTRIES: usize = 100;

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&mut self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "LevelFilter", rename_all = "lowercase")]
pub enum LevelFilterDef {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Keeps the most recent log entries, newest first.
#[derive(Debug, Default)]
pub struct Memory {
    entries: VecDeque<Entry>,
}

impl Repository for Memory {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
        Ok(self.entries.clone())
    }

    fn write_entry(&mut self, entry: Entry) -> Result<(), Error> {
        self.entries.push_front(entry);
        self.entries.truncate(MAX_ENTRIES);
        Ok(())
    }
}

static LOGGER: Logger = Logger;

/// Installs the logger. Records are written to stderr and to `storage`.
///
/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(storage: Arc<Mutex<dyn Repository>>, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    Ok(())
}

/// The stored log entries, newest first.
///
/// # Errors
///
/// Returns an error if no logger is installed or the entries cannot be read.
pub fn entries() -> Result<VecDeque<Entry>, Error> {
    let log = LOG
        .lock()
        .map_err(|err| Error::Unknown(err.to_string()))?
        .clone()
        .ok_or_else(|| Error::Unknown("logger not initialized".to_string()))?;
    let repository = log.lock().map_err(|err| Error::Unknown(err.to_string()))?;
    repository.read_entries()
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = Entry {
                time: Local::now().format("%b %d %H:%M:%S").to_string(),
                level: record.level(),
                message: record.args().to_string(),
            };
            eprintln!("{} {:<5} {}", entry.time, entry.level, entry.message);

            if let Ok(log) = LOG.lock() {
                if let Some(ref log) = *log {
                    if let Ok(mut repository) = log.lock() {
                        let _ = repository.write_entry(entry);
                    }
                }
            }
        }
    }

    fn flush(&self) {}
}
