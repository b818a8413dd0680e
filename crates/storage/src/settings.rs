use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::log::LevelFilterDef;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub routine_file: PathBuf,
    /// The data is only kept in memory if no file is given.
    pub database_file: Option<PathBuf>,
    #[serde(with = "LevelFilterDef")]
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            routine_file: PathBuf::from("routine.json"),
            database_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

/// Reads the settings file. The defaults are used if the file does not exist.
pub fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("invalid settings in {}", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_read_settings_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            read_settings(&dir.path().join("settings.json")).unwrap(),
            Settings::default()
        );
    }

    #[rstest]
    #[case(
        r#"{"routine_file": "531.json", "database_file": "data.json", "log_level": "debug"}"#,
        Settings {
            routine_file: PathBuf::from("531.json"),
            database_file: Some(PathBuf::from("data.json")),
            log_level: LevelFilter::Debug,
        }
    )]
    #[case(
        r#"{"log_level": "off"}"#,
        Settings { log_level: LevelFilter::Off, ..Settings::default() }
    )]
    #[case("{}", Settings::default())]
    fn test_read_settings(#[case] content: &str, #[case] expected: Settings) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, content).unwrap();
        assert_eq!(read_settings(&path).unwrap(), expected);
    }

    #[test]
    fn test_read_settings_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"log_level": "loud"}"#).unwrap();
        assert!(read_settings(&path).is_err());
    }
}
