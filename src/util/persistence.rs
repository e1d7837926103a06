use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::Settings;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "SNLH";
const APP_NAME: &str = "LogisticsDesk";

const SETTINGS_FILE: &str = "settings.json";
const TARIFF_OVERRIDE_FILE: &str = "hs_codes.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Optional user-supplied tariff feed that replaces the bundled one.
pub fn tariff_override_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(TARIFF_OVERRIDE_FILE))
}

pub fn load_settings() -> Settings {
    let Some(path) = config_dir().map(|dir| dir.join(SETTINGS_FILE)) else {
        return Settings::default();
    };
    let Ok(data) = fs::read_to_string(&path) else {
        tracing::debug!(path = %path.display(), "no saved settings; using defaults");
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&data) {
        Ok(settings) => settings.sanitized(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings file");
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<(), PersistSaveError> {
    let dir = config_dir().ok_or(PersistSaveError::StorageUnavailable)?;
    fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(dir.join(SETTINGS_FILE), json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
