//! Droid's files under `~/.factory`.
//!
//! `config.json` is the main config the user edits; `settings.json` is the
//! runtime file Droid reads `customModels` from after a restart.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::DroidPaths;
use crate::error::AppError;
use crate::types::config::ConfigStatus;

pub(crate) fn read_json_file(path: &Path) -> Result<Value, AppError> {
    if !path.exists() {
        return Ok(json!({}));
    }
    let raw = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| AppError::json(path, e))
}

/// Pretty-print `value` into `path` through a temp file in the same directory.
pub(crate) fn write_json_file(path: &Path, value: &Value) -> Result<(), AppError> {
    let parent = path
        .parent()
        .ok_or_else(|| AppError::Config(format!("{} has no parent directory", path.display())))?;
    fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;

    let raw = serde_json::to_string_pretty(value)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| AppError::io(parent, e))?;
    tmp.write_all(raw.as_bytes())
        .map_err(|e| AppError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| AppError::io(path, e.error))?;
    debug!(path = %path.display(), bytes = raw.len(), "Wrote JSON file");
    Ok(())
}

pub fn config_status(paths: &DroidPaths) -> ConfigStatus {
    let path = paths.config_path();
    ConfigStatus {
        exists: path.exists(),
        path: path.to_string_lossy().to_string(),
    }
}

/// Read `config.json`; a missing file reads as `{}`.
pub fn read_config(paths: &DroidPaths) -> Result<Value, AppError> {
    read_json_file(&paths.config_path())
}

pub fn write_config(paths: &DroidPaths, config: &Value) -> Result<(), AppError> {
    write_json_file(&paths.config_path(), config)
}

/// Read `settings.json`; a missing file reads as `{}`.
pub fn read_settings(paths: &DroidPaths) -> Result<Value, AppError> {
    read_json_file(&paths.settings_path())
}

pub fn write_settings(paths: &DroidPaths, settings: &Value) -> Result<(), AppError> {
    write_json_file(&paths.settings_path(), settings)
}

/// Drop the `settings.json` entries that keep Droid on a stale model:
/// an empty `customModels` list and `sessionDefaultSettings.model`.
pub fn cleanup_settings_for_new_config(paths: &DroidPaths) -> Result<(), AppError> {
    let path = paths.settings_path();
    if !path.exists() {
        return Ok(());
    }

    let mut settings = read_settings(paths)?;
    let mut modified = false;

    if let Some(obj) = settings.as_object_mut() {
        let empty_models = obj
            .get("customModels")
            .and_then(|v| v.as_array())
            .is_some_and(|a| a.is_empty());
        if empty_models {
            obj.remove("customModels");
            modified = true;
            info!("Removed empty customModels from settings.json");
        }

        if let Some(session) = obj
            .get_mut("sessionDefaultSettings")
            .and_then(|v| v.as_object_mut())
        {
            if session.remove("model").is_some() {
                modified = true;
                info!("Removed sessionDefaultSettings.model from settings.json");
            }
        }
    }

    if modified {
        write_settings(paths, &settings)?;
    }
    Ok(())
}
