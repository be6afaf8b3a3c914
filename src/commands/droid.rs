use serde_json::Value;

use crate::config::DroidPaths;
use crate::droid_config;
use crate::live;
use crate::types::config::ConfigStatus;

// Direct access for the in-process bridge and tests (no Tauri State).

pub fn get_droid_settings_at(paths: &DroidPaths) -> Result<Value, String> {
    droid_config::read_settings(paths).map_err(|e| e.to_string())
}

pub fn get_droid_config_status_at(paths: &DroidPaths) -> ConfigStatus {
    droid_config::config_status(paths)
}

pub fn get_droid_config_at(paths: &DroidPaths) -> Result<Value, String> {
    droid_config::read_config(paths).map_err(|e| e.to_string())
}

pub fn set_droid_config_at(paths: &DroidPaths, config: &Value) -> Result<bool, String> {
    droid_config::write_config(paths, config).map_err(|e| e.to_string())?;
    Ok(true)
}

pub fn cleanup_droid_settings_at(paths: &DroidPaths) -> Result<bool, String> {
    droid_config::cleanup_settings_for_new_config(paths).map_err(|e| e.to_string())?;
    Ok(true)
}

pub fn get_droid_config_path_at(paths: &DroidPaths) -> String {
    paths.config_path().to_string_lossy().to_string()
}

pub fn sync_droid_custom_model_at(
    paths: &DroidPaths,
    settings_config: &Value,
    provider_name: &str,
) -> Result<String, String> {
    live::upsert_custom_model(paths, settings_config, provider_name).map_err(|e| e.to_string())
}

pub fn remove_droid_custom_model_at(paths: &DroidPaths, provider_name: &str) -> Result<bool, String> {
    live::remove_custom_model(paths, provider_name).map_err(|e| e.to_string())
}

pub fn import_droid_default_model_at(paths: &DroidPaths) -> Result<Value, String> {
    live::import_default_model(paths).map_err(|e| e.to_string())
}

// Tauri command wrappers over `State<DroidPaths>`.

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_droid_settings(paths: tauri::State<'_, DroidPaths>) -> Result<Value, String> {
    get_droid_settings_at(&paths)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_droid_config_status(
    paths: tauri::State<'_, DroidPaths>,
) -> Result<ConfigStatus, String> {
    Ok(get_droid_config_status_at(&paths))
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_droid_config(paths: tauri::State<'_, DroidPaths>) -> Result<Value, String> {
    get_droid_config_at(&paths)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn set_droid_config(
    paths: tauri::State<'_, DroidPaths>,
    config: Value,
) -> Result<bool, String> {
    set_droid_config_at(&paths, &config)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn cleanup_droid_settings(paths: tauri::State<'_, DroidPaths>) -> Result<bool, String> {
    cleanup_droid_settings_at(&paths)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_droid_config_path(paths: tauri::State<'_, DroidPaths>) -> Result<String, String> {
    Ok(get_droid_config_path_at(&paths))
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn sync_droid_custom_model(
    paths: tauri::State<'_, DroidPaths>,
    settings_config: Value,
    provider_name: String,
) -> Result<String, String> {
    sync_droid_custom_model_at(&paths, &settings_config, &provider_name)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn remove_droid_custom_model(
    paths: tauri::State<'_, DroidPaths>,
    provider_name: String,
) -> Result<bool, String> {
    remove_droid_custom_model_at(&paths, &provider_name)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn import_droid_default_model(
    paths: tauri::State<'_, DroidPaths>,
) -> Result<Value, String> {
    import_droid_default_model_at(&paths)
}
