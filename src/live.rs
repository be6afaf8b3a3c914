//! Writes provider entries straight into `settings.json`'s `customModels`,
//! which Droid picks up on its next start.
//!
//! Entry shape:
//! `{model, id, index, baseUrl, apiKey, displayName, maxOutputTokens,
//! noImageSupport, provider}` with `id = "custom:<name>-<index>"`.

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::DroidPaths;
use crate::droid_config::{read_config, read_settings, write_settings};
use crate::error::AppError;
use crate::keys::{self, lookup_str};
use crate::types::provider::{ProviderTag, DEFAULT_MAX_OUTPUT_TOKENS};

/// Model written when a provider config does not name one.
pub const DEFAULT_LIVE_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Ids allow alphanumerics, `-` and `_`; everything else becomes `-`.
fn clean_name(provider_name: &str) -> String {
    provider_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Build a `customModels` entry from a provider's settings config.
pub fn build_custom_model(
    settings_config: &Value,
    provider_name: &str,
    index: i64,
) -> Result<Value, AppError> {
    if !settings_config.is_object() {
        return Err(AppError::Config(
            "Droid provider config must be a JSON object".to_string(),
        ));
    }

    // Droid accepts more provider tags and token values than the form
    // offers, so they are written through untyped.
    let model = lookup_str(settings_config, keys::MODEL).unwrap_or(DEFAULT_LIVE_MODEL);
    let base_url = lookup_str(settings_config, keys::BASE_URL).unwrap_or_default();
    let api_key = lookup_str(settings_config, keys::API_KEY).unwrap_or_default();
    let provider = lookup_str(settings_config, keys::PROVIDER).unwrap_or(ProviderTag::Anthropic.as_str());
    let max_tokens = keys::lookup(settings_config, keys::MAX_OUTPUT_TOKENS, Value::as_i64)
        .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS as i64);
    let no_image_support = keys::lookup_bool(settings_config, keys::NO_IMAGE_SUPPORT).unwrap_or(false);

    debug!(
        api_key = if api_key.is_empty() { "(empty)" } else { "***" },
        base_url = %base_url,
        model = %model,
        "Building Droid custom model"
    );

    Ok(json!({
        "model": model,
        "id": format!("custom:{}-{}", clean_name(provider_name), index),
        "index": index,
        "baseUrl": base_url,
        "apiKey": api_key,
        "displayName": provider_name,
        "maxOutputTokens": max_tokens,
        "noImageSupport": no_image_support,
        "provider": provider,
    }))
}

fn display_name(entry: &Value) -> Option<&str> {
    lookup_str(entry, keys::DISPLAY_NAME)
}

/// Add or replace the provider's entry and make it the session default.
/// An entry with the same `displayName` keeps its `index` and `id`.
/// Returns the id of the written entry.
pub fn upsert_custom_model(
    paths: &DroidPaths,
    settings_config: &Value,
    provider_name: &str,
) -> Result<String, AppError> {
    let mut settings = read_settings(paths)?;

    let settings_obj = settings
        .as_object_mut()
        .ok_or_else(|| AppError::Config("Droid settings.json must be a JSON object".to_string()))?;

    let custom_models = settings_obj
        .entry("customModels")
        .or_insert_with(|| json!([]))
        .as_array_mut()
        .ok_or_else(|| {
            AppError::Config("customModels in Droid settings.json must be an array".to_string())
        })?;

    let next_index = custom_models
        .iter()
        .filter_map(|m| m.get("index").and_then(Value::as_i64))
        .max()
        .map_or(0, |max| max + 1);

    let mut entry = build_custom_model(settings_config, provider_name, next_index)?;

    let model_id = match custom_models
        .iter()
        .position(|m| display_name(m) == Some(provider_name))
    {
        Some(pos) => {
            let existing = &custom_models[pos];
            let old_index = existing
                .get("index")
                .and_then(Value::as_i64)
                .unwrap_or(pos as i64);
            entry["index"] = json!(old_index);
            if let Some(old_id) = existing.get("id").and_then(Value::as_str) {
                entry["id"] = json!(old_id);
            }
            custom_models[pos] = entry.clone();
            info!(display_name = provider_name, "Updated Droid custom model");
            entry["id"].as_str().unwrap_or_default().to_string()
        }
        None => {
            let id = entry["id"].as_str().unwrap_or_default().to_string();
            custom_models.push(entry);
            info!(display_name = provider_name, "Added Droid custom model");
            id
        }
    };

    if !model_id.is_empty() {
        let session = settings_obj
            .entry("sessionDefaultSettings")
            .or_insert_with(|| json!({}));
        if let Some(session_obj) = session.as_object_mut() {
            session_obj.insert("model".to_string(), json!(model_id));
            info!(model = %model_id, "Set sessionDefaultSettings.model");
        }
    }

    write_settings(paths, &settings)?;
    Ok(model_id)
}

/// Remove every entry whose `displayName` matches. Returns whether anything
/// was removed.
pub fn remove_custom_model(paths: &DroidPaths, provider_name: &str) -> Result<bool, AppError> {
    let mut settings = read_settings(paths)?;

    let Some(Value::Array(custom_models)) = settings.get_mut("customModels") else {
        return Ok(false);
    };

    let before = custom_models.len();
    custom_models.retain(|m| display_name(m) != Some(provider_name));
    if custom_models.len() == before {
        return Ok(false);
    }

    write_settings(paths, &settings)?;
    info!(display_name = provider_name, "Removed Droid custom model");
    Ok(true)
}

/// The first `customModels` entry of `config.json`, used to seed a default
/// provider; `{}` when there is none.
pub fn import_default_model(paths: &DroidPaths) -> Result<Value, AppError> {
    let config = read_config(paths)?;
    Ok(config
        .get("customModels")
        .and_then(Value::as_array)
        .and_then(|models| models.first())
        .cloned()
        .unwrap_or_else(|| json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::droid_config::{write_config, write_settings};

    fn test_paths() -> (tempfile::TempDir, DroidPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = DroidPaths::new(dir.path().join(".factory"));
        (dir, paths)
    }

    #[test]
    fn clean_name_replaces_special_characters() {
        assert_eq!(clean_name("My Provider/v2"), "My-Provider-v2");
        assert_eq!(clean_name("ok_name-1"), "ok_name-1");
    }

    #[test]
    fn build_accepts_snake_case_and_defaults_model() {
        let entry = build_custom_model(
            &json!({"api_key": "k", "base_url": "https://x", "max_tokens": 2048}),
            "Prov",
            3,
        )
        .unwrap();
        assert_eq!(entry["model"], DEFAULT_LIVE_MODEL);
        assert_eq!(entry["id"], "custom:Prov-3");
        assert_eq!(entry["index"], 3);
        assert_eq!(entry["apiKey"], "k");
        assert_eq!(entry["baseUrl"], "https://x");
        assert_eq!(entry["maxOutputTokens"], 2048);
        assert_eq!(entry["noImageSupport"], false);
        assert_eq!(entry["provider"], "anthropic");
        assert_eq!(entry["displayName"], "Prov");
    }

    #[test]
    fn build_writes_provider_and_tokens_through() {
        let entry = build_custom_model(
            &json!({"model": "m", "provider": "openai", "maxOutputTokens": -1}),
            "P",
            0,
        )
        .unwrap();
        assert_eq!(entry["provider"], "openai");
        assert_eq!(entry["maxOutputTokens"], -1);

        let entry = build_custom_model(&json!({"maxOutputTokens": 1.5}), "P", 0).unwrap();
        assert_eq!(entry["maxOutputTokens"], 131072);
    }

    #[test]
    fn build_rejects_non_object() {
        assert!(build_custom_model(&json!("x"), "P", 0).is_err());
    }

    #[test]
    fn upsert_appends_with_next_index() {
        let (_dir, paths) = test_paths();
        write_settings(&paths, &json!({"customModels": [{"displayName": "Old", "index": 4, "id": "custom:Old-4"}]}))
            .unwrap();

        let id = upsert_custom_model(&paths, &json!({"model": "m"}), "New").unwrap();
        assert_eq!(id, "custom:New-5");

        let settings = read_settings(&paths).unwrap();
        assert_eq!(settings["customModels"].as_array().unwrap().len(), 2);
        assert_eq!(settings["sessionDefaultSettings"]["model"], "custom:New-5");
    }

    #[test]
    fn upsert_replaces_same_display_name_keeping_id() {
        let (_dir, paths) = test_paths();
        upsert_custom_model(&paths, &json!({"model": "a"}), "P").unwrap();
        let id = upsert_custom_model(&paths, &json!({"model": "b"}), "P").unwrap();
        assert_eq!(id, "custom:P-0");

        let settings = read_settings(&paths).unwrap();
        let models = settings["customModels"].as_array().unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0]["model"], "b");
        assert_eq!(models[0]["index"], 0);
    }

    #[test]
    fn upsert_rejects_non_array_custom_models() {
        let (_dir, paths) = test_paths();
        write_settings(&paths, &json!({"customModels": {}})).unwrap();
        assert!(upsert_custom_model(&paths, &json!({}), "P").is_err());
    }

    #[test]
    fn remove_only_writes_when_matched() {
        let (_dir, paths) = test_paths();
        assert!(!remove_custom_model(&paths, "P").unwrap());

        upsert_custom_model(&paths, &json!({}), "P").unwrap();
        upsert_custom_model(&paths, &json!({}), "Q").unwrap();
        assert!(remove_custom_model(&paths, "P").unwrap());

        let settings = read_settings(&paths).unwrap();
        let models = settings["customModels"].as_array().unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0]["displayName"], "Q");
        assert!(!remove_custom_model(&paths, "P").unwrap());
    }

    #[test]
    fn import_takes_first_config_model() {
        let (_dir, paths) = test_paths();
        assert_eq!(import_default_model(&paths).unwrap(), json!({}));

        write_config(&paths, &json!({"customModels": [{"model": "first"}, {"model": "second"}]}))
            .unwrap();
        assert_eq!(import_default_model(&paths).unwrap(), json!({"model": "first"}));
    }
}
