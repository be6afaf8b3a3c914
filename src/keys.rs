//! Key lookup for custom model entries.
//!
//! Every field lists the JSON keys it may be read from, best first. Droid
//! writes camelCase; older provider configs used snake_case for some fields.

use serde_json::Value;

use crate::types::provider::{ModelFields, ProviderTag, DEFAULT_MAX_OUTPUT_TOKENS};

pub const MODEL: &[&str] = &["model"];
pub const BASE_URL: &[&str] = &["baseUrl", "base_url"];
pub const API_KEY: &[&str] = &["apiKey", "api_key"];
pub const DISPLAY_NAME: &[&str] = &["displayName"];
pub const MAX_OUTPUT_TOKENS: &[&str] = &["maxOutputTokens", "max_tokens"];
pub const NO_IMAGE_SUPPORT: &[&str] = &["noImageSupport"];
pub const PROVIDER: &[&str] = &["provider"];

/// Value of the first candidate key present, if `coerce` accepts it. A
/// present key shadows later candidates even when its value is unusable.
pub fn lookup<'a, T, F>(obj: &'a Value, candidates: &[&str], coerce: F) -> Option<T>
where
    F: Fn(&'a Value) -> Option<T>,
{
    candidates
        .iter()
        .find_map(|key| obj.get(*key))
        .and_then(coerce)
}

pub fn lookup_str<'a>(obj: &'a Value, candidates: &[&str]) -> Option<&'a str> {
    lookup(obj, candidates, Value::as_str)
}

pub fn lookup_bool(obj: &Value, candidates: &[&str]) -> Option<bool> {
    lookup(obj, candidates, Value::as_bool)
}

/// Numbers, integral floats and digit strings all count as a token limit.
pub fn lookup_u64(obj: &Value, candidates: &[&str]) -> Option<u64> {
    lookup(obj, candidates, |v| match v {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

pub fn lookup_provider(obj: &Value, candidates: &[&str]) -> Option<ProviderTag> {
    lookup(obj, candidates, |v| v.as_str().and_then(ProviderTag::parse))
}

/// Rebuild the editable fields from a JSON value, defaulting whatever is
/// missing or of the wrong type.
pub fn read_model_fields(obj: &Value) -> ModelFields {
    ModelFields {
        model: lookup_str(obj, MODEL).unwrap_or_default().to_string(),
        base_url: lookup_str(obj, BASE_URL).unwrap_or_default().to_string(),
        api_key: lookup_str(obj, API_KEY).unwrap_or_default().to_string(),
        max_output_tokens: lookup_u64(obj, MAX_OUTPUT_TOKENS).unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        no_image_support: lookup_bool(obj, NO_IMAGE_SUPPORT).unwrap_or(false),
        provider: lookup_provider(obj, PROVIDER).unwrap_or_default(),
    }
}
