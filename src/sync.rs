//! Keeps the JSON editor text and the typed form fields in step.
//!
//! Fields → text runs after every field change and cannot fail. Text → fields
//! runs on every edit; malformed text leaves the fields untouched and shows an
//! error until a later edit parses.

use serde_json::Value;
use tracing::{debug, error};

use crate::i18n::Locale;
use crate::keys::read_model_fields;
use crate::types::provider::{ModelFields, ProviderModelDescriptor};

/// Render the fields as the editor shows them. `provider_name` becomes
/// `displayName`.
pub fn fields_to_json(fields: &ModelFields, provider_name: &str) -> String {
    let descriptor = ProviderModelDescriptor::new(fields, provider_name);
    match serde_json::to_string_pretty(&descriptor) {
        Ok(text) => text,
        Err(e) => {
            // Plain strings, integers and a unit enum always serialize.
            error!(error = %e, "Failed to render model descriptor");
            "{}".to_string()
        }
    }
}

/// Parse editor text back into fields. `displayName` is ignored.
pub fn json_to_fields(text: &str) -> Result<ModelFields, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    Ok(read_model_fields(&value))
}

/// State of the JSON editor: the displayed text and the inline error, if any.
#[derive(Debug, Clone)]
pub struct JsonEditor {
    text: String,
    error: Option<String>,
    locale: Locale,
}

impl JsonEditor {
    pub fn new(locale: Locale) -> Self {
        Self {
            text: String::new(),
            error: None,
            locale,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Replace the text with a fresh rendering of the fields.
    pub fn sync_from_fields(&mut self, fields: &ModelFields, provider_name: &str) {
        self.text = fields_to_json(fields, provider_name);
    }

    /// Apply a user edit. `on_change` runs only when `text` parses.
    pub fn on_edit<F>(&mut self, text: impl Into<String>, on_change: F)
    where
        F: FnOnce(ModelFields),
    {
        self.text = text.into();
        match json_to_fields(&self.text) {
            Ok(fields) => {
                self.error = None;
                on_change(fields);
            }
            Err(e) => {
                debug!(error = %e, "JSON editor text does not parse");
                self.error = Some(self.locale.invalid_json().to_string());
            }
        }
    }
}
