use serde_json::{json, Value};
use tracing::debug;

use crate::i18n::Locale;
use crate::keys::{self, lookup_str};
use crate::presenter::{self, Control, FieldEvent, FieldHandlers, FormView, ProviderCategory};
use crate::sync::JsonEditor;
use crate::types::provider::{ModelFields, ProviderTag};

/// Owner of the Droid provider form state. Field edits and JSON edits both
/// land here; the JSON text is regenerated whenever a field changes.
#[derive(Debug, Clone)]
pub struct DroidProviderForm {
    provider_name: String,
    fields: ModelFields,
    category: Option<ProviderCategory>,
    show_api_key: bool,
    editor: JsonEditor,
}

impl DroidProviderForm {
    pub fn new(locale: Locale) -> Self {
        let mut form = Self {
            provider_name: String::new(),
            fields: ModelFields::default(),
            category: None,
            show_api_key: true,
            editor: JsonEditor::new(locale),
        };
        form.resync();
        form
    }

    /// Seed from a stored provider config. `displayName` in the config is
    /// only used when no provider name is given.
    pub fn from_settings_config(settings_config: &Value, provider_name: Option<&str>, locale: Locale) -> Self {
        let mut form = Self::new(locale);
        form.fields = keys::read_model_fields(settings_config);
        form.provider_name = provider_name
            .or_else(|| lookup_str(settings_config, keys::DISPLAY_NAME))
            .unwrap_or_default()
            .to_string();
        form.resync();
        form
    }

    pub fn with_category(mut self, category: Option<ProviderCategory>) -> Self {
        self.category = category;
        self
    }

    pub fn with_api_key_visible(mut self, visible: bool) -> Self {
        self.show_api_key = visible;
        self
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn fields(&self) -> &ModelFields {
        &self.fields
    }

    pub fn json_text(&self) -> &str {
        self.editor.text()
    }

    pub fn json_error(&self) -> Option<&str> {
        self.editor.error()
    }

    pub fn view(&self) -> FormView<'_> {
        FormView {
            provider_name: &self.provider_name,
            fields: &self.fields,
            show_api_key: self.show_api_key,
            category: self.category,
        }
    }

    pub fn controls(&self) -> Vec<Control> {
        presenter::render(&self.view())
    }

    pub fn apply(&mut self, event: FieldEvent) {
        presenter::dispatch(event, self);
    }

    /// A user edit of the JSON text. Fields change only if the text parses
    /// to something different from what is already held.
    pub fn on_json_edit(&mut self, text: impl Into<String>) {
        let mut parsed = None;
        self.editor.on_edit(text, |fields| parsed = Some(fields));
        if let Some(fields) = parsed {
            if fields != self.fields {
                debug!("JSON edit changed provider fields");
                self.fields = fields;
                self.resync();
            }
        }
    }

    /// The provider config to persist. Saving it is the caller's job.
    pub fn settings_config(&self) -> Value {
        json!({
            "model": self.fields.model,
            "baseUrl": self.fields.base_url,
            "apiKey": self.fields.api_key,
            "displayName": self.provider_name,
            "maxOutputTokens": self.fields.max_output_tokens,
            "noImageSupport": self.fields.no_image_support,
            "provider": self.fields.provider,
        })
    }

    fn resync(&mut self) {
        self.editor.sync_from_fields(&self.fields, &self.provider_name);
    }
}

impl FieldHandlers for DroidProviderForm {
    fn on_provider_name_change(&mut self, value: String) {
        self.provider_name = value;
        self.resync();
    }

    fn on_base_url_change(&mut self, value: String) {
        self.fields.base_url = value;
        self.resync();
    }

    fn on_api_key_change(&mut self, value: String) {
        self.fields.api_key = value;
        self.resync();
    }

    fn on_model_change(&mut self, value: String) {
        self.fields.model = value;
        self.resync();
    }

    fn on_provider_change(&mut self, value: ProviderTag) {
        self.fields.provider = value;
        self.resync();
    }

    fn on_max_output_tokens_change(&mut self, value: u64) {
        self.fields.max_output_tokens = value;
        self.resync();
    }

    fn on_no_image_support_change(&mut self, value: bool) {
        self.fields.no_image_support = value;
        self.resync();
    }
}
