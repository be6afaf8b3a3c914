//! Input controls for the Droid provider form.
//!
//! Rendering is a pure function of caller-owned state; user input comes back
//! as [`FieldEvent`]s routed to the caller's [`FieldHandlers`].

use serde::{Deserialize, Serialize};

use crate::types::provider::{ModelFields, ProviderTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    ProviderName,
    BaseUrl,
    ApiKey,
    Model,
    Provider,
    MaxOutputTokens,
    NoImageSupport,
}

impl FieldId {
    /// Translation key for the field label.
    pub fn label_key(&self) -> &'static str {
        match self {
            FieldId::ProviderName => "droid.form.providerName",
            FieldId::BaseUrl => "droid.form.baseUrl",
            FieldId::ApiKey => "droid.form.apiKey",
            FieldId::Model => "droid.form.model",
            FieldId::Provider => "droid.form.providerType",
            FieldId::MaxOutputTokens => "droid.form.maxOutputTokens",
            FieldId::NoImageSupport => "droid.form.noImageSupport",
        }
    }
}

/// How the provider is sourced; official providers need no key from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCategory {
    Official,
    CnOfficial,
    Aggregator,
    ThirdParty,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Url,
    Secret,
    Number,
    Choice(Vec<ProviderTag>),
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    Text(String),
    Number(u64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub field: FieldId,
    pub kind: ControlKind,
    pub value: ControlValue,
}

/// Everything the form renders from. Borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    pub provider_name: &'a str,
    pub fields: &'a ModelFields,
    pub show_api_key: bool,
    pub category: Option<ProviderCategory>,
}

impl FormView<'_> {
    pub fn api_key_visible(&self) -> bool {
        self.show_api_key && self.category != Some(ProviderCategory::Official)
    }
}

pub fn render(view: &FormView<'_>) -> Vec<Control> {
    let text = |field, kind, value: &str| Control {
        field,
        kind,
        value: ControlValue::Text(value.to_string()),
    };

    let mut controls = vec![
        text(FieldId::ProviderName, ControlKind::Text, view.provider_name),
        text(FieldId::BaseUrl, ControlKind::Url, &view.fields.base_url),
    ];
    if view.api_key_visible() {
        controls.push(text(FieldId::ApiKey, ControlKind::Secret, &view.fields.api_key));
    }
    controls.push(text(FieldId::Model, ControlKind::Text, &view.fields.model));
    controls.push(Control {
        field: FieldId::Provider,
        kind: ControlKind::Choice(ProviderTag::ALL.to_vec()),
        value: ControlValue::Text(view.fields.provider.as_str().to_string()),
    });
    controls.push(Control {
        field: FieldId::MaxOutputTokens,
        kind: ControlKind::Number,
        value: ControlValue::Number(view.fields.max_output_tokens),
    });
    controls.push(Control {
        field: FieldId::NoImageSupport,
        kind: ControlKind::Toggle,
        value: ControlValue::Bool(view.fields.no_image_support),
    });
    controls
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    ProviderName(String),
    BaseUrl(String),
    ApiKey(String),
    Model(String),
    Provider(ProviderTag),
    MaxOutputTokens(u64),
    NoImageSupport(bool),
}

/// Turn raw widget input into a change event. Input a control could not
/// have produced (a non-numeric token count, an unknown tag) yields `None`.
pub fn input(field: FieldId, raw: &str) -> Option<FieldEvent> {
    match field {
        FieldId::ProviderName => Some(FieldEvent::ProviderName(raw.to_string())),
        FieldId::BaseUrl => Some(FieldEvent::BaseUrl(raw.to_string())),
        FieldId::ApiKey => Some(FieldEvent::ApiKey(raw.to_string())),
        FieldId::Model => Some(FieldEvent::Model(raw.to_string())),
        FieldId::Provider => ProviderTag::parse(raw).map(FieldEvent::Provider),
        FieldId::MaxOutputTokens => raw.trim().parse().ok().map(FieldEvent::MaxOutputTokens),
        FieldId::NoImageSupport => raw.parse().ok().map(FieldEvent::NoImageSupport),
    }
}

/// Per-field change handlers supplied by the form's owner.
pub trait FieldHandlers {
    fn on_provider_name_change(&mut self, value: String);
    fn on_base_url_change(&mut self, value: String);
    fn on_api_key_change(&mut self, value: String);
    fn on_model_change(&mut self, value: String);
    fn on_provider_change(&mut self, value: ProviderTag);
    fn on_max_output_tokens_change(&mut self, value: u64);
    fn on_no_image_support_change(&mut self, value: bool);
}

pub fn dispatch<H: FieldHandlers + ?Sized>(event: FieldEvent, handlers: &mut H) {
    match event {
        FieldEvent::ProviderName(v) => handlers.on_provider_name_change(v),
        FieldEvent::BaseUrl(v) => handlers.on_base_url_change(v),
        FieldEvent::ApiKey(v) => handlers.on_api_key_change(v),
        FieldEvent::Model(v) => handlers.on_model_change(v),
        FieldEvent::Provider(v) => handlers.on_provider_change(v),
        FieldEvent::MaxOutputTokens(v) => handlers.on_max_output_tokens_change(v),
        FieldEvent::NoImageSupport(v) => handlers.on_no_image_support_change(v),
    }
}
