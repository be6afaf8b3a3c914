use serde::{Deserialize, Serialize};

/// Output limit Droid applies when a custom model does not set one.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u64 = 131072;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderTag {
    #[default]
    Anthropic,
    GenericChatCompletionApi,
}

impl ProviderTag {
    pub const ALL: [ProviderTag; 2] = [ProviderTag::Anthropic, ProviderTag::GenericChatCompletionApi];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderTag::Anthropic => "anthropic",
            ProviderTag::GenericChatCompletionApi => "generic-chat-completion-api",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

/// The editable part of a custom model entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFields {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub max_output_tokens: u64,
    pub no_image_support: bool,
    pub provider: ProviderTag,
}

impl Default for ModelFields {
    fn default() -> Self {
        Self {
            model: String::new(),
            base_url: String::new(),
            api_key: String::new(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            no_image_support: false,
            provider: ProviderTag::Anthropic,
        }
    }
}

/// One entry of Droid's `customModels`, as shown in the JSON editor.
/// Field order here is the key order of the rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderModelDescriptor {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub display_name: String,
    pub max_output_tokens: u64,
    pub no_image_support: bool,
    pub provider: ProviderTag,
}

impl ProviderModelDescriptor {
    pub fn new(fields: &ModelFields, display_name: &str) -> Self {
        Self {
            model: fields.model.clone(),
            base_url: fields.base_url.clone(),
            api_key: fields.api_key.clone(),
            display_name: display_name.to_string(),
            max_output_tokens: fields.max_output_tokens,
            no_image_support: fields.no_image_support,
            provider: fields.provider,
        }
    }

    pub fn fields(&self) -> ModelFields {
        ModelFields {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            max_output_tokens: self.max_output_tokens,
            no_image_support: self.no_image_support,
            provider: self.provider,
        }
    }
}
