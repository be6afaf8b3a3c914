pub mod config;
pub mod provider;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn provider_tag_uses_kebab_case() {
        let json = serde_json::to_string(&provider::ProviderTag::GenericChatCompletionApi).unwrap();
        assert_eq!(json, "\"generic-chat-completion-api\"");
        let tag: provider::ProviderTag = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(tag, provider::ProviderTag::Anthropic);
    }

    #[test]
    fn provider_tag_parse_rejects_unknown() {
        assert_eq!(
            provider::ProviderTag::parse("generic-chat-completion-api"),
            Some(provider::ProviderTag::GenericChatCompletionApi)
        );
        assert_eq!(provider::ProviderTag::parse("openai"), None);
    }

    #[test]
    fn descriptor_serializes_camel_case_in_order() {
        let fields = provider::ModelFields {
            model: "m".to_string(),
            ..Default::default()
        };
        let desc = provider::ProviderModelDescriptor::new(&fields, "Name");
        let json = serde_json::to_string(&desc).unwrap();
        assert_eq!(
            json,
            r#"{"model":"m","baseUrl":"","apiKey":"","displayName":"Name","maxOutputTokens":131072,"noImageSupport":false,"provider":"anthropic"}"#
        );
        assert_eq!(desc.fields(), fields);
    }

    #[test]
    fn config_status_roundtrip() {
        let json = r#"{"exists": true, "path": "/home/user/.factory/config.json"}"#;
        let status: config::ConfigStatus = serde_json::from_str(json).unwrap();
        assert!(status.exists);
        assert_eq!(status.path, "/home/user/.factory/config.json");
    }
}
