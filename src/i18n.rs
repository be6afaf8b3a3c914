use serde::{Deserialize, Serialize};

/// UI language for the few messages this crate produces itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Accepts `en`, `zh` and POSIX-style tags such as `zh_CN.UTF-8`.
    pub fn parse(tag: &str) -> Option<Self> {
        let lang = tag
            .split(|c: char| c == '_' || c == '-' || c == '.')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    pub fn invalid_json(&self) -> &'static str {
        match self {
            Locale::En => "Invalid JSON format",
            Locale::Zh => "JSON 格式无效",
        }
    }
}
