use std::path::PathBuf;

use tracing::debug;

use crate::error::AppError;
use crate::i18n::Locale;

/// Overrides the Droid directory (normally `~/.factory`).
pub const DROID_DIR_ENV: &str = "DROID_CONFIG_DIR";
pub const LOCALE_ENV: &str = "DROID_SETTINGS_LOCALE";

/// Locations of the files Droid reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroidPaths {
    dir: PathBuf,
}

impl DroidPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Main config, edited by the user.
    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config.json")
    }

    /// Runtime settings, holding `customModels`.
    pub fn settings_path(&self) -> PathBuf {
        self.dir.join("settings.json")
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub droid: DroidPaths,
    pub locale: Locale,
}

impl AppConfig {
    /// Resolve from the process environment. Call `dotenvy::dotenv()` first
    /// if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    pub fn from_lookup<F>(lookup: F, home: Option<PathBuf>) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dir = match lookup(DROID_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            Some(custom) => PathBuf::from(custom.trim()),
            None => home
                .ok_or_else(|| AppError::Config("Could not determine home directory".to_string()))?
                .join(".factory"),
        };

        let locale = lookup(LOCALE_ENV)
            .or_else(|| lookup("LANG"))
            .and_then(|tag| Locale::parse(&tag))
            .unwrap_or_default();

        debug!(dir = %dir.display(), ?locale, "Resolved Droid settings config");
        Ok(Self {
            droid: DroidPaths::new(dir),
            locale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_factory_under_home() {
        let cfg = AppConfig::from_lookup(lookup(&[]), Some(PathBuf::from("/home/u"))).unwrap();
        assert_eq!(cfg.droid.dir(), std::path::Path::new("/home/u/.factory"));
        assert_eq!(cfg.droid.config_path(), PathBuf::from("/home/u/.factory/config.json"));
        assert_eq!(cfg.droid.settings_path(), PathBuf::from("/home/u/.factory/settings.json"));
        assert_eq!(cfg.locale, Locale::En);
    }

    #[test]
    fn override_dir_wins_over_home() {
        let cfg = AppConfig::from_lookup(
            lookup(&[(DROID_DIR_ENV, "/opt/droid")]),
            Some(PathBuf::from("/home/u")),
        )
        .unwrap();
        assert_eq!(cfg.droid.dir(), std::path::Path::new("/opt/droid"));
    }

    #[test]
    fn blank_override_is_ignored() {
        let cfg = AppConfig::from_lookup(
            lookup(&[(DROID_DIR_ENV, "  ")]),
            Some(PathBuf::from("/home/u")),
        )
        .unwrap();
        assert_eq!(cfg.droid.dir(), std::path::Path::new("/home/u/.factory"));
    }

    #[test]
    fn missing_home_without_override_fails() {
        assert!(AppConfig::from_lookup(lookup(&[]), None).is_err());
    }

    #[test]
    fn locale_prefers_explicit_setting_over_lang() {
        let cfg = AppConfig::from_lookup(
            lookup(&[(LOCALE_ENV, "zh"), ("LANG", "en_US.UTF-8")]),
            Some(PathBuf::from("/home/u")),
        )
        .unwrap();
        assert_eq!(cfg.locale, Locale::Zh);

        let cfg = AppConfig::from_lookup(lookup(&[("LANG", "zh_CN.UTF-8")]), Some(PathBuf::from("/h")))
            .unwrap();
        assert_eq!(cfg.locale, Locale::Zh);
    }
}
