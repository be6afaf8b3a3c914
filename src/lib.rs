pub mod bridge;
pub mod commands;
pub mod config;
pub mod droid_config;
pub mod error;
pub mod facade;
pub mod form;
pub mod i18n;
pub mod invoke;
pub mod keys;
pub mod live;
pub mod presenter;
pub mod sync;
pub mod theme;
pub mod types;

use tracing_subscriber::EnvFilter;

pub use bridge::{BridgeError, InvocationBridge, LocalBridge};
pub use config::{AppConfig, DroidPaths};
pub use error::AppError;
pub use facade::ConfigFacade;
pub use form::DroidProviderForm;
pub use sync::{fields_to_json, json_to_fields, JsonEditor};
pub use types::provider::{ModelFields, ProviderModelDescriptor, ProviderTag};

/// Initialize structured logging with tracing.
/// Respects RUST_LOG env var; defaults to `info` level for this crate.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("droid_settings=info"));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
    {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}

/// Load `.env` if present and resolve the config from the environment.
pub fn load_config() -> Result<AppConfig, AppError> {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

/// A facade talking to the Droid directory in-process.
pub fn local_facade(config: &AppConfig) -> ConfigFacade<LocalBridge> {
    ConfigFacade::new(LocalBridge::new(config.droid.clone()))
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve Droid config directory");
            std::process::exit(1);
        }
    };
    tracing::info!(dir = %config.droid.dir().display(), "Using Droid config directory");

    tauri::Builder::default()
        .manage(config.droid)
        .invoke_handler(tauri::generate_handler![
            commands::droid::get_droid_settings,
            commands::droid::get_droid_config_status,
            commands::droid::get_droid_config,
            commands::droid::set_droid_config,
            commands::droid::cleanup_droid_settings,
            commands::droid::get_droid_config_path,
            commands::droid::sync_droid_custom_model,
            commands::droid::remove_droid_custom_model,
            commands::droid::import_droid_default_model,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
