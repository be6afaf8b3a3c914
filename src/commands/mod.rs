pub mod droid;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::DroidPaths;
use crate::invoke::{codes, InvokeRequest, InvokeResponse};

/// Command names the desktop frontend invokes.
pub mod names {
    pub const GET_SETTINGS: &str = "get_droid_settings";
    pub const GET_CONFIG_STATUS: &str = "get_droid_config_status";
    pub const GET_CONFIG: &str = "get_droid_config";
    pub const SET_CONFIG: &str = "set_droid_config";
    pub const CLEANUP_SETTINGS: &str = "cleanup_droid_settings";
    pub const GET_CONFIG_PATH: &str = "get_droid_config_path";
    pub const SYNC_CUSTOM_MODEL: &str = "sync_droid_custom_model";
    pub const REMOVE_CUSTOM_MODEL: &str = "remove_droid_custom_model";
    pub const IMPORT_DEFAULT_MODEL: &str = "import_droid_default_model";
}

fn required_arg<'a>(request: &'a InvokeRequest, name: &str) -> Result<&'a Value, InvokeResponse> {
    request.arg(name).ok_or_else(|| {
        InvokeResponse::err(
            request.id,
            codes::INVALID_ARGS,
            format!("Missing argument '{}' for {}", name, request.command),
        )
    })
}

fn required_str<'a>(request: &'a InvokeRequest, name: &str) -> Result<&'a str, InvokeResponse> {
    required_arg(request, name)?.as_str().ok_or_else(|| {
        InvokeResponse::err(
            request.id,
            codes::INVALID_ARGS,
            format!("Argument '{}' for {} must be a string", name, request.command),
        )
    })
}

fn respond<T: Into<Value>>(id: u64, result: Result<T, String>) -> InvokeResponse {
    match result {
        Ok(value) => InvokeResponse::ok(id, value.into()),
        Err(message) => InvokeResponse::err(id, codes::COMMAND_FAILED, message),
    }
}

/// Route a named command to its handler.
pub fn dispatch(paths: &DroidPaths, request: &InvokeRequest) -> InvokeResponse {
    debug!(id = request.id, command = %request.command, "Dispatching command");
    let id = request.id;
    let response = match request.command.as_str() {
        names::GET_SETTINGS => respond(id, droid::get_droid_settings_at(paths)),
        names::GET_CONFIG_STATUS => {
            let status = droid::get_droid_config_status_at(paths);
            InvokeResponse::ok(id, json!(status))
        }
        names::GET_CONFIG => respond(id, droid::get_droid_config_at(paths)),
        names::SET_CONFIG => match required_arg(request, "config") {
            Ok(config) => respond(id, droid::set_droid_config_at(paths, config)),
            Err(resp) => resp,
        },
        names::CLEANUP_SETTINGS => respond(id, droid::cleanup_droid_settings_at(paths)),
        names::GET_CONFIG_PATH => InvokeResponse::ok(id, json!(droid::get_droid_config_path_at(paths))),
        names::SYNC_CUSTOM_MODEL => {
            match (
                required_arg(request, "settingsConfig"),
                required_str(request, "providerName"),
            ) {
                (Ok(config), Ok(name)) => {
                    respond(id, droid::sync_droid_custom_model_at(paths, config, name))
                }
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        names::REMOVE_CUSTOM_MODEL => match required_str(request, "providerName") {
            Ok(name) => respond(id, droid::remove_droid_custom_model_at(paths, name)),
            Err(resp) => resp,
        },
        names::IMPORT_DEFAULT_MODEL => respond(id, droid::import_droid_default_model_at(paths)),
        other => InvokeResponse::err(
            id,
            codes::UNKNOWN_COMMAND,
            format!("Unknown command: {}", other),
        ),
    };
    if let Some(error) = &response.error {
        warn!(id, command = %request.command, code = error.code, message = %error.message, "Command failed");
    }
    response
}
