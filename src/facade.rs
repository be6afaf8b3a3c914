//! Typed front for the Droid config commands. Every method is exactly one
//! bridge call: no retries, no caching, failures passed through as-is.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::bridge::{BridgeError, InvocationBridge};
use crate::commands::names;
use crate::types::config::ConfigStatus;

pub struct ConfigFacade<B> {
    bridge: B,
}

impl<B: InvocationBridge> ConfigFacade<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    async fn call<T: DeserializeOwned>(
        &self,
        command: &str,
        args: Option<Value>,
    ) -> Result<T, BridgeError> {
        let value = self.bridge.invoke(command, args).await?;
        serde_json::from_value(value).map_err(|source| BridgeError::Decode {
            command: command.to_string(),
            source,
        })
    }

    /// Droid's runtime `settings.json`.
    pub async fn get_settings(&self) -> Result<Map<String, Value>, BridgeError> {
        self.call(names::GET_SETTINGS, None).await
    }

    pub async fn get_config_status(&self) -> Result<ConfigStatus, BridgeError> {
        self.call(names::GET_CONFIG_STATUS, None).await
    }

    /// Droid's main `config.json`.
    pub async fn get_config(&self) -> Result<Map<String, Value>, BridgeError> {
        self.call(names::GET_CONFIG, None).await
    }

    pub async fn set_config(&self, config: &Map<String, Value>) -> Result<bool, BridgeError> {
        self.call(names::SET_CONFIG, Some(json!({ "config": config })))
            .await
    }

    pub async fn cleanup_settings(&self) -> Result<bool, BridgeError> {
        self.call(names::CLEANUP_SETTINGS, None).await
    }

    pub async fn get_config_path(&self) -> Result<String, BridgeError> {
        self.call(names::GET_CONFIG_PATH, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::LocalBridge;
    use crate::config::DroidPaths;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records calls and answers from a fixed script.
    struct ScriptedBridge {
        calls: Mutex<Vec<(String, Option<Value>)>>,
        reply: Result<Value, String>,
    }

    impl ScriptedBridge {
        fn replying(reply: Result<Value, String>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> Vec<(String, Option<Value>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InvocationBridge for ScriptedBridge {
        async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value, BridgeError> {
            self.calls.lock().unwrap().push((command.to_string(), args));
            self.reply.clone().map_err(BridgeError::Remote)
        }
    }

    #[tokio::test]
    async fn each_operation_is_one_call_to_its_command() {
        let facade = ConfigFacade::new(ScriptedBridge::replying(Ok(json!(true))));
        assert!(facade.cleanup_settings().await.unwrap());

        let mut config = Map::new();
        config.insert("k".to_string(), json!("v"));
        assert!(facade.set_config(&config).await.unwrap());

        let calls = facade.bridge().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("cleanup_droid_settings".to_string(), None));
        assert_eq!(
            calls[1],
            ("set_droid_config".to_string(), Some(json!({"config": {"k": "v"}})))
        );
    }

    #[tokio::test]
    async fn remote_failure_is_passed_through_unmodified() {
        let facade = ConfigFacade::new(ScriptedBridge::replying(Err("disk on fire".to_string())));
        let err = facade.get_config().await.unwrap_err();
        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(facade.bridge().calls().len(), 1);
    }

    #[tokio::test]
    async fn wrong_shaped_result_is_a_decode_error() {
        let facade = ConfigFacade::new(ScriptedBridge::replying(Ok(json!("not a status"))));
        let err = facade.get_config_status().await.unwrap_err();
        assert!(matches!(err, BridgeError::Decode { ref command, .. } if command == "get_droid_config_status"));
    }

    #[tokio::test]
    async fn facade_over_local_bridge() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DroidPaths::new(dir.path().join(".factory"));
        let facade = ConfigFacade::new(LocalBridge::new(paths.clone()));

        let status = facade.get_config_status().await.unwrap();
        assert!(!status.exists);
        assert_eq!(facade.get_config_path().await.unwrap(), status.path);
        assert!(facade.get_config().await.unwrap().is_empty());
        assert!(facade.get_settings().await.unwrap().is_empty());

        let mut config = Map::new();
        config.insert("customModels".to_string(), json!([{"model": "m"}]));
        assert!(facade.set_config(&config).await.unwrap());
        assert_eq!(facade.get_config().await.unwrap(), config);
        assert!(facade.get_config_status().await.unwrap().exists);

        crate::droid_config::write_settings(
            &paths,
            &json!({"customModels": [], "sessionDefaultSettings": {"model": "x"}}),
        )
        .unwrap();
        assert!(facade.cleanup_settings().await.unwrap());
        let settings = facade.get_settings().await.unwrap();
        assert!(settings.get("customModels").is_none());
        assert_eq!(settings["sessionDefaultSettings"], json!({}));
    }
}
