use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::commands;
use crate::config::DroidPaths;
use crate::invoke::InvokeRequest;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The command ran and failed; the message is the backend's own.
    #[error("{0}")]
    Remote(String),
    #[error("Unexpected result from {command}: {source}")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The channel named commands travel over. Takes zero or one JSON argument
/// object and yields a JSON result.
#[async_trait]
pub trait InvocationBridge: Send + Sync {
    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value, BridgeError>;
}

#[async_trait]
impl<B: InvocationBridge + ?Sized> InvocationBridge for std::sync::Arc<B> {
    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value, BridgeError> {
        (**self).invoke(command, args).await
    }
}

/// Runs commands in-process against a Droid directory.
pub struct LocalBridge {
    paths: DroidPaths,
}

impl LocalBridge {
    pub fn new(paths: DroidPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DroidPaths {
        &self.paths
    }
}

#[async_trait]
impl InvocationBridge for LocalBridge {
    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value, BridgeError> {
        let request = InvokeRequest::new(command, args);
        let response = commands::dispatch(&self.paths, &request);

        debug!(id = request.id, command, ok = response.is_success(), "Command completed");
        response
            .into_result()
            .map_err(|error| BridgeError::Remote(error.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_bridge() -> (tempfile::TempDir, LocalBridge) {
        let dir = tempfile::tempdir().unwrap();
        let bridge = LocalBridge::new(DroidPaths::new(dir.path().join(".factory")));
        (dir, bridge)
    }

    #[tokio::test]
    async fn local_bridge_runs_commands() {
        let (_dir, bridge) = test_bridge();
        let result = bridge
            .invoke("set_droid_config", Some(json!({"config": {"x": 1}})))
            .await
            .unwrap();
        assert_eq!(result, json!(true));
        assert!(bridge.paths().config_path().exists());
    }

    #[tokio::test]
    async fn local_bridge_surfaces_backend_message() {
        let (_dir, bridge) = test_bridge();
        let err = bridge.invoke("no_such_command", None).await.unwrap_err();
        assert!(matches!(err, BridgeError::Remote(_)));
        assert_eq!(err.to_string(), "Unknown command: no_such_command");
    }

    #[tokio::test]
    async fn local_bridge_reports_invalid_args_without_writing() {
        let (_dir, bridge) = test_bridge();
        let err = bridge.invoke("set_droid_config", Some(json!({}))).await.unwrap_err();
        assert!(matches!(err, BridgeError::Remote(_)));
        assert!(!bridge.paths().config_path().exists());
    }

    #[tokio::test]
    async fn arc_bridge_forwards() {
        let (_dir, bridge) = test_bridge();
        let shared = std::sync::Arc::new(bridge);
        let path = shared.invoke("get_droid_config_path", None).await.unwrap();
        assert!(path.as_str().unwrap().ends_with("config.json"));
    }
}
