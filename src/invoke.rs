use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

pub mod codes {
    pub const UNKNOWN_COMMAND: i32 = -32601;
    pub const INVALID_ARGS: i32 = -32602;
    pub const COMMAND_FAILED: i32 = -32000;
}

/// A named command call crossing the invocation bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub id: u64,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<InvokeError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeError {
    pub code: i32,
    pub message: String,
}

impl InvokeRequest {
    pub fn new(command: &str, args: Option<serde_json::Value>) -> Self {
        Self {
            id: REQUEST_ID.fetch_add(1, Ordering::SeqCst),
            command: command.to_string(),
            args,
        }
    }

    /// Named argument, as Tauri passes them.
    pub fn arg(&self, name: &str) -> Option<&serde_json::Value> {
        self.args.as_ref().and_then(|a| a.get(name))
    }
}

impl InvokeResponse {
    pub fn ok(id: u64, result: serde_json::Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: u64, code: i32, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(InvokeError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// A success without a result carries `null`.
    pub fn into_result(self) -> Result<serde_json::Value, InvokeError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result.unwrap_or(serde_json::Value::Null)),
        }
    }
}
