use serde::{Deserialize, Serialize};

/// Whether Droid's `config.json` exists, and where it is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStatus {
    pub exists: bool,
    pub path: String,
}
