//! Contact endpoint settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub bind: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".into(),
        }
    }
}
