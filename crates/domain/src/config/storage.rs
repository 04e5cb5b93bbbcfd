use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_db_path(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_db_path() -> String {
    "cdnsight.db".to_string()
}
