use serde::{Deserialize, Serialize};

fn default_store_key() -> String {
    "deutsch-glanz-words".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the library file; platform data dir when unset
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default = "default_store_key")]
    pub store_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            store_key: default_store_key(),
        }
    }
}
