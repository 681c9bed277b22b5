use serde::{Deserialize, Serialize};

use super::generator::GenerationOptions;
use super::record::DEFAULT_CATEGORY;

/// Storage key the record collection is written under. Not configurable:
/// moving it would strand the existing blob.
pub const DEFAULT_STORAGE_KEY: &str = "password_manager_entries";

/// Top-level vault configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VaultSettings {
    pub default_category: String,
    pub generator: GenerationOptions,
    pub log_level: String,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            generator: GenerationOptions::default(),
            log_level: "info".to_string(),
        }
    }
}
