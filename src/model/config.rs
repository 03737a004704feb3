use serde::{Deserialize, Serialize};

/// Configuration from intake.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Whether duplicates start pre-selected in the confirmation step
    #[serde(default = "default_true")]
    pub preselect_duplicates: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            preselect_duplicates: true,
        }
    }
}

fn default_true() -> bool {
    true
}
