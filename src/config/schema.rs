use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "models/loan_default.yaml";
pub const DEFAULT_ASSET_PATH: &str = "assets/loan_default.jpg";

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

fn default_asset_path() -> PathBuf {
    PathBuf::from(DEFAULT_ASSET_PATH)
}

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// model_path: models/loan_default.yaml
/// asset_path: assets/loan_default.jpg
/// theme: auto
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Classifier artifact, relative to the working directory unless absolute
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Optional banner image; a missing file only produces a warning
    #[serde(default = "default_asset_path")]
    pub asset_path: PathBuf,

    #[serde(default)]
    pub theme: ThemeSetting,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            asset_path: default_asset_path(),
            theme: ThemeSetting::default(),
        }
    }
}

/// Terminal colour scheme selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}
