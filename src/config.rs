use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{MetanavError, Result};

/// Name of the configuration file stored inside the `.metanav` directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the hidden directory used to store metanav settings.
pub const METANAV_DIR: &str = ".metanav";

/// Configuration for navigating a metadata document.
///
/// Controls which entity types are treated as internal, how collection types
/// are recognised, and which parameter marks a bound function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetanavConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Substrings marking internal/system entity types hidden from search.
    pub hidden_markers: Vec<String>,
    /// Prefix of entity names that wrap a collection type.
    pub collection_prefix: String,
    /// Name of the implicit binding parameter, not counted as a real argument.
    pub bound_parameter: String,
    /// Metadata document used by the CLI when `--metadata` is not given.
    pub metadata_file: Option<String>,
}

impl Default for MetanavConfig {
    fn default() -> Self {
        Self {
            version: 1,
            hidden_markers: vec!["SP.Data.".to_string()],
            collection_prefix: "Collection(".to_string(),
            bound_parameter: "this".to_string(),
            metadata_file: None,
        }
    }
}

impl MetanavConfig {
    /// Returns true if the entity name carries any hidden marker.
    pub fn is_hidden(&self, full_name: &str) -> bool {
        self.hidden_markers
            .iter()
            .any(|marker| !marker.is_empty() && full_name.contains(marker.as_str()))
    }

    /// Returns true if the entity name denotes a collection type.
    pub fn is_collection(&self, full_name: &str) -> bool {
        !self.collection_prefix.is_empty() && full_name.starts_with(&self.collection_prefix)
    }
}

/// Returns the path to the `.metanav` directory within the given project root.
pub fn get_metanav_dir(project_root: &Path) -> PathBuf {
    project_root.join(METANAV_DIR)
}

/// Returns the path to the configuration file (`config.json`) within the `.metanav` directory.
pub fn get_config_path(project_root: &Path) -> PathBuf {
    get_metanav_dir(project_root).join(CONFIG_FILENAME)
}

/// Loads the configuration from disk.
///
/// If the configuration file does not exist, returns the default configuration.
pub fn load_config(project_root: &Path) -> Result<MetanavConfig> {
    let config_path = get_config_path(project_root);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(MetanavConfig::default());
    }

    let contents = fs::read_to_string(&config_path).map_err(|e| MetanavError::Config {
        message: format!(
            "failed to read config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    let config: MetanavConfig =
        serde_json::from_str(&contents).map_err(|e| MetanavError::Config {
            message: format!(
                "failed to parse config file '{}': {}",
                config_path.display(),
                e
            ),
        })?;

    Ok(config)
}

/// Saves the configuration to disk using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final location.
pub fn save_config(project_root: &Path, config: &MetanavConfig) -> Result<()> {
    let metanav_dir = get_metanav_dir(project_root);
    fs::create_dir_all(&metanav_dir).map_err(|e| MetanavError::Config {
        message: format!(
            "failed to create metanav directory '{}': {}",
            metanav_dir.display(),
            e
        ),
    })?;

    let config_path = get_config_path(project_root);
    let tmp_path = config_path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| MetanavError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| MetanavError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, &config_path).map_err(|e| MetanavError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            config_path.display(),
            e
        ),
    })?;

    Ok(())
}
