use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::HexiconError;

pub const CONFIG_FILE_NAME: &str = ".hexiconrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the namespace declarations, relative to the project root.
    #[serde(default)]
    pub definitions_path: String,
    /// Directory scanned for usages; the project root when absent.
    #[serde(default)]
    pub scan_path: Option<String>,
    #[serde(default)]
    pub resources_path: String,
    #[serde(default)]
    pub development_language: Option<String>,
    #[serde(default)]
    pub use_custom_bundle: bool,
    #[serde(default)]
    pub use_table_name: bool,
    #[serde(default)]
    pub strip_empty_comments: bool,
    #[serde(default)]
    pub skip_malformed_tables: bool,
    #[serde(default = "default_extraction_tool")]
    pub extraction_tool: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_extraction_tool() -> Vec<String> {
    ["xcrun", "extractLocStrings"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            definitions_path: String::new(),
            scan_path: None,
            resources_path: String::new(),
            development_language: None,
            use_custom_bundle: false,
            use_table_name: false,
            strip_empty_comments: false,
            skip_malformed_tables: false,
            extraction_tool: default_extraction_tool(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Every `ignores` entry must be a valid glob and the extraction tool
    /// needs at least a program name.
    pub fn validate(&self) -> Result<(), HexiconError> {
        for pattern in &self.ignores {
            Pattern::new(pattern).map_err(|err| {
                HexiconError::invalid_arguments(format!(
                    "Invalid glob pattern in 'ignores': \"{}\": {}",
                    pattern, err
                ))
            })?;
        }

        if self.extraction_tool.first().is_none_or(|program| program.is_empty()) {
            return Err(HexiconError::invalid_arguments(
                "'extractionTool' must name a program",
            ));
        }

        Ok(())
    }
}

impl Config {
    /// Read, parse and validate the config file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }
}

/// Walk up from `start_dir` to the nearest `.hexiconrc.json`. The search stops
/// at the repository root, marked by a `.git` entry.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Configuration together with the file it came from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when no config file was found and defaults are in use.
    pub file: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<LoadedConfig> {
    let Some(file) = find_config_file(start_dir) else {
        return Ok(LoadedConfig {
            config: Config::default(),
            file: None,
        });
    };
    Ok(LoadedConfig {
        config: Config::from_file(&file)?,
        file: Some(file),
    })
}
