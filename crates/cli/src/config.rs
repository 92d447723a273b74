//! `graphdoc.toml` loading and CLI overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "graphdoc.toml";

/// On-disk configuration; every field is optional
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source_dir: PathBuf,
    pub validate_graph: bool,
    pub suggested_graphs_dir: PathBuf,
    pub exclude: Vec<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/main/java"),
            validate_graph: true,
            suggested_graphs_dir: PathBuf::from("target/suggested-graphs"),
            exclude: Vec::new(),
        }
    }
}

impl FileConfig {
    /// Read `explicit` if given, else `graphdoc.toml` under `base_dir` when
    /// present, else defaults.
    pub fn load(base_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = base_dir.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    log::debug!("No {CONFIG_FILE_NAME} in {}", base_dir.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Effective settings after CLI flags are applied
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_dir: PathBuf,
    pub source_dir: PathBuf,
    pub validate_graph: bool,
    pub suggested_graphs_dir: PathBuf,
    pub exclude: Vec<String>,
}

/// Flags that take precedence over the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let base_dir = match overrides.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let file = FileConfig::load(&base_dir, overrides.config.as_deref())?;

        let source_dir = base_dir.join(overrides.source_dir.unwrap_or(file.source_dir));
        let suggested_graphs_dir =
            base_dir.join(overrides.out_dir.unwrap_or(file.suggested_graphs_dir));

        Ok(Self {
            base_dir,
            source_dir,
            validate_graph: file.validate_graph,
            suggested_graphs_dir,
            exclude: file.exclude,
        })
    }
}
