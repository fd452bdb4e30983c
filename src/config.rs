use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::diagnostics::DEFAULT_HISTORY;

#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "ViewerConfig::default_pathmap")]
    pub pathmap: PathBuf,
    #[serde(default)]
    pub geometry_dir: Option<PathBuf>,
    #[serde(default = "ViewerConfig::default_trace_capacity")]
    pub trace_capacity: usize,
    #[serde(default = "ViewerConfig::default_history_limit")]
    pub history_limit: usize,
}

impl ViewerConfig {
    fn default_pathmap() -> PathBuf {
        PathBuf::from("data/pathmap.json")
    }

    const fn default_trace_capacity() -> usize {
        1024
    }

    const fn default_history_limit() -> usize {
        DEFAULT_HISTORY
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config: {:?}", path))
    }

    /// Config file (if given) with command-line flags layered on top
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(pathmap) = &cli.pathmap {
            config.pathmap = pathmap.clone();
        }
        if let Some(dir) = &cli.geometry_dir {
            config.geometry_dir = Some(dir.clone());
        }
        if let Some(capacity) = cli.trace_capacity {
            config.trace_capacity = capacity;
        }
        Ok(config)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pathmap: Self::default_pathmap(),
            geometry_dir: None,
            trace_capacity: Self::default_trace_capacity(),
            history_limit: Self::default_history_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_fields_take_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{"trace_capacity": 8}"#).unwrap();
        assert_eq!(config.trace_capacity, 8);
        assert_eq!(config.history_limit, DEFAULT_HISTORY);
        assert_eq!(config.pathmap, PathBuf::from("data/pathmap.json"));
        assert!(config.geometry_dir.is_none());
    }

    #[test]
    fn cli_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("viewer.json");
        fs::write(&file, r#"{"pathmap": "a.json", "trace_capacity": 8}"#).unwrap();

        let cli = Cli::parse_from([
            "nc-scene",
            "--config",
            file.to_str().unwrap(),
            "--trace-capacity",
            "64",
            "boxy",
        ]);
        let config = ViewerConfig::from_cli(&cli).unwrap();
        assert_eq!(config.pathmap, PathBuf::from("a.json"));
        assert_eq!(config.trace_capacity, 64);
    }
}
