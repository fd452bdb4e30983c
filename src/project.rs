use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::NcError;

/// Project id -> storage path, read once from a JSON object.
/// Keys are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct PathMap {
    paths: HashMap<String, String>,
}

impl PathMap {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read path map: {:?}", path))?;
        Self::from_json_str(&text).with_context(|| format!("Failed to parse path map: {:?}", path))
    }

    pub fn from_json_str(text: &str) -> Result<Self, NcError> {
        let raw: HashMap<String, String> = serde_json::from_str(text)?;
        Ok(raw.into_iter().collect())
    }

    pub fn get_path(&self, project: &str) -> Result<&str, NcError> {
        match self.paths.get(&project.to_lowercase()) {
            Some(path) => Ok(path.as_str()),
            None => {
                log::warn!("project not found: {project}");
                Err(NcError::ProjectNotFound(project.to_string()))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<(String, String)> for PathMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            paths: iter
                .into_iter()
                .map(|(id, path)| (id.to_lowercase(), path))
                .collect(),
        }
    }
}
