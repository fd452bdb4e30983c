use anyhow::{bail, Context, Result};
use glam::Vec3;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{LoadCompletion, LoadDispatcher, LoadRequest};
use crate::types::{Geometry, Mesh, Polyline};

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum GeometryFile {
    Shell {
        vertices: Vec<[f32; 3]>,
        triangles: Vec<[u32; 3]>,
    },
    Polyline {
        lines: Vec<Vec<[f32; 3]>>,
    },
}

/// Decode one geometry document
pub fn parse_geometry(text: &str) -> Result<Geometry> {
    let file: GeometryFile = serde_json::from_str(text).context("Invalid geometry document")?;
    let geometry = match file {
        GeometryFile::Shell { vertices, triangles } => {
            let count = vertices.len() as u32;
            if let Some(bad) = triangles.iter().flatten().find(|&&i| i >= count) {
                bail!("Triangle index {} out of range for {} vertices", bad, count);
            }
            Geometry::Shell(Mesh::new(
                vertices.into_iter().map(Vec3::from_array).collect(),
                triangles,
            ))
        }
        GeometryFile::Polyline { lines } => Geometry::Polyline(
            lines
                .into_iter()
                .map(|points| Polyline::new(points.into_iter().map(Vec3::from_array).collect()))
                .collect(),
        ),
    };
    Ok(geometry)
}

pub fn load_geometry_file(path: impl AsRef<Path>) -> Result<Geometry> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read geometry file: {:?}", path))?;
    parse_geometry(&text).with_context(|| format!("Failed to load geometry file: {:?}", path))
}

/// Resolves each request to `<root>/<key>.json` and completes synchronously.
/// Missing or unreadable files are logged and left unloaded.
#[derive(Debug, Clone)]
pub struct FileDispatcher {
    root: PathBuf,
}

impl FileDispatcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl LoadDispatcher for FileDispatcher {
    fn dispatch(&mut self, batch: &[LoadRequest]) -> Vec<LoadCompletion> {
        batch
            .iter()
            .filter_map(|request| match load_geometry_file(self.path_for(&request.key)) {
                Ok(payload) if payload.kind() == request.kind => Some(LoadCompletion {
                    key: request.key.clone(),
                    payload,
                }),
                Ok(payload) => {
                    log::warn!(
                        "geometry {} is {:?}, expected {:?}",
                        request.key,
                        payload.kind(),
                        request.kind
                    );
                    None
                }
                Err(err) => {
                    log::warn!("{err:#}");
                    None
                }
            })
            .collect()
    }
}
