// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Importer selection and the labeled demo fallback

use super::importer::{MeshImporter, ObjImporter, StlImporter};
use crate::error::ImportError;
use crate::geometry::{Mesh, Primitive};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Edge length of the demo box at scale 1
const DEMO_BOX_SIZE: f64 = 80.0;
/// File size in bytes mapped to scale 1
const DEMO_BYTES_PER_SCALE: f64 = 100_000.0;

/// Where an analyzed mesh came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MeshSource {
    /// Imported from the file by the named importer
    File { importer: String },
    /// Placeholder geometry; the file could not be imported
    Demo { reason: String },
}

impl MeshSource {
    pub fn is_demo(&self) -> bool {
        matches!(self, MeshSource::Demo { .. })
    }
}

#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub mesh: Mesh,
    pub source: MeshSource,
}

/// Dispatches files to importers by extension
#[derive(Clone)]
pub struct MeshLoader {
    importers: Vec<Arc<dyn MeshImporter>>,
    demo_fallback: bool,
}

impl MeshLoader {
    /// Loader over an explicit set of importers; earlier entries win
    pub fn new(importers: Vec<Arc<dyn MeshImporter>>) -> Self {
        Self {
            importers,
            demo_fallback: false,
        }
    }

    /// STL and OBJ
    pub fn standard() -> Self {
        Self::new(vec![Arc::new(StlImporter), Arc::new(ObjImporter)])
    }

    pub fn with_importer(mut self, importer: Arc<dyn MeshImporter>) -> Self {
        self.importers.push(importer);
        self
    }

    /// Substitute a labeled demo mesh when a supported file fails to import
    pub fn with_demo_fallback(mut self, enabled: bool) -> Self {
        self.demo_fallback = enabled;
        self
    }

    /// All extensions some importer accepts, sorted and unique
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = self
            .importers
            .iter()
            .flat_map(|i| i.extensions().iter().copied())
            .collect();
        extensions.sort_unstable();
        extensions.dedup();
        extensions
    }

    pub fn supports(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.importer_for(&ext).is_some())
    }

    fn importer_for(&self, extension: &str) -> Option<&Arc<dyn MeshImporter>> {
        self.importers.iter().find(|i| i.supports(extension))
    }

    pub fn load(&self, path: &Path) -> Result<LoadedMesh, ImportError> {
        let extension = extension_of(path).unwrap_or_default();
        let importer = self
            .importer_for(&extension)
            .ok_or_else(|| ImportError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.clone(),
                supported: self.supported_extensions().join(", "),
            })?;

        match importer.import(path).and_then(|mesh| non_empty(path, mesh)) {
            Ok(mesh) => {
                info!(
                    path = %path.display(),
                    importer = importer.name(),
                    vertices = mesh.vertex_count(),
                    faces = mesh.triangle_count(),
                    "loaded mesh"
                );
                Ok(LoadedMesh {
                    mesh,
                    source: MeshSource::File {
                        importer: importer.name().to_string(),
                    },
                })
            }
            Err(err) if self.demo_fallback => {
                warn!(path = %path.display(), error = %err, "import failed, using demo geometry");
                Ok(LoadedMesh {
                    mesh: demo_mesh(file_size(path)),
                    source: MeshSource::Demo {
                        reason: err.to_string(),
                    },
                })
            }
            Err(err) => Err(err),
        }
    }
}

impl Default for MeshLoader {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for MeshLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshLoader")
            .field("importers", &self.importers.iter().map(|i| i.name()).collect::<Vec<_>>())
            .field("demo_fallback", &self.demo_fallback)
            .finish()
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn non_empty(path: &Path, mesh: Mesh) -> Result<Mesh, ImportError> {
    if mesh.is_empty() {
        return Err(ImportError::ImportFailed {
            path: path.to_path_buf(),
            reason: "file contains no triangles".into(),
        });
    }
    Ok(mesh)
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Centered box sized by the failed file: scale is bytes / 100 kB,
/// clamped to [0.5, 2]
pub fn demo_mesh(file_size: u64) -> Mesh {
    let scale = (file_size as f64 / DEMO_BYTES_PER_SCALE).clamp(0.5, 2.0);
    let size = DEMO_BOX_SIZE * scale;
    Primitive::cube(Vector3::new(size, size, size), true).to_mesh()
}
