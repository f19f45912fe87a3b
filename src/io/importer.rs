// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh importers for triangulated file formats

use crate::error::ImportError;
use crate::geometry::Mesh;
use nalgebra::Point3;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// A capability to turn a file into a triangulated mesh.
///
/// Importers are chosen by file extension. A STEP importer backed by a solid
/// kernel plugs in here; without one STEP files are rejected.
pub trait MeshImporter: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Lowercase extensions without the dot
    fn extensions(&self) -> &[&'static str];

    fn import(&self, path: &Path) -> Result<Mesh, ImportError>;

    fn supports(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

fn import_failed(path: &Path, reason: impl Into<String>) -> ImportError {
    ImportError::ImportFailed {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Binary and ASCII STL. Coincident vertices are merged by the reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlImporter;

impl MeshImporter for StlImporter {
    fn name(&self) -> &'static str {
        "stl"
    }

    fn extensions(&self) -> &[&'static str] {
        &["stl"]
    }

    fn import(&self, path: &Path) -> Result<Mesh, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let stl = stl_io::read_stl(&mut reader).map_err(|e| import_failed(path, e.to_string()))?;
        debug!(
            vertices = stl.vertices.len(),
            faces = stl.faces.len(),
            "read STL"
        );

        let positions = stl
            .vertices
            .iter()
            .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
            .collect();
        let faces = stl.faces.iter().map(|f| f.vertices).collect();

        Mesh::from_parts(positions, faces).map_err(|e| import_failed(path, e.to_string()))
    }
}

/// Wavefront OBJ; polygons are triangulated and all objects merged
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjImporter;

impl MeshImporter for ObjImporter {
    fn name(&self) -> &'static str {
        "obj"
    }

    fn extensions(&self) -> &[&'static str] {
        &["obj"]
    }

    fn import(&self, path: &Path) -> Result<Mesh, ImportError> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                // Position-only indices keep corners shared across `vn`/`vt`
                single_index: false,
                ..Default::default()
            },
        )
        .map_err(|e| import_failed(path, e.to_string()))?;

        if models.is_empty() {
            return Err(import_failed(path, "file contains no objects"));
        }

        let mut positions = Vec::new();
        let mut faces = Vec::new();
        for model in &models {
            let offset = positions.len();
            debug!(object = %model.name, "read OBJ object");

            positions.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|c| Point3::new(c[0] as f64, c[1] as f64, c[2] as f64)),
            );
            faces.extend(model.mesh.indices.chunks_exact(3).map(|c| {
                [
                    c[0] as usize + offset,
                    c[1] as usize + offset,
                    c[2] as usize + offset,
                ]
            }));
        }

        Mesh::from_parts(positions, faces).map_err(|e| import_failed(path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const TETRAHEDRON_STL: &str = "solid tet
facet normal 0 0 -1
 outer loop
  vertex 0 0 0
  vertex 0 1 0
  vertex 1 0 0
 endloop
endfacet
facet normal 0 -1 0
 outer loop
  vertex 0 0 0
  vertex 1 0 0
  vertex 0 0 1
 endloop
endfacet
facet normal -1 0 0
 outer loop
  vertex 0 0 0
  vertex 0 0 1
  vertex 0 1 0
 endloop
endfacet
facet normal 1 1 1
 outer loop
  vertex 1 0 0
  vertex 0 1 0
  vertex 0 0 1
 endloop
endfacet
endsolid tet
";

    #[test]
    fn test_stl_import() -> anyhow::Result<()> {
        let mut file = Builder::new().suffix(".stl").tempfile()?;
        file.write_all(TETRAHEDRON_STL.as_bytes())?;

        let mesh = StlImporter.import(file.path())?;
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.is_watertight());
        assert!((mesh.volume() - 1.0 / 6.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_obj_import() -> anyhow::Result<()> {
        let mut file = Builder::new().suffix(".obj").tempfile()?;
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4")?;

        let mesh = ObjImporter.import(file.path())?;
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!((mesh.area() - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_garbage_is_import_failed() -> anyhow::Result<()> {
        let mut file = Builder::new().suffix(".stl").tempfile()?;
        file.write_all(b"not an stl")?;

        let err = StlImporter.import(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::ImportFailed { .. }));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = StlImporter
            .import(Path::new("/definitely/not/here.stl"))
            .unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }

    #[test]
    fn test_supports_is_case_insensitive() {
        assert!(StlImporter.supports("STL"));
        assert!(!StlImporter.supports("obj"));
    }
}
