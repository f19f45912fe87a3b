// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - mesh import

mod importer;
mod loader;

pub use importer::{MeshImporter, ObjImporter, StlImporter};
pub use loader::{demo_mesh, LoadedMesh, MeshLoader, MeshSource};
