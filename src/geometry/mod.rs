// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and primitive queries

mod bbox;
mod hull;
mod mass;
mod mesh;
mod primitives;
mod topology;

pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle, Vertex};
pub use primitives::Primitive;
pub use topology::{Edge, EdgeTopology};
