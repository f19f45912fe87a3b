// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and primitive geometric queries

use super::{mass, topology, BoundingBox, EdgeTopology};
use crate::error::MeshError;
use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z), Vector3::z())
    }
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Indexed triangular mesh.
///
/// This is the hand-off format between importers and the analyzer. Every
/// query here is read-only; nothing caches, so a `&Mesh` can be shared
/// freely across threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Build a mesh from raw positions and faces, checking every index and
    /// computing vertex normals.
    pub fn from_parts(
        positions: Vec<Point3<f64>>,
        faces: Vec<[usize; 3]>,
    ) -> Result<Self, MeshError> {
        let mut mesh = Self {
            vertices: positions
                .into_iter()
                .map(|p| Vertex::new(p, Vector3::z()))
                .collect(),
            triangles: faces.into_iter().map(Triangle::new).collect(),
        };
        mesh.validate()?;
        mesh.recompute_normals();
        Ok(mesh)
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Check that coordinates are finite and every face index is in range
    pub fn validate(&self) -> Result<(), MeshError> {
        if let Some(index) = self.vertices.iter().position(|v| {
            !(v.position.x.is_finite() && v.position.y.is_finite() && v.position.z.is_finite())
        }) {
            return Err(MeshError::NonFiniteVertex { index });
        }

        let vertex_count = self.vertices.len();
        for (face, triangle) in self.triangles.iter().enumerate() {
            if let Some(&index) = triangle.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Axis-aligned bounds
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    /// Positions of the three corners of a triangle
    pub fn corners(&self, triangle: &Triangle) -> [Point3<f64>; 3] {
        [
            self.vertices[triangle.indices[0]].position,
            self.vertices[triangle.indices[1]].position,
            self.vertices[triangle.indices[2]].position,
        ]
    }

    /// Edge lengths of a triangle, in winding order (v0v1, v1v2, v2v0)
    pub fn edge_lengths(&self, triangle: &Triangle) -> [f64; 3] {
        let [a, b, c] = self.corners(triangle);
        [(b - a).norm(), (c - b).norm(), (a - c).norm()]
    }

    /// Total surface area
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = self.corners(t);
                (b - a).cross(&(c - a)).norm() / 2.0
            })
            .sum()
    }

    /// Signed enclosed volume (positive for outward-facing winding)
    pub fn signed_volume(&self) -> f64 {
        mass::signed_volume(self)
    }

    /// Enclosed volume, ignoring winding direction
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Area-weighted centroid of the surface
    pub fn centroid(&self) -> Point3<f64> {
        mass::surface_centroid(self)
    }

    /// Unit-density inertia tensor about the center of mass, if the mesh
    /// encloses any volume
    pub fn moment_inertia(&self) -> Option<Matrix3<f64>> {
        mass::inertia_tensor(self)
    }

    /// Edge adjacency summary
    pub fn edge_topology(&self) -> EdgeTopology {
        EdgeTopology::build(self)
    }

    /// Closed surface: every edge is shared by exactly two triangles
    pub fn is_watertight(&self) -> bool {
        !self.is_empty() && self.edge_topology().is_closed()
    }

    /// Convex closed surface
    pub fn is_convex(&self) -> bool {
        super::hull::is_convex(self)
    }

    /// Sorted neighbor indices for every vertex
    pub fn vertex_neighbors(&self) -> Vec<Vec<usize>> {
        topology::vertex_neighbors(self)
    }

    /// Interior angles of every triangle in degrees, ordered by corner
    pub fn face_angles(&self) -> Vec<[f64; 3]> {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = self.corners(t);
                [
                    angle_between(b - a, c - a),
                    angle_between(a - b, c - b),
                    angle_between(a - c, b - c),
                ]
            })
            .collect()
    }

    /// Euler characteristic V - E + F
    pub fn euler_number(&self) -> i64 {
        let edges = self.edge_topology().unique_edge_count();
        self.vertices.len() as i64 - edges as i64 + self.triangles.len() as i64
    }

    /// Translate every vertex
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Uniformly scale about the origin
    pub fn scale(&mut self, factor: f64) {
        for vertex in &mut self.vertices {
            vertex.position.coords *= factor;
        }
    }

    /// Recompute vertex normals from triangle geometry
    /// This calculates face normals and averages them at shared vertices
    pub fn recompute_normals(&mut self) {
        if self.vertices.is_empty() || self.triangles.is_empty() {
            return;
        }

        let mut normal_sums: Vec<Vector3<f64>> = vec![Vector3::zeros(); self.vertices.len()];

        for triangle in &self.triangles {
            let [a, b, c] = self.corners(triangle);

            // Unnormalized cross product is already area-weighted
            let face_normal = (b - a).cross(&(c - a));
            if face_normal.norm() > 1e-12 {
                for &idx in &triangle.indices {
                    normal_sums[idx] += face_normal;
                }
            }
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(normal_sums) {
            vertex.normal = sum.try_normalize(1e-12).unwrap_or_else(Vector3::z);
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

fn angle_between(u: Vector3<f64>, v: Vector3<f64>) -> f64 {
    let denom = u.norm() * v.norm();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    (u.dot(&v) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}
