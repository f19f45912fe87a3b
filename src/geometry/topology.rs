// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Edge adjacency and vertex connectivity

use super::Mesh;
use ahash::AHashMap;

/// Undirected edge, smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub v0: usize,
    pub v1: usize,
}

impl Edge {
    pub fn new(v0: usize, v1: usize) -> Self {
        // Always store edges with smaller index first for consistent hashing
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }
}

/// How often an undirected edge is traversed in each direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct EdgeUse {
    forward: u32,
    backward: u32,
}

impl EdgeUse {
    fn total(&self) -> u32 {
        self.forward + self.backward
    }
}

/// Edge adjacency built once per query
#[derive(Debug, Clone)]
pub struct EdgeTopology {
    edges: AHashMap<Edge, EdgeUse>,
}

impl EdgeTopology {
    pub fn build(mesh: &Mesh) -> Self {
        let mut edges: AHashMap<Edge, EdgeUse> = AHashMap::with_capacity(mesh.triangles.len() * 3 / 2);

        for triangle in &mesh.triangles {
            let idx = triangle.indices;
            for i in 0..3 {
                let a = idx[i];
                let b = idx[(i + 1) % 3];
                let usage = edges.entry(Edge::new(a, b)).or_default();
                if a < b {
                    usage.forward += 1;
                } else {
                    usage.backward += 1;
                }
            }
        }

        Self { edges }
    }

    pub fn unique_edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges used by exactly one triangle
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.values().filter(|u| u.total() == 1).count()
    }

    /// Every edge is shared by exactly two triangles
    pub fn is_closed(&self) -> bool {
        !self.edges.is_empty() && self.edges.values().all(|u| u.total() == 2)
    }

    /// Every shared edge is walked once in each direction by its two faces
    pub fn is_winding_consistent(&self) -> bool {
        self.edges
            .values()
            .filter(|u| u.total() == 2)
            .all(|u| u.forward == 1 && u.backward == 1)
    }
}

/// Sorted, de-duplicated neighbor lists for every vertex
pub fn vertex_neighbors(mesh: &Mesh) -> Vec<Vec<usize>> {
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); mesh.vertices.len()];

    for triangle in &mesh.triangles {
        let idx = triangle.indices;
        for i in 0..3 {
            let a = idx[i];
            let b = idx[(i + 1) % 3];
            if a != b {
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
        }
    }

    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }
    neighbors
}
