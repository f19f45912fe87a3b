// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed reference shapes used as fixtures and for demo mode

use super::{Mesh, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Parametric solids, all generated as watertight indexed meshes with
/// outward winding
#[derive(Debug, Clone, Copy)]
pub enum Primitive {
    Cube { size: Vector3<f64>, center: bool },
    Sphere { r: f64, segments: u32 },
    Cylinder { h: f64, r: f64, segments: u32 },
    Torus { major: f64, minor: f64, segments: u32, ring_segments: u32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn sphere(r: f64, segments: u32) -> Self {
        Self::Sphere {
            r,
            segments: segments.max(4),
        }
    }

    pub fn cylinder(h: f64, r: f64, segments: u32) -> Self {
        Self::Cylinder {
            h,
            r,
            segments: segments.max(3),
        }
    }

    pub fn torus(major: f64, minor: f64, segments: u32, ring_segments: u32) -> Self {
        Self::Torus {
            major,
            minor,
            segments: segments.max(3),
            ring_segments: ring_segments.max(3),
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = match *self {
            Self::Cube { size, center } => generate_cube_mesh(size, center),
            Self::Sphere { r, segments } => generate_sphere_mesh(r, segments),
            Self::Cylinder { h, r, segments } => generate_cylinder_mesh(h, r, segments),
            Self::Torus {
                major,
                minor,
                segments,
                ring_segments,
            } => generate_torus_mesh(major, minor, segments, ring_segments),
        };
        mesh.recompute_normals();
        mesh
    }
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> Mesh {
    let mut mesh = Mesh::with_capacity(8, 12);

    let min = if center { -size / 2.0 } else { Vector3::zeros() };
    let max = min + size;

    let positions = [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];
    for p in positions {
        mesh.add_vertex(Vertex::new(p, Vector3::z()));
    }

    let faces = [
        // Front (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Back (z-)
        [1, 0, 3],
        [1, 3, 2],
        // Right (x+)
        [5, 1, 2],
        [5, 2, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Top (y+)
        [7, 6, 2],
        [7, 2, 3],
        // Bottom (y-)
        [0, 1, 5],
        [0, 5, 4],
    ];
    for indices in faces {
        mesh.add_triangle(Triangle::new(indices));
    }

    mesh
}

/// UV sphere about the y axis with shared poles and a closed seam
fn generate_sphere_mesh(radius: f64, segments: u32) -> Mesh {
    let slices = segments as usize;
    let stacks = (segments as usize / 2).max(2);
    let mut mesh = Mesh::with_capacity(slices * (stacks - 1) + 2, 2 * slices * stacks);

    let top = mesh.add_vertex(Vertex::at(0.0, radius, 0.0));
    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        for j in 0..slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            mesh.add_vertex(Vertex::at(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            ));
        }
    }
    let bottom = mesh.add_vertex(Vertex::at(0.0, -radius, 0.0));

    let ring = |i: usize, j: usize| 1 + (i - 1) * slices + j % slices;

    for j in 0..slices {
        mesh.add_triangle(Triangle::new([top, ring(1, j + 1), ring(1, j)]));
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            let a = ring(i, j);
            let b = ring(i + 1, j);
            let c = ring(i + 1, j + 1);
            let d = ring(i, j + 1);
            mesh.add_triangle(Triangle::new([a, c, b]));
            mesh.add_triangle(Triangle::new([a, d, c]));
        }
    }
    for j in 0..slices {
        mesh.add_triangle(Triangle::new([
            ring(stacks - 1, j),
            ring(stacks - 1, j + 1),
            bottom,
        ]));
    }

    mesh
}

/// Capped cylinder along z, base at z = 0
fn generate_cylinder_mesh(height: f64, radius: f64, segments: u32) -> Mesh {
    let n = segments as usize;
    let mut mesh = Mesh::with_capacity(2 * n + 2, 4 * n);

    let bottom_center = mesh.add_vertex(Vertex::at(0.0, 0.0, 0.0));
    let top_center = mesh.add_vertex(Vertex::at(0.0, 0.0, height));
    for z in [0.0, height] {
        for j in 0..n {
            let theta = 2.0 * PI * j as f64 / n as f64;
            mesh.add_vertex(Vertex::at(radius * theta.cos(), radius * theta.sin(), z));
        }
    }

    let bottom = |j: usize| 2 + j % n;
    let top = |j: usize| 2 + n + j % n;

    for j in 0..n {
        mesh.add_triangle(Triangle::new([bottom(j), bottom(j + 1), top(j + 1)]));
        mesh.add_triangle(Triangle::new([bottom(j), top(j + 1), top(j)]));
        mesh.add_triangle(Triangle::new([top_center, top(j), top(j + 1)]));
        mesh.add_triangle(Triangle::new([bottom_center, bottom(j + 1), bottom(j)]));
    }

    mesh
}

/// Ring torus about the z axis
fn generate_torus_mesh(major: f64, minor: f64, segments: u32, ring_segments: u32) -> Mesh {
    let nu = segments as usize;
    let nv = ring_segments as usize;
    let mut mesh = Mesh::with_capacity(nu * nv, 2 * nu * nv);

    for i in 0..nu {
        let u = 2.0 * PI * i as f64 / nu as f64;
        for j in 0..nv {
            let v = 2.0 * PI * j as f64 / nv as f64;
            let r = major + minor * v.cos();
            mesh.add_vertex(Vertex::at(r * u.cos(), r * u.sin(), minor * v.sin()));
        }
    }

    let index = |i: usize, j: usize| (i % nu) * nv + j % nv;

    for i in 0..nu {
        for j in 0..nv {
            let p00 = index(i, j);
            let p10 = index(i + 1, j);
            let p11 = index(i + 1, j + 1);
            let p01 = index(i, j + 1);
            mesh.add_triangle(Triangle::new([p00, p10, p11]));
            mesh.add_triangle(Triangle::new([p00, p11, p01]));
        }
    }

    mesh
}
