// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mass properties by signed tetrahedron decomposition

use super::Mesh;
use nalgebra::{Matrix3, Point3, Vector3};

/// Volumes below this are treated as zero
const VOLUME_EPSILON: f64 = 1e-12;

/// Signed volume of the solid bounded by the mesh
pub fn signed_volume(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|t| {
            let [a, b, c] = mesh.corners(t);
            // Signed volume of tetrahedron formed by triangle and origin
            a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
        })
        .sum()
}

/// Area-weighted centroid of the triangles, or the vertex mean when the
/// surface has no area.
pub fn surface_centroid(mesh: &Mesh) -> Point3<f64> {
    let mut weighted = Vector3::zeros();
    let mut total_area = 0.0;

    for triangle in &mesh.triangles {
        let [a, b, c] = mesh.corners(triangle);
        let area = (b - a).cross(&(c - a)).norm() / 2.0;
        weighted += area * (a.coords + b.coords + c.coords) / 3.0;
        total_area += area;
    }

    if total_area > VOLUME_EPSILON {
        return Point3::from(weighted / total_area);
    }

    if mesh.vertices.is_empty() {
        return Point3::origin();
    }
    let sum: Vector3<f64> = mesh.vertices.iter().map(|v| v.position.coords).sum();
    Point3::from(sum / mesh.vertices.len() as f64)
}

/// Unit-density inertia tensor about the center of mass.
///
/// Returns `None` when the enclosed volume is zero or the result is not
/// finite.
#[allow(clippy::suspicious_operation_groupings)]
pub fn inertia_tensor(mesh: &Mesh) -> Option<Matrix3<f64>> {
    let mut total_volume = 0.0;
    let mut com_accum = Vector3::zeros();

    // Second moments over the volume
    let (mut xx, mut yy, mut zz) = (0.0, 0.0, 0.0);
    let (mut xy, mut xz, mut yz) = (0.0, 0.0, 0.0);

    for triangle in &mesh.triangles {
        let [pa, pb, pc] = mesh.corners(triangle);
        let (a, b, c) = (pa.coords, pb.coords, pc.coords);

        let det = a.cross(&b).dot(&c);
        let vol = det / 6.0;
        total_volume += vol;
        com_accum += vol * (a + b + c) / 4.0;

        let f60 = det / 60.0;
        let f120 = det / 120.0;

        xx += f60 * (a.x * a.x + b.x * b.x + c.x * c.x + a.x * b.x + a.x * c.x + b.x * c.x);
        yy += f60 * (a.y * a.y + b.y * b.y + c.y * c.y + a.y * b.y + a.y * c.y + b.y * c.y);
        zz += f60 * (a.z * a.z + b.z * b.z + c.z * c.z + a.z * b.z + a.z * c.z + b.z * c.z);

        xy += f120 * cross_moment(a.x, a.y, b.x, b.y, c.x, c.y);
        xz += f120 * cross_moment(a.x, a.z, b.x, b.z, c.x, c.z);
        yz += f120 * cross_moment(a.y, a.z, b.y, b.z, c.y, c.z);
    }

    if total_volume.abs() < VOLUME_EPSILON {
        return None;
    }

    let com = com_accum / total_volume;

    #[rustfmt::skip]
    let i_origin = Matrix3::new(
        yy + zz, -xy,     -xz,
        -xy,     xx + zz, -yz,
        -xz,     -yz,     xx + yy,
    );

    // Parallel axis theorem: I_com = I_origin - V * (|d|^2 I - d d^T)
    let shift = total_volume * (Matrix3::identity() * com.dot(&com) - com * com.transpose());
    // Inverted winding flips every integral
    let i_com = (i_origin - shift) * total_volume.signum();

    i_com.iter().all(|v| v.is_finite()).then_some(i_com)
}

fn cross_moment(a0: f64, a1: f64, b0: f64, b1: f64, c0: f64, c1: f64) -> f64 {
    2.0 * a0 * a1 + 2.0 * b0 * b1 + 2.0 * c0 * c1 + a0 * b1 + a1 * b0 + a0 * c1 + a1 * c0
        + b0 * c1
        + b1 * c0
}
