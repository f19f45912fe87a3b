// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Convexity test against the parry3d convex hull

use super::Mesh;
use parry3d::na::Point3 as HullPoint;
use parry3d::transformation::try_convex_hull;
use tracing::debug;

/// Relative volume difference tolerated between a mesh and its hull
const CONVEXITY_TOLERANCE: f64 = 1e-3;

/// A closed mesh is convex when it fills its own convex hull
pub fn is_convex(mesh: &Mesh) -> bool {
    if !mesh.is_watertight() {
        return false;
    }

    let volume = mesh.volume();
    if volume <= 0.0 {
        return false;
    }

    // parry3d works in f32; center first to keep precision on offset parts
    let center = mesh.bounding_box().center();
    let points: Vec<HullPoint<f32>> = mesh
        .vertices
        .iter()
        .map(|v| {
            let p = v.position - center;
            HullPoint::new(p.x as f32, p.y as f32, p.z as f32)
        })
        .collect();

    match try_convex_hull(&points) {
        Ok((hull_points, hull_faces)) => {
            let hull_volume = hull_faces
                .iter()
                .map(|f| {
                    let [a, b, c] = f.map(|i| hull_points[i as usize].coords.cast::<f64>());
                    a.dot(&b.cross(&c)) / 6.0
                })
                .sum::<f64>()
                .abs();
            (hull_volume - volume).abs() <= CONVEXITY_TOLERANCE * hull_volume.max(volume)
        }
        Err(err) => {
            debug!("convex hull failed: {:?}", err);
            false
        }
    }
}
