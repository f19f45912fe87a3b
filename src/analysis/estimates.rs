// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Coarse wall-thickness and curvature estimates.
//!
//! Neither routine is an engineering measurement. Thickness is derived from
//! the bounding box alone (a real wall-thickness map needs ray casting
//! against the surface), and curvature is the spread of neighbor distances
//! around each vertex. Both feed advisory fields only; changing them changes
//! nothing in the cost model.

use crate::error::DegenerateMetric;
use crate::geometry::{BoundingBox, Mesh};
use serde::{Deserialize, Serialize};

/// Neighbors sampled per vertex
const CURVATURE_NEIGHBOR_SAMPLE: usize = 5;

const THICKNESS_NOTE: &str = "Estimated from bounding box extents; a detailed analysis requires ray casting";
const THICKNESS_RECOMMENDATION: &str = "Consider a CAE wall-thickness study before tooling release";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThicknessEstimate {
    pub estimated_min_thickness: f64,
    pub estimated_max_thickness: f64,
    pub note: String,
    pub recommendation: String,
}

impl Default for ThicknessEstimate {
    fn default() -> Self {
        Self {
            estimated_min_thickness: 0.0,
            estimated_max_thickness: 0.0,
            note: THICKNESS_NOTE.into(),
            recommendation: THICKNESS_RECOMMENDATION.into(),
        }
    }
}

/// Smallest extent / 10 and largest extent / 2
pub fn estimate_thickness(bbox: &BoundingBox) -> Result<ThicknessEstimate, DegenerateMetric> {
    if bbox.is_empty() {
        return Err(DegenerateMetric::new("thickness", "empty bounding box"));
    }

    let min = bbox.min_extent() / 10.0;
    let max = bbox.max_extent() / 2.0;
    if !(min.is_finite() && max.is_finite()) {
        return Err(DegenerateMetric::new("thickness", "non-finite extents"));
    }

    Ok(ThicknessEstimate {
        estimated_min_thickness: min,
        estimated_max_thickness: max,
        ..ThicknessEstimate::default()
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvatureEstimate {
    pub mean_curvature: f64,
    pub max_curvature: f64,
    pub curvature_variance: f64,
    /// Vertices whose proxy exceeds twice the mean
    pub complex_curvature_regions: usize,
}

/// Per-vertex proxy: population standard deviation of the distances to the
/// first few neighbors. Vertices with fewer than three neighbors are skipped;
/// if none qualify the estimate is all zeros.
pub fn estimate_curvature(mesh: &Mesh) -> Result<CurvatureEstimate, DegenerateMetric> {
    let neighbors = mesh.vertex_neighbors();

    let proxies: Vec<f64> = neighbors
        .iter()
        .enumerate()
        .filter(|(_, list)| list.len() >= 3)
        .map(|(i, list)| {
            let origin = mesh.vertices[i].position;
            let distances: Vec<f64> = list
                .iter()
                .take(CURVATURE_NEIGHBOR_SAMPLE)
                .map(|&n| (mesh.vertices[n].position - origin).norm())
                .collect();
            population_std_dev(&distances)
        })
        .collect();

    if proxies.is_empty() {
        return Ok(CurvatureEstimate::default());
    }

    let mean = mean(&proxies);
    let variance = population_variance(&proxies, mean);
    let max = proxies.iter().copied().fold(f64::MIN, f64::max);

    if !(mean.is_finite() && variance.is_finite() && max.is_finite()) {
        return Err(DegenerateMetric::new("curvature", "non-finite neighbor distances"));
    }

    Ok(CurvatureEstimate {
        mean_curvature: mean,
        max_curvature: max,
        curvature_variance: variance,
        complex_curvature_regions: proxies.iter().filter(|&&c| c > mean * 2.0).count(),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    population_variance(values, mean(values)).sqrt()
}
