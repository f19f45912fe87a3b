// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Heuristic complexity scoring

use crate::error::DegenerateMetric;
use crate::geometry::Mesh;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty band derived from the complexity score alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyRating {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl DifficultyRating {
    /// Thresholds at 25, 50 and 75; a boundary score belongs to the upper band
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            DifficultyRating::Low
        } else if score < 50.0 {
            DifficultyRating::Medium
        } else if score < 75.0 {
            DifficultyRating::High
        } else {
            DifficultyRating::VeryHigh
        }
    }
}

impl fmt::Display for DifficultyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DifficultyRating::Low => "Low",
            DifficultyRating::Medium => "Medium",
            DifficultyRating::High => "High",
            DifficultyRating::VeryHigh => "Very High",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    pub surface_volume_ratio: f64,
    /// Smallest over largest bounding-box extent
    pub compactness: f64,
    /// Faces per cm²
    pub triangle_density: f64,
    pub average_aspect_ratio: f64,
    /// Always within [0, 100]
    pub complexity_score: f64,
    pub difficulty_rating: DifficultyRating,
}

impl ComplexityMetrics {
    /// Substituted when the metrics cannot be computed
    pub fn neutral() -> Self {
        Self {
            surface_volume_ratio: 0.0,
            compactness: 1.0,
            triangle_density: 0.0,
            average_aspect_ratio: 1.0,
            complexity_score: 50.0,
            difficulty_rating: DifficultyRating::Medium,
        }
    }
}

/// Inputs already converted to the reporting units
#[derive(Debug, Clone, Copy)]
pub struct ComplexityInputs {
    pub volume_cm3: f64,
    pub area_cm2: f64,
    pub min_extent: f64,
    pub max_extent: f64,
}

/// Longest over shortest edge; 1 for triangles with a zero-length edge
pub fn triangle_aspect_ratio(edges: [f64; 3]) -> f64 {
    let longest = edges.iter().copied().fold(f64::MIN, f64::max);
    let shortest = edges.iter().copied().fold(f64::MAX, f64::min);
    if shortest > 0.0 {
        longest / shortest
    } else {
        1.0
    }
}

/// Mean triangle aspect ratio, 1 for a mesh without faces
pub fn average_aspect_ratio(mesh: &Mesh) -> f64 {
    if mesh.triangles.is_empty() {
        return 1.0;
    }
    let total: f64 = mesh
        .triangles
        .iter()
        .map(|t| triangle_aspect_ratio(mesh.edge_lengths(t)))
        .sum();
    total / mesh.triangles.len() as f64
}

/// Composite score before clamping
pub fn raw_score(
    surface_volume_ratio: f64,
    compactness: f64,
    triangle_density: f64,
    average_aspect_ratio: f64,
) -> f64 {
    surface_volume_ratio * 10.0
        + (1.0 - compactness) * 50.0
        + triangle_density * 0.001
        + (average_aspect_ratio - 1.0) * 10.0
}

pub fn compute(mesh: &Mesh, inputs: ComplexityInputs) -> Result<ComplexityMetrics, DegenerateMetric> {
    let surface_volume_ratio = if inputs.volume_cm3 > 0.0 {
        inputs.area_cm2 / inputs.volume_cm3
    } else {
        0.0
    };

    let compactness = if inputs.max_extent > 0.0 {
        inputs.min_extent / inputs.max_extent
    } else {
        0.0
    };

    let triangle_density = if inputs.area_cm2 > 0.0 {
        mesh.triangles.len() as f64 / inputs.area_cm2
    } else {
        0.0
    };

    let average_aspect_ratio = average_aspect_ratio(mesh);

    let raw = raw_score(
        surface_volume_ratio,
        compactness,
        triangle_density,
        average_aspect_ratio,
    );

    let values = [
        ("surface_volume_ratio", surface_volume_ratio),
        ("compactness", compactness),
        ("triangle_density", triangle_density),
        ("average_aspect_ratio", average_aspect_ratio),
        ("complexity_score", raw),
    ];
    if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
        return Err(DegenerateMetric::new(
            "complexity",
            format!("{} is {}", name, value),
        ));
    }

    let complexity_score = raw.clamp(0.0, 100.0);

    Ok(ComplexityMetrics {
        surface_volume_ratio,
        compactness,
        triangle_density,
        average_aspect_ratio,
        complexity_score,
        difficulty_rating: DifficultyRating::from_score(complexity_score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_rating_boundaries() {
        assert_eq!(DifficultyRating::from_score(0.0), DifficultyRating::Low);
        assert_eq!(DifficultyRating::from_score(24.999), DifficultyRating::Low);
        assert_eq!(DifficultyRating::from_score(25.0), DifficultyRating::Medium);
        assert_eq!(DifficultyRating::from_score(50.0), DifficultyRating::High);
        assert_eq!(DifficultyRating::from_score(75.0), DifficultyRating::VeryHigh);
        assert_eq!(DifficultyRating::from_score(100.0), DifficultyRating::VeryHigh);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_relative_eq!(triangle_aspect_ratio([3.0, 4.0, 5.0]), 5.0 / 3.0);
        assert_eq!(triangle_aspect_ratio([0.0, 1.0, 1.0]), 1.0);
    }

    #[test]
    fn test_cube_score() {
        // 100 mm cube: 1000 cm³, 600 cm²
        let mesh = Primitive::cube(Vector3::new(100.0, 100.0, 100.0), false).to_mesh();
        let metrics = compute(
            &mesh,
            ComplexityInputs {
                volume_cm3: 1000.0,
                area_cm2: 600.0,
                min_extent: 100.0,
                max_extent: 100.0,
            },
        )
        .unwrap();

        assert_relative_eq!(metrics.surface_volume_ratio, 0.6);
        assert_relative_eq!(metrics.compactness, 1.0);
        assert_relative_eq!(metrics.triangle_density, 0.02);
        assert_relative_eq!(metrics.average_aspect_ratio, 2f64.sqrt(), epsilon = 1e-12);
        let expected = 6.0 + 0.02 * 0.001 + (2f64.sqrt() - 1.0) * 10.0;
        assert_relative_eq!(metrics.complexity_score, expected, epsilon = 1e-9);
        assert_eq!(metrics.difficulty_rating, DifficultyRating::Low);
    }

    #[test]
    fn test_score_is_clamped() {
        // Thin sheet with a tiny volume drives the ratio far above 100
        let mesh = Primitive::cube(Vector3::new(100.0, 100.0, 0.1), false).to_mesh();
        let metrics = compute(
            &mesh,
            ComplexityInputs {
                volume_cm3: 0.001,
                area_cm2: 200.0,
                min_extent: 0.1,
                max_extent: 100.0,
            },
        )
        .unwrap();
        assert_eq!(metrics.complexity_score, 100.0);
        assert_eq!(metrics.difficulty_rating, DifficultyRating::VeryHigh);
    }

    #[test]
    fn test_non_finite_input_is_degenerate() {
        let mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
        let err = compute(
            &mesh,
            ComplexityInputs {
                volume_cm3: 1.0,
                area_cm2: f64::INFINITY,
                min_extent: 1.0,
                max_extent: 1.0,
            },
        )
        .unwrap_err();
        assert_eq!(err.metric, "complexity");
    }
}
