// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Manufacturing recommendations derived from the complexity score

use super::complexity::{triangle_aspect_ratio, ComplexityMetrics, DifficultyRating};
use super::statistics::MeshInfo;
use crate::geometry::Mesh;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Faces inspected for thin-wall detection
const THIN_WALL_SAMPLE: usize = 100;
const THIN_WALL_ASPECT_RATIO: f64 = 5.0;
/// Unique edges per face above which holes or cavities are assumed
const HOLE_EDGE_FACE_RATIO: f64 = 1.5;

/// Suggested cavity steel, keyed by catalog material id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialRecommendation {
    H13,
    P20,
    #[serde(rename = "718")]
    Grade718,
}

impl MaterialRecommendation {
    pub fn from_score(score: f64) -> Self {
        if score > 75.0 {
            MaterialRecommendation::H13
        } else if score > 50.0 {
            MaterialRecommendation::P20
        } else {
            MaterialRecommendation::Grade718
        }
    }

    pub fn catalog_id(&self) -> &'static str {
        match self {
            MaterialRecommendation::H13 => "H13",
            MaterialRecommendation::P20 => "P20",
            MaterialRecommendation::Grade718 => "718",
        }
    }
}

impl fmt::Display for MaterialRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MaterialRecommendation::H13 => "H13 (hot-work tool steel, high strength)",
            MaterialRecommendation::P20 => "P20 (mold steel, balanced)",
            MaterialRecommendation::Grade718 => "718 (pre-hardened steel, economical)",
        })
    }
}

/// Suggested cavity finish, keyed by catalog finish id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishRecommendation {
    Edm,
    Polished,
    Textured,
}

impl FinishRecommendation {
    pub fn select(score: f64, is_convex: bool) -> Self {
        if score > 70.0 {
            FinishRecommendation::Edm
        } else if is_convex {
            FinishRecommendation::Polished
        } else {
            FinishRecommendation::Textured
        }
    }

    pub fn catalog_id(&self) -> &'static str {
        match self {
            FinishRecommendation::Edm => "edm",
            FinishRecommendation::Polished => "polished",
            FinishRecommendation::Textured => "textured",
        }
    }
}

impl fmt::Display for FinishRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FinishRecommendation::Edm => "EDM (spark erosion for complex geometry)",
            FinishRecommendation::Polished => "Polished (surfaces accessible for polishing)",
            FinishRecommendation::Textured => "Textured (for detailed surfaces)",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalFeature {
    HolesOrMultiCavity,
    NonConvexGeometry,
    ThinWalls,
    StandardGeometry,
}

impl fmt::Display for CriticalFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CriticalFeature::HolesOrMultiCavity => "Holes / multiple cavities",
            CriticalFeature::NonConvexGeometry => "Non-convex geometry",
            CriticalFeature::ThinWalls => "Thin walls detected",
            CriticalFeature::StandardGeometry => "Standard geometry",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessRecommendation {
    Cnc3Axis,
    Cnc5Axis,
    Edm,
    ConformalCooling,
}

impl fmt::Display for ProcessRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProcessRecommendation::Cnc3Axis => "3-axis CNC for main cavities",
            ProcessRecommendation::Cnc5Axis => "5-axis CNC for full access",
            ProcessRecommendation::Edm => "EDM for fine details and sharp edges",
            ProcessRecommendation::ConformalCooling => {
                "DMLS inserts for conformal cooling channels"
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingAnalysis {
    pub machining_difficulty: DifficultyRating,
    pub estimated_machining_hours: f64,
    pub material_recommendation: MaterialRecommendation,
    pub finish_recommendation: FinishRecommendation,
    pub critical_features: Vec<CriticalFeature>,
    pub process_recommendations: Vec<ProcessRecommendation>,
}

/// One hour per 100 cm³, scaled by score / 50
pub fn machining_hours(volume_cm3: f64, complexity_score: f64) -> f64 {
    volume_cm3 * 0.01 * (complexity_score / 50.0)
}

pub fn critical_features(mesh: &Mesh, info: &MeshInfo) -> Vec<CriticalFeature> {
    let mut features = Vec::new();

    if info.edge_count as f64 > info.face_count as f64 * HOLE_EDGE_FACE_RATIO {
        features.push(CriticalFeature::HolesOrMultiCavity);
    }
    if !info.is_convex {
        features.push(CriticalFeature::NonConvexGeometry);
    }
    let thin = mesh
        .triangles
        .iter()
        .take(THIN_WALL_SAMPLE)
        .any(|t| is_sliver(mesh.edge_lengths(t)));
    if thin {
        features.push(CriticalFeature::ThinWalls);
    }

    if features.is_empty() {
        features.push(CriticalFeature::StandardGeometry);
    }
    features
}

/// Aspect ratio above the thin-wall limit; a collapsed edge next to a
/// non-zero one counts as unbounded
fn is_sliver(edges: [f64; 3]) -> bool {
    let collapsed = edges.iter().any(|&e| e == 0.0);
    if collapsed {
        edges.iter().any(|&e| e > 0.0)
    } else {
        triangle_aspect_ratio(edges) > THIN_WALL_ASPECT_RATIO
    }
}

pub fn process_recommendations(complexity: &ComplexityMetrics) -> Vec<ProcessRecommendation> {
    let score = complexity.complexity_score;
    let mut recommendations = Vec::new();

    if score < 40.0 {
        recommendations.push(ProcessRecommendation::Cnc3Axis);
    } else {
        recommendations.push(ProcessRecommendation::Cnc5Axis);
    }
    if complexity.average_aspect_ratio > 3.0 {
        recommendations.push(ProcessRecommendation::Edm);
    }
    if score > 60.0 {
        recommendations.push(ProcessRecommendation::ConformalCooling);
    }
    recommendations
}

pub fn analyze(
    mesh: &Mesh,
    info: &MeshInfo,
    complexity: &ComplexityMetrics,
    volume_cm3: f64,
) -> ManufacturingAnalysis {
    let score = complexity.complexity_score;
    ManufacturingAnalysis {
        machining_difficulty: complexity.difficulty_rating,
        estimated_machining_hours: machining_hours(volume_cm3, score),
        material_recommendation: MaterialRecommendation::from_score(score),
        finish_recommendation: FinishRecommendation::select(score, info.is_convex),
        critical_features: critical_features(mesh, info),
        process_recommendations: process_recommendations(complexity),
    }
}
