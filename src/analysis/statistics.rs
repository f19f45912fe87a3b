// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Output records of the geometry analyzer

use super::complexity::ComplexityMetrics;
use super::estimates::{CurvatureEstimate, ThicknessEstimate};
use super::manufacturing::ManufacturingAnalysis;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length unit of incoming mesh coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Millimeter,
    Centimeter,
    Meter,
    Inch,
}

impl LengthUnit {
    /// Centimeters per unit
    pub fn to_cm(&self) -> f64 {
        match self {
            LengthUnit::Millimeter => 0.1,
            LengthUnit::Centimeter => 1.0,
            LengthUnit::Meter => 100.0,
            LengthUnit::Inch => 2.54,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mm" | "millimeter" => Ok(LengthUnit::Millimeter),
            "cm" | "centimeter" => Ok(LengthUnit::Centimeter),
            "m" | "meter" => Ok(LengthUnit::Meter),
            "in" | "inch" => Ok(LengthUnit::Inch),
            other => Err(format!("unknown length unit `{}`", other)),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounding box extents in mesh units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub max: f64,
    pub min: f64,
}

/// Bounding box corners in mesh units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsSummary {
    pub min: [f64; 3],
    pub max: [f64; 3],
    pub center: [f64; 3],
    pub size: [f64; 3],
}

/// Triangle classification by interior angle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceTypes {
    pub acute: usize,
    pub right: usize,
    pub obtuse: usize,
}

/// Whether adjacent faces agree on winding direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Consistent,
    Inconsistent,
}

/// Mesh topology summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshInfo {
    pub vertex_count: usize,
    pub face_count: usize,
    pub edge_count: usize,
    pub face_types: FaceTypes,
    pub is_watertight: bool,
    pub is_convex: bool,
    pub euler_number: i64,
    /// Only defined for watertight meshes
    pub genus: Option<i64>,
    pub orientation: Orientation,
}

/// Complete analysis result.
///
/// Volume and area are reported in cm³ and cm²; every other length is in
/// the mesh's own unit (see `unit`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStatistics {
    pub unit: LengthUnit,
    /// cm³, zero for meshes that are not watertight
    pub volume: f64,
    /// cm²
    pub area: f64,
    pub dimensions: Dimensions,
    pub center_of_mass: [f64; 3],
    /// Unit-density tensor about the center of mass. The identity matrix
    /// means the tensor could not be computed for this geometry.
    pub inertia_tensor: [[f64; 3]; 3],
    pub bounding_box: BoundsSummary,
    pub mesh_info: MeshInfo,
    pub complexity_metrics: ComplexityMetrics,
    pub thickness_analysis: ThicknessEstimate,
    pub curvature: CurvatureEstimate,
    pub manufacturing_analysis: ManufacturingAnalysis,
}

pub(crate) const IDENTITY_3X3: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

impl GeometryStatistics {
    /// True when the inertia tensor is the identity placeholder
    pub fn inertia_is_placeholder(&self) -> bool {
        self.inertia_tensor == IDENTITY_3X3
    }
}
