// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analysis
//!
//! [`GeometryAnalyzer::analyze`] turns a mesh into a [`GeometryStatistics`]
//! bundle. Only an empty or malformed mesh is fatal; every derived metric that
//! cannot be computed is replaced by its documented default and logged.

pub mod complexity;
pub mod estimates;
pub mod manufacturing;
pub mod statistics;

pub use complexity::{ComplexityMetrics, DifficultyRating};
pub use estimates::{CurvatureEstimate, ThicknessEstimate};
pub use manufacturing::{
    CriticalFeature, FinishRecommendation, ManufacturingAnalysis, MaterialRecommendation,
    ProcessRecommendation,
};
pub use statistics::{
    BoundsSummary, Dimensions, FaceTypes, GeometryStatistics, LengthUnit, MeshInfo, Orientation,
};

use crate::error::{AnalysisError, DegenerateMetric};
use crate::geometry::{BoundingBox, Mesh};
use complexity::ComplexityInputs;
use nalgebra::Matrix3;
use statistics::IDENTITY_3X3;
use tracing::{debug, warn};

/// Tolerance in degrees for calling a triangle right-angled
const RIGHT_ANGLE_TOLERANCE: f64 = 1.0;

/// Stateless analyzer; safe to share between threads
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryAnalyzer {
    unit: LengthUnit,
}

impl GeometryAnalyzer {
    /// Analyzer for millimeter meshes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(unit: LengthUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Compute the full statistics bundle for a mesh
    pub fn analyze(&self, mesh: &Mesh) -> Result<GeometryStatistics, AnalysisError> {
        if mesh.vertices.is_empty() || mesh.triangles.is_empty() {
            return Err(AnalysisError::InvalidGeometry {
                reason: format!(
                    "mesh has {} vertices and {} faces",
                    mesh.vertex_count(),
                    mesh.triangle_count()
                ),
            });
        }
        mesh.validate().map_err(|e| AnalysisError::InvalidGeometry {
            reason: e.to_string(),
        })?;

        let cm = self.unit.to_cm();
        let topology = mesh.edge_topology();
        let is_watertight = topology.is_closed();

        let volume = if is_watertight {
            mesh.volume() * cm.powi(3)
        } else {
            0.0
        };
        let area = mesh.area() * cm.powi(2);

        let bbox = mesh.bounding_box();
        let dimensions = dimensions(&bbox);
        debug!(volume, area, is_watertight, "mass properties");

        let inertia_tensor = recover(inertia(mesh, volume), IDENTITY_3X3);

        let is_convex = is_watertight && mesh.is_convex();
        let euler_number = mesh.euler_number();
        let mesh_info = MeshInfo {
            vertex_count: mesh.vertex_count(),
            face_count: mesh.triangle_count(),
            edge_count: topology.unique_edge_count(),
            face_types: classify_faces(mesh),
            is_watertight,
            is_convex,
            euler_number,
            genus: is_watertight.then(|| (2 - euler_number) / 2),
            orientation: if topology.is_winding_consistent() {
                Orientation::Consistent
            } else {
                Orientation::Inconsistent
            },
        };
        debug!(
            vertices = mesh_info.vertex_count,
            faces = mesh_info.face_count,
            edges = mesh_info.edge_count,
            is_convex,
            "topology"
        );

        let complexity_metrics = recover(
            complexity::compute(
                mesh,
                ComplexityInputs {
                    volume_cm3: volume,
                    area_cm2: area,
                    min_extent: dimensions.min,
                    max_extent: dimensions.max,
                },
            ),
            ComplexityMetrics::neutral(),
        );
        debug!(
            score = complexity_metrics.complexity_score,
            rating = %complexity_metrics.difficulty_rating,
            "complexity"
        );

        let thickness_analysis = recover(estimates::estimate_thickness(&bbox), ThicknessEstimate::default());
        let curvature = recover(estimates::estimate_curvature(mesh), CurvatureEstimate::default());

        let manufacturing_analysis =
            manufacturing::analyze(mesh, &mesh_info, &complexity_metrics, volume);

        let center = mesh.centroid();
        Ok(GeometryStatistics {
            unit: self.unit,
            volume,
            area,
            dimensions,
            center_of_mass: [center.x, center.y, center.z],
            inertia_tensor,
            bounding_box: bounds_summary(&bbox),
            mesh_info,
            complexity_metrics,
            thickness_analysis,
            curvature,
            manufacturing_analysis,
        })
    }
}

/// Substitute the default for a metric that could not be computed
fn recover<T>(result: Result<T, DegenerateMetric>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(metric = e.metric, reason = %e.reason, "metric replaced by default");
            default
        }
    }
}

fn inertia(mesh: &Mesh, volume: f64) -> Result<[[f64; 3]; 3], DegenerateMetric> {
    if volume <= 0.0 {
        return Err(DegenerateMetric::new("inertia", "mesh encloses no volume"));
    }
    mesh.moment_inertia()
        .map(matrix_rows)
        .ok_or_else(|| DegenerateMetric::new("inertia", "tensor is not finite"))
}

fn matrix_rows(m: Matrix3<f64>) -> [[f64; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

fn dimensions(bbox: &BoundingBox) -> Dimensions {
    let size = bbox.size();
    Dimensions {
        width: size.x,
        height: size.y,
        depth: size.z,
        max: bbox.max_extent(),
        min: bbox.min_extent(),
    }
}

fn bounds_summary(bbox: &BoundingBox) -> BoundsSummary {
    let center = bbox.center();
    let size = bbox.size();
    BoundsSummary {
        min: [bbox.min.x, bbox.min.y, bbox.min.z],
        max: [bbox.max.x, bbox.max.y, bbox.max.z],
        center: [center.x, center.y, center.z],
        size: [size.x, size.y, size.z],
    }
}

/// Count faces by interior angle; the near-right test wins over all-acute
fn classify_faces(mesh: &Mesh) -> FaceTypes {
    let mut types = FaceTypes::default();
    for angles in mesh.face_angles() {
        if angles
            .iter()
            .any(|a| (a - 90.0).abs() < RIGHT_ANGLE_TOLERANCE)
        {
            types.right += 1;
        } else if angles.iter().all(|&a| a < 90.0) {
            types.acute += 1;
        } else {
            types.obtuse += 1;
        }
    }
    types
}
