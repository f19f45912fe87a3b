// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Property-based tests for the analyzer and cost model

use metamold::analysis::DifficultyRating;
use metamold::geometry::{Mesh, Triangle, Vertex};
use metamold::pricing::CostDrivers;
use metamold::{CostModel, GeometryAnalyzer, PricingRequest, PricingStrategy, Primitive};
use nalgebra::Vector3;
use proptest::prelude::*;

/// Arbitrary triangle soup with in-range indices and an odd face count,
/// so no edge pairing can close it
fn soup_strategy() -> impl Strategy<Value = Mesh> {
    prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64, -100.0..100.0f64), 3..24)
        .prop_flat_map(|points| {
            let n = points.len();
            (
                Just(points),
                prop::collection::vec((0..n, 0..n, 0..n), 1..32),
            )
        })
        .prop_map(|(points, mut faces)| {
            if faces.len() % 2 == 0 {
                faces.pop();
            }
            let mut mesh = Mesh::new();
            for (x, y, z) in points {
                mesh.add_vertex(Vertex::at(x, y, z));
            }
            for (a, b, c) in faces {
                mesh.add_triangle(Triangle::new([a, b, c]));
            }
            mesh
        })
}

fn box_strategy() -> impl Strategy<Value = Mesh> {
    (0.1..500.0f64, 0.1..500.0f64, 0.1..500.0f64)
        .prop_map(|(x, y, z)| Primitive::cube(Vector3::new(x, y, z), false).to_mesh())
}

fn expected_rating(score: f64) -> DifficultyRating {
    match score {
        s if s < 25.0 => DifficultyRating::Low,
        s if s < 50.0 => DifficultyRating::Medium,
        s if s < 75.0 => DifficultyRating::High,
        _ => DifficultyRating::VeryHigh,
    }
}

#[test]
fn test_rating_at_exact_boundaries() {
    assert_eq!(DifficultyRating::from_score(25.0), DifficultyRating::Medium);
    assert_eq!(DifficultyRating::from_score(50.0), DifficultyRating::High);
    assert_eq!(DifficultyRating::from_score(75.0), DifficultyRating::VeryHigh);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_box_score_is_bounded(mesh in box_strategy()) {
        let stats = GeometryAnalyzer::new().analyze(&mesh).unwrap();
        let complexity = &stats.complexity_metrics;

        prop_assert!(stats.volume > 0.0);
        prop_assert!((0.0..=100.0).contains(&complexity.complexity_score));
        prop_assert!(complexity.compactness > 0.0 && complexity.compactness <= 1.0);
        prop_assert_eq!(complexity.difficulty_rating, expected_rating(complexity.complexity_score));
    }

    #[test]
    fn prop_analysis_is_idempotent(mesh in box_strategy()) {
        let analyzer = GeometryAnalyzer::new();
        let first = analyzer.analyze(&mesh).unwrap();
        let second = analyzer.analyze(&mesh).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_soup_never_fails(mesh in soup_strategy()) {
        let stats = GeometryAnalyzer::new().analyze(&mesh).unwrap();

        prop_assert!((0.0..=100.0).contains(&stats.complexity_metrics.complexity_score));
        prop_assert!(!stats.mesh_info.is_watertight);
        prop_assert!(!stats.mesh_info.is_convex);
        prop_assert_eq!(stats.volume, 0.0);
        prop_assert!(stats.inertia_is_placeholder());
        prop_assert_eq!(stats.mesh_info.genus, None);
    }

    #[test]
    fn prop_total_matches_discounted_subtotal(
        volume in 0.0..10_000.0f64,
        score in 0.0..100.0f64,
        quantity in -5i64..300,
        simple in any::<bool>(),
    ) {
        let strategy = if simple { PricingStrategy::Simple } else { PricingStrategy::Detailed };
        let model = CostModel::standard().with_strategy(strategy);
        let drivers = CostDrivers::new(volume, score).unwrap();
        let b = model
            .price_drivers(&drivers, &PricingRequest::new("S7", "textured", quantity))
            .unwrap();

        let tolerance = 1e-9 * b.subtotal.max(1.0);
        prop_assert!((b.total_price - b.subtotal * (1.0 - b.discount_rate)).abs() <= tolerance);
        prop_assert!((b.subtotal - b.discount_amount - b.total_price).abs() <= tolerance);
        if quantity > 0 {
            prop_assert!((b.price_per_unit * quantity as f64 - b.total_price).abs() <= tolerance);
        } else {
            prop_assert_eq!(b.price_per_unit, 0.0);
        }
    }

    #[test]
    fn prop_per_unit_price_non_increasing(
        volume in 1.0..5_000.0f64,
        score in 0.0..100.0f64,
        quantity in 1i64..200,
    ) {
        let model = CostModel::standard();
        let drivers = CostDrivers::new(volume, score).unwrap();
        let price = |q: i64| {
            model
                .price_drivers(&drivers, &PricingRequest::new("P20", "machined", q))
                .unwrap()
                .price_per_unit
        };
        // Equal within rounding between tiers, strictly lower at a tier
        prop_assert!(price(quantity + 1) <= price(quantity) * (1.0 + 1e-12));
    }
}
