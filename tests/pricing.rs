// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end pricing scenarios

use anyhow::Result;
use metamold::catalog::Catalog;
use metamold::error::PricingError;
use metamold::pricing::{CadBaseConfig, CostDrivers, MoldBaseConfig};
use metamold::{CostModel, GeometryAnalyzer, GeometryStatistics, PricingRequest, PricingStrategy};
use metamold::Primitive;
use nalgebra::Vector3;

fn cube_statistics() -> Result<GeometryStatistics> {
    let mesh = Primitive::cube(Vector3::new(100.0, 100.0, 100.0), false).to_mesh();
    Ok(GeometryAnalyzer::new().analyze(&mesh)?)
}

#[test]
fn test_cube_material_cost() -> Result<()> {
    let stats = cube_statistics()?;
    assert!((stats.volume - 1000.0).abs() < 1e-9);
    assert!((stats.area - 600.0).abs() < 1e-9);

    let breakdown = CostModel::standard().price(&stats, &PricingRequest::new("P20", "machined", 1))?;
    let rounded = breakdown.rounded();

    println!("{}", serde_json::to_string_pretty(&rounded)?);
    assert_eq!(rounded.material_cost, 747.5);
    assert_eq!(rounded.discount_rate, 0.0);
    assert_eq!(rounded.total_price, rounded.subtotal);

    Ok(())
}

#[test]
fn test_unknown_material_falls_back_to_p20() -> Result<()> {
    let stats = cube_statistics()?;
    let model = CostModel::standard();

    let fallback = model.price(&stats, &PricingRequest::new("UNOBTAINIUM", "machined", 1))?;
    let p20 = model.price(&stats, &PricingRequest::new("P20", "machined", 1))?;

    assert_eq!(fallback.material_id, "P20");
    assert_eq!(fallback.total_price, p20.total_price);
    Ok(())
}

#[test]
fn test_zero_quantity() -> Result<()> {
    let stats = cube_statistics()?;
    let breakdown = CostModel::standard().price(&stats, &PricingRequest::new("P20", "machined", 0))?;

    assert_eq!(breakdown.discount_rate, 0.0);
    assert_eq!(breakdown.price_per_unit, 0.0);
    assert!(breakdown.total_price > 0.0);
    Ok(())
}

#[test]
fn test_discount_boundaries() -> Result<()> {
    let stats = cube_statistics()?;
    let model = CostModel::standard();
    let rate = |quantity: i64| -> Result<f64> {
        Ok(model
            .price(&stats, &PricingRequest::new("P20", "machined", quantity))?
            .discount_rate)
    };

    assert_eq!(rate(9)?, 0.0);
    assert_eq!(rate(10)?, 0.05);
    assert_eq!(rate(50)?, 0.10);
    assert_eq!(rate(100)?, 0.15);
    Ok(())
}

#[test]
fn test_price_per_unit_drops_at_tiers() -> Result<()> {
    let stats = cube_statistics()?;
    for strategy in [PricingStrategy::Detailed, PricingStrategy::Simple] {
        let model = CostModel::standard().with_strategy(strategy);
        let per_unit = |quantity: i64| -> Result<f64> {
            Ok(model
                .price(&stats, &PricingRequest::new("H13", "polished", quantity))?
                .price_per_unit)
        };

        for tier in [10, 50, 100] {
            let below = per_unit(tier - 1)?;
            let at = per_unit(tier)?;
            println!("{strategy}: {} → {:.2}, {} → {:.2}", tier - 1, below, tier, at);
            assert!(at < below, "{strategy} at {tier}: {at} !< {below}");
        }
    }
    Ok(())
}

#[test]
fn test_full_mold_configuration() -> Result<()> {
    let stats = cube_statistics()?;
    let request = PricingRequest::new("H13", "edm", 1)
        .with_mold_base(MoldBaseConfig {
            plate_width: 346.0,
            plate_length: 396.0,
            hot_runner: true,
            conformal_cooling: true,
            double_extraction: true,
        })
        .with_cad_base(CadBaseConfig {
            supplier: Some("FUTABA Premium".into()),
            plate_material: Some("Aluminium 7075".into()),
            insulation_plates: true,
            lifting_holes: false,
        });

    let breakdown = CostModel::standard().price(&stats, &request)?;

    // The supplier base wins; the legacy config still adds cooling engineering
    assert_eq!(breakdown.mold_base_cost, 4000.0 - 500.0 + 800.0);
    assert_eq!(breakdown.setup_fee, 4000.0);
    assert!(breakdown.processing.edm > 0.0);

    let parts = breakdown.material_cost
        + breakdown.processing_cost
        + breakdown.mold_base_cost
        + breakdown.setup_fee;
    assert!((parts - breakdown.subtotal).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_custom_catalog() -> Result<()> {
    let stats = cube_statistics()?;
    let mut catalog = Catalog::builtin();
    catalog.currency = "USD".into();
    for m in catalog.materials.iter_mut() {
        m.price_per_cm3 *= 2.0;
    }

    let breakdown = CostModel::new(&catalog).price(&stats, &PricingRequest::default())?;
    assert_eq!(breakdown.currency, "USD");
    assert_eq!(breakdown.rounded().material_cost, 1495.0);
    Ok(())
}

#[test]
fn test_missing_statistics_are_rejected() {
    let doc = serde_json::json!({ "area": 600.0 });
    let err = CostDrivers::from_json(&doc).unwrap_err();
    assert!(matches!(err, PricingError::InvalidPricingInput { ref field, .. } if field == "volume"));
}

#[test]
fn test_json_statistics_round_trip() -> Result<()> {
    let stats = cube_statistics()?;
    let doc = serde_json::to_value(&stats)?;
    let drivers = CostDrivers::from_json(&doc)?;

    let model = CostModel::standard();
    let request = PricingRequest::default();
    let from_json = model.price_drivers(&drivers, &request)?;
    let direct = model.price(&stats, &request)?;
    assert!((from_json.total_price - direct.total_price).abs() < 1e-6);
    assert_eq!(from_json.process_recommendations, direct.process_recommendations);
    Ok(())
}
