// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Manufacturing cost estimation
//!
//! [`CostModel`] maps geometry statistics and a [`PricingRequest`] to an
//! itemized [`CostBreakdown`]. Two strategies are available:
//!
//! - [`PricingStrategy::Detailed`]: tooling quote with material waste,
//!   machining and labor, mold base and setup.
//! - [`PricingStrategy::Simple`]: per-piece calculator (material, finish and
//!   a small setup fee) multiplied by the quantity.
//!
//! Both apply the same quantity discount schedule as a single rate off the
//! subtotal.

mod breakdown;
mod discount;
mod drivers;
mod mold_base;

pub use breakdown::{CostBreakdown, ProcessingCosts};
pub use discount::{percent_label, DiscountSchedule, DiscountTier};
pub use drivers::{parse_quantity, CostDrivers};
pub use mold_base::{mold_base_cost, setup_fee, CadBaseConfig, MoldBaseConfig};

use crate::analysis::GeometryStatistics;
use crate::catalog::{Catalog, MaterialGrade, SurfaceFinish};
use crate::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Offcut and machining waste on raw material
const MATERIAL_WASTE_FACTOR: f64 = 1.15;
/// Machining minutes per cm³ before the complexity surcharge
const MACHINING_MINUTES_PER_CM3: f64 = 0.5;
const EDM_MINUTES_PER_CM3: f64 = 0.2;
const FINISHING_MINUTES_PER_CM3: f64 = 0.1;
/// Share of machining cost charged per unit of finish multiplier above 1
const FINISH_SURCHARGE: f64 = 0.3;
/// Rate applied to 3-axis time on simple parts
const SIMPLE_PART_RATE_FACTOR: f64 = 0.9;
const MIN_LEAD_TIME_DAYS: u64 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingStrategy {
    #[default]
    Detailed,
    Simple,
}

impl FromStr for PricingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detailed" => Ok(PricingStrategy::Detailed),
            "simple" => Ok(PricingStrategy::Simple),
            other => Err(format!("unknown pricing strategy `{}`", other)),
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PricingStrategy::Detailed => "detailed",
            PricingStrategy::Simple => "simple",
        })
    }
}

/// User-chosen pricing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub material: String,
    pub finish: String,
    pub quantity: i64,
    #[serde(default)]
    pub mold_base: Option<MoldBaseConfig>,
    #[serde(default)]
    pub cad_base: Option<CadBaseConfig>,
}

impl PricingRequest {
    pub fn new(material: impl Into<String>, finish: impl Into<String>, quantity: i64) -> Self {
        Self {
            material: material.into(),
            finish: finish.into(),
            quantity,
            mold_base: None,
            cad_base: None,
        }
    }

    pub fn with_mold_base(mut self, config: MoldBaseConfig) -> Self {
        self.mold_base = Some(config);
        self
    }

    pub fn with_cad_base(mut self, config: CadBaseConfig) -> Self {
        self.cad_base = Some(config);
        self
    }

    /// Quantity used for discounts and per-piece multiplication
    pub fn effective_quantity(&self) -> u64 {
        if self.quantity > 0 {
            self.quantity as u64
        } else {
            1
        }
    }
}

impl Default for PricingRequest {
    fn default() -> Self {
        Self::new("P20", "machined", 1)
    }
}

/// Stateless cost model over a read-only catalog
#[derive(Debug, Clone)]
pub struct CostModel<'a> {
    catalog: &'a Catalog,
    strategy: PricingStrategy,
    discounts: DiscountSchedule,
}

impl CostModel<'static> {
    /// Detailed strategy over the built-in catalog
    pub fn standard() -> Self {
        Self::new(Catalog::standard())
    }
}

impl<'a> CostModel<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            strategy: PricingStrategy::default(),
            discounts: DiscountSchedule::standard(),
        }
    }

    pub fn with_strategy(mut self, strategy: PricingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_discounts(mut self, discounts: DiscountSchedule) -> Self {
        self.discounts = discounts;
        self
    }

    pub fn strategy(&self) -> PricingStrategy {
        self.strategy
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Price a part from its analysis results
    pub fn price(
        &self,
        stats: &GeometryStatistics,
        request: &PricingRequest,
    ) -> Result<CostBreakdown, PricingError> {
        let drivers = CostDrivers::from_statistics(stats)?;
        self.price_drivers(&drivers, request)
    }

    /// Price a part from already extracted drivers
    pub fn price_drivers(
        &self,
        drivers: &CostDrivers,
        request: &PricingRequest,
    ) -> Result<CostBreakdown, PricingError> {
        let material = self.catalog.resolve_material(&request.material)?;
        let finish = self.catalog.resolve_finish(&request.finish)?;

        let parts = match self.strategy {
            PricingStrategy::Detailed => self.detailed(drivers, material, finish, request)?,
            PricingStrategy::Simple => self.simple(drivers, material, finish, request),
        };

        let subtotal = parts.material + parts.processing.total() + parts.mold_base + parts.setup;
        let quantity = request.effective_quantity();
        let discount_rate = self.discounts.rate_for(quantity);
        let discount_amount = subtotal * discount_rate;
        let total_price = subtotal * (1.0 - discount_rate);
        let price_per_unit = if request.quantity > 0 {
            total_price / request.quantity as f64
        } else {
            0.0
        };

        debug!(
            strategy = %self.strategy,
            material = %material.id,
            finish = %finish.id,
            quantity = request.quantity,
            subtotal,
            discount_rate,
            total_price,
            "priced"
        );

        Ok(CostBreakdown {
            strategy: self.strategy,
            currency: self.catalog.currency.clone(),
            quantity: request.quantity,
            material_id: material.id.clone(),
            material_name: material.name.clone(),
            finish_id: finish.id.clone(),
            finish_name: finish.name.clone(),
            material_cost: parts.material,
            processing: parts.processing,
            processing_cost: parts.processing.total(),
            mold_base_cost: parts.mold_base,
            setup_fee: parts.setup,
            subtotal,
            discount_rate,
            discount_percent: percent_label(discount_rate),
            discount_amount,
            total_price,
            price_per_unit,
            lead_time_days: parts.lead_time_days,
            process_recommendations: drivers.process_recommendations.clone(),
        })
    }

    fn detailed(
        &self,
        drivers: &CostDrivers,
        material: &MaterialGrade,
        finish: &SurfaceFinish,
        request: &PricingRequest,
    ) -> Result<CostParts, PricingError> {
        let mold_base = mold_base_cost(
            self.catalog,
            request.mold_base.as_ref(),
            request.cad_base.as_ref(),
        )?;

        Ok(CostParts {
            material: drivers.volume_cm3 * MATERIAL_WASTE_FACTOR * material.price_per_cm3,
            processing: self.processing(drivers, finish),
            mold_base,
            setup: setup_fee(self.catalog, request.mold_base.as_ref()),
            lead_time_days: None,
        })
    }

    fn processing(&self, drivers: &CostDrivers, finish: &SurfaceFinish) -> ProcessingCosts {
        let rates = &self.catalog.hourly_rates;
        let volume = drivers.volume_cm3;
        let factor = drivers.complexity_factor();

        let machining_hours = volume * MACHINING_MINUTES_PER_CM3 * (1.0 + factor * 0.5) / 60.0;
        let machining_rate = if factor > 0.7 {
            rates.cnc_5_axis
        } else if factor > 0.4 {
            rates.cnc_3_axis
        } else {
            rates.cnc_3_axis * SIMPLE_PART_RATE_FACTOR
        };
        let machining = machining_hours * machining_rate;

        let edm = if finish.id == "edm" || factor > 0.8 {
            volume * EDM_MINUTES_PER_CM3 / 60.0 * rates.edm
        } else {
            0.0
        };

        ProcessingCosts {
            machining_hours,
            machining_rate,
            machining,
            finish: machining * (finish.multiplier - 1.0) * FINISH_SURCHARGE,
            edm,
            manual_finishing: volume * FINISHING_MINUTES_PER_CM3 * finish.multiplier / 60.0
                * rates.finishing,
            assembly: (8.0 + factor * 4.0) * rates.assembly,
            quality: (4.0 + factor * 2.0) * rates.quality,
        }
    }

    fn simple(
        &self,
        drivers: &CostDrivers,
        material: &MaterialGrade,
        finish: &SurfaceFinish,
        request: &PricingRequest,
    ) -> CostParts {
        let pieces = request.effective_quantity();
        let per_piece_material = drivers.volume_cm3 * material.price_per_cm3;
        let per_piece_finish = per_piece_material * (finish.multiplier - 1.0);

        CostParts {
            material: per_piece_material * pieces as f64,
            processing: ProcessingCosts {
                finish: per_piece_finish * pieces as f64,
                ..ProcessingCosts::default()
            },
            mold_base: 0.0,
            setup: self.catalog.fees.simple_setup * pieces as f64,
            lead_time_days: Some(MIN_LEAD_TIME_DAYS.max(pieces / 10 + 3)),
        }
    }
}

/// Pre-discount components shared by both strategies
struct CostParts {
    material: f64,
    processing: ProcessingCosts,
    mold_base: f64,
    setup: f64,
    lead_time_days: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn drivers(volume: f64, score: f64) -> CostDrivers {
        CostDrivers::new(volume, score).unwrap()
    }

    #[test]
    fn test_material_cost_includes_waste() {
        let model = CostModel::standard();
        let breakdown = model
            .price_drivers(&drivers(1000.0, 10.0), &PricingRequest::default())
            .unwrap();
        assert_relative_eq!(breakdown.material_cost, 747.5, epsilon = 1e-9);
        assert_eq!(breakdown.rounded().material_cost, 747.5);
    }

    #[test]
    fn test_detailed_processing() {
        let model = CostModel::standard();
        // factor 1.0: 5-axis, EDM on, finish multiplier 1.5
        let breakdown = model
            .price_drivers(&drivers(120.0, 50.0), &PricingRequest::new("H13", "polished", 1))
            .unwrap();
        let p = breakdown.processing;

        let hours = 120.0 * 0.5 * 1.5 / 60.0;
        assert_relative_eq!(p.machining_hours, hours);
        assert_eq!(p.machining_rate, 85.0);
        assert_relative_eq!(p.machining, hours * 85.0);
        assert_relative_eq!(p.finish, hours * 85.0 * 0.5 * 0.3);
        assert_relative_eq!(p.edm, 120.0 * 0.2 / 60.0 * 75.0);
        assert_relative_eq!(p.manual_finishing, 120.0 * 0.1 * 1.5 / 60.0 * 45.0);
        assert_relative_eq!(p.assembly, 12.0 * 50.0);
        assert_relative_eq!(p.quality, 6.0 * 60.0);
        assert_relative_eq!(breakdown.processing_cost, p.total());
        assert_eq!(breakdown.mold_base_cost, 3000.0);
        assert_eq!(breakdown.setup_fee, 2500.0);
    }

    #[test]
    fn test_rate_tiers() {
        let model = CostModel::standard();
        let rate = |score: f64| {
            model
                .price_drivers(&drivers(10.0, score), &PricingRequest::default())
                .unwrap()
                .processing
                .machining_rate
        };
        assert_relative_eq!(rate(10.0), 55.0 * 0.9);
        assert_eq!(rate(25.0), 55.0);
        assert_eq!(rate(40.0), 85.0);
    }

    #[test]
    fn test_edm_finish_forces_edm() {
        let model = CostModel::standard();
        let breakdown = model
            .price_drivers(&drivers(60.0, 0.0), &PricingRequest::new("P20", "edm", 1))
            .unwrap();
        assert_relative_eq!(breakdown.processing.edm, 60.0 * 0.2 / 60.0 * 75.0);

        let plain = model
            .price_drivers(&drivers(60.0, 0.0), &PricingRequest::default())
            .unwrap();
        assert_eq!(plain.processing.edm, 0.0);
    }

    #[test]
    fn test_discount_invariant() {
        let model = CostModel::standard();
        for quantity in [1, 9, 10, 49, 50, 99, 100, 250] {
            let b = model
                .price_drivers(&drivers(500.0, 30.0), &PricingRequest::new("P20", "ground", quantity))
                .unwrap();
            assert_relative_eq!(b.total_price, b.subtotal * (1.0 - b.discount_rate));
            assert_relative_eq!(b.discount_amount, b.subtotal * b.discount_rate);
            assert_relative_eq!(b.price_per_unit, b.total_price / quantity as f64);
        }
    }

    #[test]
    fn test_non_positive_quantity() {
        let model = CostModel::standard();
        for quantity in [0, -5] {
            let b = model
                .price_drivers(&drivers(100.0, 20.0), &PricingRequest::new("P20", "machined", quantity))
                .unwrap();
            assert_eq!(b.discount_rate, 0.0);
            assert_eq!(b.price_per_unit, 0.0);
            assert_eq!(b.total_price, b.subtotal);
            assert_eq!(b.quantity, quantity);
        }
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        let model = CostModel::standard();
        let b = model
            .price_drivers(&drivers(100.0, 20.0), &PricingRequest::new("UNOBTAINIUM", "sparkly", 1))
            .unwrap();
        assert_eq!(b.material_id, "P20");
        assert_eq!(b.finish_id, "machined");
    }

    #[test]
    fn test_simple_strategy() {
        let model = CostModel::standard().with_strategy(PricingStrategy::Simple);
        let b = model
            .price_drivers(&drivers(100.0, 20.0), &PricingRequest::new("H13", "polished", 20))
            .unwrap();

        // Per piece: 85 material, 42.5 finish, 500 setup
        assert_relative_eq!(b.material_cost, 85.0 * 20.0, epsilon = 1e-9);
        assert_relative_eq!(b.processing.finish, 42.5 * 20.0, epsilon = 1e-9);
        assert_relative_eq!(b.setup_fee, 500.0 * 20.0);
        assert_eq!(b.mold_base_cost, 0.0);
        assert_eq!(b.discount_rate, 0.05);
        assert_relative_eq!(b.price_per_unit, 627.5 * 0.95, epsilon = 1e-9);
        assert_eq!(b.lead_time_days, Some(5));
        assert_eq!(b.strategy, PricingStrategy::Simple);
    }

    #[test]
    fn test_simple_lead_time() {
        let model = CostModel::standard().with_strategy(PricingStrategy::Simple);
        let lead = |quantity: i64| {
            model
                .price_drivers(&drivers(1.0, 0.0), &PricingRequest::new("P20", "machined", quantity))
                .unwrap()
                .lead_time_days
        };
        assert_eq!(lead(1), Some(5));
        assert_eq!(lead(25), Some(5));
        assert_eq!(lead(100), Some(13));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Simple".parse::<PricingStrategy>(), Ok(PricingStrategy::Simple));
        assert!("fancy".parse::<PricingStrategy>().is_err());
        assert_eq!(PricingStrategy::Detailed.to_string(), "detailed");
    }

    #[test]
    fn test_request_json() {
        let request: PricingRequest = serde_json::from_str(
            r#"{"material": "718", "finish": "ground", "quantity": 12,
                "moldBase": {"conformalCooling": true}}"#,
        )
        .unwrap();
        assert_eq!(request.quantity, 12);
        assert!(request.mold_base.unwrap().conformal_cooling);
        assert!(request.cad_base.is_none());
    }
}
