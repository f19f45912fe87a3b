// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Itemized pricing result

use super::PricingStrategy;
use crate::analysis::ProcessRecommendation;
use serde::{Deserialize, Serialize};

/// Labor and process costs making up `processing_cost`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingCosts {
    pub machining_hours: f64,
    pub machining_rate: f64,
    pub machining: f64,
    pub finish: f64,
    pub edm: f64,
    pub manual_finishing: f64,
    pub assembly: f64,
    pub quality: f64,
}

impl ProcessingCosts {
    pub fn total(&self) -> f64 {
        self.machining + self.finish + self.edm + self.manual_finishing + self.assembly + self.quality
    }

    fn rounded(&self) -> Self {
        Self {
            machining_hours: round2(self.machining_hours),
            machining_rate: round2(self.machining_rate),
            machining: round2(self.machining),
            finish: round2(self.finish),
            edm: round2(self.edm),
            manual_finishing: round2(self.manual_finishing),
            assembly: round2(self.assembly),
            quality: round2(self.quality),
        }
    }
}

/// Cost estimate for one pricing request.
///
/// Values are kept at full precision; call [`CostBreakdown::rounded`] before
/// presenting them. `total_price` always equals
/// `subtotal × (1 − discount_rate)` on the unrounded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub strategy: PricingStrategy,
    pub currency: String,
    /// As requested, possibly zero or negative
    pub quantity: i64,
    pub material_id: String,
    pub material_name: String,
    pub finish_id: String,
    pub finish_name: String,
    pub material_cost: f64,
    pub processing: ProcessingCosts,
    pub processing_cost: f64,
    pub mold_base_cost: f64,
    pub setup_fee: f64,
    pub subtotal: f64,
    pub discount_rate: f64,
    pub discount_percent: String,
    pub discount_amount: f64,
    pub total_price: f64,
    /// Zero when the requested quantity is not positive
    pub price_per_unit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_time_days: Option<u64>,
    pub process_recommendations: Vec<ProcessRecommendation>,
}

impl CostBreakdown {
    /// Copy with every currency figure rounded to cents
    pub fn rounded(&self) -> Self {
        Self {
            material_cost: round2(self.material_cost),
            processing: self.processing.rounded(),
            processing_cost: round2(self.processing_cost),
            mold_base_cost: round2(self.mold_base_cost),
            setup_fee: round2(self.setup_fee),
            subtotal: round2(self.subtotal),
            discount_amount: round2(self.discount_amount),
            total_price: round2(self.total_price),
            price_per_unit: round2(self.price_per_unit),
            ..self.clone()
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(747.5), 747.5);
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(-0.126), -0.13);
    }

    #[test]
    fn test_processing_total() {
        let costs = ProcessingCosts {
            machining: 10.0,
            finish: 1.0,
            edm: 2.0,
            manual_finishing: 3.0,
            assembly: 400.0,
            quality: 240.0,
            ..ProcessingCosts::default()
        };
        assert_eq!(costs.total(), 656.0);
    }
}
