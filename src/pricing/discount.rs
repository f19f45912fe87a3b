// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Quantity discount tiers

use serde::{Deserialize, Serialize};

/// Rate applied from `min_quantity` pieces upwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_quantity: u64,
    /// Fraction taken off the subtotal, in [0, 1)
    pub rate: f64,
}

/// Step function from order quantity to discount rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountSchedule {
    /// Sorted by descending `min_quantity`
    tiers: Vec<DiscountTier>,
}

impl DiscountSchedule {
    /// 5 % from 10 pieces, 10 % from 50, 15 % from 100
    pub fn standard() -> Self {
        Self::new(vec![
            DiscountTier {
                min_quantity: 10,
                rate: 0.05,
            },
            DiscountTier {
                min_quantity: 50,
                rate: 0.10,
            },
            DiscountTier {
                min_quantity: 100,
                rate: 0.15,
            },
        ])
    }

    pub fn new(mut tiers: Vec<DiscountTier>) -> Self {
        tiers.sort_by(|a, b| b.min_quantity.cmp(&a.min_quantity));
        Self { tiers }
    }

    /// No discount at any quantity
    pub fn none() -> Self {
        Self { tiers: Vec::new() }
    }

    pub fn tiers(&self) -> impl Iterator<Item = &DiscountTier> {
        self.tiers.iter().rev()
    }

    /// Rate of the highest tier reached by `quantity`
    pub fn rate_for(&self, quantity: u64) -> f64 {
        self.tiers
            .iter()
            .find(|t| quantity >= t.min_quantity)
            .map(|t| t.rate)
            .unwrap_or(0.0)
    }
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

/// Whole-percent label such as `"15%"`
pub fn percent_label(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}
