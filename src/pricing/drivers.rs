// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Validated inputs taken from geometry statistics

use crate::analysis::{GeometryStatistics, ProcessRecommendation};
use crate::error::PricingError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The statistics fields the cost model depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDrivers {
    /// cm³
    pub volume_cm3: f64,
    pub complexity_score: f64,
    #[serde(default)]
    pub process_recommendations: Vec<ProcessRecommendation>,
}

impl CostDrivers {
    pub fn new(volume_cm3: f64, complexity_score: f64) -> Result<Self, PricingError> {
        check_non_negative("volume", volume_cm3)?;
        check_non_negative("complexity_score", complexity_score)?;
        Ok(Self {
            volume_cm3,
            complexity_score,
            process_recommendations: Vec::new(),
        })
    }

    pub fn from_statistics(stats: &GeometryStatistics) -> Result<Self, PricingError> {
        let mut drivers = Self::new(stats.volume, stats.complexity_metrics.complexity_score)?;
        drivers.process_recommendations = stats.manufacturing_analysis.process_recommendations.clone();
        Ok(drivers)
    }

    /// Read drivers from a serialized statistics document.
    ///
    /// Expects `volume` and `complexity_metrics.complexity_score`; process
    /// recommendations are optional.
    pub fn from_json(value: &Value) -> Result<Self, PricingError> {
        let volume = required_number(value.get("volume"), "volume")?;
        let score = required_number(
            value
                .get("complexity_metrics")
                .and_then(|c| c.get("complexity_score")),
            "complexity_metrics.complexity_score",
        )?;

        let mut drivers = Self::new(volume, score)?;
        if let Some(recs) = value
            .get("manufacturing_analysis")
            .and_then(|m| m.get("process_recommendations"))
        {
            drivers.process_recommendations = serde_json::from_value(recs.clone()).map_err(|e| {
                PricingError::invalid("manufacturing_analysis.process_recommendations", e.to_string())
            })?;
        }
        Ok(drivers)
    }

    /// Score / 50; 1.0 is an average part
    pub fn complexity_factor(&self) -> f64 {
        self.complexity_score / 50.0
    }
}

fn required_number(value: Option<&Value>, field: &str) -> Result<f64, PricingError> {
    match value {
        None | Some(Value::Null) => Err(PricingError::invalid(field, "missing")),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| PricingError::invalid(field, format!("expected a number, got {}", v))),
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), PricingError> {
    if !value.is_finite() {
        return Err(PricingError::invalid(field, format!("{} is not finite", value)));
    }
    if value < 0.0 {
        return Err(PricingError::invalid(field, format!("{} is negative", value)));
    }
    Ok(())
}

/// Parse a user-supplied quantity. Zero and negative values are accepted
/// here; the cost model decides how to price them.
pub fn parse_quantity(input: &str) -> Result<i64, PricingError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| PricingError::invalid("quantity", format!("`{}` is not an integer", input)))
}
