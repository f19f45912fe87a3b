// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mold base configurations and their costs

use crate::catalog::Catalog;
use crate::error::PricingError;
use serde::{Deserialize, Serialize};

const DEFAULT_PLATE_SIZE: f64 = 296.0;
/// Currency units per 100 cm² of plate footprint (plate sizes in mm)
const PLATE_PRICE_PER_AREA: f64 = 400.0;

fn default_plate_size() -> f64 {
    DEFAULT_PLATE_SIZE
}

/// Dimensional mold base, priced by plate footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoldBaseConfig {
    #[serde(default = "default_plate_size")]
    pub plate_width: f64,
    #[serde(default = "default_plate_size")]
    pub plate_length: f64,
    #[serde(default)]
    pub hot_runner: bool,
    #[serde(default)]
    pub conformal_cooling: bool,
    #[serde(default)]
    pub double_extraction: bool,
}

impl Default for MoldBaseConfig {
    fn default() -> Self {
        Self {
            plate_width: DEFAULT_PLATE_SIZE,
            plate_length: DEFAULT_PLATE_SIZE,
            hot_runner: false,
            conformal_cooling: false,
            double_extraction: false,
        }
    }
}

impl MoldBaseConfig {
    pub fn cost(&self, catalog: &Catalog) -> Result<f64, PricingError> {
        for (field, value) in [("plateWidth", self.plate_width), ("plateLength", self.plate_length)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::invalid(field, format!("{} is not a valid size", value)));
            }
        }

        let extras = &catalog.extras;
        let mut cost = self.plate_width * self.plate_length / 10_000.0 * PLATE_PRICE_PER_AREA;
        if self.hot_runner {
            cost += extras.hot_runner;
        }
        if self.conformal_cooling {
            cost += extras.conformal_cooling;
        }
        if self.double_extraction {
            cost += extras.double_extraction;
        }
        Ok(cost)
    }
}

/// Standard base chosen from a supplier catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadBaseConfig {
    /// Catalog supplier id; the catalog default when absent
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub plate_material: Option<String>,
    #[serde(default)]
    pub insulation_plates: bool,
    #[serde(default)]
    pub lifting_holes: bool,
}

impl CadBaseConfig {
    pub fn cost(&self, catalog: &Catalog) -> Result<f64, PricingError> {
        let supplier = self.supplier.as_deref().unwrap_or(&catalog.default_supplier);
        let plate = self
            .plate_material
            .as_deref()
            .unwrap_or(&catalog.default_plate_material);

        let mut cost = catalog.resolve_mold_base(supplier)?.base_price + catalog.plate_addon(plate);
        if self.insulation_plates {
            cost += catalog.extras.insulation;
        }
        if self.lifting_holes {
            cost += catalog.extras.lifting_holes;
        }
        Ok(cost)
    }
}

/// Supplier base takes precedence over a dimensional base; neither gives the
/// flat default
pub fn mold_base_cost(
    catalog: &Catalog,
    mold_base: Option<&MoldBaseConfig>,
    cad_base: Option<&CadBaseConfig>,
) -> Result<f64, PricingError> {
    match (cad_base, mold_base) {
        (Some(cad), _) => cad.cost(catalog),
        (None, Some(legacy)) => legacy.cost(catalog),
        (None, None) => Ok(catalog.fees.default_mold_base),
    }
}

/// Project setup, plus engineering when conformal cooling is requested
pub fn setup_fee(catalog: &Catalog, mold_base: Option<&MoldBaseConfig>) -> f64 {
    let mut fee = catalog.fees.setup;
    if mold_base.is_some_and(|m| m.conformal_cooling) {
        fee += catalog.fees.conformal_cooling_engineering;
    }
    fee
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_mold_base() {
        let catalog = Catalog::standard();
        assert_eq!(mold_base_cost(catalog, None, None).unwrap(), 3000.0);
        assert_eq!(setup_fee(catalog, None), 2500.0);
    }

    #[test]
    fn test_legacy_config_cost() {
        let catalog = Catalog::standard();
        let config = MoldBaseConfig {
            hot_runner: true,
            conformal_cooling: true,
            ..MoldBaseConfig::default()
        };
        let expected = 296.0 * 296.0 / 10_000.0 * 400.0 + 3500.0 + 5000.0;
        assert_relative_eq!(config.cost(catalog).unwrap(), expected);
        assert_eq!(setup_fee(catalog, Some(&config)), 4000.0);
    }

    #[test]
    fn test_cad_config_cost() {
        let catalog = Catalog::standard();
        let config = CadBaseConfig {
            supplier: Some("DME Premium".into()),
            plate_material: Some("Steel 1.2344 (H13)".into()),
            insulation_plates: true,
            lifting_holes: true,
        };
        assert_relative_eq!(config.cost(catalog).unwrap(), 4200.0 + 800.0 + 800.0 + 300.0);
    }

    #[test]
    fn test_cad_config_defaults_and_fallbacks() {
        let catalog = Catalog::standard();
        assert_eq!(CadBaseConfig::default().cost(catalog).unwrap(), 3500.0);

        let unknown = CadBaseConfig {
            supplier: Some("ACME".into()),
            plate_material: Some("Cheese".into()),
            ..CadBaseConfig::default()
        };
        assert_eq!(unknown.cost(catalog).unwrap(), 3500.0);
    }

    #[test]
    fn test_cad_base_takes_precedence() {
        let catalog = Catalog::standard();
        let legacy = MoldBaseConfig::default();
        let cad = CadBaseConfig::default();
        assert_eq!(mold_base_cost(catalog, Some(&legacy), Some(&cad)).unwrap(), 3500.0);
    }

    #[test]
    fn test_camel_case_keys() {
        let config: MoldBaseConfig =
            serde_json::from_str(r#"{"plateWidth": 400, "hotRunner": true}"#).unwrap();
        assert_eq!(config.plate_width, 400.0);
        assert_eq!(config.plate_length, 296.0);
        assert!(config.hot_runner);

        let cad: CadBaseConfig =
            serde_json::from_str(r#"{"supplier": "FUTABA Standard", "liftingHoles": true}"#).unwrap();
        assert_eq!(cad.supplier.as_deref(), Some("FUTABA Standard"));
        assert!(cad.lifting_holes);
    }

    #[test]
    fn test_cad_config_accepts_plate_alias() {
        let cad: CadBaseConfig =
            serde_json::from_str(r#"{"supplier": "HASCO Premium", "plateMaterial": "Aço 1.2344 (H13)"}"#)
                .unwrap();
        assert_eq!(cad.cost(Catalog::standard()).unwrap(), 4500.0 + 800.0);
    }

    #[test]
    fn test_negative_plate_is_rejected() {
        let config = MoldBaseConfig {
            plate_width: -1.0,
            ..MoldBaseConfig::default()
        };
        assert!(config.cost(Catalog::standard()).is_err());
    }
}
