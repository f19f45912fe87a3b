// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reference price tables consulted by the cost model.
//!
//! A catalog is read-only once built. The built-in tables are available
//! process-wide through [`Catalog::standard`]; a replacement can be loaded
//! from TOML with [`Catalog::from_file`].

use crate::error::{ConfigError, PricingError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

/// Mold steel or alloy, priced by volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialGrade {
    pub id: String,
    pub name: String,
    /// Currency units per cm³
    pub price_per_cm3: f64,
    pub hardness: String,
    /// g/cm³
    pub density: f64,
}

/// Surface finish and its effect on processing cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceFinish {
    pub id: String,
    pub name: String,
    pub multiplier: f64,
    /// Surface roughness Ra in µm
    pub roughness_ra: f64,
    pub description: String,
}

/// Standard mold base from a supplier catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoldBaseSupplier {
    pub id: String,
    pub series: String,
    pub base_price: f64,
}

/// Plate material surcharge (may be negative)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateMaterial {
    pub id: String,
    pub addon: f64,
    /// Alternative names clients send for the same plate
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl PlateMaterial {
    pub fn matches(&self, name: &str) -> bool {
        self.id == name || self.aliases.iter().any(|a| a == name)
    }
}

/// Labor rates per hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRates {
    pub cnc_3_axis: f64,
    pub cnc_5_axis: f64,
    pub edm: f64,
    pub finishing: f64,
    pub assembly: f64,
    pub quality: f64,
}

/// Optional mold base equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoldBaseExtras {
    pub hot_runner: f64,
    pub conformal_cooling: f64,
    pub double_extraction: f64,
    pub lifting_holes: f64,
    pub insulation: f64,
}

/// Flat fees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    /// Project setup for the detailed model
    pub setup: f64,
    /// Added to setup when conformal cooling is engineered
    pub conformal_cooling_engineering: f64,
    /// Mold base cost when no base is configured
    pub default_mold_base: f64,
    /// Per-piece setup for the simple calculator
    pub simple_setup: f64,
}

/// All pricing reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub currency: String,
    pub default_material: String,
    pub default_finish: String,
    pub default_supplier: String,
    pub default_plate_material: String,
    pub materials: Vec<MaterialGrade>,
    pub finishes: Vec<SurfaceFinish>,
    pub mold_bases: Vec<MoldBaseSupplier>,
    pub plate_materials: Vec<PlateMaterial>,
    pub hourly_rates: HourlyRates,
    pub extras: MoldBaseExtras,
    pub fees: Fees,
}

static STANDARD: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Shared built-in catalog, initialized on first use
    pub fn standard() -> &'static Catalog {
        STANDARD.get_or_init(Catalog::builtin)
    }

    /// Built-in price tables (EUR)
    pub fn builtin() -> Self {
        let material = |id: &str, name: &str, price: f64, hardness: &str, density: f64| {
            MaterialGrade {
                id: id.into(),
                name: name.into(),
                price_per_cm3: price,
                hardness: hardness.into(),
                density,
            }
        };
        let finish = |id: &str, name: &str, multiplier: f64, ra: f64, description: &str| {
            SurfaceFinish {
                id: id.into(),
                name: name.into(),
                multiplier,
                roughness_ra: ra,
                description: description.into(),
            }
        };
        let base = |id: &str, series: &str, price: f64| MoldBaseSupplier {
            id: id.into(),
            series: series.into(),
            base_price: price,
        };
        let plate = |id: &str, alias: &str, addon: f64| PlateMaterial {
            id: id.into(),
            addon,
            aliases: vec![alias.into()],
        };

        Self {
            currency: "EUR".into(),
            default_material: "P20".into(),
            default_finish: "machined".into(),
            default_supplier: "HASCO Standard".into(),
            default_plate_material: "Steel 1.1730 (C45W)".into(),
            materials: vec![
                material("H13", "H13 Hot-Work Steel", 0.85, "48-52 HRC", 7.8),
                material("P20", "P20 Mold Steel", 0.65, "28-32 HRC", 7.85),
                material("718", "718 Pre-Hardened Steel", 0.75, "32-38 HRC", 7.9),
                material("ALUMINUM", "Aluminium 7075", 0.45, "60-65 HB", 2.81),
                material("S7", "S7 Shock-Resisting Steel", 0.70, "54-58 HRC", 7.7),
            ],
            finishes: vec![
                finish("machined", "Machined", 1.0, 1.6, "Standard machining finish"),
                finish("ground", "Ground", 1.3, 0.8, "Precision ground surface"),
                finish("polished", "Polished", 1.5, 0.2, "Mirror polish"),
                finish("textured", "Textured", 1.8, 3.2, "Chemically etched decorative texture"),
                finish("edm", "EDM", 2.2, 0.4, "Electrical discharge machined finish"),
            ],
            mold_bases: vec![
                base("HASCO Standard", "Z40/41", 3500.0),
                base("HASCO Premium", "Z40/41 Premium", 4500.0),
                base("DME Standard", "Mega", 3200.0),
                base("DME Premium", "Mega Premium", 4200.0),
                base("FUTABA Standard", "NB/NP", 3000.0),
                base("FUTABA Premium", "NB/NP Premium", 4000.0),
            ],
            plate_materials: vec![
                plate("Steel 1.1730 (C45W)", "Aço 1.1730 (C45W)", 0.0),
                plate("Steel 1.2311 (P20)", "Aço 1.2311 (P20)", 200.0),
                plate("Steel 1.2312 (P20+S)", "Aço 1.2312 (P20+S)", 350.0),
                plate("Steel 1.2344 (H13)", "Aço 1.2344 (H13)", 800.0),
                plate("Aluminium 7075", "Alumínio 7075", -500.0),
                plate("Steel 1.2767 (H13 Mod)", "Aço 1.2767 (H13 Mod)", 1200.0),
            ],
            hourly_rates: HourlyRates {
                cnc_3_axis: 55.0,
                cnc_5_axis: 85.0,
                edm: 75.0,
                finishing: 45.0,
                assembly: 50.0,
                quality: 60.0,
            },
            extras: MoldBaseExtras {
                hot_runner: 3500.0,
                conformal_cooling: 5000.0,
                double_extraction: 1500.0,
                lifting_holes: 300.0,
                insulation: 800.0,
            },
            fees: Fees {
                setup: 2500.0,
                conformal_cooling_engineering: 1500.0,
                default_mold_base: 3000.0,
                simple_setup: 500.0,
            },
        }
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serialize to TOML, suitable for editing and loading back
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that every default refers to an existing entry and that
    /// prices are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, value: &str| ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
        };

        if self.material(&self.default_material).is_none() {
            return Err(invalid("default_material", &self.default_material));
        }
        if self.finish(&self.default_finish).is_none() {
            return Err(invalid("default_finish", &self.default_finish));
        }
        if self.mold_base(&self.default_supplier).is_none() {
            return Err(invalid("default_supplier", &self.default_supplier));
        }
        if let Some(m) = self
            .materials
            .iter()
            .find(|m| !m.price_per_cm3.is_finite() || m.price_per_cm3 < 0.0)
        {
            return Err(invalid("materials.price_per_cm3", &m.id));
        }
        if let Some(f) = self
            .finishes
            .iter()
            .find(|f| !f.multiplier.is_finite() || f.multiplier < 1.0)
        {
            return Err(invalid("finishes.multiplier", &f.id));
        }
        Ok(())
    }

    pub fn material(&self, id: &str) -> Option<&MaterialGrade> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn finish(&self, id: &str) -> Option<&SurfaceFinish> {
        self.finishes.iter().find(|f| f.id == id)
    }

    pub fn mold_base(&self, id: &str) -> Option<&MoldBaseSupplier> {
        self.mold_bases.iter().find(|b| b.id == id)
    }

    pub fn plate_material(&self, id: &str) -> Option<&PlateMaterial> {
        self.plate_materials.iter().find(|p| p.matches(id))
    }

    /// Look up a material, falling back to the default grade for unknown ids
    pub fn resolve_material(&self, id: &str) -> Result<&MaterialGrade, PricingError> {
        resolve(id, "material", &self.default_material, |k| self.material(k))
    }

    /// Look up a finish, falling back to the default finish for unknown ids
    pub fn resolve_finish(&self, id: &str) -> Result<&SurfaceFinish, PricingError> {
        resolve(id, "finish", &self.default_finish, |k| self.finish(k))
    }

    /// Look up a mold base supplier, falling back to the default supplier
    pub fn resolve_mold_base(&self, id: &str) -> Result<&MoldBaseSupplier, PricingError> {
        resolve(id, "supplier", &self.default_supplier, |k| self.mold_base(k))
    }

    /// Plate material surcharge; unknown plate materials add nothing
    pub fn plate_addon(&self, id: &str) -> f64 {
        match self.plate_material(id) {
            Some(plate) => plate.addon,
            None => {
                warn!(plate_material = id, "unknown plate material, no surcharge applied");
                0.0
            }
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn resolve<'a, T>(
    id: &str,
    kind: &'static str,
    default_id: &str,
    lookup: impl Fn(&str) -> Option<&'a T>,
) -> Result<&'a T, PricingError> {
    if let Some(entry) = lookup(id) {
        return Ok(entry);
    }
    warn!(kind, id, fallback = default_id, "unknown catalog key, using default");
    lookup(default_id)
        .ok_or_else(|| PricingError::invalid(kind, format!("catalog has no default `{}`", default_id)))
}
