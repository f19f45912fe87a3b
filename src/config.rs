// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Quoting configuration

use crate::analysis::LengthUnit;
use crate::catalog::Catalog;
use crate::error::ConfigError;
use crate::pricing::PricingStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File read by [`QuoteConfig::load`] from the working directory
pub const CONFIG_FILE: &str = "metamold.toml";

/// Quoting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Replacement catalog TOML; the built-in tables when unset
    pub catalog: Option<PathBuf>,
    pub strategy: PricingStrategy,
    /// Unit of incoming mesh coordinates
    pub unit: LengthUnit,
    /// Substitute labeled demo geometry when an import fails
    pub demo_fallback: bool,
    pub material: String,
    pub finish: String,
    pub quantity: i64,
    /// Batch worker threads; rayon's default when unset
    pub parallelism: Option<usize>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            strategy: PricingStrategy::Detailed,
            unit: LengthUnit::Millimeter,
            demo_fallback: false,
            material: "P20".into(),
            finish: "machined".into(),
            quantity: 1,
            parallelism: None,
        }
    }
}

impl QuoteConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `metamold.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `METAMOLD_*` overrides from `lookup`
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(catalog) = lookup("METAMOLD_CATALOG") {
            self.catalog = Some(PathBuf::from(catalog));
        }

        if let Some(strategy) = lookup("METAMOLD_STRATEGY") {
            self.strategy = strategy
                .parse()
                .map_err(|_| invalid("METAMOLD_STRATEGY", &strategy))?;
        }

        if let Some(unit) = lookup("METAMOLD_UNIT") {
            self.unit = unit.parse().map_err(|_| invalid("METAMOLD_UNIT", &unit))?;
        }

        if let Some(demo) = lookup("METAMOLD_DEMO") {
            self.demo_fallback = match demo.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(invalid("METAMOLD_DEMO", &demo)),
            };
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured catalog, or a copy of the built-in one
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog {
            Some(path) => Catalog::from_file(path),
            None => Ok(Catalog::standard().clone()),
        }
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.into(),
        value: value.into(),
    }
}
