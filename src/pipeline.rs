// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Load, analyze and price in one call

use crate::analysis::{GeometryAnalyzer, GeometryStatistics};
use crate::catalog::Catalog;
use crate::config::QuoteConfig;
use crate::error::Result;
use crate::geometry::Mesh;
use crate::io::{LoadedMesh, MeshLoader, MeshSource};
use crate::pricing::{CostBreakdown, CostModel, PricingRequest, PricingStrategy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Combined analysis and quote for one part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteReport {
    pub file: Option<PathBuf>,
    pub source: MeshSource,
    pub generated_at: DateTime<Utc>,
    pub statistics: GeometryStatistics,
    /// Rounded to cents
    pub quote: CostBreakdown,
}

/// Mesh loader, analyzer and cost model wired together
#[derive(Debug, Clone)]
pub struct Pipeline {
    loader: MeshLoader,
    analyzer: GeometryAnalyzer,
    catalog: Catalog,
    strategy: PricingStrategy,
}

impl Pipeline {
    pub fn new(
        loader: MeshLoader,
        analyzer: GeometryAnalyzer,
        catalog: Catalog,
        strategy: PricingStrategy,
    ) -> Self {
        Self {
            loader,
            analyzer,
            catalog,
            strategy,
        }
    }

    /// Standard importers, millimeter units, built-in catalog
    pub fn standard() -> Self {
        Self::new(
            MeshLoader::standard(),
            GeometryAnalyzer::new(),
            Catalog::standard().clone(),
            PricingStrategy::Detailed,
        )
    }

    pub fn from_config(config: &QuoteConfig) -> Result<Self> {
        Ok(Self::new(
            MeshLoader::standard().with_demo_fallback(config.demo_fallback),
            GeometryAnalyzer::with_unit(config.unit),
            config.load_catalog()?,
            config.strategy,
        ))
    }

    pub fn loader(&self) -> &MeshLoader {
        &self.loader
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cost_model(&self) -> CostModel<'_> {
        CostModel::new(&self.catalog).with_strategy(self.strategy)
    }

    pub fn load(&self, path: &Path) -> Result<LoadedMesh> {
        Ok(self.loader.load(path)?)
    }

    pub fn analyze_file(&self, path: &Path) -> Result<(MeshSource, GeometryStatistics)> {
        let loaded = self.load(path)?;
        let stats = self.analyzer.analyze(&loaded.mesh)?;
        Ok((loaded.source, stats))
    }

    pub fn quote_file(&self, path: &Path, request: &PricingRequest) -> Result<QuoteReport> {
        let loaded = self.load(path)?;
        let mut report = self.quote_mesh(&loaded.mesh, loaded.source, request)?;
        report.file = Some(path.to_path_buf());
        Ok(report)
    }

    /// Analyze and price a mesh that is already in memory
    pub fn quote_mesh(
        &self,
        mesh: &Mesh,
        source: MeshSource,
        request: &PricingRequest,
    ) -> Result<QuoteReport> {
        let statistics = self.analyzer.analyze(mesh)?;
        let quote = self.cost_model().price(&statistics, request)?.rounded();

        info!(
            volume = statistics.volume,
            score = statistics.complexity_metrics.complexity_score,
            total = quote.total_price,
            currency = %quote.currency,
            demo = source.is_demo(),
            "quote ready"
        );

        Ok(QuoteReport {
            file: None,
            source,
            generated_at: Utc::now(),
            statistics,
            quote,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
