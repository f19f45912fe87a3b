// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Metamold mold quoting kernel
//!
//! Analyzes triangulated part meshes and estimates the cost of the injection
//! mold that produces them. The analysis reports volume, area, inertia,
//! topology and a heuristic complexity score; the cost model turns those
//! figures into an itemized quote.
//!
//! ```no_run
//! use metamold::{Pipeline, PricingRequest};
//! use std::path::Path;
//!
//! let report = Pipeline::standard()
//!     .quote_file(Path::new("part.stl"), &PricingRequest::new("H13", "polished", 10))?;
//! println!("{} {}", report.quote.total_price, report.quote.currency);
//! # Ok::<(), metamold::Error>(())
//! ```

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod pipeline;
pub mod pricing;

pub use analysis::{GeometryAnalyzer, GeometryStatistics, LengthUnit};
pub use catalog::Catalog;
pub use config::QuoteConfig;
pub use error::{Error, Result};
pub use geometry::{Mesh, Primitive};
pub use io::{MeshImporter, MeshLoader, MeshSource};
pub use pipeline::{Pipeline, QuoteReport};
pub use pricing::{CostBreakdown, CostModel, PricingRequest, PricingStrategy};

/// Analyze a mesh and price it with the built-in catalog
pub fn quote(mesh: &Mesh, request: &PricingRequest) -> Result<CostBreakdown> {
    let stats = GeometryAnalyzer::new().analyze(mesh)?;
    Ok(CostModel::standard().price(&stats, request)?.rounded())
}
