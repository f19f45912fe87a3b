// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Quote every mesh under a directory in parallel

use crate::error::Result;
use crate::io::MeshLoader;
use crate::pipeline::{Pipeline, QuoteReport};
use crate::pricing::PricingRequest;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result for one discovered file
#[derive(Debug)]
pub struct BatchOutcome {
    pub path: PathBuf,
    pub result: Result<QuoteReport>,
}

/// Files under `root` that the loader has an importer for, sorted by path
pub fn discover(root: &Path, loader: &MeshLoader) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && loader.supports(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Quote each file independently; one failure does not stop the others
pub fn run(
    pipeline: &Pipeline,
    files: &[PathBuf],
    request: &PricingRequest,
    show_progress: bool,
) -> Vec<BatchOutcome> {
    let pb = if show_progress {
        let p = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            p.set_style(style.progress_chars("#>-"));
        }
        Some(p)
    } else {
        None
    };

    let outcomes = files
        .par_iter()
        .map(|path| {
            let result = pipeline.quote_file(path, request);
            if let Some(ref p) = pb {
                p.inc(1);
            }
            BatchOutcome {
                path: path.clone(),
                result,
            }
        })
        .collect();

    if let Some(p) = pb {
        p.finish_and_clear();
    }
    outcomes
}
