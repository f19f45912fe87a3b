// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::batch::BatchOutcome;
use crate::analysis::GeometryStatistics;
use crate::catalog::Catalog;
use crate::io::MeshSource;
use crate::pricing::CostBreakdown;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    fn rule() {
        println!("{}", "━".repeat(80).bright_black());
    }

    fn header(label: &str, file: &str) {
        println!();
        Self::rule();
        println!("{} {}", label.bold(), file.cyan());
        Self::rule();
    }

    /// Warn loudly when the numbers describe placeholder geometry
    pub fn report_source(source: &MeshSource) {
        if let MeshSource::Demo { reason } = source {
            println!(
                "{} {}",
                "⚠️  DEMO GEOMETRY:".yellow().bold(),
                format!("import failed ({}), figures below are not for this part", reason).yellow()
            );
        }
    }

    pub fn report_statistics(file: &str, stats: &GeometryStatistics) {
        Self::header("Analysis:", file);

        let info = &stats.mesh_info;
        let unit = stats.unit.as_str();
        Self::print_field("Volume", format!("{:.2} cm³", stats.volume));
        Self::print_field("Surface Area", format!("{:.2} cm²", stats.area));
        Self::print_field(
            "Dimensions",
            format!(
                "{:.2} × {:.2} × {:.2} {}",
                stats.dimensions.width, stats.dimensions.height, stats.dimensions.depth, unit
            ),
        );
        Self::print_field(
            "Mesh",
            format!(
                "{} vertices, {} faces, {} edges",
                info.vertex_count, info.face_count, info.edge_count
            ),
        );
        Self::print_flag("Watertight", info.is_watertight);
        Self::print_flag("Convex", info.is_convex);
        if let Some(genus) = info.genus {
            Self::print_field("Genus", genus.to_string());
        }
        if stats.inertia_is_placeholder() {
            Self::print_field("Inertia", "not computable".yellow().to_string());
        }

        let complexity = &stats.complexity_metrics;
        println!("\n{}", "Complexity:".bold());
        Self::print_field("Score", format!("{:.1} / 100", complexity.complexity_score));
        Self::print_field("Difficulty", Self::difficulty(stats));
        Self::print_field("Aspect Ratio", format!("{:.2}", complexity.average_aspect_ratio));

        let manufacturing = &stats.manufacturing_analysis;
        println!("\n{}", "Manufacturing:".bold());
        Self::print_field("Material", manufacturing.material_recommendation.to_string());
        Self::print_field("Finish", manufacturing.finish_recommendation.to_string());
        Self::print_field(
            "Machining",
            format!("{:.1} h", manufacturing.estimated_machining_hours),
        );
        for feature in &manufacturing.critical_features {
            println!("  {} {}", "•".bright_black(), feature);
        }
        for process in &manufacturing.process_recommendations {
            println!("  {} {}", "→".bright_blue(), process);
        }
        Self::rule();
    }

    fn difficulty(stats: &GeometryStatistics) -> String {
        use crate::analysis::DifficultyRating::*;
        let rating = stats.complexity_metrics.difficulty_rating;
        let text = rating.to_string();
        match rating {
            Low => text.green().to_string(),
            Medium => text.yellow().to_string(),
            High | VeryHigh => text.red().to_string(),
        }
    }

    pub fn report_quote(file: &str, quote: &CostBreakdown) {
        Self::header("Quote:", file);

        let currency = quote.currency.as_str();
        let money = |value: f64| format!("{:>12.2} {}", value, currency);

        Self::print_field("Strategy", quote.strategy.to_string());
        Self::print_field(
            "Material",
            format!("{} ({})", quote.material_name, quote.material_id),
        );
        Self::print_field("Finish", format!("{} ({})", quote.finish_name, quote.finish_id));
        println!();
        Self::print_field("Material Cost", money(quote.material_cost));
        Self::print_field("Processing", money(quote.processing_cost));
        Self::print_field("Mold Base", money(quote.mold_base_cost));
        Self::print_field("Setup", money(quote.setup_fee));
        Self::print_field("Subtotal", money(quote.subtotal));
        Self::print_field(
            "Discount",
            format!("{} ({})", money(quote.discount_amount), quote.discount_percent),
        );
        println!(
            "  {} {}",
            "Total:".bold(),
            money(quote.total_price).green().bold()
        );
        if quote.quantity > 0 {
            Self::print_field(
                "Per Unit",
                format!("{} × {}", money(quote.price_per_unit), quote.quantity),
            );
        }
        if let Some(days) = quote.lead_time_days {
            Self::print_field("Lead Time", format!("{} days", days));
        }
        Self::rule();
    }

    pub fn report_catalog(catalog: &Catalog) {
        println!("\n{} ({})", "Materials".bold(), catalog.currency);
        for m in &catalog.materials {
            println!(
                "  {:<10} {:<28} {:>6.2}/cm³  {}",
                m.id.cyan(),
                m.name,
                m.price_per_cm3,
                m.hardness.bright_black()
            );
        }

        println!("\n{}", "Finishes".bold());
        for f in &catalog.finishes {
            println!(
                "  {:<10} {:<12} ×{:<5.1} Ra {:.1} µm",
                f.id.cyan(),
                f.name,
                f.multiplier,
                f.roughness_ra
            );
        }

        println!("\n{}", "Mold Bases".bold());
        for b in &catalog.mold_bases {
            println!("  {:<18} {:<16} {:>8.0}", b.id.cyan(), b.series, b.base_price);
        }

        println!("\n{}", "Plate Materials".bold());
        for p in &catalog.plate_materials {
            println!("  {:<24} {:>+8.0}", p.id.cyan(), p.addon);
        }
    }

    pub fn report_batch(outcomes: &[BatchOutcome], elapsed: Duration) {
        Self::header("Batch:", &format!("{} files", outcomes.len()));

        let mut total = 0.0;
        for outcome in outcomes {
            let name = outcome.path.display().to_string();
            match &outcome.result {
                Ok(report) => {
                    total += report.quote.total_price;
                    let demo = if report.source.is_demo() {
                        " (demo)".yellow().to_string()
                    } else {
                        String::new()
                    };
                    println!(
                        "  {} {:<50} {:>12.2} {}{}",
                        "✓".green(),
                        name,
                        report.quote.total_price,
                        report.quote.currency,
                        demo
                    );
                }
                Err(err) => println!("  {} {:<50} {}", "✗".red(), name, err.to_string().red()),
            }
        }

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        println!();
        Self::print_field("Quoted", (outcomes.len() - failed).to_string());
        Self::print_field("Failed", failed.to_string());
        Self::print_field("Sum", format!("{:.2}", total));
        Self::print_field("Time", Self::format_duration(elapsed));
        Self::rule();
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn print_field(name: &str, value: String) {
        println!("  {} {}", format!("{:<14}", format!("{}:", name)).bright_black(), value);
    }

    fn print_flag(name: &str, value: bool) {
        let text = if value { "yes".green() } else { "no".yellow() };
        Self::print_field(name, text.to_string());
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
