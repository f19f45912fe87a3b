// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Metamold CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use metamold::cli::{batch, Reporter};
use metamold::pricing::{parse_quantity, CadBaseConfig, MoldBaseConfig};
use metamold::{LengthUnit, Pipeline, PricingRequest, PricingStrategy, QuoteConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "metamold")]
#[command(about = "Mold cost estimation from part geometry", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: ./metamold.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Unit of mesh coordinates (mm, cm, m, in)
    #[arg(short, long, global = true)]
    unit: Option<LengthUnit>,

    /// Substitute labeled demo geometry when an import fails
    #[arg(long, global = true)]
    demo: bool,

    /// Emit JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Clone)]
struct PricingArgs {
    /// Material id from the catalog
    #[arg(short, long)]
    material: Option<String>,

    /// Finish id from the catalog
    #[arg(short, long)]
    finish: Option<String>,

    /// Number of parts
    #[arg(short, long, allow_hyphen_values = true)]
    quantity: Option<String>,

    /// Pricing strategy (detailed, simple)
    #[arg(short, long)]
    strategy: Option<PricingStrategy>,

    /// Dimensional mold base as JSON, e.g. '{"plateWidth":346,"hotRunner":true}'
    #[arg(long, value_name = "JSON")]
    mold_base: Option<String>,

    /// Supplier mold base as JSON, e.g. '{"supplier":"DME Standard"}'
    #[arg(long, value_name = "JSON")]
    cad_base: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a mesh file
    Analyze {
        /// Input mesh (STL or OBJ)
        input: PathBuf,
    },

    /// Analyze and price a mesh file
    Quote {
        /// Input mesh (STL or OBJ)
        input: PathBuf,

        #[command(flatten)]
        pricing: PricingArgs,
    },

    /// Price every mesh under a directory
    Batch {
        /// Directory to scan
        dir: PathBuf,

        #[command(flatten)]
        pricing: PricingArgs,

        /// Worker threads
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// List catalog entries
    Catalog {
        /// Print the catalog as TOML for editing
        #[arg(long)]
        toml: bool,
    },
}

fn init_tracing(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "metamold=warn",
            1 => "metamold=info",
            2 => "metamold=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;

    let result = match &cli.command {
        Commands::Analyze { input } => analyze_command(&cli, &config, input),
        Commands::Quote { input, pricing } => quote_command(&cli, &config, input, pricing),
        Commands::Batch { dir, pricing, jobs } => {
            batch_command(&cli, &config, dir, pricing, jobs.or(config.parallelism))
        }
        Commands::Catalog { toml } => catalog_command(&cli, &config, *toml),
    };

    if let Err(ref e) = result {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<QuoteConfig> {
    let mut config = match &cli.config {
        Some(path) => QuoteConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => QuoteConfig::load().context("Failed to load configuration")?,
    };
    if let Some(unit) = cli.unit {
        config.unit = unit;
    }
    if cli.demo {
        config.demo_fallback = true;
    }
    Ok(config)
}

fn pipeline_for(config: &QuoteConfig, pricing: Option<&PricingArgs>) -> Result<Pipeline> {
    let mut config = config.clone();
    if let Some(strategy) = pricing.and_then(|p| p.strategy) {
        config.strategy = strategy;
    }
    Pipeline::from_config(&config).context("Failed to build pipeline")
}

fn pricing_request(config: &QuoteConfig, args: &PricingArgs) -> Result<PricingRequest> {
    let quantity = match &args.quantity {
        Some(q) => parse_quantity(q)?,
        None => config.quantity,
    };
    let mut request = PricingRequest::new(
        args.material.clone().unwrap_or_else(|| config.material.clone()),
        args.finish.clone().unwrap_or_else(|| config.finish.clone()),
        quantity,
    );
    if let Some(json) = &args.mold_base {
        let mold_base: MoldBaseConfig =
            serde_json::from_str(json).context("Invalid --mold-base JSON")?;
        request = request.with_mold_base(mold_base);
    }
    if let Some(json) = &args.cad_base {
        let cad_base: CadBaseConfig =
            serde_json::from_str(json).context("Invalid --cad-base JSON")?;
        request = request.with_cad_base(cad_base);
    }
    Ok(request)
}

fn analyze_command(cli: &Cli, config: &QuoteConfig, input: &Path) -> Result<()> {
    let pipeline = pipeline_for(config, None)?;
    let (source, stats) = pipeline.analyze_file(input)?;

    if cli.json {
        let doc = serde_json::json!({ "source": source, "statistics": stats });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        Reporter::report_source(&source);
        Reporter::report_statistics(&input.display().to_string(), &stats);
    }
    Ok(())
}

fn quote_command(cli: &Cli, config: &QuoteConfig, input: &Path, args: &PricingArgs) -> Result<()> {
    let pipeline = pipeline_for(config, Some(args))?;
    let request = pricing_request(config, args)?;
    let report = pipeline.quote_file(input, &request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let name = input.display().to_string();
        Reporter::report_source(&report.source);
        Reporter::report_statistics(&name, &report.statistics);
        Reporter::report_quote(&name, &report.quote);
    }
    Ok(())
}

fn batch_command(
    cli: &Cli,
    config: &QuoteConfig,
    dir: &Path,
    args: &PricingArgs,
    jobs: Option<usize>,
) -> Result<()> {
    if let Some(jobs) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let pipeline = pipeline_for(config, Some(args))?;
    let request = pricing_request(config, args)?;

    let files = batch::discover(dir, pipeline.loader());
    if files.is_empty() {
        anyhow::bail!(
            "No supported mesh files under {} (supported: {})",
            dir.display(),
            pipeline.loader().supported_extensions().join(", ")
        );
    }

    let start = Instant::now();
    let outcomes = batch::run(&pipeline, &files, &request, !cli.json);
    let elapsed = start.elapsed();

    if cli.json {
        let docs: Vec<_> = outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(report) => serde_json::to_value(report).unwrap_or_default(),
                Err(e) => serde_json::json!({ "file": o.path, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&docs)?);
    } else {
        Reporter::report_batch(&outcomes, elapsed);
    }

    if outcomes.iter().any(|o| o.result.is_err()) {
        std::process::exit(2);
    }
    Ok(())
}

fn catalog_command(cli: &Cli, config: &QuoteConfig, toml: bool) -> Result<()> {
    let catalog = config.load_catalog()?;
    if toml {
        print!("{}", catalog.to_toml()?);
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        Reporter::report_catalog(&catalog);
    }
    Ok(())
}
