// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Meshsym CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meshsym::cli::{OutputFormat, Reporter};
use meshsym::io::{self, SymmetryReport};
use meshsym::naming::rename_plan;
use meshsym::symmetry::{
    capture_snapshots, check_self_symmetry, ClassificationReport, SceneProvider, SymmetryConfig,
    SymmetryEngine,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "meshsym")]
#[command(about = "Mesh symmetry detection and mirror pairing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./meshsym.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every mesh of a scene
    Classify {
        /// Scene file (.json, .obj, .stl) or directory of STL files
        scene: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
        format: OutputFormat,

        /// Write the JSON report to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Let already paired meshes pair again with later candidates
        #[arg(long)]
        allow_rematch: bool,

        /// Evaluate on the calling thread only
        #[arg(long)]
        sequential: bool,
    },

    /// List mirrored pairs only
    Pairs {
        scene: PathBuf,
    },

    /// Run the self-symmetry test on every mesh, ignoring pairs
    SelfCheck {
        scene: PathBuf,
    },

    /// Show the renames that would bring mesh names in line with their classification
    RenamePlan {
        scene: PathBuf,
    },

    /// Write the effective configuration
    Config {
        /// Output file (prints to stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "meshsym=info",
            2 => "meshsym=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        Reporter::report_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Classify {
            scene,
            format,
            output,
            allow_rematch,
            sequential,
        } => {
            let mut config = config;
            config.allow_rematch |= *allow_rematch;
            config.parallel &= !*sequential;
            classify_command(scene, config, *format, output.as_deref(), cli.verbose > 0)
        }
        Commands::Pairs { scene } => {
            let (report, _) = classify_scene(scene, config, cli.verbose > 0)?;
            Reporter::report_pairs(&scene.display().to_string(), &report.pairs);
            Ok(())
        }
        Commands::SelfCheck { scene } => self_check_command(scene, &config, cli.verbose > 0),
        Commands::RenamePlan { scene } => {
            let (report, _) = classify_scene(scene, config, cli.verbose > 0)?;
            Reporter::report_renames(&rename_plan(&report.table));
            Ok(())
        }
        Commands::Config { output } => {
            match output {
                Some(path) => {
                    config.save(path)?;
                    Reporter::success(&format!("Configuration written to {}", path.display()));
                }
                None => {
                    print!(
                        "{}",
                        toml::to_string_pretty(&config).context("Failed to serialize config")?
                    );
                }
            }
            Ok(())
        }
        Commands::Version => {
            println!("Meshsym v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SymmetryConfig> {
    match path {
        Some(path) => SymmetryConfig::from_file(path),
        None => SymmetryConfig::load(),
    }
}

fn load_scene(scene: &Path, verbose: bool) -> Result<SceneProvider> {
    if !scene.exists() {
        anyhow::bail!("Scene not found: {}", scene.display());
    }
    let provider = io::load_scene_with_progress(scene, verbose)?;
    info!(meshes = provider.len(), scene = %scene.display(), "scene loaded");
    Ok(provider)
}

fn classify_scene(
    scene: &Path,
    config: SymmetryConfig,
    verbose: bool,
) -> Result<(ClassificationReport, std::time::Duration)> {
    let provider = load_scene(scene, verbose)?;
    let start = Instant::now();
    let report = SymmetryEngine::new(config).classify_provider(&provider);
    Ok((report, start.elapsed()))
}

fn classify_command(
    scene: &Path,
    config: SymmetryConfig,
    format: OutputFormat,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let (report, elapsed) = classify_scene(scene, config.clone(), verbose)?;
    let scene_name = scene.display().to_string();
    let json = SymmetryReport::new(scene_name.as_str(), &config, &report);

    match format {
        OutputFormat::Terminal => Reporter::report_classification(&scene_name, &report, elapsed),
        OutputFormat::Json => println!("{}", json.to_json()?),
    }

    if let Some(path) = output {
        json.write_json(path)?;
        Reporter::success(&format!("Report written to {}", path.display()));
    }

    if report.was_cancelled() {
        Reporter::report_warning("Classification was cancelled; some meshes were left unchecked");
    }

    Ok(())
}

fn self_check_command(scene: &Path, config: &SymmetryConfig, verbose: bool) -> Result<()> {
    let provider = load_scene(scene, verbose)?;
    let captured = capture_snapshots(&provider);

    for diagnostic in &captured.diagnostics {
        Reporter::report_warning(&diagnostic.to_string());
    }

    for snapshot in &captured.snapshots {
        match check_self_symmetry(snapshot, config) {
            Ok(check) => {
                let pct = check
                    .correspondence
                    .map(|c| format!("{:.1}%", c))
                    .unwrap_or_else(|| "not tested".to_string());
                Reporter::report_info(&format!("{}: {:?} ({})", snapshot.id(), check.verdict, pct));
            }
            Err(err) => Reporter::report_warning(&err.to_string()),
        }
    }

    Ok(())
}
