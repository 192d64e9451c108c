//! T20 Simulator CLI
//!
//! Topology + probability table → tournament odds (JSON)

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use t20_core::{CacheOptions, ProbabilityCache, Topology, TournamentSimulator};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "t20sim")]
#[command(about = "Monte Carlo odds for a T20 tournament bracket", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Simulate the tournament and print per-team odds
    Simulate {
        /// Topology file (JSON or YAML)
        #[arg(long)]
        config: PathBuf,

        /// Probability table (CSV team_a,team_b,prob or JSON list)
        #[arg(long)]
        probs: PathBuf,

        /// Number of trials (overrides the run config)
        #[arg(long)]
        n_sims: Option<u32>,

        /// Base seed; omitted means a random seed, reported in the output
        #[arg(long)]
        seed: Option<u64>,

        /// Run trials on a single thread
        #[arg(long, default_value = "false")]
        sequential: bool,

        /// Run config file (JSON or YAML); defaults to $T20_SIM_CONFIG_PATH
        #[arg(long)]
        sim_config: Option<PathBuf>,

        /// Margin model JSON (overrides the run config)
        #[arg(long)]
        margin: Option<PathBuf>,

        /// Clamp every probability into LOW,HIGH (e.g. 0.05,0.95)
        #[arg(long)]
        clamp: Option<String>,

        /// Reference date passed to the probability source
        #[arg(long, default_value = t20_cli::DEFAULT_AS_OF)]
        as_of: NaiveDate,

        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check a topology (and optionally table coverage) without simulating
    Validate {
        /// Topology file (JSON or YAML)
        #[arg(long)]
        config: PathBuf,

        /// Probability table to check for full pair coverage
        #[arg(long)]
        probs: Option<PathBuf>,

        /// Reference date passed to the probability source
        #[arg(long, default_value = t20_cli::DEFAULT_AS_OF)]
        as_of: NaiveDate,
    },

    /// Print the JSON schema of a topology file
    Schema,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            probs,
            n_sims,
            seed,
            sequential,
            sim_config,
            margin,
            clamp,
            as_of,
            out,
        } => {
            let topology = t20_cli::load_topology(&config)?;

            let mut run_config = match sim_config {
                Some(path) => t20_cli::load_sim_config(&path)?,
                None => t20_core::sim_config_from_env().map_err(anyhow::Error::msg)?,
            };
            if let Some(n) = n_sims {
                run_config = run_config.with_n_sims(n);
            }
            if let Some(s) = seed {
                run_config = run_config.with_seed(s);
            }
            if sequential {
                run_config = run_config.sequential();
            }
            if let Some(path) = margin {
                run_config.margin = t20_cli::load_margin_model(&path)?;
            }

            let options = CacheOptions {
                clamp: clamp.as_deref().map(t20_cli::parse_clamp).transpose()?,
            };
            let cache = build_cache(&topology, &probs, as_of, &options)?;

            let simulator = TournamentSimulator::new(&topology, &cache, run_config)
                .context("Failed to prepare simulation")?;
            let report = simulator.run().context("Simulation failed")?;

            let json = serde_json::to_string_pretty(&report)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write report: {}", path.display()))?;
                    tracing::info!(path = %path.display(), "report written");
                }
                None => println!("{json}"),
            }
        }

        Commands::Validate { config, probs, as_of } => {
            let topology = t20_cli::load_topology(&config)?;
            let bracket = t20_core::engine::Bracket::compile(&topology)
                .with_context(|| format!("Invalid topology: {}", config.display()))?;

            println!("✅ Topology '{}' is valid", bracket.tournament);
            println!("   Teams:            {}", bracket.roster.len());
            println!("   Groups:           {}", bracket.groups.len());
            println!("   Super 8 groups:   {}", bracket.super8.len());
            println!("   Matches / trial:  {}", bracket.matches_per_trial());

            if let Some(path) = probs {
                let cache = build_cache(&topology, &path, as_of, &CacheOptions::default())?;
                cache.compile(&bracket.roster)?;
                println!("✅ Probability table covers all {} ordered pairs", cache.len());
            }
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&Topology::json_schema())?);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn build_cache(
    topology: &Topology,
    probs: &Path,
    as_of: NaiveDate,
    options: &CacheOptions,
) -> Result<ProbabilityCache> {
    let table = t20_cli::load_probability_table(probs)?;
    ProbabilityCache::build(&topology.roster(), as_of, &table, options)
        .with_context(|| format!("Probability table {} is unusable", probs.display()))
}

/// Logs go to stderr so stdout stays a clean JSON report. `RUST_LOG` wins.
#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("t20sim CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
