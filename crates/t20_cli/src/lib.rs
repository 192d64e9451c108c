//! T20 Simulator CLI Library
//!
//! File loaders behind the `t20sim` binary:
//! topology (JSON / YAML), probability tables (CSV / JSON), run config.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use t20_core::{MarginModel, ProbabilityEntry, SimConfig, TableSource, Topology};

/// Reference date used when `--as-of` is not given.
pub const DEFAULT_AS_OF: &str = "2026-02-07";

/// Load a tournament topology; `.yaml` / `.yml` files are read as YAML.
pub fn load_topology(path: &Path) -> Result<Topology> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read topology file: {}", path.display()))?;

    Topology::from_str_for_path(&content, path)
        .with_context(|| format!("Failed to parse topology: {}", path.display()))
}

/// Load a probability table.
///
/// `.csv` files need a `team_a,team_b,prob` header; anything else is read as
/// a JSON list of `{team_a, team_b, prob}` objects.
pub fn load_probability_table(path: &Path) -> Result<TableSource> {
    let entries = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_csv_entries(path)?,
        _ => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read probability table: {}", path.display()))?;
            serde_json::from_str::<Vec<ProbabilityEntry>>(&content)
                .with_context(|| format!("Failed to parse probability JSON: {}", path.display()))?
        }
    };

    tracing::debug!(rows = entries.len(), path = %path.display(), "probability table loaded");
    Ok(entries.into_iter().collect())
}

fn read_csv_entries(path: &Path) -> Result<Vec<ProbabilityEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut entries = Vec::new();
    for (line, record) in reader.deserialize::<ProbabilityEntry>().enumerate() {
        // +2: header row, 1-based lines
        let entry =
            record.with_context(|| format!("Bad CSV row at line {} in {}", line + 2, path.display()))?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Load a run config; `.yaml` / `.yml` files are read as YAML.
pub fn load_sim_config(path: &Path) -> Result<SimConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sim config: {}", path.display()))?;

    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => SimConfig::from_yaml(&content),
        _ => SimConfig::from_json(&content),
    }
    .with_context(|| format!("Failed to parse sim config: {}", path.display()))?;

    config.validate()?;
    Ok(config)
}

/// Load a margin model from JSON.
pub fn load_margin_model(path: &Path) -> Result<MarginModel> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read margin model: {}", path.display()))?;
    let model: MarginModel = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse margin model: {}", path.display()))?;

    model.validate()?;
    Ok(model)
}

/// Parse a `LOW,HIGH` clamp range such as `0.05,0.95`.
pub fn parse_clamp(raw: &str) -> Result<(f64, f64)> {
    let Some((low, high)) = raw.split_once(',') else {
        bail!("clamp must be LOW,HIGH (got '{raw}')");
    };

    let low: f64 = low.trim().parse().with_context(|| format!("invalid clamp low bound '{low}'"))?;
    let high: f64 =
        high.trim().parse().with_context(|| format!("invalid clamp high bound '{high}'"))?;

    if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
        bail!("clamp bounds must satisfy 0 <= LOW <= HIGH <= 1 (got {low},{high})");
    }
    Ok((low, high))
}
