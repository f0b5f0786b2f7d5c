//! geosync: command-line front end for geosync-core
//!
//! Loads an area gazetteer, resolves single place names and reconciles whole
//! CSV columns of them, applying manual overrides before export.
//!
//! Usage examples
//! --------------
//!
//! - Gazetteer statistics
//!   $ geosync -g areas.json stats
//!
//! - Resolve one name and show its candidates
//!   $ geosync -g areas.json resolve "Кировск Мурманская обл"
//!
//! - Reconcile a CSV column, lower the threshold, export JSON
//!   $ geosync -g areas.json -t 80 reconcile cities.csv --format json -o out.json
//!
//! - Re-export with reviewer decisions applied
//!   $ geosync -g areas.json reconcile cities.csv --overrides review.csv
//!
//! The gazetteer path can also come from `GEOSYNC_GAZETTEER`, the threshold
//! from `GEOSYNC_THRESHOLD`. A JSON source is indexed once and the binary
//! index is stored next to it unless `--no-cache` is given.
mod args;

use crate::args::{CliArgs, Commands, OutputFormat};
use anyhow::{bail, Context};
use clap::Parser;
use geosync_core::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let config = MatchConfig::with_threshold(args.threshold)?;

    match args.command {
        Commands::Stats => {
            let gz = load_gazetteer(args.gazetteer.as_deref(), args.no_cache)?;
            let roots = gz.iter().filter(|r| r.parent().is_none()).count();
            let qualified = gz
                .iter()
                .filter(|r| geosync_core::text::qualifier(&r.display_name).is_some())
                .count();
            println!("Gazetteer statistics:");
            println!("  Areas: {}", gz.len());
            println!("  Top-level areas: {roots}");
            println!("  Region-qualified names: {qualified}");
        }

        Commands::Resolve { query } => {
            let gz = load_gazetteer(args.gazetteer.as_deref(), args.no_cache)?;
            let result = Resolver::new(&gz, config).resolve(&query);
            match (&result.matched_name, result.tier) {
                (Some(name), Some(tier)) => {
                    let record = gz.get(name);
                    println!("{query} -> {name} ({:.1}, {tier:?})", result.score);
                    if let Some(record) = record {
                        println!("  id: {}", record.id);
                        if let Some(parent) = record.parent() {
                            println!("  region: {parent}");
                        }
                    }
                }
                _ => println!("{query} -> no match"),
            }
            if !result.candidates.is_empty() {
                println!("Candidates:");
                for c in &result.candidates {
                    println!("  {:5.1}  {}", c.score, c.name);
                }
            }
        }

        Commands::Reconcile {
            input,
            output,
            format,
            no_header,
            exportable_only,
            overrides,
        } => {
            let gz = load_gazetteer(args.gazetteer.as_deref(), args.no_cache)?;
            let names = read_input_column(&input, !no_header)?;
            let reconciler = Reconciler::new(&gz, config)?;
            let mut batch = reconciler.reconcile_with_progress(names, &|p: Progress| {
                debug!(done = p.done, total = p.total, "resolved");
            });

            if let Some(path) = overrides {
                let applied = apply_override_file(&mut batch, &gz, &path)?;
                info!(applied, file = %path.display(), "overrides applied");
            }

            let rows: Vec<&ResultRow> = if exportable_only {
                batch.exportable().collect()
            } else {
                batch.rows().iter().collect()
            };
            write_rows(&rows, format, output.as_deref())?;
            print_summary(&batch.summary());
        }

        #[cfg(feature = "fetch")]
        Commands::Fetch { url, out } => {
            let count = geosync_core::loader::download_tree(&url, &out)
                .with_context(|| format!("downloading {url}"))?;
            println!("Saved {count} areas to {}", out.display());
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_gazetteer(path: Option<&Path>, no_cache: bool) -> anyhow::Result<Gazetteer> {
    let Some(path) = path else {
        bail!("no gazetteer given (use --gazetteer or GEOSYNC_GAZETTEER)");
    };
    let gz = if no_cache {
        Gazetteer::load_raw_json(path)
    } else {
        Gazetteer::load_from_path(path)
    }
    .with_context(|| format!("loading gazetteer {}", path.display()))?;
    info!(areas = gz.len(), source = %path.display(), "gazetteer loaded");
    Ok(gz)
}

/// First column of every record; blank cells stay blank rows.
fn read_input_column(path: &Path, has_headers: bool) -> anyhow::Result<Vec<Option<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("reading {}", path.display()))?;
        let cell = record.get(0).map(str::trim).filter(|s| !s.is_empty());
        names.push(cell.map(str::to_string));
    }
    Ok(names)
}

#[derive(Debug, Deserialize)]
struct OverrideLine {
    row_id: usize,
    choice: Option<String>,
}

fn apply_override_file(
    batch: &mut Reconciliation,
    gz: &Gazetteer,
    path: &Path,
) -> anyhow::Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening overrides {}", path.display()))?;

    let mut applied = 0;
    for line in reader.deserialize::<OverrideLine>() {
        let line = line.with_context(|| format!("reading overrides {}", path.display()))?;
        let choice = OverrideChoice::parse(line.choice.as_deref().unwrap_or(""));
        batch
            .apply_override(gz, line.row_id, choice)
            .with_context(|| format!("override for row {}", line.row_id))?;
        applied += 1;
    }
    Ok(applied)
}

fn write_rows(rows: &[&ResultRow], format: OutputFormat, output: Option<&Path>) -> anyhow::Result<()> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut sink = BufWriter::new(sink);

    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut sink);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut sink, rows)?;
            writeln!(sink)?;
        }
    }
    sink.flush()?;
    Ok(())
}

fn print_summary(s: &BatchSummary) {
    eprintln!(
        "{} rows: {} exact, {} approximate, {} duplicates ({} by input, {} by target), {} not found, {} empty; {} exportable",
        s.total,
        s.exact,
        s.approximate,
        s.duplicates(),
        s.duplicate_of_input,
        s.duplicate_of_target,
        s.not_found,
        s.empty,
        s.exportable
    );
}
