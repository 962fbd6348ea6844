//! SizeSleuth — file size distribution analyser.
//!
//! Thin binary entry point. All analysis lives in the `sizesleuth-core`
//! crate; this file wires arguments, logging and output together.

mod cli;
mod summary;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use sizesleuth_core::analysis::AnalysisReport;
use sizesleuth_core::export;
use sizesleuth_core::loader::{load_sizes, LoadError, LoadOutcome};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the summary on stdout stays clean.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .init();

    tracing::info!("SizeSleuth starting");

    let config = cli.resolve_config()?;

    let outcome = match load_sizes(&cli.input, config.malformed_lines) {
        Ok(outcome) => outcome,
        Err(LoadError::SourceNotFound { path }) if !cli.require_input => {
            tracing::error!("File {} not found; reporting empty results", path.display());
            LoadOutcome::default()
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to load {}", cli.input.display())));
        }
    };

    let pool = config.build_thread_pool()?;
    let report = AnalysisReport::build(&cli.input, &outcome, &config, &pool)?;

    summary::write_summary(io::stdout().lock(), &report).context("failed to write summary")?;

    if let Some(path) = &cli.csv_windows {
        export::write_windows_csv(create_output(path)?, &report.windows)?;
        tracing::info!("Window results saved: {}", path.display());
    }
    if let Some(path) = &cli.csv_buckets {
        export::write_buckets_csv(create_output(path)?, &report.distributions)?;
        tracing::info!("Bucket counts saved: {}", path.display());
    }
    if let Some(path) = &cli.json {
        export::write_report_json(create_output(path)?, &report)?;
        tracing::info!("Report saved: {}", path.display());
    }

    Ok(())
}

fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
