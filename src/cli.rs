//! Command-line arguments and their merge with the JSON config.

use anyhow::Context;
use clap::{ArgAction, Parser};
use sizesleuth_core::config::AnalysisConfig;
use sizesleuth_core::loader::MalformedLinePolicy;
use std::path::PathBuf;

/// Analyse a list of file sizes: bucket distributions, totals, and the
/// densest size range for each window width.
#[derive(Parser, Debug)]
#[command(name = "sizesleuth", version)]
pub struct Cli {
    /// Size list: one file per line, first token is the size in bytes
    #[arg(default_value = "res.txt")]
    pub input: PathBuf,

    /// JSON config file (widths, stride, bucket sets, ...)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // ── Search overrides ───────────────────────────────────────
    /// Window width in bytes; repeat to test several (replaces configured widths)
    #[arg(long = "width", value_name = "BYTES")]
    pub widths: Vec<u64>,

    /// Probe every Nth start index (1 = exhaustive)
    #[arg(long)]
    pub stride: Option<usize>,

    /// Worker threads for the window search (default: one per CPU)
    #[arg(long)]
    pub threads: Option<usize>,

    // ── Input handling ─────────────────────────────────────────
    /// Abort on the first malformed line instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Fail when the input file is missing instead of reporting empty results
    #[arg(long)]
    pub require_input: bool,

    // ── Output ─────────────────────────────────────────────────
    /// Write window results as CSV
    #[arg(long, value_name = "FILE")]
    pub csv_windows: Option<PathBuf>,

    /// Write bucket counts as CSV
    #[arg(long, value_name = "FILE")]
    pub csv_buckets: Option<PathBuf>,

    /// Write the full report as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Load the config file (or defaults), apply command-line overrides,
    /// and validate the result.
    pub fn resolve_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AnalysisConfig::default(),
        };

        if !self.widths.is_empty() {
            config.widths = self.widths.clone();
        }
        if let Some(stride) = self.stride {
            config.stride = stride;
        }
        if let Some(threads) = self.threads {
            config.threads = Some(threads);
        }
        if self.strict {
            config.malformed_lines = MalformedLinePolicy::Abort;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}
