//! Plain-text summary printed after a run.

use sizesleuth_core::analysis::AnalysisReport;
use sizesleuth_core::model::size::{format_bound, format_count, format_size};
use std::io::{self, Write};

pub fn write_summary<W: Write>(mut out: W, report: &AnalysisReport) -> io::Result<()> {
    for dist in report.distributions.iter().filter(|d| !d.is_empty()) {
        writeln!(out, "Distribution: {}", dist.name)?;
        for bucket in &dist.buckets {
            writeln!(
                out,
                "  {:<14} {:>12} {:>7.2}%",
                bucket.label,
                format_count(bucket.count),
                bucket.percentage
            )?;
        }
        if dist.unbucketed > 0 {
            writeln!(out, "  {:<14} {:>12}", "(unbucketed)", format_count(dist.unbucketed))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Total files: {}", format_count(report.totals.total_files))?;
    writeln!(
        out,
        "Total bytes: {} ({})",
        report.totals.total_bytes,
        format_size(report.totals.total_bytes)
    )?;
    if !report.skipped_lines.is_empty() {
        writeln!(out, "Skipped lines: {}", report.skipped_lines.len())?;
    }

    for window in &report.windows {
        writeln!(
            out,
            "Width {}: files between {} and {} bytes: {:.2}%",
            format_bound(window.width),
            window.start_size,
            window.end_size,
            window.percentage
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizesleuth_core::config::AnalysisConfig;
    use sizesleuth_core::loader::LoadOutcome;
    use sizesleuth_core::model::SizeTable;
    use std::path::Path;

    #[test]
    fn summary_lists_totals_and_windows() {
        let outcome = LoadOutcome {
            table: SizeTable::from_sizes(vec![0, 0, 100, 200, 300, 1000]),
            skipped: Vec::new(),
        };
        let config = AnalysisConfig {
            widths: vec![300],
            stride: 1,
            threads: Some(1),
            ..AnalysisConfig::default()
        };
        let pool = config.build_thread_pool().unwrap();
        let report = AnalysisReport::build(Path::new("res.txt"), &outcome, &config, &pool).unwrap();

        let mut out = Vec::new();
        write_summary(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Distribution: fine"));
        assert!(text.contains("Total files: 6"));
        assert!(text.contains("Total bytes: 1600 (1.6 KB)"));
        assert!(text.contains("Width 300B: files between 0 and 300 bytes: 66.67%"));
    }

    #[test]
    fn empty_report_prints_zero_totals_only() {
        let config = AnalysisConfig {
            threads: Some(1),
            ..AnalysisConfig::default()
        };
        let pool = config.build_thread_pool().unwrap();
        let report = AnalysisReport::build(
            Path::new("missing.txt"),
            &LoadOutcome::default(),
            &config,
            &pool,
        )
        .unwrap();

        let mut out = Vec::new();
        write_summary(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!text.contains("Distribution:"));
        assert!(text.contains("Total files: 0"));
        assert!(text.contains("Total bytes: 0 (0 B)"));
        assert!(!text.contains("Width"));
    }
}
