/// CSV and JSON export of an [`AnalysisReport`].
///
/// CSV output is flat (one row per width, or one row per bucket) so it can
/// be fed straight to a spreadsheet or plotting script. JSON output carries
/// the whole report.
use crate::analysis::{AnalysisReport, BucketDistribution, WindowResult};
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

/// Errors that can occur while exporting results.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Serialize)]
struct WindowRow {
    width: u64,
    start_index: usize,
    end_index: usize,
    start_size: u64,
    end_size: u64,
    file_count: u64,
    percentage: String,
}

impl From<&WindowResult> for WindowRow {
    fn from(r: &WindowResult) -> Self {
        Self {
            width: r.width,
            start_index: r.start_index,
            end_index: r.end_index,
            start_size: r.start_size,
            end_size: r.end_size,
            file_count: r.file_count(),
            percentage: format!("{:.2}", r.percentage),
        }
    }
}

#[derive(Serialize)]
struct BucketRow<'a> {
    set: &'a str,
    label: &'a str,
    lower: u64,
    upper: u64,
    count: u64,
    percentage: String,
}

/// One CSV row per window width, with a header.
pub fn write_windows_csv<W: Write>(writer: W, windows: &[WindowResult]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for window in windows {
        csv.serialize(WindowRow::from(window))?;
    }
    csv.flush()?;
    Ok(())
}

/// One CSV row per (bucket set, bucket), with a header.
pub fn write_buckets_csv<W: Write>(
    writer: W,
    distributions: &[BucketDistribution],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for dist in distributions {
        for bucket in &dist.buckets {
            csv.serialize(BucketRow {
                set: &dist.name,
                label: &bucket.label,
                lower: bucket.lower,
                upper: bucket.upper,
                count: bucket.count,
                percentage: format!("{:.2}", bucket.percentage),
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// The full report as pretty-printed JSON.
pub fn write_report_json<W: Write>(mut writer: W, report: &AnalysisReport) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BucketSet, DensestWindowSearch};
    use crate::config::AnalysisConfig;
    use crate::loader::LoadOutcome;
    use crate::model::SizeTable;
    use std::path::Path;

    fn scenario_windows() -> Vec<WindowResult> {
        let table = SizeTable::from_sizes(vec![0, 0, 100, 200, 300, 1000]);
        DensestWindowSearch::new(vec![300])
            .with_stride(1)
            .unwrap()
            .run(&table.sorted)
            .unwrap()
    }

    #[test]
    fn windows_csv_has_header_and_rows() {
        let mut out = Vec::new();
        write_windows_csv(&mut out, &scenario_windows()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "width,start_index,end_index,start_size,end_size,file_count,percentage"
        );
        assert_eq!(lines[1], "300,0,4,0,300,5,66.67");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn buckets_csv_lists_every_bucket() {
        let table = SizeTable::from_sizes(vec![10, 20, 2_000]);
        let set = BucketSet::from_bounds("t", &[(0, 1024), (1024, 4096)]);
        let dist = set.distribute(&table.frequencies);

        let mut out = Vec::new();
        write_buckets_csv(&mut out, &[dist]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "set,label,lower,upper,count,percentage");
        assert_eq!(lines[1], "t,0B-1KB,0,1024,2,66.67");
        assert_eq!(lines[2], "t,1KB-4KB,1024,4096,1,33.33");
    }

    #[test]
    fn report_json_contains_sections() {
        let outcome = LoadOutcome {
            table: SizeTable::from_sizes(vec![0, 0, 100, 200, 300, 1000]),
            skipped: Vec::new(),
        };
        let config = AnalysisConfig {
            widths: vec![300],
            stride: 1,
            ..AnalysisConfig::default()
        };
        let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let report = AnalysisReport::build(Path::new("res.txt"), &outcome, &config, &pool).unwrap();

        let mut out = Vec::new();
        write_report_json(&mut out, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["source"], "res.txt");
        assert_eq!(value["totals"]["total_files"], 6);
        assert_eq!(value["totals"]["total_bytes"], 1600);
        assert_eq!(value["windows"][0]["end_size"], 300);
        assert_eq!(value["distributions"].as_array().unwrap().len(), 3);
        assert!(value["generated_at"].is_string());
    }
}
