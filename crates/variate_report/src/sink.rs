//! Report output destinations.
//!
//! Each sink writes one file per report into its output directory, named
//! `<distribution>_<timestamp>.<ext>`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ReportError;
use crate::report::{Report, ReportFormat};

/// Report output destination trait
pub trait ReportSink {
    /// Writes the report and returns the path of the created file.
    fn send(&self, report: &Report) -> Result<PathBuf, ReportError>;
}

/// Creates the sink for `format` writing into `output_dir`.
pub fn sink_for(format: ReportFormat, output_dir: impl AsRef<Path>) -> Box<dyn ReportSink> {
    match format {
        ReportFormat::Csv => Box::new(CsvWriter::new(output_dir)),
        ReportFormat::Json => Box::new(JsonWriter::new(output_dir)),
    }
}

fn report_path(output_dir: &Path, report: &Report, format: ReportFormat) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(output_dir)?;
    let filename = format!(
        "{}_{}.{}",
        report.kind(),
        chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f"),
        format.extension()
    );
    Ok(output_dir.join(filename))
}

fn log_written(path: &Path, report: &Report) {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    info!(
        path = %path.display(),
        distribution = %report.kind(),
        size,
        "Report written to file"
    );
}

/// Spreadsheet writer.
///
/// Layout: a `bin,observed,expected` header, one row per bin, then two-field
/// `key,value` summary rows. Any spreadsheet application can import it and
/// chart the observed and expected columns.
pub struct CsvWriter {
    output_dir: PathBuf,
}

impl CsvWriter {
    /// Create a new CSV writer
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Get output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a report to `path`.
    pub fn write_to(&self, report: &Report, path: &Path) -> Result<(), ReportError> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;

        writer.write_record(["bin", "observed", "expected"])?;
        for row in &report.rows {
            writer.write_record([
                row.label.as_str(),
                row.observed.to_string().as_str(),
                format!("{:.6}", row.expected).as_str(),
            ])?;
        }
        for (key, value) in report.summary() {
            writer.write_record([key, value.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl ReportSink for CsvWriter {
    fn send(&self, report: &Report) -> Result<PathBuf, ReportError> {
        let path = report_path(&self.output_dir, report, ReportFormat::Csv)?;
        self.write_to(report, &path)?;
        log_written(&path, report);
        Ok(path)
    }
}

/// JSON writer: the whole [`Report`], pretty-printed.
pub struct JsonWriter {
    output_dir: PathBuf,
}

impl JsonWriter {
    /// Create a new JSON writer
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

impl ReportSink for JsonWriter {
    fn send(&self, report: &Report) -> Result<PathBuf, ReportError> {
        let path = report_path(&self.output_dir, report, ReportFormat::Json)?;
        let content = serde_json::to_string_pretty(report)?;
        fs::write(&path, content)?;
        log_written(&path, report);
        Ok(path)
    }
}
