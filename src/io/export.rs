//! CSV export for multi-day usage reports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::calc::UsageReport;

/// Column header for the per-day usage export.
const HEADER: &str = "day,on_minutes,off_minutes,duty_cycle_pct";

/// Exports a usage report to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_report_csv(report: &UsageReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_report_csv(report, buf)
}

/// Writes one row per reported day to any writer.
///
/// Produces deterministic output for identical reports.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_report_csv(report: &UsageReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for d in &report.days {
        wtr.write_record(&[
            d.day.to_string(),
            d.on_minutes.to_string(),
            d.off_minutes.to_string(),
            format!("{:.2}", d.duty_cycle_pct),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
