//! Export functionality for run results
//!
//! The result file holds only the formatted average speed. The per-iteration
//! CSV log (feature `csv`) and JSON summary (feature `json`) are optional extras.

#[cfg(any(feature = "csv", feature = "json"))]
use crate::types::RunReport;
use crate::Result;
use anyhow::Context;
use std::path::Path;

/// Destination of the final result text
pub trait ResultWriter {
    fn write_text(&mut self, path: &Path, content: &str) -> Result<()>;
}

impl<T: ResultWriter + ?Sized> ResultWriter for &mut T {
    fn write_text(&mut self, path: &Path, content: &str) -> Result<()> {
        (**self).write_text(path, content)
    }
}

/// Writes results to the file system, creating missing directories
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResultWriter;

impl ResultWriter for FileResultWriter {
    fn write_text(&mut self, path: &Path, content: &str) -> Result<()> {
        ensure_parent_dir(path)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write result file: {}", path.display()))
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

/// Write one CSV row per iteration
///
/// Columns: `iteration,image,timestamp_s,latitude_deg,longitude_deg,distance_km,elapsed_s,speed_kmps`.
/// The estimate columns stay empty for iterations without a valid estimate.
#[cfg(feature = "csv")]
pub fn export_iterations_csv(report: &RunReport, output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create CSV file: {}", output_path.display()))?;

    writer.write_record([
        "iteration",
        "image",
        "timestamp_s",
        "latitude_deg",
        "longitude_deg",
        "distance_km",
        "elapsed_s",
        "speed_kmps",
    ])?;

    for record in &report.iterations {
        let (distance, elapsed, speed) = match record.estimate.measurement() {
            Some(m) => (
                format!("{:.6}", m.distance_km),
                format!("{:.3}", m.elapsed_s),
                format!("{:.6}", m.speed_kmps),
            ),
            None => (String::new(), String::new(), String::new()),
        };

        writer.write_record([
            record.iteration.to_string(),
            record.image_path.display().to_string(),
            format!("{:.3}", record.sample.timestamp_s),
            format!("{:.7}", record.sample.latitude_deg),
            format!("{:.7}", record.sample.longitude_deg),
            distance,
            elapsed,
            speed,
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {}", output_path.display()))?;
    Ok(())
}

/// Write the whole run report as pretty-printed JSON
#[cfg(feature = "json")]
pub fn export_summary_json(report: &RunReport, output_path: &Path) -> Result<()> {
    use std::io::Write;

    ensure_parent_dir(output_path)?;
    let file = std::fs::File::create(output_path)
        .with_context(|| format!("Failed to create JSON file: {}", output_path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("Failed to write JSON summary: {}", output_path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush JSON file: {}", output_path.display()))?;
    Ok(())
}
