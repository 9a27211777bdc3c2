use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use super::loader::{COUNTRY, DEMOCRACY_INDEX, LATITUDE, LONGITUDE};
use super::model::{Dataset, Record};

pub const DEMOCRACY_TYPE: &str = "democracy_type";
pub const REGION: &str = "region";

/// Column order shared by the CSV header and the JSON object keys.
pub const COLUMNS: [&str; 6] = [
    COUNTRY,
    DEMOCRACY_INDEX,
    LATITUDE,
    LONGITUDE,
    DEMOCRACY_TYPE,
    REGION,
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    country: &'a str,
    democracy_index: f64,
    latitude: f64,
    longitude: f64,
    democracy_type: &'static str,
    region: &'static str,
}

impl<'a> From<&'a Record> for ExportRow<'a> {
    fn from(r: &'a Record) -> Self {
        let position = r.position();
        ExportRow {
            country: r.name(),
            democracy_index: r.score(),
            latitude: position.latitude,
            longitude: position.longitude,
            democracy_type: r.category().label(),
            region: r.region().label(),
        }
    }
}

/// Write the table as CSV: one header row, then one row per record in
/// table order. The header is written even for an empty table.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS).context("writing CSV header")?;
    for record in dataset.records() {
        wtr.serialize(ExportRow::from(record))
            .with_context(|| format!("writing CSV row for {}", record.name()))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write the table as a pretty-printed JSON array of objects, in table order.
pub fn write_json<W: Write>(dataset: &Dataset, mut writer: W) -> Result<()> {
    let rows: Vec<ExportRow<'_>> = dataset.records().iter().map(ExportRow::from).collect();
    serde_json::to_writer_pretty(&mut writer, &rows).context("writing JSON")?;
    writer.write_all(b"\n").context("writing JSON")?;
    writer.flush().context("flushing JSON output")?;
    Ok(())
}

/// Export to `path`, choosing the format from the extension (`.csv` / `.json`).
pub fn export_file(dataset: &Dataset, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "csv" && ext != "json" {
        bail!("Unsupported export extension: .{ext}");
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let writer = BufWriter::new(file);
    if ext == "csv" {
        write_csv(dataset, writer)?;
    } else {
        write_json(dataset, writer)?;
    }

    log::info!("Exported {} countries to {}", dataset.len(), path.display());
    Ok(())
}
