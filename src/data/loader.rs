use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::error::LoadError;
use super::model::{Dataset, EnergyShare, EnergyTable, Position, Record};

// Column names written by `export` and expected on re-import.
pub const COUNTRY: &str = "country";
pub const DEMOCRACY_INDEX: &str = "democracy_index";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Bounds of the democracy index.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

// Column names of the renewable-energy file.
pub const ENERGY_COUNTRY: &str = "Country";
pub const ENERGY_PERCENTAGE: &str = "Renewable_Percentage";
pub const ENERGY_LATITUDE: &str = "Latitude";
pub const ENERGY_LONGITUDE: &str = "Longitude";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a democracy table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with `country`, `democracy_index`, `latitude`,
///   `longitude`; other columns (e.g. exported `democracy_type`) are ignored
/// * `.json` – `[{ "country": ..., "democracy_index": ..., ... }, ...]`
///
/// Derived columns are always recomputed from the source values.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(open(path)?),
        "json" => read_json(open(path)?),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

/// Load the renewable-energy table from a CSV file.
pub fn load_energy_file(path: &Path) -> Result<EnergyTable, LoadError> {
    read_energy_csv(open(path)?)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Democracy table
// ---------------------------------------------------------------------------

/// Read a democracy table from CSV text.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let name_idx = column(&headers, COUNTRY)?;
    let score_idx = column(&headers, DEMOCRACY_INDEX)?;
    let lat_idx = column(&headers, LATITUDE)?;
    let lon_idx = column(&headers, LONGITUDE)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let score = parse_number(field(score_idx), row, DEMOCRACY_INDEX)?;
        check_range(score, row, DEMOCRACY_INDEX, SCORE_MIN, SCORE_MAX)?;
        let position = parse_position(field(lat_idx), field(lon_idx), row, LATITUDE, LONGITUDE)?;
        records.push(Record::new(field(name_idx).trim(), score, position));
    }

    Dataset::from_records(records)
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    country: String,
    democracy_index: f64,
    latitude: f64,
    longitude: f64,
}

/// Read a democracy table from a JSON array of objects.
pub fn read_json<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let rows: Vec<CountryRow> = serde_json::from_reader(reader)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        check_range(row.democracy_index, i + 1, DEMOCRACY_INDEX, SCORE_MIN, SCORE_MAX)?;
        check_range(row.latitude, i + 1, LATITUDE, -90.0, 90.0)?;
        check_range(row.longitude, i + 1, LONGITUDE, -180.0, 180.0)?;
        records.push(Record::new(
            row.country.trim(),
            row.democracy_index,
            Position::new(row.latitude, row.longitude),
        ));
    }

    Dataset::from_records(records)
}

// ---------------------------------------------------------------------------
// Renewable-energy table
// ---------------------------------------------------------------------------

/// Read the renewable-energy table from CSV text.
///
/// `Latitude` and `Longitude` are optional, but a file carrying one of them
/// must carry both.
pub fn read_energy_csv<R: Read>(reader: R) -> Result<EnergyTable, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let name_idx = column(&headers, ENERGY_COUNTRY)?;
    let pct_idx = column(&headers, ENERGY_PERCENTAGE)?;
    let lat_idx = headers.iter().position(|h| h.trim() == ENERGY_LATITUDE);
    let lon_idx = headers.iter().position(|h| h.trim() == ENERGY_LONGITUDE);
    let position_idx = match (lat_idx, lon_idx) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        (None, None) => None,
        (Some(_), None) => return Err(LoadError::MissingColumn(ENERGY_LONGITUDE)),
        (None, Some(_)) => return Err(LoadError::MissingColumn(ENERGY_LATITUDE)),
    };

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let country = field(name_idx).trim();
        if country.is_empty() {
            return Err(LoadError::EmptyName { row });
        }
        if rows.iter().any(|r: &EnergyShare| r.country == country) {
            return Err(LoadError::DuplicateName {
                row,
                name: country.to_string(),
            });
        }

        let renewable_percentage = parse_number(field(pct_idx), row, ENERGY_PERCENTAGE)?;
        check_range(renewable_percentage, row, ENERGY_PERCENTAGE, 0.0, 100.0)?;

        let position = position_idx
            .map(|(lat, lon)| {
                parse_position(field(lat), field(lon), row, ENERGY_LATITUDE, ENERGY_LONGITUDE)
            })
            .transpose()?;

        rows.push(EnergyShare {
            country: country.to_string(),
            renewable_percentage,
            position,
        });
    }

    Ok(EnergyTable { rows })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn column(headers: &csv::StringRecord, name: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(LoadError::MissingColumn(name))
}

fn parse_number(raw: &str, row: usize, column: &'static str) -> Result<f64, LoadError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidNumber {
            row,
            column,
            value: raw.to_string(),
        })
}

fn check_range(
    value: f64,
    row: usize,
    column: &'static str,
    min: f64,
    max: f64,
) -> Result<(), LoadError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(LoadError::OutOfRange {
            row,
            column,
            value,
            min,
            max,
        })
    }
}

fn parse_position(
    lat: &str,
    lon: &str,
    row: usize,
    lat_column: &'static str,
    lon_column: &'static str,
) -> Result<Position, LoadError> {
    let latitude = parse_number(lat, row, lat_column)?;
    check_range(latitude, row, lat_column, -90.0, 90.0)?;
    let longitude = parse_number(lon, row, lon_column)?;
    check_range(longitude, row, lon_column, -180.0, 180.0)?;
    Ok(Position::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Category;

    #[test]
    fn test_read_csv_recomputes_derived_columns() {
        // A stale democracy_type column must not leak into the table.
        let text = "\
country,democracy_index,latitude,longitude,democracy_type
Norway,9.81,60.472,8.468,Authoritarian
\"Korea, South\",8.09,35.907,127.766,
";
        let table = read_csv(text.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].category(), Category::FullDemocracy);
        assert_eq!(table.records()[1].name(), "Korea, South");
    }

    #[test]
    fn test_read_csv_missing_column() {
        let text = "country,democracy_index,latitude\nNorway,9.81,60.4\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(LONGITUDE)));
    }

    #[test]
    fn test_read_csv_non_numeric_score_fails_whole_load() {
        let text = "\
country,democracy_index,latitude,longitude
Norway,9.81,60.472,8.468
Russia,n/a,61.524,105.318
";
        let err = read_csv(text.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, DEMOCRACY_INDEX);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_csv_rejects_nan_and_bad_latitude() {
        let text = "country,democracy_index,latitude,longitude\nX,NaN,0,0\n";
        assert!(matches!(
            read_csv(text.as_bytes()).unwrap_err(),
            LoadError::InvalidNumber { .. }
        ));

        let text = "country,democracy_index,latitude,longitude\nX,5,91,0\n";
        assert!(matches!(
            read_csv(text.as_bytes()).unwrap_err(),
            LoadError::OutOfRange { column: LATITUDE, .. }
        ));
    }

    #[test]
    fn test_read_csv_ragged_row() {
        let text = "country,democracy_index,latitude,longitude\nNorway,9.81,60.4\n";
        assert!(matches!(
            read_csv(text.as_bytes()).unwrap_err(),
            LoadError::Csv(_)
        ));
    }

    #[test]
    fn test_read_csv_duplicate_country() {
        let text = "\
country,democracy_index,latitude,longitude
Norway,9.81,60.472,8.468
Norway,9.00,60.472,8.468
";
        assert!(matches!(
            read_csv(text.as_bytes()).unwrap_err(),
            LoadError::DuplicateName { row: 2, .. }
        ));
    }

    #[test]
    fn test_read_csv_rejects_score_outside_index_bounds() {
        let text = "country,democracy_index,latitude,longitude\nNorway,42.0,60.0,8.0\n";
        match read_csv(text.as_bytes()).unwrap_err() {
            LoadError::OutOfRange {
                row, column, value, ..
            } => {
                assert_eq!(row, 1);
                assert_eq!(column, DEMOCRACY_INDEX);
                assert_eq!(value, 42.0);
            }
            other => panic!("unexpected error: {other}"),
        }

        let text = "country,democracy_index,latitude,longitude\nNorway,9.81,60.0,8.0\nMars,-7,0,0\n";
        assert!(matches!(
            read_csv(text.as_bytes()).unwrap_err(),
            LoadError::OutOfRange { row: 2, column: DEMOCRACY_INDEX, .. }
        ));

        // both bounds are inclusive
        let text = "country,democracy_index,latitude,longitude\nA,0,0,0\nB,10,0,0\n";
        assert_eq!(read_csv(text.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn test_read_json_rejects_score_outside_index_bounds() {
        let text = r#"[{"country": "Norway", "democracy_index": 1e300, "latitude": 60, "longitude": 8}]"#;
        assert!(matches!(
            read_json(text.as_bytes()).unwrap_err(),
            LoadError::OutOfRange { row: 1, column: DEMOCRACY_INDEX, .. }
        ));

        let text = r#"[{"country": "Mars", "democracy_index": -0.5, "latitude": 0, "longitude": 0}]"#;
        assert!(matches!(
            read_json(text.as_bytes()).unwrap_err(),
            LoadError::OutOfRange { column: DEMOCRACY_INDEX, .. }
        ));
    }

    #[test]
    fn test_read_json() {
        let text = r#"[
            {"country": "Norway", "democracy_index": 9.81, "latitude": 60.472, "longitude": 8.468, "region": "ignored"},
            {"country": "Russia", "democracy_index": 2.28, "latitude": 61.524, "longitude": 105.318}
        ]"#;
        let table = read_json(text.as_bytes()).unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Norway", "Russia"]);
        assert_eq!(table.records()[1].category(), Category::Authoritarian);

        let text = r#"[{"country": "Norway", "democracy_index": "high", "latitude": 0, "longitude": 0}]"#;
        assert!(matches!(
            read_json(text.as_bytes()).unwrap_err(),
            LoadError::Json(_)
        ));
    }

    #[test]
    fn test_load_file_rejects_unknown_extension() {
        let err = load_file(Path::new("table.parquet")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "parquet"));
    }

    #[test]
    fn test_load_file_missing_file() {
        let err = load_file(Path::new("/nonexistent/democracy.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_read_energy_csv_with_positions() {
        let text = "\
Country,Renewable_Percentage,Latitude,Longitude
Norway,98.5,60.472,8.468
Germany,46.2,51.165,10.451
";
        let table = read_energy_csv(text.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].renewable_percentage, 98.5);
        assert_eq!(table.rows[1].position, Some(Position::new(51.165, 10.451)));
    }

    #[test]
    fn test_bundled_energy_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/renewable_energy.csv");
        let table = load_energy_file(&path).unwrap();
        assert!(!table.is_empty());
        assert!(table.rows.iter().all(|r| r.position.is_some()));
        assert_eq!(table.ranked()[0].country, "Iceland");
    }

    #[test]
    fn test_read_energy_csv_without_positions() {
        let text = "Country,Renewable_Percentage\nIceland,100\nPoland,21.7\n";
        let table = read_energy_csv(text.as_bytes()).unwrap();
        assert!(table.rows.iter().all(|r| r.position.is_none()));
    }

    #[test]
    fn test_read_energy_csv_errors() {
        let text = "Country,Share\nIceland,100\n";
        assert!(matches!(
            read_energy_csv(text.as_bytes()).unwrap_err(),
            LoadError::MissingColumn(ENERGY_PERCENTAGE)
        ));

        let text = "Country,Renewable_Percentage,Latitude\nIceland,100,64.9\n";
        assert!(matches!(
            read_energy_csv(text.as_bytes()).unwrap_err(),
            LoadError::MissingColumn(ENERGY_LONGITUDE)
        ));

        let text = "Country,Renewable_Percentage\nIceland,100\nMars,120\n";
        assert!(matches!(
            read_energy_csv(text.as_bytes()).unwrap_err(),
            LoadError::OutOfRange { row: 2, .. }
        ));

        let text = "Country,Renewable_Percentage\nIceland,lots\n";
        assert!(matches!(
            read_energy_csv(text.as_bytes()).unwrap_err(),
            LoadError::InvalidNumber { row: 1, .. }
        ));
    }
}
