use std::path::PathBuf;

use thiserror::Error;

/// A query referenced a country that is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no country named '{name}' in the table")]
pub struct NotFoundError {
    pub name: String,
}

/// Failure while reading a table from a file. Loads are all-or-nothing:
/// one bad row rejects the whole file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' in column '{column}' is not a finite number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: {column} value {value} is outside {min}..={max}")]
    OutOfRange {
        row: usize,
        column: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("row {row}: country name is empty")]
    EmptyName { row: usize },

    #[error("row {row}: duplicate country '{name}'")]
    DuplicateName { row: usize, name: String },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotFoundError {
            name: "Atlantis".to_string(),
        };
        assert_eq!(err.to_string(), "no country named 'Atlantis' in the table");

        let err = LoadError::MissingColumn("Country");
        assert_eq!(err.to_string(), "missing required column 'Country'");

        let err = LoadError::InvalidNumber {
            row: 3,
            column: "democracy_index",
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "row 3: 'abc' in column 'democracy_index' is not a finite number"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<LoadError>();
        assert_sync::<LoadError>();
        assert_send::<NotFoundError>();
        assert_sync::<NotFoundError>();
    }
}
