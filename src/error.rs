use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the dataset. All of them abort the report.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset file not found at: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(csv::Error),

    /// The header row lacks columns a chart needs.
    #[error("dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("dataset contains no rows")]
    Empty,
}

/// Errors raised while computing aggregate views over a loaded dataset.
#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("total user count is zero, user percentages are undefined")]
    NoUsers,

    /// A column total does not fit in 64 bits.
    #[error("sum of `{0}` overflows")]
    CountOverflow(&'static str),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        // The csv reader wraps every read failure; surface those as plain I/O errors.
        if let csv::ErrorKind::Io(io) = err.kind() {
            return LoadError::Io(std::io::Error::new(io.kind(), io.to_string()));
        }
        LoadError::Csv(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_every_column() {
        let err = LoadError::MissingColumns(vec!["cnt_y".to_string(), "cluster".to_string()]);
        assert_eq!(
            err.to_string(),
            "dataset is missing required column(s): cnt_y, cluster"
        );
    }

    #[test]
    fn test_invalid_row_message_carries_line() {
        let err = LoadError::InvalidRow {
            line: 7,
            message: "field `hr`: invalid digit".to_string(),
        };
        assert_eq!(err.to_string(), "line 7: field `hr`: invalid digit");
    }

    #[test]
    fn test_csv_io_failure_maps_to_io() {
        let csv_err = csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(matches!(LoadError::from(csv_err), LoadError::Io(_)));
    }

    #[test]
    fn test_count_overflow_names_column() {
        assert_eq!(
            AggregateError::CountOverflow("casual_y").to_string(),
            "sum of `casual_y` overflows"
        );
    }
}
