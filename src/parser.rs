use crate::dataset::{Dataset, NumericColumn};
use crate::error::LoadError;
use crate::models::{
    parse_cluster, parse_count, parse_hour, parse_measure, parse_month, parse_weekday,
    HourRecord, REQUIRED_COLUMNS,
};
use csv::StringRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

pub struct DatasetParser {
    pub(crate) data_path: String,
    pub(crate) quiet: bool,
}

/// Collects one column's cells while rows stream in.
struct ColumnAccumulator {
    name: String,
    values: Vec<f64>,
    numeric: bool,
}

impl ColumnAccumulator {
    fn push(&mut self, cell: &str) {
        if !self.numeric {
            return;
        }
        if cell.is_empty() {
            self.values.push(f64::NAN);
            return;
        }
        match cell.parse::<f64>() {
            Ok(value) => self.values.push(value),
            Err(_) => {
                self.numeric = false;
                self.values = Vec::new();
            }
        }
    }
}

impl DatasetParser {
    pub fn new(data_path: impl Into<String>) -> Self {
        Self {
            data_path: data_path.into(),
            quiet: false,
        }
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_path).into_owned())
    }

    /// Read and validate the whole file. Any problem aborts the load; there is no
    /// partially loaded dataset.
    pub fn parse(&self) -> Result<Dataset, LoadError> {
        let start = Instant::now();
        let path = self.resolved_path();

        if !path.exists() {
            return Err(LoadError::NotFound(path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)?;
        let headers = reader.headers()?.clone();
        let layout = RecordLayout::from_headers(&headers)?;

        let pb = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Loading {}", path.display()));

        let mut columns: Vec<ColumnAccumulator> = headers
            .iter()
            .map(|name| ColumnAccumulator {
                name: name.to_string(),
                values: Vec::new(),
                numeric: true,
            })
            .collect();
        let mut records = Vec::new();

        for result in reader.records() {
            let row = result?;
            records.push(layout.parse_row(&row)?);
            if records.len() % 1000 == 0 {
                pb.tick();
            }
            for (column, cell) in columns.iter_mut().zip(row.iter()) {
                column.push(cell);
            }
        }

        pb.finish_and_clear();

        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let numeric_columns: Vec<NumericColumn> = columns
            .into_iter()
            .filter(|c| c.numeric)
            .map(|c| NumericColumn {
                name: c.name,
                values: c.values,
            })
            .collect();

        tracing::info!(
            path = %path.display(),
            rows = records.len(),
            numeric_columns = numeric_columns.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded dataset"
        );

        Ok(Dataset::new(path, records, numeric_columns))
    }
}

/// Header positions of the typed columns, resolved once per file.
struct RecordLayout {
    positions: HashMap<&'static str, usize>,
}

impl RecordLayout {
    /// Fails with every missing required column at once.
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let mut positions = HashMap::new();
        let mut missing = Vec::new();
        for required in REQUIRED_COLUMNS {
            match headers.iter().position(|h| h == required) {
                Some(i) => {
                    positions.insert(required, i);
                }
                None => missing.push(required.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            Err(LoadError::MissingColumns(missing))
        }
    }

    fn parse_row(&self, row: &StringRecord) -> Result<HourRecord, LoadError> {
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        self.build_record(row)
            .map_err(|message| LoadError::InvalidRow { line, message })
    }

    fn build_record(&self, row: &StringRecord) -> Result<HourRecord, String> {
        Ok(HourRecord {
            temperature: self.field(row, "temp_y", parse_measure)?,
            humidity: self.field(row, "hum_y", parse_measure)?,
            windspeed: self.field(row, "windspeed_y", parse_measure)?,
            weekday: self.field(row, "weekday_y", parse_weekday)?,
            month: self.field(row, "mnth_x", parse_month)?,
            hour: self.field(row, "hr", parse_hour)?,
            count: self.field(row, "cnt_y", parse_count)?,
            casual: self.field(row, "casual_y", parse_count)?,
            registered: self.field(row, "registered_y", parse_count)?,
            cluster: self.field(row, "cluster", parse_cluster)?,
        })
    }

    fn field<T>(
        &self,
        row: &StringRecord,
        column: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, String> {
        let raw = self
            .positions
            .get(column)
            .and_then(|&i| row.get(i))
            .unwrap_or("");
        parse(raw).ok_or_else(|| format!("column `{}`: invalid value {:?}", column, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
        DatasetParser::new(path.to_string_lossy()).quiet().parse()
    }

    const HEADER: &str =
        "instant,dteday,temp_y,hum_y,windspeed_y,weekday_y,mnth_x,hr,cnt_y,casual_y,registered_y,cluster";

    fn write_csv(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("analysis.csv");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_parse_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(
            &temp_dir,
            &format!(
                "{}\n1,2011-01-01,0.24,0.81,0.0,Saturday,1,0,16,3,13,0\n2,2011-01-01,0.22,0.80,,Saturday,1,1,40,8,32,1\n",
                HEADER
            ),
        );

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].count, 40);

        let names: Vec<_> = dataset.numeric_columns().iter().map(|c| c.name.as_str()).collect();
        // dteday and the weekday names are not numeric
        assert!(!names.contains(&"dteday"));
        assert!(!names.contains(&"weekday_y"));
        assert!(names.contains(&"instant"));
        assert!(names.contains(&"cnt_y"));

        let windspeed = dataset
            .numeric_columns()
            .iter()
            .find(|c| c.name == "windspeed_y")
            .unwrap();
        assert_eq!(windspeed.values[0], 0.0);
        assert!(windspeed.values[1].is_nan());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_dataset(&temp_dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_missing_required_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(
            &temp_dir,
            "temp_y,hum_y,windspeed_y,weekday_y,mnth_x,hr,cnt_y,casual_y,registered_y\n0.2,0.8,0.1,Monday,1,0,1,0,1\n",
        );

        match load_dataset(&path) {
            Err(LoadError::MissingColumns(missing)) => assert_eq!(missing, vec!["cluster"]),
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_value_reports_line_and_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(
            &temp_dir,
            &format!(
                "{}\n1,2011-01-01,0.24,0.81,0.0,Saturday,1,0,16,3,13,0\n2,2011-01-01,0.22,0.80,0.0,Saturday,1,xx,40,8,32,1\n",
                HEADER
            ),
        );

        match load_dataset(&path) {
            Err(LoadError::InvalidRow { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("`hr`"), "unexpected message: {}", message);
                assert!(message.contains("\"xx\""), "unexpected message: {}", message);
            }
            other => panic!("Expected InvalidRow, got {:?}", other),
        }
    }

    #[test]
    fn test_every_typed_column_is_named_in_errors() {
        let good = ["0.24", "0.81", "0.0", "Saturday", "1", "0", "16", "3", "13", "0"];
        for (i, column) in REQUIRED_COLUMNS.iter().enumerate() {
            let mut cells = good.to_vec();
            cells[i] = "bogus";
            let temp_dir = TempDir::new().unwrap();
            let path = write_csv(
                &temp_dir,
                &format!("{}\n{}\n", REQUIRED_COLUMNS.join(","), cells.join(",")),
            );

            match load_dataset(&path) {
                Err(LoadError::InvalidRow { line, message }) => {
                    assert_eq!(line, 2);
                    assert!(
                        message.contains(&format!("`{}`", column)),
                        "{} not named in: {}",
                        column,
                        message
                    );
                }
                other => panic!("Expected InvalidRow for {}, got {:?}", column, other),
            }
        }
    }

    #[test]
    fn test_extra_columns_and_order_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(
            &temp_dir,
            "cluster,note,registered_y,casual_y,cnt_y,hr,mnth_x,weekday_y,windspeed_y,hum_y,temp_y\n\
             2,x,13,3,16,0,Jan,6,0.0,0.81,0.24\n",
        );

        let dataset = load_dataset(&path).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.temperature, Some(0.24));
        assert_eq!(record.weekday, chrono::Weekday::Sat);
        assert_eq!(record.month, chrono::Month::January);
        assert_eq!(record.casual + record.registered, record.count);
        assert_eq!(record.cluster, 2);
    }

    #[test]
    fn test_unreadable_path_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory exists but cannot be read as a file
        let err = load_dataset(temp_dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)), "got {:?}", err);
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(&temp_dir, &format!("{}\n", HEADER));
        assert!(matches!(load_dataset(&path), Err(LoadError::Empty)));
    }

    #[test]
    fn test_ragged_row_is_a_csv_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(
            &temp_dir,
            &format!("{}\n1,2011-01-01,0.24,0.81\n", HEADER),
        );
        assert!(matches!(load_dataset(&path), Err(LoadError::Csv(_))));
    }
}
