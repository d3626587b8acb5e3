//! Results table loader
//!
//! Reads `results.csv` as written by the linked-list benchmark harness. Cells are
//! kept as text and parsed per column on demand, so a chart only fails on the
//! columns it actually plots.

use crate::types::{Column, ReportError, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Benchmark results, one row per tested input size
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    headers: Vec<String>,
    /// Raw cell text, column-major, aligned with `headers`
    cells: Vec<Vec<String>>,
    rows: usize,
}

impl ResultsTable {
    /// Load the table from a CSV file
    ///
    /// Returns [`ReportError::InputNotFound`] if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading results table: {:?}", path);

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReportError::InputNotFound(path.to_path_buf()),
            _ => ReportError::IoError(e),
        })?;

        let table = Self::from_reader(file)?;
        log::info!(
            "Loaded {} rows, columns: {}",
            table.len(),
            table.headers.join(", ")
        );
        Ok(table)
    }

    /// Parse a table from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let mut cells = vec![Vec::new(); headers.len()];
        let mut rows = 0;

        for record in csv_reader.records() {
            let record = record?;
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(field.to_string());
            }
            rows += 1;
        }

        log::debug!("Parsed {} records with {} columns", rows, headers.len());

        Ok(Self {
            headers,
            cells,
            rows,
        })
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Header names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.position(column).is_some()
    }

    /// Parse one column as floating-point values
    ///
    /// Fails with [`ReportError::MissingColumn`] if the header is absent and with
    /// [`ReportError::InvalidValue`] (1-based data row) if a cell is not a number.
    pub fn column(&self, column: Column) -> Result<Vec<f64>> {
        let index = self
            .position(column)
            .ok_or_else(|| ReportError::MissingColumn(column.header().to_string()))?;

        self.cells[index]
            .iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.parse::<f64>().map_err(|_| ReportError::InvalidValue {
                    column: column.header().to_string(),
                    row: row + 1,
                    value: cell.clone(),
                })
            })
            .collect()
    }

    /// First header matching the column name
    fn position(&self, column: Column) -> Option<usize> {
        self.headers.iter().position(|h| h == column.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "N,Smart_ms,Raw_ms,Smart_alive,Raw_alive\n\
                          10,1.0,1.2,5,5\n\
                          20,2.0,2.5,5,4\n\
                          30,3.5,4.0,5,3\n";

    #[test]
    fn test_parse_sample() {
        let table = ResultsTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.column(Column::N).unwrap(), vec![10.0, 20.0, 30.0]);
        assert_eq!(table.column(Column::SmartMs).unwrap(), vec![1.0, 2.0, 3.5]);
        assert_eq!(table.column(Column::RawMs).unwrap(), vec![1.2, 2.5, 4.0]);
        assert_eq!(table.column(Column::SmartAlive).unwrap(), vec![5.0, 5.0, 5.0]);
        assert_eq!(table.column(Column::RawAlive).unwrap(), vec![5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let csv = "N, Smart_ms, Raw_ms, Smart_alive, Raw_alive\n1000, 3, 2, 0, 0\n";
        let table = ResultsTable::from_reader(csv.as_bytes()).unwrap();
        for column in Column::ALL {
            assert!(table.has_column(column), "missing {}", column);
        }
        assert_eq!(table.column(Column::SmartMs).unwrap(), vec![3.0]);
    }

    #[test]
    fn test_missing_column_is_lazy() {
        let csv = "N,Smart_ms,Raw_ms,Smart_alive\n10,1,1,5\n";
        let table = ResultsTable::from_reader(csv.as_bytes()).unwrap();

        assert!(table.column(Column::RawMs).is_ok());
        match table.column(Column::RawAlive) {
            Err(ReportError::MissingColumn(name)) => assert_eq!(name, "Raw_alive"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_value_reports_row() {
        let csv = "N,Smart_ms\n10,1.0\n20,fast\n";
        let table = ResultsTable::from_reader(csv.as_bytes()).unwrap();

        match table.column(Column::SmartMs) {
            Err(ReportError::InvalidValue { column, row, value }) => {
                assert_eq!(column, "Smart_ms");
                assert_eq!(row, 2);
                assert_eq!(value, "fast");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_unequal_row_length_is_rejected() {
        let csv = "N,Smart_ms,Raw_ms\n10,1.0,1.2\n20,2.0\n";
        let result = ResultsTable::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(ReportError::Csv(_))));
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let csv = "N,Smart_ms,Raw_ms,Smart_alive,Raw_alive\n";
        let table = ResultsTable::from_reader(csv.as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.column(Column::N).unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        match ResultsTable::load(&path) {
            Err(ReportError::InputNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let table = ResultsTable::load(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.headers().len(), 5);
    }
}
