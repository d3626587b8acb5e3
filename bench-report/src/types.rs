//! Core types for the benchmark report library
//!
//! This module defines the columns of the results table, the two chart kinds the
//! generator produces, and the error type shared by every operation.

use plotters::drawing::DrawingAreaErrorKind;
use std::fmt;
use std::path::PathBuf;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// A column of `results.csv`
///
/// The set is closed: the benchmark harness always writes these five columns
/// and the report does not support alternate schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Input size (number of list elements)
    N,
    /// Smart-pointer list run time in milliseconds
    SmartMs,
    /// Raw-pointer list run time in milliseconds
    RawMs,
    /// Live objects left after the smart-pointer run
    SmartAlive,
    /// Live objects left after the raw-pointer run
    RawAlive,
}

impl Column {
    /// All columns in file order
    pub const ALL: [Column; 5] = [
        Column::N,
        Column::SmartMs,
        Column::RawMs,
        Column::SmartAlive,
        Column::RawAlive,
    ];

    /// Header text of this column in the CSV file
    pub fn header(self) -> &'static str {
        match self {
            Column::N => "N",
            Column::SmartMs => "Smart_ms",
            Column::RawMs => "Raw_ms",
            Column::SmartAlive => "Smart_alive",
            Column::RawAlive => "Raw_alive",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// The charts produced by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Execution time vs. input size
    Time,
    /// Live-object count vs. input size
    Memory,
}

impl ChartKind {
    /// Charts in the order they are rendered
    pub const ALL: [ChartKind; 2] = [ChartKind::Time, ChartKind::Memory];

    /// The (smart, raw) value columns plotted against `N`
    pub fn value_columns(self) -> (Column, Column) {
        match self {
            ChartKind::Time => (Column::SmartMs, Column::RawMs),
            ChartKind::Memory => (Column::SmartAlive, Column::RawAlive),
        }
    }

    /// Short human-readable name
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Time => "time",
            ChartKind::Memory => "memory",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while loading results or producing charts
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Results file not found: {0:?}")]
    InputNotFound(PathBuf),

    #[error("Failed to parse results CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column in results table: {0}")]
    MissingColumn(String),

    #[error("Invalid value {value:?} in column {column}, row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for ReportError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ReportError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_headers() {
        let headers: Vec<_> = Column::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(headers, vec!["N", "Smart_ms", "Raw_ms", "Smart_alive", "Raw_alive"]);
    }

    #[test]
    fn test_chart_value_columns() {
        assert_eq!(ChartKind::Time.value_columns(), (Column::SmartMs, Column::RawMs));
        assert_eq!(
            ChartKind::Memory.value_columns(),
            (Column::SmartAlive, Column::RawAlive)
        );
    }

    #[test]
    fn test_error_display() {
        let err = ReportError::InvalidValue {
            column: "Raw_ms".to_string(),
            row: 3,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value \"abc\" in column Raw_ms, row 3");

        let err = ReportError::MissingColumn("Raw_alive".to_string());
        assert!(err.to_string().contains("Raw_alive"));
    }
}
