//! Benchmark Report Library
//!
//! Turns the results of the linked-list benchmark (smart-pointer list vs.
//! raw-pointer list) into two PNG charts.
//!
//! # Architecture
//!
//! The report is a straight sequence of steps:
//! - Load `results.csv` into a [`ResultsTable`]
//! - Build a [`ChartSpec`] per [`ChartKind`] (execution time, live objects)
//! - Render each chart to PNG at the configured DPI and write it next to the input
//!
//! Printing and argument handling live in the application layer (bench-report-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use bench_report::{ChartKind, ReportConfig, ReportGenerator};
//!
//! let config = ReportConfig::new().with_dpi(150);
//! let generator = ReportGenerator::with_config("report", config).unwrap();
//!
//! let table = generator.load().unwrap();
//! for kind in ChartKind::ALL {
//!     let path = generator.render(&table, kind).unwrap();
//!     println!("Saved {}", path.display());
//! }
//! ```

// Public modules
pub mod chart;
pub mod config;
pub mod generator;
pub mod render;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use chart::{ChartSpec, Series};
pub use config::{ChartConfig, FigureSize, LineStyle, Marker, ReportConfig, Rgb, SeriesStyle};
pub use generator::ReportGenerator;
pub use table::ResultsTable;
pub use types::{ChartKind, Column, ReportError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: default generator points at the standard file names
        let generator = ReportGenerator::new(".");
        assert!(generator.input_path().ends_with("results.csv"));
        assert_eq!(generator.config().dpi, 150);
    }
}
