//! Report generator API
//!
//! This module provides the primary interface of the library. A
//! [`ReportGenerator`] is bound to a report directory: it reads the results
//! table from there and writes both chart images next to it.

use crate::chart::ChartSpec;
use crate::config::ReportConfig;
use crate::render;
use crate::table::ResultsTable;
use crate::types::{ChartKind, ReportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The main generator struct - entry point for producing the report
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    /// Directory holding the input CSV and the output images
    dir: PathBuf,
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a generator for `dir` with the default configuration
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            config: ReportConfig::default(),
        }
    }

    /// Create a generator with a custom configuration
    ///
    /// # Returns
    /// * `Err(ReportError::InvalidConfig)` if the configuration cannot produce an image
    pub fn with_config(dir: impl Into<PathBuf>, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dir: dir.into(),
            config,
        })
    }

    /// Create a generator for the directory that contains the running executable
    pub fn beside_executable() -> Result<Self> {
        Ok(Self::new(executable_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Path of the results CSV
    pub fn input_path(&self) -> PathBuf {
        self.dir.join(&self.config.input_file)
    }

    /// Path of the image written for `kind`
    pub fn output_path(&self, kind: ChartKind) -> PathBuf {
        self.dir.join(&self.config.chart(kind).output_file)
    }

    /// Load the results table from the report directory
    pub fn load(&self) -> Result<ResultsTable> {
        ResultsTable::load(&self.input_path())
    }

    /// Build the chart model of `kind` without drawing it
    pub fn build_chart(&self, table: &ResultsTable, kind: ChartKind) -> Result<ChartSpec> {
        ChartSpec::from_table(table, kind, self.config.chart(kind))
    }

    /// Render the chart of `kind` and write it, replacing any existing file
    ///
    /// The image is encoded completely before the file is touched, so a failed
    /// render leaves the output path as it was.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - the path that was written
    pub fn render(&self, table: &ResultsTable, kind: ChartKind) -> Result<PathBuf> {
        let chart = self.build_chart(table, kind)?;
        let bytes = render::render_png(&chart, self.config.pixel_size(), self.config.dpi)?;

        let path = self.output_path(kind);
        fs::write(&path, &bytes).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

        log::info!("Wrote {} chart ({} bytes): {:?}", kind, bytes.len(), path);
        Ok(path)
    }

    /// Produce the whole report: load, then render each chart in order
    ///
    /// `on_saved` is called right after each image is written. Stops at the first
    /// error; images written before it stay on disk.
    ///
    /// # Example
    /// ```no_run
    /// use bench_report::ReportGenerator;
    ///
    /// let generator = ReportGenerator::new("report");
    /// generator
    ///     .generate(|kind, path| println!("{} chart saved: {}", kind, path.display()))
    ///     .unwrap();
    /// ```
    pub fn generate<F>(&self, mut on_saved: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(ChartKind, &Path),
    {
        let table = self.load()?;

        let mut written = Vec::with_capacity(ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            let path = self.render(&table, kind)?;
            on_saved(kind, &path);
            written.push(path);
        }

        Ok(written)
    }
}

/// Directory containing the current executable
fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ReportError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("executable has no parent directory: {:?}", exe),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let generator = ReportGenerator::new("/tmp/report");
        assert_eq!(generator.input_path(), PathBuf::from("/tmp/report/results.csv"));
        assert_eq!(
            generator.output_path(ChartKind::Time),
            PathBuf::from("/tmp/report/plot_time.png")
        );
        assert_eq!(
            generator.output_path(ChartKind::Memory),
            PathBuf::from("/tmp/report/plot_memory.png")
        );
    }

    #[test]
    fn test_with_config_validates() {
        let config = ReportConfig::new().with_dpi(0);
        assert!(matches!(
            ReportGenerator::with_config("/tmp", config),
            Err(ReportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_beside_executable() {
        let generator = ReportGenerator::beside_executable().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(Some(generator.dir()), exe.parent());
    }
}
