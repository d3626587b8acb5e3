//! Configuration file loading
//!
//! An optional `report.toml` overrides the library defaults key by key. Every
//! section and key may be omitted.

use anyhow::{Context, Result};
use bench_report::{ChartConfig, ChartKind, ReportConfig, Rgb};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration (loaded from report.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub time_chart: ChartOverrides,
    #[serde(default)]
    pub memory_chart: ChartOverrides,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub dpi: Option<u32>,
    pub width_in: Option<f64>,
    pub height_in: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartOverrides {
    pub file: Option<PathBuf>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub smart_label: Option<String>,
    pub raw_label: Option<String>,
    pub smart_color: Option<Rgb>,
    pub raw_color: Option<Rgb>,
}

impl AppConfig {
    /// Apply the overrides on top of `base`
    pub fn apply(self, mut base: ReportConfig) -> ReportConfig {
        if let Some(file) = self.input.file {
            base.input_file = file;
        }
        if let Some(dpi) = self.output.dpi {
            base.dpi = dpi;
        }
        if let Some(width) = self.output.width_in {
            base.figure_size.width_in = width;
        }
        if let Some(height) = self.output.height_in {
            base.figure_size.height_in = height;
        }

        self.time_chart.apply(base.chart_mut(ChartKind::Time));
        self.memory_chart.apply(base.chart_mut(ChartKind::Memory));
        base
    }
}

impl ChartOverrides {
    fn apply(self, chart: &mut ChartConfig) {
        if let Some(file) = self.file {
            chart.output_file = file;
        }
        if let Some(title) = self.title {
            chart.title = title;
        }
        if let Some(x_label) = self.x_label {
            chart.x_label = x_label;
        }
        if let Some(y_label) = self.y_label {
            chart.y_label = y_label;
        }
        if let Some(label) = self.smart_label {
            chart.smart.label = label;
        }
        if let Some(label) = self.raw_label {
            chart.raw.label = label;
        }
        if let Some(color) = self.smart_color {
            chart.smart.color = color;
        }
        if let Some(color) = self.raw_color {
            chart.raw.color = color;
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
