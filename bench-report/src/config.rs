//! Report configuration types
//!
//! The defaults reproduce the benchmark's original report: `results.csv` in,
//! `plot_time.png` and `plot_memory.png` out, 8 x 5 inch figures at 150 DPI.

use crate::types::{ChartKind, ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Largest accepted image side in pixels
pub const MAX_IMAGE_SIDE_PX: u32 = 16384;

/// Configuration for the whole report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Input CSV, relative to the report directory
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,

    /// Output resolution in dots per inch
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Figure size in inches
    #[serde(default)]
    pub figure_size: FigureSize,

    #[serde(default = "ChartConfig::time")]
    pub time_chart: ChartConfig,

    #[serde(default = "ChartConfig::memory")]
    pub memory_chart: ChartConfig,
}

fn default_input_file() -> PathBuf {
    PathBuf::from("results.csv")
}

fn default_dpi() -> u32 {
    150
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_file: default_input_file(),
            dpi: default_dpi(),
            figure_size: FigureSize::default(),
            time_chart: ChartConfig::time(),
            memory_chart: ChartConfig::memory(),
        }
    }
}

impl ReportConfig {
    /// Create a report configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the input CSV file name
    pub fn with_input_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.input_file = file.into();
        self
    }

    /// Builder method: set the output resolution
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Builder method: set the figure size in inches
    pub fn with_figure_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.figure_size = FigureSize {
            width_in,
            height_in,
        };
        self
    }

    /// Builder method: replace the configuration of one chart
    pub fn with_chart(mut self, kind: ChartKind, chart: ChartConfig) -> Self {
        *self.chart_mut(kind) = chart;
        self
    }

    pub fn chart(&self, kind: ChartKind) -> &ChartConfig {
        match kind {
            ChartKind::Time => &self.time_chart,
            ChartKind::Memory => &self.memory_chart,
        }
    }

    pub fn chart_mut(&mut self, kind: ChartKind) -> &mut ChartConfig {
        match kind {
            ChartKind::Time => &mut self.time_chart,
            ChartKind::Memory => &mut self.memory_chart,
        }
    }

    /// Image size in pixels (figure size times DPI)
    pub fn pixel_size(&self) -> (u32, u32) {
        self.figure_size.to_pixels(self.dpi)
    }

    /// Check that the configuration can produce an image
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(ReportError::InvalidConfig("dpi must be positive".to_string()));
        }

        let FigureSize {
            width_in,
            height_in,
        } = self.figure_size;
        if !(width_in.is_finite() && height_in.is_finite() && width_in > 0.0 && height_in > 0.0)
        {
            return Err(ReportError::InvalidConfig(format!(
                "figure size must be positive, got {} x {} in",
                width_in, height_in
            )));
        }

        let (width, height) = self.pixel_size();
        if width == 0 || height == 0 || width > MAX_IMAGE_SIDE_PX || height > MAX_IMAGE_SIDE_PX {
            return Err(ReportError::InvalidConfig(format!(
                "image size {}x{} px is out of range (1..={} per side)",
                width, height, MAX_IMAGE_SIDE_PX
            )));
        }

        if self.input_file.as_os_str().is_empty() {
            return Err(ReportError::InvalidConfig("input file name is empty".to_string()));
        }

        for kind in ChartKind::ALL {
            if self.chart(kind).output_file.as_os_str().is_empty() {
                return Err(ReportError::InvalidConfig(format!(
                    "{} chart output file name is empty",
                    kind
                )));
            }
        }

        Ok(())
    }
}

/// Figure size in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl FigureSize {
    /// Size in whole pixels at `dpi`
    pub fn to_pixels(self, dpi: u32) -> (u32, u32) {
        let dpi = f64::from(dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width_in: 8.0,
            height_in: 5.0,
        }
    }
}

/// Text and series styling of a single chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Output image, relative to the report directory
    pub output_file: PathBuf,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Style of the smart-pointer series
    pub smart: SeriesStyle,
    /// Style of the raw-pointer series
    pub raw: SeriesStyle,
}

impl ChartConfig {
    /// Execution time chart defaults
    pub fn time() -> Self {
        Self {
            output_file: PathBuf::from("plot_time.png"),
            title: "LinkedList performance comparison".to_string(),
            x_label: "Number of elements N".to_string(),
            y_label: "Execution time, ms".to_string(),
            smart: SeriesStyle::solid("LinkedList (UnqPtr)", Rgb::TAB_BLUE),
            raw: SeriesStyle::dashed("LinkedList (raw pointers)", Rgb::TAB_ORANGE),
        }
    }

    /// Live-object chart defaults
    pub fn memory() -> Self {
        Self {
            output_file: PathBuf::from("plot_memory.png"),
            title: "Memory usage comparison (live Tracker objects)".to_string(),
            x_label: "Number of elements N".to_string(),
            y_label: "Unreleased objects".to_string(),
            smart: SeriesStyle::solid("Live objects (Smart)", Rgb::GREEN),
            raw: SeriesStyle::dashed("Live objects (Raw)", Rgb::RED),
        }
    }
}

/// How one series is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// Legend label
    pub label: String,
    pub color: Rgb,
    pub marker: Marker,
    pub line: LineStyle,
    /// Line width in points
    #[serde(default = "default_line_width")]
    pub line_width_pt: f64,
}

fn default_line_width() -> f64 {
    2.0
}

impl SeriesStyle {
    /// Solid line with circle markers (`o-`)
    pub fn solid(label: impl Into<String>, color: Rgb) -> Self {
        Self {
            label: label.into(),
            color,
            marker: Marker::Circle,
            line: LineStyle::Solid,
            line_width_pt: default_line_width(),
        }
    }

    /// Dashed line with square markers (`s--`)
    pub fn dashed(label: impl Into<String>, color: Rgb) -> Self {
        Self {
            label: label.into(),
            color,
            marker: Marker::Square,
            line: LineStyle::Dashed,
            line_width_pt: default_line_width(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Circle,
    Square,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// 24-bit RGB color, written as `#rrggbb` or a named color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const TAB_BLUE: Rgb = Rgb::from_hex(0x1f77b4);
    pub const TAB_ORANGE: Rgb = Rgb::from_hex(0xff7f0e);
    pub const GREEN: Rgb = Rgb::from_hex(0x008000);
    pub const RED: Rgb = Rgb::from_hex(0xff0000);
    pub const BLUE: Rgb = Rgb::from_hex(0x0000ff);
    pub const BLACK: Rgb = Rgb::from_hex(0x000000);

    pub const fn from_hex(rgb: u32) -> Self {
        Rgb(
            ((rgb & 0xFF0000) >> 16) as u8,
            ((rgb & 0x00FF00) >> 8) as u8,
            (rgb & 0x0000FF) as u8,
        )
    }
}

impl FromStr for Rgb {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "green" => return Ok(Rgb::GREEN),
            "red" => return Ok(Rgb::RED),
            "blue" => return Ok(Rgb::BLUE),
            "black" => return Ok(Rgb::BLACK),
            "orange" => return Ok(Rgb::TAB_ORANGE),
            _ => {}
        }

        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6)
            .ok_or_else(|| ReportError::InvalidConfig(format!("invalid color: {:?}", s)))?;
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| ReportError::InvalidConfig(format!("invalid color: {:?}", s)))?;

        Ok(Rgb::from_hex(value))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ReportError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
