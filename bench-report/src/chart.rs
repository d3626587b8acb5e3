//! Chart model
//!
//! A [`ChartSpec`] is everything needed to draw one chart: text, and one series
//! of `(N, value)` points per list implementation. Building it is separate from
//! drawing so the data side can be checked without rendering.

use crate::config::{ChartConfig, SeriesStyle};
use crate::table::ResultsTable;
use crate::types::{ChartKind, Column, ReportError, Result};
use std::ops::Range;

/// Fraction of the data span added on each side of an axis
const AXIS_MARGIN: f64 = 0.05;

/// One plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// `(x, y)` pairs in table row order
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

/// A fully-specified line chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Build the chart of `kind` from the results table
    ///
    /// Each series has exactly one point per table row. Fails if `N` or one of
    /// the value columns of `kind` is missing or not numeric.
    pub fn from_table(table: &ResultsTable, kind: ChartKind, config: &ChartConfig) -> Result<Self> {
        let xs = table.column(Column::N)?;
        let (smart_column, raw_column) = kind.value_columns();

        let series = vec![
            build_series(&xs, table.column(smart_column)?, &config.smart),
            build_series(&xs, table.column(raw_column)?, &config.raw),
        ];

        Ok(Self {
            title: config.title.clone(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            series,
        })
    }

    /// X axis range covering every point, with margins
    ///
    /// Fails with [`ReportError::Render`] when the data span does not fit in an `f64`.
    pub fn x_range(&self) -> Result<Range<f64>> {
        axis_range("x", self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))
    }

    /// Y axis range covering every point, with margins
    pub fn y_range(&self) -> Result<Range<f64>> {
        axis_range("y", self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
    }
}

fn axis_range(axis: &str, values: impl Iterator<Item = f64>) -> Result<Range<f64>> {
    let (min, max) = finite_bounds(values);
    padded_range(min, max).ok_or_else(|| {
        ReportError::Render(format!(
            "{} axis values span {:e}..{:e}, which is too wide to plot",
            axis, min, max
        ))
    })
}

fn build_series(xs: &[f64], ys: Vec<f64>, style: &SeriesStyle) -> Series {
    Series {
        label: style.label.clone(),
        points: xs.iter().copied().zip(ys).collect(),
        style: style.clone(),
    }
}

/// Smallest and largest finite value; `(inf, -inf)` when there is none
fn finite_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// `min..max` plus [`AXIS_MARGIN`] on each side (at least 0.5 for a single value)
///
/// `None` if the padded range or its width overflows `f64`.
fn padded_range(min: f64, max: f64) -> Option<Range<f64>> {
    if min > max {
        return Some(0.0..1.0);
    }

    let span = max - min;
    let pad = if span == 0.0 {
        (max.abs() * AXIS_MARGIN).max(0.5)
    } else {
        span * AXIS_MARGIN
    };
    let (start, end) = (min - pad, max + pad);

    let width = end - start;
    if span.is_finite() && start.is_finite() && end.is_finite() && width.is_finite() && width > 0.0 {
        Some(start..end)
    } else {
        None
    }
}
