//! Chart rendering
//!
//! Draws a [`ChartSpec`] into an in-memory RGB buffer with plotters and encodes it
//! as PNG. Sizes are given in points and converted at `dpi / 72`, so a figure keeps
//! its proportions at any resolution.

use crate::chart::{ChartSpec, Series};
use crate::config::{LineStyle, Marker, Rgb};
use crate::types::Result;
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

const TITLE_PT: f64 = 13.0;
const LABEL_PT: f64 = 10.0;
const MARKER_PT: f64 = 6.0;
const GRID_PT: f64 = 0.8;
const MARGIN_PT: f64 = 10.0;
/// Dash and gap lengths, in multiples of the line width
const DASH_ON: f64 = 3.7;
const DASH_OFF: f64 = 1.6;
const GRID_COLOR: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);
const GRID_ALPHA: f64 = 0.6;
/// Tick (and grid line) count hint per axis
const GRID_TICKS: usize = 10;

const LEGEND_PAD_PT: f64 = 5.0;
const LEGEND_SWATCH_PT: f64 = 20.0;
const LEGEND_GAP_PT: f64 = 6.0;
const LEGEND_OFFSET_PT: f64 = 8.0;

const METERS_PER_INCH: f64 = 0.0254;

/// Convert a length in points to whole pixels (at least one)
pub fn pt_to_px(pt: f64, dpi: u32) -> u32 {
    ((pt * f64::from(dpi) / 72.0).round() as u32).max(1)
}

/// Convert dots per inch to the pixels-per-metre unit stored in PNG `pHYs`
pub fn dpi_to_ppm(dpi: u32) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}

/// Render a chart of `size` pixels to PNG bytes
pub fn render_png(chart: &ChartSpec, size: (u32, u32), dpi: u32) -> Result<Vec<u8>> {
    let (width, height) = size;
    log::debug!("Rendering {:?} at {}x{} px, {} dpi", chart.title, width, height, dpi);

    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    draw(chart, &mut pixels, size, dpi)?;
    encode_png(&pixels, width, height, dpi)
}

fn draw(chart: &ChartSpec, pixels: &mut [u8], size: (u32, u32), dpi: u32) -> Result<()> {
    let title_font = font(TITLE_PT, dpi);
    let label_font = font(LABEL_PT, dpi);
    let label_px = pt_to_px(LABEL_PT, dpi);

    let x_range = chart.x_range()?;
    let y_range = chart.y_range()?;
    log::debug!("Axis ranges: x={:?}, y={:?}", x_range, y_range);

    let root = BitMapBackend::with_buffer(pixels, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, title_font)
        .margin(pt_to_px(MARGIN_PT, dpi))
        .x_label_area_size(label_px * 3)
        .y_label_area_size(label_px * 4)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    // Axes and tick labels only; grid lines are drawn dashed below
    ctx.configure_mesh()
        .disable_mesh()
        .x_labels(GRID_TICKS)
        .y_labels(GRID_TICKS)
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .label_style(label_font.clone())
        .axis_desc_style(label_font.clone())
        .draw()?;

    draw_grid(&mut ctx, &x_range, &y_range, dpi)?;

    for series in &chart.series {
        draw_series(&mut ctx, series, dpi)?;
    }

    let (base_x, base_y) = ctx.plotting_area().get_base_pixel();
    let offset = pt_to_px(LEGEND_OFFSET_PT, dpi) as i32;
    draw_legend(
        &root,
        (base_x + offset, base_y + offset),
        &chart.series,
        TextStyle::from(label_font),
        dpi,
    )?;

    root.present()?;
    Ok(())
}

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Positions of the grid lines along one axis (the same key points as the tick labels)
fn grid_positions(range: &Range<f64>) -> Vec<f64> {
    RangedCoordf64::from(range.clone()).key_points(GRID_TICKS)
}

fn draw_grid(
    ctx: &mut Chart<'_, '_>,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
    dpi: u32,
) -> Result<()> {
    let line_px = pt_to_px(GRID_PT, dpi);
    let style = GRID_COLOR.mix(GRID_ALPHA).stroke_width(line_px);
    let (dash, gap) = dash_pattern(line_px);

    for x in grid_positions(x_range) {
        let line = vec![(x, y_range.start), (x, y_range.end)];
        ctx.draw_series(DashedLineSeries::new(line, dash, gap, style))?;
    }
    for y in grid_positions(y_range) {
        let line = vec![(x_range.start, y), (x_range.end, y)];
        ctx.draw_series(DashedLineSeries::new(line, dash, gap, style))?;
    }
    Ok(())
}

/// Dash and gap length in pixels for a line `line_px` wide
fn dash_pattern(line_px: u32) -> (u32, u32) {
    let dash = (DASH_ON * f64::from(line_px)).round() as u32;
    let gap = (DASH_OFF * f64::from(line_px)).round() as u32;
    (dash.max(1), gap.max(1))
}

fn draw_series(ctx: &mut Chart<'_, '_>, series: &Series, dpi: u32) -> Result<()> {
    let style = &series.style;
    let line_px = pt_to_px(style.line_width_pt, dpi);
    let color = rgb(style.color);
    let stroke = color.stroke_width(line_px);
    let points = series.points.iter().copied();

    match style.line {
        LineStyle::Solid => {
            ctx.draw_series(LineSeries::new(points, stroke))?;
        }
        LineStyle::Dashed => {
            let (dash, gap) = dash_pattern(line_px);
            ctx.draw_series(DashedLineSeries::new(points, dash, gap, stroke))?;
        }
    }

    let radius = pt_to_px(MARKER_PT / 2.0, dpi);
    match style.marker {
        Marker::Circle => {
            ctx.draw_series(
                series
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, radius, color.filled())),
            )?;
        }
        Marker::Square => {
            let r = radius as i32;
            ctx.draw_series(series.points.iter().map(|&p| {
                EmptyElement::at(p) + Rectangle::new([(-r, -r), (r, r)], color.filled())
            }))?;
        }
        Marker::None => {}
    }

    Ok(())
}

/// Pixel geometry of the legend box, relative to its top-left corner
#[derive(Debug, Clone, PartialEq)]
struct LegendLayout {
    pad: i32,
    swatch_len: i32,
    gap: i32,
    marker_radius: i32,
    row_height: i32,
    width: i32,
    height: i32,
}

impl LegendLayout {
    /// Lay out one row per label; `text_sizes` are the rendered label sizes
    fn new(text_sizes: &[(u32, u32)], dpi: u32) -> Self {
        let pad = pt_to_px(LEGEND_PAD_PT, dpi) as i32;
        let swatch_len = pt_to_px(LEGEND_SWATCH_PT, dpi) as i32;
        let gap = pt_to_px(LEGEND_GAP_PT, dpi) as i32;
        let marker_radius = pt_to_px(MARKER_PT / 2.0, dpi) as i32;

        let text_width = text_sizes.iter().map(|s| s.0).max().unwrap_or(0) as i32;
        let text_height = text_sizes.iter().map(|s| s.1).max().unwrap_or(0) as i32;
        let row_height = text_height.max(2 * marker_radius) + pad;

        let rows = text_sizes.len() as i32;
        Self {
            pad,
            swatch_len,
            gap,
            marker_radius,
            row_height,
            width: pad + swatch_len + gap + text_width + pad,
            height: pad + rows * row_height,
        }
    }

    /// Horizontal extent of the line sample, markers included
    fn swatch_span(&self) -> (i32, i32) {
        (self.pad, self.pad + self.swatch_len)
    }

    fn text_x(&self) -> i32 {
        self.pad + self.swatch_len + self.gap
    }

    fn row_center(&self, row: usize) -> i32 {
        self.pad / 2 + self.row_height * row as i32 + self.row_height / 2
    }
}

/// Draw the legend box with a line sample, marker and label per series
fn draw_legend(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    origin: (i32, i32),
    series: &[Series],
    text_style: TextStyle<'_>,
    dpi: u32,
) -> Result<()> {
    let mut text_sizes = Vec::with_capacity(series.len());
    for s in series {
        text_sizes.push(root.estimate_text_size(&s.label, &text_style)?);
    }
    let layout = LegendLayout::new(&text_sizes, dpi);
    let (x0, y0) = origin;

    let frame = [(x0, y0), (x0 + layout.width, y0 + layout.height)];
    root.draw(&Rectangle::new(frame, WHITE.mix(0.8).filled()))?;
    root.draw(&Rectangle::new(frame, BLACK.mix(0.3).stroke_width(1)))?;

    let label_style = text_style.pos(Pos::new(HPos::Left, VPos::Center));
    let (swatch_start, swatch_end) = layout.swatch_span();

    for (row, s) in series.iter().enumerate() {
        let cy = y0 + layout.row_center(row);
        let line_px = pt_to_px(s.style.line_width_pt, dpi);
        let color = rgb(s.style.color);
        let stroke = color.stroke_width(line_px);
        let line = vec![(x0 + swatch_start, cy), (x0 + swatch_end, cy)];

        match s.style.line {
            LineStyle::Solid => root.draw(&PathElement::new(line, stroke))?,
            LineStyle::Dashed => {
                let (dash, gap) = dash_pattern(line_px);
                for element in DashedLineSeries::new(line, dash, gap, stroke) {
                    root.draw(&element)?;
                }
            }
        }

        let mid = x0 + (swatch_start + swatch_end) / 2;
        let r = layout.marker_radius;
        match s.style.marker {
            Marker::Circle => root.draw(&Circle::new((mid, cy), r as u32, color.filled()))?,
            Marker::Square => {
                root.draw(&Rectangle::new([(mid - r, cy - r), (mid + r, cy + r)], color.filled()))?
            }
            Marker::None => {}
        }

        root.draw(&Text::new(
            s.label.clone(),
            (x0 + layout.text_x(), cy),
            label_style.clone(),
        ))?;
    }

    Ok(())
}

fn font(pt: f64, dpi: u32) -> FontDesc<'static> {
    FontDesc::new(
        FontFamily::SansSerif,
        f64::from(pt_to_px(pt, dpi)),
        FontStyle::Normal,
    )
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Encode an RGB buffer as PNG with the DPI recorded in `pHYs`
fn encode_png(pixels: &[u8], width: u32, height: u32, dpi: u32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let ppm = dpi_to_ppm(dpi);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixels)?;
        writer.finish()?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartConfig, SeriesStyle};
    use crate::types::ReportError;

    fn sample_chart(points: Vec<(f64, f64)>) -> ChartSpec {
        ChartSpec {
            title: "t".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            series: vec![
                Series {
                    label: "a".to_string(),
                    points: vec![(1.0, 1.0), (2.0, 4.0)],
                    style: SeriesStyle::solid("a", Rgb::TAB_BLUE),
                },
                Series {
                    label: "b".to_string(),
                    points,
                    style: ChartConfig::time().raw,
                },
            ],
        }
    }

    #[test]
    fn test_pt_to_px() {
        assert_eq!(pt_to_px(72.0, 150), 150);
        assert_eq!(pt_to_px(2.0, 150), 4);
        assert_eq!(pt_to_px(13.0, 150), 27);
        assert_eq!(pt_to_px(0.1, 72), 1);
    }

    #[test]
    fn test_dpi_to_ppm() {
        assert_eq!(dpi_to_ppm(150), 5906);
        assert_eq!(dpi_to_ppm(72), 2835);
    }

    #[test]
    fn test_dash_pattern() {
        assert_eq!(dash_pattern(4), (15, 6));
        assert_eq!(dash_pattern(1), (4, 2));
    }

    #[test]
    fn test_legend_text_clears_swatch() {
        // 150 dpi: the swatch is 42 px long and markers have a 6 px radius
        let layout = LegendLayout::new(&[(180, 21), (240, 21)], 150);
        let (start, end) = layout.swatch_span();

        assert_eq!(end - start, 42);
        assert!(layout.text_x() >= end + layout.gap);
        assert!(layout.text_x() > (start + end) / 2 + layout.marker_radius);
        assert!(layout.width >= layout.text_x() + 240);
    }

    #[test]
    fn test_legend_rows_do_not_overlap() {
        let layout = LegendLayout::new(&[(100, 21), (100, 21)], 150);

        let first = layout.row_center(0);
        let second = layout.row_center(1);
        assert!(second - first >= 21);
        assert!(second - first >= 2 * layout.marker_radius);
        assert!(second + layout.row_height / 2 <= layout.height);
    }

    #[test]
    fn test_grid_positions_lie_inside_range() {
        let range = 9.0..31.0;
        let ticks = grid_positions(&range);

        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| range.contains(t)));
    }

    #[test]
    fn test_encode_png_header() {
        let pixels = vec![255u8; 4 * 2 * 3];
        let bytes = encode_png(&pixels, 4, 2, 150).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let reader = png::Decoder::new(bytes.as_slice()).read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (4, 2));
        let dims = info.pixel_dims.as_ref().expect("pHYs chunk");
        assert_eq!(dims.xppu, 5906);
        assert!(matches!(dims.unit, png::Unit::Meter));
    }

    #[test]
    fn test_render_small_chart() {
        let chart = sample_chart(vec![(1.0, 2.0), (2.0, 3.0)]);

        let bytes = render_png(&chart, (400, 300), 100).unwrap();
        let reader = png::Decoder::new(bytes.as_slice()).read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (400, 300));
    }

    #[test]
    fn test_render_rejects_overflowing_range() {
        let chart = sample_chart(vec![(1.0, 1e308), (2.0, -1e308)]);

        let result = render_png(&chart, (400, 300), 100);
        assert!(matches!(result, Err(ReportError::Render(_))));
    }
}
