//! Chart and summary export (PNG, CSV).

use anyhow::{Context, Result};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Once;

use crate::aggregate::Series;
use crate::chart::{display_y_bounds, format_percent, palette_color, ChartModel};
use crate::state::{CHART_HEIGHT, CHART_MARGIN, CHART_WIDTH, X_AXIS_TITLE, Y_AXIS_TITLE};

/// Pixels per logical unit in exported images
pub const EXPORT_SCALE: u32 = 2;

const BACKGROUND: RGBColor = RGBColor(30, 30, 30);
const PLOT_BACKGROUND: RGBColor = RGBColor(40, 40, 40);
const GRID: RGBColor = RGBColor(60, 60, 60);
const AXIS: RGBColor = RGBColor(200, 200, 200);

/// Family the bundled UI font is registered under
const FONT_FAMILY: &str = "sans-serif";

static REGISTER_FONT: Once = Once::new();

/// Options that change how the exported image looks
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageOptions {
    pub color_blind_mode: bool,
    pub show_spread: bool,
}

/// One line of the summary CSV
#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    group: &'a str,
    norm_time: String,
    mean: f64,
    sd: Option<f64>,
    count: usize,
}

/// Write the aggregated summary as CSV: one row per bucket
pub fn write_summary<W: Write>(series: &[Series], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0usize;

    for s in series {
        for bucket in &s.values {
            writer.serialize(SummaryRecord {
                group: &s.key,
                norm_time: format!("{:.2}", bucket.norm_time),
                mean: bucket.mean,
                sd: bucket.sd,
                count: bucket.count,
            })?;
            rows += 1;
        }
    }

    // serialize() only emits a header alongside the first record
    if rows == 0 {
        writer.write_record(["group", "norm_time", "mean", "sd", "count"])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the aggregated summary to a CSV file
pub fn write_summary_file(series: &[Series], path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_summary(series, file)?;
    tracing::info!("Wrote summary of {} series to {}", series.len(), path.display());
    Ok(())
}

/// Text is drawn with egui's bundled font so export never depends on system fonts
fn register_font() {
    REGISTER_FONT.call_once(|| {
        if plotters::style::register_font(
            FONT_FAMILY,
            FontStyle::Normal,
            epaint_default_fonts::UBUNTU_LIGHT,
        )
        .is_err()
        {
            // plotters' InvalidFont implements neither Debug nor Display
            tracing::warn!("Could not register export font");
        }
    });
}

fn series_color(slot: usize, color_blind_mode: bool) -> RGBColor {
    let [r, g, b] = palette_color(slot, color_blind_mode);
    RGBColor(r, g, b)
}

/// Rasterize a chart model at the standard chart size
pub fn render_image(model: &ChartModel, options: ImageOptions) -> Result<RgbImage> {
    register_font();

    let width = CHART_WIDTH as u32 * EXPORT_SCALE;
    let height = CHART_HEIGHT as u32 * EXPORT_SCALE;
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(&root, model, options)?;
        root.present()?;
    }

    RgbImage::from_raw(width, height, buffer).context("chart buffer does not match image size")
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    model: &ChartModel,
    options: ImageOptions,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let scaled = |v: f32| (v * EXPORT_SCALE as f32) as u32;
    let font = FontDesc::new(
        FontFamily::Name(FONT_FAMILY),
        12.0 * EXPORT_SCALE as f64,
        FontStyle::Normal,
    );

    root.fill(&BACKGROUND)?;

    let (x_min, x_max) = model.x_domain;
    let (y_min, y_max) = display_y_bounds(model.y_domain);

    let mut chart = ChartBuilder::on(root)
        .margin_top(scaled(CHART_MARGIN.top))
        .margin_right(scaled(CHART_MARGIN.right))
        .x_label_area_size(scaled(CHART_MARGIN.bottom))
        .y_label_area_size(scaled(CHART_MARGIN.left))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.plotting_area().fill(&PLOT_BACKGROUND)?;

    chart
        .configure_mesh()
        .x_labels(11)
        .y_labels(10)
        .x_label_formatter(&|v: &f64| format_percent(*v))
        .x_desc(X_AXIS_TITLE)
        .y_desc(Y_AXIS_TITLE)
        .label_style(font.clone().color(&AXIS))
        .axis_desc_style(font.clone().color(&AXIS))
        .bold_line_style(&GRID)
        .light_line_style(&TRANSPARENT)
        .axis_style(&AXIS)
        .draw()?;

    if options.show_spread {
        for curve in &model.curves {
            let outline: Vec<(f64, f64)> = curve
                .band_upper
                .iter()
                .chain(curve.band_lower.iter().rev())
                .map(|p| (p[0], p[1]))
                .collect();
            if outline.len() < 3 {
                continue;
            }
            let color = series_color(curve.color_slot, options.color_blind_mode);
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                color.mix(0.25).filled(),
            )))?;
        }
    }

    let swatch = 6 * EXPORT_SCALE as i32;
    for (curve, entry) in model.curves.iter().zip(&model.legend) {
        let color = series_color(curve.color_slot, options.color_blind_mode);
        let style = ShapeStyle {
            color: color.to_rgba(),
            filled: false,
            stroke_width: 2 * EXPORT_SCALE,
        };
        chart
            .draw_series(LineSeries::new(
                curve.line.iter().map(|p| (p[0], p[1])),
                style,
            ))?
            .label(entry.label.clone())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - swatch), (x + 2 * swatch, y + swatch)], color.filled())
            });
    }

    if !model.legend.is_empty() {
        chart
            .configure_series_labels()
            .background_style(&BACKGROUND.mix(0.8))
            .border_style(&GRID)
            .label_font(font.color(&AXIS))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    Ok(())
}

/// Rasterize a chart model and save it as PNG
pub fn export_png(model: &ChartModel, options: ImageOptions, path: &Path) -> Result<()> {
    let img = render_image(model, options)?;
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("Exported chart to {}", path.display());
    Ok(())
}
