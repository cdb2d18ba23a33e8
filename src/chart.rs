//! Chart model: scales, smoothed curves, colors and legend.
//!
//! [`Renderer::render`] turns aggregated series into a [`ChartModel`] that
//! holds everything a drawing surface needs. The egui view and the PNG
//! exporter both draw from the same model, so they always agree on domains,
//! colors and legend text.

use std::collections::HashMap;

use crate::aggregate::Series;
use crate::state::{
    CHART_COLORS, COLORBLIND_COLORS, CURVE_SAMPLES_PER_SEGMENT, LEGEND_LABEL_KEEP,
    LEGEND_LABEL_MAX,
};

/// Fixed progress domain of the x axis
pub const X_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Y domain used when there is nothing to draw
pub const EMPTY_Y_DOMAIN: (f64, f64) = (0.0, 1.0);

// ============================================================================
// Scales and axes
// ============================================================================

/// Affine map from a data domain onto a pixel range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value into the range. A zero-width domain maps
    /// everything onto the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Round tick values covering the domain, about `count` of them
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut start, mut stop) = self.domain;
        if !(start.is_finite() && stop.is_finite()) || count == 0 {
            return vec![];
        }
        if start == stop {
            return vec![start];
        }
        let reverse = stop < start;
        if reverse {
            std::mem::swap(&mut start, &mut stop);
        }

        let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
            return vec![];
        };

        let mut ticks: Vec<f64> = (i1..=i2)
            .map(|i| {
                if inc < 0.0 {
                    i as f64 / -inc
                } else {
                    i as f64 * inc
                }
            })
            .collect();
        if reverse {
            ticks.reverse();
        }
        ticks
    }
}

/// Integer tick bounds and increment; a negative increment means "divide by"
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let div = 10f64.powf(-power) / factor;
        i1 = (start * div).round() as i64;
        i2 = (stop * div).round() as i64;
        if (i1 as f64) / div < start {
            i1 += 1;
        }
        if (i2 as f64) / div > stop {
            i2 -= 1;
        }
        inc = -div;
    } else {
        let mul = 10f64.powf(power) * factor;
        i1 = (start / mul).round() as i64;
        i2 = (stop / mul).round() as i64;
        if (i1 as f64) * mul < start {
            i1 += 1;
        }
        if (i2 as f64) * mul > stop {
            i2 -= 1;
        }
        inc = mul;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1 <= i2).then_some((i1, i2, inc))
}

/// Format a progress fraction as a whole percentage ("0%" .. "100%")
pub fn format_percent(value: f64) -> String {
    let percent = value * 100.0;
    // Avoid printing "-0%"
    let percent = if percent.abs() < 0.5 { 0.0 } else { percent };
    format!("{:.0}%", percent)
}

/// Y domain covering every bucket's mean ± sd, absent sd counting as zero.
///
/// Returns `None` when no series has any bucket.
pub fn y_domain(series: &[Series]) -> Option<(f64, f64)> {
    series
        .iter()
        .flat_map(|s| s.values.iter())
        .fold(None, |acc, bucket| {
            let (lo, hi) = (bucket.lower(), bucket.upper());
            Some(match acc {
                None => (lo, hi),
                Some((min, max)) => (f64::min(min, lo), f64::max(max, hi)),
            })
        })
}

/// Y bounds handed to a plotting surface; a zero-width domain is widened
/// around its value
pub fn display_y_bounds(domain: (f64, f64)) -> (f64, f64) {
    let (lo, hi) = domain;
    if hi - lo > f64::EPSILON {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

// ============================================================================
// Curves
// ============================================================================

/// Smooth a polyline with monotone cubic interpolation in x.
///
/// The curve passes through every knot and never overshoots between two
/// knots, so monotone data stays monotone. Knots must be sorted by x.
/// Fewer than three knots are returned unchanged (a point or a segment).
pub fn monotone_x(knots: &[[f64; 2]], samples_per_segment: usize) -> Vec<[f64; 2]> {
    let n = knots.len();
    if n < 3 {
        return knots.to_vec();
    }
    let samples = samples_per_segment.max(1);

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_slope(knots[i - 1], knots[i], knots[i + 1]);
    }
    tangents[0] = endpoint_slope(knots[0], knots[1], tangents[1]);
    tangents[n - 1] = endpoint_slope(knots[n - 2], knots[n - 1], tangents[n - 2]);

    let mut out = Vec::with_capacity((n - 1) * samples + 1);
    out.push(knots[0]);
    for i in 0..n - 1 {
        let p0 = knots[i];
        let p3 = knots[i + 1];
        let dx = (p3[0] - p0[0]) / 3.0;
        let p1 = [p0[0] + dx, p0[1] + dx * tangents[i]];
        let p2 = [p3[0] - dx, p3[1] - dx * tangents[i + 1]];
        for s in 1..=samples {
            let t = s as f64 / samples as f64;
            out.push(cubic_bezier(p0, p1, p2, p3, t));
        }
    }
    out
}

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Tangent at the middle knot, limited so the curve cannot overshoot
fn interior_slope(p0: [f64; 2], p1: [f64; 2], p2: [f64; 2]) -> f64 {
    let h0 = p1[0] - p0[0];
    let h1 = p2[0] - p1[0];
    if h0 == 0.0 || h1 == 0.0 {
        return 0.0;
    }
    let s0 = (p1[1] - p0[1]) / h0;
    let s1 = (p2[1] - p1[1]) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}

/// Tangent at an end knot from the neighbouring tangent
fn endpoint_slope(p0: [f64; 2], p1: [f64; 2], t: f64) -> f64 {
    let h = p1[0] - p0[0];
    if h != 0.0 {
        (3.0 * (p1[1] - p0[1]) / h - t) / 2.0
    } else {
        t
    }
}

fn cubic_bezier(p0: [f64; 2], p1: [f64; 2], p2: [f64; 2], p3: [f64; 2], t: f64) -> [f64; 2] {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    [
        a * p0[0] + b * p1[0] + c * p2[0] + d * p3[0],
        a * p0[1] + b * p1[1] + c * p2[1] + d * p3[1],
    ]
}

// ============================================================================
// Colors and legend
// ============================================================================

/// Session-wide group key → palette slot assignment.
///
/// Slots are handed out on first encounter and never reassigned, so a group
/// keeps its color across every redraw, whatever order series arrive in.
#[derive(Clone, Debug, Default)]
pub struct ColorCache {
    slots: HashMap<String, usize>,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for a key, assigning the next free one if the key is new
    pub fn slot_for(&mut self, key: &str) -> usize {
        let next = self.slots.len();
        *self.slots.entry(key.to_string()).or_insert(next)
    }

    /// Slot for a key without assigning one
    pub fn get(&self, key: &str) -> Option<usize> {
        self.slots.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// RGB color of a palette slot; slots wrap around the palette
pub fn palette_color(slot: usize, color_blind_mode: bool) -> [u8; 3] {
    let palette = if color_blind_mode {
        COLORBLIND_COLORS
    } else {
        CHART_COLORS
    };
    palette[slot % palette.len()]
}

/// Legend text for a group key: labels over the limit keep their first
/// characters and end with an ellipsis
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > LEGEND_LABEL_MAX {
        let kept: String = label.chars().take(LEGEND_LABEL_KEEP).collect();
        format!("{}…", kept)
    } else {
        label.to_string()
    }
}

// ============================================================================
// Model
// ============================================================================

/// Everything needed to draw one series
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub key: String,
    pub color_slot: usize,
    /// Bucket means, one knot per bucket
    pub knots: Vec<[f64; 2]>,
    /// Smoothed mean line
    pub line: Vec<[f64; 2]>,
    /// Smoothed mean - sd edge
    pub band_lower: Vec<[f64; 2]>,
    /// Smoothed mean + sd edge
    pub band_upper: Vec<[f64; 2]>,
}

/// One legend row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    pub key: String,
    pub label: String,
    pub color_slot: usize,
}

/// A fully computed chart, rebuilt from scratch on every render
#[derive(Clone, Debug, PartialEq)]
pub struct ChartModel {
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub curves: Vec<Curve>,
    pub legend: Vec<LegendEntry>,
}

impl Default for ChartModel {
    fn default() -> Self {
        Self {
            x_domain: X_DOMAIN,
            y_domain: EMPTY_Y_DOMAIN,
            curves: Vec::new(),
            legend: Vec::new(),
        }
    }
}

impl ChartModel {
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

/// Turns aggregated series into chart models; owns the color cache
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    colors: ColorCache,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(&self) -> &ColorCache {
        &self.colors
    }

    /// Build the chart model for a set of series
    pub fn render(&mut self, series: &[Series]) -> ChartModel {
        let y_domain = y_domain(series).unwrap_or(EMPTY_Y_DOMAIN);

        let mut curves = Vec::with_capacity(series.len());
        let mut legend = Vec::with_capacity(series.len());

        for s in series {
            let color_slot = self.colors.slot_for(&s.key);

            let knots: Vec<[f64; 2]> = s.values.iter().map(|b| [b.norm_time, b.mean]).collect();
            let lower: Vec<[f64; 2]> = s.values.iter().map(|b| [b.norm_time, b.lower()]).collect();
            let upper: Vec<[f64; 2]> = s.values.iter().map(|b| [b.norm_time, b.upper()]).collect();

            curves.push(Curve {
                key: s.key.clone(),
                color_slot,
                line: monotone_x(&knots, CURVE_SAMPLES_PER_SEGMENT),
                band_lower: monotone_x(&lower, CURVE_SAMPLES_PER_SEGMENT),
                band_upper: monotone_x(&upper, CURVE_SAMPLES_PER_SEGMENT),
                knots,
            });
            legend.push(LegendEntry {
                key: s.key.clone(),
                label: truncate_label(&s.key),
                color_slot,
            });
        }

        tracing::debug!(
            "Rendered {} curves, y domain [{:.3}, {:.3}]",
            curves.len(),
            y_domain.0,
            y_domain.1
        );

        ChartModel {
            x_domain: X_DOMAIN,
            y_domain,
            curves,
            legend,
        }
    }
}
