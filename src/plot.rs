//! Line plots whose color follows the data, drawn one short segment at a time.
//!
//! A curve with a continuously changing color is approximated by many straight,
//! uniformly colored segments. The result only looks smooth when the points are
//! close together compared to how fast the color changes; coarse sampling shows
//! visible banding.

use std::fmt;

use log::debug;
use thiserror::Error;

pub mod chart;

pub use chart::ChartSurface;

/// How the ends of a segment are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// The stroke stops exactly at the end points.
    Butt,
    /// The stroke ends in a half disc, so neighbouring segments overlap without gaps.
    #[default]
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    /// Stroke width in backend units (pixels for raster backends).
    pub width: f64,
    pub cap: LineCap,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        SegmentStyle {
            width: 1.0,
            cap: LineCap::Round,
        }
    }
}

/// Straight line between two data points, in the color of the first one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub color: [f64; 3],
}

impl Segment {
    fn is_finite(&self) -> bool {
        self.start.0.is_finite()
            && self.start.1.is_finite()
            && self.end.0.is_finite()
            && self.end.1.is_finite()
            && self.color.iter().all(|c| c.is_finite())
    }
}

/// Anything segments can be drawn onto.
pub trait SegmentSurface {
    type Error: fmt::Display;

    fn draw_segment(&mut self, segment: &Segment, style: &SegmentStyle) -> Result<(), Self::Error>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlotError {
    #[error("got {xs} x values, {ys} y values and {colors} colors, expected one of each per point")]
    LengthMismatch { xs: usize, ys: usize, colors: usize },
}

/// Draws the polyline through `(xs[i], ys[i])`, segment `i` in `colors[i]`,
/// one pixel wide with round caps.
///
/// See [draw_colored_line_styled].
pub fn draw_colored_line<S: SegmentSurface>(
    surface: &mut S,
    xs: &[f64],
    ys: &[f64],
    colors: &[[f64; 3]],
) -> Result<usize, PlotError> {
    draw_colored_line_styled(surface, xs, ys, colors, &SegmentStyle::default())
}

/// Draws one segment per pair of neighbouring points and returns how many were drawn.
///
/// Fewer than two points draw nothing. Segments with a non-finite coordinate or color,
/// and segments the surface fails to draw, are skipped; the remaining ones are still drawn.
///
/// Returns [PlotError::LengthMismatch] without drawing anything when the three slices
/// have different lengths.
pub fn draw_colored_line_styled<S: SegmentSurface>(
    surface: &mut S,
    xs: &[f64],
    ys: &[f64],
    colors: &[[f64; 3]],
    style: &SegmentStyle,
) -> Result<usize, PlotError> {
    if xs.len() != ys.len() || xs.len() != colors.len() {
        return Err(PlotError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
            colors: colors.len(),
        });
    }

    let mut drawn = 0;

    for i in 0..xs.len().saturating_sub(1) {
        let segment = Segment {
            start: (xs[i], ys[i]),
            end: (xs[i + 1], ys[i + 1]),
            color: colors[i],
        };

        if !segment.is_finite() {
            debug!("skipping segment {i}: non-finite value in {segment:?}");
            continue;
        }

        match surface.draw_segment(&segment, style) {
            Ok(()) => drawn += 1,
            Err(e) => debug!("skipping segment {i}: {e}"),
        }
    }

    Ok(drawn)
}
