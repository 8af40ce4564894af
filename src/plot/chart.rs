use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use super::{LineCap, Segment, SegmentStyle, SegmentSurface};
use crate::to_rgb8;

/// Cartesian chart with `f64` axes, as built by `ChartBuilder::build_cartesian_2d`.
pub type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// [SegmentSurface] that draws onto a `plotters` chart.
///
/// Strokes are rounded to whole pixels, at least one and at most the larger side of the
/// plotting area. Round caps are drawn as filled discs on both end points when the stroke
/// is wider than a pixel.
pub struct ChartSurface<'c, 'a, DB: DrawingBackend> {
    chart: &'c mut Chart<'a, DB>,
}

impl<'c, 'a, DB: DrawingBackend> ChartSurface<'c, 'a, DB> {
    pub fn new(chart: &'c mut Chart<'a, DB>) -> Self {
        ChartSurface { chart }
    }
}

impl<'c, 'a, DB: DrawingBackend> SegmentSurface for ChartSurface<'c, 'a, DB> {
    type Error = DrawingAreaErrorKind<DB::ErrorType>;

    fn draw_segment(&mut self, segment: &Segment, style: &SegmentStyle) -> Result<(), Self::Error> {
        let [r, g, b] = to_rgb8(segment.color);
        let color = RGBColor(r, g, b);
        let (w, h) = self.chart.plotting_area().dim_in_pixel();
        let stroke = stroke_pixels(style.width, w.max(h));

        self.chart.draw_series(std::iter::once(PathElement::new(
            vec![segment.start, segment.end],
            color.stroke_width(stroke),
        )))?;

        if style.cap == LineCap::Round && stroke > 1 {
            let radius = (stroke / 2) as i32;
            self.chart.draw_series(
                [segment.start, segment.end].map(|p| Circle::new(p, radius, color.filled())),
            )?;
        }

        Ok(())
    }
}

fn stroke_pixels(width: f64, limit: u32) -> u32 {
    // NaN turns into 1 through max
    width.round().max(1.0).min(limit.max(1) as f64) as u32
}
