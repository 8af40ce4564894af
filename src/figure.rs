//! Multi-panel figures of spectrum-colored line plots, written to PNG.
//!
//! Panels sit side by side with their y axes hidden. No text is drawn, so the
//! output does not depend on system fonts.

use std::path::Path;

use log::info;
use plotters::prelude::*;
use thiserror::Error;

use crate::plot::{draw_colored_line_styled, ChartSurface, PlotError, SegmentStyle};
use crate::{SpectrumError, SpectrumLookup};

/// First wavelength of the synthetic demo spectrum, in nm.
pub const DEMO_START: f64 = 200.0;
/// End (exclusive) of the synthetic demo spectrum, in nm.
pub const DEMO_END: f64 = 900.0;
pub const DEMO_STEP: f64 = 0.1;
/// Open wavelength intervals shown by the demo figure, one per panel.
pub const DEMO_RANGES: [(f64, f64); 3] = [(240.0, 340.0), (379.0, 465.0), (535.0, 855.0)];

const BG_COLOR: RGBColor = WHITE;
const FRAME_COLOR: RGBColor = RGBColor(64, 64, 64);

#[derive(Debug, Error)]
pub enum FigureError {
    #[error(transparent)]
    Lookup(#[from] SpectrumError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error("figure needs at least one panel")]
    NoPanels,

    #[error("figure of {width}x{height} pixels is empty")]
    EmptyFigure { width: u32, height: u32 },
}

/// Size and line style of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureOptions {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub line: SegmentStyle,
}

impl Default for FigureOptions {
    fn default() -> Self {
        FigureOptions {
            width_in: 10.0,
            height_in: 4.0,
            dpi: 100,
            line: SegmentStyle::default(),
        }
    }
}

impl FigureOptions {
    /// Output size in pixels: inches times dots per inch.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * self.dpi as f64).round().max(0.0) as u32;
        (px(self.width_in), px(self.height_in))
    }
}

/// Points of one panel with one color per point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub colors: Vec<[f64; 3]>,
}

impl Panel {
    /// Keeps the points whose x lies strictly between `range.0` and `range.1`.
    pub fn select(xs: &[f64], ys: &[f64], colors: &[[f64; 3]], range: (f64, f64)) -> Self {
        let mut panel = Panel::default();

        for ((&x, &y), &color) in xs.iter().zip(ys).zip(colors) {
            if x > range.0 && x < range.1 {
                panel.xs.push(x);
                panel.ys.push(y);
                panel.colors.push(color);
            }
        }

        panel
    }

    fn x_range(&self) -> (f64, f64) {
        padded_range(&self.xs, 0.0)
    }

    fn y_range(&self) -> (f64, f64) {
        padded_range(&self.ys, 0.05)
    }
}

/// Synthetic spectrum used by the demo: `sin(w / pi)` sampled every [DEMO_STEP] nm.
pub fn demo_spectrum() -> (Vec<f64>, Vec<f64>) {
    let n = ((DEMO_END - DEMO_START) / DEMO_STEP).round() as usize;
    let wavelengths: Vec<f64> = (0..n).map(|i| DEMO_START + i as f64 * DEMO_STEP).collect();
    let signal = wavelengths
        .iter()
        .map(|w| (w / std::f64::consts::PI).sin())
        .collect();

    (wavelengths, signal)
}

/// Colors the demo spectrum with `lookup` and cuts it into one panel per range.
pub fn demo_panels(lookup: &SpectrumLookup, ranges: &[(f64, f64)]) -> Vec<Panel> {
    let (wavelengths, signal) = demo_spectrum();
    let colors = lookup.lookup(&wavelengths);

    ranges
        .iter()
        .map(|&range| Panel::select(&wavelengths, &signal, &colors, range))
        .collect()
}

/// Renders `panels` side by side and saves the figure as a PNG at `path`.
pub fn render_figure<P: AsRef<Path>>(
    path: P,
    panels: &[Panel],
    options: &FigureOptions,
) -> Result<(), FigureError> {
    if panels.is_empty() {
        return Err(FigureError::NoPanels);
    }

    let (width, height) = options.pixel_size();
    if width == 0 || height == 0 {
        return Err(FigureError::EmptyFigure { width, height });
    }

    let path = path.as_ref();
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&BG_COLOR)
        .map_err(|e| FigureError::Drawing(format!("fill: {e}")))?;

    let areas = root.split_evenly((1, panels.len()));
    let margin = (height / 40).max(2);

    for (i, (panel, area)) in panels.iter().zip(areas.iter()).enumerate() {
        let (x_min, x_max) = panel.x_range();
        let (y_min, y_max) = panel.y_range();

        let mut chart = ChartBuilder::on(area)
            .margin(margin)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| FigureError::Drawing(format!("chart build: {e}")))?;

        chart
            .plotting_area()
            .draw(&Rectangle::new(
                [(x_min, y_min), (x_max, y_max)],
                FRAME_COLOR.stroke_width(1),
            ))
            .map_err(|e| FigureError::Drawing(format!("frame: {e}")))?;

        let drawn = draw_colored_line_styled(
            &mut ChartSurface::new(&mut chart),
            &panel.xs,
            &panel.ys,
            &panel.colors,
            &options.line,
        )?;
        info!("panel {i}: {drawn} of {} points joined", panel.xs.len());
    }

    root.present()
        .map_err(|e| FigureError::Drawing(format!("present: {e}")))?;
    info!("wrote {} ({width}x{height})", path.display());

    Ok(())
}

/// Finite extent of `values` widened by `pad` times its size on each side.
///
/// Empty or constant data gets a unit-sized range.
fn padded_range(values: &[f64], pad: f64) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo < 1e-10 {
        return (lo - 0.5, hi + 0.5);
    }

    let pad = (hi - lo) * pad;
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReferenceStrip;
    use approx::assert_abs_diff_eq;

    #[test]
    fn pixel_size_scales_with_dpi() {
        let options = FigureOptions {
            dpi: 250,
            ..Default::default()
        };
        assert_eq!(options.pixel_size(), (2500, 1000));
        assert_eq!(FigureOptions::default().pixel_size(), (1000, 400));
    }

    #[test]
    fn demo_spectrum_covers_200_to_900() {
        let (wavelengths, signal) = demo_spectrum();

        assert_eq!(wavelengths.len(), 7000);
        assert_eq!(signal.len(), 7000);
        assert_abs_diff_eq!(wavelengths[0], 200.0);
        assert_abs_diff_eq!(wavelengths[6999], 899.9, epsilon = 1e-9);
        assert_abs_diff_eq!(signal[10], (201.0 / std::f64::consts::PI).sin(), epsilon = 1e-9);
    }

    #[test]
    fn select_uses_open_interval() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let colors = [[0.1, 0.0, 0.0], [0.2, 0.0, 0.0], [0.3, 0.0, 0.0], [0.4, 0.0, 0.0]];
        let panel = Panel::select(&xs, &xs, &colors, (1.0, 4.0));

        assert_eq!(panel.xs, vec![2.0, 3.0]);
        assert_eq!(panel.colors, vec![[0.2, 0.0, 0.0], [0.3, 0.0, 0.0]]);
    }

    #[test]
    fn demo_panels_split_by_range() {
        let lookup = SpectrumLookup::from_strip(ReferenceStrip::new(vec![[1.0, 1.0, 1.0]; 8])).unwrap();
        let panels = demo_panels(&lookup, &DEMO_RANGES);

        assert_eq!(panels.len(), 3);
        // 240 < w < 340 is entirely outside the reference strip.
        assert!(panels[0].colors.iter().all(|c| *c == [0.0, 0.0, 0.0]));
        assert!(panels[2].xs.iter().all(|&x| x > 535.0 && x < 855.0));
        assert!(panels[1].colors.iter().any(|c| *c == [1.0, 1.0, 1.0]));
    }

    #[test]
    fn padded_range_handles_degenerate_data() {
        assert_eq!(padded_range(&[], 0.1), (0.0, 1.0));
        assert_eq!(padded_range(&[f64::NAN], 0.1), (0.0, 1.0));
        assert_eq!(padded_range(&[2.0, 2.0], 0.1), (1.5, 2.5));
        let (lo, hi) = padded_range(&[0.0, 10.0, f64::INFINITY], 0.1);
        assert_abs_diff_eq!(lo, -1.0);
        assert_abs_diff_eq!(hi, 11.0);
    }

    #[test]
    fn rejects_empty_figures() {
        let path = std::env::temp_dir().join("spectrum-color-never-written.png");

        assert!(matches!(
            render_figure(&path, &[], &FigureOptions::default()),
            Err(FigureError::NoPanels)
        ));

        let options = FigureOptions {
            dpi: 0,
            ..Default::default()
        };
        assert!(matches!(
            render_figure(&path, &[Panel::default()], &options),
            Err(FigureError::EmptyFigure { .. })
        ));
    }
}
