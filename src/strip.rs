//! Extraction of the reference color strip from a spectrum image.

use std::ops::Range;

use image::{DynamicImage, GenericImageView};
use log::debug;

use super::{SpectrumError, LAMBDA_MIN, LAMBDA_RANGE};

/// Row of the reference image that holds the spectrum gradient.
pub const REFERENCE_ROW: u32 = 200;
/// Columns of [REFERENCE_ROW] that span the visible range, without the image margins.
pub const REFERENCE_COLUMNS: Range<u32> = 7..1909;

/// Where the strip sits inside the reference image.
///
/// The defaults describe the bundled linear visible spectrum rendering.
/// If the asset is replaced, both values have to be updated together with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripGeometry {
    pub row: u32,
    pub columns: Range<u32>,
}

impl Default for StripGeometry {
    fn default() -> Self {
        StripGeometry {
            row: REFERENCE_ROW,
            columns: REFERENCE_COLUMNS,
        }
    }
}

/// Normalized RGB samples along the visible spectrum, ordered from short to long wavelengths.
///
/// Sample `i` of `n` sits at `LAMBDA_MIN + i / n * LAMBDA_RANGE`, so the last sample
/// falls one step short of [LAMBDA_MAX](super::LAMBDA_MAX).
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceStrip {
    colors: Vec<[f64; 3]>,
}

impl ReferenceStrip {
    /// Creates a strip from already normalized colors.
    ///
    /// Components are clamped to `[0, 1]`; non-finite components become `0.0`.
    pub fn new(colors: Vec<[f64; 3]>) -> Self {
        let colors = colors
            .into_iter()
            .map(|c| c.map(|x| if x.is_finite() { x.clamp(0.0, 1.0) } else { 0.0 }))
            .collect();

        ReferenceStrip { colors }
    }

    /// Creates a strip from 8-bit pixels.
    pub fn from_rgb8(pixels: &[[u8; 3]]) -> Self {
        ReferenceStrip {
            colors: pixels
                .iter()
                .map(|p| p.map(|c| c as f64 / u8::MAX as f64))
                .collect(),
        }
    }

    /// Reads the strip described by `geometry` out of `image`.
    ///
    /// Channels are divided by the maximum value of the image's sample type,
    /// i.e. 255 for 8-bit and 65535 for 16-bit images. Float images are taken as is.
    pub fn extract(image: &DynamicImage, geometry: &StripGeometry) -> Result<Self, SpectrumError> {
        let (width, height) = image.dimensions();
        let StripGeometry { row, columns } = geometry;

        if *row >= height || columns.end > width || columns.start > columns.end {
            return Err(SpectrumError::DataShape {
                width,
                height,
                row: *row,
                columns: columns.clone(),
            });
        }

        let count = columns.end - columns.start;
        if count < 2 {
            return Err(SpectrumError::EmptyStrip {
                samples: count as usize,
            });
        }

        let row_image = image.crop_imm(columns.start, *row, count, 1);

        let colors: Vec<[f64; 3]> = match row_image {
            DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgba16(_) => row_image
                .to_rgb16()
                .pixels()
                .map(|p| p.0.map(|c| c as f64 / u16::MAX as f64))
                .collect(),
            DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => row_image
                .to_rgb32f()
                .pixels()
                .map(|p| p.0.map(|c| c as f64))
                .collect(),
            _ => row_image
                .to_rgb8()
                .pixels()
                .map(|p| p.0.map(|c| c as f64 / u8::MAX as f64))
                .collect(),
        };

        debug!(
            "extracted {} strip samples from row {} of a {}x{} image",
            count, row, width, height
        );

        Ok(ReferenceStrip::new(colors))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[[f64; 3]] {
        &self.colors
    }

    /// Wavelength in nm of sample `index`.
    pub fn wavelength(&self, index: usize) -> f64 {
        LAMBDA_MIN + index as f64 / self.colors.len() as f64 * LAMBDA_RANGE
    }

    /// Wavelengths of all samples, strictly increasing.
    pub fn wavelengths(&self) -> Vec<f64> {
        (0..self.colors.len()).map(|i| self.wavelength(i)).collect()
    }

    /// Values of one channel (0 = red, 1 = green, 2 = blue) across the strip.
    pub fn channel(&self, channel: usize) -> Vec<f64> {
        self.colors.iter().map(|c| c[channel]).collect()
    }
}
