//! # spectrum-color
//!
//! Maps wavelengths to an approximate visible color by sampling a reference image
//! of a linear visible-light spectrum (380 nm to 750 nm) and interpolating between
//! its pixels. The resulting colors can be used to draw line plots of spectral data
//! where each segment takes the color of its wavelength, see [plot].
//!
//! This is a perceptual approximation keyed to the reference image, not a colorimetric model.
//!
//! # Example
//!
//! ```no_run
//! use spectrum_color::SpectrumLookup;
//!
//! let lookup = SpectrumLookup::load("Linear_visible_spectrum.png")?;
//!
//! let colors = lookup.lookup(&[400.0, 532.0, 650.0, 1000.0]);
//! assert_eq!(colors[3], [0.0, 0.0, 0.0]);
//! # Ok::<(), spectrum_color::SpectrumError>(())
//! ```

use std::io::Read;
use std::ops::Range;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageReader};
use thiserror::Error;

pub mod figure;
pub mod interpolate;
pub mod plot;
pub mod strip;

use interpolate::LinearInterpolator;
pub use strip::{ReferenceStrip, StripGeometry};

/// Start of the wavelength range covered by the reference image.
pub const LAMBDA_MIN: f64 = 380.0;
/// End of the wavelength range covered by the reference image.
pub const LAMBDA_MAX: f64 = 750.0;
/// Size of the wavelength range covered by the reference image.
pub const LAMBDA_RANGE: f64 = LAMBDA_MAX - LAMBDA_MIN;

/// Color returned for wavelengths outside the reference strip.
pub const OUT_OF_RANGE: [f64; 3] = [0.0; 3];

/// Errors raised while building a [SpectrumLookup].
#[derive(Debug, Error)]
pub enum SpectrumError {
    #[error("cannot read reference image {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("cannot decode reference image: {0}")]
    Decode(#[from] ImageError),

    #[error("reference image is {width}x{height}, too small for a strip at row {row}, columns {columns:?}")]
    DataShape {
        width: u32,
        height: u32,
        row: u32,
        columns: Range<u32>,
    },

    #[error("reference strip has {samples} samples, at least 2 are needed")]
    EmptyStrip { samples: usize },
}

/// Wavelength to color lookup built from a [ReferenceStrip].
///
/// Holds one piecewise-linear interpolator per channel. Construct it once and reuse it;
/// the reference data does not change while the process runs.
///
/// Ways of instantiating this struct:
/// * [SpectrumLookup::load] reads the reference image from a file
/// * [SpectrumLookup::from_reader] decodes it from any reader
/// * [SpectrumLookup::from_image] uses an already decoded image
/// * [SpectrumLookup::from_strip] uses samples that did not come from an image
#[derive(Debug, Clone)]
pub struct SpectrumLookup {
    strip: ReferenceStrip,
    channels: [LinearInterpolator; 3],
}

impl SpectrumLookup {
    /// Loads the reference image at `path` and extracts the strip at the default [StripGeometry].
    ///
    /// Returns [SpectrumError::Resource] if the file is missing or cannot be decoded
    /// and [SpectrumError::DataShape] if it is too small for the strip.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SpectrumError> {
        SpectrumLookup::load_with(path, &StripGeometry::default())
    }

    /// Like [SpectrumLookup::load], with the strip at `geometry`.
    pub fn load_with<P: AsRef<Path>>(
        path: P,
        geometry: &StripGeometry,
    ) -> Result<Self, SpectrumError> {
        let path = path.as_ref();
        let image = ImageReader::open(path)
            .and_then(ImageReader::with_guessed_format)
            .map_err(ImageError::IoError)
            .and_then(ImageReader::decode)
            .map_err(|source| SpectrumError::Resource {
                path: path.to_path_buf(),
                source,
            })?;

        SpectrumLookup::from_image_with(&image, geometry)
    }

    /// Decodes a reference image from `reader`. The format is guessed from its contents.
    ///
    /// Failures to read and to decode are both reported as [SpectrumError::Decode],
    /// since there is no path to name.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, SpectrumError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(ImageError::IoError)?;

        let image = image::load_from_memory(&bytes)?;
        SpectrumLookup::from_image(&image)
    }

    pub fn from_image(image: &DynamicImage) -> Result<Self, SpectrumError> {
        SpectrumLookup::from_image_with(image, &StripGeometry::default())
    }

    pub fn from_image_with(
        image: &DynamicImage,
        geometry: &StripGeometry,
    ) -> Result<Self, SpectrumError> {
        let strip = ReferenceStrip::extract(image, geometry)?;
        SpectrumLookup::from_strip(strip)
    }

    /// Builds the per-channel interpolators over the strip's sample wavelengths.
    ///
    /// Returns [SpectrumError::EmptyStrip] if the strip has fewer than two samples.
    pub fn from_strip(strip: ReferenceStrip) -> Result<Self, SpectrumError> {
        let wavelengths = strip.wavelengths();
        let channel = |c: usize| {
            LinearInterpolator::new(wavelengths.clone(), strip.channel(c), OUT_OF_RANGE[c])
                .ok_or(SpectrumError::EmptyStrip {
                    samples: strip.len(),
                })
        };

        let channels = [channel(0)?, channel(1)?, channel(2)?];

        Ok(SpectrumLookup { strip, channels })
    }

    pub fn strip(&self) -> &ReferenceStrip {
        &self.strip
    }

    /// Inclusive wavelength range with non-black output, in nm.
    ///
    /// The upper end is the last sample's wavelength, which lies slightly below [LAMBDA_MAX].
    pub fn wavelength_range(&self) -> (f64, f64) {
        self.channels[0].domain()
    }

    /// Color of a single wavelength, each component in `[0, 1]`.
    ///
    /// Wavelengths outside [SpectrumLookup::wavelength_range] and non-finite values give [OUT_OF_RANGE].
    pub fn color(&self, wavelength: f64) -> [f64; 3] {
        [
            self.channels[0].eval(wavelength),
            self.channels[1].eval(wavelength),
            self.channels[2].eval(wavelength),
        ]
    }

    /// Colors for each wavelength, in input order.
    pub fn lookup(&self, wavelengths: &[f64]) -> Vec<[f64; 3]> {
        wavelengths.iter().map(|&w| self.color(w)).collect()
    }

    /// Like [SpectrumLookup::lookup], quantized to 8 bits per channel.
    pub fn lookup_rgb8(&self, wavelengths: &[f64]) -> Vec<[u8; 3]> {
        wavelengths
            .iter()
            .map(|&w| to_rgb8(self.color(w)))
            .collect()
    }
}

/// Loads the reference image at `path` and looks up `wavelengths` in a single call.
///
/// Nothing is cached between calls. Prefer building a [SpectrumLookup] once when
/// looking up more than one sequence.
pub fn get_color_lookup<P: AsRef<Path>>(
    path: P,
    wavelengths: &[f64],
) -> Result<Vec<[f64; 3]>, SpectrumError> {
    Ok(SpectrumLookup::load(path)?.lookup(wavelengths))
}

/// Converts a normalized color to 8 bits per channel.
#[inline]
pub fn to_rgb8(color: [f64; 3]) -> [u8; 3] {
    color.map(|c| (c.clamp(0.0, 1.0) * u8::MAX as f64).round() as u8)
}
