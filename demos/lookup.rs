use spectrum_color::{SpectrumLookup, LAMBDA_MAX, LAMBDA_MIN};

pub const STEP: f64 = 10.0;

/// Load the reference spectrum image and print a table of wavelengths and their colors
fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Linear_visible_spectrum.png".to_string());

    match SpectrumLookup::load(&path) {
        Ok(lookup) => {
            let wavelengths: Vec<f64> = (0..)
                .map(|i| LAMBDA_MIN - 2.0 * STEP + i as f64 * STEP)
                .take_while(|&w| w <= LAMBDA_MAX + 2.0 * STEP)
                .collect();

            println!("wavelength,r,g,b,hex");
            for (w, [r, g, b]) in wavelengths.iter().zip(lookup.lookup_rgb8(&wavelengths)) {
                println!("{w},{r},{g},{b},#{r:02x}{g:02x}{b:02x}");
            }
        }
        Err(e) => {
            println!("Something went wrong: {}", e);
        }
    }
}
