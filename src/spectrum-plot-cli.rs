use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use spectrum_color::figure::{demo_panels, render_figure, FigureOptions, DEMO_RANGES};
use spectrum_color::SpectrumLookup;

const MAX_LINE_WIDTH: f64 = 100.0;

/// Plot a synthetic spectrum with each segment colored by its wavelength.
#[derive(Parser)]
#[command(name = "spectrum-plot")]
#[command(version)]
struct Cli {
    /// Reference image of the linear visible spectrum (380-750 nm).
    #[arg(short, long, default_value = "Linear_visible_spectrum.png")]
    reference: PathBuf,

    /// Output PNG. Defaults to example_fig_<dpi>dpi.png.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dots per inch of the 10x4 inch figure.
    #[arg(long, default_value_t = 100)]
    dpi: u32,

    /// Stroke width of the plotted line, in pixels.
    #[arg(long, default_value_t = 1.0, value_parser = parse_line_width)]
    line_width: f64,

    /// Wavelength range of one panel as LO:HI (nm, exclusive). Repeat for more panels.
    #[arg(long = "range", value_name = "LO:HI", value_parser = parse_range)]
    ranges: Vec<(f64, f64)>,
}

fn parse_range(s: &str) -> Result<(f64, f64), String> {
    let (lo, hi) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LO:HI, got `{s}'"))?;
    let lo: f64 = lo.trim().parse().map_err(|_| format!("bad lower bound `{lo}'"))?;
    let hi: f64 = hi.trim().parse().map_err(|_| format!("bad upper bound `{hi}'"))?;

    if !(lo < hi) {
        return Err(format!("lower bound {lo} must be below upper bound {hi}"));
    }

    Ok((lo, hi))
}

fn parse_line_width(s: &str) -> Result<f64, String> {
    let width: f64 = s.trim().parse().map_err(|_| format!("bad line width `{s}'"))?;

    if !(width > 0.0 && width <= MAX_LINE_WIDTH) {
        return Err(format!("line width must be in (0, {MAX_LINE_WIDTH}]"));
    }

    Ok(width)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.dpi == 0 {
        bail!("dpi must be positive");
    }

    let lookup = SpectrumLookup::load(&cli.reference)
        .with_context(|| format!("loading {}", cli.reference.display()))?;
    let (lo, hi) = lookup.wavelength_range();
    println!("Reference strip: {} samples, {lo:.1}-{hi:.1} nm", lookup.strip().len());

    let ranges = if cli.ranges.is_empty() {
        DEMO_RANGES.to_vec()
    } else {
        cli.ranges
    };
    let panels = demo_panels(&lookup, &ranges);

    let mut options = FigureOptions {
        dpi: cli.dpi,
        ..Default::default()
    };
    options.line.width = cli.line_width;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("example_fig_{}dpi.png", cli.dpi)));

    render_figure(&output, &panels, &options)
        .with_context(|| format!("rendering {}", output.display()))?;
    println!("Saved {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ranges() {
        assert_eq!(parse_range("379:465"), Ok((379.0, 465.0)));
        assert_eq!(parse_range(" 535.5 : 855 "), Ok((535.5, 855.0)));
        assert!(parse_range("465").is_err());
        assert!(parse_range("a:b").is_err());
        assert!(parse_range("465:379").is_err());
    }

    #[test]
    fn parses_line_width() {
        assert_eq!(parse_line_width("2.5"), Ok(2.5));
        assert_eq!(parse_line_width("100"), Ok(100.0));
        assert!(parse_line_width("0").is_err());
        assert!(parse_line_width("-1").is_err());
        assert!(parse_line_width("1e6").is_err());
        assert!(parse_line_width("NaN").is_err());
        assert!(Cli::try_parse_from(["spectrum-plot", "--line-width", "1000000"]).is_err());
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["spectrum-plot"]).unwrap();
        assert_eq!(cli.dpi, 100);
        assert_eq!(cli.reference, PathBuf::from("Linear_visible_spectrum.png"));
        assert!(cli.ranges.is_empty());
    }

    #[test]
    fn repeated_ranges() {
        let cli =
            Cli::try_parse_from(["spectrum-plot", "--range", "400:500", "--range", "600:700"])
                .unwrap();
        assert_eq!(cli.ranges, vec![(400.0, 500.0), (600.0, 700.0)]);
    }
}
