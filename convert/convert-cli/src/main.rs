use clap::Parser;
use eink_bitplane::{convert, ConvertOptions, Rotation, SecondaryInk};
use std::error::Error;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Converts an image into the primary and secondary bitplanes of a tri-colour e-paper panel.
#[derive(Debug, Parser)]
struct Args {
    file_input: PathBuf,
    primary_output: PathBuf,
    secondary_output: PathBuf,
    /// clockwise rotation in degrees, applied before packing
    #[clap(long, default_value_t = Rotation::Clockwise90)]
    rotate: Rotation,
    /// scale and crop to the panel resolution
    #[clap(long)]
    fit: bool,
    /// dither onto black, white and the given ink first
    #[clap(long)]
    dither: Option<SecondaryInk>,
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let options = ConvertOptions {
        rotation: args.rotate,
        fit_to_panel: args.fit,
        dither: args.dither,
    };
    convert(
        &args.file_input,
        &args.primary_output,
        &args.secondary_output,
        &options,
    )?;
    Ok(())
}
