mod bitplane;
mod color;
mod display_constants;
mod source;

pub use crate::bitplane::{
    encode, encode_image, encode_planes, packed_len, BitplaneError, Plane, Planes, UnknownPlane,
};
pub use crate::color::e_paper_color_map::{EPaperColorMap, SecondaryInk, UnknownInk};
pub use crate::color::ink_color::InkColor;
pub use crate::color::{primary_bit, secondary_bit, PixelClassifier};
pub use crate::display_constants::{EPD_HEIGHT, EPD_PLANE_BYTES, EPD_WIDTH};
pub use crate::source::{load_rgb, ConvertOptions, Rotation, UnknownRotation};

use image::ImageError;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Bitplane(#[from] BitplaneError),
}

/// Converts an image file into the primary and secondary plane files for the panel.
pub fn convert(
    file: &Path,
    primary_file: &Path,
    secondary_file: &Path,
    options: &ConvertOptions,
) -> Result<Planes, ConvertError> {
    let img = load_rgb(file, options)?;
    info!("Loaded {} as {}x{} RGB", file.display(), img.width(), img.height());

    let planes = encode_planes(img.width(), img.height(), img.as_raw())?;
    info!("Image packed to primary and secondary planes");

    fs::write(primary_file, &planes.primary)?;
    fs::write(secondary_file, &planes.secondary)?;
    info!(
        "Planes written to {} and {}. Done",
        primary_file.display(),
        secondary_file.display()
    );
    Ok(planes)
}
