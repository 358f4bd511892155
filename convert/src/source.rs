use crate::color::e_paper_color_map::{EPaperColorMap, SecondaryInk};
use crate::display_constants::{EPD_HEIGHT, EPD_WIDTH, PIXELS_PER_BYTE};
use image::imageops::{dither, FilterType};
use image::{DynamicImage, ImageDecoder, ImageError, ImageReader, RgbImage};
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Clockwise rotation applied after EXIF orientation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Rotation {
    None,
    #[default]
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Rotation::None => img,
            Rotation::Clockwise90 => img.rotate90(),
            Rotation::Clockwise180 => img.rotate180(),
            Rotation::Clockwise270 => img.rotate270(),
        }
    }
}

#[derive(Debug, Error)]
#[error("unsupported rotation `{0}`, expected 0, 90, 180 or 270")]
pub struct UnknownRotation(pub String);

impl FromStr for Rotation {
    type Err = UnknownRotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Rotation::None),
            "90" => Ok(Rotation::Clockwise90),
            "180" => Ok(Rotation::Clockwise180),
            "270" => Ok(Rotation::Clockwise270),
            _ => Err(UnknownRotation(s.to_string())),
        }
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub rotation: Rotation,
    /// scale and crop to the panel instead of taking the image size as is
    pub fit_to_panel: bool,
    /// dither onto black, white and this ink before classifying
    pub dither: Option<SecondaryInk>,
}

/// Decodes `file` into the RGB raster the bitplane encoder consumes, already turned
/// to the orientation the controller scans.
pub fn load_rgb(file: &Path, options: &ConvertOptions) -> Result<RgbImage, ImageError> {
    let mut decoder = ImageReader::open(file)?.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    debug!("Opened image {}", file.display());
    let img = options.rotation.apply(img);
    debug!("Rotated {}", options.rotation);
    let img = if options.fit_to_panel {
        let img = img.resize_to_fill(EPD_WIDTH, EPD_HEIGHT, FilterType::Lanczos3);
        debug!("Resized to {}x{}", EPD_WIDTH, EPD_HEIGHT);
        img
    } else {
        img
    };
    let mut img = img.into_rgb8();

    if let Some(ink) = options.dither {
        dither(&mut img, &EPaperColorMap::new(ink));
        debug!("Dithered to black, white and {}", ink);
    }

    let pixels = img.width() as usize * img.height() as usize;
    if pixels % PIXELS_PER_BYTE != 0 {
        warn!(
            "{}x{} image has {} pixels; the last {} will not be encoded",
            img.width(),
            img.height(),
            pixels,
            pixels % PIXELS_PER_BYTE
        );
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rotation_degrees() {
        assert_eq!("0".parse::<Rotation>().ok(), Some(Rotation::None));
        assert_eq!("90".parse::<Rotation>().ok(), Some(Rotation::Clockwise90));
        assert_eq!("180".parse::<Rotation>().ok(), Some(Rotation::Clockwise180));
        assert_eq!("270".parse::<Rotation>().ok(), Some(Rotation::Clockwise270));
        assert!("45".parse::<Rotation>().is_err());
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(296, 128));
        let turned = Rotation::Clockwise90.apply(img.clone());
        assert_eq!((turned.width(), turned.height()), (128, 296));
        let upside_down = Rotation::Clockwise180.apply(img);
        assert_eq!((upside_down.width(), upside_down.height()), (296, 128));
    }

    #[test]
    fn clockwise_turn_moves_top_left_to_top_right() {
        let mut img = RgbImage::from_pixel(3, 2, image::Rgb([255, 255, 255]));
        img.put_pixel(0, 0, image::Rgb([0, 0, 0]));
        let turned = Rotation::Clockwise90
            .apply(DynamicImage::ImageRgb8(img))
            .into_rgb8();
        assert_eq!(turned.get_pixel(1, 0).0, [0, 0, 0]);
    }
}
