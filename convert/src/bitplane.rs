//! Packs an RGB raster into the 1-bit planes a tri-colour e-paper controller reads.
//!
//! Each pixel becomes one bit (`0` = ink, `1` = paper) under the rule of the chosen
//! [`Plane`]. Bits are taken in buffer order and packed eight per byte, first pixel in
//! the most significant bit. A trailing group of fewer than eight pixels produces no
//! byte, so callers that need every pixel on the panel must supply a pixel count that
//! is a multiple of eight.

use crate::color::{primary_bit, secondary_bit, PixelClassifier};
use crate::display_constants::PIXELS_PER_BYTE;
use image::{Pixel, Rgb, RgbImage};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

const CHANNELS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitplaneError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Plane {
    /// black on white
    Primary,
    /// red or yellow on white
    Secondary,
}

impl Plane {
    pub const ALL: [Plane; 2] = [Plane::Primary, Plane::Secondary];

    pub fn classifier(self) -> PixelClassifier {
        match self {
            Plane::Primary => primary_bit,
            Plane::Secondary => secondary_bit,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Plane::Primary => "primary",
            Plane::Secondary => "secondary",
        }
    }
}

impl Display for Plane {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown plane `{0}`, expected `primary` or `secondary`")]
pub struct UnknownPlane(pub String);

impl FromStr for Plane {
    type Err = UnknownPlane;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plane::ALL
            .into_iter()
            .find(|plane| plane.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPlane(s.to_string()))
    }
}

/// Both planes of one frame, in the order the controller takes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planes {
    pub primary: Vec<u8>,
    pub secondary: Vec<u8>,
}

/// Number of bytes `encode` produces for an image of this size. Saturates where the
/// count does not fit in `usize`.
pub fn packed_len(width: u32, height: u32) -> usize {
    let bytes = u64::from(width) * u64::from(height) / PIXELS_PER_BYTE as u64;
    usize::try_from(bytes).unwrap_or(usize::MAX)
}

fn check_input(width: u32, height: u32, rgb: &[u8]) -> Result<(), BitplaneError> {
    if width == 0 || height == 0 {
        return Err(BitplaneError::InvalidInput(format!(
            "image dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or_else(|| {
            BitplaneError::InvalidInput(format!("{}x{} image is too large", width, height))
        })?;
    if rgb.len() != expected {
        return Err(BitplaneError::InvalidInput(format!(
            "{}x{} RGB image needs {} bytes, got {}",
            width,
            height,
            expected,
            rgb.len()
        )));
    }
    Ok(())
}

pub fn encode(width: u32, height: u32, rgb: &[u8], plane: Plane) -> Result<Vec<u8>, BitplaneError> {
    check_input(width, height, rgb)?;
    let classify = plane.classifier();
    Ok(rgb
        .chunks_exact(CHANNELS * PIXELS_PER_BYTE) /* a short tail group is dropped here */
        .map(|group| {
            group
                .chunks_exact(CHANNELS)
                .fold(0u8, |byte, pixel| byte << 1 | classify(Rgb::from_slice(pixel)))
        })
        .collect())
}

pub fn encode_image(img: &RgbImage, plane: Plane) -> Result<Vec<u8>, BitplaneError> {
    encode(img.width(), img.height(), img.as_raw(), plane)
}

pub fn encode_planes(width: u32, height: u32, rgb: &[u8]) -> Result<Planes, BitplaneError> {
    Ok(Planes {
        primary: encode(width, height, rgb, Plane::Primary)?,
        secondary: encode(width, height, rgb, Plane::Secondary)?,
    })
}
