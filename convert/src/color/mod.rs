pub mod e_paper_color_map;
pub mod ink_color;

use crate::color::ink_color::InkColor;
use image::Rgb;

/// Maps one pixel to its classification bit: `0` where the plane puts ink, `1` elsewhere.
pub type PixelClassifier = fn(&Rgb<u8>) -> u8;

/// Black is the only ink on the primary plane.
pub fn primary_bit(pixel: &Rgb<u8>) -> u8 {
    match InkColor::from(pixel) {
        InkColor::Black => 0,
        _ => 1,
    }
}

/// Red and yellow both drive the secondary plane; the panel only has one of them.
pub fn secondary_bit(pixel: &Rgb<u8>) -> u8 {
    match InkColor::from(pixel) {
        InkColor::Red | InkColor::Yellow => 0,
        _ => 1,
    }
}
