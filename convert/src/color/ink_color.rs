use image::Rgb;
use palette::{FromColor, Oklab, Srgb};

/// The inks a black/white/red (or black/white/yellow) panel can show.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InkColor {
    Black,
    White,
    Red,
    Yellow,
}

impl InkColor {
    const fn rgb(self) -> [u8; 3] {
        match self {
            InkColor::Black => [0, 0, 0],
            InkColor::White => [255, 255, 255],
            InkColor::Red => [255, 0, 0],
            InkColor::Yellow => [255, 255, 0],
        }
    }
}

pub fn rgb_to_oklab(color: &Rgb<u8>) -> Oklab {
    let [red, green, blue] = color.0;
    Oklab::from_color(Srgb::new(red, green, blue).into_format::<f32>())
}

impl From<InkColor> for Rgb<u8> {
    fn from(value: InkColor) -> Self {
        Rgb(value.rgb())
    }
}

impl From<InkColor> for Oklab {
    fn from(value: InkColor) -> Self {
        rgb_to_oklab(&value.into())
    }
}

/// Exact match only. Anything that is not precisely one of the inks is left as paper.
impl From<&Rgb<u8>> for InkColor {
    fn from(value: &Rgb<u8>) -> Self {
        match value.0 {
            [0, 0, 0] => InkColor::Black,
            [255, 0, 0] => InkColor::Red,
            [255, 255, 0] => InkColor::Yellow,
            _ => InkColor::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ink_colors_round_trip_through_rgb() {
        for ink in [
            InkColor::Black,
            InkColor::White,
            InkColor::Red,
            InkColor::Yellow,
        ] {
            let rgb: Rgb<u8> = ink.into();
            assert_eq!(InkColor::from(&rgb), ink);
        }
    }

    #[test]
    fn near_miss_colors_are_paper() {
        assert_eq!(InkColor::from(&Rgb([1, 0, 0])), InkColor::White);
        assert_eq!(InkColor::from(&Rgb([254, 0, 0])), InkColor::White);
        assert_eq!(InkColor::from(&Rgb([255, 254, 0])), InkColor::White);
        assert_eq!(InkColor::from(&Rgb([255, 0, 1])), InkColor::White);
    }

    #[test]
    fn black_and_white_sit_at_the_ends_of_oklab_lightness() {
        let black: Oklab = InkColor::Black.into();
        let white: Oklab = InkColor::White.into();
        assert!(black.l.abs() < 1e-3);
        assert!((white.l - 1.0).abs() < 1e-3);
    }
}
