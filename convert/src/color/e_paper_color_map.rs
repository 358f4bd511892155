use crate::color::ink_color::{rgb_to_oklab, InkColor};
use image::imageops::ColorMap;
use image::Rgb;
use palette::color_difference::HyAb;
use palette::Oklab;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Third colour of the panel variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SecondaryInk {
    #[default]
    Red,
    Yellow,
}

impl SecondaryInk {
    pub fn ink(self) -> InkColor {
        match self {
            SecondaryInk::Red => InkColor::Red,
            SecondaryInk::Yellow => InkColor::Yellow,
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown ink `{0}`, expected `red` or `yellow`")]
pub struct UnknownInk(pub String);

impl FromStr for SecondaryInk {
    type Err = UnknownInk;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(SecondaryInk::Red),
            "yellow" => Ok(SecondaryInk::Yellow),
            _ => Err(UnknownInk(s.to_string())),
        }
    }
}

impl Display for SecondaryInk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SecondaryInk::Red => write!(f, "red"),
            SecondaryInk::Yellow => write!(f, "yellow"),
        }
    }
}

/// Nearest-ink palette for `image::imageops::dither`, so a dithered image only holds
/// colours the bitplane classifiers recognise exactly.
pub struct EPaperColorMap {
    colormap: Vec<(InkColor, Oklab)>,
}

impl EPaperColorMap {
    pub fn new(secondary: SecondaryInk) -> Self {
        let colors = [InkColor::Black, InkColor::White, secondary.ink()];
        Self {
            colormap: colors.into_iter().map(|c| (c, c.into())).collect(),
        }
    }
}

impl ColorMap for EPaperColorMap {
    type Color = Rgb<u8>; // dither requires this to be u8

    fn index_of(&self, color: &Self::Color) -> usize {
        let oklab_color = rgb_to_oklab(color);
        self.colormap
            .iter()
            .enumerate()
            .min_by(|(_, (_, a)), (_, (_, b))| {
                a.hybrid_distance(oklab_color)
                    .total_cmp(&b.hybrid_distance(oklab_color))
            })
            .map(|(index, _)| index)
            .unwrap_or_default()
    }

    fn lookup(&self, index: usize) -> Option<Self::Color> {
        self.colormap.get(index).map(|(ink, _)| (*ink).into())
    }

    fn has_lookup(&self) -> bool {
        true
    }

    fn map_color(&self, color: &mut Self::Color) {
        if let Some(new_color) = self.lookup(self.index_of(color)) {
            *color = new_color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::imageops::dither;
    use image::RgbImage;

    #[test]
    fn exact_inks_map_to_themselves() {
        let map = EPaperColorMap::new(SecondaryInk::Red);
        for ink in [InkColor::Black, InkColor::White, InkColor::Red] {
            let mut color: Rgb<u8> = ink.into();
            map.map_color(&mut color);
            assert_eq!(InkColor::from(&color), ink);
        }
    }

    #[test]
    fn near_colors_snap_to_nearest_ink() {
        let map = EPaperColorMap::new(SecondaryInk::Yellow);
        let mut dark = Rgb([20, 20, 25]);
        let mut light = Rgb([240, 238, 236]);
        let mut mustard = Rgb([235, 220, 30]);
        map.map_color(&mut dark);
        map.map_color(&mut light);
        map.map_color(&mut mustard);
        assert_eq!(dark, Rgb([0, 0, 0]));
        assert_eq!(light, Rgb([255, 255, 255]));
        assert_eq!(mustard, Rgb([255, 255, 0]));
    }

    #[test]
    fn red_palette_never_emits_yellow() {
        let map = EPaperColorMap::new(SecondaryInk::Red);
        let mut yellow = Rgb([255, 255, 0]);
        map.map_color(&mut yellow);
        assert_ne!(InkColor::from(&yellow), InkColor::Yellow);
    }

    #[test]
    fn dithered_image_contains_only_palette_inks() {
        let mut img = RgbImage::from_fn(16, 16, |x, y| {
            Rgb([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8])
        });
        dither(&mut img, &EPaperColorMap::new(SecondaryInk::Red));
        for pixel in img.pixels() {
            assert!(matches!(
                pixel.0,
                [0, 0, 0] | [255, 255, 255] | [255, 0, 0]
            ));
        }
    }

    #[test]
    fn parses_ink_names() {
        assert_eq!("Red".parse::<SecondaryInk>().ok(), Some(SecondaryInk::Red));
        assert_eq!(
            "yellow".parse::<SecondaryInk>().ok(),
            Some(SecondaryInk::Yellow)
        );
        assert!("blue".parse::<SecondaryInk>().is_err());
    }
}
