//! Caption faces: a preferred TrueType font with a built-in bitmap fallback.
//!
//! # Invariants
//! - Loading never fails; a missing or unreadable font yields the bitmap face.
//! - Both faces measure and draw with the same top-left origin convention.

use crate::config::{font_candidates, CoverConfig};
use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use log::{debug, warn};
use std::path::Path;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Font used for the cover caption.
pub enum CaptionFont {
    TrueType(FontVec),
    Bitmap,
}

impl CaptionFont {
    /// Loads the first readable preferred font, else the bitmap face.
    pub fn load(config: &CoverConfig) -> Self {
        for path in font_candidates(config) {
            match Self::from_file(path) {
                Some(font) => {
                    debug!(
                        "event=font_load module=cover status=ok path={}",
                        path.display()
                    );
                    return font;
                }
                None if config.font_path.is_some() => {
                    warn!(
                        "event=font_load module=cover status=fallback path={}",
                        path.display()
                    );
                }
                None => {}
            }
        }
        debug!("event=font_load module=cover status=fallback face=bitmap");
        Self::Bitmap
    }

    pub fn fallback() -> Self {
        Self::Bitmap
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Bitmap)
    }

    fn from_file(path: &Path) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        FontVec::try_from_vec(bytes).ok().map(Self::TrueType)
    }

    /// Smallest pixel size worth trying when shrinking a caption.
    pub fn min_px(&self) -> f32 {
        match self {
            Self::TrueType(_) => 10.0,
            Self::Bitmap => GLYPH_HEIGHT as f32,
        }
    }

    /// `(width, height)` of `text` rendered at `px`.
    pub fn measure(&self, text: &str, px: f32) -> (u32, u32) {
        match self {
            Self::TrueType(font) => text_size(PxScale::from(px), font, text),
            Self::Bitmap => {
                let count = text.chars().count() as u32;
                if count == 0 {
                    return (0, 0);
                }
                let scale = bitmap_scale(px);
                ((count * GLYPH_ADVANCE - 1) * scale, GLYPH_HEIGHT * scale)
            }
        }
    }

    pub fn draw(
        &self,
        canvas: &mut RgbImage,
        color: Rgb<u8>,
        origin: (i32, i32),
        px: f32,
        text: &str,
    ) {
        match self {
            Self::TrueType(font) => {
                draw_text_mut(canvas, color, origin.0, origin.1, PxScale::from(px), font, text)
            }
            Self::Bitmap => draw_bitmap_text(canvas, color, origin, bitmap_scale(px), text),
        }
    }
}

fn bitmap_scale(px: f32) -> u32 {
    ((px / GLYPH_HEIGHT as f32).floor() as u32).max(1)
}

fn draw_bitmap_text(
    canvas: &mut RgbImage,
    color: Rgb<u8>,
    origin: (i32, i32),
    scale: u32,
    text: &str,
) {
    let scale = scale as i32;
    for (slot, ch) in text.chars().enumerate() {
        let left = origin.0 + slot as i32 * GLYPH_ADVANCE as i32 * scale;
        for (row, bits) in glyph_rows(ch).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let x0 = left + col as i32 * scale;
                let y0 = origin.1 + row as i32 * scale;
                fill_cell(canvas, color, x0, y0, scale);
            }
        }
    }
}

fn fill_cell(canvas: &mut RgbImage, color: Rgb<u8>, x0: i32, y0: i32, size: i32) {
    let (width, height) = canvas.dimensions();
    for y in y0..y0 + size {
        for x in x0..x0 + size {
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// 5x7 rows, most significant of the low five bits is the leftmost column.
fn glyph_rows(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; 7],
        '-' => [0, 0, 0, 0b01110, 0, 0, 0],
        '—' | '–' => [0, 0, 0, 0b11111, 0, 0, 0],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100],
        '\'' => [0b00100, 0b00100, 0b01000, 0, 0, 0, 0],
        '"' => [0b01010, 0b01010, 0, 0, 0, 0, 0],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '_' => [0, 0, 0, 0, 0, 0, 0b11111],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '+' => [0, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

#[cfg(test)]
mod tests {
    use super::{bitmap_scale, glyph_rows, CaptionFont};
    use image::{Rgb, RgbImage};

    #[test]
    fn bitmap_measure_matches_scaled_grid() {
        let font = CaptionFont::fallback();
        assert_eq!(bitmap_scale(26.0), 3);
        assert_eq!(font.measure("AB", 26.0), (33, 21));
        assert_eq!(font.measure("", 26.0), (0, 0));
    }

    #[test]
    fn lowercase_folds_to_capitals() {
        assert_eq!(glyph_rows('a'), glyph_rows('A'));
    }

    #[test]
    fn bitmap_draw_is_clipped_to_canvas() {
        let mut canvas = RgbImage::new(8, 8);
        let font = CaptionFont::fallback();
        font.draw(&mut canvas, Rgb([255, 255, 255]), (-3, 4), 14.0, "WW");
        assert!(canvas.pixels().any(|p| p.0 == [255, 255, 255]));
    }
}
