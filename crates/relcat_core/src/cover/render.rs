//! Rasterization and persistence of release covers.
//!
//! # Responsibility
//! - Draw an [`ArtSpec`] onto a black square canvas with a captioned corner.
//! - Encode to PNG and write `cover-<DATE>.png`.
//!
//! # Invariants
//! - Same `(date, title, config, font)` always encodes to identical bytes.
//! - The caption never leaves the canvas.

use super::art::{caption_text, ArtSpec};
use super::font::CaptionFont;
use crate::atomic_write::write_atomic;
use crate::config::{CoverConfig, SiteLayout};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_polygon_mut;
use imageproc::point::Point;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Instant;

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const CAPTION_COLOR: Rgb<u8> = Rgb([235, 235, 235]);
const CAPTION_MARGIN_RIGHT: u32 = 20;
const CAPTION_MARGIN_BOTTOM: u32 = 30;
const CAPTION_SHRINK: f32 = 0.9;
const ELLIPSIS: &str = "...";

pub type CoverResult<T> = Result<T, CoverError>;

#[derive(Debug)]
pub enum CoverError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(image::ImageError),
}

impl Display for CoverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write cover `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode cover: {err}"),
        }
    }
}

impl Error for CoverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<image::ImageError> for CoverError {
    fn from(value: image::ImageError) -> Self {
        Self::Encode(value)
    }
}

/// Draws the cover, loading the caption font from `config`.
pub fn generate_cover(date: &str, title: &str, config: &CoverConfig) -> RgbImage {
    let font = CaptionFont::load(config);
    generate_cover_with_font(date, title, config, &font)
}

/// Draws the cover with an already loaded caption font.
pub fn generate_cover_with_font(
    date: &str,
    title: &str,
    config: &CoverConfig,
    font: &CaptionFont,
) -> RgbImage {
    let spec = ArtSpec::derive(date, title, config.canvas_size);
    let mut canvas = RgbImage::from_pixel(spec.canvas_size, spec.canvas_size, BACKGROUND);
    let center = spec.center();

    for stroke in &spec.strokes {
        let points = stroke
            .vertices(center)
            .into_iter()
            .map(|(x, y)| Point::new(x as f32, y as f32))
            .collect::<Vec<_>>();
        draw_hollow_polygon_mut(&mut canvas, &points, Rgb(stroke.color));
    }

    let size = spec.canvas_size;
    let max_width = size.saturating_sub(2 * CAPTION_MARGIN_RIGHT);
    let (caption, px) = fit_caption(font, title, date, config.caption_px, max_width);
    let (text_w, text_h) = font.measure(&caption, px);
    let x = size.saturating_sub(CAPTION_MARGIN_RIGHT + text_w);
    let y = size.saturating_sub(CAPTION_MARGIN_BOTTOM + text_h);
    font.draw(&mut canvas, CAPTION_COLOR, (x as i32, y as i32), px, &caption);

    canvas
}

/// Picks the caption text and size that fit within `max_width`.
///
/// Shrinks the size first; at the minimum size the title is shortened with
/// an ellipsis. The date suffix is always kept intact.
fn fit_caption(
    font: &CaptionFont,
    title: &str,
    date: &str,
    preferred_px: f32,
    max_width: u32,
) -> (String, f32) {
    let full = caption_text(title, date);
    let min_px = font.min_px().min(preferred_px);
    let mut px = preferred_px;
    loop {
        if font.measure(&full, px).0 <= max_width {
            return (full, px);
        }
        let next = px * CAPTION_SHRINK;
        if next < min_px {
            break;
        }
        px = next;
    }

    let chars = title.chars().collect::<Vec<_>>();
    for keep in (0..chars.len()).rev() {
        let shortened = format!("{}{ELLIPSIS}", chars[..keep].iter().collect::<String>());
        let candidate = caption_text(shortened.trim_end(), date);
        if font.measure(&candidate, px).0 <= max_width {
            return (candidate, px);
        }
    }
    (caption_text(ELLIPSIS, date), px)
}

/// PNG bytes exactly as [`write_cover`] stores them.
pub fn encode_png(image: &RgbImage) -> CoverResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Generates and writes `cover-<DATE>.png` into the dist directory.
///
/// # Side effects
/// - Creates the dist directory when missing.
/// - Replaces an existing cover atomically.
/// - Emits `cover_generate` logging events with duration and status.
///
/// # Errors
/// - Returns [`CoverError::Io`] when the dist directory or file cannot be written.
pub fn write_cover(
    layout: &SiteLayout,
    date: &str,
    title: &str,
    config: &CoverConfig,
) -> CoverResult<PathBuf> {
    let started_at = Instant::now();
    let font = CaptionFont::load(config);
    let image = generate_cover_with_font(date, title, config, &font);
    let bytes = encode_png(&image)?;
    let path = layout.cover_artifact(date);

    if let Err(source) = write_atomic(&path, &bytes) {
        error!(
            "event=cover_generate module=cover status=error date={} duration_ms={} error_code=cover_write_failed error={}",
            date,
            started_at.elapsed().as_millis(),
            source
        );
        return Err(CoverError::Io { path, source });
    }

    info!(
        "event=cover_generate module=cover status=ok date={} bytes={} fallback_font={} duration_ms={}",
        date,
        bytes.len(),
        font.is_fallback(),
        started_at.elapsed().as_millis()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::fit_caption;
    use crate::cover::font::CaptionFont;

    #[test]
    fn short_caption_keeps_preferred_size() {
        let font = CaptionFont::fallback();
        let (caption, px) = fit_caption(&font, "Echo", "20250816", 26.0, 984);
        assert_eq!(caption, "Echo — 20250816");
        assert_eq!(px, 26.0);
    }

    #[test]
    fn long_caption_is_shrunk_then_shortened() {
        let font = CaptionFont::fallback();
        let title = "W".repeat(400);
        let (caption, px) = fit_caption(&font, &title, "20250816", 26.0, 984);
        assert!(caption.ends_with("... — 20250816"));
        assert!(font.measure(&caption, px).0 <= 984);
    }
}
