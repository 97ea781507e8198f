//! Date-seeded stroke geometry for release covers.
//!
//! # Responsibility
//! - Derive the full, reproducible drawing plan ([`ArtSpec`]) from
//!   `(date, title)` without touching any raster.
//!
//! # Invariants
//! - Geometry depends only on the stroke index; the date only shifts hue.
//! - Stroke `k` has base radius `80 + 16 * k`, strictly nesting outward.
//! - The seed is derived but never consumed; no randomness enters the plan.

use std::f64::consts::PI;

pub const STROKE_COUNT: usize = 24;
pub const BASE_RADIUS: f64 = 80.0;
pub const RADIUS_STEP: f64 = 16.0;
pub const CAPTION_SEPARATOR: &str = " — ";

const HUE_STEP_DEG: u32 = 15;
const ROTATION_STEP_DEG: f64 = 7.0;
const MIN_VERTICES: usize = 3;
const VERTEX_CYCLE: usize = 9;
const LOBE_FLOOR: f64 = 0.78;
const LOBE_DEPTH: f64 = 0.22;
const LOBE_EXPONENT: f64 = 0.7;

/// One closed outline polygon of the cover.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub index: usize,
    pub vertex_count: usize,
    pub base_radius: f64,
    pub rotation_deg: f64,
    pub hue: u32,
    pub color: [u8; 3],
}

impl Stroke {
    fn for_index(index: usize, hue_offset: u32) -> Self {
        let hue = (index as u32 * HUE_STEP_DEG + hue_offset) % 360;
        Self {
            index,
            vertex_count: MIN_VERTICES + index % VERTEX_CYCLE,
            base_radius: BASE_RADIUS + RADIUS_STEP * index as f64,
            rotation_deg: ROTATION_STEP_DEG * index as f64,
            hue,
            color: hue_to_rgb(hue),
        }
    }

    /// Lobed polygon vertices around `center`, in drawing order.
    pub fn vertices(&self, center: (f64, f64)) -> Vec<(f64, f64)> {
        let n = self.vertex_count as f64;
        (0..self.vertex_count)
            .map(|i| {
                let angle = (self.rotation_deg + i as f64 * 360.0 / n) * PI / 180.0;
                let lobe = (n * angle / 2.0).cos().abs().powf(LOBE_EXPONENT);
                let radius = self.base_radius * (LOBE_FLOOR + LOBE_DEPTH * lobe);
                (
                    center.0 + angle.cos() * radius,
                    center.1 + angle.sin() * radius,
                )
            })
            .collect()
    }
}

/// Complete drawing plan for one cover.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtSpec {
    pub seed: u64,
    pub canvas_size: u32,
    pub strokes: Vec<Stroke>,
    pub caption: String,
}

impl ArtSpec {
    pub fn derive(date: &str, title: &str, canvas_size: u32) -> Self {
        let hue_offset = hue_offset(date);
        Self {
            seed: seed_from_date(date),
            canvas_size,
            strokes: (0..STROKE_COUNT)
                .map(|k| Stroke::for_index(k, hue_offset))
                .collect(),
            caption: caption_text(title, date),
        }
    }

    /// Canvas center using integer halving of the canvas size.
    pub fn center(&self) -> (f64, f64) {
        let half = f64::from(self.canvas_size / 2);
        (half, half)
    }
}

fn is_all_digits(date: &str) -> bool {
    !date.is_empty() && date.bytes().all(|b| b.is_ascii_digit())
}

/// Integer value of an all-digit date (wrapping past `u64`), else 0.
pub fn seed_from_date(date: &str) -> u64 {
    if !is_all_digits(date) {
        return 0;
    }
    date.bytes().fold(0u64, |acc, b| {
        acc.wrapping_mul(10).wrapping_add(u64::from(b - b'0'))
    })
}

/// Hue shift contributed by the date: three times its last two digits.
pub fn hue_offset(date: &str) -> u32 {
    if !is_all_digits(date) {
        return 0;
    }
    let tail = &date[date.len().saturating_sub(2)..];
    tail.bytes().fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0')) * 3
}

/// Three-phase sinusoid hue mapping (R, G, B at 0°, 120°, 240°).
pub fn hue_to_rgb(hue: u32) -> [u8; 3] {
    let channel = |phase: u32| {
        let rad = f64::from(hue + phase) * PI / 180.0;
        (128.0 + 127.0 * rad.sin()) as u8
    };
    [channel(0), channel(120), channel(240)]
}

pub fn caption_text(title: &str, date: &str) -> String {
    format!("{title}{CAPTION_SEPARATOR}{date}")
}
