//! Deterministic procedural cover art.
//!
//! # Responsibility
//! - Turn `(date, title)` into a reproducible square raster with caption.
//! - Keep geometry derivation ([`art`]) separate from rasterization
//!   ([`render`]) so the drawing plan is testable without pixels.
//!
//! # Invariants
//! - Output is a pure function of inputs, canvas settings and the font in use.
//! - A missing preferred font degrades to the built-in bitmap face.
//!
//! # See also
//! - docs/architecture/cover.md

pub mod art;
pub mod font;
pub mod render;

pub use art::{ArtSpec, Stroke};
pub use font::CaptionFont;
pub use render::{
    encode_png, generate_cover, generate_cover_with_font, write_cover, CoverError, CoverResult,
};
