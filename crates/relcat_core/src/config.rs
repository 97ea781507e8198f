//! Explicit filesystem layout and rendering settings.
//!
//! # Responsibility
//! - Own every path the pipeline reads or writes, so no component depends
//!   on the process working directory.
//! - Carry the small set of presentation knobs (catalog title, font).
//!
//! # Invariants
//! - Artifact names are derived only from the release date.
//! - Alias directories are derived only from the release keys.

use crate::model::release::{ReleaseDate, Seq};
use std::path::{Path, PathBuf};

pub const DEFAULT_DIST_DIR: &str = "dist";
pub const DEFAULT_SITE_ROOT: &str = "gh-pages";
pub const DEFAULT_SITE_TITLE: &str = "jsdemo";

/// Fixed file names inside every alias directory.
pub const ALIAS_HTML_NAME: &str = "index.html";
pub const ALIAS_COVER_NAME: &str = "cover.png";
pub const ALIAS_README_NAME: &str = "readme.txt";

/// Paths of the build artifacts and of the published catalog tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub dist_dir: PathBuf,
    pub site_root: PathBuf,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self::new(DEFAULT_DIST_DIR, DEFAULT_SITE_ROOT)
    }
}

impl SiteLayout {
    pub fn new(dist_dir: impl Into<PathBuf>, site_root: impl Into<PathBuf>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
            site_root: site_root.into(),
        }
    }

    /// `dist/cover-<DATE>.png`. Takes a raw date because covers may be drawn
    /// for non-canonical dates.
    pub fn cover_artifact(&self, date: &str) -> PathBuf {
        self.dist_dir.join(format!("cover-{date}.png"))
    }

    pub fn demo_artifact(&self, date: &ReleaseDate) -> PathBuf {
        self.dist_dir.join(format!("demo-{date}.html"))
    }

    pub fn readme_artifact(&self, date: &ReleaseDate) -> PathBuf {
        self.dist_dir.join(format!("readme-{date}.txt"))
    }

    pub fn releases_dir(&self) -> PathBuf {
        self.site_root.join("releases")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.releases_dir().join("manifest.json")
    }

    pub fn index_path(&self) -> PathBuf {
        self.site_root.join("index.html")
    }

    pub fn date_dir(&self, date: &ReleaseDate) -> PathBuf {
        self.releases_dir().join("date").join(date.as_str())
    }

    pub fn seq_dir(&self, seq: Seq) -> PathBuf {
        self.releases_dir().join("seq").join(seq.to_string())
    }

    pub fn latest_dir(&self) -> PathBuf {
        self.site_root.join("latest")
    }
}

/// Catalog page settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub site_title: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            site_title: DEFAULT_SITE_TITLE.to_string(),
        }
    }
}

/// Cover generator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverConfig {
    /// Width and height of the square canvas in pixels.
    pub canvas_size: u32,
    /// Caption size in pixels for the preferred font.
    pub caption_px: f32,
    /// Preferred TrueType font. `None` probes [`SYSTEM_FONT_CANDIDATES`].
    pub font_path: Option<PathBuf>,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            canvas_size: 1024,
            caption_px: 26.0,
            font_path: None,
        }
    }
}

/// Well-known install locations of the preferred caption face.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/Library/Fonts/DejaVuSans.ttf",
    "C:\\Windows\\Fonts\\DejaVuSans.ttf",
];

/// Returns the preferred font paths to try, most specific first.
pub fn font_candidates(config: &CoverConfig) -> Vec<&Path> {
    match config.font_path.as_deref() {
        Some(path) => vec![path],
        None => SYSTEM_FONT_CANDIDATES.iter().map(Path::new).collect(),
    }
}
