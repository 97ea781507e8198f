//! Release draft artifacts: the demo page and its readme.
//!
//! # Responsibility
//! - Turn author-supplied (or built-in fallback) fields into
//!   `demo-<DATE>.html` and `readme-<DATE>.txt`.
//! - Keep demo pages self-contained under a strict Content-Security-Policy.
//!
//! # Invariants
//! - A stored demo never references external resources.
//! - A stored demo always carries a CSP meta tag.
//! - The readme layout round-trips through
//!   [`crate::describe::extract_description`].

use crate::atomic_write::write_atomic;
use crate::config::SiteLayout;
use crate::model::release::ReleaseDate;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const MAX_TITLE_CHARS: usize = 80;
pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEMO_CSP: &str = "default-src 'none'; img-src data:; style-src 'unsafe-inline'; script-src 'unsafe-inline'; font-src data:;";

static EXTERNAL_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(https?://|<link\b|<script\s+src=)").expect("valid external ref regex")
});
static IMG_SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\s+[^>]*src\s*=\s*["']([^"']*)"#).expect("valid img src regex")
});
static CSP_META_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<meta[^>]+Content-Security-Policy").expect("valid csp meta regex")
});
static CSP_ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<head>|<html[^>]*>").expect("valid csp anchor regex"));

const FALLBACK_TITLE: &str = "Chromatic Echo";
const FALLBACK_DESCRIPTION: &str =
    "Fallback demo: colorful orbits with gentle motion (Canvas, no deps).";
const FALLBACK_TO_NEXT: &str = "Add subtle interactivity without breaking CSP.";
const FALLBACK_COVER_PROMPT: &str = "Abstract neon orbits on black, soft glow, minimal poster";

const FALLBACK_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta http-equiv="Content-Security-Policy" content="default-src 'none'; img-src data:; style-src 'unsafe-inline'; script-src 'unsafe-inline'; font-src data:;">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Chromatic Echo</title>
<style>html,body,canvas{margin:0;padding:0;width:100%;height:100%;display:block}body{background:#000}</style>
</head>
<body>
<canvas id="stage"></canvas>
<script>
const stage = document.getElementById('stage');
const ctx = stage.getContext('2d');
function fit() { stage.width = innerWidth; stage.height = innerHeight; }
addEventListener('resize', fit);
fit();
let t = 0;
function frame() {
  t += 0.012;
  ctx.fillStyle = 'rgba(0,0,0,0.18)';
  ctx.fillRect(0, 0, stage.width, stage.height);
  for (let i = 0; i < 6; i++) {
    const phase = t * (0.6 + i * 0.15) + i;
    const x = stage.width / 2 + Math.cos(phase) * (60 + i * 40);
    const y = stage.height / 2 + Math.sin(phase * 1.3) * (40 + i * 30);
    ctx.beginPath();
    ctx.arc(x, y, 10 + 6 * Math.sin(t + i), 0, Math.PI * 2);
    ctx.fillStyle = 'hsl(' + ((t * 50 + i * 60) % 360) + ' 85% 60%)';
    ctx.fill();
  }
  requestAnimationFrame(frame);
}
frame();
</script>
</body>
</html>
"#;

pub type DraftResult<T> = Result<T, DraftError>;

#[derive(Debug)]
pub enum DraftError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write draft `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for DraftError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Author-facing fields of one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDraft {
    pub title: String,
    pub description: String,
    pub to_next: String,
    pub cover_prompt: String,
    pub html: String,
}

impl ReleaseDraft {
    /// Built-in offline demo.
    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            to_next: FALLBACK_TO_NEXT.to_string(),
            cover_prompt: FALLBACK_COVER_PROMPT.to_string(),
            html: FALLBACK_HTML.to_string(),
        }
    }

    /// Normalizes fields for storage.
    ///
    /// - Title: first 80 characters, trimmed, `Untitled` when empty.
    /// - HTML: empty or externally-referencing pages are replaced by the
    ///   fallback demo; a CSP meta tag is ensured.
    /// - Other text fields are trimmed.
    pub fn sanitized(self) -> Self {
        let html = if self.html.trim().is_empty() || has_external_refs(&self.html) {
            warn!("event=draft_sanitize module=draft status=fallback reason=unsafe_or_empty_html");
            FALLBACK_HTML.to_string()
        } else {
            self.html
        };

        Self {
            title: normalize_title(&self.title),
            description: self.description.trim().to_string(),
            to_next: self.to_next.trim().to_string(),
            cover_prompt: self.cover_prompt.trim().to_string(),
            html: ensure_csp(&html),
        }
    }

    /// Readme text in the layout the description extractor expects.
    pub fn readme(&self) -> String {
        format!(
            "{}\n\nDescription:\n{}\n\nTO_NEXT: {}\nCOVER: {}\n",
            self.title, self.description, self.to_next, self.cover_prompt
        )
    }
}

/// Paths written by [`write_draft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftArtifacts {
    pub date: String,
    pub title: String,
    #[serde(skip)]
    pub html_path: PathBuf,
    #[serde(skip)]
    pub readme_path: PathBuf,
}

/// Sanitizes `draft` and writes its demo page and readme into the dist dir.
///
/// # Errors
/// - Returns [`DraftError::Io`] when either artifact cannot be written.
pub fn write_draft(
    layout: &SiteLayout,
    date: &ReleaseDate,
    draft: ReleaseDraft,
) -> DraftResult<DraftArtifacts> {
    let draft = draft.sanitized();
    let html_path = layout.demo_artifact(date);
    let readme_path = layout.readme_artifact(date);

    write_atomic(&html_path, draft.html.as_bytes()).map_err(|source| DraftError::Io {
        path: html_path.clone(),
        source,
    })?;
    write_atomic(&readme_path, draft.readme().as_bytes()).map_err(|source| DraftError::Io {
        path: readme_path.clone(),
        source,
    })?;

    info!(
        "event=draft_write module=draft status=ok date={} html_bytes={}",
        date,
        draft.html.len()
    );
    Ok(DraftArtifacts {
        date: date.to_string(),
        title: draft.title,
        html_path,
        readme_path,
    })
}

/// Whether `html` loads anything from outside the page itself.
pub fn has_external_refs(html: &str) -> bool {
    if EXTERNAL_REF_RE.is_match(html) {
        return true;
    }
    IMG_SRC_RE.captures_iter(html).any(|caps| {
        !caps
            .get(1)
            .map(|src| src.as_str().trim_start().to_ascii_lowercase().starts_with("data:"))
            .unwrap_or(false)
    })
}

/// Inserts the demo CSP meta tag unless one is already present.
///
/// The tag goes right after whichever of `<head>` or `<html ...>` appears
/// first in the document, or at the very start when neither exists.
pub fn ensure_csp(html: &str) -> String {
    if CSP_META_RE.is_match(html) {
        return html.to_string();
    }
    let meta = format!(r#"<meta http-equiv="Content-Security-Policy" content="{DEMO_CSP}">"#);
    match CSP_ANCHOR_RE.find(html) {
        Some(anchor) => format!(
            "{}\n{}{}",
            &html[..anchor.end()],
            meta,
            &html[anchor.end()..]
        ),
        None => format!("{meta}\n{html}"),
    }
}

fn normalize_title(raw: &str) -> String {
    let title = raw
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect::<String>()
        .trim()
        .to_string();
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, ReleaseDraft, FALLBACK_HTML};

    #[test]
    fn title_is_cut_then_trimmed() {
        assert_eq!(normalize_title("   "), "Untitled");
        let long = format!("{} tail", "x".repeat(79));
        assert_eq!(normalize_title(&long), "x".repeat(79));
    }

    #[test]
    fn fallback_html_is_self_contained() {
        assert!(!super::has_external_refs(FALLBACK_HTML));
        assert_eq!(super::ensure_csp(FALLBACK_HTML), FALLBACK_HTML);
    }

    #[test]
    fn fallback_readme_carries_stock_text() {
        let readme = ReleaseDraft::fallback().readme();
        assert!(readme.starts_with("Chromatic Echo\n\nDescription:\n"));
        assert!(readme.contains(
            "Fallback demo: colorful orbits with gentle motion (Canvas, no deps)."
        ));
        assert!(readme.contains("TO_NEXT: Add subtle interactivity without breaking CSP.\n"));
    }
}
