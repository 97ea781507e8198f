//! Compact release description extraction from readme text.
//!
//! # Responsibility
//! - Pull the `Description:` block out of a release readme.
//! - Fall back to the first lines after the title when no block exists.
//!
//! # Invariants
//! - Output never exceeds [`MAX_DESCRIPTION_CHARS`] characters.
//! - Extraction never fails; unreadable input yields an empty description.

use log::{debug, warn};
use std::path::Path;

pub const MAX_DESCRIPTION_CHARS: usize = 400;
pub const DESCRIPTION_MARKER: &str = "description:";

const TRUNCATED_KEEP_CHARS: usize = MAX_DESCRIPTION_CHARS - 3;
const SECTION_MARKERS: &[&str] = &["TO_NEXT", "COVER"];
const FALLBACK_LINE_COUNT: usize = 2;

/// Extracts the compact description from readme text.
///
/// Lines after the first `Description:` marker are collected until a blank
/// line or a `TO_NEXT`/`COVER` section line, then joined by single spaces.
pub fn extract_description(readme_text: &str) -> String {
    let lines = readme_text.lines().collect::<Vec<_>>();
    let mut desc = marker_block(&lines);
    if desc.is_empty() {
        desc = fallback_body(&lines);
    }
    truncate_description(&desc)
}

/// Reads a readme file and extracts its description.
///
/// Missing or unreadable files produce an empty string.
pub fn describe_readme_file(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes).replace('\u{FFFD}', "");
            let desc = extract_description(&text);
            debug!(
                "event=describe module=describe status=ok chars={}",
                desc.chars().count()
            );
            desc
        }
        Err(err) => {
            warn!(
                "event=describe module=describe status=skipped path={} error={}",
                path.display(),
                err
            );
            String::new()
        }
    }
}

fn marker_block(lines: &[&str]) -> String {
    let Some(start) = lines
        .iter()
        .position(|line| line.trim().to_lowercase().starts_with(DESCRIPTION_MARKER))
    else {
        return String::new();
    };

    lines[start + 1..]
        .iter()
        .map(|line| line.trim())
        .take_while(|line| !line.is_empty() && !is_section_boundary(line))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn is_section_boundary(trimmed: &str) -> bool {
    let upper = trimmed.to_uppercase();
    SECTION_MARKERS
        .iter()
        .any(|marker| upper.starts_with(marker))
}

fn fallback_body(lines: &[&str]) -> String {
    lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .take(FALLBACK_LINE_COUNT)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn truncate_description(desc: &str) -> String {
    if desc.chars().count() <= MAX_DESCRIPTION_CHARS {
        return desc.to_string();
    }
    let kept = desc.chars().take(TRUNCATED_KEEP_CHARS).collect::<String>();
    format!("{}...", kept.trim_end())
}
