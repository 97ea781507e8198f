//! Shared argument parsing and bootstrap for the release tools.
//!
//! # Responsibility
//! - Map flags and `RELCAT_*` environment variables onto core configuration.
//! - Initialize logging before any use-case runs.
//!
//! # Invariants
//! - Stdout carries only each tool's result line(s); diagnostics go to
//!   stderr or the log directory.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser};
use relcat_core::config::{DEFAULT_DIST_DIR, DEFAULT_SITE_ROOT, DEFAULT_SITE_TITLE};
use relcat_core::{
    init_logging, CatalogConfig, CoverConfig, DraftArtifacts, ReleaseDate, ReleaseDraft,
    ReleaseService, SiteLayout, UpdatePagesReport, UpdatePagesRequest,
};
use std::path::PathBuf;

/// Flags shared by every tool.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory holding build artifacts (cover, demo, readme)
    #[arg(long, env = "RELCAT_DIST_DIR", default_value = DEFAULT_DIST_DIR)]
    pub dist_dir: PathBuf,

    /// Root of the published catalog tree
    #[arg(long, env = "RELCAT_SITE_ROOT", default_value = DEFAULT_SITE_ROOT)]
    pub site_root: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RELCAT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Absolute directory for rotated log files (stderr when unset)
    #[arg(long, env = "RELCAT_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Preferred caption font (TrueType)
    #[arg(long, env = "RELCAT_FONT")]
    pub font: Option<PathBuf>,

    /// Title shown on the catalog page
    #[arg(long, env = "RELCAT_SITE_TITLE", default_value = DEFAULT_SITE_TITLE)]
    pub site_title: String,
}

impl CommonArgs {
    /// Starts logging and builds the release service.
    pub fn bootstrap(&self) -> Result<ReleaseService> {
        init_logging(&self.log_level, self.log_dir.as_deref())
            .map_err(|err| anyhow!(err))
            .context("failed to initialize logging")?;

        let layout = SiteLayout::new(&self.dist_dir, &self.site_root);
        let cover = CoverConfig {
            font_path: self.font.clone(),
            ..CoverConfig::default()
        };
        let catalog = CatalogConfig {
            site_title: self.site_title.clone(),
        };
        Ok(ReleaseService::new(layout, cover, catalog))
    }
}

/// Draw the cover image for a release date.
#[derive(Parser, Debug)]
#[command(name = "make_cover", version, about, long_about = None)]
pub struct MakeCoverArgs {
    /// Release date, normally YYYYMMDD
    pub date: String,

    /// Release title used in the caption
    pub title: String,

    /// Further positionals are accepted and ignored
    #[arg(hide = true)]
    pub ignored: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Writes `cover-<DATE>.png` and returns its path.
pub fn run_make_cover(args: &MakeCoverArgs) -> Result<PathBuf> {
    let service = args.common.bootstrap()?;
    service
        .make_cover(&args.date, &args.title)
        .with_context(|| format!("failed to generate cover for {}", args.date))
}

/// Publish a release into the catalog and refresh manifest and index.
#[derive(Parser, Debug)]
#[command(name = "update_pages", version, about, long_about = None)]
pub struct UpdatePagesArgs {
    /// Release date, YYYYMMDD
    pub date: String,

    /// Release sequence number
    pub seq: String,

    /// Release title
    pub title: String,

    /// Further positionals are accepted and ignored
    #[arg(hide = true)]
    pub ignored: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn run_update_pages(args: &UpdatePagesArgs) -> Result<UpdatePagesReport> {
    let service = args.common.bootstrap()?;
    let request = UpdatePagesRequest {
        date: args.date.clone(),
        seq: args.seq.clone(),
        title: args.title.clone(),
    };
    service
        .update_pages(&request)
        .with_context(|| format!("failed to update pages for {}", args.date))
}

/// Write the demo page and readme for a release.
#[derive(Parser, Debug)]
#[command(name = "make_release", version, about, long_about = None)]
pub struct MakeReleaseArgs {
    /// Release date, YYYYMMDD (defaults to today in UTC)
    pub date: Option<String>,

    /// Release title (cut to 80 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// Description paragraph for the readme
    #[arg(long)]
    pub description: Option<String>,

    /// Planned follow-up for the next release
    #[arg(long)]
    pub to_next: Option<String>,

    /// Prompt describing the cover
    #[arg(long)]
    pub cover_prompt: Option<String>,

    /// Self-contained HTML demo page to publish
    #[arg(long)]
    pub html: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Writes draft artifacts, starting from the built-in fallback demo and
/// overriding whichever fields were supplied.
pub fn run_make_release(args: &MakeReleaseArgs) -> Result<DraftArtifacts> {
    let service = args.common.bootstrap()?;
    let date = match args.date.as_deref() {
        Some(raw) => ReleaseDate::parse(raw)?,
        None => ReleaseDate::today_utc(),
    };

    let mut draft = ReleaseDraft::fallback();
    if let Some(title) = &args.title {
        draft.title = title.clone();
    }
    if let Some(description) = &args.description {
        draft.description = description.clone();
    }
    if let Some(to_next) = &args.to_next {
        draft.to_next = to_next.clone();
    }
    if let Some(cover_prompt) = &args.cover_prompt {
        draft.cover_prompt = cover_prompt.clone();
    }
    if let Some(path) = &args.html {
        draft.html = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read demo html `{}`", path.display()))?;
    }

    service
        .make_release(&date, draft)
        .with_context(|| format!("failed to write release draft for {date}"))
}

#[cfg(test)]
mod tests {
    use super::{MakeCoverArgs, MakeReleaseArgs, UpdatePagesArgs};
    use clap::Parser;

    #[test]
    fn update_pages_requires_three_positionals() {
        assert!(UpdatePagesArgs::try_parse_from(["update_pages", "20250816", "6"]).is_err());
        let args =
            UpdatePagesArgs::try_parse_from(["update_pages", "20250816", "6", "Echo"]).unwrap();
        assert_eq!(args.title, "Echo");
        assert_eq!(args.common.site_root.to_str(), Some("gh-pages"));
        assert_eq!(args.common.log_level, "warn");
    }

    #[test]
    fn extra_positionals_are_ignored() {
        let args = UpdatePagesArgs::try_parse_from([
            "update_pages",
            "20250816",
            "6",
            "Chromatic",
            "Echo",
            "--site-root",
            "public",
        ])
        .unwrap();
        assert_eq!(args.title, "Chromatic");
        assert_eq!(args.ignored, vec!["Echo".to_string()]);
        assert_eq!(args.common.site_root.to_str(), Some("public"));

        let cover =
            MakeCoverArgs::try_parse_from(["make_cover", "20250816", "Chromatic", "Echo"])
                .unwrap();
        assert_eq!(cover.title, "Chromatic");
    }

    #[test]
    fn make_release_date_is_optional() {
        let args = MakeReleaseArgs::try_parse_from(["make_release", "--title", "Echo"]).unwrap();
        assert!(args.date.is_none());
        assert_eq!(args.title.as_deref(), Some("Echo"));
    }
}
