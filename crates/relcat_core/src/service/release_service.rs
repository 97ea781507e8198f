//! Release publication use-cases.
//!
//! # Responsibility
//! - Orchestrate `update_pages`: publish aliases, extract the description,
//!   reconcile the manifest and re-render the catalog.
//! - Expose cover and draft generation against the same layout.
//!
//! # Invariants
//! - Inputs are validated before any file is touched.
//! - Steps run in a fixed order and the first hard failure aborts the run.
//! - Description extraction is a soft step and never aborts the run.
//!
//! # See also
//! - docs/architecture/pipeline.md

use crate::catalog::write_catalog;
use crate::config::{CatalogConfig, CoverConfig, SiteLayout};
use crate::cover::{write_cover, CoverError};
use crate::describe::describe_readme_file;
use crate::draft::{write_draft, DraftArtifacts, DraftError, ReleaseDraft};
use crate::manifest::{ManifestError, ManifestStore};
use crate::model::release::{ReleaseDate, ReleaseRecord, ReleaseValidationError, Seq};
use crate::publish::{publish_aliases, PublishError, PublishedAliases};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

/// Service error for release use-cases.
#[derive(Debug)]
pub enum ReleaseServiceError {
    Validation(ReleaseValidationError),
    Cover(CoverError),
    Draft(DraftError),
    Publish(PublishError),
    Manifest(ManifestError),
    Catalog {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ReleaseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Cover(err) => write!(f, "{err}"),
            Self::Draft(err) => write!(f, "{err}"),
            Self::Publish(err) => write!(f, "{err}"),
            Self::Manifest(err) => write!(f, "{err}"),
            Self::Catalog { path, source } => {
                write!(f, "failed to write catalog `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ReleaseServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Cover(err) => Some(err),
            Self::Draft(err) => Some(err),
            Self::Publish(err) => Some(err),
            Self::Manifest(err) => Some(err),
            Self::Catalog { source, .. } => Some(source),
        }
    }
}

impl From<ReleaseValidationError> for ReleaseServiceError {
    fn from(value: ReleaseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CoverError> for ReleaseServiceError {
    fn from(value: CoverError) -> Self {
        Self::Cover(value)
    }
}

impl From<DraftError> for ReleaseServiceError {
    fn from(value: DraftError) -> Self {
        Self::Draft(value)
    }
}

impl From<PublishError> for ReleaseServiceError {
    fn from(value: PublishError) -> Self {
        Self::Publish(value)
    }
}

impl From<ManifestError> for ReleaseServiceError {
    fn from(value: ManifestError) -> Self {
        Self::Manifest(value)
    }
}

/// Raw `update_pages` arguments as typed by the publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePagesRequest {
    pub date: String,
    pub seq: String,
    pub title: String,
}

/// Outcome of one `update_pages` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePagesReport {
    pub date: ReleaseDate,
    pub seq: Seq,
    pub record: ReleaseRecord,
    pub evicted: Vec<ReleaseRecord>,
    pub aliases: PublishedAliases,
    pub manifest_path: PathBuf,
    pub index_path: PathBuf,
}

impl UpdatePagesReport {
    /// One-line confirmation printed by the CLI.
    pub fn confirmation(&self) -> String {
        format!("Pages updated for {} seq {}", self.date, self.seq)
    }
}

/// Release pipeline facade bound to one site layout.
#[derive(Debug, Clone, Default)]
pub struct ReleaseService {
    layout: SiteLayout,
    cover: CoverConfig,
    catalog: CatalogConfig,
}

impl ReleaseService {
    pub fn new(layout: SiteLayout, cover: CoverConfig, catalog: CatalogConfig) -> Self {
        Self {
            layout,
            cover,
            catalog,
        }
    }

    pub fn layout(&self) -> &SiteLayout {
        &self.layout
    }

    /// Draws and writes `cover-<DATE>.png`. Any date string is accepted.
    pub fn make_cover(&self, date: &str, title: &str) -> Result<PathBuf, ReleaseServiceError> {
        Ok(write_cover(&self.layout, date, title, &self.cover)?)
    }

    /// Writes the demo page and readme for `date`.
    pub fn make_release(
        &self,
        date: &ReleaseDate,
        draft: ReleaseDraft,
    ) -> Result<DraftArtifacts, ReleaseServiceError> {
        Ok(write_draft(&self.layout, date, draft)?)
    }

    /// Publishes one release and refreshes manifest and catalog.
    ///
    /// # Errors
    /// - [`ReleaseServiceError::Validation`] before any side effect.
    /// - [`ReleaseServiceError::Publish`] when dist artifacts are missing or
    ///   cannot be copied.
    /// - [`ReleaseServiceError::Manifest`] / [`ReleaseServiceError::Catalog`]
    ///   on write failures.
    pub fn update_pages(
        &self,
        request: &UpdatePagesRequest,
    ) -> Result<UpdatePagesReport, ReleaseServiceError> {
        let started_at = Instant::now();
        let date = ReleaseDate::parse(&request.date)?;
        let seq = Seq::parse(&request.seq)?;
        info!(
            "event=update_pages module=service status=start date={} seq={}",
            date, seq
        );

        let result = self.run_update(&date, seq, &request.title);
        match &result {
            Ok(report) => info!(
                "event=update_pages module=service status=ok date={} seq={} evicted={} duration_ms={}",
                date,
                seq,
                report.evicted.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=update_pages module=service status=error date={} seq={} duration_ms={} error={}",
                date,
                seq,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn run_update(
        &self,
        date: &ReleaseDate,
        seq: Seq,
        title: &str,
    ) -> Result<UpdatePagesReport, ReleaseServiceError> {
        let aliases = publish_aliases(&self.layout, date, seq)?;
        let desc = describe_readme_file(&aliases.readme());
        let record = ReleaseRecord::new(date, seq, title, desc);

        let mut store = ManifestStore::load(self.layout.manifest_path());
        let evicted = store.upsert(record.clone());
        store.save()?;

        let index_path = write_catalog(&self.layout, &self.catalog, store.records()).map_err(
            |source| ReleaseServiceError::Catalog {
                path: self.layout.index_path(),
                source,
            },
        )?;

        Ok(UpdatePagesReport {
            date: date.clone(),
            seq,
            record,
            evicted,
            aliases,
            manifest_path: store.path().to_path_buf(),
            index_path,
        })
    }
}
