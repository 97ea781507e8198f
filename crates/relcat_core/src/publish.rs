//! Release alias publication (date, seq, latest).
//!
//! # Responsibility
//! - Copy the three build artifacts into the date alias, then mirror the
//!   date alias into the seq alias and `latest/`.
//!
//! # Invariants
//! - All three aliases hold the same three files under fixed names.
//! - Re-publishing the same inputs overwrites in place (idempotent).
//! - No cross-alias transaction: a failure midway leaves earlier aliases
//!   updated and later ones stale.

use crate::config::{SiteLayout, ALIAS_COVER_NAME, ALIAS_HTML_NAME, ALIAS_README_NAME};
use crate::model::release::{ReleaseDate, Seq};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type PublishResult<T> = Result<T, PublishError>;

#[derive(Debug)]
pub enum PublishError {
    /// A required build artifact is absent from the dist directory.
    MissingArtifact(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for PublishError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArtifact(path) => {
                write!(f, "release artifact not found: {}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "failed to publish `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for PublishError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingArtifact(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Alias directories written by one publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedAliases {
    pub date_dir: PathBuf,
    pub seq_dir: PathBuf,
    pub latest_dir: PathBuf,
}

impl PublishedAliases {
    pub fn readme(&self) -> PathBuf {
        self.date_dir.join(ALIAS_README_NAME)
    }
}

/// Publishes the release artifacts of `date` under all three aliases.
///
/// # Errors
/// - Returns [`PublishError::MissingArtifact`] when a dist artifact is absent.
/// - Returns [`PublishError::Io`] for directory creation or copy failures.
pub fn publish_aliases(
    layout: &SiteLayout,
    date: &ReleaseDate,
    seq: Seq,
) -> PublishResult<PublishedAliases> {
    let started_at = Instant::now();
    let sources = [
        (layout.demo_artifact(date), ALIAS_HTML_NAME),
        (layout.cover_artifact(date.as_str()), ALIAS_COVER_NAME),
        (layout.readme_artifact(date), ALIAS_README_NAME),
    ];
    for (source, _) in &sources {
        if !source.is_file() {
            error!(
                "event=publish module=publish status=error date={} error_code=artifact_missing path={}",
                date,
                source.display()
            );
            return Err(PublishError::MissingArtifact(source.clone()));
        }
    }

    let aliases = PublishedAliases {
        date_dir: layout.date_dir(date),
        seq_dir: layout.seq_dir(seq),
        latest_dir: layout.latest_dir(),
    };

    for (source, name) in &sources {
        copy_into(source, &aliases.date_dir, name)?;
    }
    for mirror in [&aliases.seq_dir, &aliases.latest_dir] {
        for (_, name) in &sources {
            copy_into(&aliases.date_dir.join(name), mirror, name)?;
        }
    }

    info!(
        "event=publish module=publish status=ok date={} seq={} duration_ms={}",
        date,
        seq,
        started_at.elapsed().as_millis()
    );
    Ok(aliases)
}

fn copy_into(source: &Path, dir: &Path, name: &str) -> PublishResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| PublishError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let target = dir.join(name);
    std::fs::copy(source, &target).map_err(|err| {
        error!(
            "event=publish module=publish status=error error_code=copy_failed path={} error={}",
            target.display(),
            err
        );
        PublishError::Io {
            path: target.clone(),
            source: err,
        }
    })?;
    Ok(())
}
