//! JSON-backed release manifest.
//!
//! # Responsibility
//! - Load `releases/manifest.json`, tolerating absent or damaged documents.
//! - Apply upserts in memory and rewrite the whole document on save.
//!
//! # Invariants
//! - Load never fails: absent or non-array content starts an empty manifest.
//! - Save always rewrites the full document atomically, pretty-printed with
//!   non-ASCII text kept literal.

use super::reconcile::{dedupe_keys, reconcile_with_evictions, Reconciled};
use crate::atomic_write::write_atomic;
use crate::model::release::ReleaseRecord;
use log::{error, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ManifestResult<T> = Result<T, ManifestError>;

#[derive(Debug)]
pub enum ManifestError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for ManifestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write manifest `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize manifest: {err}"),
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// In-memory manifest bound to its file path.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
    records: Vec<ReleaseRecord>,
}

impl ManifestStore {
    /// Loads the manifest at `path`, or starts empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(text) => parse_manifest(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(
                    "event=manifest_load module=manifest status=reset path={} error={}",
                    path.display(),
                    err
                );
                Vec::new()
            }
        };
        info!(
            "event=manifest_load module=manifest status=ok records={}",
            records.len()
        );
        Self { path, records }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in manifest order (date descending after any upsert).
    pub fn records(&self) -> &[ReleaseRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ReleaseRecord> {
        self.records
    }

    /// Inserts or replaces the release, returning the records it displaced.
    pub fn upsert(&mut self, record: ReleaseRecord) -> Vec<ReleaseRecord> {
        let existing = std::mem::take(&mut self.records);
        let Reconciled { records, evicted } = reconcile_with_evictions(existing, record);
        self.records = records;
        info!(
            "event=manifest_upsert module=manifest status=ok records={} evicted={}",
            self.records.len(),
            evicted.len()
        );
        evicted
    }

    /// Rewrites the whole manifest document.
    ///
    /// # Errors
    /// - Returns [`ManifestError::Io`] when the document cannot be written.
    pub fn save(&self) -> ManifestResult<()> {
        let json = to_manifest_json(&self.records)?;
        write_atomic(&self.path, json.as_bytes()).map_err(|source| {
            error!(
                "event=manifest_save module=manifest status=error path={} error={}",
                self.path.display(),
                source
            );
            ManifestError::Io {
                path: self.path.clone(),
                source,
            }
        })?;
        info!(
            "event=manifest_save module=manifest status=ok records={}",
            self.records.len()
        );
        Ok(())
    }
}

/// Decodes manifest text leniently.
///
/// Non-array or unparsable documents yield an empty list; individual entries
/// that cannot be decoded are dropped while the rest survive. Entries that
/// repeat an earlier entry's `date` or `seq` are dropped too.
pub fn parse_manifest(text: &str) -> Vec<ReleaseRecord> {
    let entries = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            warn!("event=manifest_parse module=manifest status=reset reason=not_an_array");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=manifest_parse module=manifest status=reset reason=invalid_json error={}",
                err
            );
            return Vec::new();
        }
    };

    let total = entries.len();
    let records = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ReleaseRecord>(entry).ok())
        .collect::<Vec<_>>();
    if records.len() != total {
        warn!(
            "event=manifest_parse module=manifest status=partial dropped={}",
            total - records.len()
        );
    }
    let (records, duplicates) = dedupe_keys(records);
    if !duplicates.is_empty() {
        warn!(
            "event=manifest_parse module=manifest status=partial duplicates={}",
            duplicates.len()
        );
    }
    records
}

/// Pretty-printed manifest document (two-space indent, literal UTF-8).
pub fn to_manifest_json(records: &[ReleaseRecord]) -> ManifestResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::{parse_manifest, to_manifest_json};
    use crate::model::release::ReleaseRecord;

    #[test]
    fn parse_rejects_non_array_documents() {
        assert!(parse_manifest(r#"{"date":"20250101"}"#).is_empty());
        assert!(parse_manifest("not json").is_empty());
        assert!(parse_manifest("").is_empty());
    }

    #[test]
    fn parse_drops_only_undecodable_entries() {
        let records = parse_manifest(
            r#"[{"date":"20250102","seq":"2","title":"a","desc":""}, 42, {"seq":"1"}]"#,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "20250102");
    }

    #[test]
    fn json_keeps_non_ascii_literal() {
        let json = to_manifest_json(&[ReleaseRecord {
            date: "20250101".to_string(),
            seq: "1".to_string(),
            title: "Écho — 光".to_string(),
            desc: String::new(),
        }])
        .unwrap();
        assert!(json.contains("Écho — 光"));
        assert!(json.contains("\n  {\n    \"date\": \"20250101\""));
    }
}
