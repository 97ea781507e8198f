//! Release domain model.
//!
//! # Responsibility
//! - Define the canonical manifest record for one published release.
//! - Validate the two release keys (`date`, `seq`) before they reach disk.
//!
//! # Invariants
//! - A publishable date is exactly 8 ASCII digits (`YYYYMMDD`), so plain
//!   string ordering equals chronological ordering.
//! - A sequence number is rendered as a decimal string without leading zeros.
//! - `desc` is never longer than 400 characters.
//!
//! # See also
//! - docs/architecture/manifest.md

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Required width of a canonical release date.
pub const RELEASE_DATE_LEN: usize = 8;

/// Validated `YYYYMMDD` release date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseDate(String);

impl ReleaseDate {
    /// Parses a publishable release date.
    ///
    /// # Errors
    /// - Returns [`ReleaseValidationError::InvalidDate`] unless the trimmed
    ///   input is exactly 8 ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, ReleaseValidationError> {
        let trimmed = raw.trim();
        if trimmed.len() != RELEASE_DATE_LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ReleaseValidationError::InvalidDate(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Today's date in UTC.
    pub fn today_utc() -> Self {
        Self(Utc::now().format("%Y%m%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ReleaseDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical release sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seq(u32);

impl Seq {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Parses a sequence number, dropping leading zeros.
    ///
    /// # Errors
    /// - Returns [`ReleaseValidationError::InvalidSeq`] for empty, signed,
    ///   non-decimal or out-of-range input.
    pub fn parse(raw: &str) -> Result<Self, ReleaseValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ReleaseValidationError::InvalidSeq(raw.to_string()));
        }
        trimmed
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ReleaseValidationError::InvalidSeq(raw.to_string()))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Display for Seq {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the persisted release manifest.
///
/// Fields stay plain strings so a manifest written by older tooling (or by
/// hand) still loads; validation happens on the way in through
/// [`ReleaseRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub date: String,
    /// Older manifests stored this as a JSON number.
    #[serde(deserialize_with = "seq_from_string_or_number")]
    pub seq: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

impl ReleaseRecord {
    /// Builds a record from validated keys.
    pub fn new(
        date: &ReleaseDate,
        seq: Seq,
        title: impl Into<String>,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            date: date.as_str().to_string(),
            seq: seq.to_string(),
            title: title.into(),
            desc: desc.into(),
        }
    }

    /// Returns whether this record collides with `other` on either key.
    pub fn shares_key_with(&self, other: &ReleaseRecord) -> bool {
        self.date == other.date || self.seq == other.seq
    }
}

fn seq_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSeq {
        Text(String),
        Number(u64),
    }

    Ok(match RawSeq::deserialize(deserializer)? {
        RawSeq::Text(value) => value,
        RawSeq::Number(value) => value.to_string(),
    })
}

/// Validation errors for release keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseValidationError {
    InvalidDate(String),
    InvalidSeq(String),
}

impl Display for ReleaseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "release date `{value}` is invalid (expected YYYYMMDD)")
            }
            Self::InvalidSeq(value) => write!(
                f,
                "release sequence `{value}` is invalid (expected a non-negative integer)"
            ),
        }
    }
}

impl Error for ReleaseValidationError {}
