//! Three-tier ranking over `date`, `seq`, `title` and `desc`.
//!
//! # Responsibility
//! - Classify each record as an exact, prefix or substring match.
//! - Return matches grouped by tier in base manifest order.
//!
//! # Invariants
//! - Matching is case-insensitive on a trimmed query.
//! - Within a tier, relative order equals order in the input slice.
//! - A blank query returns every record in input order.

use crate::model::release::ReleaseRecord;

/// Match strength, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Query equals the sequence number.
    Exact,
    /// Query is a prefix of any searchable field.
    Starts,
    /// Query occurs anywhere in any searchable field.
    Contains,
}

fn search_fields(record: &ReleaseRecord) -> [String; 4] {
    [
        record.date.to_lowercase(),
        record.seq.to_lowercase(),
        record.title.to_lowercase(),
        record.desc.to_lowercase(),
    ]
}

/// Normalizes raw query input; `None` means "show everything".
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Tier of `record` for an already normalized query, or `None` when it
/// does not match at all.
pub fn match_tier(normalized_query: &str, record: &ReleaseRecord) -> Option<MatchTier> {
    let fields = search_fields(record);
    if fields[1] == normalized_query {
        return Some(MatchTier::Exact);
    }
    if fields.iter().any(|field| field.starts_with(normalized_query)) {
        return Some(MatchTier::Starts);
    }
    if fields.iter().any(|field| field.contains(normalized_query)) {
        return Some(MatchTier::Contains);
    }
    None
}

/// Ranks `records` for `query`.
///
/// Records are visited in input order and bucketed, so each tier is
/// already in base order without a second sort.
pub fn search_ranked<'a>(query: &str, records: &'a [ReleaseRecord]) -> Vec<&'a ReleaseRecord> {
    let Some(normalized) = normalize_query(query) else {
        return records.iter().collect();
    };

    let mut exact = Vec::new();
    let mut starts = Vec::new();
    let mut contains = Vec::new();
    for record in records {
        match match_tier(&normalized, record) {
            Some(MatchTier::Exact) => exact.push(record),
            Some(MatchTier::Starts) => starts.push(record),
            Some(MatchTier::Contains) => contains.push(record),
            None => {}
        }
    }

    exact.extend(starts);
    exact.extend(contains);
    exact
}
