//! Dual-key upsert of release records.
//!
//! # Invariants
//! - After [`reconcile`], no two records share a `date` and no two share a `seq`.
//! - Output is sorted by `date` descending; ties keep their prior order.

use crate::model::release::ReleaseRecord;
use std::collections::HashSet;

/// Result of one upsert: the new collection plus whatever it displaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub records: Vec<ReleaseRecord>,
    pub evicted: Vec<ReleaseRecord>,
}

/// Inserts `new_record`, evicting every record that shares its date or seq.
///
/// One insert may evict two different records (one per key). Duplicate keys
/// already present in `records` are collapsed to their first occurrence.
pub fn reconcile(records: Vec<ReleaseRecord>, new_record: ReleaseRecord) -> Vec<ReleaseRecord> {
    reconcile_with_evictions(records, new_record).records
}

pub fn reconcile_with_evictions(
    records: Vec<ReleaseRecord>,
    new_record: ReleaseRecord,
) -> Reconciled {
    let (mut evicted, kept): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|existing| existing.shares_key_with(&new_record));
    let (mut kept, duplicates) = dedupe_keys(kept);
    evicted.extend(duplicates);

    kept.push(new_record);
    sort_by_date_desc(&mut kept);
    Reconciled {
        records: kept,
        evicted,
    }
}

/// Keeps the first record for each `date` and each `seq`, in order.
///
/// Returns `(kept, dropped)`. A dropped record does not claim its keys, so a
/// later record may still keep a seq that only a dropped record carried.
pub fn dedupe_keys(records: Vec<ReleaseRecord>) -> (Vec<ReleaseRecord>, Vec<ReleaseRecord>) {
    let mut dates = HashSet::new();
    let mut seqs = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());
    let mut dropped = Vec::new();
    for record in records {
        if dates.contains(&record.date) || seqs.contains(&record.seq) {
            dropped.push(record);
            continue;
        }
        dates.insert(record.date.clone());
        seqs.insert(record.seq.clone());
        kept.push(record);
    }
    (kept, dropped)
}

/// Sorts by `date` descending using plain string order.
///
/// Correct only for fixed-width `YYYYMMDD` dates, which the model enforces
/// for every record it creates.
pub fn sort_by_date_desc(records: &mut [ReleaseRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
