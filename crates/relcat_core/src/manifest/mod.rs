//! Release manifest persistence and reconciliation.
//!
//! # Responsibility
//! - Keep `releases/manifest.json` consistent across runs.
//! - Separate the pure upsert rule ([`reconcile`]) from file handling
//!   ([`store`]).
//!
//! # Invariants
//! - At most one record per date and one per seq at all times.
//! - The document is always rewritten whole, never appended to.
//!
//! # See also
//! - docs/architecture/manifest.md

pub mod reconcile;
pub mod store;

pub use reconcile::{
    dedupe_keys, reconcile, reconcile_with_evictions, sort_by_date_desc, Reconciled,
};
pub use store::{parse_manifest, to_manifest_json, ManifestError, ManifestResult, ManifestStore};
