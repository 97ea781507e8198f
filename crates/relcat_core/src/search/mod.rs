//! Ranked catalog search.
//!
//! # Responsibility
//! - Rank manifest records against a free-text query in three tiers.
//! - Serve as the reference for the ranking the catalog page script runs.
//!
//! # See also
//! - docs/architecture/catalog.md

pub mod rank;
