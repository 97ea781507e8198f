//! Domain model for published releases.
//!
//! # Responsibility
//! - Define the record shape persisted in `releases/manifest.json`.
//! - Keep key validation (`date`, `seq`) next to the types it protects.
//!
//! # Invariants
//! - Every release is identified jointly by a date and a sequence number.
//!
//! # See also
//! - docs/architecture/manifest.md

pub mod release;
