//! Use-case service layer.
//!
//! # Responsibility
//! - Compose model, cover, manifest, catalog and publish modules into the
//!   operations the command-line tools expose.
//!
//! # See also
//! - docs/architecture/pipeline.md

pub mod release_service;
