//! Core logic for the release catalog.
//! This crate is the single source of truth for cover generation, manifest
//! invariants and catalog rendering.

pub mod atomic_write;
pub mod catalog;
pub mod config;
pub mod cover;
pub mod describe;
pub mod draft;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod publish;
pub mod search;
pub mod service;

pub use catalog::{escape_html, render_card, render_catalog_page, write_catalog};
pub use config::{CatalogConfig, CoverConfig, SiteLayout};
pub use cover::{encode_png, generate_cover, generate_cover_with_font, ArtSpec, CaptionFont};
pub use describe::{describe_readme_file, extract_description, MAX_DESCRIPTION_CHARS};
pub use draft::{DraftArtifacts, ReleaseDraft};
pub use logging::{init_logging, logging_status};
pub use manifest::{reconcile, ManifestStore};
pub use model::release::{ReleaseDate, ReleaseRecord, ReleaseValidationError, Seq};
pub use publish::{publish_aliases, PublishError, PublishedAliases};
pub use search::rank::{search_ranked, MatchTier};
pub use service::release_service::{
    ReleaseService, ReleaseServiceError, UpdatePagesReport, UpdatePagesRequest,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
