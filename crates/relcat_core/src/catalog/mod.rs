//! Browsable, searchable release catalog.
//!
//! # Responsibility
//! - Render manifest records as escaped cards.
//! - Produce the catalog `index.html` with client-side ranked search.
//!
//! # Invariants
//! - No user-supplied text reaches the page unescaped.
//!
//! # See also
//! - docs/architecture/catalog.md

pub mod card;
pub mod html;
pub mod page;

pub use card::{render_card, render_cards};
pub use html::escape_html;
pub use page::{render_catalog_page, write_catalog};
