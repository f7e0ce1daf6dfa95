//! Doxa Core Library
//!
//! Wiki content pipeline: document catalog, heading anchors, link resolution
//! and markdown rendering into a typed content tree.
//! Everything except the content store is pure logic with no IO.
//!

pub mod anchor;
pub mod catalog;
mod config;
pub mod error;
pub mod html;
mod line_map;
pub mod model;
pub mod render;
pub mod resolver;
pub mod store;
pub mod wiki;

pub use anchor::{anchor_id, flatten_text, slugify};
pub use catalog::{strip_markdown_extension, Catalog};
pub use config::{LoggingConfig, SiteConfig, WikiConfig};
pub use error::{CatalogError, ContentError, WikiError};
pub use html::to_html;
pub use model::{CatalogEntry, ContentNode, Document, ResolvedLink};
pub use render::{render, Renderer};
pub use resolver::{normalize_target, resolve_link};
pub use store::{ContentStore, DirectoryStore, MemoryStore};
pub use wiki::{Diagnostic, DiagnosticSeverity, Wiki, WikiPage};
