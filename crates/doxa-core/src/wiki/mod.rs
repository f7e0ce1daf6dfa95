//! Wiki page service
//!
//! Ties the catalog, the content store and the renderer together: maps a
//! request path to a page, loads its markdown and renders it with navigation
//! data for the presentation layer.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::{SiteConfig, WikiConfig};
use crate::error::{CatalogError, WikiError};
use crate::model::{CatalogEntry, Document};
use crate::render::Renderer;
use crate::store::ContentStore;

mod audit;

#[cfg(test)]
mod tests;

pub use audit::{Diagnostic, DiagnosticSeverity};

/// Sidebar entry for one catalog page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: String,
    pub title: String,
    pub route: String,
    pub active: bool,
}

/// A loaded and rendered wiki page
#[derive(Debug, Clone, Serialize)]
pub struct WikiPage {
    pub entry: CatalogEntry,
    pub document: Document,
    pub edit_url: Option<String>,
    pub navigation: Vec<NavEntry>,
}

pub struct Wiki {
    config: WikiConfig,
    catalog: Catalog,
    store: Box<dyn ContentStore>,
}

impl Wiki {
    pub fn new(config: WikiConfig, catalog: Catalog, store: Box<dyn ContentStore>) -> Self {
        Self {
            config,
            catalog,
            store,
        }
    }

    /// Build from a site configuration, validating its catalog
    pub fn from_config(
        config: &SiteConfig,
        store: Box<dyn ContentStore>,
    ) -> Result<Self, CatalogError> {
        Ok(Self::new(config.wiki.clone(), config.catalog()?, store))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.catalog).with_scroll_offset(self.config.scroll_offset)
    }

    /// Page id for a request path.
    ///
    /// - The base route, or any path outside it, maps to the index page
    /// - A catalog route maps to that entry
    /// - `<base>/<rest>` maps to `<rest>`, known or not
    pub fn page_id_for_path(&self, path: &str) -> String {
        let path = path.trim_end_matches('/');
        let base = self.config.base_route.trim_end_matches('/');

        if path == base {
            return self.config.index_page.clone();
        }
        if let Some(entry) = self.catalog.by_route(path) {
            return entry.id.clone();
        }

        match path.strip_prefix(base).and_then(|rest| rest.strip_prefix('/')) {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => self.config.index_page.clone(),
        }
    }

    /// Load and render one page by id.
    pub fn load_page(&self, page_id: &str) -> Result<WikiPage, WikiError> {
        let entry = self
            .catalog
            .by_id(page_id)
            .ok_or_else(|| WikiError::PageNotFound {
                id: page_id.to_string(),
            })?;

        let document = self.load_document(entry)?;

        Ok(WikiPage {
            entry: entry.clone(),
            document,
            edit_url: self.edit_url(Some(&entry.file_name)),
            navigation: self.navigation(&entry.id),
        })
    }

    /// Load and render the page a request path points at.
    pub fn load_path(&self, path: &str) -> Result<WikiPage, WikiError> {
        self.load_page(&self.page_id_for_path(path))
    }

    pub(crate) fn load_document(&self, entry: &CatalogEntry) -> Result<Document, WikiError> {
        let text = self
            .store
            .read_document(&entry.file_name)
            .map_err(|source| WikiError::Content {
                file_name: entry.file_name.clone(),
                source,
            })?;
        Ok(self.renderer().render(&text, &entry.id))
    }

    /// Every catalog page in order, marking the current one
    pub fn navigation(&self, current_id: &str) -> Vec<NavEntry> {
        self.catalog
            .iter()
            .map(|entry| NavEntry {
                id: entry.id.clone(),
                title: entry.title.clone(),
                route: entry.route.clone(),
                active: entry.id == current_id,
            })
            .collect()
    }

    /// Source edit link for a file, falling back to the index page's file.
    pub fn edit_url(&self, file_name: Option<&str>) -> Option<String> {
        let base = self.config.edit_base_url.as_deref()?;
        let file_name = match file_name {
            Some(name) => name.to_string(),
            None => self
                .catalog
                .by_id(&self.config.index_page)
                .map(|entry| entry.file_name.clone())
                .unwrap_or_else(|| format!("{}.md", self.config.index_page)),
        };
        Some(format!("{}/{}", base.trim_end_matches('/'), file_name))
    }
}
