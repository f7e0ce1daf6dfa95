use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{CatalogEntry, ScrollBehavior};

/// Top-level configuration for a Doxa site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub wiki: WikiConfig,
    /// Known wiki documents, in navigation order
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Wiki-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Route of the wiki index page; page routes live below it
    pub base_route: String,
    /// Directory holding the markdown sources (relative to the config file)
    pub content_root: PathBuf,
    /// Base URL for "edit this page" links; the file name is appended
    #[serde(default)]
    pub edit_base_url: Option<String>,
    /// Page shown when a path names no page
    #[serde(default = "default_index_page")]
    pub index_page: String,
    /// Header clearance (px) applied when scrolling to an in-page anchor
    #[serde(default = "default_scroll_offset")]
    pub scroll_offset: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_index_page() -> String {
    "index".to_string()
}

fn default_scroll_offset() -> u32 {
    ScrollBehavior::DEFAULT_OFFSET
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let base_route = "/projects/OpenPipette/wiki";
        let page = |id: &str, title: &str| CatalogEntry {
            id: id.to_string(),
            title: title.to_string(),
            file_name: format!("{}.md", id),
            route: if id == "index" {
                base_route.to_string()
            } else {
                format!("{}/{}", base_route, id)
            },
        };

        Self {
            wiki: WikiConfig {
                base_route: base_route.to_string(),
                content_root: PathBuf::from("content/projects/OpenPipette/wiki"),
                edit_base_url: Some(
                    "https://github.com/Doxa-Forge/OpenPipette/tree/main/web/public/content/projects/OpenPipette/wiki"
                        .to_string(),
                ),
                index_page: default_index_page(),
                scroll_offset: default_scroll_offset(),
            },
            catalog: vec![
                page("index", "Wiki Home"),
                page("overview", "Project Overview"),
                page("design", "Design Specifications"),
                page("validation", "Validation Protocols"),
            ],
            logging: LoggingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load config from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Build the validated document catalog
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::validated(self.catalog.clone())
    }
}
