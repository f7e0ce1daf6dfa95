//! Command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use doxa_core::{DirectoryStore, SiteConfig, Wiki};

pub mod check;
pub mod config;
pub mod link;
pub mod page;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "doxa.yaml";

/// Loaded site configuration plus where it came from
pub struct Site {
    pub config: SiteConfig,
    /// Config file in use, `None` for built-in defaults
    pub source: Option<PathBuf>,
    /// Directory the content root is resolved against
    pub base_dir: PathBuf,
}

impl Site {
    /// Load an explicit config file, else `./doxa.yaml`, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };

        let Some(path) = path else {
            return Ok(Self {
                config: SiteConfig::default(),
                source: None,
                base_dir: PathBuf::from("."),
            });
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = SiteConfig::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        let base_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            config,
            source: Some(path),
            base_dir,
        })
    }

    /// Absolute-or-relative directory holding the markdown sources
    pub fn content_root(&self) -> PathBuf {
        self.base_dir.join(&self.config.wiki.content_root)
    }

    /// Open the wiki over the content directory
    pub fn wiki(&self) -> Result<Wiki> {
        let store = DirectoryStore::new(self.content_root());
        Wiki::from_config(&self.config, Box::new(store)).context("Invalid catalog in configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
wiki:
  base_route: /wiki
  content_root: pages
catalog:
  - id: index
    title: Home
    file_name: index.md
    route: /wiki
  - id: setup
    title: Setup
    file_name: setup.md
    route: /wiki/setup
logging:
  level: debug
"#;

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doxa.yaml");
        fs::write(&path, CONFIG).unwrap();

        let site = Site::load(Some(&path)).unwrap();
        assert_eq!(site.source.as_deref(), Some(path.as_path()));
        assert_eq!(site.config.logging.level, "debug");
        assert_eq!(site.content_root(), temp_dir.path().join("pages"));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.yaml");
        assert!(Site::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doxa.yaml");
        fs::write(&path, "wiki: [not, a, map]").unwrap();
        assert!(Site::load(Some(&path)).is_err());
    }

    #[test]
    fn test_wiki_reads_from_content_root() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doxa.yaml");
        fs::write(&path, CONFIG).unwrap();
        fs::create_dir(temp_dir.path().join("pages")).unwrap();
        fs::write(temp_dir.path().join("pages").join("index.md"), "# Home\n\n[Setup](setup.md)").unwrap();

        let site = Site::load(Some(&path)).unwrap();
        let wiki = site.wiki().unwrap();
        let page = wiki.load_path("/wiki").unwrap();
        assert_eq!(page.entry.id, "index");
        assert_eq!(page.document.links().len(), 1);
    }

    #[test]
    fn test_duplicate_catalog_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doxa.yaml");
        fs::write(&path, CONFIG.replace("id: setup", "id: index")).unwrap();

        let site = Site::load(Some(&path)).unwrap();
        assert!(site.wiki().is_err());
    }

    #[test]
    fn test_demo_site_is_clean() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/doxa.yaml");
        let site = Site::load(Some(&path)).unwrap();
        let wiki = site.wiki().unwrap();

        let diagnostics = wiki.audit();
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);

        let page = wiki.load_page("overview").unwrap();
        assert_eq!(page.document.title.as_deref(), Some("Project Overview"));
    }
}
