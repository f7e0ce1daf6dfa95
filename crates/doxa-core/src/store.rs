use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::error::{ContentError, ContentResult};

/// Abstract source of raw content text, addressed by file name.
pub trait ContentStore: Send + Sync {
    /// Read the entire contents of a named document.
    fn read_document(&self, name: &str) -> ContentResult<String>;

    /// List all markdown documents, as names accepted by `read_document`.
    fn list_documents(&self) -> Vec<String>;
}

/// Reject names that are empty, absolute, or step outside the store root.
fn validate_name(name: &str) -> ContentResult<&Path> {
    let path = Path::new(name);
    let is_plain = !name.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

    if is_plain {
        Ok(path)
    } else {
        Err(ContentError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Content store backed by a directory, using std::fs and walkdir.
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentStore for DirectoryStore {
    fn read_document(&self, name: &str) -> ContentResult<String> {
        let path = self.root.join(validate_name(name)?);
        log::debug!("Reading content {:?}", path);
        std::fs::read_to_string(&path).map_err(|e| ContentError::from_io(e, name, path))
    }

    fn list_documents(&self) -> Vec<String> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                if let Ok(relative) = path.strip_prefix(&self.root) {
                    let name = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    names.push(name);
                }
            }
        }

        names.sort();
        names
    }
}

/// In-memory content store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.documents.insert(name.into(), content.into());
    }

    pub fn with_document(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }
}

impl ContentStore for MemoryStore {
    fn read_document(&self, name: &str) -> ContentResult<String> {
        validate_name(name)?;
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| ContentError::NotFound {
                name: name.to_string(),
            })
    }

    fn list_documents(&self) -> Vec<String> {
        self.documents
            .keys()
            .filter(|name| name.ends_with(".md"))
            .cloned()
            .collect()
    }
}

/// Load and parse a structured YAML content file (page copy, project lists).
pub fn load_yaml<T: DeserializeOwned>(store: &dyn ContentStore, name: &str) -> ContentResult<T> {
    let text = store.read_document(name)?;
    serde_yaml::from_str(&text).map_err(|source| ContentError::Yaml {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_directory_store_reads_and_lists() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("index.md"), "# Wiki Home").unwrap();
        fs::write(temp_dir.path().join("design.md"), "# Design").unwrap();
        fs::write(temp_dir.path().join("content.yml"), "title: Lab").unwrap();
        fs::create_dir(temp_dir.path().join("archive")).unwrap();
        fs::write(temp_dir.path().join("archive").join("old.md"), "old").unwrap();

        let store = DirectoryStore::new(temp_dir.path());
        assert_eq!(store.read_document("index.md").unwrap(), "# Wiki Home");
        assert_eq!(
            store.list_documents(),
            vec!["archive/old.md", "design.md", "index.md"]
        );
    }

    #[test]
    fn test_directory_store_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(temp_dir.path());

        let err = store.read_document("missing.md").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(temp_dir.path().join("wiki"));

        for name in ["../secret.md", "/etc/passwd", "", "a/../../b.md", "./index.md"] {
            assert!(
                matches!(
                    store.read_document(name),
                    Err(ContentError::InvalidName { .. })
                ),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new()
            .with_document("index.md", "# Home")
            .with_document("team.yml", "members: []");

        assert_eq!(store.read_document("index.md").unwrap(), "# Home");
        assert!(store.read_document("design.md").unwrap_err().is_not_found());
        assert_eq!(store.list_documents(), vec!["index.md"]);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct ProjectList {
        projects: Vec<Project>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Project {
        name: String,
        status: String,
    }

    #[test]
    fn test_load_yaml() {
        let store = MemoryStore::new().with_document(
            "projects.yml",
            "projects:\n  - name: OpenPipette\n    status: active\n",
        );

        let list: ProjectList = load_yaml(&store, "projects.yml").unwrap();
        assert_eq!(list.projects[0].name, "OpenPipette");
        assert_eq!(list.projects[0].status, "active");

        let store = MemoryStore::new().with_document("broken.yml", "projects: [unclosed");
        let err = load_yaml::<ProjectList>(&store, "broken.yml").unwrap_err();
        assert!(matches!(err, ContentError::Yaml { .. }));
    }
}
