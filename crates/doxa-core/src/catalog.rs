use std::collections::{HashMap, HashSet};

use crate::error::CatalogError;
use crate::model::CatalogEntry;

const MARKDOWN_EXTENSIONS: &[&str] = &[".md", ".markdown"];

/// Remove one trailing markdown extension (`.md` or `.markdown`).
///
/// ```
/// use doxa_core::strip_markdown_extension;
///
/// assert_eq!(strip_markdown_extension("design.md"), "design");
/// assert_eq!(strip_markdown_extension("notes.markdown"), "notes");
/// assert_eq!(strip_markdown_extension("design"), "design");
/// ```
pub fn strip_markdown_extension(name: &str) -> &str {
    MARKDOWN_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(*ext))
        .unwrap_or(name)
}

/// Read-only list of known wiki documents.
///
/// Built once from configuration and passed explicitly to the resolver and
/// renderer. Entry order is significant: lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog without checking for duplicates.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Build a catalog, rejecting duplicate ids and file names.
    pub fn validated(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut ids: HashSet<&str> = HashSet::new();
        let mut file_names: HashMap<&str, &str> = HashMap::new();

        for entry in &entries {
            if !ids.insert(&entry.id) {
                return Err(CatalogError::DuplicateId {
                    id: entry.id.clone(),
                });
            }
            if let Some(first) = file_names.insert(&entry.file_name, &entry.id) {
                return Err(CatalogError::DuplicateFileName {
                    file_name: entry.file_name.clone(),
                    first: first.to_string(),
                    second: entry.id.clone(),
                });
            }
        }

        Ok(Self::new(entries))
    }

    /// Load a catalog from a YAML list of entries
    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_yaml::from_str(content)?;
        Self::validated(entries)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.entries)
    }

    pub fn by_id(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn by_route(&self, route: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.route == route)
    }

    /// Find the first entry whose file name, without its markdown extension,
    /// equals `stem`.
    pub fn by_stem(&self, stem: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| strip_markdown_extension(&e.file_name) == stem)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self::new(entries)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn entry(id: &str, file_name: &str, route: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: id.to_string(),
            file_name: file_name.to_string(),
            route: route.to_string(),
        }
    }

    pub(crate) fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            entry("index", "index.md", "/wiki"),
            entry("overview", "overview.md", "/wiki/overview"),
            entry("design", "design.md", "/wiki/design"),
            entry("validation", "validation.md", "/wiki/validation"),
        ])
    }

    #[test]
    fn test_lookups() {
        let catalog = sample_catalog();

        assert_eq!(catalog.by_id("design").unwrap().file_name, "design.md");
        assert_eq!(catalog.by_route("/wiki").unwrap().id, "index");
        assert_eq!(catalog.by_stem("validation").unwrap().id, "validation");
        assert!(catalog.by_stem("validation.md").is_none());
        assert!(catalog.by_id("missing").is_none());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_first_match_wins_on_duplicate_file_names() {
        let catalog = Catalog::new(vec![
            entry("a", "shared.md", "/wiki/a"),
            entry("b", "shared.md", "/wiki/b"),
        ]);
        assert_eq!(catalog.by_stem("shared").unwrap().id, "a");
    }

    #[test]
    fn test_validated_rejects_duplicates() {
        let result = Catalog::validated(vec![
            entry("a", "shared.md", "/wiki/a"),
            entry("b", "shared.md", "/wiki/b"),
        ]);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateFileName { ref first, ref second, .. })
                if first == "a" && second == "b"
        ));

        let result = Catalog::validated(vec![
            entry("a", "one.md", "/wiki/a"),
            entry("a", "two.md", "/wiki/b"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId { .. })));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
- id: index
  title: Wiki Home
  file_name: index.md
  route: /projects/OpenPipette/wiki
- id: design
  title: Design Specifications
  file_name: design.md
  route: /projects/OpenPipette/wiki/design
"#;
        let catalog = Catalog::from_yaml(yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.by_id("design").unwrap().title, "Design Specifications");

        let round_trip = Catalog::from_yaml(&catalog.to_yaml().unwrap()).unwrap();
        assert_eq!(round_trip, catalog);
    }

    #[test]
    fn test_from_yaml_missing_field() {
        let yaml = "- id: index\n  title: Home\n";
        assert!(matches!(Catalog::from_yaml(yaml), Err(CatalogError::Yaml(_))));
    }
}
