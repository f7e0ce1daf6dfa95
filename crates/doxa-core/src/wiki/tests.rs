use super::*;
use crate::error::ContentError;
use crate::model::{ContentNode, ResolvedLink};
use crate::store::{DirectoryStore, MemoryStore};
use std::fs;
use tempfile::TempDir;

fn create_test_wiki(store: impl ContentStore + 'static) -> Wiki {
    let config = SiteConfig::default();
    Wiki::from_config(&config, Box::new(store)).unwrap()
}

fn sample_store() -> MemoryStore {
    MemoryStore::new()
        .with_document(
            "index.md",
            "# Wiki Home\n\nStart with the [overview](./overview.md).\n",
        )
        .with_document(
            "overview.md",
            "# Project Overview\n\n## Goals\n\nSee [design](design.md#pump-assembly) \
             and [goals](#goals).\n",
        )
        .with_document(
            "design.md",
            "# Design Specifications\n\n## Pump Assembly\n\nBack to [home](../index.md).\n",
        )
        .with_document("validation.md", "# Validation Protocols\n")
}

#[test]
fn test_page_id_for_path() {
    let wiki = create_test_wiki(sample_store());

    assert_eq!(wiki.page_id_for_path("/projects/OpenPipette/wiki"), "index");
    assert_eq!(wiki.page_id_for_path("/projects/OpenPipette/wiki/"), "index");
    assert_eq!(
        wiki.page_id_for_path("/projects/OpenPipette/wiki/design"),
        "design"
    );
    assert_eq!(
        wiki.page_id_for_path("/projects/OpenPipette/wiki/unknown"),
        "unknown"
    );
    assert_eq!(wiki.page_id_for_path("/projects"), "index");
    assert_eq!(wiki.page_id_for_path("/"), "index");
}

#[test]
fn test_load_page_renders_with_navigation() {
    let wiki = create_test_wiki(sample_store());
    let page = wiki.load_page("overview").unwrap();

    assert_eq!(page.entry.title, "Project Overview");
    assert_eq!(page.document.document_id, "overview");
    assert_eq!(page.document.title.as_deref(), Some("Project Overview"));
    assert_eq!(
        page.edit_url.as_deref(),
        Some("https://github.com/Doxa-Forge/OpenPipette/tree/main/web/public/content/projects/OpenPipette/wiki/overview.md")
    );

    let active: Vec<&str> = page
        .navigation
        .iter()
        .filter(|nav| nav.active)
        .map(|nav| nav.id.as_str())
        .collect();
    assert_eq!(active, vec!["overview"]);
    assert_eq!(page.navigation.len(), 4);

    let links = page.document.links();
    match links[0] {
        ContentNode::Link { resolved, .. } => assert_eq!(
            resolved,
            &ResolvedLink::Internal {
                route: "/projects/OpenPipette/wiki/design".to_string(),
                fragment: Some("pump-assembly".to_string()),
            }
        ),
        _ => unreachable!(),
    }
    match links[1] {
        ContentNode::Link { scroll, .. } => {
            assert_eq!(scroll.map(|s| s.offset), Some(96));
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_load_path() {
    let wiki = create_test_wiki(sample_store());
    let page = wiki.load_path("/projects/OpenPipette/wiki/design").unwrap();
    assert_eq!(page.entry.id, "design");

    let page = wiki.load_path("/projects/OpenPipette/wiki").unwrap();
    assert_eq!(page.entry.id, "index");
}

#[test]
fn test_unknown_page() {
    let wiki = create_test_wiki(sample_store());
    let err = wiki.load_page("unknown").unwrap_err();
    assert!(matches!(err, WikiError::PageNotFound { ref id } if id == "unknown"));
}

#[test]
fn test_missing_content_is_reported() {
    let store = MemoryStore::new().with_document("index.md", "# Home");
    let wiki = create_test_wiki(store);

    let err = wiki.load_page("design").unwrap_err();
    match err {
        WikiError::Content { file_name, source } => {
            assert_eq!(file_name, "design.md");
            assert!(matches!(source, ContentError::NotFound { .. }));
        }
        other => panic!("Expected content error, got {:?}", other),
    }
}

#[test]
fn test_edit_url_fallback() {
    let wiki = create_test_wiki(sample_store());
    assert!(wiki.edit_url(None).unwrap().ends_with("/wiki/index.md"));

    let mut config = SiteConfig::default();
    config.wiki.edit_base_url = None;
    let wiki = Wiki::from_config(&config, Box::new(sample_store())).unwrap();
    assert!(wiki.edit_url(Some("design.md")).is_none());
}

#[test]
fn test_custom_scroll_offset() {
    let mut config = SiteConfig::default();
    config.wiki.scroll_offset = 64;
    let wiki = Wiki::from_config(&config, Box::new(sample_store())).unwrap();

    let page = wiki.load_page("overview").unwrap();
    let offsets: Vec<u32> = page
        .document
        .links()
        .iter()
        .filter_map(|node| match node {
            ContentNode::Link { scroll, .. } => scroll.map(|s| s.offset),
            _ => None,
        })
        .collect();
    assert_eq!(offsets, vec![64]);
}

#[test]
fn test_audit_clean_wiki() {
    let wiki = create_test_wiki(sample_store());
    let diagnostics = wiki.audit();
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_audit_findings() {
    // validation.md is cataloged but missing; drafts.md is not cataloged
    let store = MemoryStore::new()
        .with_document(
            "index.md",
            "# Wiki Home\n\n[gone](nonexistent.md) [jump](#nowhere) \
             [deep](design.md#missing-section) [ok](design.md#pump-assembly)\n",
        )
        .with_document("overview.md", "# Project Overview\n")
        .with_document("design.md", "# Design Specifications\n\n## Pump Assembly\n")
        .with_document("drafts.md", "# Draft");
    let wiki = create_test_wiki(store);
    let diagnostics = wiki.audit();

    let errors: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].file_name, "validation.md");

    let warnings: Vec<&str> = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Warning)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(warnings.len(), 3, "{:?}", warnings);
    assert!(warnings[0].contains("nonexistent.md"));
    assert!(warnings[1].contains("#nowhere"));
    assert!(warnings[2].contains("missing-section"));

    let info: Vec<&str> = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Info)
        .map(|d| d.file_name.as_str())
        .collect();
    assert_eq!(info, vec!["drafts.md"]);

    let unrecognized = diagnostics
        .iter()
        .find(|d| d.message.contains("nonexistent.md"))
        .unwrap();
    assert_eq!(unrecognized.position.map(|p| p.line), Some(2));
}

#[test]
fn test_wiki_over_directory_store() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("index.md"), "# Wiki Home\n\n[Design](design.md)").unwrap();
    fs::write(temp_dir.path().join("design.md"), "# Design Specifications").unwrap();

    let config = SiteConfig::default();
    let wiki = Wiki::from_config(&config, Box::new(DirectoryStore::new(temp_dir.path()))).unwrap();

    let page = wiki.load_page("index").unwrap();
    assert_eq!(page.document.title.as_deref(), Some("Wiki Home"));
    assert!(matches!(
        wiki.load_page("validation"),
        Err(WikiError::Content { .. })
    ));
}

#[test]
fn test_audit_sees_links_in_image_descriptions() {
    let store = sample_store().with_document(
        "validation.md",
        "# Validation Protocols\n\n![rig [notes](rig-notes.md)](rig.png)\n",
    );
    let wiki = create_test_wiki(store);
    let diagnostics = wiki.audit();

    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Warning);
    assert_eq!(diagnostics[0].file_name, "validation.md");
    assert!(diagnostics[0].message.contains("rig-notes.md"));
}
