//! Link classification and routing.
//!
//! Raw link targets found in a document are classified, in priority order, as
//! external URLs, same-document anchors, or references to catalog documents.
//! Relative references use a flat namespace: one leading `./` and
//! one leading `../` are stripped and the remainder is matched against catalog
//! file names. Nested paths are not resolved and come out as
//! [`ResolvedLink::Unrecognized`].

use crate::catalog::{strip_markdown_extension, Catalog};
use crate::model::ResolvedLink;

const EXTERNAL_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];

fn has_external_scheme(raw: &str) -> bool {
    EXTERNAL_SCHEMES.iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Strip one leading `./`, one leading `../` and a trailing markdown extension.
///
/// ```
/// use doxa_core::normalize_target;
///
/// assert_eq!(normalize_target("./design.md"), "design");
/// assert_eq!(normalize_target("../overview.md"), "overview");
/// assert_eq!(normalize_target("validation"), "validation");
/// ```
pub fn normalize_target(raw: &str) -> &str {
    let name = raw.strip_prefix("./").unwrap_or(raw);
    let name = name.strip_prefix("../").unwrap_or(name);
    strip_markdown_extension(name)
}

/// Classify a raw link target against the catalog.
///
/// Never fails: a relative target with no catalog match is returned as
/// [`ResolvedLink::Unrecognized`] carrying the original string.
pub fn resolve_link(raw: &str, catalog: &Catalog) -> ResolvedLink {
    if has_external_scheme(raw) {
        return ResolvedLink::External {
            url: raw.to_string(),
        };
    }

    if let Some(fragment) = raw.strip_prefix('#') {
        return ResolvedLink::Anchor {
            fragment: fragment.to_string(),
        };
    }

    let (path, fragment) = match raw.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (raw, None),
    };

    match catalog.by_stem(normalize_target(path)) {
        Some(entry) => ResolvedLink::Internal {
            route: entry.route.clone(),
            fragment: fragment.filter(|f| !f.is_empty()).map(str::to_string),
        },
        None => {
            log::debug!("No catalog entry for link target '{}'", raw);
            ResolvedLink::Unrecognized {
                original: raw.to_string(),
            }
        }
    }
}
