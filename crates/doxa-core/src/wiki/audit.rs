use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::Wiki;
use crate::model::{ContentNode, Point, ResolvedLink};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    /// File the finding belongs to
    pub file_name: String,
    pub position: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Info,
    Warning,
    Error,
}

impl Wiki {
    /// Audit the whole wiki for link health.
    ///
    /// Scans for:
    /// 1. Pages whose content cannot be loaded
    /// 2. Links that match no catalog entry
    /// 3. Anchors (in-page or on internal links) that match no heading
    /// 4. Markdown documents in the store that no catalog entry names
    pub fn audit(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut rendered = Vec::new();

        for entry in self.catalog.iter() {
            match self.load_document(entry) {
                Ok(document) => rendered.push((entry, document)),
                Err(e) => diagnostics.push(Diagnostic {
                    severity: DiagnosticSeverity::Error,
                    message: format!("Content unavailable: {}", e),
                    file_name: entry.file_name.clone(),
                    position: None,
                }),
            }
        }

        let anchors_by_route: HashMap<&str, HashSet<&str>> = rendered
            .iter()
            .map(|(entry, document)| (entry.route.as_str(), document.anchor_ids()))
            .collect();

        for (entry, document) in &rendered {
            let own_anchors = document.anchor_ids();

            for link in document.links() {
                let ContentNode::Link {
                    resolved, position, ..
                } = link
                else {
                    continue;
                };

                let message = match resolved {
                    ResolvedLink::Unrecognized { original } => {
                        Some(format!("Unrecognized link: '{}' matches no wiki page.", original))
                    }
                    ResolvedLink::Anchor { fragment }
                        if !fragment.is_empty() && !own_anchors.contains(fragment.as_str()) =>
                    {
                        Some(format!("Invalid anchor: '#{}' matches no heading.", fragment))
                    }
                    ResolvedLink::Internal {
                        route,
                        fragment: Some(fragment),
                    } => match anchors_by_route.get(route.as_str()) {
                        Some(anchors) if !anchors.contains(fragment.as_str()) => Some(format!(
                            "Invalid anchor: '{}#{}' matches no heading in the target page.",
                            route, fragment
                        )),
                        _ => None,
                    },
                    _ => None,
                };

                if let Some(message) = message {
                    diagnostics.push(Diagnostic {
                        severity: DiagnosticSeverity::Warning,
                        message,
                        file_name: entry.file_name.clone(),
                        position: Some(*position),
                    });
                }
            }
        }

        let cataloged: HashSet<&str> = self
            .catalog
            .iter()
            .map(|entry| entry.file_name.as_str())
            .collect();
        for name in self.store.list_documents() {
            if !cataloged.contains(name.as_str()) {
                diagnostics.push(Diagnostic {
                    severity: DiagnosticSeverity::Info,
                    message: "Document is not listed in the catalog.".to_string(),
                    file_name: name,
                    position: None,
                });
            }
        }

        for diagnostic in &diagnostics {
            if diagnostic.severity != DiagnosticSeverity::Info {
                log::warn!("{}: {}", diagnostic.file_name, diagnostic.message);
            }
        }

        diagnostics
    }
}
