//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use doxa_core::model::HeadingSummary;
use doxa_core::wiki::NavEntry;
use doxa_core::{CatalogEntry, Diagnostic, DiagnosticSeverity, ResolvedLink};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print any serializable value as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing output: {}", e),
        }
    }

    /// Print the catalog as the wiki sidebar would list it
    pub fn print_pages(&self, pages: &[NavEntry]) {
        match self.format {
            OutputFormat::Human => {
                if pages.is_empty() {
                    println!("No pages in catalog.");
                    return;
                }
                let width = pages.iter().map(|p| p.id.len()).max().unwrap_or(0);
                for page in pages {
                    let marker = if page.active { "*" } else { " " };
                    println!(
                        "{} {:<width$}  {}  ({})",
                        marker,
                        page.id,
                        page.title,
                        page.route,
                        width = width
                    );
                }
            }
            OutputFormat::Json => self.print_json(pages),
            OutputFormat::Quiet => {
                for page in pages {
                    println!("{}", page.id);
                }
            }
        }
    }

    pub fn print_page_header(&self, entry: &CatalogEntry, edit_url: Option<&str>) {
        if let OutputFormat::Human = self.format {
            eprintln!("{} ({})", entry.title, entry.route);
            if let Some(url) = edit_url {
                eprintln!("Edit on GitHub: {}", url);
            }
        }
    }

    pub fn print_toc(&self, headings: &[HeadingSummary]) {
        match self.format {
            OutputFormat::Json => self.print_json(headings),
            _ => {
                for heading in headings {
                    let indent = "  ".repeat(heading.level.saturating_sub(1) as usize);
                    match &heading.anchor_id {
                        Some(id) => println!("{}- {} (#{})", indent, heading.text, id),
                        None => println!("{}- {}", indent, heading.text),
                    }
                }
            }
        }
    }

    /// Print link classifications, one per target
    pub fn print_resolved(&self, results: &[(String, ResolvedLink)]) {
        match self.format {
            OutputFormat::Human => {
                for (target, resolved) in results {
                    let description = match resolved {
                        ResolvedLink::External { url } => format!("external  {}", url),
                        ResolvedLink::Anchor { fragment } => format!("anchor    #{}", fragment),
                        ResolvedLink::Internal { .. } => {
                            format!("internal  {}", resolved.href())
                        }
                        ResolvedLink::Unrecognized { original } => {
                            format!("unrecognized  {}", original)
                        }
                    };
                    println!("{} -> {}", target, description);
                }
            }
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(target, resolved)| {
                        serde_json::json!({ "target": target, "resolved": resolved })
                    })
                    .collect();
                self.print_json(&values);
            }
            OutputFormat::Quiet => {
                for (_, resolved) in results {
                    println!("{}", resolved.href());
                }
            }
        }
    }

    pub fn print_anchors(&self, results: &[(String, String)]) {
        match self.format {
            OutputFormat::Human => {
                for (text, anchor) in results {
                    println!("{} -> #{}", text, anchor);
                }
            }
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(text, anchor)| serde_json::json!({ "text": text, "anchor_id": anchor }))
                    .collect();
                self.print_json(&values);
            }
            OutputFormat::Quiet => {
                for (_, anchor) in results {
                    println!("{}", anchor);
                }
            }
        }
    }

    pub fn print_diagnostics(&self, diagnostics: &[Diagnostic]) {
        match self.format {
            OutputFormat::Human => {
                if diagnostics.is_empty() {
                    println!("No problems found.");
                    return;
                }
                for diagnostic in diagnostics {
                    let severity = match diagnostic.severity {
                        DiagnosticSeverity::Info => "info",
                        DiagnosticSeverity::Warning => "warning",
                        DiagnosticSeverity::Error => "error",
                    };
                    match diagnostic.position {
                        Some(point) => println!(
                            "{}:{}:{}: {}: {}",
                            diagnostic.file_name,
                            point.line + 1,
                            point.col + 1,
                            severity,
                            diagnostic.message
                        ),
                        None => println!(
                            "{}: {}: {}",
                            diagnostic.file_name, severity, diagnostic.message
                        ),
                    }
                }
            }
            OutputFormat::Json => self.print_json(diagnostics),
            OutputFormat::Quiet => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }
}
