use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Core internal coordinate system (0-based)
/// `col` counts UTF-16 code units, the unit browsers and editors use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub line: usize,
    pub col: usize,
}

/// One addressable document in the wiki.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable short identifier, unique across the catalog
    pub id: String,
    /// Human-readable display name
    pub title: String,
    /// Source file name (e.g. `design.md`), the join key for link resolution
    pub file_name: String,
    /// Canonical navigable path
    pub route: String,
}

/// Classified, routing-ready form of a raw link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedLink {
    /// Opens in a new context, no internal resolution
    External { url: String },
    /// Same-document scroll target
    Anchor { fragment: String },
    /// A catalog entry's route, optionally with an in-page fragment
    Internal {
        route: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fragment: Option<String>,
    },
    /// Relative reference with no catalog match, rendered as a plain link
    Unrecognized { original: String },
}

impl ResolvedLink {
    /// Navigation target the presentation layer should use for this link.
    pub fn href(&self) -> String {
        match self {
            ResolvedLink::External { url } => url.clone(),
            ResolvedLink::Anchor { fragment } => format!("#{}", fragment),
            ResolvedLink::Internal {
                route,
                fragment: Some(fragment),
            } => format!("{}#{}", route, fragment),
            ResolvedLink::Internal { route, .. } => route.clone(),
            ResolvedLink::Unrecognized { original } => original.clone(),
        }
    }
}

/// Scroll metadata attached to same-document anchor links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollBehavior {
    /// Vertical clearance (px) kept above the destination for the fixed header
    pub offset: u32,
    pub smooth: bool,
}

impl ScrollBehavior {
    pub const DEFAULT_OFFSET: u32 = 96;
}

impl Default for ScrollBehavior {
    fn default() -> Self {
        Self {
            offset: Self::DEFAULT_OFFSET,
            smooth: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum CodeStyle {
    Inline,
    Block {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAlignment {
    None,
    Left,
    Center,
    Right,
}

/// One element of the parsed document tree.
///
/// Parents own their children; there are no back references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentNode {
    Root {
        children: Vec<ContentNode>,
    },
    Heading {
        level: u8,
        /// `None` when the heading text produces an empty slug
        anchor_id: Option<String>,
        children: Vec<ContentNode>,
    },
    Paragraph {
        children: Vec<ContentNode>,
    },
    List {
        /// Start number for ordered lists, `None` for bullet lists
        start: Option<u64>,
        children: Vec<ContentNode>,
    },
    ListItem {
        /// Task list state, `None` for plain items
        checked: Option<bool>,
        children: Vec<ContentNode>,
    },
    Code {
        code: String,
        style: CodeStyle,
    },
    Quote {
        children: Vec<ContentNode>,
    },
    Link {
        target: String,
        title: Option<String>,
        resolved: ResolvedLink,
        scroll: Option<ScrollBehavior>,
        position: Point,
        children: Vec<ContentNode>,
    },
    Image {
        source: String,
        title: Option<String>,
        /// Plain text of the description
        alt: String,
        /// Parsed description; links inside it stay visible to traversal
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<ContentNode>,
    },
    Emphasis {
        children: Vec<ContentNode>,
    },
    Strong {
        children: Vec<ContentNode>,
    },
    Strikethrough {
        children: Vec<ContentNode>,
    },
    Table {
        alignments: Vec<ColumnAlignment>,
        children: Vec<ContentNode>,
    },
    TableHead {
        children: Vec<ContentNode>,
    },
    TableRow {
        children: Vec<ContentNode>,
    },
    TableCell {
        children: Vec<ContentNode>,
    },
    Text {
        text: String,
    },
    SoftBreak,
    HardBreak,
    Rule,
    Html {
        html: String,
    },
    FootnoteReference {
        label: String,
    },
    FootnoteDefinition {
        label: String,
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Root { children }
            | ContentNode::Heading { children, .. }
            | ContentNode::Paragraph { children }
            | ContentNode::List { children, .. }
            | ContentNode::ListItem { children, .. }
            | ContentNode::Quote { children }
            | ContentNode::Link { children, .. }
            | ContentNode::Image { children, .. }
            | ContentNode::Emphasis { children }
            | ContentNode::Strong { children }
            | ContentNode::Strikethrough { children }
            | ContentNode::Table { children, .. }
            | ContentNode::TableHead { children }
            | ContentNode::TableRow { children }
            | ContentNode::TableCell { children }
            | ContentNode::FootnoteDefinition { children, .. } => children,
            ContentNode::Code { .. }
            | ContentNode::Text { .. }
            | ContentNode::SoftBreak
            | ContentNode::HardBreak
            | ContentNode::Rule
            | ContentNode::Html { .. }
            | ContentNode::FootnoteReference { .. } => &[],
        }
    }

    /// Pre-order traversal over this node and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ContentNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// Table of contents entry for one heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingSummary {
    pub level: u8,
    pub text: String,
    pub anchor_id: Option<String>,
}

/// Result of one render call. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub document_id: String,
    pub title: Option<String>,
    pub frontmatter: Option<serde_json::Value>,
    pub root: ContentNode,
    pub headings: Vec<HeadingSummary>,
    /// SHA-256 hex digest of the source text
    pub digest: String,
}

impl Document {
    /// All link nodes in document order
    pub fn links(&self) -> Vec<&ContentNode> {
        let mut links = Vec::new();
        self.root.walk(&mut |node| {
            if matches!(node, ContentNode::Link { .. }) {
                links.push(node);
            }
        });
        links
    }

    pub fn anchor_ids(&self) -> HashSet<&str> {
        self.headings
            .iter()
            .filter_map(|h| h.anchor_id.as_deref())
            .collect()
    }
}
