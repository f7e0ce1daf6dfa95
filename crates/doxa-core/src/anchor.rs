use crate::model::ContentNode;

/// Slugify heading text into an anchor id.
///
/// Rules:
/// - Convert to lowercase
/// - Every maximal run of characters outside `[a-z0-9]` becomes one hyphen
/// - Trim leading/trailing hyphens
///
/// Identical text always yields the identical id. Ids are not unique: two
/// headings with the same text share one id.
///
/// # Examples
///
/// ```
/// use doxa_core::slugify;
///
/// assert_eq!(slugify("Design Specifications"), "design-specifications");
/// assert_eq!(slugify("API / Overview!!"), "api-overview");
/// assert_eq!(slugify("  Step 2: Calibrate  "), "step-2-calibrate");
/// assert_eq!(slugify("!!!"), ""); // Empty slug for pure punctuation
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Anchor id for a heading given its inline fragments (plain text and the
/// text of nested emphasis). Fragments are concatenated as-is.
pub fn anchor_id<S: AsRef<str>>(fragments: &[S]) -> String {
    let text: String = fragments.iter().map(|f| f.as_ref()).collect();
    slugify(&text)
}

/// Collect the visible text of a node list.
///
/// Inline code contributes its content, line breaks a single space.
pub fn flatten_text(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        collect_text(node, &mut out);
    }
    out
}

fn collect_text(node: &ContentNode, out: &mut String) {
    match node {
        ContentNode::Text { text } => out.push_str(text),
        ContentNode::Code { code, .. } => out.push_str(code),
        ContentNode::SoftBreak | ContentNode::HardBreak => out.push(' '),
        ContentNode::Image { alt, .. } => out.push_str(alt),
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}
