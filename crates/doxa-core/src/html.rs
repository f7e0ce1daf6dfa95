//! HTML presentation of a rendered [`Document`].
//!
//! Routing decisions come from each link's [`ResolvedLink`]:
//! - Internal links point at the catalog route
//! - External links open in a new browsing context
//! - Anchor links keep their fragment and expose the scroll offset as
//!   `data-scroll-offset` for the client-side smooth scroll
//! - Unrecognized links stay plain hyperlinks to the original target
//!
//! Output carries no classes or inline styles. Raw HTML found in the markdown
//! source is escaped, never passed through.
//! Link and image destinations with a scheme other than `http`, `https`,
//! `mailto` or `tel` are replaced by `#`.

use crate::model::{CodeStyle, ColumnAlignment, ContentNode, Document, ResolvedLink};

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

pub fn to_html(document: &Document) -> String {
    let mut writer = HtmlWriter::default();
    writer.node(&document.root);
    writer.out
}

#[derive(Default)]
struct HtmlWriter {
    out: String,
    in_table_head: bool,
    alignments: Vec<ColumnAlignment>,
    cell_index: usize,
}

impl HtmlWriter {
    fn children(&mut self, nodes: &[ContentNode]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn wrap(&mut self, tag: &str, nodes: &[ContentNode]) {
        self.out.push_str(&format!("<{}>", tag));
        self.children(nodes);
        self.out.push_str(&format!("</{}>", tag));
    }

    fn node(&mut self, node: &ContentNode) {
        match node {
            ContentNode::Root { children } => self.children(children),
            ContentNode::Heading {
                level,
                anchor_id,
                children,
            } => {
                match anchor_id {
                    Some(id) => self
                        .out
                        .push_str(&format!("<h{} id=\"{}\">", level, escape_attr(id))),
                    None => self.out.push_str(&format!("<h{}>", level)),
                }
                self.children(children);
                self.out.push_str(&format!("</h{}>\n", level));
            }
            ContentNode::Paragraph { children } => {
                self.wrap("p", children);
                self.out.push('\n');
            }
            ContentNode::List { start, children } => {
                match start {
                    Some(1) => self.out.push_str("<ol>\n"),
                    Some(n) => self.out.push_str(&format!("<ol start=\"{}\">\n", n)),
                    None => self.out.push_str("<ul>\n"),
                }
                self.children(children);
                self.out
                    .push_str(if start.is_some() { "</ol>\n" } else { "</ul>\n" });
            }
            ContentNode::ListItem { checked, children } => {
                self.out.push_str("<li>");
                match checked {
                    Some(true) => self
                        .out
                        .push_str("<input type=\"checkbox\" disabled checked /> "),
                    Some(false) => self.out.push_str("<input type=\"checkbox\" disabled /> "),
                    None => {}
                }
                self.children(children);
                self.out.push_str("</li>\n");
            }
            ContentNode::Code { code, style } => match style {
                CodeStyle::Inline => {
                    self.out
                        .push_str(&format!("<code>{}</code>", escape_text(code)));
                }
                CodeStyle::Block { language } => {
                    match language {
                        Some(lang) => self.out.push_str(&format!(
                            "<pre><code data-language=\"{}\">",
                            escape_attr(lang)
                        )),
                        None => self.out.push_str("<pre><code>"),
                    }
                    self.out.push_str(&escape_text(code));
                    self.out.push_str("</code></pre>\n");
                }
            },
            ContentNode::Quote { children } => {
                self.out.push_str("<blockquote>\n");
                self.children(children);
                self.out.push_str("</blockquote>\n");
            }
            ContentNode::Link {
                title,
                resolved,
                scroll,
                children,
                ..
            } => {
                let href = resolved.href();
                self.out.push_str(&format!(
                    "<a href=\"{}\"",
                    escape_attr(safe_url(&href))
                ));
                if let Some(title) = title {
                    self.out
                        .push_str(&format!(" title=\"{}\"", escape_attr(title)));
                }
                match resolved {
                    ResolvedLink::External { .. } => self
                        .out
                        .push_str(" target=\"_blank\" rel=\"noopener noreferrer\""),
                    ResolvedLink::Anchor { .. } => {
                        if let Some(scroll) = scroll {
                            self.out.push_str(&format!(
                                " data-scroll-offset=\"{}\"",
                                scroll.offset
                            ));
                        }
                    }
                    ResolvedLink::Internal { .. } => {
                        self.out.push_str(" data-link=\"internal\"");
                    }
                    ResolvedLink::Unrecognized { .. } => {}
                }
                self.out.push('>');
                self.children(children);
                self.out.push_str("</a>");
            }
            ContentNode::Image {
                source, title, alt, ..
            } => {
                self.out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\"",
                    escape_attr(safe_url(source)),
                    escape_attr(alt)
                ));
                if let Some(title) = title {
                    self.out
                        .push_str(&format!(" title=\"{}\"", escape_attr(title)));
                }
                self.out.push_str(" />");
            }
            ContentNode::Emphasis { children } => self.wrap("em", children),
            ContentNode::Strong { children } => self.wrap("strong", children),
            ContentNode::Strikethrough { children } => self.wrap("del", children),
            ContentNode::Table {
                alignments,
                children,
            } => {
                self.alignments = alignments.clone();
                self.out.push_str("<table>\n");
                self.children(children);
                self.out.push_str("</tbody>\n</table>\n");
                self.alignments.clear();
            }
            ContentNode::TableHead { children } => {
                self.in_table_head = true;
                self.cell_index = 0;
                self.out.push_str("<thead>\n<tr>");
                self.children(children);
                self.out.push_str("</tr>\n</thead>\n<tbody>\n");
                self.in_table_head = false;
            }
            ContentNode::TableRow { children } => {
                self.cell_index = 0;
                self.out.push_str("<tr>");
                self.children(children);
                self.out.push_str("</tr>\n");
            }
            ContentNode::TableCell { children } => {
                let tag = if self.in_table_head { "th" } else { "td" };
                let align = match self.alignments.get(self.cell_index) {
                    Some(ColumnAlignment::Left) => " align=\"left\"",
                    Some(ColumnAlignment::Center) => " align=\"center\"",
                    Some(ColumnAlignment::Right) => " align=\"right\"",
                    Some(ColumnAlignment::None) | None => "",
                };
                self.out.push_str(&format!("<{}{}>", tag, align));
                self.children(children);
                self.out.push_str(&format!("</{}>", tag));
                self.cell_index += 1;
            }
            ContentNode::Text { text } => self.out.push_str(&escape_text(text)),
            ContentNode::SoftBreak => self.out.push('\n'),
            ContentNode::HardBreak => self.out.push_str("<br />\n"),
            ContentNode::Rule => self.out.push_str("<hr />\n"),
            ContentNode::Html { html } => self.out.push_str(&escape_text(html)),
            ContentNode::FootnoteReference { label } => {
                let label = escape_attr(label);
                self.out.push_str(&format!(
                    "<sup><a href=\"#fn-{}\">{}</a></sup>",
                    label, label
                ));
            }
            ContentNode::FootnoteDefinition { label, children } => {
                self.out.push_str(&format!(
                    "<div id=\"fn-{}\">",
                    escape_attr(label)
                ));
                self.children(children);
                self.out.push_str("</div>\n");
            }
        }
    }
}

/// Relative URLs and allowed schemes pass; anything else becomes `#`.
fn safe_url(url: &str) -> &str {
    let scheme_end = url.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(end) if url[end..].starts_with(':') => {
            let scheme = &url[..end];
            if SAFE_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
                url
            } else {
                "#"
            }
        }
        _ => url,
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
