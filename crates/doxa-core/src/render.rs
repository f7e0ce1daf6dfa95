use pulldown_cmark::{Alignment, CodeBlockKind, Event, LinkType, Options, Parser, Tag};
use sha2::{Digest, Sha256};

use crate::anchor::{flatten_text, slugify};
use crate::catalog::Catalog;
use crate::line_map::LineMap;
use crate::model::{
    CodeStyle, ColumnAlignment, ContentNode, Document, HeadingSummary, Point, ResolvedLink,
    ScrollBehavior,
};
use crate::resolver::resolve_link;

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options
}

/// Render markdown into a content tree with default scroll behavior.
///
/// See [`Renderer::render`].
pub fn render(text: &str, document_id: &str, catalog: &Catalog) -> Document {
    Renderer::new(catalog).render(text, document_id)
}

/// Markdown to content tree transformation bound to one catalog.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    catalog: &'a Catalog,
    scroll: ScrollBehavior,
}

impl<'a> Renderer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            scroll: ScrollBehavior::default(),
        }
    }

    /// Header clearance attached to same-document anchor links
    pub fn with_scroll_offset(mut self, offset: u32) -> Self {
        self.scroll.offset = offset;
        self
    }

    /// Parse `text` and produce a fresh, immutable [`Document`].
    ///
    /// - Every heading gets an anchor id derived from its visible text
    /// - Every link is classified against the catalog; link text is untouched
    /// - A YAML metadata block becomes `frontmatter`; its `title` wins over the
    ///   first level-1 heading
    ///
    /// Malformed markdown is parsed best-effort; this never fails.
    pub fn render(&self, text: &str, document_id: &str) -> Document {
        let line_map = LineMap::new(text);
        let mut builder = TreeBuilder::new(self);

        for (event, range) in Parser::new_ext(text, markdown_options()).into_offset_iter() {
            match event {
                Event::Start(tag) => {
                    let position = line_map.offset_to_point(text, range.start);
                    builder.open(tag, position);
                }
                Event::End(_) => builder.close(),
                Event::Text(cow_str) => builder.text(cow_str.as_ref()),
                Event::Code(code) => builder.push(ContentNode::Code {
                    code: code.to_string(),
                    style: CodeStyle::Inline,
                }),
                Event::Html(html) | Event::InlineHtml(html) => builder.push(ContentNode::Html {
                    html: html.to_string(),
                }),
                Event::SoftBreak => builder.push(ContentNode::SoftBreak),
                Event::HardBreak => builder.push(ContentNode::HardBreak),
                Event::Rule => builder.push(ContentNode::Rule),
                Event::FootnoteReference(label) => builder.push(ContentNode::FootnoteReference {
                    label: label.to_string(),
                }),
                Event::TaskListMarker(checked) => builder.mark_task(checked),
                _ => {}
            }
        }

        let mut hasher = Sha256::new();
        hasher.update(text);
        let digest = format!("{:x}", hasher.finalize());

        log::debug!(
            "Rendered '{}': {} headings, digest {}",
            document_id,
            builder.headings.len(),
            &digest[..12]
        );

        let root = builder.finish();

        Document {
            document_id: document_id.to_string(),
            title: builder.title,
            frontmatter: builder.frontmatter,
            root,
            headings: builder.headings,
            digest,
        }
    }
}

/// An element whose end event has not been seen yet
enum Frame {
    Root,
    Paragraph,
    Heading(u8),
    Quote,
    List(Option<u64>),
    Item(Option<bool>),
    Emphasis,
    Strong,
    Strikethrough,
    Link {
        target: String,
        title: Option<String>,
        position: Point,
    },
    Image {
        source: String,
        title: Option<String>,
    },
    Table(Vec<ColumnAlignment>),
    TableHead,
    TableRow,
    TableCell,
    FootnoteDefinition(String),
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Metadata(String),
    /// Containers without a node of their own; children go to the parent
    Passthrough,
}

struct Open {
    frame: Frame,
    children: Vec<ContentNode>,
}

struct TreeBuilder<'r, 'a> {
    renderer: &'r Renderer<'a>,
    stack: Vec<Open>,
    headings: Vec<HeadingSummary>,
    title: Option<String>,
    frontmatter: Option<serde_json::Value>,
}

impl<'r, 'a> TreeBuilder<'r, 'a> {
    fn new(renderer: &'r Renderer<'a>) -> Self {
        Self {
            renderer,
            stack: vec![Open {
                frame: Frame::Root,
                children: Vec::new(),
            }],
            headings: Vec::new(),
            title: None,
            frontmatter: None,
        }
    }

    fn open(&mut self, tag: Tag<'_>, position: Point) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, .. } => Frame::Heading(level as u8),
            Tag::BlockQuote(_) => Frame::Quote,
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_string)
                    }
                    CodeBlockKind::Indented => None,
                },
                code: String::new(),
            },
            Tag::List(start) => Frame::List(start),
            Tag::Item => Frame::Item(None),
            Tag::FootnoteDefinition(label) => Frame::FootnoteDefinition(label.to_string()),
            Tag::Table(alignments) => Frame::Table(
                alignments
                    .iter()
                    .map(|alignment| match alignment {
                        Alignment::None => ColumnAlignment::None,
                        Alignment::Left => ColumnAlignment::Left,
                        Alignment::Center => ColumnAlignment::Center,
                        Alignment::Right => ColumnAlignment::Right,
                    })
                    .collect(),
            ),
            Tag::TableHead => Frame::TableHead,
            Tag::TableRow => Frame::TableRow,
            Tag::TableCell => Frame::TableCell,
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Strikethrough => Frame::Strikethrough,
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                // <user@example.com> arrives without its scheme
                let target = if matches!(link_type, LinkType::Email) {
                    format!("mailto:{}", dest_url)
                } else {
                    dest_url.to_string()
                };
                Frame::Link {
                    target,
                    title: non_empty(&title),
                    position,
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                source: dest_url.to_string(),
                title: non_empty(&title),
            },
            Tag::MetadataBlock(_) => Frame::Metadata(String::new()),
            _ => Frame::Passthrough,
        };

        self.stack.push(Open {
            frame,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(open) = self.stack.pop() else {
            return;
        };

        match self.finish_frame(open) {
            Finished::Node(node) => self.push(node),
            Finished::Splice(children) => {
                for child in children {
                    self.push(child);
                }
            }
            Finished::Nothing => {}
        }
    }

    fn finish_frame(&mut self, open: Open) -> Finished {
        let Open { frame, children } = open;
        let node = match frame {
            Frame::Root | Frame::Passthrough => return Finished::Splice(children),
            Frame::Paragraph => ContentNode::Paragraph { children },
            Frame::Heading(level) => {
                let text = flatten_text(&children);
                let slug = slugify(&text);
                let anchor_id = (!slug.is_empty()).then_some(slug);
                let text = text.trim().to_string();

                if level == 1 && self.title.is_none() && !text.is_empty() {
                    self.title = Some(text.clone());
                }
                self.headings.push(HeadingSummary {
                    level,
                    text,
                    anchor_id: anchor_id.clone(),
                });

                ContentNode::Heading {
                    level,
                    anchor_id,
                    children,
                }
            }
            Frame::Quote => ContentNode::Quote { children },
            Frame::List(start) => ContentNode::List { start, children },
            Frame::Item(checked) => ContentNode::ListItem { checked, children },
            Frame::Emphasis => ContentNode::Emphasis { children },
            Frame::Strong => ContentNode::Strong { children },
            Frame::Strikethrough => ContentNode::Strikethrough { children },
            Frame::Link {
                target,
                title,
                position,
            } => {
                let resolved = resolve_link(&target, self.renderer.catalog);
                let scroll = matches!(resolved, ResolvedLink::Anchor { .. })
                    .then_some(self.renderer.scroll);
                ContentNode::Link {
                    target,
                    title,
                    resolved,
                    scroll,
                    position,
                    children,
                }
            }
            Frame::Image { source, title } => ContentNode::Image {
                source,
                title,
                alt: flatten_text(&children),
                children,
            },
            Frame::Table(alignments) => ContentNode::Table {
                alignments,
                children,
            },
            Frame::TableHead => ContentNode::TableHead { children },
            Frame::TableRow => ContentNode::TableRow { children },
            Frame::TableCell => ContentNode::TableCell { children },
            Frame::FootnoteDefinition(label) => ContentNode::FootnoteDefinition { label, children },
            Frame::CodeBlock { language, code } => ContentNode::Code {
                code,
                style: CodeStyle::Block { language },
            },
            Frame::Metadata(yaml) => {
                self.apply_frontmatter(&yaml);
                return Finished::Nothing;
            }
        };
        Finished::Node(node)
    }

    fn apply_frontmatter(&mut self, yaml: &str) {
        match serde_yaml::from_str::<serde_json::Value>(yaml) {
            Ok(json) => {
                if let Some(t) = json.get("title").and_then(|v| v.as_str()) {
                    self.title = Some(t.to_string());
                }
                self.frontmatter = Some(json);
            }
            Err(e) => log::warn!("Ignoring unreadable frontmatter: {}", e),
        }
    }

    fn text(&mut self, text: &str) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        match &mut top.frame {
            Frame::CodeBlock { code, .. } => code.push_str(text),
            Frame::Metadata(yaml) => yaml.push_str(text),
            _ => {
                if let Some(ContentNode::Text { text: previous }) = top.children.last_mut() {
                    previous.push_str(text);
                } else {
                    top.children.push(ContentNode::Text {
                        text: text.to_string(),
                    });
                }
            }
        }
    }

    fn push(&mut self, node: ContentNode) {
        if let ContentNode::Text { text } = &node {
            let text = text.clone();
            self.text(&text);
            return;
        }
        if let Some(top) = self.stack.last_mut() {
            top.children.push(node);
        }
    }

    fn mark_task(&mut self, checked: bool) {
        if let Some(open) = self
            .stack
            .iter_mut()
            .rev()
            .find(|open| matches!(open.frame, Frame::Item(_)))
        {
            open.frame = Frame::Item(Some(checked));
        }
    }

    fn finish(&mut self) -> ContentNode {
        // Close anything the parser left open
        while self.stack.len() > 1 {
            self.close();
        }
        let children = self
            .stack
            .pop()
            .map(|open| open.children)
            .unwrap_or_default();
        ContentNode::Root { children }
    }
}

enum Finished {
    Node(ContentNode),
    Splice(Vec<ContentNode>),
    Nothing,
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
