use std::fmt;

use serde::Serialize;

/// A sequence of content nodes, used for nested containers (quotes, list items).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub nodes: Vec<DocumentNode>,
}

impl Document {
    pub fn empty() -> Self {
        Document { nodes: Vec::new() }
    }
}

/// A block-level content node. Structural headings never appear here; only
/// headings deeper than the subheading marker (`#####`, `######`) do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentNode {
    Paragraph {
        content: Vec<InlineNode>,
    },
    Heading {
        level: u8,
        content: Vec<InlineNode>,
    },
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    Blockquote {
        body: Document,
    },
    Table {
        alignments: Vec<ColumnAlignment>,
        headers: Vec<Vec<InlineNode>>,
        rows: Vec<Vec<Vec<InlineNode>>>,
    },
    OrderedList {
        start: u64,
        items: Vec<Document>,
    },
    UnorderedList {
        items: Vec<Document>,
    },
    HorizontalRule,
}

/// Inline elements that appear within a line of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InlineNode {
    Text(String),
    Strong(Vec<InlineNode>),
    Emphasis(Vec<InlineNode>),
    Strikethrough(Vec<InlineNode>),
    CodeSpan(String),
    Math(String),
    Link {
        dest: String,
        content: Vec<InlineNode>,
    },
    Image {
        dest: String,
        alt: Vec<InlineNode>,
    },
    SoftBreak,
    HardBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAlignment {
    None,
    Left,
    Center,
    Right,
}

/// Flatten inline nodes to the text a reader would see.
///
/// Soft breaks become spaces; hard breaks are kept as `\n` so callers can
/// split forced lines.
pub fn plain_text(inlines: &[InlineNode]) -> String {
    let mut out = String::new();
    for inline in inlines {
        out.push_str(&inline.to_string());
    }
    out
}

impl fmt::Display for InlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineNode::Text(s) | InlineNode::CodeSpan(s) | InlineNode::Math(s) => {
                write!(f, "{}", s)
            }
            InlineNode::Strong(children)
            | InlineNode::Emphasis(children)
            | InlineNode::Strikethrough(children)
            | InlineNode::Link {
                content: children, ..
            } => write!(f, "{}", plain_text(children)),
            InlineNode::Image { alt, .. } => write!(f, "[{}]", plain_text(alt)),
            InlineNode::SoftBreak => write!(f, " "),
            InlineNode::HardBreak => writeln!(f),
        }
    }
}
