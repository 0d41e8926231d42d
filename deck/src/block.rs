use std::ops::Range;

use serde::Serialize;

use crate::document::DocumentNode;

/// One element of the authored stream, as handed to the compiler.
///
/// Heading depth decides the marker kind: `#` opens a section, `##` a topic,
/// `###` a slide (and supplies its title), `####` a subheading. Everything
/// else is content, opaque to segmentation.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<C> {
    SectionMarker(String),
    TopicMarker(String),
    SlideMarker(String),
    SubheadingMarker(Subheading),
    Content(C),
}

/// A `####` heading: a styled line in the slide body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subheading {
    pub text: String,
    #[serde(skip)]
    pub span: Range<usize>,
}

impl Subheading {
    pub fn new(text: impl Into<String>, span: Range<usize>) -> Self {
        Subheading {
            text: text.into(),
            span,
        }
    }
}

/// A content node produced by the Markdown front end, with its byte span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub node: DocumentNode,
    #[serde(skip)]
    pub span: Range<usize>,
}

impl Content {
    pub fn new(node: DocumentNode, span: Range<usize>) -> Self {
        Content { node, span }
    }
}
