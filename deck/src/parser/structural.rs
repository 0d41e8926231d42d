use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser as CmarkParser, Tag, TagEnd};

use crate::block::{Block, Content, Subheading};
use crate::document::{ColumnAlignment, Document, DocumentNode, InlineNode};

type Events<'a> = [(Event<'a>, Range<usize>)];

/// Deepest heading level that still acts as a structural marker.
const SUBHEADING_LEVEL: u8 = 4;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a Markdown body into the flat block stream.
///
/// `offset` is the byte position of `body` within the full source file, so
/// content spans point into the file rather than into the body slice.
pub fn parse_blocks(body: &str, offset: usize) -> Vec<Block<Content>> {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_MATH;
    let parser = CmarkParser::new_ext(body, options);
    let events: Vec<(Event<'_>, Range<usize>)> = parser.into_offset_iter().collect();

    let mut blocks = Vec::new();
    let mut i = 0;

    while i < events.len() {
        let (ref ev, ref range) = events[i];

        let span = offset + range.start..offset + range.end;
        if let Event::Start(Tag::Heading { level, .. }) = ev {
            let depth = heading_level_to_u8(level);
            if depth <= SUBHEADING_LEVEL {
                i += 1;
                let text = normalize_heading_text(&collect_heading_text(&events, &mut i));
                blocks.push(match depth {
                    1 => Block::SectionMarker(text),
                    2 => Block::TopicMarker(text),
                    3 => Block::SlideMarker(text),
                    _ => Block::SubheadingMarker(Subheading::new(text, span)),
                });
                continue;
            }
        }

        match collect_node(&events, &mut i) {
            Some(node) => blocks.push(Block::Content(Content::new(node, span))),
            None => i += 1,
        }
    }

    blocks
}

// ---------------------------------------------------------------------------
// Block-level collection
// ---------------------------------------------------------------------------

/// Collect the block-level node starting at `*i`. Returns `None` without
/// advancing when the event there does not start a block.
fn collect_node(events: &Events<'_>, i: &mut usize) -> Option<DocumentNode> {
    let (ref ev, _) = events[*i];

    let node = match ev {
        Event::Start(Tag::Paragraph) => {
            *i += 1;
            DocumentNode::Paragraph {
                content: collect_inlines(events, i, |e| matches!(e, TagEnd::Paragraph)),
            }
        }

        Event::Start(Tag::Heading { level, .. }) => {
            let level = heading_level_to_u8(level);
            *i += 1;
            DocumentNode::Heading {
                level,
                content: collect_inlines(events, i, |e| matches!(e, TagEnd::Heading(_))),
            }
        }

        Event::Start(Tag::CodeBlock(kind)) => {
            let language = match kind {
                pulldown_cmark::CodeBlockKind::Fenced(lang) => {
                    let lang = lang.to_string();
                    if lang.is_empty() { None } else { Some(lang) }
                }
                pulldown_cmark::CodeBlockKind::Indented => None,
            };
            *i += 1;
            let content = collect_text_until(events, i, |e| matches!(e, TagEnd::CodeBlock));
            DocumentNode::CodeBlock { language, content }
        }

        Event::Start(Tag::Table(alignments)) => {
            let alignments = alignments
                .iter()
                .map(|a| match a {
                    pulldown_cmark::Alignment::None => ColumnAlignment::None,
                    pulldown_cmark::Alignment::Left => ColumnAlignment::Left,
                    pulldown_cmark::Alignment::Center => ColumnAlignment::Center,
                    pulldown_cmark::Alignment::Right => ColumnAlignment::Right,
                })
                .collect();
            *i += 1;
            let (headers, rows) = collect_table(events, i);
            DocumentNode::Table {
                alignments,
                headers,
                rows,
            }
        }

        Event::Start(Tag::BlockQuote(_)) => {
            *i += 1;
            let body = collect_nodes(events, i, |e| matches!(e, TagEnd::BlockQuote(_)));
            DocumentNode::Blockquote {
                body: Document { nodes: body },
            }
        }

        Event::Start(Tag::List(start)) => {
            let start = *start;
            *i += 1;
            collect_list(events, i, start)
        }

        Event::Rule => {
            *i += 1;
            DocumentNode::HorizontalRule
        }

        _ => return None,
    };

    Some(node)
}

/// Collect block nodes until a matching End tag. Inline runs that sit directly
/// in a container (tight list items) become paragraphs.
fn collect_nodes(
    events: &Events<'_>,
    i: &mut usize,
    is_end: impl Fn(&TagEnd) -> bool,
) -> Vec<DocumentNode> {
    let mut nodes = Vec::new();

    while *i < events.len() {
        if let Event::End(tag_end) = &events[*i].0 {
            if is_end(tag_end) {
                *i += 1;
                break;
            }
        }

        if let Some(node) = collect_node(events, i) {
            nodes.push(node);
            continue;
        }

        let mut run = Vec::new();
        while *i < events.len() {
            match collect_inline(events, i) {
                Some(inline) => run.push(inline),
                None => break,
            }
        }
        if run.is_empty() {
            *i += 1;
        } else {
            nodes.push(DocumentNode::Paragraph { content: run });
        }
    }

    nodes
}

/// Collect list items until the list ends. Nested lists stay inside their item.
fn collect_list(events: &Events<'_>, i: &mut usize, start: Option<u64>) -> DocumentNode {
    let mut items = Vec::new();

    while *i < events.len() {
        match &events[*i].0 {
            Event::End(TagEnd::List(_)) => {
                *i += 1;
                break;
            }
            Event::Start(Tag::Item) => {
                *i += 1;
                let nodes = collect_nodes(events, i, |e| matches!(e, TagEnd::Item));
                items.push(Document { nodes });
            }
            _ => {
                *i += 1;
            }
        }
    }

    match start {
        Some(start) => DocumentNode::OrderedList { start, items },
        None => DocumentNode::UnorderedList { items },
    }
}

/// Collect table headers and rows.
fn collect_table(
    events: &Events<'_>,
    i: &mut usize,
) -> (Vec<Vec<InlineNode>>, Vec<Vec<Vec<InlineNode>>>) {
    let mut headers: Vec<Vec<InlineNode>> = Vec::new();
    let mut rows: Vec<Vec<Vec<InlineNode>>> = Vec::new();
    let mut in_head = false;
    let mut current_row: Vec<Vec<InlineNode>> = Vec::new();

    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(TagEnd::Table) => {
                *i += 1;
                break;
            }
            Event::Start(Tag::TableHead) => {
                in_head = true;
                *i += 1;
            }
            Event::End(TagEnd::TableHead) => {
                in_head = false;
                headers = std::mem::take(&mut current_row);
                *i += 1;
            }
            Event::Start(Tag::TableRow) => {
                current_row = Vec::new();
                *i += 1;
            }
            Event::End(TagEnd::TableRow) => {
                if !in_head {
                    rows.push(std::mem::take(&mut current_row));
                }
                *i += 1;
            }
            Event::Start(Tag::TableCell) => {
                *i += 1;
                current_row.push(collect_inlines(events, i, |e| matches!(e, TagEnd::TableCell)));
            }
            _ => {
                *i += 1;
            }
        }
    }

    (headers, rows)
}

// ---------------------------------------------------------------------------
// Inline collection
// ---------------------------------------------------------------------------

/// Collect the inline element at `*i`, or return `None` without advancing.
fn collect_inline(events: &Events<'_>, i: &mut usize) -> Option<InlineNode> {
    let (ref ev, _) = events[*i];

    let inline = match ev {
        Event::Text(s) => {
            *i += 1;
            InlineNode::Text(s.to_string())
        }
        Event::Code(s) => {
            *i += 1;
            InlineNode::CodeSpan(s.to_string())
        }
        Event::InlineMath(s) | Event::DisplayMath(s) => {
            *i += 1;
            InlineNode::Math(s.to_string())
        }
        Event::SoftBreak => {
            *i += 1;
            InlineNode::SoftBreak
        }
        Event::HardBreak => {
            *i += 1;
            InlineNode::HardBreak
        }
        Event::Start(Tag::Strong) => {
            *i += 1;
            InlineNode::Strong(collect_inlines(events, i, |e| matches!(e, TagEnd::Strong)))
        }
        Event::Start(Tag::Emphasis) => {
            *i += 1;
            InlineNode::Emphasis(collect_inlines(events, i, |e| matches!(e, TagEnd::Emphasis)))
        }
        Event::Start(Tag::Strikethrough) => {
            *i += 1;
            InlineNode::Strikethrough(collect_inlines(events, i, |e| {
                matches!(e, TagEnd::Strikethrough)
            }))
        }
        Event::Start(Tag::Link { dest_url, .. }) => {
            let dest = dest_url.to_string();
            *i += 1;
            let content = collect_inlines(events, i, |e| matches!(e, TagEnd::Link));
            InlineNode::Link { dest, content }
        }
        Event::Start(Tag::Image { dest_url, .. }) => {
            let dest = dest_url.to_string();
            *i += 1;
            let alt = collect_inlines(events, i, |e| matches!(e, TagEnd::Image));
            InlineNode::Image { dest, alt }
        }
        _ => return None,
    };

    Some(inline)
}

/// Collect inline nodes until a matching End tag.
fn collect_inlines(
    events: &Events<'_>,
    i: &mut usize,
    is_end: impl Fn(&TagEnd) -> bool,
) -> Vec<InlineNode> {
    let mut inlines = Vec::new();

    while *i < events.len() {
        if let Event::End(tag_end) = &events[*i].0 {
            if is_end(tag_end) {
                *i += 1;
                break;
            }
        }
        match collect_inline(events, i) {
            Some(inline) => inlines.push(inline),
            None => *i += 1,
        }
    }

    inlines
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn heading_level_to_u8(level: &HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Collect heading text (all text events until End(Heading)).
fn collect_heading_text(events: &Events<'_>, i: &mut usize) -> String {
    let mut text = String::new();
    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(TagEnd::Heading(_)) => {
                *i += 1;
                break;
            }
            Event::Text(s) | Event::Code(s) | Event::InlineMath(s) => {
                text.push_str(s);
                *i += 1;
            }
            Event::SoftBreak | Event::HardBreak => {
                text.push(' ');
                *i += 1;
            }
            _ => {
                *i += 1;
            }
        }
    }
    text
}

/// Strip leading/trailing whitespace and collapse interior whitespace.
fn normalize_heading_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collect all text content until a matching End tag.
fn collect_text_until(
    events: &Events<'_>,
    i: &mut usize,
    is_end: impl Fn(&TagEnd) -> bool,
) -> String {
    let mut text = String::new();
    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(tag_end) if is_end(tag_end) => {
                *i += 1;
                break;
            }
            Event::Text(s) => {
                text.push_str(s);
                *i += 1;
            }
            _ => {
                *i += 1;
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_heading_whitespace() {
        assert_eq!(normalize_heading_text("  Big   idea \t"), "Big idea");
    }

    #[test]
    fn spans_are_shifted_by_offset() {
        let blocks = parse_blocks("### S\n\nhello\n", 10);
        let Block::Content(content) = &blocks[1] else {
            panic!("expected content, got {:?}", blocks[1]);
        };
        assert_eq!(content.span.start, 17);
    }
}
