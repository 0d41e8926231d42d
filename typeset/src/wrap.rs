//! Turning slide body items into measured lines.

use deck::block::Content;
use deck::compiler::SlideItem;
use deck::document::{Document, DocumentNode, InlineNode, plain_text};

use crate::error::Result;
use crate::measure::TextMeasure;
use crate::style::{FontRole, Style};

/// A measured line, positioned horizontally by `indent` from the body margin
/// but not yet placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct SetLine {
    pub text: String,
    pub font: FontRole,
    pub indent: f32,
    pub width: f32,
    pub height: f32,
}

/// A piece of text to set, before line breaking.
struct Run {
    text: String,
    font: FontRole,
    indent: f32,
    wrap: bool,
}

const RULE: &str = "────────────────────────";

/// Lines for one body item.
pub fn item_lines(
    style: &Style,
    measure: &dyn TextMeasure,
    item: &SlideItem<Content>,
) -> Result<Vec<SetLine>> {
    let mut runs = Vec::new();
    match item {
        SlideItem::Subheading(heading) => runs.push(Run {
            text: heading.text.clone(),
            font: FontRole::Subheading,
            indent: 0.0,
            wrap: true,
        }),
        SlideItem::Content(content) => flatten_node(style, &content.node, 0.0, &mut runs),
    }

    let mut lines = Vec::new();
    for run in runs {
        set_run(style, measure, run, &mut lines)?;
    }
    Ok(lines)
}

fn flatten_node(style: &Style, node: &DocumentNode, indent: f32, runs: &mut Vec<Run>) {
    let text_run = |text: String, font: FontRole, runs: &mut Vec<Run>| {
        runs.push(Run {
            text,
            font,
            indent,
            wrap: font != FontRole::Mono,
        })
    };

    match node {
        DocumentNode::Paragraph { content } => {
            let font = match content.as_slice() {
                [InlineNode::Math(_)] => FontRole::Math,
                _ => FontRole::Text,
            };
            for line in plain_text(content).split('\n') {
                text_run(line.to_string(), font, runs);
            }
        }
        DocumentNode::Heading { content, .. } => {
            text_run(plain_text(content), FontRole::Subheading, runs);
        }
        DocumentNode::CodeBlock { content, .. } => {
            for line in content.lines() {
                text_run(line.to_string(), FontRole::Mono, runs);
            }
        }
        DocumentNode::Table { headers, rows, .. } => {
            let row_text = |cells: &[Vec<InlineNode>]| {
                cells
                    .iter()
                    .map(|cell| plain_text(cell))
                    .collect::<Vec<_>>()
                    .join(" | ")
            };
            if !headers.is_empty() {
                text_run(row_text(headers.as_slice()), FontRole::Text, runs);
            }
            for row in rows {
                text_run(row_text(row.as_slice()), FontRole::Text, runs);
            }
        }
        DocumentNode::Blockquote { body } => {
            let first = runs.len();
            flatten_document(style, body, indent + style.list_indent, runs);
            if let Some(run) = runs.get_mut(first) {
                run.text.insert_str(0, "> ");
            }
        }
        DocumentNode::OrderedList { start, items } => {
            for (k, item) in items.iter().enumerate() {
                let marker = format!("{}. ", *start as usize + k);
                flatten_list_item(style, item, &marker, indent, runs);
            }
        }
        DocumentNode::UnorderedList { items } => {
            for item in items {
                flatten_list_item(style, item, "• ", indent, runs);
            }
        }
        DocumentNode::HorizontalRule => {
            runs.push(Run {
                text: RULE.to_string(),
                font: FontRole::Text,
                indent,
                wrap: false,
            });
        }
    }
}

fn flatten_document(style: &Style, doc: &Document, indent: f32, runs: &mut Vec<Run>) {
    for node in &doc.nodes {
        flatten_node(style, node, indent, runs);
    }
}

fn flatten_list_item(
    style: &Style,
    item: &Document,
    marker: &str,
    indent: f32,
    runs: &mut Vec<Run>,
) {
    let first = runs.len();
    flatten_document(style, item, indent + style.list_indent, runs);
    match runs.get_mut(first) {
        Some(run) => run.text.insert_str(0, marker),
        None => runs.push(Run {
            text: marker.trim_end().to_string(),
            font: FontRole::Text,
            indent: indent + style.list_indent,
            wrap: false,
        }),
    }
}

/// Break a run into lines that fit the body width (greedy, on whitespace).
/// A word wider than the line is set on its own line.
fn set_run(
    style: &Style,
    measure: &dyn TextMeasure,
    run: Run,
    out: &mut Vec<SetLine>,
) -> Result<()> {
    let font = style.font(run.font);
    let height = style.line_height(run.font);
    let available = style.body_width() - run.indent;

    let mut push = |text: String, width: f32| {
        out.push(SetLine {
            text,
            font: run.font,
            indent: run.indent,
            width,
            height,
        })
    };

    if !run.wrap {
        let width = measure.measure(&run.text, font)?;
        push(run.text, width);
        return Ok(());
    }

    let mut current = String::new();
    let mut current_width = 0.0;
    for word in run.text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            current_width = measure.measure(&current, font)?;
            continue;
        }
        let candidate = format!("{} {}", current, word);
        let candidate_width = measure.measure(&candidate, font)?;
        if candidate_width <= available {
            current = candidate;
            current_width = candidate_width;
        } else {
            push(std::mem::take(&mut current), current_width);
            current.push_str(word);
            current_width = measure.measure(&current, font)?;
        }
    }
    if !current.is_empty() {
        push(current, current_width);
    }
    Ok(())
}
