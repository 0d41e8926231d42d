//! Plain-text proof of a laid-out document.
//!
//! Each page becomes a block of lines. Horizontal positions are mapped to
//! character columns proportionally, anchored at the edge a box is aligned
//! to, so alignment in the proof mirrors alignment on the page.

use std::fmt;

use crate::page::{Document, Page, PageKind, TextBox};

/// Width of the proof in character columns.
pub const COLUMNS: usize = 100;

/// A document displayed as its text proof.
pub struct Proof<'a>(pub &'a Document);

impl fmt::Display for Proof<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in &self.0.pages {
            write_page(f, self.0, page)?;
        }
        Ok(())
    }
}

pub fn text(doc: &Document) -> String {
    Proof(doc).to_string()
}

fn column(doc: &Document, x: f32) -> usize {
    let col = (x / doc.width * COLUMNS as f32).round();
    (col.max(0.0) as usize).min(COLUMNS - 1)
}

#[derive(Clone, Copy)]
enum Anchor {
    Left,
    Center,
    Right,
}

/// Lay the text boxes out on one line at their proportional columns.
fn place_all(doc: &Document, boxes: &[(&TextBox, Anchor)]) -> String {
    let mut line: Vec<char> = Vec::new();
    for (text_box, anchor) in boxes {
        let len = text_box.text.chars().count();
        let col = match anchor {
            Anchor::Left => column(doc, text_box.x),
            Anchor::Center => {
                column(doc, text_box.x + text_box.width / 2.0).saturating_sub(len / 2)
            }
            Anchor::Right => column(doc, text_box.x + text_box.width).saturating_sub(len),
        };
        if line.len() < col {
            line.resize(col, ' ');
        }
        for (k, c) in text_box.text.chars().enumerate() {
            match line.get_mut(col + k) {
                Some(slot) => *slot = c,
                None => line.push(c),
            }
        }
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

fn write_page(out: &mut impl fmt::Write, doc: &Document, page: &Page) -> fmt::Result {
    let layout = &page.layout;
    let kind = match layout.kind {
        PageKind::Title => "title".to_string(),
        PageKind::Slide { slide, continued: false } => format!("slide {}", slide),
        PageKind::Slide { slide, continued: true } => format!("slide {}, continued", slide),
    };
    writeln!(out, "{:=<1$}", format!("== page {} ({}) ", layout.number, kind), COLUMNS)?;

    for entry in &layout.outline {
        let marker = if entry.level == 1 { "§" } else { "›" };
        writeln!(out, "[outline {} {}]", marker, entry.title)?;
    }

    if let Some(header) = &layout.header {
        let boxes = [(&header.section, Anchor::Left), (&header.topic, Anchor::Right)];
        writeln!(out, "{}", place_all(doc, &boxes))?;
        writeln!(out, "{:-<1$}", "", COLUMNS)?;
    }
    if let Some(band) = &layout.title_band {
        let suffix = if band.continued { " (cont.)" } else { "" };
        writeln!(out, "{}{}", place_all(doc, &[(&band.title, Anchor::Left)]), suffix)?;
        writeln!(out)?;
    }
    for line in &layout.body {
        writeln!(out, "{}", place_all(doc, &[(line, Anchor::Left)]))?;
    }

    let footer = &page.footer;
    let mut boxes = vec![
        (&footer.identity, Anchor::Left),
        (&footer.short_title, Anchor::Center),
    ];
    if let Some(date) = &footer.date {
        boxes.push((date, Anchor::Right));
    }
    boxes.push((&footer.page_label, Anchor::Right));
    writeln!(out, "{:-<1$}", "", COLUMNS)?;
    writeln!(out, "{}", place_all(doc, &boxes))?;
    writeln!(out)
}
