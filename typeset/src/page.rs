//! The laid-out document model.

use deck::config::Rgb;
use serde::Serialize;

use crate::style::FontRole;

/// A positioned single line of text. `y` is the top of the line box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBox {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font: FontRole,
}

/// Running header: section on the left, topic on the right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBar {
    pub height: f32,
    pub section: TextBox,
    pub topic: TextBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleBand {
    pub y: f32,
    pub height: f32,
    pub title: TextBox,
    /// The slide started on an earlier page.
    pub continued: bool,
}

/// Horizontal extent reserved for an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span {
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footer {
    pub y: f32,
    pub height: f32,
    pub identity: TextBox,
    pub short_title: TextBox,
    pub date: Option<TextBox>,
    pub page_label: TextBox,
    /// Box the page label is right-aligned in; the same on every page.
    pub label_box: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageKind {
    Title,
    Slide { slide: usize, continued: bool },
}

/// An outline (bookmark) entry pointing at the page that introduces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// 1 for sections, 2 for topics.
    pub level: u8,
    pub title: String,
    pub page: usize,
}

/// A page after the first layout pass, before its footer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutPage {
    /// 1-based page number.
    pub number: usize,
    pub kind: PageKind,
    pub header: Option<HeaderBar>,
    pub title_band: Option<TitleBand>,
    pub body: Vec<TextBox>,
    pub outline: Vec<OutlineEntry>,
}

/// A finished page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    #[serde(flatten)]
    pub layout: LaidOutPage,
    pub footer: Footer,
}

/// The finished deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
    pub pages: Vec<Page>,
    pub outline: Vec<OutlineEntry>,
}
