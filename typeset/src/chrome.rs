//! Header bar, slide title band and footer bar.
//!
//! These only place already-resolved strings; every decision about what the
//! strings are is made by the caller.

use crate::error::Result;
use crate::measure::TextMeasure;
use crate::page::{Footer, HeaderBar, Span, TextBox, TitleBand};
use crate::style::{FontRole, Style};

/// Document-wide footer sizing, fixed once the page count is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FooterMetrics {
    pub page_count: usize,
    /// Widest `i/N` label over every page of the document.
    pub label_box_width: f32,
}

pub(crate) fn text_box(
    style: &Style,
    measure: &dyn TextMeasure,
    text: &str,
    font: FontRole,
    x: f32,
    y: f32,
) -> Result<TextBox> {
    let width = measure.measure(text, style.font(font))?;
    Ok(TextBox {
        text: text.to_string(),
        x,
        y,
        width,
        font,
    })
}

/// Top of a line of `font` vertically centered in a bar.
fn centered_y(style: &Style, font: FontRole, bar_y: f32, bar_height: f32) -> f32 {
    bar_y + (bar_height - style.font(font).size) / 2.0
}

pub fn header_bar(
    style: &Style,
    measure: &dyn TextMeasure,
    section: &str,
    topic: &str,
) -> Result<HeaderBar> {
    let y = centered_y(style, FontRole::Chrome, 0.0, style.header_height);
    let section = text_box(style, measure, section, FontRole::Chrome, style.margin_x, y)?;
    let mut topic = text_box(style, measure, topic, FontRole::Chrome, 0.0, y)?;
    topic.x = style.page_width - style.margin_x - topic.width;

    Ok(HeaderBar {
        height: style.header_height,
        section,
        topic,
    })
}

pub fn title_band(
    style: &Style,
    measure: &dyn TextMeasure,
    title: &str,
    continued: bool,
) -> Result<TitleBand> {
    let y = style.header_height;
    let text_y = centered_y(style, FontRole::SlideTitle, y, style.title_band_height);
    let title = text_box(style, measure, title, FontRole::SlideTitle, style.margin_x, text_y)?;

    Ok(TitleBand {
        y,
        height: style.title_band_height,
        title,
        continued,
    })
}

/// Lay out a footer. The date sits immediately left of the label box, so its
/// position depends only on `metrics`, never on this page's label.
pub fn footer_bar(
    style: &Style,
    measure: &dyn TextMeasure,
    identity: &str,
    short_title: &str,
    date: &str,
    page_label: &str,
    metrics: &FooterMetrics,
) -> Result<Footer> {
    let y = style.page_height - style.footer_height;
    let text_y = centered_y(style, FontRole::Chrome, y, style.footer_height);

    let identity = text_box(style, measure, identity, FontRole::Chrome, style.margin_x, text_y)?;

    let mut short_title = text_box(style, measure, short_title, FontRole::Chrome, 0.0, text_y)?;
    short_title.x = (style.page_width - short_title.width) / 2.0;

    let label_box = Span {
        x: style.page_width - style.margin_x - metrics.label_box_width,
        width: metrics.label_box_width,
    };
    let mut page_label = text_box(style, measure, page_label, FontRole::Chrome, 0.0, text_y)?;
    page_label.x = label_box.x + label_box.width - page_label.width;

    let date = if date.is_empty() {
        None
    } else {
        let mut date = text_box(style, measure, date, FontRole::Chrome, 0.0, text_y)?;
        date.x = label_box.x - style.label_gap - date.width;
        Some(date)
    };

    Ok(Footer {
        y,
        height: style.footer_height,
        identity,
        short_title,
        date,
        page_label,
        label_box,
    })
}
