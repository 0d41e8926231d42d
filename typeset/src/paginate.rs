//! Two-phase pagination.
//!
//! The footer of every page reserves room for the widest `i/N` page label,
//! and `N` is only known once every slide has been laid out. Phase 1
//! ([`layout`]) lays out all pages without footers and yields a
//! [`DraftLayout`] carrying the final [`PageCount`]. Phase 2
//! ([`DraftLayout::finish`]) sizes the label box from that count and adds the
//! footers. A [`PageCount`] can only come out of phase 1.

use deck::block::Content;
use deck::compiler::SlideRecord;
use deck::config::ResolvedConfig;
use log::{debug, info};

use crate::chrome::{self, FooterMetrics};
use crate::error::{LayoutError, Result};
use crate::measure::TextMeasure;
use crate::page::{Document, LaidOutPage, OutlineEntry, Page, PageKind, TextBox};
use crate::style::Style;
use crate::title_page;
use crate::wrap::{self, SetLine};

/// Final number of pages, produced by the first layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCount(usize);

impl PageCount {
    pub fn get(self) -> usize {
        self.0
    }
}

/// The deck after phase 1: every page laid out except its footer.
#[derive(Debug, Clone)]
pub struct DraftLayout {
    pages: Vec<LaidOutPage>,
    page_count: PageCount,
}

impl DraftLayout {
    pub fn page_count(&self) -> PageCount {
        self.page_count
    }

    pub fn pages(&self) -> &[LaidOutPage] {
        &self.pages
    }

    /// Phase 2: size the page label box for the known page count and attach a
    /// footer to every page.
    pub fn finish<M: TextMeasure>(
        self,
        style: &Style,
        measure: &M,
        config: &ResolvedConfig,
    ) -> Result<Document> {
        let metrics = footer_metrics(style, measure, self.page_count)?;
        info!(
            "[PASS 2] Adding footers to {} pages ({:.2}pt label box).",
            metrics.page_count, metrics.label_box_width
        );

        let identity = config.identity();
        let date = config.footer_date();
        let mut outline = Vec::new();
        let mut pages = Vec::with_capacity(self.pages.len());
        for layout in self.pages {
            let label = page_label(layout.number, metrics.page_count);
            let footer = chrome::footer_bar(
                style,
                measure,
                &identity,
                &config.short_title,
                &date,
                &label,
                &metrics,
            )?;
            outline.extend(layout.outline.iter().cloned());
            pages.push(Page { layout, footer });
        }

        Ok(Document {
            width: style.page_width,
            height: style.page_height,
            color: style.color,
            pages,
            outline,
        })
    }
}

fn page_label(number: usize, total: usize) -> String {
    format!("{}/{}", number, total)
}

/// Widest page label over the whole document.
pub fn footer_metrics<M: TextMeasure>(
    style: &Style,
    measure: &M,
    page_count: PageCount,
) -> Result<FooterMetrics> {
    let total = page_count.get();
    let font = style.font(crate::style::FontRole::Chrome);
    let mut label_box_width: f32 = 0.0;
    for number in 1..=total {
        let width = measure.measure(&page_label(number, total), font)?;
        label_box_width = label_box_width.max(width);
    }
    Ok(FooterMetrics {
        page_count: total,
        label_box_width,
    })
}

/// Phase 1: lay out the title page and every slide, without footers.
pub fn layout<M: TextMeasure>(
    style: &Style,
    measure: &M,
    config: &ResolvedConfig,
    slides: &[SlideRecord<Content>],
) -> Result<DraftLayout> {
    if style.body_height() <= 0.0 {
        return Err(LayoutError::BodyTooSmall(style.body_height()));
    }
    info!("[PASS 1] Laying out title page and {} slides.", slides.len());

    let mut pages = vec![title_page::compose(style, measure, config)?];
    for (index, slide) in slides.iter().enumerate() {
        let first_page = pages.len() + 1;
        layout_slide(style, measure, index, slide, &mut pages)?;
        debug!(
            "[PASS 1] Slide {} {:?} -> pages {}..={}",
            index + 1,
            slide.title,
            first_page,
            pages.len()
        );
    }

    let page_count = PageCount(pages.len());
    info!("[PASS 1] Layout complete. Total pages: {}.", page_count.get());
    Ok(DraftLayout { pages, page_count })
}

/// Lay out both phases.
pub fn typeset<M: TextMeasure>(
    style: &Style,
    measure: &M,
    config: &ResolvedConfig,
    slides: &[SlideRecord<Content>],
) -> Result<Document> {
    layout(style, measure, config, slides)?.finish(style, measure, config)
}

fn outline_entries(slide: &SlideRecord<Content>, page: usize) -> Vec<OutlineEntry> {
    [(1, &slide.outline_section), (2, &slide.outline_topic)]
        .into_iter()
        .filter_map(|(level, title)| match title {
            Some(title) if !title.is_empty() => Some(OutlineEntry {
                level,
                title: title.clone(),
                page,
            }),
            _ => None,
        })
        .collect()
}

fn slide_page(
    style: &Style,
    measure: &dyn TextMeasure,
    index: usize,
    slide: &SlideRecord<Content>,
    number: usize,
    continued: bool,
) -> Result<LaidOutPage> {
    Ok(LaidOutPage {
        number,
        kind: PageKind::Slide {
            slide: index + 1,
            continued,
        },
        header: Some(chrome::header_bar(style, measure, &slide.section, &slide.topic)?),
        title_band: Some(chrome::title_band(style, measure, &slide.title, continued)?),
        body: Vec::new(),
        outline: if continued {
            Vec::new()
        } else {
            outline_entries(slide, number)
        },
    })
}

/// Lay out one slide, continuing onto further pages while its body overflows.
fn layout_slide(
    style: &Style,
    measure: &dyn TextMeasure,
    index: usize,
    slide: &SlideRecord<Content>,
    pages: &mut Vec<LaidOutPage>,
) -> Result<()> {
    let mut page = slide_page(style, measure, index, slide, pages.len() + 1, false)?;
    let mut y = style.body_top;

    for item in &slide.body {
        for SetLine {
            text,
            font,
            indent,
            width,
            height,
        } in wrap::item_lines(style, measure, item)?
        {
            if y + height > style.body_bottom && !page.body.is_empty() {
                let number = page.number + 1;
                pages.push(page);
                page = slide_page(style, measure, index, slide, number, true)?;
                y = style.body_top;
            }
            page.body.push(TextBox {
                text,
                x: style.margin_x + indent,
                y,
                width,
                font,
            });
            y += height;
        }
        y += style.block_gap;
    }

    pages.push(page);
    Ok(())
}
