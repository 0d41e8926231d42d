use deck::block::Content;
use deck::compiler::{SlideRecord, compile};
use deck::config::{DeckConfig, ResolvedConfig};
use typeset::page::{Document, PageKind};
use typeset::{BuiltinMetrics, FontSpec, LayoutError, MeasureError, Style, TextMeasure};

const HEADER: &str = "---
title = \"Ownership in Rust\"
short-title = \"Ownership\"
author = \"A. Author\"
institute = \"Example University\"
short-institute = \"EU\"
date = \"17 Oct 2026\"
---
";

fn deck(source: &str) -> (ResolvedConfig, Vec<SlideRecord<Content>>) {
    let source = deck::parser::Parser::new(source.to_string(), 0)
        .parse()
        .expect("parse failed");
    let config = source.config.resolve().expect("config failed");
    (config, compile(source.blocks))
}

fn metrics(config: &ResolvedConfig) -> BuiltinMetrics {
    BuiltinMetrics::new().with_mono_family(&config.mono_font)
}

fn lay_out(source: &str) -> Document {
    let (config, slides) = deck(source);
    let style = Style::from_config(&config);
    typeset::typeset(&style, &metrics(&config), &config, &slides).expect("layout failed")
}

/// `count` one-paragraph slides, one section per ten slides.
fn many_slides(count: usize) -> String {
    let mut src = HEADER.to_string();
    for i in 0..count {
        if i % 10 == 0 {
            src.push_str(&format!("# Part {}\n", i / 10 + 1));
        }
        src.push_str(&format!("### Slide {}\nBody of slide {}.\n\n", i + 1, i + 1));
    }
    src
}

#[test]
fn title_page_only_for_deck_without_slides() {
    let doc = lay_out(&format!("{}Some notes without any slide.\n", HEADER));
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.pages[0].layout.kind, PageKind::Title);
    assert_eq!(doc.pages[0].footer.page_label.text, "1/1");
    assert!(doc.outline.is_empty());
}

#[test]
fn title_page_centers_groups() {
    let doc = lay_out(HEADER);
    let page = &doc.pages[0].layout;
    let texts: Vec<_> = page.body.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(
        texts,
        ["Ownership in Rust", "A. Author", "Example University", "17 Oct 2026"]
    );
    for line in &page.body {
        let center = line.x + line.width / 2.0;
        assert!((center - doc.width / 2.0).abs() < 0.01);
    }
    assert!(page.body.windows(2).all(|w| w[0].y < w[1].y));
    assert!(page.header.is_none());
}

#[test]
fn multi_line_fields_are_set_line_by_line() {
    let doc = lay_out(
        "---
title = \"Ownership\"
subtitle = \"\"\"
Line one
Line two\"\"\"
date = \"\"\"
Spring
term\"\"\"
---
### Only
Body.
",
    );
    let texts: Vec<_> = doc.pages[0].layout.body.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, ["Ownership", "Line one", "Line two", "Spring", "term"]);
    let date = doc.pages[1].footer.date.as_ref().expect("date in footer");
    assert_eq!(date.text, "Spring term");
}

#[test]
fn one_page_per_short_slide() {
    let doc = lay_out(&many_slides(3));
    assert_eq!(doc.pages.len(), 4);
    let labels: Vec<_> = doc.pages.iter().map(|p| p.footer.page_label.text.as_str()).collect();
    assert_eq!(labels, ["1/4", "2/4", "3/4", "4/4"]);
}

#[test]
fn header_shows_snapshotted_section_and_topic() {
    let doc = lay_out(&format!("{}# Basics\n## Moves\n### One\n# Advanced\n### Two\n", HEADER));
    let header = doc.pages[1].layout.header.as_ref().unwrap();
    assert_eq!(header.section.text, "Basics");
    assert_eq!(header.topic.text, "Moves");
    assert!((header.topic.x + header.topic.width - (doc.width - doc.width * 0.05)).abs() < 0.01);

    let header = doc.pages[2].layout.header.as_ref().unwrap();
    assert_eq!(header.section.text, "Advanced");
    assert_eq!(header.topic.text, "");
}

#[test]
fn overflowing_slide_continues_on_next_page() {
    let mut src = format!("{}### Long\n", HEADER);
    for i in 0..40 {
        src.push_str(&format!("- point {}\n", i));
    }
    let doc = lay_out(&src);
    assert!(doc.pages.len() > 2, "expected continuation pages");

    let (config, _) = deck(HEADER);
    let style = Style::from_config(&config);
    for page in &doc.pages[1..] {
        let band = page.layout.title_band.as_ref().unwrap();
        assert_eq!(band.title.text, "Long");
        for line in &page.layout.body {
            assert!(line.y >= style.body_top);
            assert!(line.y + style.line_height(line.font) <= style.body_bottom + 0.01);
        }
    }
    assert!(!doc.pages[1].layout.title_band.as_ref().unwrap().continued);
    assert!(doc.pages[2].layout.title_band.as_ref().unwrap().continued);
    assert_eq!(
        doc.pages[2].layout.kind,
        PageKind::Slide { slide: 1, continued: true }
    );

    let points: usize = doc.pages.iter().map(|p| p.layout.body.len()).sum();
    assert_eq!(points, 40);
}

#[test]
fn outline_entries_attach_to_introducing_page() {
    let src = format!(
        "{}# A\n## 1\n### X\n### Y\n# B\n## 1\n### Z\n## 2\n### W\n",
        HEADER
    );
    let doc = lay_out(&src);
    let outline: Vec<_> = doc
        .outline
        .iter()
        .map(|e| (e.level, e.title.as_str(), e.page))
        .collect();
    assert_eq!(
        outline,
        [(1, "A", 2), (2, "1", 2), (1, "B", 4), (2, "1", 4), (2, "2", 5)]
    );
    assert!(doc.pages[2].layout.outline.is_empty());
}

#[test]
fn empty_header_state_is_not_bookmarked() {
    let doc = lay_out(&format!("{}### Opening\n# Real\n### Next\n", HEADER));
    let outline: Vec<_> = doc.outline.iter().map(|e| (e.level, e.title.as_str())).collect();
    assert_eq!(outline, [(1, "Real")]);
}

#[test]
fn label_box_is_widest_label_over_document() {
    let doc = lay_out(&many_slides(23));
    let total = doc.pages.len();
    assert_eq!(total, 24);

    let (config, _) = deck(HEADER);
    let style = Style::from_config(&config);
    let chrome = style.font(typeset::style::FontRole::Chrome);
    let metrics = metrics(&config);
    let widest = (1..=total)
        .map(|i| metrics.measure(&format!("{}/{}", i, total), chrome).unwrap())
        .fold(0.0f32, f32::max);

    for page in &doc.pages {
        assert!((page.footer.label_box.width - widest).abs() < 1e-3);
    }
}

#[test]
fn date_position_is_identical_on_every_page() {
    let doc = lay_out(&many_slides(23));
    let first = doc.pages[0].footer.date.as_ref().unwrap().x;
    for page in &doc.pages {
        let date = page.footer.date.as_ref().unwrap();
        assert_eq!(date.text, "17 Oct 2026");
        assert_eq!(date.x, first);
    }

    // The labels themselves differ in width but stay right-aligned.
    let widths: Vec<f32> = doc.pages.iter().map(|p| p.footer.page_label.width).collect();
    assert!(widths.iter().any(|w| *w != widths[0]));
    for page in &doc.pages {
        let footer = &page.footer;
        let right = footer.page_label.x + footer.page_label.width;
        assert!((right - (footer.label_box.x + footer.label_box.width)).abs() < 1e-3);
        assert!(footer.date.as_ref().unwrap().x + footer.date.as_ref().unwrap().width <= footer.label_box.x);
    }
}

#[test]
fn footer_carries_identity_and_short_title() {
    let doc = lay_out(&many_slides(1));
    let footer = &doc.pages[1].footer;
    assert_eq!(footer.identity.text, "A. Author · EU");
    assert_eq!(footer.short_title.text, "Ownership");
    assert!((footer.short_title.x + footer.short_title.width / 2.0 - doc.width / 2.0).abs() < 0.01);
}

#[test]
fn footer_without_date() {
    let doc = lay_out("### Only\n");
    assert!(doc.pages.iter().all(|p| p.footer.date.is_none()));
}

#[test]
fn phase_one_reports_page_count() {
    let (config, slides) = deck(&many_slides(5));
    let style = Style::from_config(&config);
    let draft = typeset::layout(&style, &metrics(&config), &config, &slides).unwrap();
    assert_eq!(draft.page_count().get(), 6);
    assert_eq!(draft.pages().len(), 6);

    let doc = draft.finish(&style, &metrics(&config), &config).unwrap();
    assert_eq!(doc.pages.len(), 6);
}

/// Measures normally until it sees a particular string.
struct FailOn(&'static str);

impl TextMeasure for FailOn {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32, MeasureError> {
        if text == self.0 {
            return Err(MeasureError::Backend(format!("no glyphs for {:?}", text)));
        }
        BuiltinMetrics::new().measure(text, font)
    }
}

#[test]
fn measurement_failure_during_layout_is_fatal() {
    let (config, slides) = deck(&format!("{}### Slide\nbroken\n", HEADER));
    let style = Style::from_config(&config);
    let err = typeset::typeset(&style, &FailOn("broken"), &config, &slides).unwrap_err();
    assert!(matches!(err, LayoutError::Measure(MeasureError::Backend(_))));
}

#[test]
fn measurement_failure_while_sizing_footer_is_fatal() {
    let (config, slides) = deck(&many_slides(2));
    let style = Style::from_config(&config);
    let draft = typeset::layout(&style, &FailOn("2/3"), &config, &slides).unwrap();
    let err = draft.finish(&style, &FailOn("2/3"), &config).unwrap_err();
    assert!(err.to_string().contains("2/3"), "{}", err);
}

#[test]
fn standard_aspect_ratio_changes_page_size() {
    let doc = lay_out("---\naspect-ratio = \"4-3\"\n---\n### S\n");
    assert_eq!((doc.width, doc.height), (793.7, 595.28));
}

#[test]
fn document_serializes_to_json() {
    let doc = lay_out(&many_slides(1));
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["pages"][1]["kind"]["kind"], "slide");
    assert_eq!(json["pages"][1]["footer"]["page_label"]["text"], "2/2");
    assert_eq!(json["outline"][0]["title"], "Part 1");
}

#[test]
fn text_proof_lists_every_page() {
    let doc = lay_out(&many_slides(2));
    let proof = typeset::render::text(&doc);
    assert!(proof.contains("== page 1 (title)"));
    assert!(proof.contains("== page 3 (slide 2)"));
    assert!(proof.contains("[outline § Part 1]"));
    assert!(proof.contains("3/3"));
}

#[test]
fn proof_writes_into_any_formatter() {
    use std::fmt::Write;

    let doc = lay_out(&many_slides(1));
    let mut out = String::from("preamble\n");
    write!(out, "{}", typeset::render::Proof(&doc)).unwrap();
    assert_eq!(out, format!("preamble\n{}", typeset::render::text(&doc)));
    assert_eq!(out.matches("== page").count(), 2);
}

#[test]
fn defaults_resolve_without_front_matter() {
    let config = DeckConfig::default().resolve().unwrap();
    let style = Style::from_config(&config);
    assert!(style.body_height() > style.line_height(typeset::style::FontRole::Text));
}
