use deck::block::{Block, Subheading};
use deck::compiler::{SlideItem, SlideRecord, compile, compile_with};

use deck::block::Block::{Content, SectionMarker, SlideMarker, SubheadingMarker, TopicMarker};

fn section(t: &str) -> Block<&'static str> {
    SectionMarker(t.to_string())
}

fn topic(t: &str) -> Block<&'static str> {
    TopicMarker(t.to_string())
}

fn slide(t: &str) -> Block<&'static str> {
    SlideMarker(t.to_string())
}

fn body(record: &SlideRecord<&'static str>) -> Vec<&'static str> {
    record
        .body
        .iter()
        .filter_map(|item| match item {
            SlideItem::Content(c) => Some(*c),
            SlideItem::Subheading(_) => None,
        })
        .collect()
}

#[test]
fn empty_stream_yields_no_slides() {
    let slides = compile(Vec::<Block<&str>>::new());
    assert!(slides.is_empty());
}

#[test]
fn stream_without_slide_markers_yields_no_slides() {
    let slides = compile(vec![section("A"), topic("1"), Content("x"), Content("y")]);
    assert!(slides.is_empty());
}

#[test]
fn one_record_per_slide_marker() {
    let slides = compile(vec![
        section("A"),
        slide("X"),
        Content("a"),
        slide("Y"),
        topic("t"),
        slide("Z"),
        Content("z"),
    ]);
    let titles: Vec<_> = slides.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["X", "Y", "Z"]);
}

#[test]
fn consecutive_slide_markers_keep_empty_slides() {
    let slides = compile(vec![slide("X"), slide("Y"), slide("Z")]);
    assert_eq!(slides.len(), 3);
    assert!(slides.iter().all(|s| s.body.is_empty()));
}

#[test]
fn header_state_is_snapshotted_at_open() {
    let slides = compile(vec![
        section("A"),
        slide("X"),
        section("B"),
        Content("c"),
        slide("Y"),
    ]);
    assert_eq!(slides[0].section, "A");
    assert_eq!(slides[1].section, "B");
}

// Markers only update running state; they never close a slide. Content that
// follows a section marker belongs to whichever slide is open, since the
// compiler does not look ahead to the next slide marker.
#[test]
fn content_after_section_marker_joins_open_slide() {
    let slides = compile(vec![
        section("A"),
        slide("X"),
        section("B"),
        Content("c"),
        slide("Y"),
    ]);
    assert_eq!(body(&slides[0]), ["c"]);
    assert!(slides[1].body.is_empty());
}

#[test]
fn new_section_clears_topic() {
    let slides = compile(vec![section("A"), topic("1"), section("B"), slide("X")]);
    assert_eq!(slides[0].section, "B");
    assert_eq!(slides[0].topic, "");
}

#[test]
fn repeated_section_and_topic_bookmark_once() {
    let slides = compile(vec![section("A"), topic("1"), slide("X"), slide("Y")]);
    assert_eq!(slides[0].outline_section.as_deref(), Some("A"));
    assert_eq!(slides[0].outline_topic.as_deref(), Some("1"));
    assert_eq!(slides[1].outline_section, None);
    assert_eq!(slides[1].outline_topic, None);
}

#[test]
fn section_change_forces_topic_rebookmark() {
    let slides = compile(vec![
        section("A"),
        topic("1"),
        slide("X"),
        section("B"),
        topic("1"),
        slide("Y"),
    ]);
    assert_eq!(slides[1].outline_section.as_deref(), Some("B"));
    assert_eq!(slides[1].outline_topic.as_deref(), Some("1"));
}

#[test]
fn topic_change_within_section_bookmarks_topic_only() {
    let slides = compile(vec![
        section("A"),
        topic("1"),
        slide("X"),
        topic("2"),
        slide("Y"),
        topic("2"),
        slide("Z"),
    ]);
    assert_eq!(slides[1].outline_section, None);
    assert_eq!(slides[1].outline_topic.as_deref(), Some("2"));
    assert_eq!(slides[2].outline_topic, None);
}

#[test]
fn returning_to_earlier_topic_bookmarks_again() {
    let slides = compile(vec![
        section("A"),
        topic("1"),
        slide("X"),
        topic("2"),
        slide("Y"),
        topic("1"),
        slide("Z"),
    ]);
    assert_eq!(slides[2].outline_topic.as_deref(), Some("1"));
}

#[test]
fn first_slide_bookmarks_empty_header_state() {
    // Unset bookmarks differ from empty names, so the very first slide always
    // carries directives even without any section or topic marker.
    let slides = compile(vec![slide("X"), slide("Y")]);
    assert_eq!(slides[0].outline_section.as_deref(), Some(""));
    assert_eq!(slides[0].outline_topic.as_deref(), Some(""));
    assert_eq!(slides[1].outline_section, None);
    assert_eq!(slides[1].outline_topic, None);
}

#[test]
fn section_after_sectionless_slides_is_bookmarked() {
    let slides = compile(vec![slide("Intro"), section("A"), slide("X")]);
    assert_eq!(slides[1].outline_section.as_deref(), Some("A"));
    assert_eq!(slides[1].outline_topic.as_deref(), Some(""));
}

#[test]
fn leading_content_is_dropped() {
    let slides = compile(vec![Content("c1"), slide("X"), Content("c2")]);
    assert_eq!(body(&slides[0]), ["c2"]);
}

#[test]
fn discarded_items_are_reported() {
    let mut discarded = Vec::new();
    let slides = compile_with(
        vec![
            Content("c1"),
            SubheadingMarker(Subheading::new("early", 0..0)),
            slide("X"),
            Content("c2"),
        ],
        |item| discarded.push(item.clone()),
    );
    assert_eq!(slides.len(), 1);
    assert_eq!(
        discarded,
        vec![
            SlideItem::Content("c1"),
            SlideItem::Subheading(Subheading::new("early", 0..0)),
        ]
    );
}

#[test]
fn subheadings_are_body_items_in_order() {
    let slides = compile(vec![
        slide("X"),
        Content("a"),
        SubheadingMarker(Subheading::new("Detail", 0..0)),
        Content("b"),
    ]);
    assert_eq!(
        slides[0].body,
        vec![
            SlideItem::Content("a"),
            SlideItem::Subheading(Subheading::new("Detail", 0..0)),
            SlideItem::Content("b"),
        ]
    );
}

#[test]
fn trailing_markers_without_slide_are_absorbed() {
    let slides = compile(vec![slide("X"), section("Unused"), topic("Never")]);
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].section, "");
}
