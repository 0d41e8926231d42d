//! Stream-to-slide segmentation.
//!
//! The compiler folds the flat block stream into slide records in one forward
//! pass. Section and topic markers only update running state; a slide marker
//! closes the open slide (deciding its outline directives) and opens the next
//! one with a snapshot of that state.

use log::{debug, warn};

use crate::block::{Block, Subheading};

/// A body element of a slide. Subheadings keep their text for styling but are
/// otherwise ordinary content.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideItem<C> {
    Subheading(Subheading),
    Content(C),
}

/// One compiled slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideRecord<C> {
    pub title: String,
    pub body: Vec<SlideItem<C>>,
    /// Section in effect when the slide opened.
    pub section: String,
    /// Topic in effect when the slide opened.
    pub topic: String,
    /// Set on the first slide of a new section.
    pub outline_section: Option<String>,
    /// Set on the first slide of a new topic, or of any topic after a new section.
    pub outline_topic: Option<String>,
}

impl<C> SlideRecord<C> {
    fn open(title: String, section: &str, topic: &str) -> Self {
        SlideRecord {
            title,
            body: Vec::new(),
            section: section.to_string(),
            topic: topic.to_string(),
            outline_section: None,
            outline_topic: None,
        }
    }
}

/// Running state of a single compile. `None` bookmarks mean nothing has been
/// bookmarked yet, which is different from having bookmarked an empty name.
struct CompilerState<C> {
    current_section: String,
    current_topic: String,
    last_bookmarked_section: Option<String>,
    last_bookmarked_topic: Option<String>,
    open_slide: Option<SlideRecord<C>>,
    output: Vec<SlideRecord<C>>,
}

impl<C> CompilerState<C> {
    fn new() -> Self {
        CompilerState {
            current_section: String::new(),
            current_topic: String::new(),
            last_bookmarked_section: None,
            last_bookmarked_topic: None,
            open_slide: None,
            output: Vec::new(),
        }
    }

    fn step(&mut self, block: Block<C>, on_discard: &mut impl FnMut(&SlideItem<C>)) {
        match block {
            Block::SectionMarker(text) => {
                self.current_section = text;
                self.current_topic.clear();
            }
            Block::TopicMarker(text) => {
                self.current_topic = text;
            }
            Block::SlideMarker(title) => {
                self.close_slide();
                self.open_slide = Some(SlideRecord::open(
                    title,
                    &self.current_section,
                    &self.current_topic,
                ));
            }
            Block::SubheadingMarker(heading) => {
                self.push_item(SlideItem::Subheading(heading), on_discard)
            }
            Block::Content(content) => {
                self.push_item(SlideItem::Content(content), on_discard)
            }
        }
    }

    fn push_item(&mut self, item: SlideItem<C>, on_discard: &mut impl FnMut(&SlideItem<C>)) {
        match self.open_slide.as_mut() {
            Some(slide) => slide.body.push(item),
            None => {
                warn!("discarding content before the first slide");
                on_discard(&item);
            }
        }
    }

    /// Decide the open slide's outline directives and move it to the output.
    fn close_slide(&mut self) {
        let Some(mut slide) = self.open_slide.take() else {
            return;
        };

        if self.last_bookmarked_section.as_deref() != Some(slide.section.as_str()) {
            slide.outline_section = Some(slide.section.clone());
            self.last_bookmarked_section = Some(slide.section.clone());
            self.last_bookmarked_topic = None;
        }
        if self.last_bookmarked_topic.as_deref() != Some(slide.topic.as_str()) {
            slide.outline_topic = Some(slide.topic.clone());
            self.last_bookmarked_topic = Some(slide.topic.clone());
        }

        debug!(
            "closed slide {:?} ({} body items)",
            slide.title,
            slide.body.len()
        );
        self.output.push(slide);
    }

    fn finish(mut self) -> Vec<SlideRecord<C>> {
        self.close_slide();
        self.output
    }
}

/// Compile a block stream into slide records.
pub fn compile<C, I>(blocks: I) -> Vec<SlideRecord<C>>
where
    I: IntoIterator<Item = Block<C>>,
{
    compile_with(blocks, |_| {})
}

/// Like [`compile`], but calls `on_discard` for every subheading or content
/// block that arrives before the first slide marker and is therefore dropped.
pub fn compile_with<C, I, F>(blocks: I, mut on_discard: F) -> Vec<SlideRecord<C>>
where
    I: IntoIterator<Item = Block<C>>,
    F: FnMut(&SlideItem<C>),
{
    let mut state = CompilerState::new();
    for block in blocks {
        state.step(block, &mut on_discard);
    }
    state.finish()
}
