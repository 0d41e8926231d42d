//! Source-located messages about a deck: parse errors and warnings about
//! content the compiler had to drop.

use std::ops::Range;

use codespan_reporting::diagnostic::{self as codespan, Label, Severity};

use crate::block::Content;
use crate::compiler::SlideItem;

/// An error or warning pointing at a byte range of one source file.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub file_id: usize,
    pub span: Range<usize>,
    /// Text shown under the primary label.
    pub label: Option<String>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        message: impl Into<String>,
        span: Range<usize>,
        file_id: usize,
    ) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            file_id,
            span,
            label: None,
            notes: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        Self::new(Severity::Error, message, span, file_id)
    }

    pub fn warning(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        Self::new(Severity::Warning, message, span, file_id)
    }

    /// Warning for a body item that came before the first slide heading.
    pub fn discarded(item: &SlideItem<Content>, file_id: usize) -> Self {
        let (what, span) = match item {
            SlideItem::Subheading(heading) => ("subheading", heading.span.clone()),
            SlideItem::Content(content) => ("content", content.span.clone()),
        };
        Self::warning(format!("{} before the first slide is discarded", what), span, file_id)
            .with_label("not part of any slide")
            .with_note("start a slide with a `###` heading")
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn to_codespan(&self) -> codespan::Diagnostic<usize> {
        let mut label = Label::primary(self.file_id, self.span.clone());
        if let Some(text) = &self.label {
            label = label.with_message(text);
        }
        codespan::Diagnostic::new(self.severity)
            .with_message(&self.message)
            .with_labels(vec![label])
            .with_notes(self.notes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Subheading;

    #[test]
    fn discarded_subheading_points_at_heading() {
        let item = SlideItem::Subheading(Subheading::new("Early", 4..14));
        let diagnostic = Diagnostic::discarded(&item, 3);
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.span, 4..14);
        assert!(diagnostic.message.starts_with("subheading"));

        let rendered = diagnostic.to_codespan();
        assert_eq!(rendered.labels[0].file_id, 3);
        assert_eq!(rendered.labels[0].message, "not part of any slide");
        assert_eq!(rendered.notes.len(), 1);
    }

    #[test]
    fn error_without_label() {
        let rendered = Diagnostic::error("bad", 0..1, 0).to_codespan();
        assert_eq!(rendered.severity, Severity::Error);
        assert!(rendered.labels[0].message.is_empty());
    }
}
