pub mod frontmatter;
mod structural;

use crate::Source;
use crate::config::DeckConfig;
use crate::diagnostic::Diagnostic;

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Parse front matter and Markdown body into a deck [`Source`].
    pub fn parse(&self) -> Result<Source, Vec<Diagnostic>> {
        let split = frontmatter::split(&self.source).map_err(|span| {
            vec![
                Diagnostic::error("front matter is never closed", span, self.file_id)
                    .with_note("end the front matter with a line containing only `---`"),
            ]
        })?;

        let front_matter = match &split.front_matter {
            Some((text, span)) => self.parse_front_matter(text, span.start)?,
            None => toml::Table::new(),
        };
        let config = DeckConfig::from_table(front_matter.clone()).map_err(|e| {
            let span = split
                .front_matter
                .as_ref()
                .map(|(_, span)| span.clone())
                .unwrap_or(0..0);
            vec![Diagnostic::error(e.to_string(), span, self.file_id)]
        })?;

        let blocks = structural::parse_blocks(split.body, split.body_offset);

        Ok(Source {
            config,
            front_matter,
            blocks,
        })
    }

    fn parse_front_matter(&self, text: &str, offset: usize) -> Result<toml::Table, Vec<Diagnostic>> {
        toml::from_str::<toml::Table>(text).map_err(|e| {
            let span = e
                .span()
                .map(|s| offset + s.start..offset + s.end)
                .unwrap_or(offset..offset + text.len());
            vec![Diagnostic::error(
                format!("invalid front matter: {}", e.message()),
                span,
                self.file_id,
            )]
        })
    }
}
