use std::ops::Range;

/// A source split into its optional TOML front matter and Markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<'a> {
    /// Front matter text and its byte span in the source.
    pub front_matter: Option<(&'a str, Range<usize>)>,
    /// Markdown body and the byte offset where it starts.
    pub body: &'a str,
    pub body_offset: usize,
}

/// Split a leading `---` delimited front matter block off `source`.
///
/// Returns `Err(span)` when the opening delimiter is present but no closing
/// delimiter follows.
pub fn split(source: &str) -> Result<Split<'_>, Range<usize>> {
    let bom = if source.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
    let content = &source[bom..];

    let first_line_end = content.find('\n').unwrap_or(content.len());
    if content[..first_line_end].trim_end() != "---" {
        return Ok(Split {
            front_matter: None,
            body: content,
            body_offset: bom,
        });
    }

    let open_len = (first_line_end + 1).min(content.len());
    let after_open = &content[open_len..];

    let Some((close_start, close_end)) = closing_line(after_open) else {
        return Err(bom..bom + first_line_end);
    };

    let toml_start = bom + open_len;
    let toml_str = after_open[..close_start].trim_end_matches(['\r', '\n']);
    let body_offset = toml_start + (close_end + 1).min(after_open.len());

    Ok(Split {
        front_matter: Some((toml_str, toml_start..toml_start + toml_str.len())),
        body: &source[body_offset..],
        body_offset,
    })
}

/// Byte range of the first line that is exactly `---`, ignoring surrounding
/// whitespace. Lines like `----` or `---x` inside a TOML string do not count.
fn closing_line(text: &str) -> Option<(usize, usize)> {
    let mut start = 0;
    loop {
        let end = text[start..].find('\n').map_or(text.len(), |p| start + p);
        if text[start..end].trim() == "---" {
            return Some((start, end));
        }
        if end == text.len() {
            return None;
        }
        start = end + 1;
    }
}
