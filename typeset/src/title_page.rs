//! The opening title page.

use deck::config::ResolvedConfig;

use crate::chrome::text_box;
use crate::error::Result;
use crate::measure::TextMeasure;
use crate::page::{LaidOutPage, PageKind, TextBox};
use crate::style::{FontRole, Style};

/// Relative heights of the spacers above, between and below the three groups.
const SPACER_WEIGHTS: [f32; 4] = [2.0, 1.0, 1.0, 2.0];

/// Compose page 1: title block, identity block and date block, stacked with
/// weighted spacers in the area above the footer. Multi-line fields are set
/// one line per text line; empty lines are left out.
pub fn compose(
    style: &Style,
    measure: &dyn TextMeasure,
    config: &ResolvedConfig,
) -> Result<LaidOutPage> {
    let groups = [
        group_lines(&[
            (config.title.as_str(), FontRole::DeckTitle),
            (config.subtitle.as_str(), FontRole::DeckSubtitle),
        ]),
        group_lines(&[
            (config.author.as_str(), FontRole::Text),
            (config.institute.as_str(), FontRole::Text),
        ]),
        group_lines(&[(config.date.as_str(), FontRole::Text)]),
    ];

    let group_height = |lines: &[(&str, FontRole)]| -> f32 {
        lines.iter().map(|(_, role)| style.line_height(*role)).sum()
    };
    let content_height: f32 = groups.iter().map(|g| group_height(g.as_slice())).sum();
    let available = style.page_height - style.footer_height;
    let spare = (available - content_height).max(0.0);
    let unit = spare / SPACER_WEIGHTS.iter().sum::<f32>();

    let mut body: Vec<TextBox> = Vec::new();
    let mut y = SPACER_WEIGHTS[0] * unit;
    for (group, weight) in groups.iter().zip(&SPACER_WEIGHTS[1..]) {
        for (text, role) in group {
            let mut line = text_box(style, measure, text, *role, 0.0, y)?;
            line.x = (style.page_width - line.width) / 2.0;
            body.push(line);
            y += style.line_height(*role);
        }
        y += weight * unit;
    }

    Ok(LaidOutPage {
        number: 1,
        kind: PageKind::Title,
        header: None,
        title_band: None,
        body,
        outline: Vec::new(),
    })
}

/// Split each field into its non-empty lines.
fn group_lines<'a>(fields: &[(&'a str, FontRole)]) -> Vec<(&'a str, FontRole)> {
    fields
        .iter()
        .flat_map(|&(text, role)| {
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(move |line| (line, role))
        })
        .collect()
}
