//! Page geometry and fonts derived from the resolved deck settings.

use deck::config::{ResolvedConfig, Rgb};
use serde::Serialize;

use crate::measure::FontSpec;

/// Which font a piece of text is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    Text,
    Subheading,
    Mono,
    Math,
    SlideTitle,
    Chrome,
    DeckTitle,
    DeckSubtitle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_x: f32,
    pub header_height: f32,
    pub footer_height: f32,
    pub title_band_height: f32,
    /// Top of the body region.
    pub body_top: f32,
    /// Bottom of the body region.
    pub body_bottom: f32,
    /// Vertical space after every body item.
    pub block_gap: f32,
    /// Line height as a multiple of font size.
    pub leading: f32,
    pub list_indent: f32,
    /// Horizontal space between the date and the page label.
    pub label_gap: f32,
    pub color: Rgb,
    text: FontSpec,
    subheading: FontSpec,
    mono: FontSpec,
    math: FontSpec,
    slide_title: FontSpec,
    chrome: FontSpec,
    deck_title: FontSpec,
    deck_subtitle: FontSpec,
}

impl Style {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let (page_width, page_height) = config.aspect_ratio.page_size();
        let header_height = config.chrome_size * 2.0;
        let footer_height = config.chrome_size * 2.0;
        let title_band_height = config.heading_size * 2.0;
        let gap = config.font_size * 0.6;

        Style {
            page_width,
            page_height,
            margin_x: page_width * 0.05,
            header_height,
            footer_height,
            title_band_height,
            body_top: header_height + title_band_height + gap,
            body_bottom: page_height - footer_height - gap,
            block_gap: config.font_size * 0.5,
            leading: 1.3,
            list_indent: config.font_size * 1.2,
            label_gap: config.chrome_size,
            color: config.color,
            text: FontSpec::new(&config.text_font, config.font_size),
            subheading: FontSpec::new(&config.heading_font, config.font_size * 1.1),
            mono: FontSpec::new(&config.mono_font, config.mono_size),
            math: FontSpec::new(&config.math_font, config.font_size),
            slide_title: FontSpec::new(&config.heading_font, config.heading_size),
            chrome: FontSpec::new(&config.heading_font, config.chrome_size),
            deck_title: FontSpec::new(&config.heading_font, config.heading_size * 1.4),
            deck_subtitle: FontSpec::new(&config.heading_font, config.heading_size),
        }
    }

    pub fn font(&self, role: FontRole) -> &FontSpec {
        match role {
            FontRole::Text => &self.text,
            FontRole::Subheading => &self.subheading,
            FontRole::Mono => &self.mono,
            FontRole::Math => &self.math,
            FontRole::SlideTitle => &self.slide_title,
            FontRole::Chrome => &self.chrome,
            FontRole::DeckTitle => &self.deck_title,
            FontRole::DeckSubtitle => &self.deck_subtitle,
        }
    }

    pub fn line_height(&self, role: FontRole) -> f32 {
        self.font(role).size * self.leading
    }

    pub fn body_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin_x
    }

    pub fn body_height(&self) -> f32 {
        self.body_bottom - self.body_top
    }
}
