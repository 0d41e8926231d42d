//! Deck settings and the style resolver.
//!
//! [`DeckConfig`] mirrors the authored configuration, where several values
//! may be `"auto"`. [`DeckConfig::resolve`] turns it into a [`ResolvedConfig`]
//! with every fallback applied, which is what rendering consumes.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid aspect ratio {0:?} (expected \"16-9\" or \"4-3\")")]
    InvalidAspectRatio(String),

    #[error("invalid color {0:?} (expected #RRGGBB or #RGB)")]
    InvalidColor(String),

    #[error("invalid size {0:?} (expected a number of points, \"<n>pt\" or \"auto\")")]
    InvalidSize(String),

    #[error("{name} must be positive, got {value}")]
    NonPositiveSize { name: &'static str, value: f32 },

    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A text setting that may be `"auto"` (or left out) to fall back on another.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum AutoText {
    #[default]
    Auto,
    Text(String),
}

impl From<String> for AutoText {
    fn from(s: String) -> Self {
        if s == "auto" { AutoText::Auto } else { AutoText::Text(s) }
    }
}

impl AutoText {
    fn or_fallback(&self, fallback: &str) -> String {
        match self {
            AutoText::Auto => fallback.to_string(),
            AutoText::Text(s) => s.clone(),
        }
    }
}

/// A size in points, or `"auto"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawSize")]
pub enum Size {
    #[default]
    Auto,
    Points(f32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(f64),
    Text(String),
}

impl TryFrom<RawSize> for Size {
    type Error = ConfigError;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        match raw {
            RawSize::Number(n) => Ok(Size::Points(n as f32)),
            RawSize::Text(s) => {
                let trimmed = s.trim();
                if trimmed == "auto" {
                    return Ok(Size::Auto);
                }
                trimmed
                    .strip_suffix("pt")
                    .unwrap_or(trimmed)
                    .trim()
                    .parse::<f32>()
                    .map(Size::Points)
                    .map_err(|_| ConfigError::InvalidSize(s.clone()))
            }
        }
    }
}

impl Size {
    fn or_scaled(self, base: f32, factor: f32) -> f32 {
        match self {
            Size::Auto => base * factor,
            Size::Points(pt) => pt,
        }
    }
}

/// Page shape of the deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum AspectRatio {
    #[default]
    Wide,
    Standard,
}

impl TryFrom<String> for AspectRatio {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "16-9" => Ok(AspectRatio::Wide),
            "4-3" => Ok(AspectRatio::Standard),
            _ => Err(ConfigError::InvalidAspectRatio(s)),
        }
    }
}

impl AspectRatio {
    /// Page width and height in points.
    pub fn page_size(self) -> (f32, f32) {
        match self {
            AspectRatio::Wide => (841.89, 473.56),
            AspectRatio::Standard => (793.7, 595.28),
        }
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` or `#RGB`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                let short = |k: usize| channel(&hex[k..k + 1]).map(|v| v * 17);
                Ok(Rgb {
                    r: short(0)?,
                    g: short(1)?,
                    b: short(2)?,
                })
            }
            _ => Err(invalid()),
        }
    }
}

/// Deck settings as authored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DeckConfig {
    pub title: String,
    pub subtitle: String,
    pub short_title: AutoText,
    pub author: String,
    pub short_author: AutoText,
    pub institute: String,
    pub short_institute: Option<AutoText>,
    pub date: String,
    pub color: String,
    pub font_size: Size,
    pub text_font: String,
    pub heading_font: String,
    pub mono_font: String,
    pub math_font: String,
    pub heading_size: Size,
    pub mono_size: Size,
    pub chrome_size: Size,
    pub aspect_ratio: AspectRatio,
}

impl Default for DeckConfig {
    fn default() -> Self {
        DeckConfig {
            title: String::new(),
            subtitle: String::new(),
            short_title: AutoText::Auto,
            author: String::new(),
            short_author: AutoText::Auto,
            institute: String::new(),
            short_institute: None,
            date: String::new(),
            color: "#1f4e79".to_string(),
            font_size: Size::Points(20.0),
            text_font: "Libertinus Serif".to_string(),
            heading_font: "Inria Sans".to_string(),
            mono_font: "DejaVu Sans Mono".to_string(),
            math_font: "New Computer Modern Math".to_string(),
            heading_size: Size::Auto,
            mono_size: Size::Auto,
            chrome_size: Size::Auto,
            aspect_ratio: AspectRatio::Wide,
        }
    }
}

impl DeckConfig {
    pub fn from_table(table: toml::Table) -> Result<Self, ConfigError> {
        Ok(toml::Value::Table(table).try_into()?)
    }

    /// Read a config file as a raw table, for layering under front matter.
    pub fn load_table(path: &Path) -> Result<toml::Table, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Build a config from a base table with `overrides` applied key by key.
    pub fn layered(mut base: toml::Table, overrides: toml::Table) -> Result<Self, ConfigError> {
        base.extend(overrides);
        Self::from_table(base)
    }

    /// Apply every fallback and validate the result.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let font_size = self.font_size.or_scaled(20.0, 1.0);
        let sizes = [
            ("font-size", font_size),
            ("heading-size", self.heading_size.or_scaled(font_size, 1.4)),
            ("mono-size", self.mono_size.or_scaled(font_size, 0.9)),
            ("chrome-size", self.chrome_size.or_scaled(font_size, 0.6)),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveSize { name, value });
            }
        }
        let [_, (_, heading_size), (_, mono_size), (_, chrome_size)] = sizes;

        Ok(ResolvedConfig {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            short_title: one_line(&self.short_title.or_fallback(&self.title)),
            author: self.author.clone(),
            short_author: one_line(&self.short_author.or_fallback(&self.author)),
            institute: self.institute.clone(),
            short_institute: self
                .short_institute
                .as_ref()
                .map(|s| one_line(&s.or_fallback(&self.institute)))
                .unwrap_or_default(),
            date: self.date.clone(),
            color: Rgb::parse(&self.color)?,
            font_size,
            text_font: self.text_font.clone(),
            heading_font: self.heading_font.clone(),
            mono_font: self.mono_font.clone(),
            math_font: self.math_font.clone(),
            heading_size,
            mono_size,
            chrome_size,
            aspect_ratio: self.aspect_ratio,
        })
    }
}

/// Collapse whitespace, including the line breaks of TOML multi-line strings,
/// for text that is set on a single chrome line.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deck settings with every fallback applied.
///
/// `title`, `subtitle`, `author`, `institute` and `date` keep their line
/// breaks for the title page; the short fields are single lines, and the
/// footer takes the date from [`ResolvedConfig::footer_date`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub title: String,
    pub subtitle: String,
    pub short_title: String,
    pub author: String,
    pub short_author: String,
    pub institute: String,
    pub short_institute: String,
    pub date: String,
    pub color: Rgb,
    pub font_size: f32,
    pub text_font: String,
    pub heading_font: String,
    pub mono_font: String,
    pub math_font: String,
    pub heading_size: f32,
    pub mono_size: f32,
    pub chrome_size: f32,
    pub aspect_ratio: AspectRatio,
}

impl ResolvedConfig {
    /// The date as set in the footer, on one line.
    pub fn footer_date(&self) -> String {
        one_line(&self.date)
    }

    /// Footer identity text: short author, then short institute if any.
    pub fn identity(&self) -> String {
        match (self.short_author.is_empty(), self.short_institute.is_empty()) {
            (_, true) => self.short_author.clone(),
            (true, false) => self.short_institute.clone(),
            (false, false) => format!("{} · {}", self.short_author, self.short_institute),
        }
    }
}
