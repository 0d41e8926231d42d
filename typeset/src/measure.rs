//! Text measurement, the one layout primitive the engine needs from a font
//! backend.

use serde::Serialize;

use crate::error::MeasureError;

/// A font family at a size in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        FontSpec {
            family: family.into(),
            size,
        }
    }
}

/// Measures the advance width of a single-line string.
pub trait TextMeasure {
    /// Width of `text` in points when set in `font`.
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32, MeasureError>;
}

/// Approximate metrics from a per-character advance table.
///
/// Digits are not tabular: `1` is narrower than the others, so page labels of
/// the same length can differ in width.
#[derive(Debug, Clone, Default)]
pub struct BuiltinMetrics {
    mono_families: Vec<String>,
}

const MONO_ADVANCE: f32 = 0.6;
const TAB_SPACES: f32 = 4.0;

impl BuiltinMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `family` as monospaced.
    pub fn with_mono_family(mut self, family: impl Into<String>) -> Self {
        self.mono_families.push(family.into());
        self
    }

    fn is_mono(&self, family: &str) -> bool {
        self.mono_families.iter().any(|f| f == family)
    }
}

/// Advance of `c` in em.
fn advance(c: char) -> f32 {
    match c {
        ' ' => 0.25,
        '1' => 0.38,
        '0' | '2'..='9' => 0.5,
        '/' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.26,
        'i' | 'j' | 'l' => 0.24,
        'f' | 'r' | 't' => 0.33,
        'm' | 'w' => 0.78,
        'M' | 'W' => 0.9,
        'A'..='Z' => 0.66,
        'a'..='z' => 0.5,
        c if c.is_ascii_punctuation() => 0.4,
        _ => 0.6,
    }
}

impl TextMeasure for BuiltinMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32, MeasureError> {
        if !(font.size.is_finite() && font.size > 0.0) {
            return Err(MeasureError::InvalidFontSize {
                family: font.family.clone(),
                size: font.size,
            });
        }
        let mono = self.is_mono(&font.family);

        let mut em = 0.0;
        for c in text.chars() {
            em += match c {
                '\t' => TAB_SPACES * if mono { MONO_ADVANCE } else { advance(' ') },
                c if c.is_control() => return Err(MeasureError::ControlCharacter(c)),
                _ if mono => MONO_ADVANCE,
                c => advance(c),
            };
        }
        Ok(em * font.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_size() {
        let metrics = BuiltinMetrics::new();
        let small = metrics.measure("Slides", &FontSpec::new("Serif", 10.0)).unwrap();
        let large = metrics.measure("Slides", &FontSpec::new("Serif", 20.0)).unwrap();
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn digits_are_proportional() {
        let metrics = BuiltinMetrics::new();
        let font = FontSpec::new("Serif", 10.0);
        let ones = metrics.measure("11/11", &font).unwrap();
        let nines = metrics.measure("99/99", &font).unwrap();
        assert!(ones < nines);
    }

    #[test]
    fn mono_family_has_fixed_advance() {
        let metrics = BuiltinMetrics::new().with_mono_family("Mono");
        let font = FontSpec::new("Mono", 10.0);
        assert_eq!(
            metrics.measure("iiii", &font).unwrap(),
            metrics.measure("MMMM", &font).unwrap()
        );
        assert!((metrics.measure("ab", &font).unwrap() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_bad_font_size() {
        let metrics = BuiltinMetrics::new();
        assert!(matches!(
            metrics.measure("x", &FontSpec::new("Serif", 0.0)),
            Err(MeasureError::InvalidFontSize { .. })
        ));
    }

    #[test]
    fn rejects_control_characters() {
        let metrics = BuiltinMetrics::new();
        assert!(matches!(
            metrics.measure("a\u{7}", &FontSpec::new("Serif", 10.0)),
            Err(MeasureError::ControlCharacter('\u{7}'))
        ));
    }
}
