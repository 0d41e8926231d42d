use thiserror::Error;

/// Failure of the text measurement backend.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("invalid font size {size} for font {family:?}")]
    InvalidFontSize { family: String, size: f32 },

    #[error("cannot measure control character {0:?}")]
    ControlCharacter(char),

    #[error("font backend error: {0}")]
    Backend(String),
}

/// Failure while laying out the deck. Any of these aborts the whole document.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("text measurement failed: {0}")]
    Measure(#[from] MeasureError),

    #[error("page body has no room: the body region is {0:.2}pt tall")]
    BodyTooSmall(f32),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
