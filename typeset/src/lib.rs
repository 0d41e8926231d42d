pub mod chrome;
pub mod error;
pub mod measure;
pub mod page;
pub mod paginate;
pub mod render;
pub mod style;
pub mod title_page;
pub mod wrap;

pub use error::{LayoutError, MeasureError};
pub use measure::{BuiltinMetrics, FontSpec, TextMeasure};
pub use page::Document;
pub use paginate::{DraftLayout, PageCount, layout, typeset};
pub use style::Style;
