pub mod color;
pub mod domain;
pub mod format;
pub mod scale;
pub mod text;
pub mod types;

pub use color::{ColorPalette, Hsl, Rgb, ThemePalette};
pub use domain::Domain;
pub use format::{
    BuiltinFormatter, BuiltinFormatterFactory, FormatCache, FormatCacheStats, FormatSpec,
    FormatterFactory, ValueFormatter,
};
pub use scale::LinearScale;
pub use text::{FontSpec, HeuristicTextMeasurer, TextMeasurer, TextSize};
pub use types::{Margin, Point, Rect, Size, Viewport};
