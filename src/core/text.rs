use serde::{Deserialize, Serialize};

/// Font used for measuring and emitting text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }

    #[must_use]
    pub fn from_points(family: impl Into<String>, size_pt: f64) -> Self {
        Self::new(family, pt_to_px(size_pt))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Text measurement service. Hosts with a real font stack plug theirs in.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize;
}

/// Average-advance approximation: every glyph is `0.6em` wide, lines are `1.2em` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTextMeasurer {
    pub advance_em: f64,
    pub line_height_em: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize {
        let size = if font.size_px.is_finite() && font.size_px > 0.0 {
            font.size_px
        } else {
            0.0
        };
        TextSize {
            width: text.chars().count() as f64 * size * self.advance_em,
            height: size * self.line_height_em,
        }
    }
}

#[must_use]
pub fn pt_to_px(pt: f64) -> f64 {
    pt * 4.0 / 3.0
}

/// Truncates `text` with a trailing ellipsis until it fits `max_width`.
///
/// Returns the text unchanged when it already fits and an empty string when
/// not even the ellipsis fits.
#[must_use]
pub fn tailor_text(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: &FontSpec,
    max_width: f64,
) -> String {
    const ELLIPSIS: &str = "...";
    if !(max_width > 0.0) {
        return String::new();
    }
    if measurer.measure(text, font).width <= max_width {
        return text.to_owned();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut keep = chars.len();
    while keep > 0 {
        keep -= 1;
        let mut candidate: String = chars[..keep].iter().collect();
        candidate.push_str(ELLIPSIS);
        if measurer.measure(&candidate, font).width <= max_width {
            return candidate;
        }
    }
    String::new()
}
