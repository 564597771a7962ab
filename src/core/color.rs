//! Stateless color helpers: hex/RGB/HSL conversion, shading and blending,
//! auto-contrast text color and the default palettes used by the chart.

use serde::{Deserialize, Serialize};

use crate::error::{BulletError, BulletResult};
use crate::settings::ComparisonOperator;

/// 24-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness on a 0..=255 scale (W3C formula).
    #[must_use]
    pub fn brightness(self) -> f64 {
        ((f64::from(self.r) * 299.0) + (f64::from(self.g) * 587.0) + (f64::from(self.b) * 114.0))
            / 1000.0
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Adds a leading `#` and expands 3-digit shorthand (`#abc` → `#aabbcc`).
#[must_use]
pub fn normalize_hex(hex: &str) -> String {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() == 3 {
        let mut expanded = String::with_capacity(7);
        expanded.push('#');
        for ch in digits.chars() {
            expanded.push(ch);
            expanded.push(ch);
        }
        expanded
    } else {
        format!("#{digits}")
    }
}

pub fn hex_to_rgb(hex: &str) -> BulletResult<Rgb> {
    let normalized = normalize_hex(hex);
    let digits = &normalized[1..];
    if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(BulletError::InvalidColor(format!(
            "`{hex}` is not a #rgb or #rrggbb color"
        )));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| BulletError::InvalidColor(format!("`{hex}`: {e}")))
    };
    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

pub fn hex_to_hsl(hex: &str) -> BulletResult<Hsl> {
    Ok(rgb_to_hsl(hex_to_rgb(hex)?))
}

#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    Hsl { h, s, l }
}

#[must_use]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = if hsl.h.is_finite() {
        hsl.h.rem_euclid(360.0)
    } else {
        0.0
    };
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let channel = |value: f64| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(r), channel(g), channel(b))
}

#[must_use]
pub fn hsl_to_hex(hsl: Hsl) -> String {
    rgb_to_hex(hsl_to_rgb(hsl))
}

/// Scales saturation by `percent`.
///
/// With a `base` color the result interpolates from `base` toward `hex`
/// instead, which reads better for tinted palettes than HSL saturation.
pub fn saturate_color(hex: &str, percent: f64, base: Option<&str>) -> BulletResult<String> {
    match base {
        Some(base) => {
            let rgb = hex_to_rgb(hex)?;
            let base = hex_to_rgb(base)?;
            let mix = |from: u8, to: u8| {
                let from = f64::from(from);
                (from + (f64::from(to) - from) * percent)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            Ok(rgb_to_hex(Rgb::new(
                mix(base.r, rgb.r),
                mix(base.g, rgb.g),
                mix(base.b, rgb.b),
            )))
        }
        None => {
            let mut hsl = hex_to_hsl(hex)?;
            hsl.s *= percent;
            Ok(hsl_to_hex(hsl))
        }
    }
}

/// Shades `color` toward black (`p < 0`) or white (`p > 0`), or blends it
/// toward `target` when given. `|p|` is the blend amount in `[0, 1]`.
pub fn shade_blend(p: f64, color: &str, target: Option<&str>) -> BulletResult<String> {
    let amount = p.abs().min(1.0);
    let from = hex_to_rgb(color)?;
    let to = match target {
        Some(target) => hex_to_rgb(target)?,
        None if p < 0.0 => Rgb::BLACK,
        None => Rgb::WHITE,
    };
    let mix = |from: u8, to: u8| {
        let from = f64::from(from);
        ((f64::from(to) - from) * amount + from)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Ok(rgb_to_hex(Rgb::new(
        mix(from.r, to.r),
        mix(from.g, to.g),
        mix(from.b, to.b),
    )))
}

/// Picks a readable text color for `background`.
///
/// Light backgrounds get `normal` (or a 60% darker shade of the background),
/// dark backgrounds get `inverted` (or white).
pub fn auto_text_color(
    background: &str,
    normal: Option<&str>,
    inverted: Option<&str>,
) -> BulletResult<String> {
    let rgb = hex_to_rgb(background)?;
    if rgb.brightness().round() > 125.0 {
        match normal {
            Some(normal) => Ok(normal.to_owned()),
            None => shade_blend(-0.6, &normalize_hex(background), None),
        }
    } else {
        Ok(inverted.unwrap_or("#ffffff").to_owned())
    }
}

const GRAY_SCHEME: [&str; 11] = [
    "#999", "#8f8f8f", "#858585", "#7a7a7a", "#707070", "#666", "#5c5c5c", "#525252", "#474747",
    "#3d3d3d", "#333",
];
const RED_SCHEME: [&str; 11] = [
    "#fcb1af", "#fc9d9c", "#fc8b88", "#fc7775", "#fa6461", "#fd625e", "#fa3e3d", "#fa2c2d",
    "#ef131a", "#db1217", "#b40e12",
];
const GREEN_SCHEME: [&str; 11] = [
    "#99d5d7", "#7cc9cc", "#4cb7bd", "#5fbdc1", "#48adb2", "#399599", "#328285", "#307376",
    "#2a6567", "#245759", "#1e484a",
];

/// Base palette for `length` state bands given the target comparison operator.
///
/// "Less than" operators read as alerts (red), equality as neutral (gray),
/// everything else as positive (green). Palettes longer than the scheme are
/// padded with `#333`.
#[must_use]
pub fn default_palette_for_states(length: usize, operator: ComparisonOperator) -> Vec<String> {
    const BEST_POSITION: usize = 6;
    let scheme: &[&str] = match operator {
        ComparisonOperator::Less | ComparisonOperator::LessOrEqual => &RED_SCHEME,
        ComparisonOperator::Equal => &GRAY_SCHEME,
        ComparisonOperator::Greater | ComparisonOperator::GreaterOrEqual => &GREEN_SCHEME,
    };

    let mut colors: Vec<String> = if length <= BEST_POSITION {
        scheme[BEST_POSITION - length..BEST_POSITION]
            .iter()
            .map(|color| (*color).to_owned())
            .collect()
    } else {
        scheme[..length.min(scheme.len())]
            .iter()
            .map(|color| (*color).to_owned())
            .collect()
    };
    colors.resize(length, "#333".to_owned());
    colors
}

/// Host color palette: hands out a stable color per key.
pub trait ColorPalette {
    fn color_for(&self, key: &str) -> String;
}

/// Default theme palette, assigning colors to keys in first-seen order.
#[derive(Debug, Default)]
pub struct ThemePalette {
    assigned: std::cell::RefCell<indexmap::IndexMap<String, usize>>,
}

impl ThemePalette {
    pub const COLORS: [&'static str; 10] = [
        "#01B8AA", "#374649", "#FD625E", "#F2C80F", "#5F6B6D", "#8AD4EB", "#FE9666", "#A66999",
        "#3599B8", "#DFBFBF",
    ];
}

impl ColorPalette for ThemePalette {
    fn color_for(&self, key: &str) -> String {
        let mut assigned = self.assigned.borrow_mut();
        let next = assigned.len();
        let slot = *assigned.entry(key.to_owned()).or_insert(next);
        Self::COLORS[slot % Self::COLORS.len()].to_owned()
    }
}
