//! Value formatting: the format spec handed to the host formatting service,
//! a built-in locale/unit-aware formatter, and the append-only formatter cache.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Display-unit system used by axis labels.
pub const DISPLAY_UNIT_SYSTEM_DEFAULT: u8 = 0;
/// Display-unit system used by data labels.
pub const DISPLAY_UNIT_SYSTEM_DATA_LABELS: u8 = 3;

/// Everything the formatting service needs to build a formatter.
///
/// Two specs that serialize to the same JSON share one cached formatter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSpec {
    pub format: Option<String>,
    pub format_single_values: bool,
    /// Display unit (`1000`, `1e6`, ...) or, when auto, the magnitude used to pick one.
    pub value: Option<f64>,
    pub precision: Option<u8>,
    pub display_unit_system: u8,
    pub allow_format_beautification: bool,
    pub culture: Option<String>,
}

impl FormatSpec {
    #[must_use]
    pub fn with_format(format: Option<&str>) -> Self {
        Self {
            format: format.map(str::to_owned),
            ..Self::default()
        }
    }

    /// Serialized form used as the cache key.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

pub trait ValueFormatter: fmt::Debug {
    fn format(&self, value: f64) -> String;

    fn format_date(&self, value: DateTime<Utc>) -> String {
        self.format(value.timestamp_millis() as f64)
    }
}

/// Builds formatters from specs. The host may plug its own service in here.
pub trait FormatterFactory: fmt::Debug {
    fn create(&self, spec: &FormatSpec) -> Arc<dyn ValueFormatter>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormatterFactory;

impl FormatterFactory for BuiltinFormatterFactory {
    fn create(&self, spec: &FormatSpec) -> Arc<dyn ValueFormatter> {
        Arc::new(BuiltinFormatter::from_spec(spec))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayUnit {
    None,
    Thousands,
    Millions,
    Billions,
    Trillions,
}

impl DisplayUnit {
    const ALL_DESCENDING: [Self; 4] = [
        Self::Trillions,
        Self::Billions,
        Self::Millions,
        Self::Thousands,
    ];

    #[must_use]
    pub fn divisor(self) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Thousands => 1e3,
            Self::Millions => 1e6,
            Self::Billions => 1e9,
            Self::Trillions => 1e12,
        }
    }

    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Thousands => "K",
            Self::Millions => "M",
            Self::Billions => "bn",
            Self::Trillions => "T",
        }
    }

    /// Largest unit not exceeding `magnitude`.
    #[must_use]
    pub fn for_magnitude(magnitude: Option<f64>) -> Self {
        let Some(magnitude) = magnitude.filter(|value| value.is_finite()) else {
            return Self::None;
        };
        let magnitude = magnitude.abs();
        Self::ALL_DESCENDING
            .into_iter()
            .find(|unit| magnitude >= unit.divisor())
            .unwrap_or(Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Separators {
    decimal: char,
    group: char,
}

impl Separators {
    fn for_culture(culture: Option<&str>) -> Self {
        let language = culture
            .and_then(|culture| culture.split(['-', '_']).next())
            .unwrap_or("en")
            .to_ascii_lowercase();
        match language.as_str() {
            "de" | "es" | "it" | "pt" | "nl" | "da" | "id" | "tr" | "el" | "ro" | "hr" | "sl" => {
                Self {
                    decimal: ',',
                    group: '.',
                }
            }
            "fr" | "ru" | "pl" | "cs" | "sk" | "sv" | "fi" | "nb" | "no" | "uk" | "hu" | "bg"
            | "lt" | "lv" | "et" => Self {
                decimal: ',',
                group: ' ',
            },
            _ => Self {
                decimal: '.',
                group: ',',
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Pattern {
    Number {
        prefix: String,
        suffix: String,
        decimals: Option<usize>,
        grouping: bool,
        percent: bool,
    },
    Date {
        chrono_pattern: String,
    },
}

/// Default formatter: number patterns (`0`, `#,0.00`, `0.0%`, `\$#,0`), .NET
/// style date patterns, display units and culture-specific separators.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinFormatter {
    pattern: Pattern,
    unit: DisplayUnit,
    precision: Option<usize>,
    separators: Separators,
}

impl BuiltinFormatter {
    #[must_use]
    pub fn from_spec(spec: &FormatSpec) -> Self {
        let culture = spec.culture.as_deref();
        let format = spec
            .format
            .as_deref()
            .map(|format| format.split(';').next().unwrap_or(format).trim())
            .filter(|format| !format.is_empty());
        let pattern = match format {
            Some(format) if is_date_pattern(format) => Pattern::Date {
                chrono_pattern: date_pattern_to_chrono(format, culture),
            },
            Some(format) => parse_number_pattern(format),
            None => Pattern::Number {
                prefix: String::new(),
                suffix: String::new(),
                decimals: None,
                grouping: false,
                percent: false,
            },
        };
        let unit = match &pattern {
            Pattern::Number { percent: false, .. } => DisplayUnit::for_magnitude(spec.value),
            _ => DisplayUnit::None,
        };
        Self {
            pattern,
            unit,
            precision: spec.precision.map(|precision| usize::from(precision.min(15))),
            separators: Separators::for_culture(culture),
        }
    }

    #[must_use]
    pub fn display_unit(&self) -> DisplayUnit {
        self.unit
    }

    fn format_number(
        &self,
        value: f64,
        prefix: &str,
        suffix: &str,
        decimals: Option<usize>,
        grouping: bool,
        percent: bool,
    ) -> String {
        let mut scaled = if percent { value * 100.0 } else { value };
        scaled /= self.unit.divisor();

        let digits = match self.precision.or(decimals) {
            Some(precision) => format!("{:.*}", precision, scaled.abs()),
            None => trim_fraction(&format!("{:.2}", scaled.abs())),
        };
        let is_zero = digits.chars().all(|ch| matches!(ch, '0' | '.'));
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + prefix.len() + suffix.len() + 4);
        if scaled < 0.0 && !is_zero {
            out.push('-');
        }
        out.push_str(prefix);
        if grouping {
            push_grouped(&mut out, integer, self.separators.group);
        } else {
            out.push_str(integer);
        }
        if let Some(fraction) = fraction {
            out.push(self.separators.decimal);
            out.push_str(fraction);
        }
        out.push_str(self.unit.suffix());
        if percent {
            out.push('%');
        }
        out.push_str(suffix);
        out
    }
}

impl ValueFormatter for BuiltinFormatter {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        match &self.pattern {
            Pattern::Number {
                prefix,
                suffix,
                decimals,
                grouping,
                percent,
            } => self.format_number(value, prefix, suffix, *decimals, *grouping, *percent),
            Pattern::Date { .. } => match DateTime::<Utc>::from_timestamp_millis(value as i64) {
                Some(date) => self.format_date(date),
                None => value.to_string(),
            },
        }
    }

    fn format_date(&self, value: DateTime<Utc>) -> String {
        match &self.pattern {
            Pattern::Date { chrono_pattern } => value.format(chrono_pattern).to_string(),
            Pattern::Number { .. } => {
                let pattern = default_date_pattern(None);
                value.format(pattern).to_string()
            }
        }
    }
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text.to_owned()
    }
}

fn push_grouped(out: &mut String, integer: &str, separator: char) {
    let len = integer.len();
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
}

fn parse_number_pattern(format: &str) -> Pattern {
    let unescaped: String = format.chars().filter(|ch| *ch != '\\').collect();
    let is_placeholder = |ch: char| matches!(ch, '0' | '#' | ',' | '.');
    let body_start = unescaped.find(is_placeholder);
    let body_end = unescaped.rfind(is_placeholder).map(|index| index + 1);

    let (prefix, body, suffix) = match (body_start, body_end) {
        (Some(start), Some(end)) if start < end => (
            &unescaped[..start],
            &unescaped[start..end],
            &unescaped[end..],
        ),
        _ => ("", "", ""),
    };
    let percent = unescaped.contains('%');
    let decimals = body.split_once('.').map_or_else(
        || (!body.is_empty()).then_some(0),
        |(_, fraction)| {
            Some(
                fraction
                    .chars()
                    .filter(|ch| matches!(ch, '0' | '#'))
                    .count(),
            )
        },
    );

    Pattern::Number {
        prefix: prefix.to_owned(),
        suffix: suffix.replace('%', ""),
        decimals,
        grouping: body.contains(','),
        percent,
    }
}

fn is_date_pattern(format: &str) -> bool {
    if matches!(format, "d" | "D" | "g" | "G" | "f" | "F") {
        return true;
    }
    !format.contains(['0', '#'])
        && format
            .chars()
            .any(|ch| matches!(ch, 'd' | 'M' | 'y' | 'H' | 'h' | 'm' | 's'))
}

fn default_date_pattern(culture: Option<&str>) -> &'static str {
    match culture.map(|culture| culture.to_ascii_lowercase()) {
        Some(culture) if !culture.starts_with("en") => "%d/%m/%Y",
        _ => "%-m/%-d/%Y",
    }
}

/// Translates .NET style date tokens into a chrono format string.
fn date_pattern_to_chrono(format: &str, culture: Option<&str>) -> String {
    match format {
        "d" => return default_date_pattern(culture).to_owned(),
        "D" | "f" | "F" => return "%A, %B %-d, %Y".to_owned(),
        "g" | "G" => return format!("{} %-I:%M %p", default_date_pattern(culture)),
        _ => {}
    }

    const TOKENS: [(&str, &str); 17] = [
        ("yyyy", "%Y"),
        ("yy", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("M", "%-m"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("dd", "%d"),
        ("d", "%-d"),
        ("HH", "%H"),
        ("H", "%-H"),
        ("hh", "%I"),
        ("h", "%-I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("tt", "%p"),
    ];

    let mut out = String::with_capacity(format.len() * 2);
    let mut rest = format;
    'outer: while !rest.is_empty() {
        for (token, replacement) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            if ch == '%' {
                out.push_str("%%");
            } else if ch != '\\' {
                out.push(ch);
            }
        }
        rest = chars.as_str();
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FormatCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Memoizes spec → formatter for the lifetime of its owner.
///
/// Append-only: entries are never evicted, so the formatter for a given
/// canonical spec is created exactly once.
#[derive(Debug)]
pub struct FormatCache {
    factory: Box<dyn FormatterFactory>,
    entries: IndexMap<String, Arc<dyn ValueFormatter>>,
    hits: u64,
    misses: u64,
}

impl Default for FormatCache {
    fn default() -> Self {
        Self::new(Box::new(BuiltinFormatterFactory))
    }
}

impl FormatCache {
    #[must_use]
    pub fn new(factory: Box<dyn FormatterFactory>) -> Self {
        Self {
            factory,
            entries: IndexMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn formatter(&mut self, spec: &FormatSpec) -> Arc<dyn ValueFormatter> {
        let key = spec.canonical_key();
        if let Some(formatter) = self.entries.get(&key) {
            self.hits = self.hits.saturating_add(1);
            return Arc::clone(formatter);
        }
        self.misses = self.misses.saturating_add(1);
        let formatter = self.factory.create(spec);
        self.entries.insert(key, Arc::clone(&formatter));
        formatter
    }

    pub fn format(&mut self, value: f64, spec: &FormatSpec) -> String {
        self.formatter(spec).format(value)
    }

    #[must_use]
    pub fn stats(&self) -> FormatCacheStats {
        FormatCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(format: Option<&str>) -> BuiltinFormatter {
        BuiltinFormatter::from_spec(&FormatSpec::with_format(format))
    }

    #[test]
    fn auto_precision_trims_trailing_zeros() {
        assert_eq!(formatter(None).format(75.0), "75");
        assert_eq!(formatter(None).format(12.345), "12.35");
        assert_eq!(formatter(None).format(-0.001), "0");
    }

    #[test]
    fn explicit_patterns_drive_decimals_grouping_and_percent() {
        assert_eq!(formatter(Some("#,0.00")).format(1234567.891), "1,234,567.89");
        assert_eq!(formatter(Some("0.0%")).format(0.256), "25.6%");
        assert_eq!(formatter(Some("\\$#,0")).format(-1500.0), "-$1,500");
    }

    #[test]
    fn display_units_follow_magnitude() {
        let spec = FormatSpec {
            value: Some(2_500_000.0),
            precision: Some(1),
            ..FormatSpec::default()
        };
        assert_eq!(BuiltinFormatter::from_spec(&spec).format(1_260_000.0), "1.3M");
    }

    #[test]
    fn culture_changes_separators() {
        let spec = FormatSpec {
            format: Some("#,0.00".to_owned()),
            culture: Some("de-DE".to_owned()),
            ..FormatSpec::default()
        };
        assert_eq!(BuiltinFormatter::from_spec(&spec).format(1234.5), "1.234,50");
    }

    #[test]
    fn date_tokens_translate() {
        assert_eq!(date_pattern_to_chrono("dd/MM/yyyy", None), "%d/%m/%Y");
        assert_eq!(date_pattern_to_chrono("MMM yy", None), "%b %y");
        let date = DateTime::<Utc>::from_timestamp(0, 0).expect("epoch");
        assert_eq!(formatter(Some("yyyy-MM-dd")).format_date(date), "1970-01-01");
    }
}
