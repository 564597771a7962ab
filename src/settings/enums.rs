use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

impl Orientation {
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// How a bullet value is compared against its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[default]
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "=")]
    Equal,
}

impl ComparisonOperator {
    #[must_use]
    pub fn satisfied(self, value: f64, target: f64) -> bool {
        match self {
            Self::Less => value < target,
            Self::LessOrEqual => value <= target,
            Self::Greater => value > target,
            Self::GreaterOrEqual => value >= target,
            Self::Equal => value == target,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Equal => "=",
        }
    }
}

/// Interpretation of configured state values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatesCalculation {
    /// Values are domain fractions in `[0, 1]`.
    #[default]
    Percentage,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
    TopCenter,
    BottomCenter,
    LeftCenter,
    RightCenter,
}

impl LegendPosition {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            Self::Top | Self::Bottom | Self::TopCenter | Self::BottomCenter
        )
    }
}

/// Color-vision simulation applied to the finished frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VisionMode {
    #[default]
    Normal,
    Protanopia,
    Protanomaly,
    Deuteranopia,
    Deuteranomaly,
    Tritanopia,
    Tritanomaly,
    Achromatopsia,
    Achromatomaly,
}
