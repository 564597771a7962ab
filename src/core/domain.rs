use serde::{Deserialize, Serialize};

/// Shared value domain for every bullet in one pass.
///
/// Forced bounds come from the axis settings and are never moved by data.
/// Unforced bounds start at zero and widen to the min/max of every
/// contributing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub start: f64,
    pub end: f64,
    pub start_forced: bool,
    pub end_forced: bool,
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Domain {
    #[must_use]
    pub fn new(forced_start: Option<f64>, forced_end: Option<f64>) -> Self {
        let forced_start = forced_start.filter(|value| value.is_finite());
        let forced_end = forced_end.filter(|value| value.is_finite());
        Self {
            start: forced_start.unwrap_or(0.0),
            end: forced_end.unwrap_or(0.0),
            start_forced: forced_start.is_some(),
            end_forced: forced_end.is_some(),
        }
    }

    /// Widens the unforced bounds to include `value`; non-finite values are ignored.
    pub fn include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if !self.start_forced {
            self.start = self.start.min(value);
        }
        if !self.end_forced {
            self.end = self.end.max(value);
        }
    }

    pub fn include_opt(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.include(value);
        }
    }

    /// Repairs degenerate bounds in place: non-finite bounds become zero and
    /// an end below the start is raised to the start.
    pub fn normalize(&mut self) {
        if !self.start.is_finite() {
            self.start = 0.0;
        }
        if !self.end.is_finite() {
            self.end = 0.0;
        }
        if self.start > self.end {
            self.end = self.start;
        }
    }

    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.start;
        }
        value.max(self.start).min(self.end)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }

    /// Resolves a domain fraction (`0.0..=1.0`) into a domain value.
    #[must_use]
    pub fn at_fraction(self, fraction: f64) -> f64 {
        self.start + self.span() * fraction
    }

    /// Inverse of [`Domain::at_fraction`]; a zero-width domain yields `0.0`.
    #[must_use]
    pub fn fraction_of(self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            0.0
        } else {
            (value - self.start) / span
        }
    }
}
