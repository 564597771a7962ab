use serde::{Deserialize, Serialize};

/// Default tick-count hint used by [`LinearScale::nice`].
pub const NICE_TICK_HINT: usize = 10;

/// Linear mapping from a data domain onto a pixel range.
///
/// The domain may be authored in either direction; `nice` rounds the lower
/// bound down and the upper bound up regardless of orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Returns `(min, max)` of the domain regardless of its direction.
    #[must_use]
    pub fn domain_extent(self) -> (f64, f64) {
        if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        }
    }

    /// Maps a domain value onto the range.
    ///
    /// Degenerate domains map everything onto `range_start`; non-finite input
    /// maps onto `range_start` as well so geometry stays finite.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 || !span.is_finite() || !value.is_finite() {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a range value back onto the domain.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 || !span.is_finite() || !pixel.is_finite() {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Extends the domain outward to round tick boundaries.
    ///
    /// One call performs two rounding passes: the step derived from the
    /// original extent can shift once the bounds move, and the second pass
    /// converges onto it.
    #[must_use]
    pub fn nice(self) -> Self {
        self.nice_with_count(NICE_TICK_HINT)
    }

    #[must_use]
    pub fn nice_with_count(mut self, count: usize) -> Self {
        for _ in 0..2 {
            let Some((_, _, step)) = tick_range(self.domain_extent(), count) else {
                return self;
            };
            let (min, max) = self.domain_extent();
            let nice_min = (min / step).floor() * step;
            let nice_max = (max / step).ceil() * step;
            if self.domain_start <= self.domain_end {
                self.domain_start = nice_min;
                self.domain_end = nice_max;
            } else {
                self.domain_start = nice_max;
                self.domain_end = nice_min;
            }
        }
        self
    }

    /// Returns human-friendly tick values inside the domain, ascending.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let Some((start, stop, step)) = tick_range(self.domain_extent(), count) else {
            let (min, max) = self.domain_extent();
            return if min.is_finite() && min == max {
                vec![min]
            } else {
                Vec::new()
            };
        };

        let first = (start / step).round();
        let last = (stop / step).round();
        if !first.is_finite() || !last.is_finite() || last < first {
            return Vec::new();
        }
        let n = (last - first).min(10_000.0) as usize;
        // Sub-unit steps divide by the inverse step so 0.1-steps yield 0.3, not 0.30000000000000004.
        let inverse = if step < 1.0 {
            Some((1.0 / step).round())
        } else {
            None
        };
        (0..=n)
            .map(|index| {
                let slot = first + index as f64;
                let value = match inverse {
                    Some(inverse) => slot / inverse,
                    None => slot * step,
                };
                if value == 0.0 { 0.0 } else { value }
            })
            .collect()
    }
}

/// Computes `(first_tick, last_tick, step)` for an ascending extent.
fn tick_range(extent: (f64, f64), count: usize) -> Option<(f64, f64, f64)> {
    let (min, max) = extent;
    let span = max - min;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }

    let target = count as f64;
    let mut step = 10_f64.powf((span / target).log10().floor());
    let err = target / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    if !step.is_finite() || step <= 0.0 {
        return None;
    }

    let start = (min / step).ceil() * step;
    let stop = (max / step).floor() * step;
    Some((start, stop, step))
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn nice_keeps_round_domains() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 400.0)).nice();
        assert_eq!(scale.domain(), (0.0, 100.0));
    }

    #[test]
    fn nice_extends_outward() {
        let scale = LinearScale::new((0.0, 75.0), (0.0, 400.0)).nice();
        assert_eq!(scale.domain(), (0.0, 80.0));

        let scale = LinearScale::new((-3.2, 97.1), (0.0, 400.0)).nice();
        assert_eq!(scale.domain(), (-10.0, 100.0));
    }

    #[test]
    fn nice_respects_reversed_domain() {
        let scale = LinearScale::new((75.0, 0.0), (400.0, 0.0)).nice();
        assert_eq!(scale.domain(), (80.0, 0.0));
    }

    #[test]
    fn degenerate_domain_is_left_alone_and_maps_to_range_start() {
        let scale = LinearScale::new((0.0, 0.0), (0.0, 300.0)).nice();
        assert_eq!(scale.domain(), (0.0, 0.0));
        assert_eq!(scale.map(42.0), 0.0);
        assert_eq!(scale.ticks(5), vec![0.0]);
    }

    #[test]
    fn ticks_follow_round_steps() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 400.0));
        assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(scale.ticks(2), vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn map_and_invert_round_trip() {
        let scale = LinearScale::new((10.0, 110.0), (0.0, 1000.0));
        let px = scale.map(42.5);
        assert!((scale.invert(px) - 42.5).abs() <= 1e-9);
        assert_eq!(scale.map(f64::NAN), 0.0);
    }
}
