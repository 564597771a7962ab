use crate::core::Domain;
use crate::model::StateBand;
use crate::settings::{StateSettings, StatesCalculation};

/// Number of bands every bullet shows.
pub const EFFECTIVE_BAND_COUNT: usize = 5;
/// Step used to synthesize a missing band boundary, as a fraction of the domain.
const SYNTHESIZED_STEP: f64 = 0.2;

/// Band boundaries after padding, synthesis and clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBand {
    pub from: f64,
    pub to: f64,
    pub color: String,
    pub display_name: Option<String>,
}

fn configured_band(settings: &StateSettings, ordinal: usize) -> StateBand {
    StateBand {
        value: settings.values.get(ordinal).copied().flatten(),
        color: settings.fill_for_ordinal(ordinal).to_owned(),
        display_name: None,
        format: match settings.calculate {
            StatesCalculation::Percentage => "%".to_owned(),
            StatesCalculation::Absolute => String::new(),
        },
        selection: None,
    }
}

/// Resolves the contiguous bands of one bullet.
///
/// Lists shorter than five are padded with the configured band of the same
/// ordinal. A missing boundary becomes the previous boundary plus a fifth of
/// the domain, except in the fifth position where it becomes the domain end.
/// Percentage values are domain fractions. Every boundary is clamped into the
/// domain and never moves backwards, so bands run from `domain.start` without
/// gaps or overlaps.
#[must_use]
pub fn resolve_state_bands(
    explicit: &[StateBand],
    settings: &StateSettings,
    domain: Domain,
) -> Vec<ResolvedBand> {
    let mut bands: Vec<StateBand> = explicit.to_vec();
    while bands.len() < EFFECTIVE_BAND_COUNT {
        bands.push(configured_band(settings, bands.len()));
    }

    let mut last = domain.start;
    bands
        .into_iter()
        .enumerate()
        .map(|(ordinal, band)| {
            let percentage = band.is_percentage();
            let value = match band.value.filter(|value| value.is_finite()) {
                Some(value) if percentage => domain.at_fraction(value),
                Some(value) => value,
                None if ordinal == EFFECTIVE_BAND_COUNT - 1 => domain.end,
                None if percentage => {
                    domain.at_fraction(domain.fraction_of(last) + SYNTHESIZED_STEP)
                }
                None => last + domain.span() * SYNTHESIZED_STEP,
            };
            let to = domain.clamp(value).max(last);
            let resolved = ResolvedBand {
                from: last,
                to,
                color: band.color,
                display_name: band.display_name,
            };
            last = to;
            resolved
        })
        .collect()
}
