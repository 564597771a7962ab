use tracing::{debug, trace, warn};

use crate::core::format::FormatSpec;
use crate::core::{ColorPalette, Domain, FormatCache};
use crate::data::{
    CategorySeries, CategoryValue, DataTable, MarkerShape, SelectionId, SeriesRole, ValueSeries,
};
use crate::settings::{SettingsInput, StatesCalculation, VisualSettings};

use super::{
    DataPoint, EnumerationEntry, LegendCustomIcon, LegendEntry, LegendIcon, StateBand, Target,
    TooltipRow, ViewModel,
};

const BLANK_LABEL: &str = "(Blank)";
const DEFAULT_COMPARISON_FILL: &str = "#99E3DD";
const TOOLTIP_FALLBACK_COLOR: &str = "#333";
const MAX_CATEGORY_LABEL_CHARS: usize = 256;
const MAX_URL_LEN: usize = 2083;

/// Services the host lends to a build.
#[derive(Clone, Copy)]
pub struct HostServices<'a> {
    pub locale: &'a str,
    pub palette: &'a dyn ColorPalette,
}

impl std::fmt::Debug for HostServices<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Turns a role-tagged table and user settings into a [`ViewModel`].
///
/// Building never fails: nulls, unknown roles and missing columns degrade to
/// defaults.
#[derive(Debug)]
pub struct ViewModelBuilder<'a> {
    host: HostServices<'a>,
    cache: &'a mut FormatCache,
}

/// Accumulators shared by every category of one build.
#[derive(Debug, Default)]
struct BuildState {
    enumeration: Vec<EnumerationEntry>,
    legend: Vec<LegendEntry>,
    legend_custom_icons: Vec<LegendCustomIcon>,
    domain: Domain,
    has_highlights: bool,
    has_categories: bool,
}

impl BuildState {
    fn has_legend_label(&self, label: &str) -> bool {
        self.legend.iter().any(|entry| entry.label == label)
    }
}

impl<'a> ViewModelBuilder<'a> {
    #[must_use]
    pub fn new(host: HostServices<'a>, cache: &'a mut FormatCache) -> Self {
        Self { host, cache }
    }

    #[must_use]
    pub fn build(&mut self, table: &DataTable, settings: &SettingsInput) -> ViewModel {
        let settings = VisualSettings::resolve(settings, self.host.locale);
        self.build_with_settings(table, settings)
    }

    #[must_use]
    pub fn build_with_settings(&mut self, table: &DataTable, settings: VisualSettings) -> ViewModel {
        let mut state = BuildState {
            domain: Domain::new(settings.axis.start, settings.axis.end),
            ..BuildState::default()
        };

        let series: Vec<(SeriesRole, &ValueSeries)> = table
            .values
            .iter()
            .filter_map(|series| match series.resolved_role() {
                Some(role) => Some((role, series)),
                None => {
                    warn!(
                        role = %series.role,
                        series = %series.display_name,
                        "ignoring value series with unknown role"
                    );
                    None
                }
            })
            .collect();

        let mut data_points = Vec::new();
        if !series.is_empty() {
            let category_count = table.category_count();
            data_points.reserve(category_count);
            for index in 0..category_count {
                let point = self.build_point(
                    index,
                    table.categories.as_ref(),
                    &series,
                    &settings,
                    &mut state,
                );
                trace!(
                    index,
                    value = ?point.value,
                    targets = point.targets.len(),
                    states = point.states.len(),
                    "built data point"
                );
                data_points.push(point);
            }
        }

        state.domain.normalize();
        debug!(
            points = data_points.len(),
            domain_start = state.domain.start,
            domain_end = state.domain.end,
            has_highlights = state.has_highlights,
            "built view model"
        );

        ViewModel {
            data_points,
            enumeration: state.enumeration,
            legend: state.legend,
            legend_custom_icons: state.legend_custom_icons,
            domain: state.domain,
            settings,
            has_highlights: state.has_highlights,
            has_categories: state.has_categories,
        }
    }

    fn build_point(
        &mut self,
        index: usize,
        categories: Option<&CategorySeries>,
        series: &[(SeriesRole, &ValueSeries)],
        settings: &VisualSettings,
        state: &mut BuildState,
    ) -> DataPoint {
        let mut point = DataPoint::default();

        for &(role, series) in series {
            let value = series.value_at(index);
            let tooltip_spec = FormatSpec {
                format: series.format.clone(),
                culture: Some(settings.data_labels.locale.clone()),
                ..FormatSpec::default()
            };
            let add_to_legend = index == 0
                || (matches!(
                    role,
                    SeriesRole::Value | SeriesRole::ComparisonValue | SeriesRole::Target
                ) && !state.has_legend_label(&series.display_name));

            match role {
                SeriesRole::Value => {
                    self.apply_value(
                        &mut point,
                        index,
                        categories,
                        series,
                        settings,
                        &tooltip_spec,
                        add_to_legend,
                        state,
                    );
                }
                SeriesRole::ComparisonValue => {
                    let Some(value) = value else { continue };
                    let color = series
                        .overrides
                        .fill
                        .clone()
                        .unwrap_or_else(|| DEFAULT_COMPARISON_FILL.to_owned());
                    let selection = measure_selection(series);
                    point.comparison_value = Some(value);
                    point.comparison_color = Some(color.clone());

                    if !state
                        .enumeration
                        .iter()
                        .any(|entry| entry.display_name == series.display_name)
                    {
                        state.enumeration.push(EnumerationEntry {
                            display_name: series.display_name.clone(),
                            color: color.clone(),
                            show_on_demand: false,
                            selection: selection.clone(),
                        });
                    }
                    if add_to_legend {
                        state.legend.push(LegendEntry {
                            label: series.display_name.clone(),
                            color: color.clone(),
                            icon: LegendIcon::Circle,
                            selection: Some(selection),
                        });
                    }
                    point.tooltips.push(TooltipRow {
                        header: None,
                        display_name: series.display_name.clone(),
                        color,
                        value: self.cache.format(value, &tooltip_spec),
                    });
                    state.domain.include(value);
                }
                SeriesRole::Target => {
                    let Some(value) = value else { continue };
                    let marker = series
                        .overrides
                        .target_marker
                        .unwrap_or_else(|| MarkerShape::for_position(point.targets.len()));
                    let selection = measure_selection(series);
                    let marker_fill = &settings.targets.marker_fill;
                    point.targets.push(Target {
                        value,
                        marker,
                        color: series.overrides.target_fill.clone(),
                        display_name: series.display_name.clone(),
                        selection: selection.clone(),
                    });

                    if add_to_legend && marker != MarkerShape::Hidden {
                        state.legend.push(LegendEntry {
                            label: series.display_name.clone(),
                            color: series
                                .overrides
                                .target_fill
                                .clone()
                                .unwrap_or_else(|| marker_fill.clone()),
                            icon: LegendIcon::Marker(marker),
                            selection: Some(selection.clone()),
                        });
                        state.legend_custom_icons.push(LegendCustomIcon {
                            icon: marker,
                            color: marker_fill.clone(),
                            selection,
                        });
                    }
                    point.tooltips.push(TooltipRow {
                        header: None,
                        display_name: series.display_name.clone(),
                        color: if marker == MarkerShape::Hidden {
                            TOOLTIP_FALLBACK_COLOR.to_owned()
                        } else {
                            marker_fill.clone()
                        },
                        value: self.cache.format(value, &tooltip_spec),
                    });
                    state.domain.include(value);
                }
                SeriesRole::State => {
                    let Some(value) = value else { continue };
                    let color = series.overrides.state_fill.clone().unwrap_or_else(|| {
                        settings
                            .states
                            .fill_for_ordinal(point.states.len())
                            .to_owned()
                    });
                    let band = StateBand {
                        value: Some(value),
                        color,
                        display_name: Some(series.display_name.clone()),
                        format: series.format.clone().unwrap_or_default(),
                        selection: Some(measure_selection(series)),
                    };
                    if !band.is_percentage() {
                        state.domain.include(value);
                    }
                    point.states.push(band);
                }
                SeriesRole::Tooltip => {
                    let Some(value) = value else { continue };
                    point.tooltips.push(TooltipRow {
                        header: None,
                        display_name: series.display_name.clone(),
                        color: TOOLTIP_FALLBACK_COLOR.to_owned(),
                        value: self.cache.format(value, &tooltip_spec),
                    });
                }
            }
        }

        // Configured absolute bands must stay inside the domain.
        if point.states.is_empty()
            && settings.states.show
            && settings.states.calculate == StatesCalculation::Absolute
        {
            for value in settings.states.values.iter().flatten() {
                state.domain.include(*value);
            }
        }

        point
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_value(
        &mut self,
        point: &mut DataPoint,
        index: usize,
        categories: Option<&CategorySeries>,
        series: &ValueSeries,
        settings: &VisualSettings,
        tooltip_spec: &FormatSpec,
        add_to_legend: bool,
        state: &mut BuildState,
    ) {
        let value = series.value_at(index);
        point.value = value;
        point.format = series.format.clone();

        let (display_name, header, color, selection, show_on_demand) = match categories {
            Some(categories) => {
                let display_name = self.category_display_name(categories, index, settings);
                let color = if settings.data_point.show_all {
                    categories
                        .fill_override(index)
                        .map(str::to_owned)
                        .unwrap_or_else(|| self.host.palette.color_for(&display_name))
                } else {
                    settings.data_point.default_fill.clone()
                };
                state.has_categories = true;
                let header = if display_name.is_empty() {
                    "Category".to_owned()
                } else {
                    display_name.clone()
                };
                (
                    display_name,
                    header,
                    color,
                    SelectionId::Category { index },
                    true,
                )
            }
            None => {
                let display_name = series.display_name.clone();
                let color = series
                    .overrides
                    .fill
                    .clone()
                    .unwrap_or_else(|| self.host.palette.color_for(&display_name));
                (
                    display_name.clone(),
                    display_name,
                    color,
                    measure_selection(series),
                    false,
                )
            }
        };

        point.display_name = display_name.clone();
        point.color = color.clone();
        point.selection = Some(selection.clone());

        state.enumeration.push(EnumerationEntry {
            display_name,
            color: color.clone(),
            show_on_demand,
            selection: selection.clone(),
        });
        if add_to_legend {
            state.legend.push(LegendEntry {
                label: series.display_name.clone(),
                color: color.clone(),
                icon: LegendIcon::Circle,
                selection: Some(selection),
            });
        }

        point.tooltips.push(TooltipRow {
            header: Some(header),
            display_name: series.display_name.clone(),
            color: color.clone(),
            value: self.format_or_blank(value, tooltip_spec),
        });

        if series.highlights.is_some() {
            let highlight = series.highlight_at(index);
            point.highlight_value = highlight;
            state.has_highlights = true;
            point.tooltips.push(TooltipRow {
                header: None,
                display_name: "Highlighted".to_owned(),
                color,
                value: self.format_or_blank(highlight, tooltip_spec),
            });
            state.domain.include_opt(highlight);
        }

        state.domain.include_opt(value);
    }

    fn format_or_blank(&mut self, value: Option<f64>, spec: &FormatSpec) -> String {
        match value {
            Some(value) => self.cache.format(value, spec),
            None => BLANK_LABEL.to_owned(),
        }
    }

    fn category_display_name(
        &mut self,
        categories: &CategorySeries,
        index: usize,
        settings: &VisualSettings,
    ) -> String {
        match categories.values.get(index).unwrap_or(&CategoryValue::Null) {
            CategoryValue::Null => BLANK_LABEL.to_owned(),
            CategoryValue::Date(date) => {
                let spec = FormatSpec {
                    format: categories.format.clone(),
                    culture: Some(settings.data_labels.locale.clone()),
                    ..FormatSpec::default()
                };
                self.cache.formatter(&spec).format_date(*date)
            }
            CategoryValue::Number(number) => number.to_string(),
            CategoryValue::Text(text) if is_url(text) => readable_url(text),
            CategoryValue::Text(text) => text.chars().take(MAX_CATEGORY_LABEL_CHARS).collect(),
        }
    }
}

fn measure_selection(series: &ValueSeries) -> SelectionId {
    SelectionId::Measure {
        query_name: series.query_name.clone(),
    }
}

fn is_url(text: &str) -> bool {
    let lower = text.get(..8).unwrap_or(text).to_ascii_lowercase();
    text.len() <= MAX_URL_LEN && (lower.starts_with("http://") || lower.starts_with("https://"))
}

/// `https://host/images/north_america.png` reads as `north america`.
fn readable_url(url: &str) -> String {
    let parts: Vec<&str> = url.split(['\\', '/', '.']).collect();
    match parts.len().checked_sub(2).and_then(|index| parts.get(index)) {
        Some(part) => part.replace(['_', '-'], " "),
        None => url.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_categories_read_as_their_file_stem() {
        assert!(is_url("HTTPS://example.com/a.png"));
        assert!(!is_url("example.com/a.png"));
        assert_eq!(
            readable_url("https://example.com/flags/north_america.png"),
            "north america"
        );
    }
}
