use bullet_chart::core::{FormatCache, ThemePalette};
use bullet_chart::data::{
    CategorySeries, CategoryValue, DataTable, MarkerShape, SelectionId, SeriesOverrides,
    SeriesRole, ValueSeries,
};
use bullet_chart::model::{HostServices, LegendIcon, ViewModel, ViewModelBuilder, legend_data};
use bullet_chart::settings::SettingsInput;

fn build(table: &DataTable, settings: &SettingsInput) -> ViewModel {
    let palette = ThemePalette::default();
    let mut cache = FormatCache::default();
    let host = HostServices {
        locale: "en-US",
        palette: &palette,
    };
    ViewModelBuilder::new(host, &mut cache).build(table, settings)
}

fn regions(names: &[&str]) -> CategorySeries {
    CategorySeries::new(
        "Region",
        names.iter().map(|name| CategoryValue::from(*name)).collect(),
    )
}

#[test]
fn first_satisfied_target_is_recorded_per_category() {
    let table = DataTable::new(
        Some(regions(&["North", "South"])),
        vec![
            ValueSeries::new("Sales", SeriesRole::Value, vec![Some(40.0), Some(90.0)]),
            ValueSeries::new("Goal", SeriesRole::Target, vec![Some(50.0), Some(50.0)]),
        ],
    );
    let model = build(&table, &SettingsInput::default());

    assert_eq!(model.data_points.len(), 2);
    assert_eq!(model.data_points[0].display_name, "North");
    assert_eq!(model.data_points[1].targets[0].value, 50.0);
    assert_eq!(model.data_points[0].targets[0].marker, MarkerShape::Line);
    assert_eq!((model.domain.start, model.domain.end), (0.0, 90.0));
    assert_eq!(
        model.data_points[1].selection,
        Some(SelectionId::Category { index: 1 })
    );
}

#[test]
fn null_primary_is_kept_but_other_nulls_are_skipped() {
    let table = DataTable::new(
        Some(regions(&["A", "B"])),
        vec![
            ValueSeries::new("Sales", SeriesRole::Value, vec![None, Some(10.0)]),
            ValueSeries::new("Last year", SeriesRole::ComparisonValue, vec![None, Some(8.0)]),
            ValueSeries::new("Goal", SeriesRole::Target, vec![None, Some(12.0)]),
            ValueSeries::new("Band", SeriesRole::State, vec![None, Some(5.0)]),
        ],
    );
    let model = build(&table, &SettingsInput::default());

    let blank = &model.data_points[0];
    assert_eq!(blank.value, None);
    assert_eq!(blank.comparison_value, None);
    assert!(blank.targets.is_empty());
    assert!(blank.states.is_empty());
    assert_eq!(blank.tooltips[0].value, "(Blank)");

    let full = &model.data_points[1];
    assert_eq!(full.comparison_value, Some(8.0));
    assert_eq!(full.comparison_color.as_deref(), Some("#99E3DD"));
    assert_eq!(full.targets.len(), 1);
    assert_eq!(full.states.len(), 1);
}

#[test]
fn legend_is_deduplicated_by_label() {
    let table = DataTable::new(
        Some(regions(&["A", "B", "C"])),
        vec![
            ValueSeries::new("Sales", SeriesRole::Value, vec![Some(1.0), Some(2.0), Some(3.0)]),
            ValueSeries::new("Goal", SeriesRole::Target, vec![Some(2.0), Some(2.0), Some(2.0)]),
            ValueSeries::new(
                "Stretch",
                SeriesRole::Target,
                vec![Some(3.0), Some(3.0), Some(3.0)],
            )
            .with_overrides(SeriesOverrides {
                target_marker: Some(MarkerShape::Hidden),
                ..SeriesOverrides::default()
            }),
        ],
    );
    let model = build(&table, &SettingsInput::default());

    let labels: Vec<&str> = model.legend.iter().map(|entry| entry.label.as_str()).collect();
    assert_eq!(labels, vec!["Sales", "Goal"], "hidden targets add no entry");
    assert_eq!(model.legend[1].icon, LegendIcon::Marker(MarkerShape::Line));
    assert_eq!(model.legend[1].color, "#333");
    assert_eq!(model.legend_custom_icons.len(), 1);
    assert_eq!(model.data_points[0].targets[1].marker, MarkerShape::Hidden);
}

#[test]
fn unknown_roles_are_ignored() {
    let table = DataTable::without_categories(vec![
        ValueSeries::new("Sales", SeriesRole::Value, vec![Some(5.0)]),
        ValueSeries::new("Mystery", SeriesRole::Value, vec![Some(500.0)]).with_role_name("mystery"),
    ]);
    let model = build(&table, &SettingsInput::default());

    assert_eq!(model.data_points.len(), 1);
    assert_eq!(model.domain.end, 5.0);
}

#[test]
fn no_value_series_yields_no_points() {
    let table = DataTable::new(Some(regions(&["A"])), Vec::new());
    let model = build(&table, &SettingsInput::default());

    assert!(model.is_empty());
    assert_eq!((model.domain.start, model.domain.end), (0.0, 0.0));
}

#[test]
fn implicit_category_uses_series_identity() {
    let table = DataTable::without_categories(vec![ValueSeries::new(
        "Revenue",
        SeriesRole::Value,
        vec![Some(-20.0)],
    )
    .with_query_name("Sum(Revenue)")]);
    let model = build(&table, &SettingsInput::default());

    let point = &model.data_points[0];
    assert_eq!(point.display_name, "Revenue");
    assert_eq!(point.color, ThemePalette::COLORS[0]);
    assert_eq!(
        point.selection,
        Some(SelectionId::Measure {
            query_name: "Sum(Revenue)".to_owned()
        })
    );
    assert!(!model.has_categories);
    assert_eq!((model.domain.start, model.domain.end), (-20.0, 0.0));
}

#[test]
fn forced_axis_bounds_are_never_moved_by_data() {
    let settings =
        SettingsInput::from_json_str(r#"{ "axis": { "start": 10, "end": 50 } }"#).expect("json");
    let table = DataTable::without_categories(vec![
        ValueSeries::new("Sales", SeriesRole::Value, vec![Some(80.0)]),
        ValueSeries::new("Goal", SeriesRole::Target, vec![Some(-5.0)]),
    ]);
    let model = build(&table, &settings);

    assert_eq!((model.domain.start, model.domain.end), (10.0, 50.0));
    assert!(model.domain.start_forced && model.domain.end_forced);
}

#[test]
fn highlights_set_the_global_flag_and_widen_the_domain() {
    let table = DataTable::new(
        Some(regions(&["A", "B"])),
        vec![
            ValueSeries::new("Sales", SeriesRole::Value, vec![Some(30.0), Some(60.0)])
                .with_highlights(vec![Some(120.0), None]),
        ],
    );
    let model = build(&table, &SettingsInput::default());

    assert!(model.has_highlights);
    assert_eq!(model.data_points[0].highlight_value, Some(120.0));
    assert_eq!(model.data_points[1].highlight_value, None);
    assert_eq!(model.domain.end, 120.0);
    assert_eq!(model.data_points[0].tooltips[1].display_name, "Highlighted");
}

#[test]
fn show_all_colors_categories_from_palette_and_overrides() {
    let settings =
        SettingsInput::from_json_str(r#"{ "dataPoint": { "showAll": true } }"#).expect("json");
    let categories = regions(&["A", "B"]).with_fill_override(1, "#ff00ff");
    let table = DataTable::new(
        Some(categories),
        vec![ValueSeries::new("Sales", SeriesRole::Value, vec![Some(1.0), Some(2.0)])],
    );
    let model = build(&table, &settings);

    assert_eq!(model.data_points[0].color, ThemePalette::COLORS[0]);
    assert_eq!(model.data_points[1].color, "#ff00ff");
    assert!(model.enumeration.iter().all(|entry| entry.show_on_demand));
}

#[test]
fn default_fill_applies_without_show_all() {
    let table = DataTable::new(
        Some(regions(&["A", "B"])),
        vec![ValueSeries::new("Sales", SeriesRole::Value, vec![Some(1.0), Some(2.0)])],
    );
    let model = build(&table, &SettingsInput::default());

    assert!(model.data_points.iter().all(|point| point.color == "#00b8aa"));
}

#[test]
fn category_labels_handle_blanks_urls_and_long_text() {
    let long = "x".repeat(300);
    let categories = CategorySeries::new(
        "Flag",
        vec![
            CategoryValue::Null,
            CategoryValue::from("https://cdn.example.com/flags/new_zealand.png"),
            CategoryValue::from(long.as_str()),
            CategoryValue::from(7.0),
        ],
    );
    let table = DataTable::new(
        Some(categories),
        vec![ValueSeries::new(
            "Sales",
            SeriesRole::Value,
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        )],
    );
    let model = build(&table, &SettingsInput::default());

    assert_eq!(model.data_points[0].display_name, "(Blank)");
    assert_eq!(model.data_points[1].display_name, "new zealand");
    assert_eq!(model.data_points[2].display_name.chars().count(), 256);
    assert_eq!(model.data_points[3].display_name, "7");
}

#[test]
fn absolute_state_settings_widen_the_domain() {
    let settings = SettingsInput::from_json_str(
        r#"{ "states": { "calculate": "absolute", "state5": 250 } }"#,
    )
    .expect("json");
    let table = DataTable::without_categories(vec![ValueSeries::new(
        "Sales",
        SeriesRole::Value,
        vec![Some(100.0)],
    )]);
    let model = build(&table, &settings);

    assert_eq!(model.domain.end, 250.0);
}

#[test]
fn legend_data_follows_legend_settings() {
    let table = DataTable::without_categories(vec![ValueSeries::new(
        "Sales",
        SeriesRole::Value,
        vec![Some(1.0)],
    )]);
    let hidden = build(&table, &SettingsInput::default());
    assert!(legend_data(&hidden).is_none());

    let settings = SettingsInput::from_json_str(
        r#"{ "legend": { "show": true, "showTitle": true, "titleText": "Measures" } }"#,
    )
    .expect("json");
    let shown = build(&table, &settings);
    let legend = legend_data(&shown).expect("legend shown");
    assert_eq!(legend.title.as_deref(), Some("Measures"));
    assert_eq!(legend.entries.len(), 1);
    assert_eq!(legend.label_color, "#666");
}
