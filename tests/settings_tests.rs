use bullet_chart::error::BulletError;
use bullet_chart::settings::{
    ComparisonOperator, DEFAULT_TEXT_FILL, LegendPosition, Orientation, SEGOE_FONT_FAMILY,
    STANDARD_FONT_FAMILY, SettingsInput, StatesCalculation, VisionMode, VisualSettings,
};

#[test]
fn missing_settings_resolve_to_documented_defaults() {
    let settings = VisualSettings::resolve(&SettingsInput::default(), "de-DE");

    assert_eq!(settings.general.orientation, Orientation::Horizontal);
    assert_eq!(settings.general.min_height, None);
    assert_eq!(settings.general.max_height, None);

    assert_eq!(settings.data_point.default_fill, "#00b8aa");
    assert!(!settings.data_point.show_all);

    assert!(settings.label.show);
    assert_eq!(settings.label.text, "");
    assert_eq!(settings.label.font_size, 9.0);
    assert_eq!(settings.label.font_family, SEGOE_FONT_FAMILY);
    assert_eq!(settings.label.fill, DEFAULT_TEXT_FILL);
    assert!(settings.label.auto_size);

    assert!(!settings.data_labels.show);
    assert_eq!(settings.data_labels.fill, "#777");
    assert_eq!(settings.data_labels.font_family, STANDARD_FONT_FAMILY);
    assert_eq!(settings.data_labels.font_size, 9.0);
    assert_eq!(settings.data_labels.unit, 0.0);
    assert_eq!(settings.data_labels.precision, None);
    assert_eq!(settings.data_labels.locale, "de-DE");

    assert_eq!(settings.targets.marker_fill, "#333");
    assert_eq!(settings.targets.comparison, ComparisonOperator::Less);

    assert!(settings.states.show);
    assert_eq!(settings.states.calculate, StatesCalculation::Percentage);
    assert_eq!(settings.states.values, [None; 5]);
    assert_eq!(
        settings.states.fills,
        ["#bbb", "#ccc", "#ddd", "#eee", "#f2f2f2"].map(str::to_owned)
    );

    assert!(settings.axis.show);
    assert_eq!(settings.axis.start, None);
    assert_eq!(settings.axis.end, None);
    assert_eq!(settings.axis.font_size, 8.0);
    assert_eq!(settings.axis.fill, "#777");
    assert_eq!(settings.axis.locale, "de-DE");

    assert!(!settings.legend.show);
    assert_eq!(settings.legend.position, LegendPosition::Top);
    assert!(!settings.legend.show_title);
    assert_eq!(settings.legend.label_color, "#666");
    assert_eq!(settings.legend.font_size, 8.0);

    assert_eq!(settings.color_blind.vision, VisionMode::Normal);
    assert_eq!(settings, VisualSettings::defaults("de-DE"));
}

#[test]
fn user_groups_fall_back_field_by_field() {
    let input = SettingsInput::from_json_str(
        r##"{
            "general": { "orientation": "v" },
            "label": { "fontSize": 12, "fill": { "solid": { "color": "#123456" } } },
            "targets": { "comparison": ">=" },
            "states": { "calculate": "absolute", "state2": 40, "state3Fill": "#abcdef" },
            "legend": { "show": true, "position": "RightCenter" },
            "colorBlind": { "vision": "Deuteranopia" }
        }"##,
    )
    .expect("valid settings json");
    let settings = VisualSettings::resolve(&input, "en-US");

    assert_eq!(settings.general.orientation, Orientation::Vertical);
    assert_eq!(settings.label.font_size, 12.0);
    assert_eq!(settings.label.fill, "#123456");
    assert!(settings.label.show, "unset fields keep their default");
    assert_eq!(settings.targets.comparison, ComparisonOperator::GreaterOrEqual);
    assert_eq!(settings.states.calculate, StatesCalculation::Absolute);
    assert_eq!(settings.states.values[1], Some(40.0));
    assert_eq!(settings.states.values[0], None);
    assert_eq!(settings.states.fills[2], "#abcdef");
    assert_eq!(settings.states.fills[0], "#bbb");
    assert!(settings.legend.show);
    assert_eq!(settings.legend.position, LegendPosition::RightCenter);
    assert_eq!(settings.color_blind.vision, VisionMode::Deuteranopia);
}

#[test]
fn out_of_range_values_are_constrained() {
    let input = SettingsInput::from_json_str(
        r#"{
            "general": { "minHeight": -5, "maxHeight": -1 },
            "dataLabels": { "precision": 40 },
            "axis": { "precision": -3 }
        }"#,
    )
    .expect("valid settings json");
    let settings = VisualSettings::resolve(&input, "en-US");

    assert_eq!(settings.general.min_height, None);
    assert_eq!(settings.general.max_height, None);
    assert_eq!(settings.data_labels.precision, Some(15));
    assert_eq!(settings.axis.precision, Some(0));
}

#[test]
fn empty_locales_fall_back_to_host_locale() {
    let input = SettingsInput::from_json_str(
        r#"{ "dataLabels": { "locale": "" }, "axis": { "locale": "fr-FR" } }"#,
    )
    .expect("valid settings json");
    let settings = VisualSettings::resolve(&input, "ja-JP");

    assert_eq!(settings.data_labels.locale, "ja-JP");
    assert_eq!(settings.axis.locale, "fr-FR");

    let blank_host = VisualSettings::resolve(&SettingsInput::default(), "");
    assert_eq!(blank_host.axis.locale, "en-US");
}

#[test]
fn malformed_settings_json_is_reported() {
    match SettingsInput::from_json_str(r#"{ "general": { "orientation": "diagonal" } }"#) {
        Err(BulletError::InvalidSettings(message)) => {
            assert!(message.contains("failed to parse settings"));
        }
        other => panic!("expected invalid settings, got {other:?}"),
    }
}

#[test]
fn effective_settings_serialize_with_camel_case_keys() {
    let json = VisualSettings::default()
        .to_json_pretty()
        .expect("serialize settings");
    assert!(json.contains("\"dataLabels\""));
    assert!(json.contains("\"defaultFill\": \"#00b8aa\""));
    assert!(json.contains("\"orientation\": \"h\""));
}
