use bullet_chart::api::{BULLET_SNAPSHOT_JSON_SCHEMA_V1, BulletSnapshotJsonContractV1};
use bullet_chart::core::Viewport;
use bullet_chart::data::{
    CategorySeries, CategoryValue, DataTable, SelectionId, SeriesRole, ValueSeries,
};
use bullet_chart::model::ObjectName;
use bullet_chart::render::{NullRenderer, UNSELECTED_OPACITY};
use bullet_chart::settings::SettingsInput;
use bullet_chart::{BulletChart, BulletChartConfig, BulletError};

fn table() -> DataTable {
    let categories = CategorySeries::new(
        "Region",
        ["North", "South"].into_iter().map(CategoryValue::from).collect(),
    );
    DataTable::new(
        Some(categories),
        vec![
            ValueSeries::new("Sales", SeriesRole::Value, vec![Some(55.0), Some(80.0)]),
            ValueSeries::new("Goal", SeriesRole::Target, vec![Some(70.0), Some(75.0)]),
        ],
    )
}

fn chart_with(settings_json: &str) -> BulletChart<NullRenderer> {
    let settings = SettingsInput::from_json_str(settings_json).expect("valid settings json");
    let mut chart = BulletChart::new(NullRenderer::default(), BulletChartConfig::default());
    chart
        .update(&table(), &settings, Viewport::new(480.0, 160.0))
        .expect("update should succeed");
    chart
}

fn slot_center(chart: &BulletChart<NullRenderer>, index: usize) -> (f64, f64) {
    let geometry = chart.geometry();
    let slot = geometry.points[index].slot;
    (
        geometry.margin.left + slot.x + slot.width / 2.0,
        geometry.margin.top + slot.y + slot.height / 2.0,
    )
}

#[test]
fn update_renders_one_valid_frame() {
    let chart = chart_with("{}");

    assert_eq!(chart.model().data_points.len(), 2);
    assert_eq!(chart.geometry().points.len(), 2);
    let renderer = chart.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert!(renderer.last_rect_count > 0);
    assert!(renderer.last_text_count > 0);
    assert_eq!(renderer.last_frame.as_ref(), Some(&chart.frame()));
}

#[test]
fn unusable_viewport_clears_without_rendering() {
    let mut chart = chart_with("{}");

    chart
        .update(&table(), &SettingsInput::default(), Viewport::new(0.0, 160.0))
        .expect("unusable viewport is not an error");

    assert!(chart.model().is_empty());
    assert!(chart.geometry().is_empty());
    assert_eq!(chart.renderer().frames_rendered, 1);

    chart.render().expect("render without geometry is a no-op");
    assert_eq!(chart.renderer().frames_rendered, 1);
}

#[test]
fn empty_table_renders_an_empty_frame() {
    let mut chart = BulletChart::new(NullRenderer::default(), BulletChartConfig::default());
    chart
        .update(
            &DataTable::default(),
            &SettingsInput::default(),
            Viewport::new(300.0, 100.0),
        )
        .expect("empty table is not an error");

    let renderer = chart.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert!(renderer.last_frame.expect("frame recorded").is_empty());
}

#[test]
fn select_toggles_and_rerenders() {
    let mut chart = chart_with("{}");
    let handle = SelectionId::Category { index: 1 };

    assert!(chart.select(handle.clone()).expect("select"));
    assert_eq!(chart.selection(), &[handle.clone()]);
    assert_eq!(chart.renderer().frames_rendered, 2);

    let frame = chart.frame();
    assert_eq!(frame.rects[0].fill.alpha, UNSELECTED_OPACITY);

    assert!(!chart.select(handle).expect("deselect"));
    assert!(chart.selection().is_empty());
    assert_eq!(chart.renderer().frames_rendered, 3);
}

#[test]
fn click_selects_bullet_under_pointer_and_clears_on_empty_space() {
    let mut chart = chart_with("{}");
    let (x, y) = slot_center(&chart, 1);

    assert_eq!(chart.hit_test(x, y), Some(1));
    let clicked = chart.click(x, y).expect("click");
    assert_eq!(clicked, Some(SelectionId::Category { index: 1 }));
    assert_eq!(chart.selection().len(), 1);

    // The top margin never holds a bullet.
    assert_eq!(chart.hit_test(x, 1.0), None);
    assert_eq!(chart.click(x, 1.0).expect("click"), None);
    assert!(chart.selection().is_empty());
}

#[test]
fn selection_survives_updates() {
    let mut chart = chart_with("{}");
    chart
        .select(SelectionId::Category { index: 0 })
        .expect("select");

    chart
        .update(&table(), &SettingsInput::default(), Viewport::new(480.0, 160.0))
        .expect("update");

    assert_eq!(chart.selection().len(), 1);
    let last = chart.renderer().last_frame.clone().expect("frame");
    assert!(last.rects.iter().any(|rect| rect.fill.alpha == UNSELECTED_OPACITY));
}

#[test]
fn legend_and_enumeration_come_from_last_model() {
    let hidden = chart_with("{}");
    assert!(hidden.legend_data().is_none());

    let chart = chart_with(r#"{ "legend": { "show": true } }"#);
    let legend = chart.legend_data().expect("legend shown");
    assert!(!legend.entries.is_empty());

    let general = chart.enumerate_objects(ObjectName::General);
    assert_eq!(general.len(), 1);
    assert_eq!(general[0].object_name, ObjectName::General);
}

#[test]
fn formatter_cache_is_reused_across_updates() {
    let mut chart = chart_with("{}");
    let after_first = chart.format_cache_stats();

    chart
        .update(&table(), &SettingsInput::default(), Viewport::new(480.0, 160.0))
        .expect("update");
    let after_second = chart.format_cache_stats();

    assert_eq!(after_second.size, after_first.size);
    assert_eq!(after_second.misses, after_first.misses);
    assert!(after_second.hits > after_first.hits);
}

#[test]
fn host_locale_flows_into_axis_labels() {
    let settings = SettingsInput::default();
    let config = BulletChartConfig::default().with_host_locale("de-DE");
    let mut chart = BulletChart::new(NullRenderer::default(), config);
    chart
        .update(&table(), &settings, Viewport::new(480.0, 160.0))
        .expect("update");

    assert_eq!(chart.model().settings.axis.locale, "de-DE");
}

#[test]
fn snapshot_contract_round_trips() {
    let chart = chart_with("{}");
    let json = chart
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot serializes");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = BulletSnapshotJsonContractV1::from_json_str(&json).expect("snapshot parses");
    assert_eq!(parsed.schema_version, BULLET_SNAPSHOT_JSON_SCHEMA_V1);
    assert_eq!(parsed, chart.snapshot());
}

#[test]
fn vertical_snapshot_round_trips_exactly() {
    let chart = chart_with(
        r#"{ "general": { "orientation": "v" }, "dataLabels": { "show": true }, "legend": { "show": true } }"#,
    );
    let json = chart
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot serializes");

    let parsed = BulletSnapshotJsonContractV1::from_json_str(&json).expect("snapshot parses");
    assert_eq!(parsed.geometry, chart.geometry().clone());
    assert_eq!(parsed.model, chart.model().clone());
}

#[test]
fn snapshot_contract_rejects_other_versions() {
    let chart = chart_with("{}");
    let mut snapshot = chart.snapshot();
    snapshot.schema_version = 2;
    let json = snapshot.to_json_pretty().expect("serializes");

    let err = BulletSnapshotJsonContractV1::from_json_str(&json).expect_err("version 2");
    assert!(matches!(err, BulletError::InvalidData(_)));
}

#[test]
fn config_json_round_trips_and_defaults_locale() {
    let config = BulletChartConfig::default().with_host_locale("fr-FR");
    let json = config.to_json_pretty().expect("serializes");
    assert_eq!(
        BulletChartConfig::from_json_str(&json).expect("parses"),
        config
    );

    let defaulted = BulletChartConfig::from_json_str("{}").expect("parses");
    assert_eq!(defaulted.host_locale, "en-US");

    assert!(matches!(
        BulletChartConfig::from_json_str("not json"),
        Err(BulletError::InvalidData(_))
    ));
}
