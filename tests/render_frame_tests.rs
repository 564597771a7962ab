use approx::assert_relative_eq;
use bullet_chart::BulletError;
use bullet_chart::core::{FormatCache, HeuristicTextMeasurer, ThemePalette, Viewport};
use bullet_chart::data::{
    CategorySeries, CategoryValue, DataTable, SelectionId, SeriesRole, ValueSeries,
};
use bullet_chart::layout::{BulletGeometry, LayoutEngine};
use bullet_chart::model::{HostServices, ViewModelBuilder};
use bullet_chart::render::{
    Color, NullRenderer, RectPrimitive, RenderFrame, Renderer, TextHAlign, UNSELECTED_OPACITY,
    emit_frame,
};
use bullet_chart::settings::{SettingsInput, VisionMode};

const RECTS_PER_BULLET: usize = 6;

fn two_bullets() -> DataTable {
    let categories = CategorySeries::new(
        "Region",
        ["North", "South"].into_iter().map(CategoryValue::from).collect(),
    );
    let mut series = vec![
        ValueSeries::new("Sales", SeriesRole::Value, vec![Some(55.0), Some(80.0)]),
        ValueSeries::new("Goal", SeriesRole::Target, vec![Some(70.0), Some(75.0)]),
    ];
    for (ordinal, state) in [40.0, 60.0, 80.0, 90.0, 100.0].into_iter().enumerate() {
        series.push(ValueSeries::new(
            format!("State {}", ordinal + 1),
            SeriesRole::State,
            vec![Some(state), Some(state)],
        ));
    }
    DataTable::new(Some(categories), series)
}

fn geometry(settings_json: &str) -> BulletGeometry {
    layout(&two_bullets(), settings_json)
}

fn layout(table: &DataTable, settings_json: &str) -> BulletGeometry {
    let settings = SettingsInput::from_json_str(settings_json).expect("valid settings json");
    let palette = ThemePalette::default();
    let measurer = HeuristicTextMeasurer::default();
    let mut cache = FormatCache::default();
    let host = HostServices {
        locale: "en-US",
        palette: &palette,
    };
    let model = ViewModelBuilder::new(host, &mut cache).build(table, &settings);
    LayoutEngine::new(&measurer).layout(&model, Viewport::new(500.0, 200.0), &mut cache)
}

#[test]
fn emitted_frame_is_valid_and_translated_by_margin() {
    let geometry = geometry("{}");
    let frame = emit_frame(&geometry, &[]);

    frame.validate().expect("frame should validate");
    assert_eq!(frame.viewport, geometry.viewport);
    assert_eq!(frame.rects.len(), 2 * RECTS_PER_BULLET);

    let band = &geometry.points[0].bands[0];
    assert_relative_eq!(frame.rects[0].x, band.rect.x + geometry.margin.left, epsilon = 1e-9);
    assert_relative_eq!(frame.rects[0].y, band.rect.y + geometry.margin.top, epsilon = 1e-9);
    assert_relative_eq!(frame.rects[0].width, band.rect.width, epsilon = 1e-9);

    // One line marker per bullet, the rest are axis ticks.
    let ticks = geometry.axis.as_ref().map_or(0, |axis| axis.ticks.len());
    assert_eq!(frame.lines.len(), ticks + 2);
    assert!(frame.texts.iter().any(|text| text.text == "North"));
    assert!(
        frame
            .texts
            .iter()
            .filter(|text| text.text == "100")
            .all(|text| text.h_align == TextHAlign::Center)
    );
}

#[test]
fn selection_dims_every_other_bullet() {
    let geometry = geometry("{}");
    let handle = geometry.points[0]
        .selection
        .clone()
        .expect("category bullets carry a handle");
    assert_eq!(handle, SelectionId::Category { index: 0 });

    let frame = emit_frame(&geometry, &[handle]);

    for rect in &frame.rects[..RECTS_PER_BULLET] {
        assert_eq!(rect.fill.alpha, 1.0);
    }
    for rect in &frame.rects[RECTS_PER_BULLET..] {
        assert_eq!(rect.fill.alpha, UNSELECTED_OPACITY);
    }
}

#[test]
fn selection_leaves_highlights_and_data_labels_opaque() {
    let mut table = two_bullets();
    table.values[0] = table.values[0]
        .clone()
        .with_highlights(vec![Some(30.0), Some(50.0)]);
    let geometry = layout(&table, r#"{ "dataLabels": { "show": true } }"#);
    assert!(geometry.points[1].highlight.is_some());
    assert!(geometry.points[1].data_label.is_some());

    let frame = emit_frame(&geometry, &[SelectionId::Category { index: 0 }]);

    // Bands, measure bar and highlight overlay per bullet.
    let per_bullet = RECTS_PER_BULLET + 1;
    assert_eq!(frame.rects.len(), 2 * per_bullet);
    let second = &frame.rects[per_bullet..];
    for rect in &second[..RECTS_PER_BULLET] {
        assert_eq!(rect.fill.alpha, UNSELECTED_OPACITY);
    }
    assert_eq!(second[RECTS_PER_BULLET].fill.alpha, 1.0);
    assert!(frame.texts.iter().all(|text| text.color.alpha == 1.0));
}

#[test]
fn empty_selection_keeps_full_opacity() {
    let frame = emit_frame(&geometry("{}"), &[]);
    assert!(frame.rects.iter().all(|rect| rect.fill.alpha == 1.0));
}

#[test]
fn unparsable_colors_fall_back_to_black() {
    let mut geometry = geometry("{}");
    if let Some(measure) = geometry.points[0].measure.as_mut() {
        measure.color = "not-a-color".to_owned();
    }

    let frame = emit_frame(&geometry, &[]);

    let measure_rect = &frame.rects[5];
    assert_eq!(measure_rect.fill, Color::BLACK);
    frame.validate().expect("fallback color keeps the frame valid");
}

#[test]
fn frame_carries_vision_mode() {
    let geometry = geometry(r#"{ "colorBlind": { "vision": "Deuteranopia" } }"#);
    assert_eq!(emit_frame(&geometry, &[]).vision, VisionMode::Deuteranopia);
}

#[test]
fn empty_geometry_emits_empty_frame() {
    let geometry = BulletGeometry::empty(
        Viewport::new(300.0, 120.0),
        Default::default(),
        VisionMode::default(),
    );
    let frame = emit_frame(&geometry, &[]);
    assert!(frame.is_empty());
    assert_eq!(frame.primitive_count(), 0);
}

#[test]
fn null_renderer_tracks_last_frame() {
    let frame = emit_frame(&geometry("{}"), &[]);
    let mut renderer = NullRenderer::default();

    renderer.render(&frame).expect("render should succeed");

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, frame.rects.len() + frame.circles.len());
    assert_eq!(renderer.last_line_count, frame.lines.len());
    assert_eq!(renderer.last_text_count, frame.texts.len());
    assert_eq!(renderer.last_frame.as_ref(), Some(&frame));
}

#[test]
fn null_renderer_rejects_invalid_frames() {
    let mut renderer = NullRenderer::default();

    let err = renderer
        .render(&RenderFrame::new(Viewport::new(0.0, 80.0)))
        .expect_err("zero width must fail");
    assert!(matches!(err, BulletError::InvalidViewport { .. }));

    let negative = RenderFrame::new(Viewport::new(100.0, 80.0)).with_rect(RectPrimitive::new(
        0.0,
        0.0,
        -1.0,
        10.0,
        Color::BLACK,
    ));
    let err = renderer.render(&negative).expect_err("negative width must fail");
    assert!(matches!(err, BulletError::InvalidData(_)));
    assert_eq!(renderer.frames_rendered, 0);
}

#[test]
fn color_from_hex_normalizes_channels() {
    let color = Color::from_hex("#ff8000", 0.5).expect("valid hex");
    assert_relative_eq!(color.red, 1.0);
    assert_relative_eq!(color.green, 128.0 / 255.0);
    assert_relative_eq!(color.blue, 0.0);
    assert_relative_eq!(color.alpha, 0.5);

    assert_eq!(Color::from_hex("#fff", 4.0).expect("shorthand").alpha, 1.0);
    assert!(matches!(
        Color::from_hex("blue", 1.0),
        Err(BulletError::InvalidColor(_))
    ));
}
