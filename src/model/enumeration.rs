//! Editable property instances for the host's configuration surface.
//!
//! Not on the render path: the host asks for one object at a time while the
//! user edits settings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::ViewModel;
use crate::data::SelectionId;
use crate::settings::MAX_PRECISION;

/// Upper bound on per-category fill entries listed in one enumeration.
const MAX_ENUMERATED_CATEGORIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectName {
    General,
    DataPoint,
    Label,
    DataLabels,
    Targets,
    States,
    Axis,
    Legend,
    ColorBlind,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInstance {
    pub object_name: ObjectName,
    pub display_name: Option<String>,
    pub properties: Map<String, Value>,
    /// `None` targets the whole visual.
    pub selector: Option<SelectionId>,
    pub valid_values: IndexMap<String, NumberRange>,
}

impl ObjectInstance {
    fn visual(object_name: ObjectName, properties: Value) -> Self {
        Self {
            object_name,
            display_name: None,
            properties: into_map(properties),
            selector: None,
            valid_values: IndexMap::new(),
        }
    }

    fn scoped(
        object_name: ObjectName,
        display_name: impl Into<String>,
        properties: Value,
        selector: Option<SelectionId>,
    ) -> Self {
        Self {
            object_name,
            display_name: Some(display_name.into()),
            properties: into_map(properties),
            selector,
            valid_values: IndexMap::new(),
        }
    }

    fn with_range(mut self, property: &str, min: Option<f64>, max: Option<f64>) -> Self {
        self.valid_values
            .insert(property.to_owned(), NumberRange { min, max });
        self
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn solid(color: &str) -> Value {
    json!({ "solid": { "color": color } })
}

/// Lists the instances of `object_name` the host may edit for `model`.
///
/// An empty model yields nothing.
#[must_use]
pub fn enumerate_objects(model: &ViewModel, object_name: ObjectName) -> Vec<ObjectInstance> {
    let Some(first_point) = model.data_points.first() else {
        return Vec::new();
    };
    let settings = &model.settings;
    let precision_max = Some(f64::from(MAX_PRECISION));
    let mut instances = Vec::new();

    match object_name {
        ObjectName::General => {
            instances.push(
                ObjectInstance::visual(
                    object_name,
                    json!({
                        "orientation": settings.general.orientation,
                        "minHeight": settings.general.min_height,
                        "maxHeight": settings.general.max_height,
                    }),
                )
                .with_range("minHeight", Some(0.0), None)
                .with_range("maxHeight", Some(0.0), None),
            );
        }
        ObjectName::DataPoint => {
            if model.has_categories {
                instances.push(ObjectInstance::visual(
                    object_name,
                    json!({
                        "defaultFill": solid(&settings.data_point.default_fill),
                        "showAll": settings.data_point.show_all,
                    }),
                ));
                if settings.data_point.show_all {
                    instances.extend(
                        model
                            .enumeration
                            .iter()
                            .take(MAX_ENUMERATED_CATEGORIES)
                            .filter(|entry| entry.show_on_demand)
                            .map(|entry| {
                                ObjectInstance::scoped(
                                    object_name,
                                    entry.display_name.clone(),
                                    json!({ "fill": solid(&entry.color) }),
                                    Some(entry.selection.clone()),
                                )
                            }),
                    );
                }
            }
            instances.extend(
                model
                    .enumeration
                    .iter()
                    .filter(|entry| !entry.show_on_demand)
                    .map(|entry| {
                        ObjectInstance::scoped(
                            object_name,
                            entry.display_name.clone(),
                            json!({ "fill": solid(&entry.color) }),
                            Some(entry.selection.clone()),
                        )
                    }),
            );
        }
        ObjectName::Label => {
            instances.push(ObjectInstance::visual(
                object_name,
                json!({ "show": settings.label.show }),
            ));
            if model.data_points.len() <= 1 {
                instances.push(ObjectInstance::visual(
                    object_name,
                    json!({ "text": settings.label.text }),
                ));
            }
            instances.push(ObjectInstance::visual(
                object_name,
                json!({
                    "fontFamily": settings.label.font_family,
                    "fontSize": settings.label.font_size,
                    "autoSize": settings.label.auto_size,
                    "fill": solid(&settings.label.fill),
                }),
            ));
        }
        ObjectName::DataLabels => {
            instances.push(
                ObjectInstance::visual(
                    object_name,
                    json!({
                        "show": settings.data_labels.show,
                        "fill": solid(&settings.data_labels.fill),
                        "fontFamily": settings.data_labels.font_family,
                        "fontSize": settings.data_labels.font_size,
                        "unit": settings.data_labels.unit,
                        "precision": settings.data_labels.precision,
                    }),
                )
                .with_range("precision", Some(0.0), precision_max),
            );
        }
        ObjectName::Targets => {
            instances.push(ObjectInstance::visual(
                object_name,
                json!({
                    "markerFill": solid(&settings.targets.marker_fill),
                    "comparison": settings.targets.comparison,
                }),
            ));
            for target in &first_point.targets {
                instances.push(ObjectInstance::scoped(
                    object_name,
                    target.display_name.clone(),
                    json!({ "fill": target.color.as_deref().map(solid) }),
                    Some(target.selection.clone()),
                ));
                instances.push(ObjectInstance::scoped(
                    object_name,
                    format!("{} marker", target.display_name),
                    json!({ "marker": target.marker }),
                    Some(target.selection.clone()),
                ));
            }
        }
        ObjectName::States => {
            if first_point.states.is_empty() {
                instances.push(ObjectInstance::visual(
                    object_name,
                    json!({
                        "show": settings.states.show,
                        "calculate": settings.states.calculate,
                    }),
                ));
                for (ordinal, (value, fill)) in settings
                    .states
                    .values
                    .iter()
                    .zip(settings.states.fills.iter())
                    .enumerate()
                {
                    let mut properties = Map::new();
                    properties.insert(format!("state{}Fill", ordinal + 1), solid(fill));
                    properties.insert(format!("state{}", ordinal + 1), json!(value));
                    instances.push(ObjectInstance::visual(object_name, Value::Object(properties)));
                }
            } else {
                instances.extend(first_point.states.iter().map(|band| ObjectInstance {
                    object_name,
                    display_name: band.display_name.clone(),
                    properties: into_map(json!({ "fill": solid(&band.color) })),
                    selector: band.selection.clone(),
                    valid_values: IndexMap::new(),
                }));
            }
        }
        ObjectName::Axis => {
            instances.push(
                ObjectInstance::visual(
                    object_name,
                    json!({
                        "show": settings.axis.show,
                        "start": settings.axis.start,
                        "end": settings.axis.end,
                        "fontFamily": settings.axis.font_family,
                        "fontSize": settings.axis.font_size,
                        "fill": solid(&settings.axis.fill),
                        "unit": settings.axis.unit,
                        "precision": settings.axis.precision,
                    }),
                )
                .with_range("precision", Some(0.0), precision_max),
            );
        }
        ObjectName::Legend => {
            instances.push(ObjectInstance::visual(
                object_name,
                json!({
                    "show": settings.legend.show,
                    "position": settings.legend.position,
                    "showTitle": settings.legend.show_title,
                    "titleText": settings.legend.title_text,
                    "labelColor": solid(&settings.legend.label_color),
                    "fontSize": settings.legend.font_size,
                }),
            ));
        }
        ObjectName::ColorBlind => {
            instances.push(ObjectInstance::visual(
                object_name,
                json!({ "vision": settings.color_blind.vision }),
            ));
        }
    }

    instances
}
