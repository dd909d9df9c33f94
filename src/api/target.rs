use std::fmt;
use std::sync::Arc;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::core::AxisValue;

/// Chart type string understood by the target library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    /// Vertical columns.
    Bar,
    HorizontalBar,
    Pie,
    Bubble,
    Scatter,
}

impl ChartKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::HorizontalBar => "horizontalBar",
            Self::Pie => "pie",
            Self::Bubble => "bubble",
            Self::Scatter => "scatter",
        }
    }
}

/// Physical axis of a cartesian chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::X => "xAxes",
            Self::Y => "yAxes",
        }
    }
}

/// Tooltip hover context handed to tooltip label callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipItem {
    pub dataset_index: usize,
    pub index: usize,
    pub x_value: Option<f64>,
    pub y_value: Option<f64>,
}

/// Tooltip text; multi-line labels stay split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TooltipLabel {
    Line(String),
    Lines(Vec<String>),
}

pub type TickFormatter = Arc<dyn Fn(&AxisValue) -> String + Send + Sync>;
pub type TooltipLabelFormatter = Arc<dyn Fn(&TooltipItem, &TargetData) -> TooltipLabel + Send + Sync>;

/// Callback slots of the target options that cannot live in JSON.
#[derive(Clone, Default)]
pub struct OptionCallbacks {
    pub x_tick: Option<TickFormatter>,
    pub y_tick: Option<TickFormatter>,
    pub tooltip_label: Option<TooltipLabelFormatter>,
}

impl fmt::Debug for OptionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionCallbacks")
            .field("x_tick", &self.x_tick.is_some())
            .field("y_tick", &self.y_tick.is_some())
            .field("tooltip_label", &self.tooltip_label.is_some())
            .finish()
    }
}

impl OptionCallbacks {
    #[must_use]
    pub fn tick(&self, axis: Axis) -> Option<&TickFormatter> {
        match axis {
            Axis::X => self.x_tick.as_ref(),
            Axis::Y => self.y_tick.as_ref(),
        }
    }

    pub fn set_tick(&mut self, axis: Axis, formatter: TickFormatter) {
        match axis {
            Axis::X => self.x_tick = Some(formatter),
            Axis::Y => self.y_tick = Some(formatter),
        }
    }

    /// Copies every slot `other` has filled, keeping ours otherwise.
    pub fn overlay(&mut self, other: &OptionCallbacks) {
        if let Some(formatter) = &other.x_tick {
            self.x_tick = Some(Arc::clone(formatter));
        }
        if let Some(formatter) = &other.y_tick {
            self.y_tick = Some(Arc::clone(formatter));
        }
        if let Some(formatter) = &other.tooltip_label {
            self.tooltip_label = Some(Arc::clone(formatter));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_tick.is_none() && self.y_tick.is_none() && self.tooltip_label.is_none()
    }
}

/// Target-library options: a JSON tree plus the callback slots.
#[derive(Debug, Clone, Default)]
pub struct TargetOptions {
    tree: Value,
    callbacks: OptionCallbacks,
}

impl TargetOptions {
    #[must_use]
    pub fn new(tree: Value) -> Self {
        Self {
            tree,
            callbacks: OptionCallbacks::default(),
        }
    }

    #[must_use]
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Value {
        &mut self.tree
    }

    #[must_use]
    pub fn callbacks(&self) -> &OptionCallbacks {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut OptionCallbacks {
        &mut self.callbacks
    }

    /// Reads a value by JSON pointer, e.g. `/scales/xAxes/0/time/unit`.
    #[must_use]
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.tree.pointer(pointer).filter(|value| !value.is_null())
    }

    /// Top-level object section such as `legend` or `title`, created on demand.
    pub fn section_mut(&mut self, key: &str) -> &mut Map<String, Value> {
        child_object(&mut self.tree, key)
    }

    /// First axis entry of `scales.xAxes` / `scales.yAxes`, created on demand.
    pub fn axis_mut(&mut self, axis: Axis) -> &mut Map<String, Value> {
        let scales = child_object(&mut self.tree, "scales");
        let axes = scales
            .entry(axis.key())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !axes.is_array() {
            *axes = Value::Array(Vec::new());
        }
        let Value::Array(axes) = axes else {
            unreachable!("axes was just normalized to an array");
        };
        if axes.is_empty() {
            axes.push(Value::Object(Map::new()));
        }
        as_object(&mut axes[0])
    }

    /// Object nested under the first axis entry, e.g. `ticks` or `time`.
    pub fn axis_section_mut(&mut self, axis: Axis, key: &str) -> &mut Map<String, Value> {
        let axis = self.axis_mut(axis);
        let slot = axis
            .entry(key)
            .or_insert_with(|| Value::Object(Map::new()));
        as_object(slot)
    }
}

impl Serialize for TargetOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tree.serialize(serializer)
    }
}

fn child_object<'a>(value: &'a mut Value, key: &str) -> &'a mut Map<String, Value> {
    let map = as_object(value);
    let slot = map
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    as_object(slot)
}

fn as_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just normalized to an object"),
    }
}

/// Explicit `{x, y, r}` point used by scatter and bubble datasets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DatasetValues {
    /// Values aligned with `TargetData::labels`.
    Aligned(Vec<Option<f64>>),
    Points(Vec<XyPoint>),
}

impl DatasetValues {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Aligned(values) => values.len(),
            Self::Points(points) => points.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value shown in a tooltip for index `index`.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        match self {
            Self::Aligned(values) => values.get(index).copied().flatten(),
            Self::Points(points) => points.get(index).map(|point| point.y),
        }
    }
}

/// One dataset: label, values and free-form styling keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: DatasetValues,
    pub style: Map<String, Value>,
}

impl Dataset {
    #[must_use]
    pub fn new(label: Option<String>, data: DatasetValues) -> Self {
        Self {
            label,
            data,
            style: Map::new(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, key: &str, value: Value) -> Self {
        self.style.insert(key.to_owned(), value);
        self
    }

    /// Merges raw overrides; a string `label` replaces the label, `data` is ignored.
    pub fn apply_library(&mut self, library: &Map<String, Value>) {
        for (key, value) in library {
            match (key.as_str(), value) {
                ("label", Value::String(label)) => self.label = Some(label.clone()),
                ("label", Value::Null) => self.label = None,
                ("data", _) => {
                    tracing::debug!("ignoring dataset data override");
                }
                _ => {
                    let slot = self.style.entry(key.clone()).or_insert(Value::Null);
                    crate::core::merge::merge_value(slot, value);
                }
            }
        }
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.style.len()))?;
        if let Some(label) = &self.label {
            map.serialize_entry("label", label)?;
        }
        map.serialize_entry("data", &self.data)?;
        for (key, value) in &self.style {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Target data tree: `labels` (absent for scatter/bubble) plus datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<AxisValue>>,
    pub datasets: Vec<Dataset>,
}

impl TargetData {
    /// Every dataset has exactly one value per label.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        match &self.labels {
            Some(labels) => self
                .datasets
                .iter()
                .all(|dataset| dataset.data.len() == labels.len()),
            None => true,
        }
    }
}

/// Fully assembled `{type, data, options}` ready for the render surface.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub data: TargetData,
    pub options: TargetOptions,
}

impl ChartConfig {
    /// Runs the installed tooltip callback, if any.
    #[must_use]
    pub fn tooltip_label(&self, item: &TooltipItem) -> Option<TooltipLabel> {
        self.options
            .callbacks()
            .tooltip_label
            .as_ref()
            .map(|formatter| formatter(item, &self.data))
    }

    /// Runs the installed tick callback for `axis`, if any.
    #[must_use]
    pub fn tick_label(&self, axis: Axis, value: &AxisValue) -> Option<String> {
        self.options
            .callbacks()
            .tick(axis)
            .map(|formatter| formatter(value))
    }
}

impl Serialize for ChartConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChartConfig", 3)?;
        state.serialize_field("type", &self.kind)?;
        state.serialize_field("data", &self.data)?;
        state.serialize_field("options", &self.options)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dataset_library_merges_style_and_keeps_aligned_data() {
        let mut dataset = Dataset::new(
            Some("a".to_owned()),
            DatasetValues::Aligned(vec![Some(1.0), None]),
        )
        .with_style("backgroundColor", json!(["red", "green"]))
        .with_style("borderWidth", json!(2));

        let library = json!({
            "label": "renamed",
            "data": [9, 9, 9],
            "backgroundColor": ["blue"],
            "borderWidth": 4
        });
        dataset.apply_library(library.as_object().expect("object"));

        assert_eq!(dataset.label.as_deref(), Some("renamed"));
        assert_eq!(dataset.data, DatasetValues::Aligned(vec![Some(1.0), None]));
        assert_eq!(dataset.style["backgroundColor"], json!(["blue", "green"]));
        assert_eq!(dataset.style["borderWidth"], json!(4));
    }
}
