use chrono::{DateTime, FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::primitives::{
    datetime_to_millis, decimal_to_f64, format_number, parse_float_prefix,
    parse_timestamp_millis,
};
use crate::error::ChartResult;

/// A value on the x axis: a timestamp, a number or a category label.
///
/// Multi-line category labels (`Lines`) only make sense for pie slices and
/// category axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Time(DateTime<Utc>),
    Text(String),
    Lines(Vec<String>),
}

impl AxisValue {
    /// Epoch milliseconds when the value can be read as a point in time.
    /// Offset-free text is read as UTC.
    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.timestamp_millis_in(Utc.fix())
    }

    /// Like [`AxisValue::timestamp_millis`], with offset-free text read as
    /// wall-clock time in `zone`.
    #[must_use]
    pub fn timestamp_millis_in(&self, zone: FixedOffset) -> Option<i64> {
        match self {
            Self::Time(time) => Some(datetime_to_millis(*time)),
            Self::Number(value) if value.is_finite() => Some(value.trunc() as i64),
            Self::Text(text) => parse_timestamp_millis(text, zone),
            Self::Number(_) | Self::Lines(_) => None,
        }
    }

    /// Numeric reading used by linear axes and numeric sorting.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Time(time) => datetime_to_millis(*time) as f64,
            Self::Text(text) => parse_float_prefix(text),
            Self::Lines(lines) if lines.len() == 1 => parse_float_prefix(&lines[0]),
            Self::Lines(_) => f64::NAN,
        }
    }

    #[must_use]
    pub fn to_label_string(&self) -> String {
        match self {
            Self::Number(value) => format_number(*value),
            Self::Time(time) => time.to_rfc3339(),
            Self::Text(text) => text.clone(),
            Self::Lines(lines) => lines.join(","),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for AxisValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for AxisValue {
    fn from(value: Vec<String>) -> Self {
        Self::Lines(value)
    }
}

/// One sample of a series.
///
/// `y` (and `r` for bubbles) stay raw JSON values so loosely typed host input
/// survives until the builders coerce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointRepr")]
pub struct Point {
    pub x: AxisValue,
    pub y: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<Value>,
}

impl Point {
    #[must_use]
    pub fn new(x: impl Into<AxisValue>, y: f64) -> Self {
        Self {
            x: x.into(),
            y: Value::from(y),
            r: None,
        }
    }

    #[must_use]
    pub fn bubble(x: impl Into<AxisValue>, y: f64, r: f64) -> Self {
        Self {
            x: x.into(),
            y: Value::from(y),
            r: Some(Value::from(r)),
        }
    }

    /// Keeps `y` exactly as supplied by the host.
    #[must_use]
    pub fn raw(x: impl Into<AxisValue>, y: Value) -> Self {
        Self {
            x: x.into(),
            y,
            r: None,
        }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self::new(time, decimal_to_f64(value, "value")?))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Triple((AxisValue, Value, Value)),
    Pair((AxisValue, Value)),
    Object {
        x: AxisValue,
        y: Value,
        #[serde(default)]
        r: Option<Value>,
    },
}

impl From<PointRepr> for Point {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Triple((x, y, r)) => Self { x, y, r: Some(r) },
            PointRepr::Pair((x, y)) => Self { x, y, r: None },
            PointRepr::Object { x, y, r } => Self { x, y, r },
        }
    }
}

/// One named line, bar group or bubble set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Series {
    pub name: String,
    pub data: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Raw dataset overrides merged over the generated dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<Map<String, Value>>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            data,
            stack: None,
            library: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn with_library(mut self, library: Map<String, Value>) -> Self {
        self.library = Some(library);
        self
    }
}

/// Chart input: named series for cartesian charts, flat pairs for pie charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartData {
    Series(Vec<Series>),
    Pairs(Vec<(AxisValue, Value)>),
}

impl Default for ChartData {
    fn default() -> Self {
        Self::Series(Vec::new())
    }
}

impl ChartData {
    /// Series view; flat pairs become one unnamed series.
    #[must_use]
    pub fn series(&self) -> Vec<Series> {
        match self {
            Self::Series(series) => series.clone(),
            Self::Pairs(pairs) => vec![Series::new(
                String::new(),
                pairs
                    .iter()
                    .map(|(x, y)| Point::raw(x.clone(), y.clone()))
                    .collect(),
            )],
        }
    }

    /// Pair view; series points are concatenated in series order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(AxisValue, Value)> {
        match self {
            Self::Pairs(pairs) => pairs.clone(),
            Self::Series(series) => series
                .iter()
                .flat_map(|s| s.data.iter().map(|p| (p.x.clone(), p.y.clone())))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Series(series) => series.iter().all(|s| s.data.is_empty()),
            Self::Pairs(pairs) => pairs.is_empty(),
        }
    }
}
