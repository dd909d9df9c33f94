use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::ValueFormat;

use super::target::{OptionCallbacks, TickFormatter, TooltipLabelFormatter};

/// `legend` option: a visibility flag or a position keyword (`"top"`, `"left"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegendOption {
    Visible(bool),
    Position(String),
}

/// Forced x value interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XType {
    Number,
    Datetime,
    String,
}

/// Backend-agnostic chart options supplied by the caller.
///
/// `min` and `max` keep an explicit JSON `null` apart from an absent key:
/// `Some(Value::Null)` means the caller asked for "no explicit bound".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub min: Option<Value>,
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ytitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xtype: Option<XType>,
    /// `Some(false)` disables line smoothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<bool>,
    /// `Some(false)` hides point markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donut: Option<bool>,
    #[serde(flatten)]
    pub format: ValueFormat,
    /// Replaces the default palette.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Raw target-library options merged last.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<Value>,
    /// Caller-supplied callbacks; they win over generated formatters.
    #[serde(skip)]
    pub callbacks: OptionCallbacks,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn non_empty(text: Option<&String>) -> Option<&str> {
    text.map(String::as_str).filter(|text| !text.is_empty())
}

impl ChartOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chart title; an empty string counts as no title.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        non_empty(self.title.as_ref())
    }

    #[must_use]
    pub fn xtitle_text(&self) -> Option<&str> {
        non_empty(self.xtitle.as_ref())
    }

    #[must_use]
    pub fn ytitle_text(&self) -> Option<&str> {
        non_empty(self.ytitle.as_ref())
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendOption) -> Self {
        self.legend = Some(legend);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Pass `Value::Null` to request "no explicit minimum".
    #[must_use]
    pub fn with_min(mut self, min: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: impl Into<Value>) -> Self {
        self.max = Some(max.into());
        self
    }

    #[must_use]
    pub fn with_stacked(mut self, stacked: bool) -> Self {
        self.stacked = Some(stacked);
        self
    }

    #[must_use]
    pub fn with_xtitle(mut self, xtitle: impl Into<String>) -> Self {
        self.xtitle = Some(xtitle.into());
        self
    }

    #[must_use]
    pub fn with_ytitle(mut self, ytitle: impl Into<String>) -> Self {
        self.ytitle = Some(ytitle.into());
        self
    }

    #[must_use]
    pub fn with_xtype(mut self, xtype: XType) -> Self {
        self.xtype = Some(xtype);
        self
    }

    #[must_use]
    pub fn with_curve(mut self, curve: bool) -> Self {
        self.curve = Some(curve);
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: bool) -> Self {
        self.points = Some(points);
        self
    }

    #[must_use]
    pub fn with_donut(mut self, donut: bool) -> Self {
        self.donut = Some(donut);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = Some(colors);
        self
    }

    #[must_use]
    pub fn with_library(mut self, library: Value) -> Self {
        self.library = Some(library);
        self
    }

    #[must_use]
    pub fn with_tick_formatter(mut self, axis: super::Axis, formatter: TickFormatter) -> Self {
        self.callbacks.set_tick(axis, formatter);
        self
    }

    #[must_use]
    pub fn with_tooltip_label(mut self, formatter: TooltipLabelFormatter) -> Self {
        self.callbacks.tooltip_label = Some(formatter);
        self
    }

    #[must_use]
    pub fn is_numeric_x(&self) -> bool {
        self.xtype == Some(XType::Number)
    }
}
