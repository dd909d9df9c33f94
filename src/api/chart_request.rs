use std::fmt;
use std::str::FromStr;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::core::ChartData;
use crate::core::time_granularity::utc_offset;
use crate::error::ChartError;

use super::ChartOptions;

/// Abstract chart kind requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    /// Line chart filled down to the axis.
    Area,
    /// Vertical bars.
    Column,
    /// Horizontal bars.
    Bar,
    Pie,
    Scatter,
    Bubble,
}

impl ChartType {
    pub const ALL: [ChartType; 7] = [
        ChartType::Line,
        ChartType::Area,
        ChartType::Column,
        ChartType::Bar,
        ChartType::Pie,
        ChartType::Scatter,
        ChartType::Bubble,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Area => "area",
            Self::Column => "column",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown chart type: {value}")))
    }
}

/// One render call's worth of input.
///
/// Requests are cheap to build and never reused between renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartRequest {
    pub data: ChartData,
    pub options: ChartOptions,
    /// Pre-bucketed categorical x axis instead of a continuous time axis.
    pub discrete: bool,
    /// Hides the legend when `options.legend` is absent.
    pub hide_legend: bool,
    /// Offset of the calendar used for time granularity detection.
    pub utc_offset_minutes: i32,
}

impl ChartRequest {
    #[must_use]
    pub fn new(data: ChartData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_discrete(mut self, discrete: bool) -> Self {
        self.discrete = discrete;
        self
    }

    #[must_use]
    pub fn with_hide_legend(mut self, hide_legend: bool) -> Self {
        self.hide_legend = hide_legend;
        self
    }

    #[must_use]
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Calendar offset; out-of-range values fall back to UTC.
    #[must_use]
    pub fn time_zone(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(utc_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_type_parses_every_name() {
        for kind in ChartType::ALL {
            assert_eq!(kind.as_str().parse::<ChartType>().expect("parse"), kind);
        }
        assert!("donut".parse::<ChartType>().is_err());
    }

    #[test]
    fn invalid_offsets_fall_back_to_utc() {
        let request = ChartRequest::default().with_utc_offset_minutes(24 * 60);
        assert_eq!(request.time_zone(), utc_offset());
        let request = ChartRequest::default().with_utc_offset_minutes(-300);
        assert_eq!(request.time_zone().local_minus_utc(), -300 * 60);
    }
}
