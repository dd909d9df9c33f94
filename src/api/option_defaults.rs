//! Default option trees. Every call builds a fresh tree so requests never
//! share mutable defaults.

use serde_json::{Value, json};

use crate::core::merge_into;

pub const DEFAULT_COLORS: [&str; 10] = [
    "#0A5C98", "#2375B1", "#3D8FCB", "#56A8E4", "#66B0E6", "#77B9E9", "#88C2EC", "#99CAEE",
    "#B3E4FF", "#CDFEFF",
];

pub const DONUT_CUTOUT_PERCENTAGE: u32 = 50;

/// Library-wide defaults shared by every chart kind.
#[must_use]
pub fn base_options() -> Value {
    json!({
        "maintainAspectRatio": false,
        "animation": false,
        "tooltips": {
            "displayColors": false,
            "callbacks": {}
        },
        "legend": {},
        "title": {"fontSize": 20, "fontColor": "#333"}
    })
}

/// Axis defaults for cartesian charts.
#[must_use]
pub fn axis_defaults() -> Value {
    json!({
        "scales": {
            "yAxes": [
                {
                    "ticks": {"maxTicksLimit": 4},
                    "scaleLabel": {"fontSize": 16, "fontColor": "#333"}
                }
            ],
            "xAxes": [
                {
                    "gridLines": {"drawOnChartArea": false},
                    "scaleLabel": {"fontSize": 16, "fontColor": "#333"},
                    "time": {},
                    "ticks": {}
                }
            ]
        }
    })
}

#[must_use]
pub fn cartesian_defaults() -> Value {
    let mut options = base_options();
    merge_into(&mut options, &axis_defaults());
    options
}

/// Dataset colours, cycling when there are more datasets than colours.
#[derive(Debug, Clone, Copy)]
pub struct Palette<'a> {
    custom: Option<&'a [String]>,
}

impl<'a> Palette<'a> {
    #[must_use]
    pub fn new(custom: Option<&'a [String]>) -> Self {
        Self {
            custom: custom.filter(|colors| !colors.is_empty()),
        }
    }

    #[must_use]
    pub fn color(&self, index: usize) -> &'a str {
        match self.custom {
            Some(colors) => colors[index % colors.len()].as_str(),
            None => DEFAULT_COLORS[index % DEFAULT_COLORS.len()],
        }
    }

    /// The whole palette, used for per-slice pie colours.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self.custom {
            Some(colors) => json!(colors),
            None => json!(DEFAULT_COLORS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fresh_per_call() {
        let mut first = cartesian_defaults();
        first["legend"]["display"] = json!(false);
        assert_eq!(cartesian_defaults()["legend"], json!({}));
        assert_eq!(
            cartesian_defaults()["scales"]["yAxes"][0]["ticks"]["maxTicksLimit"],
            json!(4)
        );
    }

    #[test]
    fn palette_cycles() {
        let default = Palette::new(None);
        assert_eq!(default.color(0), "#0A5C98");
        assert_eq!(default.color(10), "#0A5C98");

        let custom = vec!["red".to_owned(), "blue".to_owned()];
        let palette = Palette::new(Some(custom.as_slice()));
        assert_eq!(palette.color(3), "blue");
        let empty: Vec<String> = Vec::new();
        assert_eq!(Palette::new(Some(empty.as_slice())).color(1), "#2375B1");
    }
}
