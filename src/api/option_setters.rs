//! Ordered option setter pipeline.
//!
//! Each setter is a `(applies, apply)` pair; [`assemble_options`] folds the
//! fixed pipeline over a fresh default tree and merges raw overrides last.

use serde_json::{Value, json};

use crate::core::{merge_into, to_float};

use super::chart_options::{ChartOptions, LegendOption};
use super::option_defaults::cartesian_defaults;
use super::target::{Axis, TargetOptions};

/// Which physical axis carries values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisBinding {
    /// Values on y (line, area, column, scatter).
    Vertical,
    /// Values on x (horizontal bar).
    Horizontal,
}

impl AxisBinding {
    #[must_use]
    pub fn value_axis(self) -> Axis {
        match self {
            Self::Vertical => Axis::Y,
            Self::Horizontal => Axis::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetterContext {
    pub binding: AxisBinding,
    /// Request-level flag consulted when `legend` is absent.
    pub hide_legend: bool,
}

struct OptionSetter {
    name: &'static str,
    applies: fn(&ChartOptions, &SetterContext) -> bool,
    apply: fn(&mut TargetOptions, &ChartOptions, &SetterContext),
}

const PIPELINE: [OptionSetter; 7] = [
    OptionSetter {
        name: "legend",
        applies: |options, ctx| options.legend.is_some() || ctx.hide_legend,
        apply: |target, options, ctx| set_legend(target, options.legend.as_ref(), ctx.hide_legend),
    },
    OptionSetter {
        name: "title",
        applies: |options, _| options.title_text().is_some(),
        apply: |target, options, _| {
            if let Some(title) = options.title_text() {
                set_title(target, title);
            }
        },
    },
    OptionSetter {
        name: "min",
        applies: |options, _| options.min.is_some(),
        apply: |target, options, ctx| {
            if let Some(min) = &options.min {
                set_min(target, ctx.binding, min);
            }
        },
    },
    OptionSetter {
        name: "max",
        applies: |options, _| options.max.is_some(),
        apply: |target, options, ctx| {
            if let Some(max) = &options.max {
                set_max(target, ctx.binding, max);
            }
        },
    },
    OptionSetter {
        name: "stacked",
        applies: |options, _| options.stacked.is_some(),
        apply: |target, options, _| set_stacked(target, options.stacked.unwrap_or(false)),
    },
    OptionSetter {
        name: "xtitle",
        applies: |options, _| options.xtitle_text().is_some(),
        apply: |target, options, _| {
            if let Some(title) = options.xtitle_text() {
                set_axis_title(target, Axis::X, title);
            }
        },
    },
    OptionSetter {
        name: "ytitle",
        applies: |options, _| options.ytitle_text().is_some(),
        apply: |target, options, _| {
            if let Some(title) = options.ytitle_text() {
                set_axis_title(target, Axis::Y, title);
            }
        },
    },
];

/// Builds cartesian options: base defaults, axis defaults, the setter
/// pipeline, then `options.library` and caller callbacks on top.
#[must_use]
pub fn assemble_options(options: &ChartOptions, ctx: SetterContext) -> TargetOptions {
    let target = PIPELINE
        .iter()
        .filter(|setter| (setter.applies)(options, &ctx))
        .fold(TargetOptions::new(cartesian_defaults()), |mut target, setter| {
            tracing::trace!(setter = setter.name, "apply option setter");
            (setter.apply)(&mut target, options, &ctx);
            target
        });
    apply_overrides(target, options)
}

/// Merges raw library options and caller callbacks with highest precedence.
#[must_use]
pub fn apply_overrides(mut target: TargetOptions, options: &ChartOptions) -> TargetOptions {
    if let Some(library) = &options.library {
        merge_into(target.tree_mut(), library);
    }
    target.callbacks_mut().overlay(&options.callbacks);
    target
}

/// `true`/`false` toggle the legend, a keyword also positions it; an absent
/// legend is hidden only when `hide_legend` is set.
pub fn set_legend(target: &mut TargetOptions, legend: Option<&LegendOption>, hide_legend: bool) {
    let section = target.section_mut("legend");
    match legend {
        Some(LegendOption::Visible(visible)) => {
            section.insert("display".to_owned(), json!(visible));
        }
        Some(LegendOption::Position(position)) => {
            section.insert("display".to_owned(), json!(!position.is_empty()));
            if !position.is_empty() {
                section.insert("position".to_owned(), json!(position));
            }
        }
        None if hide_legend => {
            section.insert("display".to_owned(), json!(false));
        }
        None => {}
    }
}

pub fn set_title(target: &mut TargetOptions, title: &str) {
    let section = target.section_mut("title");
    section.insert("display".to_owned(), json!(true));
    section.insert("text".to_owned(), json!(title));
}

/// An explicit `null` minimum is ignored; anything else is coerced.
pub fn set_min(target: &mut TargetOptions, binding: AxisBinding, min: &Value) {
    if min.is_null() {
        return;
    }
    target
        .axis_section_mut(binding.value_axis(), "ticks")
        .insert("min".to_owned(), json!(to_float(min)));
}

/// Always coerced, `null` included (it becomes NaN, serialized as `null`).
pub fn set_max(target: &mut TargetOptions, binding: AxisBinding, max: &Value) {
    target
        .axis_section_mut(binding.value_axis(), "ticks")
        .insert("max".to_owned(), json!(to_float(max)));
}

pub fn set_stacked(target: &mut TargetOptions, stacked: bool) {
    for axis in [Axis::X, Axis::Y] {
        target
            .axis_mut(axis)
            .insert("stacked".to_owned(), json!(stacked));
    }
}

pub fn set_axis_title(target: &mut TargetOptions, axis: Axis, title: &str) {
    let label = target.axis_section_mut(axis, "scaleLabel");
    label.insert("display".to_owned(), json!(true));
    label.insert("labelString".to_owned(), json!(title));
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTICAL: SetterContext = SetterContext {
        binding: AxisBinding::Vertical,
        hide_legend: false,
    };

    #[test]
    fn untouched_options_keep_defaults() {
        let target = assemble_options(&ChartOptions::default(), VERTICAL);
        assert_eq!(target.tree(), &cartesian_defaults());
    }

    #[test]
    fn position_keyword_shows_and_positions_legend() {
        let options = ChartOptions::default().with_legend(LegendOption::Position("top".into()));
        let target = assemble_options(&options, VERTICAL);
        assert_eq!(target.tree()["legend"], json!({"display": true, "position": "top"}));
    }

    #[test]
    fn hide_legend_only_applies_without_legend_option() {
        let ctx = SetterContext {
            hide_legend: true,
            ..VERTICAL
        };
        let hidden = assemble_options(&ChartOptions::default(), ctx);
        assert_eq!(hidden.tree()["legend"]["display"], json!(false));

        let shown = assemble_options(
            &ChartOptions::default().with_legend(LegendOption::Visible(true)),
            ctx,
        );
        assert_eq!(shown.tree()["legend"]["display"], json!(true));
    }

    #[test]
    fn stacked_forces_both_axes() {
        let target = assemble_options(&ChartOptions::default().with_stacked(true), VERTICAL);
        assert_eq!(target.get("/scales/xAxes/0/stacked"), Some(&json!(true)));
        assert_eq!(target.get("/scales/yAxes/0/stacked"), Some(&json!(true)));
    }

    #[test]
    fn bounds_follow_the_value_axis() {
        let options = ChartOptions::default().with_min(2).with_max("10");
        let vertical = assemble_options(&options, VERTICAL);
        assert_eq!(vertical.get("/scales/yAxes/0/ticks/min"), Some(&json!(2.0)));
        assert_eq!(vertical.get("/scales/yAxes/0/ticks/max"), Some(&json!(10.0)));

        let horizontal = assemble_options(
            &options,
            SetterContext {
                binding: AxisBinding::Horizontal,
                ..VERTICAL
            },
        );
        assert_eq!(horizontal.get("/scales/xAxes/0/ticks/min"), Some(&json!(2.0)));
        assert_eq!(horizontal.get("/scales/yAxes/0/ticks/min"), None);
    }

    #[test]
    fn library_overrides_win() {
        let options = ChartOptions::default()
            .with_title("Generated")
            .with_library(json!({"title": {"text": "Override"}, "animation": {"duration": 1}}));
        let target = assemble_options(&options, VERTICAL);
        assert_eq!(target.tree()["title"]["text"], json!("Override"));
        assert_eq!(target.tree()["title"]["display"], json!(true));
        assert_eq!(target.tree()["animation"], json!({"duration": 1}));
    }
}
