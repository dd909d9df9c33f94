use chrono::FixedOffset;
use serde_json::{Value, json};
use tracing::trace;

use crate::core::time_granularity::TimeAxisInference;
use crate::core::{KeyMode, PivotTable, Series, infer_time_axis, pivot_series};

use super::chart_options::ChartOptions;
use super::option_defaults::Palette;
use super::target::{Axis, Dataset, DatasetValues, TargetData, TargetOptions};

/// Series shape consumed by the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Line,
    Area,
    Column,
}

/// Everything about the request the data table needs besides the series.
#[derive(Debug, Clone, Copy)]
pub struct DataTableContext<'a> {
    pub kind: TableKind,
    pub discrete: bool,
    pub options: &'a ChartOptions,
    pub time_zone: FixedOffset,
    pub surface_width_px: f64,
}

impl DataTableContext<'_> {
    /// Line and area charts on a continuous axis treat x values as timestamps.
    #[must_use]
    pub fn detects_time(&self) -> bool {
        matches!(self.kind, TableKind::Line | TableKind::Area) && !self.discrete
    }

    #[must_use]
    pub fn key_mode(&self) -> KeyMode {
        if self.detects_time() {
            KeyMode::Timestamp(self.time_zone)
        } else if self.options.is_numeric_x() {
            KeyMode::Numeric
        } else {
            KeyMode::Insertion
        }
    }
}

/// Pivots `series` into aligned datasets and, in time mode, writes the inferred
/// unit, step size and tooltip format into `target` unless already set.
pub fn build_data_table(
    series: &[Series],
    target: &mut TargetOptions,
    ctx: DataTableContext<'_>,
) -> TargetData {
    let table = pivot_series(series, ctx.key_mode());
    debug_assert!(table.is_aligned());

    if ctx.detects_time() {
        if let Some(inference) =
            infer_time_axis(&table.timestamps, ctx.time_zone, ctx.surface_width_px)
        {
            apply_time_inference(target, &inference);
        }
    }

    let PivotTable {
        labels, columns, ..
    } = table;
    let palette = Palette::new(ctx.options.colors.as_deref());
    let datasets = series
        .iter()
        .zip(columns)
        .enumerate()
        .map(|(idx, (s, values))| styled_dataset(s, values, idx, palette, &ctx))
        .collect();

    TargetData {
        labels: Some(labels),
        datasets,
    }
}

fn styled_dataset(
    series: &Series,
    values: Vec<Option<f64>>,
    index: usize,
    palette: Palette<'_>,
    ctx: &DataTableContext<'_>,
) -> Dataset {
    let color = palette.color(index);
    let mut dataset = Dataset::new(Some(series.name.clone()), DatasetValues::Aligned(values))
        .with_style("fill", json!(ctx.kind == TableKind::Area))
        .with_style("borderColor", json!(color))
        .with_style("backgroundColor", json!(color))
        .with_style("pointBackgroundColor", json!(color))
        .with_style("borderWidth", json!(2));

    if let Some(stack) = &series.stack {
        dataset = dataset.with_style("stack", json!(stack));
    }
    if ctx.options.curve == Some(false) {
        dataset = dataset.with_style("lineTension", json!(0));
    }
    if ctx.options.points == Some(false) {
        dataset = dataset
            .with_style("pointRadius", json!(0))
            .with_style("pointHitRadius", json!(5));
    }
    if let Some(library) = &series.library {
        dataset.apply_library(library);
    }
    dataset
}

fn apply_time_inference(target: &mut TargetOptions, inference: &TimeAxisInference) {
    let unit_forced = target.get("/scales/xAxes/0/time/unit").is_some();
    let tooltip_forced = target.get("/scales/xAxes/0/time/tooltipFormat").is_some();
    let time = target.axis_section_mut(Axis::X, "time");

    if !unit_forced {
        if let Some(unit) = inference.unit {
            if let Some(format) = unit.display_format() {
                time.insert(
                    "displayFormats".to_owned(),
                    json!({ unit.as_str(): format }),
                );
            }
            time.insert("unit".to_owned(), Value::from(unit.as_str()));
            if let Some(step) = inference.step_size {
                time.insert("unitStepSize".to_owned(), json!(step));
            }
        }
        trace!(
            unit = ?inference.unit,
            step_size = ?inference.step_size,
            span_days = inference.span_days,
            "inferred time unit"
        );
    }

    if !tooltip_forced {
        if let Some(format) = inference.tooltip_format {
            time.insert("tooltipFormat".to_owned(), json!(format));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::option_defaults::cartesian_defaults;
    use crate::core::Point;

    fn context(options: &ChartOptions, kind: TableKind) -> DataTableContext<'_> {
        DataTableContext {
            kind,
            discrete: false,
            options,
            time_zone: crate::core::time_granularity::utc_offset(),
            surface_width_px: 800.0,
        }
    }

    #[test]
    fn dataset_styling_follows_options() {
        let options = ChartOptions::default().with_curve(false).with_points(false);
        let mut library = serde_json::Map::new();
        library.insert("borderWidth".to_owned(), json!(4));
        let series = vec![
            Series::new("a", vec![Point::new("x", 1.0)])
                .with_stack("s1")
                .with_library(library),
        ];
        let mut target = TargetOptions::new(cartesian_defaults());
        let data = build_data_table(&series, &mut target, context(&options, TableKind::Column));

        let dataset = &data.datasets[0];
        assert_eq!(dataset.label.as_deref(), Some("a"));
        assert_eq!(dataset.style["stack"], json!("s1"));
        assert_eq!(dataset.style["lineTension"], json!(0));
        assert_eq!(dataset.style["pointRadius"], json!(0));
        assert_eq!(dataset.style["pointHitRadius"], json!(5));
        assert_eq!(dataset.style["borderWidth"], json!(4));
        assert_eq!(dataset.style["fill"], json!(false));
    }

    #[test]
    fn forced_unit_is_kept() {
        let options = ChartOptions::default();
        let series = vec![Series::new(
            "a",
            vec![
                Point::new("2024-01-01T00:00:00Z", 1.0),
                Point::new("2024-01-05T00:00:00Z", 2.0),
            ],
        )];
        let mut target = TargetOptions::new(cartesian_defaults());
        target
            .axis_section_mut(Axis::X, "time")
            .insert("unit".to_owned(), json!("week"));
        build_data_table(&series, &mut target, context(&options, TableKind::Line));

        assert_eq!(target.get("/scales/xAxes/0/time/unit"), Some(&json!("week")));
        assert_eq!(target.get("/scales/xAxes/0/time/unitStepSize"), None);
        assert_eq!(target.get("/scales/xAxes/0/time/tooltipFormat"), Some(&json!("ll")));
    }
}
