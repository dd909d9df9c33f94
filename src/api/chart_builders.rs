//! Per-kind chart config builders.
//!
//! Every builder starts from freshly assembled options, layers its kind
//! specific tweaks on top and returns a complete [`ChartConfig`].

use std::borrow::Cow;

use serde_json::{Value, json};
use tracing::debug;

use crate::core::{Series, to_float};
use crate::error::{ChartError, ChartResult};

use super::chart_options::ChartOptions;
use super::chart_request::{ChartRequest, ChartType};
use super::data_table::{DataTableContext, TableKind, build_data_table};
use super::format_callbacks::{FormatTarget, install_format_callbacks, install_label_truncation};
use super::option_defaults::{DONUT_CUTOUT_PERCENTAGE, Palette, base_options};
use super::option_setters::{
    AxisBinding, SetterContext, apply_overrides, assemble_options, set_legend, set_title,
};
use super::target::{
    Axis, ChartConfig, ChartKind, Dataset, DatasetValues, TargetData, TargetOptions, XyPoint,
};

/// Builds the target config for `chart_type` on a surface `surface_width_px` wide.
pub fn build_chart(
    chart_type: ChartType,
    request: &ChartRequest,
    surface_width_px: f64,
) -> ChartResult<ChartConfig> {
    let width = validate_surface_width(surface_width_px)?;
    let config = match chart_type {
        ChartType::Line => build_line_chart(request, width, TableKind::Line),
        ChartType::Area => build_line_chart(request, width, TableKind::Area),
        ChartType::Pie => build_pie_chart(request),
        ChartType::Column => build_column_chart(request, width, AxisBinding::Vertical),
        ChartType::Bar => build_column_chart(request, width, AxisBinding::Horizontal),
        ChartType::Scatter => build_scatter_chart(request, PointShape::Scatter, false),
        ChartType::Bubble => build_scatter_chart(request, PointShape::Bubble, false),
    };
    debug!(
        chart_type = %chart_type,
        kind = config.kind.as_str(),
        datasets = config.data.datasets.len(),
        labels = config.data.labels.as_ref().map_or(0, Vec::len),
        "built chart config"
    );
    Ok(config)
}

fn validate_surface_width(width: f64) -> ChartResult<f64> {
    if !width.is_finite() || width < 0.0 {
        return Err(ChartError::InvalidSurface { width });
    }
    Ok(width)
}

fn setter_context(request: &ChartRequest, binding: AxisBinding) -> SetterContext {
    SetterContext {
        binding,
        hide_legend: request.hide_legend,
    }
}

/// Line and area charts. A numeric x axis is drawn as a scatter with lines.
#[must_use]
pub fn build_line_chart(
    request: &ChartRequest,
    surface_width_px: f64,
    kind: TableKind,
) -> ChartConfig {
    if request.options.is_numeric_x() {
        let shape = if kind == TableKind::Area {
            PointShape::FilledLine
        } else {
            PointShape::Scatter
        };
        return build_scatter_chart(request, shape, true);
    }

    let series = request.data.series();
    let options: Cow<'_, ChartOptions> =
        if request.options.max.is_none() && all_zeros(&series) {
            Cow::Owned(request.options.clone().with_max(1))
        } else {
            Cow::Borrowed(&request.options)
        };

    let mut target = assemble_options(&options, setter_context(request, AxisBinding::Vertical));
    install_format_callbacks(
        &mut target,
        &options.format,
        FormatTarget::Cartesian(AxisBinding::Vertical),
    );

    let ctx = DataTableContext {
        kind,
        discrete: request.discrete,
        options: &options,
        time_zone: request.time_zone(),
        surface_width_px,
    };
    let data = build_data_table(&series, &mut target, ctx);

    let axis_type = if request.discrete { "category" } else { "time" };
    target
        .axis_mut(Axis::X)
        .insert("type".to_owned(), json!(axis_type));

    ChartConfig {
        kind: ChartKind::Line,
        data,
        options: target,
    }
}

/// Every y value of every series reads as exactly zero.
#[must_use]
pub fn all_zeros(series: &[Series]) -> bool {
    series
        .iter()
        .flat_map(|s| s.data.iter())
        .all(|point| to_float(&point.y) == 0.0)
}

/// Pie and donut charts. Slices come straight from the `(label, value)` pairs.
#[must_use]
pub fn build_pie_chart(request: &ChartRequest) -> ChartConfig {
    let options = &request.options;
    let mut target = TargetOptions::new(base_options());
    if options.donut == Some(true) {
        if let Some(tree) = target.tree_mut().as_object_mut() {
            tree.insert("cutoutPercentage".to_owned(), json!(DONUT_CUTOUT_PERCENTAGE));
        }
    }
    if options.legend.is_some() {
        set_legend(&mut target, options.legend.as_ref(), false);
    }
    if let Some(title) = options.title_text() {
        set_title(&mut target, title);
    }
    let mut target = apply_overrides(target, options);
    install_format_callbacks(&mut target, &options.format, FormatTarget::Pie);

    let (labels, values): (Vec<_>, Vec<_>) = request
        .data
        .pairs()
        .into_iter()
        .map(|(label, value)| {
            let value = to_float(&value);
            (label, (!value.is_nan()).then_some(value))
        })
        .unzip();

    let colors = Palette::new(options.colors.as_deref()).to_json();
    let dataset = Dataset::new(None, DatasetValues::Aligned(values))
        .with_style("backgroundColor", colors.clone())
        .with_style("borderColor", colors);

    ChartConfig {
        kind: ChartKind::Pie,
        data: TargetData {
            labels: Some(labels),
            datasets: vec![dataset],
        },
        options: target,
    }
}

/// Columns (`Vertical`) and horizontal bars (`Horizontal`).
#[must_use]
pub fn build_column_chart(
    request: &ChartRequest,
    surface_width_px: f64,
    binding: AxisBinding,
) -> ChartConfig {
    let options = &request.options;
    let mut target = assemble_options(options, setter_context(request, binding));
    install_format_callbacks(&mut target, &options.format, FormatTarget::Cartesian(binding));

    let series = request.data.series();
    let ctx = DataTableContext {
        kind: TableKind::Column,
        discrete: request.discrete,
        options,
        time_zone: request.time_zone(),
        surface_width_px,
    };
    let data = build_data_table(&series, &mut target, ctx);

    let kind = match binding {
        AxisBinding::Vertical => {
            let label_count = data.labels.as_ref().map_or(0, Vec::len);
            install_label_truncation(&mut target, surface_width_px, label_count);
            ChartKind::Bar
        }
        AxisBinding::Horizontal => ChartKind::HorizontalBar,
    };

    ChartConfig {
        kind,
        data,
        options: target,
    }
}

/// Point layout of the explicit `{x, y}` charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointShape {
    Scatter,
    /// Adds a radius per point.
    Bubble,
    /// Numeric-x area chart: a scatter filled under its line.
    FilledLine,
}

/// Scatter and bubble charts; also the numeric-x path of line and area charts
/// (`show_line`), which skips value formatting.
#[must_use]
pub fn build_scatter_chart(
    request: &ChartRequest,
    shape: PointShape,
    show_line: bool,
) -> ChartConfig {
    let options = &request.options;
    let mut target = assemble_options(options, setter_context(request, AxisBinding::Vertical));
    if !show_line {
        install_format_callbacks(
            &mut target,
            &options.format,
            FormatTarget::Cartesian(AxisBinding::Vertical),
        );
    }

    let palette = Palette::new(options.colors.as_deref());
    let datasets = request
        .data
        .series()
        .iter()
        .enumerate()
        .map(|(idx, series)| {
            let color = palette.color(idx);
            let points = series
                .data
                .iter()
                .map(|point| XyPoint {
                    x: point.x.as_f64(),
                    y: to_float(&point.y),
                    r: (shape == PointShape::Bubble)
                        .then(|| point.r.as_ref().map_or(f64::NAN, to_float)),
                })
                .collect();
            Dataset::new(Some(series.name.clone()), DatasetValues::Points(points))
                .with_style("showLine", json!(show_line))
                .with_style("borderColor", json!(color))
                .with_style("backgroundColor", json!(color))
                .with_style("pointBackgroundColor", json!(color))
                .with_style("fill", json!(shape == PointShape::FilledLine))
        })
        .collect();

    let x_axis = target.axis_mut(Axis::X);
    x_axis.insert("type".to_owned(), Value::from("linear"));
    x_axis.insert("position".to_owned(), Value::from("bottom"));

    let kind = match (shape, show_line) {
        (PointShape::Bubble, _) => ChartKind::Bubble,
        (_, true) | (PointShape::FilledLine, _) => ChartKind::Line,
        (PointShape::Scatter, false) => ChartKind::Scatter,
    };

    ChartConfig {
        kind,
        data: TargetData {
            labels: None,
            datasets,
        },
        options: target,
    }
}
