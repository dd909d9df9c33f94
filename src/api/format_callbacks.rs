use std::sync::Arc;

use crate::core::{AxisValue, ValueFormat};

use super::option_setters::AxisBinding;
use super::target::{
    Axis, TargetData, TargetOptions, TooltipItem, TooltipLabel, TooltipLabelFormatter,
};

/// Hard cap for truncated category tick labels.
pub const MAX_LABEL_CHARS: usize = 25;

/// Which charts the formatters are installed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTarget {
    Cartesian(AxisBinding),
    /// No value axis; tooltips read slice labels.
    Pie,
}

/// Installs value-axis tick and tooltip formatters when `format` is active.
///
/// Formatters the caller already supplied are left alone.
pub fn install_format_callbacks(
    target: &mut TargetOptions,
    format: &ValueFormat,
    format_target: FormatTarget,
) {
    if !format.is_active() {
        return;
    }

    if let FormatTarget::Cartesian(binding) = format_target {
        let axis = binding.value_axis();
        if target.callbacks().tick(axis).is_none() {
            let format = format.clone();
            target.callbacks_mut().set_tick(
                axis,
                Arc::new(move |value: &AxisValue| format.format("", value.as_f64())),
            );
        }
    }

    if target.callbacks().tooltip_label.is_some() {
        return;
    }
    let format = format.clone();
    let formatter: TooltipLabelFormatter = match format_target {
        FormatTarget::Cartesian(binding) => {
            Arc::new(move |item: &TooltipItem, data: &TargetData| {
                cartesian_tooltip_label(&format, binding, item, data)
            })
        }
        FormatTarget::Pie => Arc::new(move |item: &TooltipItem, data: &TargetData| {
            pie_tooltip_label(&format, item, data)
        }),
    };
    target.callbacks_mut().tooltip_label = Some(formatter);
}

fn cartesian_tooltip_label(
    format: &ValueFormat,
    binding: AxisBinding,
    item: &TooltipItem,
    data: &TargetData,
) -> TooltipLabel {
    let mut label = data
        .datasets
        .get(item.dataset_index)
        .and_then(|dataset| dataset.label.clone())
        .unwrap_or_default();
    if !label.is_empty() {
        label.push_str(": ");
    }
    let value = match binding.value_axis() {
        Axis::X => item.x_value,
        Axis::Y => item.y_value,
    };
    TooltipLabel::Line(format.format(&label, value.unwrap_or(f64::NAN)))
}

/// Multi-line slice labels get the value on their first line only; the
/// shared label data is read, never modified.
fn pie_tooltip_label(format: &ValueFormat, item: &TooltipItem, data: &TargetData) -> TooltipLabel {
    let value = data
        .datasets
        .get(item.dataset_index)
        .and_then(|dataset| dataset.data.value_at(item.index))
        .unwrap_or(f64::NAN);
    let label = data
        .labels
        .as_ref()
        .and_then(|labels| labels.get(item.index));

    match label {
        Some(AxisValue::Lines(lines)) if !lines.is_empty() => {
            let mut lines = lines.clone();
            lines[0] = format.format(&format!("{}: ", lines[0]), value);
            TooltipLabel::Lines(lines)
        }
        Some(label) => {
            TooltipLabel::Line(format.format(&format!("{}: ", label.to_label_string()), value))
        }
        None => TooltipLabel::Line(format.format(": ", value)),
    }
}

/// Longest category label that still fits, given the surface width.
#[must_use]
pub fn max_label_chars(surface_width_px: f64, label_count: usize) -> usize {
    if label_count == 0 {
        return MAX_LABEL_CHARS;
    }
    let size = (surface_width_px / 4.0 / label_count as f64).ceil();
    if !size.is_finite() || size <= 0.0 {
        return 0;
    }
    (size as usize).min(MAX_LABEL_CHARS)
}

/// Cuts `label` to `max_chars`, replacing the tail with an ellipsis.
#[must_use]
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }
    let mut truncated: String = label.chars().take(max_chars.saturating_sub(2)).collect();
    truncated.push_str("...");
    truncated
}

/// Replaces the x-axis tick formatter with one that truncates long labels.
pub fn install_label_truncation(
    target: &mut TargetOptions,
    surface_width_px: f64,
    label_count: usize,
) {
    let max_chars = max_label_chars(surface_width_px, label_count);
    target.callbacks_mut().set_tick(
        Axis::X,
        Arc::new(move |value: &AxisValue| truncate_label(&value.to_label_string(), max_chars)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_label_chars_is_capped() {
        assert_eq!(max_label_chars(800.0, 4), 25);
        assert_eq!(max_label_chars(400.0, 10), 10);
        assert_eq!(max_label_chars(401.0, 10), 11);
        assert_eq!(max_label_chars(800.0, 0), 25);
        assert_eq!(max_label_chars(0.0, 3), 0);
    }

    #[test]
    fn truncation_appends_ellipsis() {
        assert_eq!(truncate_label("Short", 10), "Short");
        assert_eq!(truncate_label("Exactly ten", 11), "Exactly ten");
        assert_eq!(truncate_label("A much longer label", 10), "A much l...");
        assert_eq!(truncate_label("Überlänge", 4), "Üb...");
    }

    #[test]
    fn inactive_format_installs_nothing() {
        let mut target = TargetOptions::default();
        install_format_callbacks(
            &mut target,
            &ValueFormat::default(),
            FormatTarget::Cartesian(AxisBinding::Vertical),
        );
        assert!(target.callbacks().is_empty());
    }
}
