use std::cmp::Ordering;

use chrono::FixedOffset;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::warn;

use crate::core::primitives::{millis_to_datetime, to_float};
use crate::core::types::{AxisValue, Series};

/// How x values become pivot keys and how keys are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// x values are timestamps keyed by epoch millis, sorted ascending.
    /// Offset-free text timestamps are read in the carried zone.
    Timestamp(FixedOffset),
    /// Raw x values, sorted numerically.
    Numeric,
    /// Raw x values in first-seen order.
    Insertion,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PivotKey {
    Millis(i64),
    Number(OrderedFloat<f64>),
    Text(String),
    Lines(Vec<String>),
}

impl PivotKey {
    fn from_raw(value: &AxisValue) -> Self {
        match value {
            AxisValue::Number(number) => Self::Number(OrderedFloat(*number)),
            AxisValue::Time(time) => Self::Millis(time.timestamp_millis()),
            AxisValue::Text(text) => Self::Text(text.clone()),
            AxisValue::Lines(lines) => Self::Lines(lines.clone()),
        }
    }
}

struct PivotRow {
    label: AxisValue,
    values: SmallVec<[Option<f64>; 4]>,
}

/// Series aligned onto one shared label axis.
///
/// `columns[i]` holds series `i`'s values positionally aligned with `labels`;
/// `None` marks a label the series has no point for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    pub labels: Vec<AxisValue>,
    pub columns: Vec<Vec<Option<f64>>>,
    /// Epoch millis of each label, filled only in [`KeyMode::Timestamp`].
    pub timestamps: Vec<i64>,
}

impl PivotTable {
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.columns
            .iter()
            .all(|column| column.len() == self.labels.len())
    }
}

/// Pivots independently keyed series onto a shared, ordered label axis.
///
/// A later point with the same key in the same series overwrites the earlier one.
/// Non-numeric y values are treated as missing.
#[must_use]
pub fn pivot_series(series: &[Series], mode: KeyMode) -> PivotTable {
    let width = series.len();
    let mut rows: IndexMap<PivotKey, PivotRow> = IndexMap::new();

    for (series_idx, s) in series.iter().enumerate() {
        for point in &s.data {
            let (key, label) = match mode {
                KeyMode::Timestamp(zone) => {
                    let Some(millis) = point.x.timestamp_millis_in(zone) else {
                        warn!(
                            series = %s.name,
                            x = %point.x.to_label_string(),
                            "skipping point without a readable timestamp"
                        );
                        continue;
                    };
                    let Some(time) = millis_to_datetime(millis) else {
                        warn!(series = %s.name, millis, "skipping out-of-range timestamp");
                        continue;
                    };
                    (PivotKey::Millis(millis), AxisValue::Time(time))
                }
                KeyMode::Numeric | KeyMode::Insertion => {
                    (PivotKey::from_raw(&point.x), point.x.clone())
                }
            };

            let row = rows.entry(key).or_insert_with(|| PivotRow {
                label,
                values: SmallVec::from_elem(None, width),
            });
            let value = to_float(&point.y);
            row.values[series_idx] = (!value.is_nan()).then_some(value);
        }
    }

    match mode {
        KeyMode::Timestamp(_) | KeyMode::Numeric => {
            rows.sort_by(|_, a, _, b| compare_numeric(&a.label, &b.label));
        }
        KeyMode::Insertion => {}
    }

    let mut table = PivotTable {
        labels: Vec::with_capacity(rows.len()),
        columns: vec![Vec::with_capacity(rows.len()); width],
        timestamps: Vec::new(),
    };
    for (key, row) in rows {
        if let PivotKey::Millis(millis) = key {
            if matches!(mode, KeyMode::Timestamp(_)) {
                table.timestamps.push(millis);
            }
        }
        table.labels.push(row.label);
        for (column, value) in table.columns.iter_mut().zip(row.values) {
            column.push(value);
        }
    }
    table
}

fn compare_numeric(a: &AxisValue, b: &AxisValue) -> Ordering {
    a.as_f64().total_cmp(&b.as_f64())
}
