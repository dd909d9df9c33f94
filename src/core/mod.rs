pub mod merge;
pub mod pivot;
pub mod primitives;
pub mod time_granularity;
pub mod types;
pub mod value_format;

pub use merge::merge_into;
pub use pivot::{KeyMode, PivotTable, pivot_series};
pub use primitives::to_float;
pub use time_granularity::{GranularityFlags, TimeAxisInference, TimeUnit, infer_time_axis};
pub use types::{AxisValue, ChartData, Point, Series};
pub use value_format::ValueFormat;
