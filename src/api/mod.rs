mod adapter;
mod chart_builders;
mod chart_options;
mod chart_request;
mod data_table;
mod format_callbacks;
mod json_contract;
mod option_defaults;
mod option_setters;
mod target;

pub use adapter::ChartAdapter;
pub use chart_builders::{
    PointShape, all_zeros, build_chart, build_column_chart, build_line_chart, build_pie_chart,
    build_scatter_chart,
};
pub use chart_options::{ChartOptions, LegendOption, XType};
pub use chart_request::{ChartRequest, ChartType};
pub use data_table::{DataTableContext, TableKind, build_data_table};
pub use format_callbacks::{
    FormatTarget, MAX_LABEL_CHARS, install_format_callbacks, install_label_truncation,
    max_label_chars, truncate_label,
};
pub use json_contract::{
    CHART_CONFIG_JSON_SCHEMA_V1, CHART_REQUEST_JSON_SCHEMA_V1, ChartConfigJsonContractV1,
    ChartRequestJsonContractV1,
};
pub use option_defaults::{
    DEFAULT_COLORS, DONUT_CUTOUT_PERCENTAGE, Palette, axis_defaults, base_options,
    cartesian_defaults,
};
pub use option_setters::{
    AxisBinding, SetterContext, apply_overrides, assemble_options, set_axis_title, set_legend,
    set_max, set_min, set_stacked, set_title,
};
pub use target::{
    Axis, ChartConfig, ChartKind, Dataset, DatasetValues, OptionCallbacks, TargetData,
    TargetOptions, TickFormatter, TooltipItem, TooltipLabel, TooltipLabelFormatter, XyPoint,
};
