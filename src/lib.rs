//! chartjs-adapter: translates backend-agnostic chart requests into Chart.js
//! configurations.
//!
//! The crate is split into `core` (coercion, pivoting, time granularity),
//! `api` (option assembly, per-kind builders, render dispatch) and `render`
//! (the surface contract and a headless implementation).

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartAdapter, ChartConfig, ChartOptions, ChartRequest, ChartType};
pub use error::{ChartError, ChartResult};
