mod null_renderer;

pub use null_renderer::{ChartHandle, NullRenderer};

use crate::api::ChartConfig;
use crate::error::ChartResult;

/// Contract implemented by any rendering surface.
///
/// A surface hosts at most one live chart. Backends receive a fully assembled
/// `ChartConfig` so drawing code stays isolated from option translation.
pub trait Renderer {
    /// Live chart instance returned by [`Renderer::construct`].
    type Handle;

    /// Pixel width used by tick density and label truncation heuristics.
    fn surface_width_px(&self) -> f64;

    /// Clears whatever the surface currently shows.
    fn reset_surface(&mut self) -> ChartResult<()>;

    /// Builds and mounts a chart from `config` on the surface.
    fn construct(&mut self, config: &ChartConfig) -> ChartResult<Self::Handle>;

    /// Releases a chart previously returned by `construct`.
    fn destroy(&mut self, handle: Self::Handle);
}
