use tracing::debug;

use crate::error::ChartResult;
use crate::render::Renderer;

use super::chart_builders::build_chart;
use super::chart_request::{ChartRequest, ChartType};
use super::target::ChartConfig;

/// Owns one rendering surface and the chart currently live on it.
///
/// Every render rebuilds the config from scratch, disposes the previous
/// instance, resets the surface and constructs exactly one new instance.
pub struct ChartAdapter<R: Renderer> {
    renderer: R,
    current: Option<R::Handle>,
}

impl<R: Renderer> ChartAdapter<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            current: None,
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn has_live_chart(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn current_chart(&self) -> Option<&R::Handle> {
        self.current.as_ref()
    }

    /// Builds the config for `chart_type` against this surface's width
    /// without touching the surface.
    pub fn build(
        &self,
        chart_type: ChartType,
        request: &ChartRequest,
    ) -> ChartResult<ChartConfig> {
        build_chart(chart_type, request, self.renderer.surface_width_px())
    }

    pub fn render(
        &mut self,
        chart_type: ChartType,
        request: &ChartRequest,
    ) -> ChartResult<&R::Handle> {
        let config = self.build(chart_type, request)?;
        self.draw_chart(&config)
    }

    pub fn render_line_chart(&mut self, request: &ChartRequest) -> ChartResult<&R::Handle> {
        self.render(ChartType::Line, request)
    }

    pub fn render_area_chart(&mut self, request: &ChartRequest) -> ChartResult<&R::Handle> {
        self.render(ChartType::Area, request)
    }

    pub fn render_pie_chart(&mut self, request: &ChartRequest) -> ChartResult<&R::Handle> {
        self.render(ChartType::Pie, request)
    }

    pub fn render_column_chart(&mut self, request: &ChartRequest) -> ChartResult<&R::Handle> {
        self.render(ChartType::Column, request)
    }

    pub fn render_bar_chart(&mut self, request: &ChartRequest) -> ChartResult<&R::Handle> {
        self.render(ChartType::Bar, request)
    }

    pub fn render_scatter_chart(&mut self, request: &ChartRequest) -> ChartResult<&R::Handle> {
        self.render(ChartType::Scatter, request)
    }

    pub fn render_bubble_chart(&mut self, request: &ChartRequest) -> ChartResult<&R::Handle> {
        self.render(ChartType::Bubble, request)
    }

    /// Replaces whatever is live on the surface with `config`.
    ///
    /// If the surface reset or construction fails, no chart is left live.
    pub fn draw_chart(&mut self, config: &ChartConfig) -> ChartResult<&R::Handle> {
        self.clear();
        self.renderer.reset_surface()?;
        let handle = self.renderer.construct(config)?;
        debug!(kind = config.kind.as_str(), "constructed chart");
        Ok(self.current.insert(handle))
    }

    /// Disposes the live chart, if any.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!("disposing previous chart");
            self.renderer.destroy(previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChartData, Point, Series};
    use crate::render::NullRenderer;

    fn request() -> ChartRequest {
        ChartRequest::new(ChartData::Series(vec![Series::new(
            "a",
            vec![Point::new("x", 1.0)],
        )]))
    }

    #[test]
    fn build_does_not_touch_the_surface() {
        let adapter = ChartAdapter::new(NullRenderer::default());
        let config = adapter.build(ChartType::Column, &request()).expect("config");
        assert_eq!(config.kind.as_str(), "bar");
        assert_eq!(adapter.renderer().reset_count, 0);
        assert!(!adapter.has_live_chart());
    }

    #[test]
    fn clear_disposes_live_chart() {
        let mut adapter = ChartAdapter::new(NullRenderer::default());
        let handle = *adapter.render_column_chart(&request()).expect("render");
        adapter.clear();
        assert!(!adapter.has_live_chart());
        assert_eq!(adapter.renderer().destroyed, vec![handle]);
        adapter.clear();
        assert_eq!(adapter.renderer().destroyed.len(), 1);
    }
}
