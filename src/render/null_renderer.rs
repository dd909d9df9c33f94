use crate::api::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

/// Opaque id of a chart constructed by [`NullRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartHandle(u64);

impl ChartHandle {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Headless surface used by tests and config-only hosts.
///
/// It records every construction and disposal and still validates that
/// datasets line up with the labels before accepting a config.
#[derive(Debug)]
pub struct NullRenderer {
    surface_width_px: f64,
    pub reset_count: usize,
    pub constructed: Vec<(ChartHandle, ChartConfig)>,
    pub destroyed: Vec<ChartHandle>,
    live: Vec<ChartHandle>,
    next_id: u64,
    fail_next_construct: Option<String>,
}

impl NullRenderer {
    #[must_use]
    pub fn new(surface_width_px: f64) -> Self {
        Self {
            surface_width_px,
            reset_count: 0,
            constructed: Vec::new(),
            destroyed: Vec::new(),
            live: Vec::new(),
            next_id: 1,
            fail_next_construct: None,
        }
    }

    pub fn set_surface_width_px(&mut self, width: f64) {
        self.surface_width_px = width;
    }

    /// Makes the next `construct` call fail with `reason`.
    pub fn fail_next_construct(&mut self, reason: impl Into<String>) {
        self.fail_next_construct = Some(reason.into());
    }

    /// Charts constructed and not yet destroyed.
    #[must_use]
    pub fn live_handles(&self) -> &[ChartHandle] {
        &self.live
    }

    #[must_use]
    pub fn last_config(&self) -> Option<&ChartConfig> {
        self.constructed.last().map(|(_, config)| config)
    }
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl Renderer for NullRenderer {
    type Handle = ChartHandle;

    fn surface_width_px(&self) -> f64 {
        self.surface_width_px
    }

    fn reset_surface(&mut self) -> ChartResult<()> {
        self.reset_count += 1;
        Ok(())
    }

    fn construct(&mut self, config: &ChartConfig) -> ChartResult<Self::Handle> {
        if let Some(reason) = self.fail_next_construct.take() {
            return Err(ChartError::Render(reason));
        }
        if !config.data.is_aligned() {
            return Err(ChartError::Render(
                "dataset lengths do not match label count".to_owned(),
            ));
        }

        let handle = ChartHandle(self.next_id);
        self.next_id += 1;
        self.constructed.push((handle, config.clone()));
        self.live.push(handle);
        Ok(handle)
    }

    fn destroy(&mut self, handle: Self::Handle) {
        self.live.retain(|live| *live != handle);
        self.destroyed.push(handle);
    }
}
