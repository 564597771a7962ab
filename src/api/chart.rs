use tracing::debug;

use crate::core::{
    ColorPalette, FormatCache, FormatCacheStats, FormatterFactory, HeuristicTextMeasurer,
    TextMeasurer, ThemePalette, Viewport,
};
use crate::data::{DataTable, SelectionId};
use crate::error::BulletResult;
use crate::layout::{BulletGeometry, LayoutEngine};
use crate::model::{
    HostServices, LegendData, ObjectInstance, ObjectName, ViewModel, ViewModelBuilder,
    enumerate_objects, legend_data,
};
use crate::render::{RenderFrame, Renderer, emit_frame};
use crate::settings::{Orientation, SettingsInput, VisionMode};
use crate::telemetry::log_errors;

use super::BulletChartConfig;

/// Main facade consumed by host applications.
///
/// One [`BulletChart::update`] runs a full build, layout, emission and render
/// pass; nothing from an earlier pass is reused except the formatter cache and
/// the selection.
pub struct BulletChart<R: Renderer> {
    renderer: R,
    config: BulletChartConfig,
    cache: FormatCache,
    measurer: Box<dyn TextMeasurer>,
    palette: Box<dyn ColorPalette>,
    selection: Vec<SelectionId>,
    model: ViewModel,
    geometry: BulletGeometry,
}

impl<R: Renderer> std::fmt::Debug for BulletChart<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulletChart")
            .field("config", &self.config)
            .field("cache", &self.cache.stats())
            .field("selection", &self.selection)
            .field("points", &self.model.data_points.len())
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> BulletChart<R> {
    #[must_use]
    pub fn new(renderer: R, config: BulletChartConfig) -> Self {
        Self {
            renderer,
            config,
            cache: FormatCache::default(),
            measurer: Box::new(HeuristicTextMeasurer::default()),
            palette: Box::new(ThemePalette::default()),
            selection: Vec::new(),
            model: ViewModel::default(),
            geometry: BulletGeometry::empty(
                Viewport::new(0.0, 0.0),
                Orientation::default(),
                VisionMode::default(),
            ),
        }
    }

    #[must_use]
    pub fn with_text_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Box<dyn ColorPalette>) -> Self {
        self.palette = palette;
        self
    }

    /// Replaces the formatter factory; the cache starts over empty.
    #[must_use]
    pub fn with_formatter_factory(mut self, factory: Box<dyn FormatterFactory>) -> Self {
        self.cache = FormatCache::new(factory);
        self
    }

    /// Runs one full pass for fresh host input.
    ///
    /// An unusable viewport clears the chart without rendering; an empty
    /// table renders an empty frame. Only renderer failures surface as errors.
    pub fn update(
        &mut self,
        table: &DataTable,
        settings: &SettingsInput,
        viewport: Viewport,
    ) -> BulletResult<()> {
        log_errors("update", || {
            if !viewport.is_valid() {
                debug!(
                    width = viewport.width,
                    height = viewport.height,
                    "skipping pass for unusable viewport"
                );
                self.model = ViewModel::default();
                self.geometry =
                    BulletGeometry::empty(viewport, Orientation::default(), VisionMode::default());
                return Ok(());
            }

            let host = HostServices {
                locale: &self.config.host_locale,
                palette: self.palette.as_ref(),
            };
            self.model = ViewModelBuilder::new(host, &mut self.cache).build(table, settings);
            self.geometry = LayoutEngine::new(self.measurer.as_ref()).layout(
                &self.model,
                viewport,
                &mut self.cache,
            );
            self.render_current()
        })
    }

    /// Re-emits the last geometry, e.g. after the selection changed.
    pub fn render(&mut self) -> BulletResult<()> {
        log_errors("render", || self.render_current())
    }

    fn render_current(&mut self) -> BulletResult<()> {
        if !self.geometry.viewport.is_valid() {
            debug!("no usable viewport yet; nothing to render");
            return Ok(());
        }
        let frame = self.frame();
        self.renderer.render(&frame)
    }

    /// Frame for the last geometry under the current selection.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        emit_frame(&self.geometry, &self.selection)
    }

    /// Toggles `handle` in the selection and re-renders.
    ///
    /// Returns whether the handle is selected afterwards.
    pub fn select(&mut self, handle: SelectionId) -> BulletResult<bool> {
        let selected = if let Some(position) = self.selection.iter().position(|h| *h == handle) {
            self.selection.remove(position);
            false
        } else {
            self.selection.push(handle);
            true
        };
        debug!(selected, count = self.selection.len(), "selection changed");
        self.render()?;
        Ok(selected)
    }

    /// Selects the bullet under a viewport position; a click on empty space clears.
    pub fn click(&mut self, x: f64, y: f64) -> BulletResult<Option<SelectionId>> {
        let handle = self
            .hit_test(x, y)
            .and_then(|index| self.geometry.points[index].selection.clone());
        match handle {
            Some(handle) => {
                self.select(handle.clone())?;
                Ok(Some(handle))
            }
            None => {
                self.clear_selection()?;
                Ok(None)
            }
        }
    }

    pub fn clear_selection(&mut self) -> BulletResult<()> {
        if self.selection.is_empty() {
            return Ok(());
        }
        self.selection.clear();
        self.render()
    }

    /// Index of the bullet whose slot contains the viewport position.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        let local_x = x - self.geometry.margin.left;
        let local_y = y - self.geometry.margin.top;
        self.geometry.points.iter().position(|point| {
            local_x >= point.slot.x
                && local_x < point.slot.right()
                && local_y >= point.slot.y
                && local_y < point.slot.bottom()
        })
    }

    #[must_use]
    pub fn selection(&self) -> &[SelectionId] {
        &self.selection
    }

    #[must_use]
    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    #[must_use]
    pub fn geometry(&self) -> &BulletGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn config(&self) -> &BulletChartConfig {
        &self.config
    }

    #[must_use]
    pub fn legend_data(&self) -> Option<LegendData> {
        legend_data(&self.model)
    }

    #[must_use]
    pub fn enumerate_objects(&self, object_name: ObjectName) -> Vec<ObjectInstance> {
        enumerate_objects(&self.model, object_name)
    }

    #[must_use]
    pub fn format_cache_stats(&self) -> FormatCacheStats {
        self.cache.stats()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
