use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::host::ChartHost;
use crate::render::Surface;

use super::ChartEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeOutcome {
    /// Not initialized or the panel measured zero.
    Ignored,
    /// Surfaces were resized and kept their content; segments keep the
    /// previous column count.
    Minor(Viewport),
    /// Panel size was re-cached and every bound segment redrawn.
    Major(Viewport),
}

/// Whether going from `reference_width` to `new_width` crosses the
/// `(min, max)` ratio band.
#[must_use]
pub fn is_major_resize(reference_width: u32, new_width: u32, (min, max): (f64, f64)) -> bool {
    if reference_width == 0 || new_width == 0 {
        return true;
    }
    let ratio = f64::from(reference_width) / f64::from(new_width);
    ratio > max || ratio < min
}

impl<H: ChartHost> ChartEngine<H> {
    /// Re-measures the panel `panel_id` after a host layout change.
    pub fn on_resize(&mut self, panel_id: &str) -> ChartResult<ResizeOutcome> {
        let panel = self
            .host
            .find_node(panel_id)
            .ok_or_else(|| ChartError::NodeNotFound(panel_id.to_owned()))?;
        if self.layout.is_none() {
            return Ok(ResizeOutcome::Ignored);
        }
        let size = self.host.measure(&panel);
        if !size.is_valid() {
            debug!(panel_id, "resize ignored: empty panel");
            return Ok(ResizeOutcome::Ignored);
        }
        self.measured_size = size;

        if is_major_resize(
            self.reference_width,
            size.width,
            self.config.major_resize_ratio,
        ) {
            self.reference_width = size.width;
            self.panel_size = size;
            self.apply_panel_geometry()?;
            let bound: Vec<usize> = self
                .panes
                .iter()
                .filter_map(|pane| pane.bound_segment())
                .collect();
            for segment in bound {
                self.draw_segment(segment)?;
            }
            debug!(width = size.width, height = size.height, "major resize");
            return Ok(ResizeOutcome::Major(size));
        }

        for pane in &mut self.panes {
            let resized = self.host.create_surface(&pane.nodes().graph, size)?;
            let previous = pane.replace_surface(resized);
            pane.surface_mut().draw_image_from(&previous)?;
        }
        debug!(width = size.width, height = size.height, "minor resize");
        Ok(ResizeOutcome::Minor(size))
    }

    /// Last panel size measured by `on_resize` (or the layout).
    #[must_use]
    pub fn measured_size(&self) -> Viewport {
        self.measured_size
    }

    /// Width the current binning column count is based on.
    #[must_use]
    pub fn reference_width(&self) -> u32 {
        self.reference_width
    }
}
