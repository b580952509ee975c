mod primitives;
mod recording_surface;

pub use primitives::{Color, Polyline};
pub use recording_surface::{RecordingSurface, SurfaceCommand};

use crate::core::Viewport;
use crate::error::ChartResult;

/// Drawable surface owned by one pane or axis.
///
/// The engine only ever clears, strokes polylines and copies another
/// surface of the same backend, so any canvas-like target can implement it.
pub trait Surface {
    fn size(&self) -> Viewport;

    fn clear(&mut self) -> ChartResult<()>;

    fn draw_polyline(&mut self, polyline: &Polyline) -> ChartResult<()>;

    /// Paints `other` at the origin of `self`.
    fn draw_image_from(&mut self, other: &Self) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoSurface, CairoSurfaceStats};
