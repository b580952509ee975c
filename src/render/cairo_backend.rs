use cairo::{Context, Format, ImageSurface, Operator};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Polyline, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoSurfaceStats {
    pub clears: usize,
    pub polylines_drawn: usize,
    pub images_drawn: usize,
}

/// Cairo image-surface implementation of [`Surface`].
///
/// Cleared pixels are fully transparent so stacked panes show through.
#[derive(Debug)]
pub struct CairoSurface {
    surface: ImageSurface,
    size: Viewport,
    stats: CairoSurfaceStats,
}

impl CairoSurface {
    pub fn new(size: Viewport) -> ChartResult<Self> {
        let size = size.validate()?;
        let width = i32::try_from(size.width)
            .map_err(|_| ChartError::Backend("surface width exceeds i32".to_owned()))?;
        let height = i32::try_from(size.height)
            .map_err(|_| ChartError::Backend("surface height exceeds i32".to_owned()))?;
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            size,
            stats: CairoSurfaceStats::default(),
        })
    }

    #[must_use]
    pub fn image_surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn stats(&self) -> CairoSurfaceStats {
        self.stats
    }

    fn context(&self) -> ChartResult<Context> {
        Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))
    }
}

impl Surface for CairoSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn clear(&mut self) -> ChartResult<()> {
        let context = self.context()?;
        context.set_operator(Operator::Clear);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        self.stats.clears += 1;
        Ok(())
    }

    fn draw_polyline(&mut self, polyline: &Polyline) -> ChartResult<()> {
        polyline.validate()?;
        let context = self.context()?;
        apply_color(&context, polyline.color);
        context.set_line_width(polyline.stroke_width);

        let mut points = polyline.points.iter();
        if let Some(&(x, y)) = points.next() {
            context.move_to(x, y);
        }
        for &(x, y) in points {
            context.line_to(x, y);
        }
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
        self.stats.polylines_drawn += 1;
        Ok(())
    }

    fn draw_image_from(&mut self, other: &Self) -> ChartResult<()> {
        let context = self.context()?;
        context
            .set_source_surface(&other.surface, 0.0, 0.0)
            .map_err(|err| map_backend_error("failed to set source surface", err))?;
        context
            .paint()
            .map_err(|err| map_backend_error("failed to copy surface", err))?;
        self.stats.images_drawn += 1;
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
