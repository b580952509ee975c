use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{Polyline, Surface};

/// One call received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceCommand {
    Clear,
    Polyline(Polyline),
    DrawImage { source_size: Viewport, copied: usize },
}

/// In-memory surface used by tests and headless hosts.
///
/// It validates every polyline like a real backend would and keeps both the
/// full command log and the strokes visible since the last clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    size: Viewport,
    commands: Vec<SurfaceCommand>,
    visible: Vec<Polyline>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            commands: Vec::new(),
            visible: Vec::new(),
        }
    }

    #[must_use]
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Strokes drawn or copied since the last `clear`.
    #[must_use]
    pub fn visible_polylines(&self) -> &[Polyline] {
        &self.visible
    }

    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, SurfaceCommand::Clear))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.visible.clear();
        self.commands.push(SurfaceCommand::Clear);
        Ok(())
    }

    fn draw_polyline(&mut self, polyline: &Polyline) -> ChartResult<()> {
        polyline.validate()?;
        self.visible.push(polyline.clone());
        self.commands.push(SurfaceCommand::Polyline(polyline.clone()));
        Ok(())
    }

    fn draw_image_from(&mut self, other: &Self) -> ChartResult<()> {
        self.visible.extend(other.visible.iter().cloned());
        self.commands.push(SurfaceCommand::DrawImage {
            source_size: other.size,
            copied: other.visible.len(),
        });
        Ok(())
    }
}
