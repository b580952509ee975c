use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel size of a panel, pane or surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal zoom factor. Always finite and `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Zoom(f64);

impl Zoom {
    pub const NONE: Self = Self(1.0);

    pub fn new(factor: f64) -> ChartResult<Self> {
        if !factor.is_finite() || factor < 1.0 {
            return Err(ChartError::InvalidZoom(factor));
        }
        Ok(Self(factor))
    }

    #[must_use]
    pub const fn factor(self) -> f64 {
        self.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::NONE
    }
}

impl TryFrom<f64> for Zoom {
    type Error = ChartError;

    fn try_from(value: f64) -> ChartResult<Self> {
        Self::new(value)
    }
}

impl From<Zoom> for f64 {
    fn from(zoom: Zoom) -> Self {
        zoom.0
    }
}

/// Scroll state of the scrollable pane wrapper as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_x: f64,
    pub scroll_y: f64,
    /// Total scrollable content width.
    pub scroll_width: f64,
    /// Visible width of the wrapper.
    pub client_width: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub const fn new(scroll_x: f64, scroll_width: f64, client_width: f64) -> Self {
        Self {
            scroll_x,
            scroll_y: 0.0,
            scroll_width,
            client_width,
        }
    }

    #[must_use]
    pub fn max_scroll_x(self) -> f64 {
        self.scroll_width - self.client_width
    }
}
