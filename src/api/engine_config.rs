use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{OriginTickPolicy, SegmentIndexing};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Fixed layout metrics of the chart chrome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Room reserved left of the panes for the y axis.
    pub y_axis_offset_px: f64,
    /// Room reserved under the graphs for the x axis.
    pub x_axis_offset_px: f64,
    pub y_axis_tick_size_px: f64,
    pub x_axis_tick_size_px: f64,
    pub axis_line_width_px: f64,
    /// X tick intervals per pane; each pane carries one more placeholder.
    pub x_tick_count: usize,
    pub y_tick_count: usize,
    pub x_label_precision: u32,
    pub y_label_precision: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            y_axis_offset_px: 30.0,
            x_axis_offset_px: 70.0,
            y_axis_tick_size_px: 4.0,
            x_axis_tick_size_px: 6.0,
            axis_line_width_px: 1.0,
            x_tick_count: 3,
            y_tick_count: 5,
            x_label_precision: 1,
            y_label_precision: 0,
        }
    }
}

/// Delays of the cooperative task queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay before look-ahead/look-behind draws run.
    pub look_around_delay: Duration,
    /// How long the scroll lock stays engaged after a segment change.
    pub scroll_throttle: Duration,
    pub playback_period: Duration,
    pub playback_increment_px: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            look_around_delay: Duration::from_millis(1),
            scroll_throttle: Duration::from_millis(100),
            playback_period: Duration::from_millis(10),
            playback_increment_px: 1.0,
        }
    }
}

/// What `init` does when the requested container id does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContainerPolicy {
    /// Substitute a container according to the `ContainerMode`.
    #[default]
    Fallback,
    /// Fail with `ChartError::ContainerNotFound`.
    Strict,
}

/// Public engine bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    /// Scroll events this close to the right end are ignored.
    #[serde(default = "default_scroll_guard_band_px")]
    pub scroll_guard_band_px: f64,
    #[serde(default)]
    pub segment_indexing: SegmentIndexing,
    #[serde(default)]
    pub origin_tick_policy: OriginTickPolicy,
    #[serde(default)]
    pub container_policy: ContainerPolicy,
    #[serde(default = "default_series_color")]
    pub series_color: Color,
    #[serde(default = "default_series_stroke_width")]
    pub series_stroke_width: f64,
    #[serde(default = "default_axis_color")]
    pub axis_color: Color,
    /// `reference / new` width ratios outside `[min, max]` trigger a redraw.
    #[serde(default = "default_major_resize_ratio")]
    pub major_resize_ratio: (f64, f64),
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            timing: TimingConfig::default(),
            scroll_guard_band_px: default_scroll_guard_band_px(),
            segment_indexing: SegmentIndexing::default(),
            origin_tick_policy: OriginTickPolicy::default(),
            container_policy: ContainerPolicy::default(),
            series_color: default_series_color(),
            series_stroke_width: default_series_stroke_width(),
            axis_color: default_axis_color(),
            major_resize_ratio: default_major_resize_ratio(),
        }
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn with_segment_indexing(mut self, indexing: SegmentIndexing) -> Self {
        self.segment_indexing = indexing;
        self
    }

    #[must_use]
    pub fn with_origin_tick_policy(mut self, policy: OriginTickPolicy) -> Self {
        self.origin_tick_policy = policy;
        self
    }

    #[must_use]
    pub fn with_container_policy(mut self, policy: ContainerPolicy) -> Self {
        self.container_policy = policy;
        self
    }

    #[must_use]
    pub fn with_scroll_guard_band_px(mut self, guard_band_px: f64) -> Self {
        self.scroll_guard_band_px = guard_band_px;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let layout = &self.layout;
        if layout.x_tick_count == 0 || layout.y_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "axis tick counts must be > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("y axis offset", layout.y_axis_offset_px),
            ("x axis offset", layout.x_axis_offset_px),
            ("y axis tick size", layout.y_axis_tick_size_px),
            ("x axis tick size", layout.x_axis_tick_size_px),
            ("scroll guard band", self.scroll_guard_band_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("axis line width", layout.axis_line_width_px),
            ("series stroke width", self.series_stroke_width),
            ("playback increment", self.timing.playback_increment_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        let (min_ratio, max_ratio) = self.major_resize_ratio;
        let ratio_ok = min_ratio.is_finite()
            && max_ratio.is_finite()
            && min_ratio > 0.0
            && min_ratio <= 1.0
            && max_ratio >= 1.0;
        if !ratio_ok {
            return Err(ChartError::InvalidData(
                "major resize ratio must satisfy 0 < min <= 1 <= max".to_owned(),
            ));
        }
        self.series_color.validate()?;
        self.axis_color.validate()
    }
}

fn default_scroll_guard_band_px() -> f64 {
    10.0
}

fn default_series_color() -> Color {
    Color::RED
}

fn default_series_stroke_width() -> f64 {
    1.0
}

fn default_axis_color() -> Color {
    Color::BLACK
}

fn default_major_resize_ratio() -> (f64, f64) {
    (0.7, 1.5)
}
