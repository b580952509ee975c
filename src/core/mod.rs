pub mod axis;
pub mod binning;
pub mod series;
pub mod types;
pub mod windowing;

pub use axis::{
    AxisKind, OriginTickPolicy, TickLabel, TickLabels, TickLayout, format_tick_value,
    round_to_precision, tick_layout, x_tick_labels, y_tick_labels,
};
pub use binning::{AxisScale, BinnedSegment, SegmentState, bin_segment, segment_x_range};
pub use series::{PhaseMode, Series, SeriesSource, SeriesStore, SyntheticWave};
pub use types::{DataPoint, ScrollMetrics, Viewport, Zoom};
pub use windowing::{SegmentIndexing, SegmentWindow, points_per_segment, segment_window};
