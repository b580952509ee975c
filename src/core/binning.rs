use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::windowing::{SegmentIndexing, SegmentWindow, segment_window};
use crate::core::{Series, Viewport, Zoom};

/// Scale factor with an explicit fallback for zero or negative spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisScale {
    Proportional(f64),
    /// The span was zero, negative or not finite; a factor of 1 applies.
    Degenerate,
}

impl AxisScale {
    /// `numerator / span` when that is a usable positive factor.
    #[must_use]
    pub fn from_span(numerator: f64, span: f64) -> Self {
        let factor = numerator / span;
        if numerator > 0.0 && span > 0.0 && factor.is_finite() && factor > 0.0 {
            Self::Proportional(factor)
        } else {
            Self::Degenerate
        }
    }

    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Proportional(factor) => factor,
            Self::Degenerate => 1.0,
        }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        matches!(self, Self::Degenerate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentState {
    Populated,
    EmptySeries,
    /// The segment lies past the last data point.
    OutOfRange,
}

/// Pixel columns for one segment plus the numeric x-range it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedSegment {
    pub segment_index: usize,
    pub state: SegmentState,
    pub window: Option<SegmentWindow>,
    /// One entry per pixel column; `None` where no point fell into the bin.
    pub columns: Vec<Option<f64>>,
    pub x_range: f64,
    pub bin_width: AxisScale,
    pub y_scale: AxisScale,
    /// Points whose bin landed at or past the pane width.
    pub clipped_points: usize,
}

impl BinnedSegment {
    fn without_points(segment_index: usize, state: SegmentState, width_px: u32) -> Self {
        Self {
            segment_index,
            state,
            window: None,
            columns: vec![None; width_px as usize],
            x_range: 0.0,
            bin_width: AxisScale::Degenerate,
            y_scale: AxisScale::Degenerate,
            clipped_points: 0,
        }
    }

    #[must_use]
    pub fn filled_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn has_points(&self) -> bool {
        self.columns.iter().any(Option::is_some)
    }

    /// Splits columns into connected `(x, y)` runs. An empty column breaks
    /// the line and isolated single columns are dropped.
    #[must_use]
    pub fn polyline_runs(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current: SmallVec<[(f64, f64); 64]> = SmallVec::new();
        for (index, column) in self.columns.iter().enumerate() {
            match column {
                Some(y) => current.push((index as f64, *y)),
                None => flush_run(&mut current, &mut runs),
            }
        }
        flush_run(&mut current, &mut runs);
        runs
    }
}

fn flush_run(current: &mut SmallVec<[(f64, f64); 64]>, runs: &mut Vec<Vec<(f64, f64)>>) {
    if current.len() >= 2 {
        runs.push(current.to_vec());
    }
    current.clear();
}

/// Averages every point of a segment into pixel-wide bins.
///
/// `viewport` is the pane size: its width is the column count, its height
/// drives the vertical mapping (`floor(h/2 - 0.5 * y_scale * mean)`). Never
/// fails; missing data yields empty columns.
#[must_use]
pub fn bin_segment(
    series: &Series,
    segment_index: usize,
    zoom: Zoom,
    viewport: Viewport,
    indexing: SegmentIndexing,
) -> BinnedSegment {
    let width_px = viewport.width;
    if series.is_empty() {
        return BinnedSegment::without_points(segment_index, SegmentState::EmptySeries, width_px);
    }
    let points = series.points();
    let Some(window) = segment_window(points.len(), segment_index, zoom, indexing) else {
        return BinnedSegment::without_points(segment_index, SegmentState::OutOfRange, width_px);
    };

    let (x_min, x_max) = series.x_bounds();
    let (y_min, y_max) = series.y_bounds();
    let segment_span = (x_max - x_min) / zoom.factor();
    let bin_width = AxisScale::from_span(segment_span, f64::from(width_px));
    let height = f64::from(viewport.height);
    let y_scale = AxisScale::from_span(height, y_max - y_min);

    let columns_len = width_px as usize;
    let mut sums = vec![0.0_f64; columns_len];
    let mut counts = vec![0_u32; columns_len];
    let mut clipped_points = 0;
    let origin_x = points[window.start].x;
    for point in &points[window.start..=window.end] {
        let bin = ((point.x - origin_x) / bin_width.factor()).ceil();
        // Negative bins only appear for unsorted input.
        if !(0.0..columns_len as f64).contains(&bin) {
            clipped_points += 1;
            continue;
        }
        let bin = bin as usize;
        sums[bin] += point.y;
        counts[bin] += 1;
    }

    let half_height = height / 2.0;
    let factor = y_scale.factor();
    let columns = sums
        .iter()
        .zip(&counts)
        .map(|(sum, &count)| {
            (count > 0).then(|| (half_height - 0.5 * factor * sum / f64::from(count)).floor())
        })
        .collect();

    let x_range = points[window.end].x - origin_x;
    trace!(
        segment_index,
        start = window.start,
        end = window.end,
        clipped_points,
        x_range,
        "binned segment"
    );

    BinnedSegment {
        segment_index,
        state: SegmentState::Populated,
        window: Some(window),
        columns,
        x_range,
        bin_width,
        y_scale,
        clipped_points,
    }
}

/// Numeric x-range covered by a segment, `0` when it holds no points.
#[must_use]
pub fn segment_x_range(
    series: &Series,
    segment_index: usize,
    zoom: Zoom,
    indexing: SegmentIndexing,
) -> f64 {
    let points = series.points();
    segment_window(points.len(), segment_index, zoom, indexing)
        .map_or(0.0, |window| points[window.end].x - points[window.start].x)
}
