use serde::{Deserialize, Serialize};

use crate::core::Zoom;

/// How a segment index maps onto point indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SegmentIndexing {
    /// Segment `i` starts one point past `i * points_per_segment` and spans
    /// `points_per_segment + 1` points, so neighbors overlap by one point and
    /// point 0 is never drawn.
    #[default]
    LegacyOffset,
    /// Segment `i` covers exactly `[i * pps, (i + 1) * pps)`.
    Contiguous,
}

/// Inclusive point-index window covered by one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentWindow {
    pub start: usize,
    pub end: usize,
}

impl SegmentWindow {
    #[must_use]
    pub fn point_count(self) -> usize {
        self.end - self.start + 1
    }
}

/// Number of source points assigned to each segment: `ceil(len / zoom)`.
#[must_use]
pub fn points_per_segment(point_count: usize, zoom: Zoom) -> usize {
    (point_count as f64 / zoom.factor()).ceil() as usize
}

/// Resolves the point window of `segment_index`.
///
/// Returns `None` for an empty series, and for segments past the first whose
/// start falls beyond the last point. Indices are clamped to the last point
/// otherwise.
#[must_use]
pub fn segment_window(
    point_count: usize,
    segment_index: usize,
    zoom: Zoom,
    indexing: SegmentIndexing,
) -> Option<SegmentWindow> {
    if point_count == 0 {
        return None;
    }
    let last = point_count - 1;
    let pps = points_per_segment(point_count, zoom);

    let (raw_start, span) = match indexing {
        SegmentIndexing::LegacyOffset => (segment_index.saturating_mul(pps).saturating_add(1), pps),
        SegmentIndexing::Contiguous => (segment_index.saturating_mul(pps), pps.saturating_sub(1)),
    };
    if segment_index > 0 && raw_start > last {
        return None;
    }

    let start = raw_start.min(last);
    let end = start.saturating_add(span).min(last);
    Some(SegmentWindow { start, end })
}
