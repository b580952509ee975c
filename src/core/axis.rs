use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Whether the very first x label (segment 0, tick 0) is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OriginTickPolicy {
    /// The origin label sits on the clipped pane edge and is left blank.
    #[default]
    Suppress,
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    X,
    Y,
}

/// Numeric tick value with its rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabel {
    pub index: usize,
    pub value: f64,
    pub text: String,
}

impl TickLabel {
    fn new(index: usize, raw_value: f64, precision: u32) -> Self {
        let value = round_to_precision(raw_value, precision);
        Self {
            index,
            value,
            text: format_tick_value(value),
        }
    }
}

pub type TickLabels = SmallVec<[Option<TickLabel>; 8]>;

/// X tick labels for one pane.
///
/// Entry `i` is `x_range * (segment_index + i / tick_count)`; `None` means
/// the placeholder keeps its previous text. Nothing is produced for a
/// non-positive range.
#[must_use]
pub fn x_tick_labels(
    segment_index: usize,
    x_range: f64,
    tick_count: usize,
    precision: u32,
    origin_policy: OriginTickPolicy,
) -> TickLabels {
    if !(x_range.is_finite() && x_range > 0.0) || tick_count == 0 {
        return TickLabels::new();
    }

    (0..tick_count)
        .map(|i| {
            if segment_index == 0 && i == 0 && origin_policy == OriginTickPolicy::Suppress {
                return None;
            }
            let fraction = i as f64 / tick_count as f64;
            let value = x_range * (segment_index as f64 + fraction);
            Some(TickLabel::new(i, value, precision))
        })
        .collect()
}

/// Y tick labels, top to bottom, excluding both axis ends.
#[must_use]
pub fn y_tick_labels(y_min: f64, y_max: f64, tick_count: usize, precision: u32) -> Vec<TickLabel> {
    let range = y_max - y_min;
    if !(range.is_finite() && range > 0.0) {
        return Vec::new();
    }
    let divisions = (tick_count + 1) as f64;
    (0..tick_count)
        .map(|i| TickLabel::new(i, y_max - range * (i + 1) as f64 / divisions, precision))
        .collect()
}

#[must_use]
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    let scale = 10_f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale;
    // Avoid rendering "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Shortest decimal text of an already-rounded value: `12`, `12.5`.
#[must_use]
pub fn format_tick_value(value: f64) -> String {
    format!("{value}")
}

/// Tick mark placement along one axis, in pixels from the axis start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLayout {
    pub axis: AxisKind,
    pub spacing_px: f64,
    pub positions_px: Vec<f64>,
}

/// X axes carry `tick_count + 1` marks starting at the origin; y axes carry
/// `tick_count` interior marks. Spacing is `ceil(length / (tick_count + 1))`.
#[must_use]
pub fn tick_layout(axis: AxisKind, length_px: f64, tick_count: usize) -> TickLayout {
    if tick_count == 0 || !(length_px.is_finite() && length_px > 0.0) {
        return TickLayout {
            axis,
            spacing_px: 0.0,
            positions_px: Vec::new(),
        };
    }
    let spacing_px = (length_px / (tick_count + 1) as f64).ceil();
    let range = match axis {
        AxisKind::X => 0..=tick_count,
        AxisKind::Y => 1..=tick_count,
    };
    TickLayout {
        axis,
        spacing_px,
        positions_px: range.map(|i| spacing_px * i as f64).collect(),
    }
}
