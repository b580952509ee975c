use tracing::trace;

use crate::core::{TickLabel, x_tick_labels, y_tick_labels};
use crate::host::ChartHost;

use super::ChartEngine;

impl<H: ChartHost> ChartEngine<H> {
    /// Y tick labels computed from the primary series, top to bottom.
    #[must_use]
    pub fn y_tick_labels(&self) -> &[TickLabel] {
        &self.y_tick_labels
    }

    /// Writes the x tick texts of the pane in `slot` for `segment`, one per
    /// tick placeholder (`x_tick_count + 1`, origin included).
    ///
    /// Placeholders without a label (the suppressed origin, or every one of
    /// them for an empty range) keep their previous text.
    pub(super) fn write_x_tick_labels(&mut self, slot: usize, segment: usize, x_range: f64) {
        let Some(pane) = self.panes.get_mut(slot) else {
            return;
        };
        let labels = x_tick_labels(
            segment,
            x_range,
            pane.nodes().x_tick_labels.len(),
            self.config.layout.x_label_precision,
            self.config.origin_tick_policy,
        );
        for label in labels.into_iter().flatten() {
            if let Some(node) = pane.nodes().x_tick_labels.get(label.index) {
                self.host.write_text(node, &label.text);
                pane.set_tick_text(label.index, label.text);
            }
        }
        trace!(slot, segment, x_range, "x tick labels refreshed");
    }

    /// Recomputes the y tick labels from the primary series bounds and writes
    /// them; placeholders are blanked when the range is degenerate.
    pub(super) fn refresh_y_tick_labels(&mut self) {
        let layout = &self.config.layout;
        let labels = self
            .store
            .series()
            .first()
            .map(|series| {
                let (y_min, y_max) = series.y_bounds();
                y_tick_labels(y_min, y_max, layout.y_tick_count, layout.y_label_precision)
            })
            .unwrap_or_default();

        if let Some(chart_layout) = &self.layout {
            for (index, node) in chart_layout.y_axis.tick_labels.iter().enumerate() {
                let text = labels.get(index).map_or("", |label| label.text.as_str());
                self.host.write_text(node, text);
            }
        }
        trace!(count = labels.len(), "y tick labels refreshed");
        self.y_tick_labels = labels;
    }
}
