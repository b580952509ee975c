use tracing::debug;

use crate::error::ChartResult;
use crate::host::ChartHost;

use super::scroll_controller::ScrollController;
use super::{ChartEngine, ChartSettings, SettingKey, SettingsMap};

impl<H: ChartHost> ChartEngine<H> {
    #[must_use]
    pub fn settings(&self) -> &ChartSettings {
        self.settings.settings()
    }

    /// Values for `keys`, or every known key when `keys` is empty.
    #[must_use]
    pub fn get_settings(&self, keys: &[SettingKey]) -> SettingsMap {
        self.settings.get_settings(keys)
    }

    /// Applies `values` atomically.
    ///
    /// A zoom change on an initialized chart resizes the scroller, drops
    /// every pane binding and redraws around the current scroll position.
    /// Layout and control changes take effect on the next `init`.
    pub fn set_settings(&mut self, values: SettingsMap) -> ChartResult<()> {
        let previous_zoom = self.settings.settings().zoom;
        self.settings.set_settings(values)?;
        let zoom = self.settings.settings().zoom;
        if zoom == previous_zoom || self.layout.is_none() {
            return Ok(());
        }

        self.apply_scroller_width();
        self.reset_panes()?;
        let metrics = match &self.layout {
            Some(layout) => {
                let wrapper = layout.pane_wrapper.clone();
                let current = self.host.scroll_metrics(&wrapper);
                self.host.set_scroll_x(&wrapper, current.scroll_x);
                self.host.scroll_metrics(&wrapper)
            }
            None => return Ok(()),
        };
        self.scroll_position = metrics;
        let segment = ScrollController::segment_at(metrics, self.panel_size.width).unwrap_or(0);
        debug!(
            from = previous_zoom.factor(),
            to = zoom.factor(),
            segment,
            "zoom changed"
        );
        self.request_segment(segment)?;
        Ok(())
    }
}
