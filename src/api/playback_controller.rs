use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ChartResult;
use crate::host::ChartHost;

use super::{ChartEngine, ChartTask};

/// Toolbar action that toggles automatic scrolling.
pub const PLAY_ACTION: &str = "Play";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    playing: bool,
    run: u64,
    steps: u64,
}

impl PlaybackState {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Scroll steps taken since the engine was created.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    Ignored,
    PlaybackStarted,
    PlaybackStopped,
}

impl<H: ChartHost> ChartEngine<H> {
    /// Dispatches a toolbar click by control title.
    pub fn on_click(&mut self, action: &str) -> ChartResult<ClickOutcome> {
        if action != PLAY_ACTION || self.layout.is_none() {
            debug!(action, "click ignored");
            return Ok(ClickOutcome::Ignored);
        }
        if self.playback.playing {
            self.playback.playing = false;
            debug!(steps = self.playback.steps, "playback stopped");
            return Ok(ClickOutcome::PlaybackStopped);
        }

        if let Some(wrapper) = self.layout.as_ref().map(|layout| layout.pane_wrapper.clone()) {
            let metrics = self.host.scroll_metrics(&wrapper);
            if metrics.scroll_x >= metrics.max_scroll_x() - 1.0 {
                self.host.set_scroll_x(&wrapper, 0.0);
                let rewound = self.host.scroll_metrics(&wrapper);
                self.on_scroll(rewound)?;
            }
        }
        self.playback.playing = true;
        self.playback.run += 1;
        self.tasks.schedule(
            ChartTask::PlaybackStep(self.playback.run),
            self.config.timing.playback_period,
        );
        debug!(run = self.playback.run, "playback started");
        Ok(ClickOutcome::PlaybackStarted)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback.playing
    }

    #[must_use]
    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Advances the scroll position by one increment and re-arms itself
    /// until the end of the scroll range.
    pub(super) fn playback_step(&mut self, run: u64) {
        if !self.playback.playing || run != self.playback.run {
            return;
        }
        let Some(layout) = &self.layout else {
            self.playback.playing = false;
            return;
        };
        let wrapper = layout.pane_wrapper.clone();
        let metrics = self.host.scroll_metrics(&wrapper);
        if metrics.scroll_x >= metrics.max_scroll_x() - 1.0 {
            self.playback.playing = false;
            debug!(steps = self.playback.steps, "playback reached the end");
            return;
        }

        let next_x = metrics.scroll_x + self.config.timing.playback_increment_px;
        self.host.set_scroll_x(&wrapper, next_x);
        self.playback.steps += 1;
        let advanced = self.host.scroll_metrics(&wrapper);
        if let Err(error) = self.on_scroll(advanced) {
            warn!(%error, scroll_x = advanced.scroll_x, "playback scroll failed");
        }
        self.tasks.schedule(
            ChartTask::PlaybackStep(run),
            self.config.timing.playback_period,
        );
    }
}
