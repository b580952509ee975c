use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{ScrollMetrics, SeriesSource, SeriesStore, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::host::{ChartHost, ContainerMode};

use super::layout_builder::WRAPPER_ID;
use super::{
    ChartEngine, ChartEngineConfig, ChartSettings, ContainerPolicy, PaneScheduler, PlaybackState,
    ScrollController, SettingsStore, TaskQueue,
};

/// Container substituted for a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerFallback {
    PageRoot,
    NewWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitReport {
    Initialized {
        container_fallback: Option<ContainerFallback>,
        series_len: usize,
    },
    /// `init` already ran on this engine; nothing changed.
    AlreadyInitialized,
}

impl<H: ChartHost> ChartEngine<H> {
    /// Creates an engine bound to `host`. Nothing is built until `init`.
    pub fn new(host: H, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let scroll = ScrollController::new(config.scroll_guard_band_px);
        Ok(Self {
            host,
            config,
            settings: SettingsStore::default(),
            store: SeriesStore::new(),
            layout: None,
            panes: Vec::new(),
            scheduler: PaneScheduler::new(),
            scroll,
            playback: PlaybackState::default(),
            tasks: TaskQueue::new(),
            panel_size: Viewport::new(0, 0),
            reference_width: 0,
            measured_size: Viewport::new(0, 0),
            scroll_position: ScrollMetrics::default(),
            container_fallback: None,
            y_tick_labels: Vec::new(),
        })
    }

    /// Loads data, builds the chart inside the resolved container and draws
    /// segment 0.
    ///
    /// A missing `container_id` falls back according to `mode` unless the
    /// engine runs with `ContainerPolicy::Strict`.
    pub fn init(
        &mut self,
        container_id: Option<&str>,
        mode: ContainerMode,
        settings: ChartSettings,
        source: &mut impl SeriesSource,
    ) -> ChartResult<InitReport> {
        if self.layout.is_some() {
            debug!("init ignored: chart already initialized");
            return Ok(InitReport::AlreadyInitialized);
        }

        let mut store = SeriesStore::new();
        let series_len = store.load(source)?.len();
        self.settings.replace(settings);

        let (container, container_fallback) = self.resolve_container(container_id, mode)?;
        self.store = store;
        self.container_fallback = container_fallback;

        self.build_layout(&container)?;
        self.refresh_y_tick_labels();
        self.refresh_x_axis_title();
        self.request_segment(0)?;

        debug!(
            series_len,
            panel_width = self.panel_size.width,
            panel_height = self.panel_size.height,
            zoom = self.settings.settings().zoom.factor(),
            fallback = ?container_fallback,
            "chart initialized"
        );
        Ok(InitReport::Initialized {
            container_fallback,
            series_len,
        })
    }

    /// Replaces the data, refreshes the labels and redraws from segment 0.
    pub fn reload(&mut self, source: &mut impl SeriesSource) -> ChartResult<usize> {
        if self.layout.is_none() {
            return Err(ChartError::NotInitialized);
        }
        let series_len = self.store.load(source)?.len();
        self.refresh_y_tick_labels();
        self.refresh_x_axis_title();
        self.reset_panes()?;
        if let Some(layout) = &self.layout {
            self.host.set_scroll_x(&layout.pane_wrapper, 0.0);
            self.scroll_position = self.host.scroll_metrics(&layout.pane_wrapper);
        }
        self.request_segment(0)?;
        debug!(series_len, "chart reloaded");
        Ok(series_len)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.layout.is_some()
    }

    fn resolve_container(
        &mut self,
        container_id: Option<&str>,
        mode: ContainerMode,
    ) -> ChartResult<(H::Node, Option<ContainerFallback>)> {
        if let Some(id) = container_id {
            if let Some(container) = self.host.find_node(id) {
                self.host.clear_children(&container);
                return Ok((container, None));
            }
            if self.config.container_policy == ContainerPolicy::Strict {
                return Err(ChartError::ContainerNotFound(id.to_owned()));
            }
            warn!(container_id = id, ?mode, "container not found, falling back");
        }

        match mode {
            ContainerMode::CurrentPage => {
                let root = self.host.page_root();
                if let Some(previous) = self.host.find_child(&root, WRAPPER_ID) {
                    self.host.remove_node(&previous);
                }
                Ok((root, Some(ContainerFallback::PageRoot)))
            }
            ContainerMode::NewWindow => {
                let settings = self.settings.settings();
                let size = settings
                    .width
                    .zip(settings.height)
                    .map(|(width, height)| Viewport::new(width, height));
                let window = self.host.open_window(size)?;
                Ok((window, Some(ContainerFallback::NewWindow)))
            }
        }
    }
}
