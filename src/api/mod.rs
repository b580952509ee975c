//! Chart instance facade: layout, pane pool, scheduling and host events.

mod axis_label_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod layout_builder;
mod pane_pool;
mod pane_scheduler;
mod playback_controller;
mod resize_controller;
mod scroll_controller;
mod segment_renderer;
mod settings;
mod settings_controller;
mod snapshot_controller;
mod task_dispatch;
mod task_queue;

pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, ContainerPolicy, LayoutConfig, TimingConfig};
pub use engine_init::{ContainerFallback, InitReport};
pub use engine_snapshot::{EngineSnapshot, SeriesSummary};
pub use pane_pool::{POOL_SIZE, Pane, PaneNodes, PaneSnapshot, slot_for_segment};
pub use pane_scheduler::{PaneScheduler, SchedulerState, SegmentPlan};
pub use playback_controller::{ClickOutcome, PLAY_ACTION, PlaybackState};
pub use resize_controller::{ResizeOutcome, is_major_resize};
pub use scroll_controller::{ScrollController, ScrollOutcome};
pub use segment_renderer::{SegmentDrawReport, SegmentRequestOutcome};
pub use settings::{
    ChartSettings, ControlsLayout, ControlsLocation, LayoutSettings, SettingKey, SettingValue,
    SettingsMap, SettingsStore,
};
pub use task_queue::{ChartTask, ScheduledTask, TaskQueue};
