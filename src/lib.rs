//! scroll-chart: segmented virtual-scroll line chart engine.
//!
//! A series is split into pane-wide segments that are binned into pixel
//! columns and drawn into a pool of three recycled panes as the host
//! scrolls. Hosts plug in through [`host::ChartHost`] and
//! [`render::Surface`]; `HeadlessHost` and `RecordingSurface` run the
//! whole engine in memory.

pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
