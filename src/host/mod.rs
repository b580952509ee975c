//! Typed tree-construction contract implemented by the embedding UI layer.
//!
//! The engine never builds attribute bags: it asks for labeled nodes with a
//! [`NodeRole`], positions them with [`NodeStyle`], writes text and requests
//! surfaces. `HeadlessHost` is the in-memory implementation used by tests.

mod headless;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{AxisKind, ScrollMetrics, Viewport};
use crate::error::ChartResult;
use crate::render::Surface;

pub use headless::{HeadlessHost, HeadlessNode, HeadlessNodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapperOrientation {
    Horizontal,
    Vertical,
}

/// What a node is for; hosts map roles to their own widgets or classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    Wrapper(WrapperOrientation),
    Toolbar,
    Control { title: String },
    ChartPanel,
    ChartContainer,
    YAxisPanel,
    /// Horizontally scrollable viewport over the scroller.
    PaneWrapper,
    /// Full-width content strip holding the data panes.
    Scroller,
    DataPane,
    GraphPane,
    AxisContainer(AxisKind),
    TickLabel(AxisKind),
    AxisTitle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub role: NodeRole,
}

impl NodeSpec {
    #[must_use]
    pub fn new(id: impl Into<String>, role: NodeRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// Pixel-based style properties the engine sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeStyle {
    Left(f64),
    Top(f64),
    Right(f64),
    Bottom(f64),
    Width(f64),
    Height(f64),
    MarginLeft(f64),
    MarginTop(f64),
    Visible(bool),
}

/// How to obtain a container when the requested one does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContainerMode {
    /// Use the page root, replacing any previous chart there.
    #[default]
    CurrentPage,
    /// Ask the host for a fresh top-level window.
    NewWindow,
}

pub trait ChartHost {
    type Node: Clone + PartialEq + fmt::Debug;
    type Surface: Surface;

    /// Document-wide lookup by node id.
    fn find_node(&self, id: &str) -> Option<Self::Node>;

    fn find_child(&self, parent: &Self::Node, id: &str) -> Option<Self::Node>;

    fn page_root(&mut self) -> Self::Node;

    fn open_window(&mut self, size: Option<Viewport>) -> ChartResult<Self::Node>;

    fn clear_children(&mut self, node: &Self::Node);

    fn remove_node(&mut self, node: &Self::Node);

    fn create_node(&mut self, parent: &Self::Node, spec: NodeSpec) -> Self::Node;

    fn set_style(&mut self, node: &Self::Node, style: NodeStyle);

    fn write_text(&mut self, node: &Self::Node, text: &str);

    /// Laid-out size of a node.
    fn measure(&self, node: &Self::Node) -> Viewport;

    fn create_surface(&mut self, parent: &Self::Node, size: Viewport)
    -> ChartResult<Self::Surface>;

    fn scroll_metrics(&self, node: &Self::Node) -> ScrollMetrics;

    fn set_scroll_x(&mut self, node: &Self::Node, scroll_x: f64);
}
