use serde::Serialize;

use crate::core::{ScrollMetrics, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::host::{ChartHost, NodeRole, NodeSpec, NodeStyle};
use crate::render::RecordingSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HeadlessNodeId(usize);

impl HeadlessNodeId {
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

/// One node of the in-memory tree. Styles keep the last value set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadlessNode {
    pub id: String,
    pub role: Option<NodeRole>,
    pub parent: Option<HeadlessNodeId>,
    pub children: Vec<HeadlessNodeId>,
    pub text: String,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub margin_left: Option<f64>,
    pub margin_top: Option<f64>,
    pub visible: bool,
    pub scroll_x: f64,
    pub surfaces_created: usize,
    pub removed: bool,
}

impl HeadlessNode {
    fn new(id: impl Into<String>, role: Option<NodeRole>, parent: Option<HeadlessNodeId>) -> Self {
        Self {
            id: id.into(),
            role,
            parent,
            visible: true,
            ..Self::default()
        }
    }

    fn apply(&mut self, style: NodeStyle) {
        match style {
            NodeStyle::Left(px) => self.left = Some(px),
            NodeStyle::Top(px) => self.top = Some(px),
            NodeStyle::Right(px) => self.right = Some(px),
            NodeStyle::Bottom(px) => self.bottom = Some(px),
            NodeStyle::Width(px) => self.width = Some(px),
            NodeStyle::Height(px) => self.height = Some(px),
            NodeStyle::MarginLeft(px) => self.margin_left = Some(px),
            NodeStyle::MarginTop(px) => self.margin_top = Some(px),
            NodeStyle::Visible(visible) => self.visible = visible,
        }
    }
}

/// In-memory [`ChartHost`] with a fixed "layout engine": scroll viewports and
/// graph panes measure as the configured panel size, everything else
/// measures as its explicit width/height style.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    nodes: Vec<HeadlessNode>,
    panel_size: Viewport,
    windows_opened: usize,
}

impl HeadlessHost {
    #[must_use]
    pub fn new(panel_size: Viewport) -> Self {
        Self {
            nodes: vec![HeadlessNode::new("body", None, None)],
            panel_size,
            windows_opened: 0,
        }
    }

    /// Adds an empty container under the page root.
    #[must_use]
    pub fn with_container(mut self, id: &str) -> Self {
        let root = self.root();
        self.push_node(root, HeadlessNode::new(id, None, Some(root)));
        self
    }

    /// Simulates a layout change of the chart panel.
    pub fn set_panel_size(&mut self, panel_size: Viewport) {
        self.panel_size = panel_size;
    }

    #[must_use]
    pub fn panel_size(&self) -> Viewport {
        self.panel_size
    }

    #[must_use]
    pub fn windows_opened(&self) -> usize {
        self.windows_opened
    }

    #[must_use]
    pub fn node(&self, id: HeadlessNodeId) -> &HeadlessNode {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn node_by_id(&self, id: &str) -> Option<&HeadlessNode> {
        self.find_node(id).map(|node| self.node(node))
    }

    /// Live nodes with the given role, in creation order.
    #[must_use]
    pub fn nodes_with_role(&self, role: &NodeRole) -> Vec<HeadlessNodeId> {
        self.live_ids()
            .filter(|id| self.nodes[id.0].role.as_ref() == Some(role))
            .collect()
    }

    #[must_use]
    pub fn children(&self, parent: HeadlessNodeId) -> Vec<HeadlessNodeId> {
        self.nodes[parent.0].children.clone()
    }

    /// Depth-first descendants of `parent`.
    #[must_use]
    pub fn descendants(&self, parent: HeadlessNodeId) -> Vec<HeadlessNodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<_> = self.nodes[parent.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
        out
    }

    fn root(&self) -> HeadlessNodeId {
        HeadlessNodeId(0)
    }

    fn live_ids(&self) -> impl Iterator<Item = HeadlessNodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.removed)
            .map(|(index, _)| HeadlessNodeId(index))
    }

    fn push_node(&mut self, parent: HeadlessNodeId, node: HeadlessNode) -> HeadlessNodeId {
        let id = HeadlessNodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn mark_removed(&mut self, node: HeadlessNodeId) {
        for child in self.descendants(node) {
            self.nodes[child.0].removed = true;
        }
        self.nodes[node.0].removed = true;
        self.nodes[node.0].children.clear();
    }

    fn content_width(&self, node: HeadlessNodeId) -> f64 {
        self.nodes[node.0]
            .children
            .iter()
            .filter_map(|child| self.nodes[child.0].width)
            .fold(0.0, f64::max)
    }
}

impl ChartHost for HeadlessHost {
    type Node = HeadlessNodeId;
    type Surface = RecordingSurface;

    fn find_node(&self, id: &str) -> Option<HeadlessNodeId> {
        self.live_ids().find(|node| self.nodes[node.0].id == id)
    }

    fn find_child(&self, parent: &HeadlessNodeId, id: &str) -> Option<HeadlessNodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].id == id)
    }

    fn page_root(&mut self) -> HeadlessNodeId {
        self.root()
    }

    fn open_window(&mut self, size: Option<Viewport>) -> ChartResult<HeadlessNodeId> {
        self.windows_opened += 1;
        let mut window = HeadlessNode::new(format!("window_{}", self.windows_opened), None, None);
        if let Some(size) = size {
            window.width = Some(f64::from(size.width));
            window.height = Some(f64::from(size.height));
        }
        let id = HeadlessNodeId(self.nodes.len());
        self.nodes.push(window);
        Ok(id)
    }

    fn clear_children(&mut self, node: &HeadlessNodeId) {
        for child in self.nodes[node.0].children.clone() {
            self.mark_removed(child);
        }
        self.nodes[node.0].children.clear();
    }

    fn remove_node(&mut self, node: &HeadlessNodeId) {
        if let Some(parent) = self.nodes[node.0].parent {
            self.nodes[parent.0].children.retain(|child| child != node);
        }
        self.mark_removed(*node);
    }

    fn create_node(&mut self, parent: &HeadlessNodeId, spec: NodeSpec) -> HeadlessNodeId {
        let node = HeadlessNode::new(spec.id, Some(spec.role), Some(*parent));
        self.push_node(*parent, node)
    }

    fn set_style(&mut self, node: &HeadlessNodeId, style: NodeStyle) {
        self.nodes[node.0].apply(style);
    }

    fn write_text(&mut self, node: &HeadlessNodeId, text: &str) {
        text.clone_into(&mut self.nodes[node.0].text);
    }

    fn measure(&self, node: &HeadlessNodeId) -> Viewport {
        let node = &self.nodes[node.0];
        match node.role {
            Some(NodeRole::PaneWrapper | NodeRole::GraphPane) => self.panel_size,
            Some(NodeRole::DataPane) => Viewport::new(
                node.width.map_or(self.panel_size.width, |w| w as u32),
                self.panel_size.height,
            ),
            _ => Viewport::new(
                node.width.unwrap_or(0.0) as u32,
                node.height.unwrap_or(0.0) as u32,
            ),
        }
    }

    fn create_surface(
        &mut self,
        parent: &HeadlessNodeId,
        size: Viewport,
    ) -> ChartResult<RecordingSurface> {
        if !size.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: size.width,
                height: size.height,
            });
        }
        self.nodes[parent.0].surfaces_created += 1;
        Ok(RecordingSurface::new(size))
    }

    fn scroll_metrics(&self, node: &HeadlessNodeId) -> ScrollMetrics {
        let client_width = f64::from(self.measure(node).width);
        let scroll_width = self.content_width(*node).max(client_width);
        ScrollMetrics::new(self.nodes[node.0].scroll_x, scroll_width, client_width)
    }

    fn set_scroll_x(&mut self, node: &HeadlessNodeId, scroll_x: f64) {
        let max = self.scroll_metrics(node).max_scroll_x().max(0.0);
        self.nodes[node.0].scroll_x = scroll_x.clamp(0.0, max);
    }
}
