use serde::{Deserialize, Serialize};

/// Number of reusable panes; segment `i` always lands in slot `i % POOL_SIZE`.
pub const POOL_SIZE: usize = 3;

#[must_use]
pub const fn slot_for_segment(segment: usize) -> usize {
    segment % POOL_SIZE
}

/// Host handles making up one data pane.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneNodes<N> {
    pub pane: N,
    pub graph: N,
    pub x_axis: N,
    pub x_tick_labels: Vec<N>,
}

/// One recyclable rendering slot.
#[derive(Debug)]
pub struct Pane<N, S> {
    slot: usize,
    bound_segment: Option<usize>,
    active: bool,
    left_px: f64,
    nodes: PaneNodes<N>,
    surface: S,
    x_axis_surface: S,
    x_tick_texts: Vec<Option<String>>,
}

impl<N, S> Pane<N, S> {
    pub(crate) fn new(slot: usize, nodes: PaneNodes<N>, surface: S, x_axis_surface: S) -> Self {
        let x_tick_texts = vec![None; nodes.x_tick_labels.len()];
        Self {
            slot,
            bound_segment: None,
            active: false,
            left_px: 0.0,
            nodes,
            surface,
            x_axis_surface,
            x_tick_texts,
        }
    }

    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[must_use]
    pub fn bound_segment(&self) -> Option<usize> {
        self.bound_segment
    }

    /// False until the pane draws its first segment.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn left_px(&self) -> f64 {
        self.left_px
    }

    #[must_use]
    pub fn nodes(&self) -> &PaneNodes<N> {
        &self.nodes
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn x_axis_surface(&self) -> &S {
        &self.x_axis_surface
    }

    /// Text currently shown by each x tick placeholder.
    #[must_use]
    pub fn x_tick_texts(&self) -> &[Option<String>] {
        &self.x_tick_texts
    }

    pub(crate) fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub(crate) fn x_axis_surface_mut(&mut self) -> &mut S {
        &mut self.x_axis_surface
    }

    /// Swaps in a new graph surface and hands back the old one.
    pub(crate) fn replace_surface(&mut self, surface: S) -> S {
        std::mem::replace(&mut self.surface, surface)
    }

    pub(crate) fn replace_surfaces(&mut self, surface: S, x_axis_surface: S) {
        self.surface = surface;
        self.x_axis_surface = x_axis_surface;
    }

    pub(crate) fn activate(&mut self) -> bool {
        let newly_active = !self.active;
        self.active = true;
        newly_active
    }

    pub(crate) fn bind(&mut self, segment: usize, left_px: f64) {
        debug_assert_eq!(slot_for_segment(segment), self.slot);
        self.bound_segment = Some(segment);
        self.left_px = left_px;
    }

    pub(crate) fn set_tick_text(&mut self, index: usize, text: String) {
        if let Some(entry) = self.x_tick_texts.get_mut(index) {
            *entry = Some(text);
        }
    }

    pub(crate) fn release(&mut self) {
        self.bound_segment = None;
        self.active = false;
        self.left_px = 0.0;
        self.x_tick_texts.iter_mut().for_each(|text| *text = None);
    }
}

/// Serializable view of a pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneSnapshot {
    pub slot: usize,
    pub bound_segment: Option<usize>,
    pub active: bool,
    pub left_px: f64,
    pub x_tick_texts: Vec<Option<String>>,
}

impl<N, S> From<&Pane<N, S>> for PaneSnapshot {
    fn from(pane: &Pane<N, S>) -> Self {
        Self {
            slot: pane.slot,
            bound_segment: pane.bound_segment,
            active: pane.active,
            left_px: pane.left_px,
            x_tick_texts: pane.x_tick_texts.clone(),
        }
    }
}
