use tracing::debug;

use crate::core::{AxisKind, Viewport, tick_layout};
use crate::error::ChartResult;
use crate::host::{ChartHost, NodeRole, NodeSpec, NodeStyle, WrapperOrientation};
use crate::render::{Color, Polyline, Surface};

use super::pane_pool::{POOL_SIZE, PaneNodes};
use super::{ChartEngine, LayoutConfig, Pane};

pub(super) const WRAPPER_ID: &str = "chart_wrapper";
pub(super) const PANE_WRAPPER_ID: &str = "chart_pane_wrapper";

/// Axis node with its drawing surface and label placeholders.
#[derive(Debug)]
pub(super) struct AxisChrome<N, S> {
    pub(super) node: N,
    pub(super) surface: S,
    pub(super) tick_labels: Vec<N>,
}

/// Host nodes created once by `init` and kept for the chart's lifetime.
#[derive(Debug)]
pub(super) struct ChartLayout<N, S> {
    pub(super) controls: Vec<N>,
    pub(super) y_axis: AxisChrome<N, S>,
    pub(super) pane_wrapper: N,
    pub(super) scroller: N,
    pub(super) x_axis_title: N,
}

impl<H: ChartHost> ChartEngine<H> {
    pub(super) fn build_layout(&mut self, container: &H::Node) -> ChartResult<()> {
        let settings = self.settings.settings().clone();
        let layout = self.config.layout;
        let location = settings.layout.controls.location;
        let orientation = if location.is_horizontal() {
            WrapperOrientation::Horizontal
        } else {
            WrapperOrientation::Vertical
        };

        let host = &mut self.host;
        let wrapper = host.create_node(
            container,
            NodeSpec::new(WRAPPER_ID, NodeRole::Wrapper(orientation)),
        );
        let toolbar_spec = NodeSpec::new("toolbar", NodeRole::Toolbar);
        let panel_spec = NodeSpec::new("chart_panel", NodeRole::ChartPanel);
        let (toolbar, chart_panel) = if location.leads_chart() {
            let toolbar = host.create_node(&wrapper, toolbar_spec);
            (toolbar, host.create_node(&wrapper, panel_spec))
        } else {
            let chart_panel = host.create_node(&wrapper, panel_spec);
            (host.create_node(&wrapper, toolbar_spec), chart_panel)
        };
        let controls = settings
            .controls
            .iter()
            .map(|title| {
                let spec = NodeSpec::new(
                    format!("control_{}", title.to_lowercase()),
                    NodeRole::Control {
                        title: title.clone(),
                    },
                );
                let node = host.create_node(&toolbar, spec);
                host.write_text(&node, title);
                node
            })
            .collect();

        let chart_container = host.create_node(
            &chart_panel,
            NodeSpec::new("chart_container", NodeRole::ChartContainer),
        );
        let y_axis_node = host.create_node(
            &chart_container,
            NodeSpec::new("y_axis_panel", NodeRole::YAxisPanel),
        );
        let pane_wrapper = host.create_node(
            &chart_container,
            NodeSpec::new(PANE_WRAPPER_ID, NodeRole::PaneWrapper),
        );
        host.set_style(
            &pane_wrapper,
            NodeStyle::MarginLeft(-(layout.y_axis_tick_size_px + layout.axis_line_width_px)),
        );
        let scroller = host.create_node(
            &pane_wrapper,
            NodeSpec::new("chart_scroller", NodeRole::Scroller),
        );

        let panel_size = host.measure(&pane_wrapper).validate()?;

        let y_tick_labels = (0..layout.y_tick_count)
            .map(|i| {
                host.create_node(
                    &y_axis_node,
                    NodeSpec::new(format!("y_tick_{i}"), NodeRole::TickLabel(AxisKind::Y)),
                )
            })
            .collect();
        let y_axis_surface = host.create_surface(&y_axis_node, y_axis_size(&layout, panel_size))?;
        let mut y_axis = AxisChrome {
            node: y_axis_node,
            surface: y_axis_surface,
            tick_labels: y_tick_labels,
        };

        let mut panes = Vec::with_capacity(POOL_SIZE);
        for slot in 0..POOL_SIZE {
            panes.push(create_pane(host, &scroller, slot, &layout, panel_size)?);
        }

        let x_axis_title = host.create_node(
            &chart_panel,
            NodeSpec::new("x_axis_label", NodeRole::AxisTitle),
        );
        host.set_style(
            &x_axis_title,
            NodeStyle::Bottom(2.0 * layout.y_axis_offset_px / 3.0),
        );

        let color = self.config.axis_color;
        style_y_axis(host, &mut y_axis, &layout, color, panel_size)?;
        for pane in &mut panes {
            style_pane(host, pane, &layout, color, panel_size)?;
            host.set_style(&pane.nodes().pane, NodeStyle::Visible(false));
        }

        debug!(
            panel_width = panel_size.width,
            panel_height = panel_size.height,
            controls = settings.controls.len(),
            ?location,
            "chart layout built"
        );

        self.layout = Some(ChartLayout {
            controls,
            y_axis,
            pane_wrapper,
            scroller,
            x_axis_title,
        });
        self.panes = panes;
        self.panel_size = panel_size;
        self.reference_width = panel_size.width;
        self.measured_size = panel_size;
        self.apply_scroller_width();
        Ok(())
    }

    /// Re-applies every size-dependent style and recreates the pane and axis
    /// surfaces at `panel_size`. Bound segments must be redrawn afterwards.
    pub(super) fn apply_panel_geometry(&mut self) -> ChartResult<()> {
        let Some(layout) = self.layout.as_mut() else {
            return Ok(());
        };
        let config = self.config.layout;
        let color = self.config.axis_color;
        let panel_size = self.panel_size;
        let host = &mut self.host;

        let y_axis_surface =
            host.create_surface(&layout.y_axis.node, y_axis_size(&config, panel_size))?;
        layout.y_axis.surface = y_axis_surface;
        style_y_axis(host, &mut layout.y_axis, &config, color, panel_size)?;

        for pane in &mut self.panes {
            let surface = host.create_surface(&pane.nodes().graph, panel_size)?;
            let x_axis_surface =
                host.create_surface(&pane.nodes().x_axis, x_axis_size(&config, panel_size))?;
            pane.replace_surfaces(surface, x_axis_surface);
            style_pane(host, pane, &config, color, panel_size)?;
            if let Some(segment) = pane.bound_segment() {
                let left_px = f64::from(panel_size.width) * segment as f64;
                host.set_style(&pane.nodes().pane, NodeStyle::Left(left_px));
                pane.bind(segment, left_px);
            }
        }
        self.apply_scroller_width();
        Ok(())
    }

    pub(super) fn apply_scroller_width(&mut self) {
        if let Some(layout) = &self.layout {
            let zoom = self.settings.settings().zoom.factor();
            let width = f64::from(self.panel_size.width) * zoom;
            self.host.set_style(&layout.scroller, NodeStyle::Width(width));
            let height = f64::from(self.panel_size.height) + self.config.layout.x_axis_offset_px;
            self.host.set_style(&layout.scroller, NodeStyle::Height(height));
        }
    }

    /// Unbinds and hides every pane and forgets the current segment.
    pub(super) fn reset_panes(&mut self) -> ChartResult<()> {
        for pane in &mut self.panes {
            pane.release();
            pane.surface_mut().clear()?;
            let nodes = pane.nodes();
            self.host.set_style(&nodes.pane, NodeStyle::Visible(false));
            for label in &nodes.x_tick_labels {
                self.host.write_text(label, "");
            }
        }
        self.scheduler.reset();
        Ok(())
    }

    pub(super) fn refresh_x_axis_title(&mut self) {
        let Some(layout) = &self.layout else {
            return;
        };
        let title = self
            .store
            .series()
            .first()
            .map_or("", |series| series.x_axis_label());
        self.host.write_text(&layout.x_axis_title, title);
    }
}

fn create_pane<H: ChartHost>(
    host: &mut H,
    scroller: &H::Node,
    slot: usize,
    layout: &LayoutConfig,
    panel_size: Viewport,
) -> ChartResult<Pane<H::Node, H::Surface>> {
    let number = slot + 1;
    let pane = host.create_node(
        scroller,
        NodeSpec::new(format!("data_pane_{number}"), NodeRole::DataPane),
    );
    let graph = host.create_node(
        &pane,
        NodeSpec::new(format!("graph_pane_{number}"), NodeRole::GraphPane),
    );
    let x_axis = host.create_node(
        &pane,
        NodeSpec::new(
            format!("x_axis_{number}"),
            NodeRole::AxisContainer(AxisKind::X),
        ),
    );
    let x_tick_labels = (0..=layout.x_tick_count)
        .map(|i| {
            host.create_node(
                &x_axis,
                NodeSpec::new(
                    format!("x_tick_{number}_{i}"),
                    NodeRole::TickLabel(AxisKind::X),
                ),
            )
        })
        .collect();

    let surface = host.create_surface(&graph, panel_size)?;
    let x_axis_surface = host.create_surface(&x_axis, x_axis_size(layout, panel_size))?;
    let nodes = PaneNodes {
        pane,
        graph,
        x_axis,
        x_tick_labels,
    };
    Ok(Pane::new(slot, nodes, surface, x_axis_surface))
}

/// Sizes a pane's nodes, draws its x axis and places its tick labels.
fn style_pane<H: ChartHost>(
    host: &mut H,
    pane: &mut Pane<H::Node, H::Surface>,
    layout: &LayoutConfig,
    color: Color,
    panel_size: Viewport,
) -> ChartResult<()> {
    let width = f64::from(panel_size.width);
    let height = f64::from(panel_size.height);
    let axis_size = x_axis_size(layout, panel_size);
    let nodes = pane.nodes().clone();

    host.set_style(&nodes.pane, NodeStyle::Top(0.0));
    host.set_style(&nodes.pane, NodeStyle::Width(width));
    host.set_style(&nodes.pane, NodeStyle::Height(height + layout.x_axis_offset_px));
    host.set_style(&nodes.graph, NodeStyle::Width(width));
    host.set_style(&nodes.graph, NodeStyle::Height(height));
    host.set_style(&nodes.x_axis, NodeStyle::Width(width));
    host.set_style(&nodes.x_axis, NodeStyle::Height(f64::from(axis_size.height)));
    host.set_style(&nodes.x_axis, NodeStyle::MarginTop(-layout.x_axis_tick_size_px));

    let ticks = tick_layout(AxisKind::X, width, layout.x_tick_count);
    let label_top = 10.0 + 2.0 * layout.x_axis_tick_size_px;
    for (label, left) in nodes.x_tick_labels.iter().zip(&ticks.positions_px) {
        host.set_style(label, NodeStyle::Left(*left));
        host.set_style(label, NodeStyle::Top(label_top));
    }
    draw_x_axis(pane.x_axis_surface_mut(), layout, color, &ticks.positions_px)
}

/// Sizes the y axis panel, draws the axis and places its tick labels.
fn style_y_axis<H: ChartHost>(
    host: &mut H,
    axis: &mut AxisChrome<H::Node, H::Surface>,
    layout: &LayoutConfig,
    color: Color,
    panel_size: Viewport,
) -> ChartResult<()> {
    let size = y_axis_size(layout, panel_size);
    host.set_style(&axis.node, NodeStyle::Width(f64::from(size.width)));
    host.set_style(&axis.node, NodeStyle::Height(f64::from(size.height)));

    let ticks = tick_layout(AxisKind::Y, f64::from(size.height), layout.y_tick_count);
    for (label, top) in axis.tick_labels.iter().zip(&ticks.positions_px) {
        host.set_style(label, NodeStyle::Top(*top));
        host.set_style(label, NodeStyle::Right(2.0 * layout.y_axis_tick_size_px));
    }
    draw_y_axis(&mut axis.surface, layout, color, &ticks.positions_px)
}

#[must_use]
pub(super) fn x_axis_size(layout: &LayoutConfig, panel_size: Viewport) -> Viewport {
    let height = (layout.x_axis_offset_px - 2.0 * layout.x_axis_tick_size_px).max(1.0);
    Viewport::new(panel_size.width, height.ceil() as u32)
}

#[must_use]
pub(super) fn y_axis_size(layout: &LayoutConfig, panel_size: Viewport) -> Viewport {
    let width =
        layout.y_axis_offset_px + layout.y_axis_tick_size_px + layout.axis_line_width_px;
    Viewport::new(width.ceil() as u32, panel_size.height)
}

/// Distance of the axis line from the surface edge facing the plot.
fn axis_line_offset(layout: &LayoutConfig, tick_size_px: f64) -> f64 {
    (tick_size_px / 2.0).ceil() + layout.axis_line_width_px + 0.5
}

fn draw_x_axis(
    surface: &mut impl Surface,
    layout: &LayoutConfig,
    color: Color,
    tick_positions: &[f64],
) -> ChartResult<()> {
    let line_width = layout.axis_line_width_px;
    let tick = layout.x_axis_tick_size_px;
    let y = axis_line_offset(layout, tick);
    let width = f64::from(surface.size().width);

    surface.clear()?;
    surface.draw_polyline(&Polyline::segment((0.0, y), (width, y), line_width, color))?;
    for &x in tick_positions {
        surface.draw_polyline(&Polyline::segment((x, y), (x, y + tick), line_width, color))?;
    }
    Ok(())
}

fn draw_y_axis(
    surface: &mut impl Surface,
    layout: &LayoutConfig,
    color: Color,
    tick_positions: &[f64],
) -> ChartResult<()> {
    let line_width = layout.axis_line_width_px;
    let tick = layout.y_axis_tick_size_px;
    let x = layout.y_axis_offset_px + axis_line_offset(layout, tick) - tick + line_width;
    let height = f64::from(surface.size().height);

    surface.clear()?;
    surface.draw_polyline(&Polyline::segment((x, 0.0), (x, height), line_width, color))?;
    for &y in tick_positions.iter().chain(std::iter::once(&height)) {
        surface.draw_polyline(&Polyline::segment((x - tick, y), (x, y), line_width, color))?;
    }
    Ok(())
}
