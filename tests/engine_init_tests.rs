use scroll_chart::ChartError;
use scroll_chart::api::{
    ChartEngine, ChartEngineConfig, ChartSettings, ContainerFallback, ContainerPolicy,
    ControlsLocation, InitReport, SegmentRequestOutcome,
};
use scroll_chart::core::{PhaseMode, Series, SyntheticWave, Viewport, Zoom};
use scroll_chart::host::{ChartHost, ContainerMode, HeadlessHost, NodeRole, WrapperOrientation};

const PANEL: Viewport = Viewport::new(500, 300);

fn wave() -> SyntheticWave {
    SyntheticWave::default()
        .with_x_range(0.0, 10.0)
        .with_phase(PhaseMode::Fixed(0.0))
}

fn settings() -> ChartSettings {
    ChartSettings::default()
        .with_zoom(Zoom::new(4.0).expect("zoom"))
        .with_controls(["Play"])
}

fn engine(host: HeadlessHost) -> ChartEngine<HeadlessHost> {
    ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init")
}

#[test]
fn init_builds_chart_inside_existing_container() {
    let mut engine = engine(HeadlessHost::new(PANEL).with_container("chart"));
    let report = engine
        .init(
            Some("chart"),
            ContainerMode::CurrentPage,
            settings(),
            &mut wave(),
        )
        .expect("chart init");

    assert_eq!(
        report,
        InitReport::Initialized {
            container_fallback: None,
            series_len: 10_000,
        }
    );
    assert!(engine.is_initialized());
    assert_eq!(engine.panel_size(), PANEL);
    assert_eq!(engine.panes().len(), 3);
    assert_eq!(engine.current_segment(), Some(0));
    assert_eq!(engine.control_count(), 1);

    let host = engine.host();
    let container = host.find_node("chart").expect("container");
    let wrapper = host.find_node("chart_wrapper").expect("wrapper");
    assert_eq!(host.node(wrapper).parent, Some(container));
    assert_eq!(
        host.node_by_id("chart_scroller").and_then(|node| node.width),
        Some(2_000.0)
    );
    assert_eq!(
        host.node_by_id("control_play").map(|node| node.text.as_str()),
        Some("Play")
    );
    assert_eq!(
        host.node_by_id("x_axis_label").map(|node| node.text.as_str()),
        Some("Time")
    );
}

#[test]
fn init_draws_first_segment_and_queues_look_ahead() {
    let mut engine = engine(HeadlessHost::new(PANEL).with_container("chart"));
    engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings(), &mut wave())
        .expect("chart init");

    assert_eq!(engine.materialized_segments(), vec![0]);
    let host = engine.host();
    assert!(host.node_by_id("data_pane_1").expect("pane 1").visible);
    assert!(!host.node_by_id("data_pane_2").expect("pane 2").visible);
    assert!(!engine.panes()[0].surface().visible_polylines().is_empty());

    let pending: Vec<_> = engine.pending_tasks().iter().map(|task| task.task).collect();
    assert_eq!(
        pending,
        vec![scroll_chart::api::ChartTask::DrawSegment(1)]
    );

    assert_eq!(engine.run_until_idle(), 1);
    assert_eq!(engine.materialized_segments(), vec![0, 1]);
    assert!(engine.host().node_by_id("data_pane_2").expect("pane 2").visible);
}

#[test]
fn missing_container_falls_back_to_page_root() {
    let mut engine = engine(HeadlessHost::new(PANEL));
    let report = engine
        .init(
            Some("missing"),
            ContainerMode::CurrentPage,
            settings(),
            &mut wave(),
        )
        .expect("chart init");

    assert!(matches!(
        report,
        InitReport::Initialized {
            container_fallback: Some(ContainerFallback::PageRoot),
            ..
        }
    ));
    assert_eq!(
        engine.container_fallback_used(),
        Some(ContainerFallback::PageRoot)
    );

    // A second chart on the same page replaces the first one.
    let host = engine.into_host();
    let mut second = ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init");
    second
        .init(None, ContainerMode::CurrentPage, settings(), &mut wave())
        .expect("second init");
    let wrappers = second
        .host()
        .nodes_with_role(&NodeRole::Wrapper(WrapperOrientation::Horizontal));
    assert_eq!(wrappers.len(), 1);
}

#[test]
fn new_window_mode_opens_a_sized_window() {
    let mut engine = engine(HeadlessHost::new(PANEL));
    let mut settings = settings();
    settings.width = Some(900);
    settings.height = Some(600);
    engine
        .init(Some("missing"), ContainerMode::NewWindow, settings, &mut wave())
        .expect("chart init");

    let host = engine.host();
    assert_eq!(host.windows_opened(), 1);
    let window = host.node_by_id("window_1").expect("window");
    assert_eq!(window.width, Some(900.0));
    assert_eq!(window.height, Some(600.0));
    assert_eq!(
        engine.container_fallback_used(),
        Some(ContainerFallback::NewWindow)
    );
}

#[test]
fn strict_policy_reports_missing_container() {
    let config = ChartEngineConfig::default().with_container_policy(ContainerPolicy::Strict);
    let mut engine = ChartEngine::new(HeadlessHost::new(PANEL), config).expect("engine init");
    let err = engine
        .init(
            Some("missing"),
            ContainerMode::CurrentPage,
            settings(),
            &mut wave(),
        )
        .expect_err("must fail");

    assert!(matches!(err, ChartError::ContainerNotFound(id) if id == "missing"));
    assert!(!engine.is_initialized());
}

#[test]
fn second_init_is_a_no_op() {
    let mut engine = engine(HeadlessHost::new(PANEL).with_container("chart"));
    engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings(), &mut wave())
        .expect("chart init");
    let report = engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings(), &mut wave())
        .expect("repeat init");
    assert_eq!(report, InitReport::AlreadyInitialized);
}

#[test]
fn existing_container_content_is_cleared() {
    let mut host = HeadlessHost::new(PANEL).with_container("chart");
    let container = host.find_node("chart").expect("container");
    host.create_node(
        &container,
        scroll_chart::host::NodeSpec::new("stale", NodeRole::Toolbar),
    );

    let mut engine = engine(host);
    engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings(), &mut wave())
        .expect("chart init");
    assert!(engine.host().find_node("stale").is_none());
}

#[test]
fn toolbar_position_follows_controls_location() {
    let mut engine = engine(HeadlessHost::new(PANEL).with_container("chart"));
    let settings = settings().with_controls_location(ControlsLocation::Top);
    engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings, &mut wave())
        .expect("chart init");

    let host = engine.host();
    let wrapper = host.find_node("chart_wrapper").expect("wrapper");
    assert_eq!(
        host.node(wrapper).role,
        Some(NodeRole::Wrapper(WrapperOrientation::Vertical))
    );
    let children: Vec<&str> = host
        .children(wrapper)
        .into_iter()
        .map(|child| host.node(child).id.as_str())
        .collect();
    assert_eq!(children, vec!["toolbar", "chart_panel"]);
}

#[test]
fn default_location_puts_toolbar_after_the_chart() {
    let mut engine = engine(HeadlessHost::new(PANEL).with_container("chart"));
    engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings(), &mut wave())
        .expect("chart init");

    let host = engine.host();
    let wrapper = host.find_node("chart_wrapper").expect("wrapper");
    let children: Vec<&str> = host
        .children(wrapper)
        .into_iter()
        .map(|child| host.node(child).id.as_str())
        .collect();
    assert_eq!(children, vec!["chart_panel", "toolbar"]);
}

#[test]
fn y_axis_labels_are_written_at_layout_time() {
    let mut engine = engine(HeadlessHost::new(PANEL).with_container("chart"));
    engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings(), &mut wave())
        .expect("chart init");

    let texts: Vec<&str> = (0..5)
        .map(|i| {
            engine
                .host()
                .node_by_id(&format!("y_tick_{i}"))
                .map_or("", |node| node.text.as_str())
        })
        .collect();
    assert_eq!(texts, vec!["67", "33", "0", "-33", "-67"]);
    assert_eq!(engine.y_tick_labels().len(), 5);

    let y_axis = engine.y_axis_surface().expect("y axis surface");
    // Axis line, five ticks and the origin tick.
    assert_eq!(y_axis.visible_polylines().len(), 7);
}

#[test]
fn empty_series_initializes_without_drawing() {
    let mut engine = engine(HeadlessHost::new(PANEL).with_container("chart"));
    let empty = Series::from_points("empty", Vec::new(), "Time").expect("series");
    engine
        .init(
            Some("chart"),
            ContainerMode::CurrentPage,
            settings(),
            &mut vec![empty],
        )
        .expect("chart init");

    assert_eq!(engine.current_segment(), None);
    assert!(engine.materialized_segments().is_empty());
    assert_eq!(
        engine.request_segment(2).expect("request"),
        SegmentRequestOutcome::EmptySeries
    );
    assert!(engine.pending_tasks().is_empty());
}

#[test]
fn operations_before_init_are_rejected() {
    let mut engine = engine(HeadlessHost::new(PANEL));
    assert!(matches!(
        engine.request_segment(0),
        Err(ChartError::NotInitialized)
    ));
    assert!(matches!(engine.draw_segment(0), Err(ChartError::NotInitialized)));
    assert!(matches!(
        engine.reload(&mut wave()),
        Err(ChartError::NotInitialized)
    ));
}

#[test]
fn reload_redraws_from_the_first_segment() {
    let mut engine = engine(HeadlessHost::new(PANEL).with_container("chart"));
    engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings(), &mut wave())
        .expect("chart init");
    engine.request_segment(3).expect("request");
    engine.run_until_idle();

    let mut shifted = wave().with_scale_factor(10.0);
    let len = engine.reload(&mut shifted).expect("reload");
    assert_eq!(len, 10_000);
    assert_eq!(engine.current_segment(), Some(0));
    assert_eq!(engine.materialized_segments(), vec![0]);
    assert_eq!(
        engine
            .host()
            .node_by_id("y_tick_0")
            .map(|node| node.text.as_str()),
        Some("7")
    );
}
