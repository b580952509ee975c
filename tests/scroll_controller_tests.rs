use std::time::Duration;

use scroll_chart::api::{ChartEngine, ChartEngineConfig, ChartSettings, ChartTask, ScrollOutcome};
use scroll_chart::core::{PhaseMode, ScrollMetrics, SyntheticWave, Viewport, Zoom};
use scroll_chart::host::{ChartHost, ContainerMode, HeadlessHost};

const PANEL: Viewport = Viewport::new(500, 300);

fn engine() -> ChartEngine<HeadlessHost> {
    let host = HeadlessHost::new(PANEL).with_container("chart");
    let mut engine = ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init");
    let settings = ChartSettings::default().with_zoom(Zoom::new(4.0).expect("zoom"));
    let mut source = SyntheticWave::default()
        .with_x_range(0.0, 10.0)
        .with_phase(PhaseMode::Fixed(0.0));
    engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings, &mut source)
        .expect("chart init");
    engine.run_until_idle();
    engine
}

fn at(scroll_x: f64) -> ScrollMetrics {
    ScrollMetrics::new(scroll_x, 2_000.0, 500.0)
}

#[test]
fn crossing_a_pane_boundary_requests_the_next_segment() {
    let mut engine = engine();
    assert_eq!(
        engine.on_scroll(at(120.0)).expect("scroll"),
        ScrollOutcome::Unchanged(0)
    );
    assert_eq!(
        engine.on_scroll(at(600.0)).expect("scroll"),
        ScrollOutcome::Requested(1)
    );
    assert_eq!(engine.current_segment(), Some(1));
    assert!(engine.is_scroll_locked());

    let pending: Vec<_> = engine.pending_tasks().into_iter().map(|t| t.task).collect();
    assert_eq!(
        pending,
        vec![ChartTask::DrawSegment(2), ChartTask::ReleaseScrollLock]
    );
}

#[test]
fn lock_throttles_until_the_release_task_runs() {
    let mut engine = engine();
    engine.on_scroll(at(600.0)).expect("scroll");
    assert_eq!(
        engine.on_scroll(at(1_100.0)).expect("scroll"),
        ScrollOutcome::Throttled(2)
    );
    assert_eq!(engine.current_segment(), Some(1));

    engine.advance_time(Duration::from_millis(99));
    assert!(engine.is_scroll_locked());
    engine.advance_time(Duration::from_millis(1));
    assert!(!engine.is_scroll_locked());

    assert_eq!(
        engine.on_scroll(at(1_100.0)).expect("scroll"),
        ScrollOutcome::Requested(2)
    );
}

#[test]
fn guard_band_at_the_end_ignores_events() {
    let mut engine = engine();
    assert_eq!(
        engine.on_scroll(at(1_495.0)).expect("scroll"),
        ScrollOutcome::Ignored
    );
    assert_eq!(engine.current_segment(), Some(0));
    assert_eq!(engine.scroll_position().scroll_x, 1_495.0);

    assert_eq!(
        engine.on_scroll(at(1_489.0)).expect("scroll"),
        ScrollOutcome::Requested(2)
    );
}

#[test]
fn large_scroll_jump_redraws_the_whole_neighborhood() {
    let mut engine = engine();
    engine.on_scroll(at(1_250.0)).expect("scroll");

    assert_eq!(engine.materialized_segments(), vec![0, 1, 2]);
    let pending: Vec<_> = engine.pending_tasks().into_iter().map(|t| t.task).collect();
    assert_eq!(
        pending,
        vec![
            ChartTask::DrawSegment(3),
            ChartTask::DrawSegment(1),
            ChartTask::ReleaseScrollLock,
        ]
    );
    engine.run_until_idle();
    assert_eq!(engine.materialized_segments(), vec![3, 1, 2]);
}

#[test]
fn host_scroll_metrics_drive_the_controller() {
    let mut engine = engine();
    let wrapper = engine
        .host()
        .find_node("chart_pane_wrapper")
        .expect("pane wrapper");
    engine.host_mut().set_scroll_x(&wrapper, 700.0);
    let metrics = engine.host().scroll_metrics(&wrapper);
    assert_eq!(metrics.max_scroll_x(), 1_500.0);

    assert_eq!(
        engine.on_scroll(metrics).expect("scroll"),
        ScrollOutcome::Requested(1)
    );
}

#[test]
fn scroll_before_init_is_ignored() {
    let host = HeadlessHost::new(PANEL);
    let mut engine = ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init");
    assert_eq!(
        engine.on_scroll(at(600.0)).expect("scroll"),
        ScrollOutcome::Ignored
    );
}

#[test]
fn no_scroll_range_without_zoom() {
    let host = HeadlessHost::new(PANEL).with_container("chart");
    let mut engine = ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init");
    let mut source = SyntheticWave::default().with_phase(PhaseMode::Fixed(0.0));
    engine
        .init(
            Some("chart"),
            ContainerMode::CurrentPage,
            ChartSettings::default(),
            &mut source,
        )
        .expect("chart init");

    let wrapper = engine
        .host()
        .find_node("chart_pane_wrapper")
        .expect("pane wrapper");
    let metrics = engine.host().scroll_metrics(&wrapper);
    assert_eq!(metrics.max_scroll_x(), 0.0);
    assert_eq!(engine.on_scroll(metrics).expect("scroll"), ScrollOutcome::Ignored);
}
