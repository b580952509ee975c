use std::time::Duration;

use scroll_chart::api::{ChartEngine, ChartEngineConfig, ChartSettings, ChartTask, ClickOutcome};
use scroll_chart::core::{PhaseMode, SyntheticWave, Viewport, Zoom};
use scroll_chart::host::{ChartHost, ContainerMode, HeadlessHost};

const PANEL: Viewport = Viewport::new(500, 300);

fn engine() -> ChartEngine<HeadlessHost> {
    let host = HeadlessHost::new(PANEL).with_container("chart");
    let mut engine = ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init");
    let settings = ChartSettings::default()
        .with_zoom(Zoom::new(4.0).expect("zoom"))
        .with_controls(["Play"]);
    let mut source = SyntheticWave::default()
        .with_x_range(0.0, 10.0)
        .with_phase(PhaseMode::Fixed(0.0));
    engine
        .init(Some("chart"), ContainerMode::CurrentPage, settings, &mut source)
        .expect("chart init");
    engine.run_until_idle();
    engine
}

fn wrapper_scroll_x(engine: &ChartEngine<HeadlessHost>) -> f64 {
    let wrapper = engine
        .host()
        .find_node("chart_pane_wrapper")
        .expect("pane wrapper");
    engine.host().scroll_metrics(&wrapper).scroll_x
}

#[test]
fn play_scrolls_one_increment_per_period() {
    let mut engine = engine();
    assert_eq!(
        engine.on_click("Play").expect("click"),
        ClickOutcome::PlaybackStarted
    );
    assert!(engine.is_playing());
    let pending: Vec<_> = engine.pending_tasks().into_iter().map(|t| t.task).collect();
    assert_eq!(pending, vec![ChartTask::PlaybackStep(1)]);

    assert_eq!(engine.advance_time(Duration::from_millis(100)), 10);
    assert_eq!(engine.playback().steps(), 10);
    assert_eq!(wrapper_scroll_x(&engine), 10.0);
    assert_eq!(engine.scroll_position().scroll_x, 10.0);
}

#[test]
fn playback_runs_to_the_end_and_stops() {
    let mut engine = engine();
    engine.on_click("Play").expect("click");
    engine.run_until_idle();

    assert!(!engine.is_playing());
    assert_eq!(engine.playback().steps(), 1_499);
    assert_eq!(wrapper_scroll_x(&engine), 1_499.0);
    assert_eq!(engine.current_segment(), Some(2));
    assert!(engine.pending_tasks().is_empty());
}

#[test]
fn play_at_the_end_rewinds_first() {
    let mut engine = engine();
    engine.on_click("Play").expect("click");
    engine.run_until_idle();

    assert_eq!(
        engine.on_click("Play").expect("click"),
        ClickOutcome::PlaybackStarted
    );
    assert_eq!(wrapper_scroll_x(&engine), 0.0);
    assert_eq!(engine.current_segment(), Some(0));
    assert!(engine.materialized_segments().contains(&0));
}

#[test]
fn second_click_stops_playback() {
    let mut engine = engine();
    engine.on_click("Play").expect("start");
    assert_eq!(
        engine.on_click("Play").expect("stop"),
        ClickOutcome::PlaybackStopped
    );
    assert!(!engine.is_playing());

    // The step queued by the stopped run is dropped when it fires.
    assert_eq!(engine.run_until_idle(), 1);
    assert_eq!(engine.playback().steps(), 0);
    assert_eq!(wrapper_scroll_x(&engine), 0.0);
}

#[test]
fn restart_does_not_double_step() {
    let mut engine = engine();
    engine.on_click("Play").expect("start");
    engine.on_click("Play").expect("stop");
    engine.on_click("Play").expect("restart");

    let pending: Vec<_> = engine.pending_tasks().into_iter().map(|t| t.task).collect();
    assert_eq!(
        pending,
        vec![ChartTask::PlaybackStep(1), ChartTask::PlaybackStep(2)]
    );
    engine.advance_time(Duration::from_millis(10));
    assert_eq!(engine.playback().steps(), 1);
    assert_eq!(wrapper_scroll_x(&engine), 1.0);
}

#[test]
fn other_actions_are_ignored() {
    let mut engine = engine();
    assert_eq!(engine.on_click("Pause").expect("click"), ClickOutcome::Ignored);
    assert!(!engine.is_playing());
    assert!(engine.pending_tasks().is_empty());
}

#[test]
fn click_before_init_is_ignored() {
    let host = HeadlessHost::new(PANEL);
    let mut engine = ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init");
    assert_eq!(engine.on_click("Play").expect("click"), ClickOutcome::Ignored);
}
