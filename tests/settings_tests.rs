use scroll_chart::ChartError;
use scroll_chart::api::{
    ChartEngine, ChartEngineConfig, ChartSettings, ChartTask, ControlsLocation, SettingKey,
    SettingValue, SettingsMap,
};
use scroll_chart::core::{PhaseMode, SyntheticWave, Viewport, Zoom};
use scroll_chart::host::{ChartHost, ContainerMode, HeadlessHost};

const PANEL: Viewport = Viewport::new(500, 300);

fn zoom(factor: f64) -> Zoom {
    Zoom::new(factor).expect("zoom")
}

fn engine() -> ChartEngine<HeadlessHost> {
    let host = HeadlessHost::new(PANEL).with_container("chart");
    let mut engine = ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init");
    let mut source = SyntheticWave::default()
        .with_x_range(0.0, 10.0)
        .with_phase(PhaseMode::Fixed(0.0));
    engine
        .init(
            Some("chart"),
            ContainerMode::CurrentPage,
            ChartSettings::default().with_zoom(zoom(4.0)),
            &mut source,
        )
        .expect("chart init");
    engine.run_until_idle();
    engine
}

fn scroller_width(engine: &ChartEngine<HeadlessHost>) -> Option<f64> {
    engine
        .host()
        .node_by_id("chart_scroller")
        .and_then(|node| node.width)
}

#[test]
fn empty_key_list_returns_every_setting() {
    let engine = engine();
    let all = engine.get_settings(&[]);
    let keys: Vec<SettingKey> = all.keys().copied().collect();
    assert_eq!(keys, SettingKey::ALL.to_vec());
    assert_eq!(all[&SettingKey::Zoom], SettingValue::Zoom(zoom(4.0)));
    assert_eq!(
        all[&SettingKey::ControlsLocation],
        SettingValue::Location(ControlsLocation::default())
    );
}

#[test]
fn requested_keys_keep_their_order() {
    let engine = engine();
    let subset = engine.get_settings(&[SettingKey::Height, SettingKey::Zoom]);
    let keys: Vec<SettingKey> = subset.keys().copied().collect();
    assert_eq!(keys, vec![SettingKey::Height, SettingKey::Zoom]);
    assert_eq!(subset[&SettingKey::Height], SettingValue::Size(None));
}

#[test]
fn zoom_change_resizes_the_scroller_and_redraws() {
    let mut engine = engine();
    assert_eq!(scroller_width(&engine), Some(2_000.0));

    let mut values = SettingsMap::new();
    values.insert(SettingKey::Zoom, SettingValue::Zoom(zoom(8.0)));
    engine.set_settings(values).expect("set zoom");

    assert_eq!(engine.settings().zoom, zoom(8.0));
    assert_eq!(scroller_width(&engine), Some(4_000.0));
    assert_eq!(engine.current_segment(), Some(0));
    assert_eq!(engine.materialized_segments(), vec![0]);
    let pending: Vec<_> = engine.pending_tasks().into_iter().map(|t| t.task).collect();
    assert_eq!(pending, vec![ChartTask::DrawSegment(1)]);
}

#[test]
fn zoom_out_clamps_the_scroll_position() {
    let mut engine = engine();
    let wrapper = engine
        .host()
        .find_node("chart_pane_wrapper")
        .expect("pane wrapper");
    engine.host_mut().set_scroll_x(&wrapper, 1_200.0);

    let mut values = SettingsMap::new();
    values.insert(SettingKey::Zoom, SettingValue::Zoom(zoom(2.0)));
    engine.set_settings(values).expect("set zoom");

    assert_eq!(engine.scroll_position().scroll_x, 500.0);
    assert_eq!(engine.current_segment(), Some(1));
    assert_eq!(engine.materialized_segments(), vec![1]);
    assert!(
        !engine
            .host()
            .node_by_id("data_pane_1")
            .expect("pane 1")
            .visible
    );
}

#[test]
fn mismatched_value_rejects_the_whole_update() {
    let mut engine = engine();
    let mut values = SettingsMap::new();
    values.insert(SettingKey::Width, SettingValue::Size(Some(800)));
    values.insert(SettingKey::Zoom, SettingValue::Size(Some(3)));

    let err = engine.set_settings(values).expect_err("must fail");
    assert!(matches!(
        err,
        ChartError::SettingTypeMismatch { ref key, .. } if key == "Zoom"
    ));
    assert_eq!(engine.settings().zoom, zoom(4.0));
    assert_eq!(engine.settings().width, None);
    assert_eq!(scroller_width(&engine), Some(2_000.0));
}

#[test]
fn non_zoom_changes_leave_the_layout_alone() {
    let mut engine = engine();
    let before = engine.materialized_segments();

    let mut values = SettingsMap::new();
    values.insert(
        SettingKey::ControlsLocation,
        SettingValue::Location(ControlsLocation::Top),
    );
    values.insert(
        SettingKey::Controls,
        SettingValue::Controls(vec!["Play".to_owned()]),
    );
    engine.set_settings(values).expect("set layout");

    assert_eq!(engine.settings().layout.controls.location, ControlsLocation::Top);
    assert_eq!(engine.settings().controls, vec!["Play".to_owned()]);
    assert_eq!(engine.materialized_segments(), before);
    assert_eq!(engine.control_count(), 0);
}

#[test]
fn settings_can_change_before_init() {
    let host = HeadlessHost::new(PANEL);
    let mut engine = ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init");
    let mut values = SettingsMap::new();
    values.insert(SettingKey::Zoom, SettingValue::Zoom(zoom(3.0)));
    engine.set_settings(values).expect("set zoom");
    assert_eq!(engine.settings().zoom, zoom(3.0));
    assert!(!engine.is_initialized());
}
