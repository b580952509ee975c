use std::time::Duration;

use proptest::prelude::*;
use scroll_chart::api::{ChartEngine, ChartEngineConfig, ChartSettings, POOL_SIZE};
use scroll_chart::core::{PhaseMode, ScrollMetrics, SyntheticWave, Viewport, Zoom};
use scroll_chart::host::{ContainerMode, HeadlessHost};

const PANEL: Viewport = Viewport::new(200, 120);

fn engine(zoom: f64) -> ChartEngine<HeadlessHost> {
    let host = HeadlessHost::new(PANEL).with_container("chart");
    let mut engine = ChartEngine::new(host, ChartEngineConfig::default()).expect("engine init");
    let mut source = SyntheticWave::default()
        .with_x_range(0.0, 10.0)
        .with_resolution(0.005)
        .with_phase(PhaseMode::Fixed(0.0));
    engine
        .init(
            Some("chart"),
            ContainerMode::CurrentPage,
            ChartSettings::default().with_zoom(Zoom::new(zoom).expect("zoom")),
            &mut source,
        )
        .expect("chart init");
    engine
}

fn assert_pool_is_consistent(engine: &ChartEngine<HeadlessHost>) -> Result<(), TestCaseError> {
    prop_assert_eq!(engine.panes().len(), POOL_SIZE);
    for pane in engine.panes() {
        if let Some(segment) = pane.bound_segment() {
            prop_assert_eq!(segment % POOL_SIZE, pane.slot());
            prop_assert_eq!(pane.left_px(), f64::from(PANEL.width) * segment as f64);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn settled_requests_keep_the_neighborhood_drawn(
        zoom in 2u32..10,
        requests in proptest::collection::vec(0usize..12, 1..16)
    ) {
        let mut engine = engine(f64::from(zoom));
        engine.run_until_idle();
        for segment in requests {
            engine.request_segment(segment).expect("request");
            engine.run_until_idle();

            assert_pool_is_consistent(&engine)?;
            let bound = engine.materialized_segments();
            prop_assert!(bound.contains(&segment));
            prop_assert!(bound.contains(&(segment + 1)));
            if segment > 0 {
                prop_assert!(bound.contains(&(segment - 1)));
            }
        }
    }

    #[test]
    fn interleaved_scrolls_never_break_slot_congruence(
        zoom in 2u32..10,
        events in proptest::collection::vec((0.0f64..1.0, 0u64..150), 1..40)
    ) {
        let mut engine = engine(f64::from(zoom));
        let scroll_width = f64::from(PANEL.width * zoom);
        let client_width = f64::from(PANEL.width);
        for (fraction, elapsed_ms) in events {
            let scroll_x = fraction * (scroll_width - client_width);
            engine
                .on_scroll(ScrollMetrics::new(scroll_x, scroll_width, client_width))
                .expect("scroll");
            engine.advance_time(Duration::from_millis(elapsed_ms));
            assert_pool_is_consistent(&engine)?;
        }

        engine.run_until_idle();
        assert_pool_is_consistent(&engine)?;
        prop_assert!(!engine.is_scroll_locked());
    }
}
