mod common;
pub(crate) use crate::common::*;

mod trackball_drag_scroll_test {
    use embassy_time::Instant;
    use rmk_trackball::config::{DragScrollConfig, DragScrollCpi, DragScrollMode, TrackballConfig};
    use rmk_trackball::event::Keycode;
    use rmk_trackball::report::PointerReport;

    use super::*;

    fn drag_key<H: rmk_trackball::TrackballHooks>(trackball: &mut TestTrackball<H>, pressed: bool, ms: u64) {
        trackball.process_record(&key(Keycode::DragScroll, DRAG_SCROLL_KEY, pressed, ms));
    }

    fn config(mode: DragScrollMode, cpi: DragScrollCpi, invert: bool) -> TrackballConfig {
        TrackballConfig {
            drag_scroll: DragScrollConfig {
                mode,
                cpi,
                invert,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_momentary_drag_scroll() {
        let mut trackball = create_trackball(TrackballConfig::default(), RamStorage::with_dpi_index(1));
        boot(&mut trackball);

        drag_key(&mut trackball, true, 0);
        assert!(trackball.is_drag_scroll());
        assert_eq!(trackball.sensor().last_cpi(), Some(1200));

        // Nothing reaches a full scroll unit yet, the motion is kept
        let report = trackball.pointing_task(motion(150, 60), Instant::from_millis(10));
        assert_eq!(report, PointerReport::default());
        assert_eq!(trackball.drag_scroll().accumulated(), (150, -60));

        let report = trackball.pointing_task(motion(150, 60), Instant::from_millis(20));
        assert_eq!((report.x, report.y, report.h, report.v), (0, 0, 1, -1));
        assert_eq!(trackball.drag_scroll().accumulated(), (100, -20));

        drag_key(&mut trackball, false, 30);
        assert!(!trackball.is_drag_scroll());
        assert_eq!(trackball.sensor().cpi, vec![1600, 1600, 1200, 1600]);

        // Motion is passed through again
        let report = trackball.pointing_task(motion(150, 60), Instant::from_millis(40));
        assert_eq!(report, motion(150, 60));
    }

    #[test]
    fn test_latching_drag_scroll() {
        let config = config(DragScrollMode::Latching, DragScrollCpi::Scaled(0.75), false);
        let mut trackball = create_trackball(config, RamStorage::with_dpi_index(1));
        boot(&mut trackball);

        drag_key(&mut trackball, true, 0);
        drag_key(&mut trackball, false, 50);
        assert!(trackball.is_drag_scroll());

        drag_key(&mut trackball, true, 100);
        assert!(!trackball.is_drag_scroll());
        drag_key(&mut trackball, false, 150);
        assert!(!trackball.is_drag_scroll());

        // The sensor is only updated when the mode actually changes
        assert_eq!(trackball.sensor().cpi, vec![1600, 1600, 1200, 1600]);
    }

    #[test]
    fn test_fixed_drag_scroll_cpi() {
        let config = config(DragScrollMode::Momentary, DragScrollCpi::Fixed(100), false);
        let mut trackball = create_trackball(config, RamStorage::with_dpi_index(2));
        boot(&mut trackball);

        drag_key(&mut trackball, true, 0);
        assert_eq!(trackball.effective_cpi(), 100);
        assert_eq!(trackball.sensor().last_cpi(), Some(100));

        drag_key(&mut trackball, false, 10);
        assert_eq!(trackball.sensor().last_cpi(), Some(2400));
    }

    #[test]
    fn test_dpi_change_during_drag_scroll() {
        let mut trackball = create_trackball(TrackballConfig::default(), RamStorage::with_dpi_index(1));
        boot(&mut trackball);

        drag_key(&mut trackball, true, 0);
        trackball.process_record(&key(Keycode::DpiConfig, DPI_KEY, true, 10));
        assert_eq!(trackball.dpi_index(), 2);
        // 2400 * 0.75
        assert_eq!(trackball.sensor().last_cpi(), Some(1800));

        drag_key(&mut trackball, false, 20);
        assert_eq!(trackball.sensor().last_cpi(), Some(2400));
    }

    #[test]
    fn test_inverted_drag_scroll() {
        let config = config(DragScrollMode::Momentary, DragScrollCpi::Scaled(0.75), true);
        let mut trackball = create_trackball(config, RamStorage::with_dpi_index(1));
        boot(&mut trackball);
        drag_key(&mut trackball, true, 0);

        let report = trackball.pointing_task(motion(0, 100), Instant::from_millis(10));
        assert_eq!(report.v, 1);
    }

    #[test]
    fn test_drag_scroll_keeps_buttons() {
        let mut trackball = create_trackball(TrackballConfig::default(), RamStorage::with_dpi_index(1));
        boot(&mut trackball);
        drag_key(&mut trackball, true, 0);

        let report = trackball.pointing_task(
            PointerReport {
                buttons: 0b010,
                y: 250,
                ..Default::default()
            },
            Instant::from_millis(10),
        );
        assert_eq!(report.buttons, 0b010);
        assert_eq!(report.v, -2);
        assert_eq!(trackball.drag_scroll().accumulated(), (0, -50));
    }

    #[test]
    fn test_minor_axis_is_dropped() {
        let mut trackball = create_trackball(TrackballConfig::default(), RamStorage::with_dpi_index(1));
        boot(&mut trackball);
        drag_key(&mut trackball, true, 0);

        trackball.pointing_task(motion(10, -3), Instant::from_millis(10));
        assert_eq!(trackball.drag_scroll().accumulated(), (10, 0));

        trackball.pointing_task(motion(-10, -60), Instant::from_millis(20));
        assert_eq!(trackball.drag_scroll().accumulated(), (10, 0));
    }

    #[test]
    fn test_fast_flick_is_scrolled_over_several_ticks() {
        let mut trackball = create_trackball(TrackballConfig::default(), RamStorage::with_dpi_index(1));
        boot(&mut trackball);
        drag_key(&mut trackball, true, 0);

        let mut scrolled = 0i32;
        let report = trackball.pointing_task(motion(0, 20_000), Instant::from_millis(10));
        assert_eq!(report.v, i8::MIN);
        scrolled += report.v as i32;
        for ms in [20, 30] {
            scrolled += trackball.pointing_task(PointerReport::default(), Instant::from_millis(ms)).v as i32;
        }
        assert_eq!(scrolled, -200);
        assert_eq!(trackball.drag_scroll().accumulated(), (0, 0));
    }

    #[test]
    fn test_blocked_drag_scroll_key() {
        let hooks = RecordingHooks {
            block_keys: true,
            ..Default::default()
        };
        let mut trackball = create_trackball_with_hooks(TrackballConfig::default(), RamStorage::with_dpi_index(1), hooks);
        boot(&mut trackball);

        drag_key(&mut trackball, true, 0);
        assert!(!trackball.is_drag_scroll());
        assert_eq!(trackball.sensor().cpi, vec![1600, 1600]);
    }
}
