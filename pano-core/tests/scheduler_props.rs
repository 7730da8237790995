use pano_core::config::{BusConfig, PanelConfig, ShowcaseConfig};
use pano_core::mode::ShowcaseMode;
use pano_core::registers::RegisterSnapshot;
use pano_core::render::{PanelGeometry, TextMetrics};
use pano_core::rotation::playlist;
use pano_core::scroll::ScrollState;
use pano_core::{BusController, Millis, RenderCommand, ShowcaseController};
use proptest::prelude::*;

fn snapshot(mode: u16, scroll_interval: u16) -> RegisterSnapshot {
    RegisterSnapshot {
        mode,
        scroll_interval,
        ..RegisterSnapshot::default()
    }
}

proptest! {
    #[test]
    fn scroll_moves_by_step_and_wraps_at_text_width(
        text in "[A-Z ]{1,20}",
        step in 1i16..8,
        panels in 1u8..4,
        advances in 1usize..400,
    ) {
        let panel = PanelGeometry::from_modules(panels, 1);
        let metrics = TextMetrics::SYSTEM_5X7;
        let mut scroll = ScrollState::new(&text, &metrics, &panel).with_step(step);
        let width = metrics.width(&text);

        for _ in 0..advances {
            let before = scroll.position();
            scroll.step_left();
            if before - step < -width {
                prop_assert_eq!(scroll.position(), panel.width);
            } else {
                prop_assert_eq!(scroll.position(), before - step);
            }
            prop_assert!(scroll.position() >= -width);
            prop_assert!(scroll.position() <= panel.width);
        }
    }

    #[test]
    fn out_of_range_interval_keeps_previous(
        accepted in 50u16..=500,
        rejected in prop_oneof![0u16..50, 501u16..=u16::MAX],
    ) {
        let mut controller = BusController::new(&PanelConfig::default(), &BusConfig::default());
        controller.tick(Millis::ZERO, &snapshot(1, accepted));
        prop_assert_eq!(controller.scroll_interval_ms(), u32::from(accepted));

        controller.tick(Millis::new(10), &snapshot(1, rejected));
        prop_assert_eq!(controller.scroll_interval_ms(), u32::from(accepted));
    }

    #[test]
    fn throttle_survives_timer_wrap(start in any::<u32>(), interval in 50u32..=500) {
        let mut scroll = ScrollState::new(
            "Welcome",
            &TextMetrics::SYSTEM_5X7,
            &PanelGeometry::default(),
        )
        .with_interval(interval);
        let mut out = pano_core::RenderList::new();
        let start = Millis::new(start);

        prop_assert!(scroll.tick(start, &mut out));
        prop_assert!(!scroll.is_due(start.add_ms(interval - 1)));
        prop_assert!(scroll.is_due(start.add_ms(interval)));
    }

    #[test]
    fn unrecognized_mode_renders_fallback_only(
        mode in 4u16..=u16::MAX,
        welcome_ticks in 1u32..50,
    ) {
        let mut controller = BusController::new(&PanelConfig::default(), &BusConfig::default());
        for n in 0..welcome_ticks {
            controller.tick(Millis::new(n * 100), &snapshot(1, 100));
        }
        let scroll_before = controller.welcome().clone();

        let now = Millis::new(welcome_ticks * 100);
        let out = controller.tick(now, &snapshot(mode, 100));
        prop_assert_eq!(out.len(), 2);
        prop_assert_eq!(&out.as_slice()[0], &RenderCommand::Clear);
        prop_assert_eq!(out.last_text(), Some((2, 4, "MODE ERROR")));
        prop_assert_eq!(controller.welcome(), &scroll_before);
    }

    #[test]
    fn entering_welcome_always_starts_at_right_edge(
        ticks in 1u32..200,
        from_mode in prop_oneof![Just(0u16), Just(2), Just(3), 4u16..100],
    ) {
        let mut controller = BusController::new(&PanelConfig::default(), &BusConfig::default());
        for n in 0..ticks {
            controller.tick(Millis::new(n * 100), &snapshot(1, 100));
        }
        controller.tick(Millis::new(ticks * 100), &snapshot(from_mode, 100));

        // Past the fallback hold, in case `from_mode` was unrecognized
        let back = ticks * 100 + BusConfig::default().fallback_hold_ms;
        let out = controller.tick(Millis::new(back), &snapshot(1, 100));
        prop_assert_eq!(out.last_text(), Some((32, 4, "Welcome")));
    }

    #[test]
    fn fallback_stays_in_view_for_the_hold(
        bad_mode in 4u16..=u16::MAX,
        next_mode in 0u16..=3,
        after in 1u32..1000,
    ) {
        let mut controller = BusController::new(&PanelConfig::default(), &BusConfig::default());
        controller.tick(Millis::ZERO, &snapshot(bad_mode, 100));

        prop_assert!(controller.tick(Millis::new(after), &snapshot(next_mode, 100)).is_empty());
        prop_assert!(!controller.tick(Millis::new(1000), &snapshot(next_mode, 100)).is_empty());
    }

    #[test]
    fn showcase_outer_mode_advances_every_fifteen_seconds(
        entries in proptest::collection::vec("[A-Z]{1,8}", 1..=8),
    ) {
        let names: Vec<&str> = entries.iter().map(String::as_str).collect();
        let showcase = ShowcaseConfig {
            playlist: playlist(&names),
            ..ShowcaseConfig::default()
        };
        let mut controller =
            ShowcaseController::new(&PanelConfig::default(), &showcase, Millis::ZERO);

        let mut advances = Vec::new();
        let mut shown = Vec::new();
        let mut mode = controller.mode();
        for ms in (10..=90_000u32).step_by(10) {
            let out = controller.tick(Millis::new(ms));
            if mode == ShowcaseMode::StaticRotation {
                if let Some((_, _, text)) = out.last_text() {
                    shown.push(text.to_owned());
                }
            }
            if controller.mode() != mode {
                advances.push(ms);
                mode = controller.mode();
            }
        }

        prop_assert_eq!(advances, vec![15_000, 30_000, 45_000, 60_000, 75_000, 90_000]);
        // Static visits at 3..=15 s and 48..=60 s: ten entries, round-robin
        prop_assert_eq!(shown.len(), 10);
        for (i, text) in shown.iter().enumerate() {
            prop_assert_eq!(text, &entries[i % entries.len()]);
        }
    }
}
