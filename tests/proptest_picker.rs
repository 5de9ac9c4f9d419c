//! Property-based tests for picker geometry and interaction.
//!
//! Uses proptest to verify that the container holds whole entry slots, the
//! selector stays the last row child, the selection never leaves the
//! container, paging is reversible, hit testing respects image bounds, and
//! the intro always terminates.

mod common;

use canopy::anim::{Easing, Interpolation};
use canopy::config::Metrics;
use canopy::input::KeyCode;
use canopy::view::{ViewState, container_width};
use canopy::widget::is_hit;
use canopy::{Image, Pixel, ViewConfig};
use canopy_rust as canopy;
use common::{Driver, MockPlatform, build_view, entries, scenario_config, scenario_metrics};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn metrics_strategy() -> impl Strategy<Value = Metrics> {
    (16u32..200, 0u32..24, 8u32..64, 0u32..64).prop_map(
        |(entry_dimension, entry_space, scroll_button_dimension, scroll_button_space)| Metrics {
            entry_dimension,
            entry_icon_dimension: entry_dimension,
            entry_space,
            scroll_button_dimension,
            scroll_button_space,
            ..Metrics::default()
        },
    )
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Left,
    Right,
    LeftArrow,
    RightArrow,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Left),
        Just(Action::Right),
        Just(Action::LeftArrow),
        Just(Action::RightArrow),
    ]
}

fn scenario_driver(n: usize, default: usize) -> Driver {
    let mut platform = MockPlatform::new();
    let view = build_view(scenario_config(), &mut platform, entries(n), default);
    let mut driver = Driver::new(view, platform);
    driver.idle();
    driver
}

fn assert_selection_visible(driver: &Driver) -> Result<(), TestCaseError> {
    let index = driver.view.selected_index().expect("a selection");
    let offset = driver.view.entry_offset(index).expect("entry exists");
    let width = driver.view.entry_rect(index).expect("entry exists").width;
    prop_assert!(offset >= 0, "entry {index} starts at {offset}");
    prop_assert!(
        offset + i64::from(width) <= i64::from(driver.view.container_width()),
        "entry {index} ends past the container"
    );
    Ok(())
}

// ============================================================================
// Geometry
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The container always holds a whole number of entry slots.
    #[test]
    fn container_is_whole_slots(
        metrics in metrics_strategy(),
        width in 0u32..4096,
        scale in 1u32..4,
    ) {
        let cw = container_width(width, scale, &metrics);
        prop_assert_eq!(cw % (metrics.slot() * scale), 0);
        prop_assert!(
            i64::from(cw)
                <= i64::from(width)
                    - 2 * i64::from(metrics.scroll_button_dimension * scale)
                    - 4 * i64::from(metrics.scroll_button_space * scale)
                || cw == 0
        );
    }

    /// Hit testing never reports points outside the image.
    #[test]
    fn hit_test_outside_is_false(
        width in 0u32..24,
        height in 0u32..24,
        x in -64i64..64,
        y in -64i64..64,
    ) {
        let image = Image::filled(width, height, Pixel::WHITE);
        let inside = x >= 0 && y >= 0 && x < i64::from(width) && y < i64::from(height);
        prop_assert_eq!(is_hit(&image, x, y), inside);
    }

    /// Interpolations reach their end value exactly and report completion.
    #[test]
    fn interpolation_terminates(
        start in 0u64..1000,
        duration in 0u64..500,
        from in 0u32..1000,
        to in 0u32..1000,
        late in 0u64..100,
        smooth in any::<bool>(),
    ) {
        let easing = if smooth { Easing::Smooth } else { Easing::Linear };
        let anim = Interpolation::new(easing, start, duration, from, to);
        let now = start + duration + late;
        prop_assert_eq!(anim.value_at(now), to);
        prop_assert!(anim.is_finished(now));
    }
}

// ============================================================================
// Picker behaviour
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// However many entries are added, the selector stays last.
    #[test]
    fn selector_stays_last(n in 0usize..12, default in 0usize..12) {
        let mut platform = MockPlatform::new();
        let view = build_view(scenario_config(), &mut platform, entries(n), default);
        let scene = view.scene();
        let controls = scene.controls();
        prop_assert_eq!(
            scene.tree().children(controls.picker).last(),
            Some(&controls.selector)
        );
        prop_assert_eq!(scene.entries().len(), n);
    }

    /// Keyboard and arrow navigation keep the selection inside the container.
    #[test]
    fn selection_stays_visible(
        n in 1usize..10,
        default in 0usize..10,
        actions in prop::collection::vec(action_strategy(), 0..40),
    ) {
        let mut driver = scenario_driver(n, default.min(n - 1));
        assert_selection_visible(&driver)?;
        for action in actions {
            match action {
                Action::Left => {
                    driver.key(KeyCode::LEFT_ARROW);
                }
                Action::Right => {
                    driver.key(KeyCode::RIGHT_ARROW);
                }
                Action::LeftArrow => driver.click(60, 240),
                Action::RightArrow => driver.click(580, 240),
            }
            prop_assert_eq!(driver.view.state(), ViewState::Interactive);
            assert_selection_visible(&driver)?;
        }
    }

    /// Paging one slot and back restores the scroll position.
    #[test]
    fn scroll_round_trip(n in 1usize..10, default in 0usize..10, right_first in any::<bool>()) {
        let mut driver = scenario_driver(n, default.min(n - 1));
        let slot = i64::from(scenario_metrics().slot());
        let before = driver.view.picker_offset();
        let (first, second) = if right_first { (-slot, slot) } else { (slot, -slot) };
        driver.view.scroll(first);
        driver.view.scroll(second);
        prop_assert_eq!(driver.view.picker_offset(), before);
    }

    /// The intro finishes once its duration has elapsed, at full opacity.
    #[test]
    fn intro_terminates(duration in 0u64..60, start in 0u64..20) {
        let metrics = Metrics { intro_duration: duration, ..scenario_metrics() };
        let mut config = ViewConfig::new(640, 480).with_metrics(metrics);
        config.start_time = start;
        let mut platform = MockPlatform::new();
        let view = build_view(config, &mut platform, entries(3), 0);
        let mut driver = Driver::new(view, platform);

        while driver.now <= start + duration {
            driver.idle();
        }
        prop_assert_eq!(driver.view.state(), ViewState::Interactive);
        prop_assert_eq!(driver.view.opacity(), 0xFF);
        prop_assert_eq!(driver.view.picker_offset(), 55);
    }
}
