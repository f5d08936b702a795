use super::*;
use crate::config::model::{
    AnimationPreset, AnimationSpec, AnimationStyle, Direction, RenderConfig,
};
use crate::foundation::core::{Rect, Vec2};
use crate::layout::engine::UnitLayout;

fn unit(x: f64, text: &str) -> UnitLayout {
    UnitLayout {
        text: text.to_owned(),
        x,
        y: 50.0,
        width: 10.0,
    }
}

fn cfg(preset: AnimationPreset, speed: f64, direction: Option<Direction>) -> RenderConfig {
    RenderConfig {
        width: 300,
        height: 100,
        duration: 2.0,
        animation: Some(AnimationSpec {
            preset,
            speed,
            style: None,
            direction,
        }),
        ..RenderConfig::default()
    }
}

fn units(n: usize) -> Vec<UnitLayout> {
    (0..n).map(|i| unit((i as f64) * 12.0, "u")).collect()
}

#[test]
fn granularity_defaults_per_preset() {
    assert_eq!(granularity(AnimationPreset::Typewriter, None), Granularity::Character);
    assert_eq!(
        granularity(AnimationPreset::Typewriter, Some(AnimationStyle::Word)),
        Granularity::Word
    );
    assert_eq!(granularity(AnimationPreset::MovingLetters, None), Granularity::Character);
    // Moving letters ignores the word override; the preset is per-character.
    assert_eq!(
        granularity(AnimationPreset::MovingLetters, Some(AnimationStyle::Word)),
        Granularity::Character
    );
    assert_eq!(granularity(AnimationPreset::Ascend, None), Granularity::Word);
    assert_eq!(
        granularity(AnimationPreset::Shift, Some(AnimationStyle::Word)),
        Granularity::Word
    );
    assert_eq!(granularity(AnimationPreset::FadeIn, None), Granularity::Block);
    assert_eq!(granularity(AnimationPreset::SlideIn, None), Granularity::Block);
}

#[test]
fn staggered_windows_complete_at_eighty_percent() {
    let config = cfg(AnimationPreset::MovingLetters, 1.0, None);
    let s = build_schedule(AnimationPreset::MovingLetters, units(4), &config, Rect::ZERO);

    assert!((s.effective_duration - 2.0).abs() < 1e-9);
    for pair in s.units.windows(2) {
        assert!(pair[0].window.0 < pair[1].window.0, "stagger must be strictly increasing");
    }
    let last_end = s.units.last().unwrap().window.1;
    assert!((last_end - 0.8 * 2.0).abs() < 1e-9);
}

#[test]
fn speed_divides_the_effective_duration() {
    let config = cfg(AnimationPreset::Ascend, 2.0, None);
    let s = build_schedule(AnimationPreset::Ascend, units(3), &config, Rect::ZERO);
    assert!((s.effective_duration - 1.0).abs() < 1e-9);
    assert!((s.units.last().unwrap().window.1 - 0.8).abs() < 1e-9);
}

#[test]
fn first_sample_is_the_start_state() {
    let config = cfg(AnimationPreset::MovingLetters, 1.0, Some(Direction::Up));
    let s = build_schedule(AnimationPreset::MovingLetters, units(3), &config, Rect::ZERO);
    let states = sample_units(&s, 0.0, 0.0);

    let first = &states[0];
    assert_eq!(first.opacity, 0.0);
    // Perpendicular offset fully applied at progress 0.
    assert!((first.x - (first.final_x + 40.0)).abs() < 1e-9);
    assert_eq!(first.y, first.final_y);
}

#[test]
fn final_stretch_forces_exact_completion() {
    let config = cfg(AnimationPreset::Shift, 1.0, Some(Direction::Left));
    let s = build_schedule(AnimationPreset::Shift, units(5), &config, Rect::ZERO);

    for state in sample_units(&s, 0.85 * 2.0, 0.85) {
        assert_eq!(state.opacity, 1.0);
        assert_eq!(state.x, state.final_x);
        assert_eq!(state.y, state.final_y);
        assert_eq!(state.scale, 1.0);
    }
}

#[test]
fn last_sample_equals_static_layout_for_all_presets() {
    for preset in [
        AnimationPreset::Typewriter,
        AnimationPreset::MovingLetters,
        AnimationPreset::Ascend,
        AnimationPreset::Shift,
        AnimationPreset::FadeIn,
        AnimationPreset::SlideIn,
    ] {
        let config = cfg(preset, 1.0, None);
        let s = build_schedule(preset, units(4), &config, Rect::new(0.0, 40.0, 48.0, 60.0));
        for state in sample_units(&s, 2.0, 1.0) {
            assert_eq!(state.opacity, 1.0, "{preset:?}");
            assert_eq!(state.x, state.final_x, "{preset:?}");
            assert_eq!(state.y, state.final_y, "{preset:?}");
            assert_eq!(state.scale, 1.0, "{preset:?}");
            assert_eq!(state.rotation, 0.0, "{preset:?}");
        }
    }
}

#[test]
fn typewriter_reveals_proportionally_and_hides_cursor_at_end() {
    let config = cfg(AnimationPreset::Typewriter, 1.0, None);
    let s = build_schedule(AnimationPreset::Typewriter, units(4), &config, Rect::ZERO);

    // Nothing revealed at t = 0, cursor blinking at the first unit.
    let start = sample_units(&s, 0.0, 0.0);
    assert!(start.iter().all(|u| u.opacity == 0.0));
    assert!(cursor_position(&s, 0.0, 0.0).is_some());

    // Halfway through the reveal window, half the units are visible.
    let mid_t = 0.5 * 0.9 * 2.0;
    let mid = sample_units(&s, mid_t, mid_t / 2.0);
    let visible = mid.iter().filter(|u| u.opacity > 0.0).count();
    assert_eq!(visible, 2);

    // Cursor sits after the last revealed unit.
    let (cx, _) = cursor_position(&s, mid_t, mid_t / 2.0).unwrap();
    assert!((cx - (s.units[1].layout.x + s.units[1].layout.width)).abs() < 1e-9);

    // Final frames: full text, no cursor, regardless of stagger rounding.
    let end = sample_units(&s, 2.0, 1.0);
    assert!(end.iter().all(|u| u.opacity == 1.0));
    assert!(cursor_position(&s, 2.0, 1.0).is_none());
}

#[test]
fn typewriter_cursor_blinks_at_fixed_cadence() {
    let config = cfg(AnimationPreset::Typewriter, 1.0, None);
    let s = build_schedule(AnimationPreset::Typewriter, units(8), &config, Rect::ZERO);
    assert!(cursor_position(&s, 0.1, 0.05).is_some());
    // Second half-period of the blink: hidden.
    assert!(cursor_position(&s, 0.5, 0.25).is_none());
    assert!(cursor_position(&s, 0.9, 0.45).is_some());
}

#[test]
fn fade_in_scales_up_from_eighty_percent() {
    let config = cfg(AnimationPreset::FadeIn, 1.0, None);
    let block = Rect::new(100.0, 40.0, 200.0, 60.0);
    let s = build_schedule(AnimationPreset::FadeIn, units(2), &config, block);

    let start = sample_units(&s, 0.0, 0.0);
    for u in &start {
        assert_eq!(u.opacity, 0.0);
        assert!((u.scale - 0.8).abs() < 1e-9);
        assert_eq!(u.x, u.final_x);
    }

    let end = sample_units(&s, 2.0, 1.0);
    assert!(end.iter().all(|u| u.scale == 1.0));
}

#[test]
fn shift_offsets_follow_direction() {
    for (dir, dx, dy) in [
        (Direction::Up, 0.0, 30.0),
        (Direction::Down, 0.0, -30.0),
        (Direction::Left, 30.0, 0.0),
        (Direction::Right, -30.0, 0.0),
    ] {
        let config = cfg(AnimationPreset::Shift, 1.0, Some(dir));
        let s = build_schedule(AnimationPreset::Shift, units(1), &config, Rect::ZERO);
        assert_eq!(s.units[0].start_offset, Vec2::new(dx, dy), "{dir:?}");
    }
}

#[test]
fn slide_in_starts_fully_off_screen() {
    let block = Rect::new(100.0, 40.0, 200.0, 60.0);

    let config = cfg(AnimationPreset::SlideIn, 1.0, Some(Direction::Left));
    let s = build_schedule(AnimationPreset::SlideIn, units(1), &config, block);
    // Entering from the left: offset moves the block's right edge to x <= 0.
    assert_eq!(s.units[0].start_offset, Vec2::new(-200.0, 0.0));

    let config = cfg(AnimationPreset::SlideIn, 1.0, Some(Direction::Right));
    let s = build_schedule(AnimationPreset::SlideIn, units(1), &config, block);
    // Entering from the right: offset moves the block's left edge past the
    // canvas width (300).
    assert_eq!(s.units[0].start_offset, Vec2::new(200.0, 0.0));
}
