use crate::animation::ease::Ease;
use crate::config::model::{AnimationPreset, AnimationStyle, Direction, RenderConfig};
use crate::foundation::core::{Rect, Vec2};
use crate::layout::engine::UnitLayout;

/// Progress fraction by which every staggered tween window has completed.
const REVEAL_SPAN: f64 = 0.8;
/// Fraction of the effective duration the typewriter reveal spans.
const TYPEWRITER_SPAN: f64 = 0.9;
/// Cursor blink half-period in seconds.
const CURSOR_BLINK_SECS: f64 = 0.4;

/// Per-unit animated state sampled at one progress value.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationUnit {
    /// Unit text.
    pub text: String,
    /// Current baseline-left x.
    pub x: f64,
    /// Current baseline y.
    pub y: f64,
    /// Current opacity in `[0, 1]`.
    pub opacity: f64,
    /// Current uniform scale.
    pub scale: f64,
    /// Current rotation in radians.
    pub rotation: f64,
    /// Static layout target x.
    pub final_x: f64,
    /// Static layout target y.
    pub final_y: f64,
    /// Measured unit advance.
    pub width: f64,
}

/// One unit's tween: final layout, start offset, and animation window.
#[derive(Clone, Debug)]
pub(crate) struct ScheduledUnit {
    pub(crate) layout: UnitLayout,
    pub(crate) start_offset: Vec2,
    /// Start/end of the tween window in timeline seconds.
    pub(crate) window: (f64, f64),
}

/// A baked per-unit tween schedule for one animation call.
///
/// Sampling the schedule is a pure function of progress; no wall clock or
/// scheduler is involved.
#[derive(Clone, Debug)]
pub(crate) struct TweenSchedule {
    pub(crate) preset: AnimationPreset,
    pub(crate) units: Vec<ScheduledUnit>,
    pub(crate) effective_duration: f64,
}

/// Unit granularity resolved for a preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Granularity {
    Character,
    Word,
    /// Whole text block animates as one; lines share a single tween window.
    Block,
}

/// Resolve the unit granularity for `preset`, honoring style overrides where
/// the preset supports both.
pub(crate) fn granularity(preset: AnimationPreset, style: Option<AnimationStyle>) -> Granularity {
    match preset {
        AnimationPreset::Typewriter | AnimationPreset::Shift => match style {
            Some(AnimationStyle::Word) => Granularity::Word,
            _ => Granularity::Character,
        },
        AnimationPreset::MovingLetters => Granularity::Character,
        AnimationPreset::Ascend => Granularity::Word,
        AnimationPreset::FadeIn | AnimationPreset::SlideIn => Granularity::Block,
    }
}

fn resolved_direction(preset: AnimationPreset, cfg: &RenderConfig) -> Direction {
    cfg.animation
        .as_ref()
        .and_then(|a| a.direction)
        .or(cfg.direction)
        .unwrap_or(match preset {
            AnimationPreset::SlideIn => Direction::Left,
            _ => Direction::Up,
        })
}

/// Build the staggered tween schedule for all units.
pub(crate) fn build_schedule(
    preset: AnimationPreset,
    units: Vec<UnitLayout>,
    cfg: &RenderConfig,
    block: Rect,
) -> TweenSchedule {
    let speed = cfg.animation.as_ref().map(|a| a.speed).unwrap_or(1.0);
    let effective_duration = cfg.duration / speed.max(f64::MIN_POSITIVE);
    let dir = resolved_direction(preset, cfg);
    let n = units.len();
    let span = REVEAL_SPAN * effective_duration;

    let offset = |_i: usize| -> Vec2 {
        match preset {
            AnimationPreset::Typewriter | AnimationPreset::FadeIn => Vec2::ZERO,
            AnimationPreset::MovingLetters => match dir {
                Direction::Up => Vec2::new(40.0, 0.0),
                Direction::Down => Vec2::new(-40.0, 0.0),
                Direction::Left => Vec2::new(0.0, -40.0),
                Direction::Right => Vec2::new(0.0, 40.0),
            },
            AnimationPreset::Ascend => match dir {
                Direction::Down => Vec2::new(0.0, -50.0),
                _ => Vec2::new(0.0, 50.0),
            },
            AnimationPreset::Shift => match dir {
                Direction::Up => Vec2::new(0.0, 30.0),
                Direction::Down => Vec2::new(0.0, -30.0),
                Direction::Left => Vec2::new(30.0, 0.0),
                Direction::Right => Vec2::new(-30.0, 0.0),
            },
            AnimationPreset::SlideIn => match dir {
                Direction::Left => Vec2::new(-block.x1, 0.0),
                Direction::Right => Vec2::new(f64::from(cfg.width) - block.x0, 0.0),
                Direction::Up => Vec2::new(0.0, -block.y1),
                Direction::Down => Vec2::new(0.0, f64::from(cfg.height) - block.y0),
            },
        }
    };

    let window = |i: usize| -> (f64, f64) {
        match preset {
            AnimationPreset::FadeIn | AnimationPreset::SlideIn => (0.0, span),
            AnimationPreset::Typewriter => {
                let reveal = TYPEWRITER_SPAN * effective_duration;
                let start = (i as f64 / n.max(1) as f64) * reveal;
                let end = ((i + 1) as f64 / n.max(1) as f64) * reveal;
                (start, end)
            }
            _ => {
                if n <= 1 {
                    (0.0, span)
                } else {
                    let unit_dur = span * 0.35;
                    let step = (span - unit_dur) / ((n - 1) as f64);
                    let start = (i as f64) * step;
                    (start, start + unit_dur)
                }
            }
        }
    };

    let units = units
        .into_iter()
        .enumerate()
        .map(|(i, layout)| ScheduledUnit {
            layout,
            start_offset: offset(i),
            window: window(i),
        })
        .collect();

    TweenSchedule {
        preset,
        units,
        effective_duration,
    }
}

/// Sample every unit's tween at timeline time `t` (seconds) and overall
/// progress in `[0, 1]`. Pure function: the same inputs always produce the
/// same states.
pub(crate) fn sample_units(schedule: &TweenSchedule, t: f64, progress: f64) -> Vec<AnimationUnit> {
    let forced_final = progress >= final_clamp(schedule.preset);

    schedule
        .units
        .iter()
        .map(|u| {
            let (x, y) = (u.layout.x, u.layout.y);
            let mut unit = AnimationUnit {
                text: u.layout.text.clone(),
                x,
                y,
                opacity: 1.0,
                scale: 1.0,
                rotation: 0.0,
                final_x: x,
                final_y: y,
                width: u.layout.width,
            };
            if forced_final {
                return unit;
            }

            match schedule.preset {
                AnimationPreset::Typewriter => {
                    unit.opacity = if t > u.window.0 { 1.0 } else { 0.0 };
                }
                _ => {
                    let (w0, w1) = u.window;
                    let p = if w1 <= w0 {
                        1.0
                    } else {
                        ((t - w0) / (w1 - w0)).clamp(0.0, 1.0)
                    };
                    let pos = position_ease(schedule.preset).apply(p);
                    let fade = Ease::OutQuad.apply(p);

                    unit.opacity = fade;
                    unit.x = x + u.start_offset.x * (1.0 - pos);
                    unit.y = y + u.start_offset.y * (1.0 - pos);
                    if schedule.preset == AnimationPreset::FadeIn {
                        unit.scale = 0.8 + 0.2 * pos;
                    }
                }
            }
            unit
        })
        .collect()
}

/// Typewriter cursor placement at time `t`, or `None` when hidden.
///
/// The cursor blinks at a fixed cadence and disappears once the reveal window
/// has passed, so the final frames always show the bare completed text.
pub(crate) fn cursor_position(schedule: &TweenSchedule, t: f64, progress: f64) -> Option<(f64, f64)> {
    if schedule.preset != AnimationPreset::Typewriter || schedule.units.is_empty() {
        return None;
    }
    if progress >= final_clamp(AnimationPreset::Typewriter) {
        return None;
    }
    let blink_on = ((t / CURSOR_BLINK_SECS) as u64).is_multiple_of(2);
    if !blink_on {
        return None;
    }

    let last_revealed = schedule
        .units
        .iter()
        .rev()
        .find(|u| t > u.window.0);
    match last_revealed {
        Some(u) => Some((u.layout.x + u.layout.width, u.layout.y)),
        None => schedule
            .units
            .first()
            .map(|u| (u.layout.x, u.layout.y)),
    }
}

fn final_clamp(preset: AnimationPreset) -> f64 {
    match preset {
        AnimationPreset::Typewriter => TYPEWRITER_SPAN,
        _ => REVEAL_SPAN,
    }
}

fn position_ease(preset: AnimationPreset) -> Ease {
    match preset {
        AnimationPreset::MovingLetters => Ease::OutBack,
        AnimationPreset::Ascend | AnimationPreset::SlideIn => Ease::OutCubic,
        _ => Ease::OutQuad,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/presets.rs"]
mod tests;
