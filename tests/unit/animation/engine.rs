use super::*;
use crate::config::model::{AnimationPreset, AnimationSpec, RenderConfig};
use crate::fonts::service::FontService;
use crate::render::frame::AnimationFrame;
use crate::render::surface::CpuSurface;

fn small_cfg(preset: AnimationPreset) -> RenderConfig {
    RenderConfig {
        width: 48,
        height: 32,
        font_size: 8.0,
        duration: 2.0,
        fps: 30.0,
        animation: Some(AnimationSpec {
            preset,
            speed: 1.0,
            style: None,
            direction: None,
        }),
        ..RenderConfig::default()
    }
}

fn bake(text: &str, cfg: &RenderConfig) -> Vec<AnimationFrame> {
    let engine = AnimationEngine::new();
    let mut fonts = FontService::new();
    let mut surface = CpuSurface::new(cfg.physical_width(), cfg.physical_height()).unwrap();
    engine
        .generate_frames(&mut fonts, &mut surface, text, cfg, None)
        .unwrap()
}

#[test]
fn sequence_length_and_timestamps_follow_duration_and_fps() {
    let cfg = small_cfg(AnimationPreset::FadeIn);
    let frames = bake("Hi", &cfg);

    assert_eq!(frames.len(), 60);
    assert_eq!(frames[0].timestamp, 0.0);
    assert_eq!(frames[0].frame_number, 0);
    let step = 2.0 / 59.0;
    assert!((frames[1].timestamp - step).abs() < 1e-9);
    assert_eq!(frames.last().unwrap().timestamp, 2.0);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.frame_number as usize, i);
    }
}

#[test]
fn single_frame_sequence_has_zero_timestamp() {
    let cfg = RenderConfig {
        duration: 0.01,
        fps: 30.0,
        ..small_cfg(AnimationPreset::Typewriter)
    };
    let frames = bake("Hi", &cfg);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].timestamp, 0.0);
}

#[test]
fn baking_twice_is_pixel_identical() {
    let cfg = small_cfg(AnimationPreset::MovingLetters);
    let a = bake("Hey", &cfg);
    let b = bake("Hey", &cfg);
    assert_eq!(a.len(), b.len());
    for (fa, fb) in a.iter().zip(&b) {
        assert_eq!(fa.pixels, fb.pixels);
        assert_eq!(fa.timestamp, fb.timestamp);
    }
}

#[test]
fn last_frame_of_every_preset_shows_content() {
    for preset in [
        AnimationPreset::Typewriter,
        AnimationPreset::MovingLetters,
        AnimationPreset::Ascend,
        AnimationPreset::Shift,
        AnimationPreset::FadeIn,
        AnimationPreset::SlideIn,
    ] {
        let cfg = small_cfg(preset);
        let frames = bake("Hi", &cfg);
        let last = frames.last().unwrap();
        assert!(
            last.pixels.chunks_exact(4).any(|px| px[3] != 0),
            "{preset:?} last frame is blank"
        );
    }
}

#[test]
fn missing_animation_spec_is_a_validation_error() {
    let engine = AnimationEngine::new();
    let mut fonts = FontService::new();
    let cfg = RenderConfig {
        animation: None,
        ..small_cfg(AnimationPreset::FadeIn)
    };
    let mut surface = CpuSurface::new(48, 32).unwrap();
    let err = engine
        .generate_frames(&mut fonts, &mut surface, "Hi", &cfg, None)
        .unwrap_err();
    assert!(matches!(err, crate::foundation::error::KinetypeError::Validation(_)));
}

#[test]
fn frame_dimensions_match_the_physical_canvas() {
    let cfg = RenderConfig {
        pixel_ratio: 2.0,
        ..small_cfg(AnimationPreset::FadeIn)
    };
    let frames = bake("Hi", &cfg);
    let f = &frames[0];
    assert_eq!((f.width, f.height), (96, 64));
    assert_eq!(f.pixels.len(), 96 * 64 * 4);
}
