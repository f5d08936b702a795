use super::*;
use serde_json::json;

#[test]
fn deserializes_camel_case_fields_with_defaults() {
    let cfg: RenderConfig = serde_json::from_value(json!({
        "width": 640,
        "height": 360,
        "fontFamily": "Inter",
        "fontSize": 32.0,
        "textAlign": "left",
        "textDecoration": "line-through",
        "animation": { "preset": "movingLetters", "direction": "up" }
    }))
    .unwrap();

    assert_eq!(cfg.width, 640);
    assert_eq!(cfg.font_family, "Inter");
    assert_eq!(cfg.text_align, TextAlign::Left);
    assert_eq!(cfg.text_decoration, TextDecoration::LineThrough);
    let anim = cfg.animation.unwrap();
    assert_eq!(anim.preset, AnimationPreset::MovingLetters);
    assert_eq!(anim.speed, 1.0);
    assert_eq!(anim.direction, Some(Direction::Up));
    // Unspecified fields take defaults.
    assert_eq!(cfg.fps, 30.0);
    assert_eq!(cfg.pixel_ratio, 1.0);
}

#[test]
fn config_round_trips_through_json() {
    let cfg = RenderConfig {
        gradient: Some(GradientSpec {
            kind: GradientKind::Radial,
            angle: 45.0,
            stops: vec![GradientStopSpec {
                offset: 0.0,
                color: "#ff00ff".to_owned(),
            }],
        }),
        shadow: Some(ShadowSpec::default()),
        ..RenderConfig::default()
    };
    let text = serde_json::to_string(&cfg).unwrap();
    let back: RenderConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn validate_rejects_degenerate_values() {
    let ok = RenderConfig::default();
    assert!(ok.validate().is_ok());

    assert!(RenderConfig {
        width: 0,
        ..RenderConfig::default()
    }
    .validate()
    .is_err());
    assert!(RenderConfig {
        fps: 0.0,
        ..RenderConfig::default()
    }
    .validate()
    .is_err());
    assert!(RenderConfig {
        duration: f64::NAN,
        ..RenderConfig::default()
    }
    .validate()
    .is_err());
    assert!(RenderConfig {
        animation: Some(AnimationSpec {
            preset: AnimationPreset::FadeIn,
            speed: 0.0,
            style: None,
            direction: None,
        }),
        ..RenderConfig::default()
    }
    .validate()
    .is_err());
}

#[test]
fn frame_count_is_ceil_of_duration_times_fps() {
    let mut cfg = RenderConfig {
        duration: 2.0,
        fps: 30.0,
        ..RenderConfig::default()
    };
    assert_eq!(cfg.frame_count(), 60);

    cfg.duration = 1.01;
    assert_eq!(cfg.frame_count(), 31);

    cfg.duration = 0.001;
    cfg.fps = 1.0;
    assert_eq!(cfg.frame_count(), 1);
}

#[test]
fn physical_dimensions_scale_by_pixel_ratio() {
    let cfg = RenderConfig {
        width: 100,
        height: 50,
        pixel_ratio: 2.0,
        ..RenderConfig::default()
    };
    let canvas = cfg.physical_canvas();
    assert_eq!(canvas.width, 200);
    assert_eq!(canvas.height, 100);
}

#[test]
fn text_transform_variants() {
    let mut cfg = RenderConfig::default();

    cfg.text_transform = TextTransform::Uppercase;
    assert_eq!(cfg.transform_text("hi there"), "HI THERE");

    cfg.text_transform = TextTransform::Lowercase;
    assert_eq!(cfg.transform_text("Hi There"), "hi there");

    cfg.text_transform = TextTransform::Capitalize;
    assert_eq!(cfg.transform_text("hi there"), "Hi There");

    cfg.text_transform = TextTransform::None;
    assert_eq!(cfg.transform_text("miXed"), "miXed");
}
