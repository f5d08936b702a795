use super::*;
use crate::config::model::{GradientKind, GradientSpec, GradientStopSpec, RenderConfig, StrokeSpec};
use crate::foundation::core::Rect;
use crate::render::surface::Paint;

#[test]
fn solid_fill_alpha_is_multiplied_by_global_opacity() {
    let cfg = RenderConfig {
        color: "#ffffff".to_owned(),
        opacity: 0.5,
        ..RenderConfig::default()
    };
    let style = TextStyleManager::new().resolve(&cfg, None).unwrap();
    let Paint::Solid(c) = style.fill else {
        panic!("expected solid fill");
    };
    assert_eq!(c.a, 128);
    assert_eq!((c.r, c.g, c.b), (255, 255, 255));
}

#[test]
fn gradient_with_bounds_resolves_to_image_paint() {
    let cfg = RenderConfig {
        gradient: Some(GradientSpec {
            kind: GradientKind::Linear,
            angle: 90.0,
            stops: vec![
                GradientStopSpec {
                    offset: 0.0,
                    color: "#ff0000".to_owned(),
                },
                GradientStopSpec {
                    offset: 1.0,
                    color: "#0000ff".to_owned(),
                },
            ],
        }),
        ..RenderConfig::default()
    };
    let mgr = TextStyleManager::new();

    let with_bounds = mgr
        .resolve(&cfg, Some(Rect::new(0.0, 0.0, 16.0, 8.0)))
        .unwrap();
    assert!(matches!(with_bounds.fill, Paint::Image(_)));

    // Without bounds there is no shader geometry; fill degrades to solid.
    let without_bounds = mgr.resolve(&cfg, None).unwrap();
    assert!(matches!(without_bounds.fill, Paint::Solid(_)));
}

#[test]
fn zero_width_stroke_is_dropped() {
    let cfg = RenderConfig {
        stroke: Some(StrokeSpec {
            width: 0.0,
            ..StrokeSpec::default()
        }),
        ..RenderConfig::default()
    };
    let style = TextStyleManager::new().resolve(&cfg, None).unwrap();
    assert!(style.stroke.is_none());
}

#[test]
fn shadow_opacity_folds_with_global_opacity() {
    let cfg = RenderConfig {
        opacity: 0.5,
        shadow: Some(crate::config::model::ShadowSpec {
            color: "#000000".to_owned(),
            opacity: 0.5,
            blur: 0.0,
            offset_x: 1.0,
            offset_y: 1.0,
        }),
        ..RenderConfig::default()
    };
    let style = TextStyleManager::new().resolve(&cfg, None).unwrap();
    let shadow = style.shadow.expect("shadow resolved");
    assert_eq!(shadow.color.a, 64);
    assert_eq!(shadow.offset, crate::foundation::core::Vec2::new(1.0, 1.0));
}
