use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(4, 3).unwrap();
    assert_eq!(c.byte_len(), 4 * 3 * 4);
}

#[test]
fn premul_scales_color_channels_by_alpha() {
    let c = Rgba8::new(255, 128, 0, 128);
    let p = c.to_premul();
    assert_eq!(p[0], 128);
    assert_eq!(p[1], 64);
    assert_eq!(p[2], 0);
    assert_eq!(p[3], 128);
}

#[test]
fn premul_of_opaque_is_identity() {
    let c = Rgba8::new(10, 20, 30, 255);
    assert_eq!(c.to_premul(), [10, 20, 30, 255]);
}

#[test]
fn mul_alpha_clamps_factor() {
    let c = Rgba8::new(1, 2, 3, 200);
    assert_eq!(c.mul_alpha(0.5).a, 100);
    assert_eq!(c.mul_alpha(2.0).a, 200);
    assert_eq!(c.mul_alpha(-1.0).a, 0);
}
