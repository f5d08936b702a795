use super::*;

#[test]
fn mul_div255_matches_rounded_division() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 128), 64);
}

#[test]
fn lerp_u8_hits_endpoints() {
    assert_eq!(lerp_u8(0, 200, 0.0), 0);
    assert_eq!(lerp_u8(0, 200, 1.0), 200);
    assert_eq!(lerp_u8(0, 200, 0.5), 100);
}
