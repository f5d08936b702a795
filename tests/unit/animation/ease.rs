use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::OutBack,
];

#[test]
fn all_curves_hit_boundary_values() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-9, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
    }
}

#[test]
fn input_is_clamped_outside_unit_interval() {
    for e in ALL {
        assert_eq!(e.apply(-1.0), e.apply(0.0));
        assert_eq!(e.apply(2.0), e.apply(1.0));
    }
}

#[test]
fn monotonic_curves_never_decrease() {
    // OutBack intentionally overshoots; every other curve is monotonic and
    // therefore safe for opacity.
    for e in &ALL[..7] {
        let mut prev = e.apply(0.0);
        for i in 1..=100 {
            let v = e.apply(f64::from(i) / 100.0);
            assert!(v >= prev - 1e-12, "{e:?} decreased at {i}");
            prev = v;
        }
    }
}

#[test]
fn out_back_overshoots_then_settles() {
    let peak = (0..=100)
        .map(|i| Ease::OutBack.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert!((Ease::OutBack.apply(1.0) - 1.0).abs() < 1e-9);
}
