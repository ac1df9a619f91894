use super::*;

#[test]
fn from_secs_rounds_to_nearest_millisecond() {
    assert_eq!(Millis::from_secs_f64(1.2), Millis(1200));
    assert_eq!(Millis::from_secs_f64(0.0004), Millis(0));
    assert_eq!(Millis::from_secs_f64(0.0006), Millis(1));
    assert_eq!(Millis::from_secs_f64(25.9999), Millis(26000));
}

#[test]
fn from_secs_clamps_invalid_inputs() {
    assert_eq!(Millis::from_secs_f64(-3.0), Millis::ZERO);
    assert_eq!(Millis::from_secs_f64(f64::NAN), Millis::ZERO);
    assert_eq!(Millis::from_secs_f64(f64::INFINITY), Millis::ZERO);
}

#[test]
fn arithmetic_saturates() {
    assert_eq!(Millis(5) - Millis(10), Millis(0));
    assert_eq!(Millis(u64::MAX) + Millis(1), Millis(u64::MAX));
    assert_eq!(Millis(200) + Millis(250), Millis(450));
}

#[test]
fn display_has_unit_suffix() {
    assert_eq!(Millis(3800).to_string(), "3800ms");
    assert_eq!(Millis(1500).as_secs_f64(), 1.5);
}
