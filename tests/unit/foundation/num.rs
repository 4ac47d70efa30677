use super::*;

#[test]
fn integral_values_drop_fraction() {
    assert_eq!(fmt_num(2.0), "2");
    assert_eq!(fmt_num(-3.0), "-3");
    assert_eq!(fmt_num(0.0), "0");
    assert_eq!(fmt_num(-0.0), "0");
}

#[test]
fn fractions_are_rounded_and_trimmed() {
    assert_eq!(fmt_num(0.5), "0.5");
    assert_eq!(fmt_num(1.5), "1.5");
    assert_eq!(fmt_num(0.1 + 0.2), "0.3");
    assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
    assert_eq!(fmt_num(f64::NAN), "0");
}

#[test]
fn milliseconds_round_to_nearest() {
    assert_eq!(secs_to_ms(2.0), 2000);
    assert_eq!(secs_to_ms(1.5), 1500);
    assert_eq!(secs_to_ms(0.0004), 0);
}
