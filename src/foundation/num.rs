//! Deterministic number formatting for filter expressions.

/// Decimal places kept when printing seconds, gains and factors.
const PRECISION: f64 = 1e6;

/// Format `v` compactly: integral values print without a fraction, others are rounded to six
/// decimal places with trailing zeros dropped.
pub(crate) fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let r = (v * PRECISION).round() / PRECISION;
    if r == 0.0 {
        return "0".to_owned();
    }
    if r.fract() == 0.0 && r.abs() < 1e15 {
        return format!("{}", r as i64);
    }
    format!("{r}")
}

/// Seconds to whole milliseconds.
pub(crate) fn secs_to_ms(secs: f64) -> u64 {
    (secs * 1000.0).round().max(0.0) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/num.rs"]
mod tests;
