//! Numeric helpers centralizing the rounding used by multiplier math.
//!
//! Money is whole dollars in `i64`. Multipliers are expressed as integer
//! percentages so scaled values round the same way on every platform.

/// Scale `value` by `pct` percent, rounding halves toward positive infinity
/// (so `-1.5` becomes `-1`).
#[must_use]
pub fn scale_pct(value: i64, pct: i64) -> i64 {
    let scaled = i128::from(value) * i128::from(pct);
    let rounded = (scaled + 50).div_euclid(100);
    i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN })
}

/// Integer percentage of `value`, rounded toward negative infinity.
#[must_use]
pub fn floor_pct(value: i64, pct: i64) -> i64 {
    let scaled = i128::from(value) * i128::from(pct);
    let floored = scaled.div_euclid(100);
    i64::try_from(floored).unwrap_or(if floored > 0 { i64::MAX } else { i64::MIN })
}
