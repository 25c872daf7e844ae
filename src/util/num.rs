/// Returns `true` if the value has no fractional part after `i64`
/// truncation.
///
/// Array writes require integral indices; reads truncate instead.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn is_integral(value: f64) -> bool {
    (value as i64) as f64 == value
}

/// Normalises an index into `0..length`.
///
/// Negative indices count back from the end; out-of-range positive indices
/// reduce modulo the length. `length` must be non-zero.
///
/// # Example
/// ```
/// use molde::util::num::wrap_index;
///
/// assert_eq!(wrap_index(-1, 3), 2);
/// assert_eq!(wrap_index(5, 3), 2);
/// assert_eq!(wrap_index(1, 3), 1);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub const fn wrap_index(index: i64, length: usize) -> usize {
    let length = length as i64;
    (((index % length) + length) % length) as usize
}

/// `left << right` over 64-bit integer reinterpretations. Shifts of 64 or
/// more, or by a negative count, produce 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn shift_left(left: f64, right: f64) -> f64 {
    let shift = right as i64;

    if !(0..64).contains(&shift) {
        return 0.0;
    }

    ((left as i64) << shift) as f64
}

/// `left >> right` over 64-bit integer reinterpretations; the shift is
/// arithmetic. Shifts of 64 or more, or by a negative count, saturate to
/// the sign.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn shift_right(left: f64, right: f64) -> f64 {
    let value = left as i64;
    let shift = right as i64;

    if !(0..64).contains(&shift) {
        return if value < 0 { -1.0 } else { 0.0 };
    }

    (value >> shift) as f64
}

/// `~value` over the unsigned 64-bit reinterpretation.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn bit_not(value: f64) -> f64 {
    !(value as u64) as f64
}
