//! Integer square root by Newton's method.
//!
//! Used by the ellipse fill to find each row's half-width without touching
//! floating point.

/// `floor(sqrt(n))` for `n >= 0`; negative input yields `0`.
///
/// Starts at `x = n` and iterates `y = (x + n / x) / 2` until the sequence
/// stops decreasing. The result `r` always satisfies `r² <= n < (r + 1)²`.
///
/// ```
/// use bp_draw::isqrt::isqrt;
///
/// assert_eq!(isqrt(0), 0);
/// assert_eq!(isqrt(1), 1);
/// assert_eq!(isqrt(15), 3);
/// assert_eq!(isqrt(16), 4);
/// assert_eq!(isqrt(-9), 0);
/// ```
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)] // n >= 0 checked; result <= n.
pub const fn isqrt(n: i64) -> i64 {
    if n < 2 {
        return if n < 0 { 0 } else { n };
    }
    // Work in u64: x + n / x can exceed i64::MAX on the first step.
    let n = n as u64;
    let mut x = n;
    loop {
        let y = (x + n / x) / 2;
        if y >= x {
            return x as i64;
        }
        x = y;
    }
}
