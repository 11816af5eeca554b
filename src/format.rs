//! Fixed-precision number formatting shared by the matrix and the renderer

/// Digits printed past the requested precision before rounding by hand.
const GUARD_DIGITS: usize = 20;

/// Format with exactly `places` decimals.
///
/// Rounds the exact binary value of `value`, with exact ties going away from
/// zero: `0.25` prints as `0.3`, while `1.045` (stored just below the tie)
/// prints as `1.04`. `format!("{:.1}", 0.25)` alone would give `0.2`.
pub fn fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let expanded = format!("{:.*}", places + GUARD_DIGITS, value.abs());
    let (whole, frac) = expanded.split_once('.').unwrap_or((expanded.as_str(), ""));

    let mut digits: Vec<u8> = whole.bytes().chain(frac.bytes().take(places)).collect();
    if frac.as_bytes().get(places).map_or(false, |d| *d >= b'5') {
        carry_one(&mut digits);
    }

    let split = digits.len() - places;
    let mut out = String::with_capacity(digits.len() + 2);
    // Avoid printing "-0.0" for values that round to zero
    if value < 0.0 && digits.iter().any(|d| *d != b'0') {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| *d as char));
    if places > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|d| *d as char));
    }
    out
}

/// Add one unit in the last place of an ASCII digit string.
fn carry_one(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Shortest natural rendering of a score: `3` for whole numbers, `2.75` otherwise.
pub fn score(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
