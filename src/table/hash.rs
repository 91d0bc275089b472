//! # Positional Weighted Hash
//!
//! The bucketing hash: a positional accumulator, not a mixer. Byte `i`
//! contributes `byte * 10^i` with wrapping arithmetic; contributions inside
//! the weight window are summed and bytes past it are folded in by XOR with
//! the same positional weighting (the position does not reset).
//!
//! The window is the number of decimal digits of `u64::MAX` minus two,
//! floored to a multiple of 3, which is 18 on a 64-bit hash. Short ASCII
//! keys
//! therefore map to a decimal-looking accumulation (`"HE"` hashes to
//! `72 + 69 * 10`), which is exactly what downstream bucket layouts were
//! built against.
//!
//! This is a weak hash: long keys wrap and collide easily. It is preserved
//! bit-for-bit for compatibility, not quality.

/// Decimal digits in `u64::MAX`.
const fn max_decimal_digits() -> usize {
    let mut x = u64::MAX;
    let mut count = 0;
    while x > 0 {
        count += 1;
        x /= 10;
    }
    count
}

/// Bytes whose weighted contribution is summed; the rest are XOR-folded.
pub const WEIGHT_WINDOW: usize = {
    let mut window = max_decimal_digits() - 2;
    while window % 3 != 0 {
        window -= 1;
    }
    window
};

/// Hash of `key` under the positional weighted accumulator. Empty keys
/// hash to 0.
pub fn positional_hash(key: &[u8]) -> u64 {
    let mut hash = 0u64;
    let mut weight = 1u64;
    for (i, &byte) in key.iter().enumerate() {
        let contribution = (byte as u64).wrapping_mul(weight);
        if i < WEIGHT_WINDOW {
            hash = hash.wrapping_add(contribution);
        } else {
            hash ^= contribution;
        }
        weight = weight.wrapping_mul(10);
    }
    hash
}
