//! Windowed non-adjacent form encodings of scalars.
use crate::Scalar;

/// The number of digits [`wnaf_const`] produces for `size` bits at window
/// width `w`.
pub const fn wnaf_const_len(size: usize, w: usize) -> usize {
    size.div_ceil(w) + 1
}

/// Encodes `a` in wNAF with window `w` into `wnaf`, branching on the scalar.
///
/// Every non-zero digit is odd and below `2^(w-1)` in absolute value, and any
/// two non-zero digits are at least `w` positions apart. Returns one past the
/// position of the highest non-zero digit (0 for a zero scalar). `wnaf` must
/// be long enough for the scalar, or for its negation when bit 255 is set.
pub fn wnaf_var(wnaf: &mut [i32], a: &Scalar, w: usize) -> usize {
    debug_assert!((2..=31).contains(&w));
    let len = wnaf.len();
    debug_assert!(len <= 256);
    wnaf.iter_mut().for_each(|digit| *digit = 0);

    let mut s = *a;
    let mut sign = 1;
    if s.get_bits(255, 1) == 1 {
        s = s.negate();
        sign = -1;
    }

    let mut carry = 0u32;
    let mut bit = 0;
    let mut last_set_bit: Option<usize> = None;
    while bit < len {
        if s.get_bits(bit, 1) == carry {
            bit += 1;
            continue;
        }
        let now = w.min(len - bit);
        let mut word = (s.get_bits_var(bit, now) + carry) as i32;
        carry = ((word >> (w - 1)) & 1) as u32;
        word -= (carry as i32) << w;
        wnaf[bit] = sign * word;
        last_set_bit = Some(bit);
        bit += now;
    }
    debug_assert!(carry == 0);
    debug_assert!((bit..256).all(|i| s.get_bits(i, 1) == 0));
    last_set_bit.map_or(0, |bit| bit + 1)
}

/// Encodes `scalar` as a fixed-length odd-digit wNAF in constant time.
///
/// Writes exactly [`wnaf_const_len`]`(size, w)` digits, each odd and in
/// `±(2^w - 1)`, such that `Σ wnaf[i]·2^(w·i) = scalar + skew`. The returned
/// skew is 1 or 2. `scalar` (or its negation when it is high) must fit in
/// `size` bits.
pub fn wnaf_const(wnaf: &mut [i32], scalar: &Scalar, w: usize, size: usize) -> u32 {
    debug_assert!(w > 0 && w < 16);
    debug_assert!(size > 0);
    debug_assert!(wnaf.len() >= wnaf_const_len(size, w));

    // Even scalars get 1 added, odd ones 2, so the encoded value is always
    // odd. Negating flips the parity, so the choice is made after deciding
    // whether to negate.
    let flip = scalar.is_high();
    let bit = (flip ^ !scalar.is_even()) as usize;
    // adding 2 to -1 would overflow; -1 is handled by claiming the flip as
    // the skew instead
    let not_neg_one = !scalar.negate().is_one();
    let mut s = *scalar;
    s.cadd_bit(bit, not_neg_one);
    let global_sign = s.cond_neg(flip) * (not_neg_one as i32 * 2 - 1);
    let skew = 1u32 << bit;

    let w32 = w as u32;
    let mut u_last = s.shr_int(w32) as i32;
    let mut u;
    let mut word = 0;
    loop {
        u = s.shr_int(w32) as i32;
        let even = ((u & 1) == 0) as i32;
        debug_assert!(u_last > 0 && (u_last & 1) == 1);
        u += even;
        u_last -= even << w;
        wnaf[word] = u_last * global_sign;
        word += 1;
        u_last = u;
        if word * w >= size {
            break;
        }
    }
    wnaf[word] = u * global_sign;

    debug_assert!(s.is_zero());
    debug_assert!(word == size.div_ceil(w));
    skew
}
