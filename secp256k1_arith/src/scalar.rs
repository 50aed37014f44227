//! Scalar arithmetic (integers mod the secp256k1 group order)
//!
//! ```text
//! n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
//! ```
use core::ops::{self, Add, AddAssign, MulAssign, Neg};
use digest::{self, generic_array::typenum::U32};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

const N_0: u32 = 0xD0364141;
const N_1: u32 = 0xBFD25E8C;
const N_2: u32 = 0xAF48A03B;
const N_3: u32 = 0xBAAEDCE6;
const N_4: u32 = 0xFFFFFFFE;
const N_5: u32 = 0xFFFFFFFF;
const N_6: u32 = 0xFFFFFFFF;
const N_7: u32 = 0xFFFFFFFF;

/// `2^256 - n`, which is 129 bits long.
const N_C: [u32; 5] = [!N_0 + 1, !N_1, !N_2, !N_3, 1];

/// `n / 2`
const N_H_0: u32 = 0x681B20A0;
const N_H_1: u32 = 0xDFE92F46;
const N_H_2: u32 = 0x57A4501D;
const N_H_3: u32 = 0x5D576E73;
const N_H_4: u32 = 0xFFFFFFFF;
const N_H_5: u32 = 0xFFFFFFFF;
const N_H_6: u32 = 0xFFFFFFFF;
const N_H_7: u32 = 0x7FFFFFFF;

/// A secp256k1 scalar (an integer mod the curve order).
///
/// Stored as eight 32-bit limbs, least significant first. Every constructor
/// keeps the value reduced below the order.
#[derive(Clone, Copy, Default)]
pub struct Scalar(pub(crate) [u32; 8]);

impl Scalar {
    /// The scalar `0`.
    pub const ZERO: Scalar = Scalar::new(0, 0, 0, 0, 0, 0, 0, 0);
    /// The scalar `1`.
    pub const ONE: Scalar = Scalar::new(0, 0, 0, 0, 0, 0, 0, 1);
    /// A cube root of unity mod `n`. Multiplying a point by it is the same as
    /// multiplying its x-coordinate by [`Field`]'s `BETA`.
    ///
    /// [`Field`]: crate::Field
    pub const LAMBDA: Scalar = Scalar::new(
        0x5363AD4C, 0xC05C30E0, 0xA5261C02, 0x8812645A, 0x122E22EA, 0x20816678, 0xDF02967C,
        0x1B23BD72,
    );

    /// Creates a scalar from eight big-endian 32-bit words. `d7` is the most
    /// significant. The value must already be below the order.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        d7: u32,
        d6: u32,
        d5: u32,
        d4: u32,
        d3: u32,
        d2: u32,
        d1: u32,
        d0: u32,
    ) -> Self {
        Scalar([d0, d1, d2, d3, d4, d5, d6, d7])
    }

    /// Creates a scalar from a small integer.
    pub fn from_int(v: u32) -> Self {
        Scalar([v, 0, 0, 0, 0, 0, 0, 0])
    }

    /// Decodes 32 big-endian bytes, reducing modulo the order. The returned
    /// flag tells whether the input was at least the order.
    pub fn from_bytes(bytes: &[u8; 32]) -> (Self, bool) {
        let mut d = [0u32; 8];
        for (i, chunk) in bytes.chunks_exact(4).enumerate() {
            d[7 - i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        let mut r = Scalar(d);
        let overflow = r.check_overflow();
        r.reduce(overflow);
        (r, overflow == 1)
    }

    /// Decodes 32 big-endian bytes, reducing modulo the order.
    pub fn from_bytes_mod_order(bytes: &[u8; 32]) -> Self {
        Scalar::from_bytes(bytes).0
    }

    /// Decodes 32 big-endian bytes. Returns `None` when the value is not
    /// below the order.
    pub fn from_bytes_checked(bytes: &[u8; 32]) -> Option<Self> {
        match Scalar::from_bytes(bytes) {
            (scalar, false) => Some(scalar),
            (_, true) => None,
        }
    }

    /// Decodes 32 big-endian bytes into a scalar in `[1, n)`.
    pub fn from_bytes_non_zero(bytes: &[u8; 32]) -> Option<Self> {
        Scalar::from_bytes_checked(bytes).filter(|scalar| !scalar.is_zero())
    }

    /// Encodes the scalar as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, limb) in self.0.iter().rev().enumerate() {
            bytes[i * 4..i * 4 + 4].copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }

    /// Samples a uniformly random non-zero scalar.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        loop {
            rng.fill_bytes(&mut bytes);
            if let Some(scalar) = Scalar::from_bytes_non_zero(&bytes) {
                return scalar;
            }
        }
    }

    /// Converts the output of a 32-byte hash function into a scalar by
    /// reducing it modulo the order.
    pub fn from_hash(hash: impl digest::FixedOutput<OutputSize = U32>) -> Self {
        let bytes: [u8; 32] = hash.finalize_fixed().into();
        Scalar::from_bytes(&bytes).0
    }

    /// Reads `count` bits starting at bit `offset`. The bits must not cross a
    /// limb boundary.
    pub fn get_bits(&self, offset: usize, count: usize) -> u32 {
        debug_assert!(count > 0 && count < 32);
        debug_assert!((offset + count - 1) >> 5 == offset >> 5);
        (self.0[offset >> 5] >> (offset & 0x1F)) & ((1 << count) - 1)
    }

    /// Reads `count` bits starting at bit `offset`, which may span two limbs.
    pub fn get_bits_var(&self, offset: usize, count: usize) -> u32 {
        debug_assert!(count > 0 && count < 32);
        debug_assert!(offset + count <= 256);
        if (offset + count - 1) >> 5 == offset >> 5 {
            self.get_bits(offset, count)
        } else {
            debug_assert!((offset >> 5) + 1 < 8);
            ((self.0[offset >> 5] >> (offset & 0x1F))
                | (self.0[(offset >> 5) + 1] << (32 - (offset & 0x1F))))
                & ((1 << count) - 1)
        }
    }

    /// Returns 1 if the limbs hold a value of at least the order.
    fn check_overflow(&self) -> u32 {
        let d = &self.0;
        let mut yes = 0u32;
        let mut no = 0u32;
        no |= (d[7] < N_7) as u32;
        no |= (d[6] < N_6) as u32;
        no |= (d[5] < N_5) as u32;
        no |= (d[4] < N_4) as u32;
        yes |= (d[4] > N_4) as u32 & !no;
        no |= (d[3] < N_3) as u32 & !yes;
        yes |= (d[3] > N_3) as u32 & !no;
        no |= (d[2] < N_2) as u32 & !yes;
        yes |= (d[2] > N_2) as u32 & !no;
        no |= (d[1] < N_1) as u32 & !yes;
        yes |= (d[1] > N_1) as u32 & !no;
        yes |= (d[0] >= N_0) as u32 & !no;
        yes & 1
    }

    /// Subtracts the order `overflow` times (0 or 1), discarding the carry
    /// out of the top limb.
    fn reduce(&mut self, overflow: u32) {
        debug_assert!(overflow <= 1);
        let o = overflow as u64;
        let mut t: u64 = 0;
        for (i, limb) in self.0.iter_mut().enumerate() {
            t += *limb as u64;
            if i < N_C.len() {
                t += o * N_C[i] as u64;
            }
            *limb = t as u32;
            t >>= 32;
        }
    }

    /// Adds two scalars. Also returns whether the raw sum reached the order.
    pub fn add_with_overflow(&self, other: &Scalar) -> (Scalar, bool) {
        let mut r = Scalar::ZERO;
        let mut t: u64 = 0;
        for i in 0..8 {
            t += self.0[i] as u64 + other.0[i] as u64;
            r.0[i] = t as u32;
            t >>= 32;
        }
        let overflow = t as u32 + r.check_overflow();
        debug_assert!(overflow <= 1);
        r.reduce(overflow);
        (r, overflow == 1)
    }

    /// Adds `2^bit` when `flag` is set. The sum must not reach the order.
    pub fn cadd_bit(&mut self, bit: usize, flag: bool) {
        debug_assert!(bit < 256);
        // pushing bit past 255 turns the addition into a no-op
        let bit = bit + ((flag as usize).wrapping_sub(1) & 0x100);
        let mut t: u64 = 0;
        for (i, limb) in self.0.iter_mut().enumerate() {
            t += *limb as u64 + ((((bit >> 5) == i) as u64) << (bit & 0x1F));
            *limb = t as u32;
            t >>= 32;
        }
        debug_assert!(t == 0);
        debug_assert!(self.check_overflow() == 0);
    }

    /// Computes `n - self`, mapping zero to zero.
    pub fn negate(&self) -> Scalar {
        let nonzero = 0xFFFFFFFFu32.wrapping_mul(!self.is_zero() as u32);
        let n = [N_0, N_1, N_2, N_3, N_4, N_5, N_6, N_7];
        let mut r = Scalar::ZERO;
        let mut t: u64 = 1;
        for i in 0..8 {
            t += (!self.0[i]) as u64 + n[i] as u64;
            r.0[i] = (t as u32) & nonzero;
            t >>= 32;
        }
        r
    }

    /// Negates in place when `flag` is set, in constant time. Returns `-1`
    /// when it negated and `1` otherwise.
    pub fn cond_neg(&mut self, flag: bool) -> i32 {
        // all ones when flag is set
        let mask = (!flag as u32).wrapping_sub(1);
        let nonzero = 0xFFFFFFFFu32.wrapping_mul(!self.is_zero() as u32);
        let n = [N_0.wrapping_add(1), N_1, N_2, N_3, N_4, N_5, N_6, N_7];
        let mut t: u64 = 0;
        for (i, limb) in self.0.iter_mut().enumerate() {
            t += (*limb ^ mask) as u64 + (n[i] & mask) as u64;
            *limb = (t as u32) & nonzero;
            t >>= 32;
        }
        2 * (mask == 0) as i32 - 1
    }

    /// Whether the scalar is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().fold(0, |acc, limb| acc | limb) == 0
    }

    /// Whether the scalar is one.
    pub fn is_one(&self) -> bool {
        (self.0[0] ^ 1) | self.0[1..].iter().fold(0, |acc, limb| acc | limb) == 0
    }

    /// Whether the scalar is even.
    pub fn is_even(&self) -> bool {
        self.0[0] & 1 == 0
    }

    /// Whether the scalar is greater than `n / 2`.
    pub fn is_high(&self) -> bool {
        let d = &self.0;
        let mut yes = 0u32;
        let mut no = 0u32;
        no |= (d[7] < N_H_7) as u32;
        yes |= (d[7] > N_H_7) as u32 & !no;
        no |= (d[6] < N_H_6) as u32 & !yes;
        no |= (d[5] < N_H_5) as u32 & !yes;
        no |= (d[4] < N_H_4) as u32 & !yes;
        no |= (d[3] < N_H_3) as u32 & !yes;
        yes |= (d[3] > N_H_3) as u32 & !no;
        no |= (d[2] < N_H_2) as u32 & !yes;
        yes |= (d[2] > N_H_2) as u32 & !no;
        no |= (d[1] < N_H_1) as u32 & !yes;
        yes |= (d[1] > N_H_1) as u32 & !no;
        yes |= (d[0] > N_H_0) as u32 & !no;
        yes & 1 == 1
    }

    /// Shifts right by `n` bits (`1..=15`), returning the bits shifted out.
    pub fn shr_int(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0 && n < 16);
        let ret = self.0[0] & ((1 << n) - 1);
        for i in 0..7 {
            self.0[i] = (self.0[i] >> n) | (self.0[i + 1] << (32 - n));
        }
        self.0[7] >>= n;
        ret
    }

    /// The full 512-bit product as sixteen little-endian limbs.
    fn mul_512(&self, other: &Scalar) -> [u32; 16] {
        let a = &self.0;
        let b = &other.0;
        let mut l = [0u32; 16];
        for i in 0..8 {
            let mut c: u64 = 0;
            for j in 0..8 {
                let t = l[i + j] as u64 + a[i] as u64 * b[j] as u64 + c;
                l[i + j] = t as u32;
                c = t >> 32;
            }
            l[i + 8] = c as u32;
        }
        l
    }

    /// Reduces a 512-bit value modulo the order.
    ///
    /// Uses `2^256 ≡ 2^256 - n` three times: 512 bits fold to 385, then to
    /// 258, then to 256 plus a carry.
    fn reduce_512(l: &[u32; 16]) -> Scalar {
        let mut m = [0u32; 13];
        fold_high(&l[..8], &l[8..], &mut m);
        let mut p = [0u32; 9];
        fold_high(&m[..8], &m[8..], &mut p);
        let mut out = [0u32; 9];
        fold_high(&p[..8], &p[8..], &mut out);

        let mut r = Scalar::ZERO;
        r.0.copy_from_slice(&out[..8]);
        let overflow = out[8] + r.check_overflow();
        debug_assert!(overflow <= 1);
        r.reduce(overflow);
        r
    }

    /// Multiplies two scalars mod the order.
    pub fn mul(&self, other: &Scalar) -> Scalar {
        Scalar::reduce_512(&self.mul_512(other))
    }

    /// Squares the scalar mod the order.
    pub fn sqr(&self) -> Scalar {
        self.mul(self)
    }

    fn sqr_n(&self, k: usize) -> Scalar {
        let mut r = *self;
        for _ in 0..k {
            r = r.sqr();
        }
        r
    }

    /// Computes the inverse as `self^(n-2)` with a fixed addition chain, so
    /// the running time does not depend on the value. Zero maps to zero.
    pub fn inv(&self) -> Scalar {
        let x = self;
        let u2 = x.sqr();
        let x2 = u2.mul(x);
        let u5 = u2.mul(&x2);
        let x3 = u5.mul(&u2);
        let u9 = x3.mul(&u2);
        let u11 = u9.mul(&u2);
        let u13 = u11.mul(&u2);

        let x6 = u13.sqr_n(2).mul(&u11);
        let x8 = x6.sqr_n(2).mul(&x2);
        let x14 = x8.sqr_n(6).mul(&x6);
        let x28 = x14.sqr_n(14).mul(&x14);
        let x56 = x28.sqr_n(28).mul(&x28);
        let x112 = x56.sqr_n(56).mul(&x56);
        let x126 = x112.sqr_n(14).mul(&x14);

        // the low 130 bits of n - 2, as (squarings, multiplier) steps
        let tail: [(usize, &Scalar); 24] = [
            (3, &u5),
            (4, &x3),
            (4, &u5),
            (5, &u11),
            (4, &u11),
            (4, &x3),
            (5, &x3),
            (6, &u13),
            (4, &u5),
            (3, &x3),
            (5, &u9),
            (6, &u5),
            (10, &x3),
            (4, &x3),
            (9, &x8),
            (5, &u9),
            (6, &u11),
            (4, &u13),
            (5, &x2),
            (6, &u13),
            (10, &u13),
            (4, &u9),
            (6, x),
            (8, &x6),
        ];
        tail.iter()
            .fold(x126, |t, (squarings, multiplier)| t.sqr_n(*squarings).mul(multiplier))
    }

    /// Inverse for public inputs.
    pub fn inv_var(&self) -> Scalar {
        self.inv()
    }

    /// Splits into the low and high 128 bits: `self = r1 + r2·2^128`.
    pub fn split_128(&self) -> (Scalar, Scalar) {
        let d = &self.0;
        (
            Scalar([d[0], d[1], d[2], d[3], 0, 0, 0, 0]),
            Scalar([d[4], d[5], d[6], d[7], 0, 0, 0, 0]),
        )
    }

    /// Computes `round(self·other / 2^shift)` for `shift >= 256`.
    pub fn mul_shift_var(&self, other: &Scalar, shift: usize) -> Scalar {
        debug_assert!(shift >= 256);
        let l = self.mul_512(other);
        let shift_limbs = shift >> 5;
        let shift_low = (shift & 0x1F) as u32;
        let mut r = Scalar::ZERO;
        for (i, limb) in r.0.iter_mut().enumerate() {
            let idx = shift_limbs + i;
            let low = if idx < 16 { l[idx] >> shift_low } else { 0 };
            let high = if shift_low != 0 && idx + 1 < 16 {
                l[idx + 1] << (32 - shift_low)
            } else {
                0
            };
            *limb = low | high;
        }
        let round = (l[(shift - 1) >> 5] >> ((shift - 1) & 0x1F)) & 1;
        r.cadd_bit(0, round == 1);
        r
    }

    /// Splits `self` into `(r1, r2)` with `self = r1 + r2·λ` where both
    /// halves are at most 128 bits long up to sign.
    pub fn split_lambda(&self) -> (Scalar, Scalar) {
        const MINUS_B1: Scalar = Scalar::new(
            0x00000000, 0x00000000, 0x00000000, 0x00000000, 0xE4437ED6, 0x010E8828, 0x6F547FA9,
            0x0ABFE4C3,
        );
        const MINUS_B2: Scalar = Scalar::new(
            0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFE, 0x8A280AC5, 0x0774346D, 0xD765CDA8,
            0x3DB1562C,
        );
        const G1: Scalar = Scalar::new(
            0x3086D221, 0xA7D46BCD, 0xE86C90E4, 0x9284EB15, 0x3DAA8A14, 0x71E8CA7F, 0xE893209A,
            0x45DBB031,
        );
        const G2: Scalar = Scalar::new(
            0xE4437ED6, 0x010E8828, 0x6F547FA9, 0x0ABFE4C4, 0x221208AC, 0x9DF506C6, 0x1571B4AE,
            0x8AC47F71,
        );
        const MINUS_LAMBDA: Scalar = Scalar::new(
            0xAC9C52B3, 0x3FA3CF1F, 0x5AD9E3FD, 0x77ED9BA4, 0xA880B9FC, 0x8EC739C2, 0xE0CFC810,
            0xB51283CF,
        );

        let c1 = self.mul_shift_var(&G1, 384).mul(&MINUS_B1);
        let c2 = self.mul_shift_var(&G2, 384).mul(&MINUS_B2);
        let r2 = c1 + c2;
        let r1 = r2.mul(&MINUS_LAMBDA) + self;
        (r1, r2)
    }

    /// Sets `self` to `other` when `flag` is set, without branching.
    pub fn cmov(&mut self, other: &Scalar, flag: Choice) {
        self.conditional_assign(other, flag)
    }
}

/// Writes `lo + hi·(2^256 - n)` into `out`, which must be wide enough to
/// hold the result.
fn fold_high(lo: &[u32], hi: &[u32], out: &mut [u32]) {
    let mut c: u128 = 0;
    for (k, limb) in out.iter_mut().enumerate() {
        c += lo.get(k).copied().unwrap_or(0) as u128;
        for (i, h) in hi.iter().enumerate() {
            if k >= i && k - i < N_C.len() {
                c += *h as u128 * N_C[k - i] as u128;
            }
        }
        *limb = c as u32;
        c >>= 32;
    }
    debug_assert!(c == 0);
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut r = Scalar::ZERO;
        for i in 0..8 {
            r.0[i] = u32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        r
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl<'a> Add<&'a Scalar> for Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'a Scalar) -> Scalar {
        self.add_with_overflow(rhs).0
    }
}

impl Add<Scalar> for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        self + &rhs
    }
}

impl AddAssign<&Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &Scalar) {
        *self = *self + rhs
    }
}

impl<'a, 'b> ops::Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar::mul(self, rhs)
    }
}

impl ops::Mul<Scalar> for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar::mul(&self, &rhs)
    }
}

impl MulAssign<&Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &Scalar) {
        *self = Scalar::mul(self, rhs)
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        self.negate()
    }
}

impl Neg for &Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        self.negate()
    }
}

crate::impl_display_debug_serialize! {
    fn to_bytes(scalar: &Scalar) -> [u8;32] {
        scalar.to_bytes()
    }
}

crate::impl_fromstr_deserialize! {
    name => "secp256k1 scalar",
    fn from_bytes(bytes: [u8;32]) -> Option<Scalar> {
        Scalar::from_bytes_checked(&bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    const MINUS_ONE: Scalar = Scalar::new(
        0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFE, 0xBAAEDCE6, 0xAF48A03B, 0xBFD25E8C,
        0xD0364140,
    );

    fn order_bytes() -> [u8; 32] {
        crate::hex::decode_array("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
            .unwrap()
    }

    /// Whether `s` or `-s` fits within `bound`.
    fn fits_signed(s: &Scalar, bound: &[u8; 32]) -> bool {
        s.to_bytes() <= *bound || s.negate().to_bytes() <= *bound
    }

    #[test]
    fn order_overflows_to_zero() {
        let (r, overflow) = Scalar::from_bytes(&order_bytes());
        assert!(overflow);
        assert!(r.is_zero());
        assert!(Scalar::from_bytes_checked(&order_bytes()).is_none());

        let (r, overflow) = Scalar::from_bytes(&[0xFF; 32]);
        assert!(overflow);
        let expected: Scalar = "000000000000000000000000000000014551231950b75fc4402da1732fc9bebe"
            .parse()
            .unwrap();
        assert_eq!(r, expected);
    }

    #[test]
    fn minus_one() {
        assert_eq!(Scalar::ONE.negate(), MINUS_ONE);
        assert!((MINUS_ONE + Scalar::ONE).is_zero());
        assert_eq!(MINUS_ONE.mul(&MINUS_ONE), Scalar::ONE);
        assert!(MINUS_ONE.is_high());
        assert!(!Scalar::ONE.is_high());
        assert!(Scalar::ZERO.negate().is_zero());
    }

    #[test]
    fn half_order_boundary() {
        let half: Scalar = "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0"
            .parse()
            .unwrap();
        assert!(!half.is_high());
        assert!((half + Scalar::ONE).is_high());
    }

    #[test]
    fn lambda_is_cube_root_of_unity() {
        let l = Scalar::LAMBDA;
        assert_eq!(l.mul(&l).mul(&l), Scalar::ONE);
        assert!((l.sqr() + l + Scalar::ONE).is_zero());
    }

    #[test]
    fn cadd_bit() {
        let mut s = Scalar::ZERO;
        s.cadd_bit(37, false);
        assert!(s.is_zero());
        s.cadd_bit(37, true);
        assert_eq!(s.0, [0, 1 << 5, 0, 0, 0, 0, 0, 0]);
        s.cadd_bit(0, true);
        assert_eq!(s.get_bits(0, 1), 1);
    }

    #[test]
    fn get_bits_across_limbs() {
        let s = Scalar([0x8000_0000, 0x0000_0003, 0, 0, 0, 0, 0, 0]);
        assert_eq!(s.get_bits_var(31, 3), 0b111);
        assert_eq!(s.get_bits_var(30, 4), 0b1110);
        assert_eq!(s.get_bits_var(33, 5), 0b1);
        assert_eq!(s.get_bits(32, 4), 0b11);
    }

    #[test]
    fn shr_int() {
        let mut s = Scalar([0b1011_0110, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(s.shr_int(4), 0b0110);
        assert_eq!(s.0[0], 0b1011 | (1 << 28));
        assert_eq!(s.0[1], 0);
    }

    #[test]
    fn mul_shift_rounds() {
        let mut a = Scalar::ZERO;
        a.cadd_bit(200, true);
        assert_eq!(a.mul_shift_var(&a, 384), Scalar::from_int(1 << 16));

        // 2^383 rounds up to 1 after shifting by 384
        let mut b = Scalar::ZERO;
        b.cadd_bit(255, true);
        let mut c = Scalar::ZERO;
        c.cadd_bit(128, true);
        assert_eq!(b.mul_shift_var(&c, 384), Scalar::ONE);
        c = Scalar::ZERO;
        c.cadd_bit(127, true);
        assert!(b.mul_shift_var(&c, 384).is_zero());
    }

    #[test]
    fn cond_neg() {
        let mut s = Scalar::from_int(5);
        assert_eq!(s.cond_neg(false), 1);
        assert_eq!(s, Scalar::from_int(5));
        assert_eq!(s.cond_neg(true), -1);
        assert_eq!(s, Scalar::from_int(5).negate());
        let mut z = Scalar::ZERO;
        assert_eq!(z.cond_neg(true), -1);
        assert!(z.is_zero());
    }

    #[test]
    fn inverse_of_zero_is_zero() {
        assert!(Scalar::ZERO.inv().is_zero());
        assert_eq!(Scalar::ONE.inv(), Scalar::ONE);
        assert_eq!(MINUS_ONE.inv(), MINUS_ONE);
    }

    #[test]
    fn split_lambda_of_edge_scalars() {
        for k in [Scalar::ZERO, Scalar::ONE, MINUS_ONE, Scalar::LAMBDA] {
            let (r1, r2) = k.split_lambda();
            assert_eq!(r1 + r2.mul(&Scalar::LAMBDA), k);
        }
    }

    #[test]
    fn random() {
        let scalar_1 = Scalar::random(&mut rand::thread_rng());
        let scalar_2 = Scalar::random(&mut rand::thread_rng());
        assert_ne!(scalar_1, scalar_2);
        assert!(!scalar_1.is_zero());
    }

    proptest! {
        #[test]
        fn invert(x in any::<Scalar>()) {
            if x.is_zero() {
                prop_assert!(x.inv().is_zero());
            } else {
                prop_assert_eq!(x.mul(&x.inv()), Scalar::ONE);
                prop_assert_eq!(x.inv_var(), x.inv());
            }
        }

        #[test]
        fn ring_laws(a in any::<Scalar>(), b in any::<Scalar>(), c in any::<Scalar>()) {
            prop_assert_eq!(a + b, b + a);
            prop_assert_eq!((a + b) + c, a + (b + c));
            prop_assert_eq!(a * b, b * a);
            prop_assert_eq!((a * b) * c, a * (b * c));
            prop_assert_eq!(a * (b + c), a * b + a * c);
            prop_assert_eq!(a.sqr(), a * a);
            prop_assert!((a + a.negate()).is_zero());
        }

        #[test]
        fn bytes_round_trip(bytes in any::<[u8; 32]>()) {
            let (s, overflow) = Scalar::from_bytes(&bytes);
            prop_assert_eq!(overflow, bytes >= order_bytes());
            if !overflow {
                prop_assert_eq!(s.to_bytes(), bytes);
            }
        }

        #[test]
        fn split_lambda(k in any::<Scalar>()) {
            let (r1, r2) = k.split_lambda();
            prop_assert_eq!(r1 + r2.mul(&Scalar::LAMBDA), k);
            let k1_bound = crate::hex::decode_array::<32>(
                "00000000000000000000000000000000a2a8918ca85bafe22016d0b917e4dd77",
            )
            .unwrap();
            let k2_bound = crate::hex::decode_array::<32>(
                "000000000000000000000000000000008a65287bd47179fb2be08846cea267ed",
            )
            .unwrap();
            prop_assert!(fits_signed(&r1, &k1_bound));
            prop_assert!(fits_signed(&r2, &k2_bound));
        }

        #[test]
        fn split_128(k in any::<Scalar>()) {
            let (lo, hi) = k.split_128();
            let mut two_128 = Scalar::ZERO;
            two_128.cadd_bit(128, true);
            prop_assert_eq!(lo + hi * two_128, k);
        }

        #[test]
        fn cond_neg_matches_negate(k in any::<Scalar>(), flag in any::<bool>()) {
            let mut r = k;
            let sign = r.cond_neg(flag);
            prop_assert_eq!(r, if flag { k.negate() } else { k });
            prop_assert_eq!(sign, if flag { -1 } else { 1 });
        }

        #[test]
        fn high_and_negation(k in any::<Scalar>()) {
            if !k.is_zero() {
                prop_assert_ne!(k.is_high(), k.negate().is_high());
            }
        }

        #[test]
        fn bit_windows_rebuild_scalar(k in any::<Scalar>(), width in 1usize..=15) {
            let sixteen = Scalar::from_int(16);
            let mut n = Scalar::ZERO;
            for i in (0..64).rev() {
                n = n * sixteen + Scalar::from_int(k.get_bits(4 * i, 4));
            }
            prop_assert_eq!(n, k);

            // windows of `width` bits from the top, the last one shorter
            let mut n = Scalar::ZERO;
            let mut pos = 256;
            while pos > 0 {
                let count = width.min(pos);
                pos -= count;
                n = n * Scalar::from_int(1 << count) + Scalar::from_int(k.get_bits_var(pos, count));
            }
            prop_assert_eq!(n, k);
        }
    }
}
