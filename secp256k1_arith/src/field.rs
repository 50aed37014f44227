//! Arithmetic modulo the secp256k1 field prime `p = 2^256 - 2^32 - 977`.
//!
//! A [`Field`] is stored as ten 26-bit limbs (the top limb holds 22 bits).
//! Limbs may exceed 26 bits between normalizations; how far is tracked by the
//! element's *magnitude*. Every operation states the magnitude it accepts and
//! the magnitude it produces. These bounds are checked with `debug_assert!`.
//!
//! Methods ending in `_var` may branch on their inputs and must only ever be
//! given public data.
#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    ops::{self, Add, AddAssign, MulAssign},
};
use subtle::{Choice, ConditionallySelectable};

const M: u32 = 0x3FF_FFFF;
const M128: u128 = M as u128;
/// `2^260 mod p` split across two limbs: `[R1 R0]`.
const R0: u128 = 0x3D10;
const R1: u128 = 0x400;

/// An element of the secp256k1 base field.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    n: [u32; 10],
    magnitude: u32,
    normalized: bool,
}

/// A field element packed into eight 32-bit words. It is always fully
/// normalized, so it carries no magnitude.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStorage(pub [u32; 8]);

impl Default for Field {
    fn default() -> Self {
        Field::ZERO
    }
}

impl Field {
    /// The element `0`.
    pub const ZERO: Field = Field::new(0, 0, 0, 0, 0, 0, 0, 0);
    /// The element `1`.
    pub const ONE: Field = Field::new(0, 0, 0, 0, 0, 0, 0, 1);
    /// The constant `7` from the curve equation `y² = x³ + 7`.
    pub const CURVE_B: Field = Field::new(0, 0, 0, 0, 0, 0, 0, 7);

    /// Creates a normalized element from eight big-endian 32-bit words.
    /// `d7` is the most significant word. The value must be below `p`.
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
        Self::from_words([d0, d1, d2, d3, d4, d5, d6, d7])
    }

    /// Packs eight little-endian-ordered 32-bit words into limbs.
    const fn from_words(d: [u32; 8]) -> Self {
        Field {
            n: [
                d[0] & M,
                (d[0] >> 26) | ((d[1] & 0xFFFFF) << 6),
                (d[1] >> 20) | ((d[2] & 0x3FFF) << 12),
                (d[2] >> 14) | ((d[3] & 0xFF) << 18),
                (d[3] >> 8) | ((d[4] & 0x3) << 24),
                (d[4] >> 2) & M,
                (d[4] >> 28) | ((d[5] & 0x3FFFFF) << 4),
                (d[5] >> 22) | ((d[6] & 0xFFFF) << 10),
                (d[6] >> 16) | ((d[7] & 0x3FF) << 16),
                d[7] >> 10,
            ],
            magnitude: 1,
            normalized: true,
        }
    }

    /// Unpacks normalized limbs into eight little-endian-ordered words.
    fn to_words(&self) -> [u32; 8] {
        let n = &self.n;
        [
            n[0] | (n[1] << 26),
            (n[1] >> 6) | (n[2] << 20),
            (n[2] >> 12) | (n[3] << 14),
            (n[3] >> 18) | (n[4] << 8),
            (n[4] >> 24) | (n[5] << 2) | (n[6] << 28),
            (n[6] >> 4) | (n[7] << 22),
            (n[7] >> 10) | (n[8] << 16),
            (n[8] >> 16) | (n[9] << 10),
        ]
    }

    /// Creates the element equal to a small integer.
    pub fn from_int(a: u32) -> Self {
        debug_assert!(a <= M);
        let mut r = Field::ZERO;
        r.n[0] = a;
        r
    }

    /// Decodes a 32-byte big-endian value. Returns `None` when it is not
    /// below `p`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let mut words = [0u32; 8];
        for (i, chunk) in bytes.chunks_exact(4).enumerate() {
            words[7 - i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        let r = Field::from_words(words);
        let n = &r.n;
        let overflow = n[9] == 0x3FFFFF
            && (n[8] & n[7] & n[6] & n[5] & n[4] & n[3] & n[2]) == M
            && (n[1] + 0x40 + ((n[0] + 0x3D1) >> 26)) > M;
        if overflow { None } else { Some(r) }
    }

    /// Encodes a normalized element as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        debug_assert!(self.normalized, "field element must be normalized to serialize");
        debug_assert!(self.verify());
        let mut bytes = [0u8; 32];
        for (i, word) in self.to_words().iter().rev().enumerate() {
            bytes[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    /// The current magnitude bound of the element.
    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }

    /// Whether the limbs hold the unique representative in `[0, p)`.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Checks the limb bounds implied by the element's magnitude.
    pub(crate) fn verify(&self) -> bool {
        let d = &self.n;
        let m = if self.normalized { 1 } else { 2 * self.magnitude as u64 };
        let mut ok = self.magnitude <= 32;
        for limb in &d[..9] {
            ok &= (*limb as u64) <= (M as u64) * m;
        }
        ok &= (d[9] as u64) <= 0x3FFFFF * m;
        if self.normalized {
            ok &= self.magnitude <= 1;
            if ok && d[9] == 0x3FFFFF && (d[8] & d[7] & d[6] & d[5] & d[4] & d[3] & d[2]) == M {
                ok &= (d[1] + 0x40 + ((d[0] + 0x3D1) >> 26)) <= M;
            }
        }
        ok
    }

    /// Fully reduces the element in constant time.
    pub fn normalize(&mut self) {
        let [mut t0, mut t1, mut t2, mut t3, mut t4, mut t5, mut t6, mut t7, mut t8, mut t9] =
            self.n;

        // reduce t9 first so the carry pass below carries at most once
        let mut x = t9 >> 22;
        t9 &= 0x3FFFFF;
        t0 += x * 0x3D1;
        t1 += x << 6;
        t1 += t0 >> 26;
        t0 &= M;
        t2 += t1 >> 26;
        t1 &= M;
        t3 += t2 >> 26;
        t2 &= M;
        let mut m = t2;
        t4 += t3 >> 26;
        t3 &= M;
        m &= t3;
        t5 += t4 >> 26;
        t4 &= M;
        m &= t4;
        t6 += t5 >> 26;
        t5 &= M;
        m &= t5;
        t7 += t6 >> 26;
        t6 &= M;
        m &= t6;
        t8 += t7 >> 26;
        t7 &= M;
        m &= t7;
        t9 += t8 >> 26;
        t8 &= M;
        m &= t8;
        debug_assert!(t9 >> 23 == 0);

        // at most one subtraction of p is left; it is always applied
        x = (t9 >> 22)
            | ((t9 == 0x3FFFFF) as u32
                & (m == M) as u32
                & ((t1 + 0x40 + ((t0 + 0x3D1) >> 26)) > M) as u32);
        t0 += x * 0x3D1;
        t1 += x << 6;
        t1 += t0 >> 26;
        t0 &= M;
        t2 += t1 >> 26;
        t1 &= M;
        t3 += t2 >> 26;
        t2 &= M;
        t4 += t3 >> 26;
        t3 &= M;
        t5 += t4 >> 26;
        t4 &= M;
        t6 += t5 >> 26;
        t5 &= M;
        t7 += t6 >> 26;
        t6 &= M;
        t8 += t7 >> 26;
        t7 &= M;
        t9 += t8 >> 26;
        t8 &= M;
        debug_assert!(t9 >> 22 == x);
        t9 &= 0x3FFFFF;

        self.n = [t0, t1, t2, t3, t4, t5, t6, t7, t8, t9];
        self.magnitude = 1;
        self.normalized = true;
        debug_assert!(self.verify());
    }

    /// Brings the magnitude down to 1 without fully reducing.
    pub fn normalize_weak(&mut self) {
        let [mut t0, mut t1, mut t2, mut t3, mut t4, mut t5, mut t6, mut t7, mut t8, mut t9] =
            self.n;
        let x = t9 >> 22;
        t9 &= 0x3FFFFF;
        t0 += x * 0x3D1;
        t1 += x << 6;
        t1 += t0 >> 26;
        t0 &= M;
        t2 += t1 >> 26;
        t1 &= M;
        t3 += t2 >> 26;
        t2 &= M;
        t4 += t3 >> 26;
        t3 &= M;
        t5 += t4 >> 26;
        t4 &= M;
        t6 += t5 >> 26;
        t5 &= M;
        t7 += t6 >> 26;
        t6 &= M;
        t8 += t7 >> 26;
        t7 &= M;
        t9 += t8 >> 26;
        t8 &= M;
        debug_assert!(t9 >> 23 == 0);
        self.n = [t0, t1, t2, t3, t4, t5, t6, t7, t8, t9];
        self.magnitude = 1;
        debug_assert!(self.verify());
    }

    /// Fully reduces the element. Only skips the final subtraction when it
    /// is not needed, so it branches on the value.
    pub fn normalize_var(&mut self) {
        let [mut t0, mut t1, mut t2, mut t3, mut t4, mut t5, mut t6, mut t7, mut t8, mut t9] =
            self.n;
        let mut x = t9 >> 22;
        t9 &= 0x3FFFFF;
        t0 += x * 0x3D1;
        t1 += x << 6;
        t1 += t0 >> 26;
        t0 &= M;
        t2 += t1 >> 26;
        t1 &= M;
        t3 += t2 >> 26;
        t2 &= M;
        let mut m = t2;
        t4 += t3 >> 26;
        t3 &= M;
        m &= t3;
        t5 += t4 >> 26;
        t4 &= M;
        m &= t4;
        t6 += t5 >> 26;
        t5 &= M;
        m &= t5;
        t7 += t6 >> 26;
        t6 &= M;
        m &= t6;
        t8 += t7 >> 26;
        t7 &= M;
        m &= t7;
        t9 += t8 >> 26;
        t8 &= M;
        m &= t8;
        debug_assert!(t9 >> 23 == 0);

        x = (t9 >> 22)
            | ((t9 == 0x3FFFFF) as u32
                & (m == M) as u32
                & ((t1 + 0x40 + ((t0 + 0x3D1) >> 26)) > M) as u32);
        if x != 0 {
            t0 += 0x3D1;
            t1 += x << 6;
            t1 += t0 >> 26;
            t0 &= M;
            t2 += t1 >> 26;
            t1 &= M;
            t3 += t2 >> 26;
            t2 &= M;
            t4 += t3 >> 26;
            t3 &= M;
            t5 += t4 >> 26;
            t4 &= M;
            t6 += t5 >> 26;
            t5 &= M;
            t7 += t6 >> 26;
            t6 &= M;
            t8 += t7 >> 26;
            t7 &= M;
            t9 += t8 >> 26;
            t8 &= M;
            debug_assert!(t9 >> 22 == x);
            t9 &= 0x3FFFFF;
        }

        self.n = [t0, t1, t2, t3, t4, t5, t6, t7, t8, t9];
        self.magnitude = 1;
        self.normalized = true;
        debug_assert!(self.verify());
    }

    /// Whether the element is congruent to zero, in constant time.
    pub fn normalizes_to_zero(&self) -> bool {
        let [mut t0, mut t1, mut t2, mut t3, mut t4, mut t5, mut t6, mut t7, mut t8, mut t9] =
            self.n;
        let x = t9 >> 22;
        t9 &= 0x3FFFFF;
        t0 += x * 0x3D1;
        t1 += x << 6;

        // z0 tracks a raw value of 0, z1 a raw value of p
        t1 += t0 >> 26;
        t0 &= M;
        let mut z0 = t0;
        let mut z1 = t0 ^ 0x3D0;
        t2 += t1 >> 26;
        t1 &= M;
        z0 |= t1;
        z1 &= t1 ^ 0x40;
        t3 += t2 >> 26;
        t2 &= M;
        z0 |= t2;
        z1 &= t2;
        t4 += t3 >> 26;
        t3 &= M;
        z0 |= t3;
        z1 &= t3;
        t5 += t4 >> 26;
        t4 &= M;
        z0 |= t4;
        z1 &= t4;
        t6 += t5 >> 26;
        t5 &= M;
        z0 |= t5;
        z1 &= t5;
        t7 += t6 >> 26;
        t6 &= M;
        z0 |= t6;
        z1 &= t6;
        t8 += t7 >> 26;
        t7 &= M;
        z0 |= t7;
        z1 &= t7;
        t9 += t8 >> 26;
        t8 &= M;
        z0 |= t8;
        z1 &= t8;
        z0 |= t9;
        z1 &= t9 ^ 0x3C00000;
        debug_assert!(t9 >> 23 == 0);

        ((z0 == 0) as u8 | (z1 == M) as u8) == 1
    }

    /// Whether the element is congruent to zero. Returns early for the vast
    /// majority of non-zero inputs.
    pub fn normalizes_to_zero_var(&self) -> bool {
        let mut t0 = self.n[0];
        let mut t9 = self.n[9];
        let x = t9 >> 22;
        t0 += x * 0x3D1;

        let mut z0 = t0 & M;
        let mut z1 = z0 ^ 0x3D0;
        if z0 != 0 && z1 != M {
            return false;
        }

        let [_, mut t1, mut t2, mut t3, mut t4, mut t5, mut t6, mut t7, mut t8, _] = self.n;
        t9 &= 0x3FFFFF;
        t1 += x << 6;
        t1 += t0 >> 26;
        t2 += t1 >> 26;
        t1 &= M;
        z0 |= t1;
        z1 &= t1 ^ 0x40;
        t3 += t2 >> 26;
        t2 &= M;
        z0 |= t2;
        z1 &= t2;
        t4 += t3 >> 26;
        t3 &= M;
        z0 |= t3;
        z1 &= t3;
        t5 += t4 >> 26;
        t4 &= M;
        z0 |= t4;
        z1 &= t4;
        t6 += t5 >> 26;
        t5 &= M;
        z0 |= t5;
        z1 &= t5;
        t7 += t6 >> 26;
        t6 &= M;
        z0 |= t6;
        z1 &= t6;
        t8 += t7 >> 26;
        t7 &= M;
        z0 |= t7;
        z1 &= t7;
        t9 += t8 >> 26;
        t8 &= M;
        z0 |= t8;
        z1 &= t8;
        z0 |= t9;
        z1 &= t9 ^ 0x3C00000;
        debug_assert!(t9 >> 23 == 0);

        z0 == 0 || z1 == M
    }

    /// Whether a normalized element is zero.
    pub fn is_zero(&self) -> bool {
        debug_assert!(self.normalized);
        self.n.iter().fold(0, |acc, limb| acc | limb) == 0
    }

    /// Whether a normalized element is odd.
    pub fn is_odd(&self) -> bool {
        debug_assert!(self.normalized);
        self.n[0] & 1 == 1
    }

    /// Compares two normalized elements as integers.
    pub fn cmp_var(&self, other: &Field) -> Ordering {
        debug_assert!(self.normalized && other.normalized);
        for i in (0..10).rev() {
            match self.n[i].cmp(&other.n[i]) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }

    /// Equality that branches on the inputs. `self` must have magnitude at
    /// most 1.
    pub fn eq_var(&self, other: &Field) -> bool {
        let mut na = self.neg(1);
        na += other;
        na.normalizes_to_zero_var()
    }

    /// Computes `p·2(m+1) - self`. `m` must be at least the magnitude of
    /// `self`; the result has magnitude `m + 1`.
    pub fn neg(&self, m: u32) -> Field {
        debug_assert!(self.magnitude <= m);
        debug_assert!(self.verify());
        let k = 2 * (m + 1);
        let a = &self.n;
        let r = Field {
            n: [
                0x3FFFC2F * k - a[0],
                0x3FFFFBF * k - a[1],
                M * k - a[2],
                M * k - a[3],
                M * k - a[4],
                M * k - a[5],
                M * k - a[6],
                M * k - a[7],
                M * k - a[8],
                0x3FFFFF * k - a[9],
            ],
            magnitude: m + 1,
            normalized: false,
        };
        debug_assert!(r.verify());
        r
    }

    /// Multiplies by a small integer, scaling the magnitude by the same
    /// factor.
    pub fn mul_int(&mut self, a: u32) {
        for limb in self.n.iter_mut() {
            *limb *= a;
        }
        self.magnitude *= a;
        self.normalized = false;
        debug_assert!(self.verify());
    }

    /// Multiplies two elements. Both inputs must have magnitude at most 8;
    /// the result has magnitude 1.
    pub fn mul(&self, other: &Field) -> Field {
        debug_assert!(self.magnitude <= 8 && other.magnitude <= 8);
        debug_assert!(self.verify() && other.verify());
        let a = &self.n;
        let b = &other.n;
        let mut p = [0u128; 19];
        for i in 0..10 {
            for j in 0..10 {
                p[i + j] += a[i] as u128 * b[j] as u128;
            }
        }
        Field::reduce_wide(p)
    }

    /// Squares an element. The input must have magnitude at most 8; the
    /// result has magnitude 1.
    pub fn sqr(&self) -> Field {
        debug_assert!(self.magnitude <= 8);
        debug_assert!(self.verify());
        let a = &self.n;
        let mut p = [0u128; 19];
        for i in 0..10 {
            p[2 * i] += a[i] as u128 * a[i] as u128;
            for j in (i + 1)..10 {
                p[i + j] += 2 * (a[i] as u128 * a[j] as u128);
            }
        }
        Field::reduce_wide(p)
    }

    /// Reduces the 19 column sums of a limb product to magnitude 1.
    ///
    /// Columns 10..19 fold down through `2^260 ≡ [R1 R0]`, then a carry
    /// pass splits the result into limbs and the bits above 2^256 fold back
    /// through `2^256 ≡ 2^32 + 977`.
    fn reduce_wide(mut p: [u128; 19]) -> Field {
        for k in 0..9 {
            let hi = p[k + 10];
            p[k] += hi * R0;
            p[k + 1] += hi * R1;
        }

        let mut r = [0u32; 10];
        let mut c: u128 = 0;
        for i in 0..9 {
            c += p[i];
            r[i] = (c & M128) as u32;
            c >>= 26;
        }
        c += p[9];
        r[9] = (c & (M128 >> 4)) as u32;
        c >>= 22;

        let mut t = c * 0x3D1 + r[0] as u128;
        r[0] = (t & M128) as u32;
        t >>= 26;
        t += c * 0x40 + r[1] as u128;
        r[1] = (t & M128) as u32;
        t >>= 26;
        for limb in r[2..9].iter_mut() {
            t += *limb as u128;
            *limb = (t & M128) as u32;
            t >>= 26;
        }
        t += r[9] as u128;
        r[9] = (t & (M128 >> 4)) as u32;
        t >>= 22;
        debug_assert!(t <= 1);
        let t = t as u32;
        r[0] += t * 0x3D1;
        r[1] += t << 6;

        let r = Field {
            n: r,
            magnitude: 1,
            normalized: false,
        };
        debug_assert!(r.verify());
        r
    }

    /// Squares `k` times in a row.
    fn sqr_n(&self, k: usize) -> Field {
        let mut r = *self;
        for _ in 0..k {
            r = r.sqr();
        }
        r
    }

    /// Builds `x2, x3, x22, x223` where `xN = a^(2^N - 1)`. Both the inverse
    /// and the square root finish from these.
    fn pow_chain_prefix(&self) -> (Field, Field, Field, Field) {
        let a = self;
        let x2 = a.sqr().mul(a);
        let x3 = x2.sqr().mul(a);
        let x6 = x3.sqr_n(3).mul(&x3);
        let x9 = x6.sqr_n(3).mul(&x3);
        let x11 = x9.sqr_n(2).mul(&x2);
        let x22 = x11.sqr_n(11).mul(&x11);
        let x44 = x22.sqr_n(22).mul(&x22);
        let x88 = x44.sqr_n(44).mul(&x44);
        let x176 = x88.sqr_n(88).mul(&x88);
        let x220 = x176.sqr_n(44).mul(&x44);
        let x223 = x220.sqr_n(3).mul(&x3);
        (x2, x3, x22, x223)
    }

    /// Computes the inverse as `a^(p-2)`. The number of field operations is
    /// fixed, so this is constant time. The inverse of zero is zero.
    pub fn inv(&self) -> Field {
        // p - 2 has 5 blocks of 1s: 223, 22, 1, 2, 1 long
        let (x2, _, x22, x223) = self.pow_chain_prefix();
        let mut t = x223.sqr_n(23).mul(&x22);
        t = t.sqr_n(5).mul(self);
        t = t.sqr_n(3).mul(&x2);
        t.sqr_n(2).mul(self)
    }

    /// Inverse for public inputs.
    pub fn inv_var(&self) -> Field {
        self.inv()
    }

    /// Computes a square root as `a^((p+1)/4)`, which works because
    /// `p ≡ 3 mod 4`. Returns `None` when the element is not a square.
    pub fn sqrt(&self) -> Option<Field> {
        // (p+1)/4 has 3 blocks of 1s: 223, 22, 2 long
        let (x2, _, x22, x223) = self.pow_chain_prefix();
        let mut t = x223.sqr_n(23).mul(&x22);
        t = t.sqr_n(6).mul(&x2);
        let r = t.sqr_n(2);

        if r.sqr() == *self { Some(r) } else { None }
    }

    /// Whether the element has a square root.
    pub fn is_quad_var(&self) -> bool {
        self.sqrt().is_some()
    }

    /// Inverts every element of `a` with a single field inversion.
    /// None of the inputs may be zero.
    #[cfg(feature = "alloc")]
    pub fn inv_all_var(a: &[Field]) -> Vec<Field> {
        let mut r = Vec::with_capacity(a.len());
        if a.is_empty() {
            return r;
        }
        r.push(a[0]);
        for i in 1..a.len() {
            let prev = r[i - 1];
            r.push(prev.mul(&a[i]));
        }
        let mut u = r[a.len() - 1].inv_var();
        for i in (1..a.len()).rev() {
            r[i] = r[i - 1].mul(&u);
            u = u.mul(&a[i]);
        }
        r[0] = u;
        r
    }

    /// Packs a normalized element for table storage.
    pub fn to_storage(&self) -> FieldStorage {
        debug_assert!(self.normalized);
        FieldStorage(self.to_words())
    }

    /// Unpacks a stored element; the result is normalized.
    pub fn from_storage(storage: &FieldStorage) -> Field {
        Field::from_words(storage.0)
    }

    /// Sets `self` to `other` when `flag` is set, without branching.
    pub fn cmov(&mut self, other: &Field, flag: Choice) {
        self.conditional_assign(other, flag)
    }
}

impl ConditionallySelectable for Field {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut n = [0u32; 10];
        for (i, limb) in n.iter_mut().enumerate() {
            *limb = u32::conditional_select(&a.n[i], &b.n[i], choice);
        }
        Field {
            n,
            magnitude: u32::conditional_select(&a.magnitude, &b.magnitude, choice),
            normalized: u8::conditional_select(&(a.normalized as u8), &(b.normalized as u8), choice)
                == 1,
        }
    }
}

impl ConditionallySelectable for FieldStorage {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut words = [0u32; 8];
        for (i, word) in words.iter_mut().enumerate() {
            *word = u32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldStorage(words)
    }
}

/// Constant-time equality between elements of any magnitude.
impl PartialEq for Field {
    fn eq(&self, other: &Field) -> bool {
        let mut na = self.neg(self.magnitude.max(1));
        na += other;
        na.normalizes_to_zero()
    }
}

impl Eq for Field {}

impl<'a> AddAssign<&'a Field> for Field {
    fn add_assign(&mut self, other: &'a Field) {
        for (limb, rhs) in self.n.iter_mut().zip(other.n.iter()) {
            *limb += rhs;
        }
        self.magnitude += other.magnitude;
        self.normalized = false;
        debug_assert!(self.verify());
    }
}

impl AddAssign<Field> for Field {
    fn add_assign(&mut self, other: Field) {
        *self += &other
    }
}

impl<'a> Add<&'a Field> for Field {
    type Output = Field;
    fn add(mut self, other: &'a Field) -> Field {
        self += other;
        self
    }
}

impl Add<Field> for Field {
    type Output = Field;
    fn add(self, other: Field) -> Field {
        self + &other
    }
}

impl<'a, 'b> ops::Mul<&'b Field> for &'a Field {
    type Output = Field;
    fn mul(self, other: &'b Field) -> Field {
        Field::mul(self, other)
    }
}

impl<'a> ops::Mul<&'a Field> for Field {
    type Output = Field;
    fn mul(self, other: &'a Field) -> Field {
        Field::mul(&self, other)
    }
}

impl ops::Mul<Field> for Field {
    type Output = Field;
    fn mul(self, other: Field) -> Field {
        Field::mul(&self, &other)
    }
}

impl<'a> MulAssign<&'a Field> for Field {
    fn mul_assign(&mut self, other: &'a Field) {
        *self = Field::mul(self, other)
    }
}

crate::impl_display_debug_serialize! {
    fn to_bytes(storage: &FieldStorage) -> [u8;32] {
        Field::from_storage(storage).to_bytes()
    }
}

crate::impl_fromstr_deserialize! {
    name => "secp256k1 field element",
    fn from_bytes(bytes: [u8;32]) -> Option<FieldStorage> {
        Field::from_bytes(&bytes).map(|fe| fe.to_storage())
    }
}
