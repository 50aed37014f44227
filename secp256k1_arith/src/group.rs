//! Points on secp256k1 (`y² = x³ + 7`) in affine and Jacobian coordinates.
//!
//! The constant-time operations ([`Jacobian::double`], [`Jacobian::add_ge`],
//! [`Affine::from_jacobian`]) may be used with secret inputs. Everything
//! ending in `_var` branches on its inputs.
use crate::field::{Field, FieldStorage};
#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use subtle::{Choice, ConditionallySelectable};

/// A cube root of unity mod `p`. `(x, y) -> (β·x, y)` is the same map as
/// multiplying the point by [`Scalar::LAMBDA`].
///
/// [`Scalar::LAMBDA`]: crate::Scalar::LAMBDA
pub const BETA: Field = Field::new(
    0x7AE96A2B, 0x657C0710, 0x6E64479E, 0xAC3434E9, 0x9CF04975, 0x12F58995, 0xC1396C28, 0x719501EE,
);

/// The standard secp256k1 generator.
pub const G: Affine = Affine {
    x: Field::new(
        0x79BE667E, 0xF9DCBBAC, 0x55A06295, 0xCE870B07, 0x029BFCDB, 0x2DCE28D9, 0x59F2815B,
        0x16F81798,
    ),
    y: Field::new(
        0x483ADA77, 0x26A3C465, 0x5DA4FBFC, 0x0E1108A8, 0xFD17B448, 0xA6855419, 0x9C47D08F,
        0xFB10D4B8,
    ),
    infinity: false,
};

/// A point in affine coordinates, or the point at infinity.
#[derive(Debug, Clone, Copy)]
pub struct Affine {
    /// The x-coordinate.
    pub x: Field,
    /// The y-coordinate.
    pub y: Field,
    /// Whether this is the point at infinity. The coordinates are
    /// meaningless when set.
    pub infinity: bool,
}

/// A point `(X/Z², Y/Z³)` in Jacobian coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Jacobian {
    /// The X-coordinate.
    pub x: Field,
    /// The Y-coordinate.
    pub y: Field,
    /// The Z-coordinate.
    pub z: Field,
    /// Whether this is the point at infinity.
    pub infinity: bool,
}

/// A non-infinity affine point packed for constant-time tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AffineStorage {
    /// The packed x-coordinate.
    pub x: FieldStorage,
    /// The packed y-coordinate.
    pub y: FieldStorage,
}

impl Default for Affine {
    fn default() -> Self {
        Affine::INFINITY
    }
}

impl Default for Jacobian {
    fn default() -> Self {
        Jacobian::INFINITY
    }
}

impl Affine {
    /// The point at infinity.
    pub const INFINITY: Affine = Affine {
        x: Field::ZERO,
        y: Field::ZERO,
        infinity: true,
    };

    /// Creates a point from its coordinates without checking it is on the
    /// curve. See [`Affine::is_valid_var`].
    pub fn new(x: Field, y: Field) -> Self {
        Affine {
            x,
            y,
            infinity: false,
        }
    }

    /// Lifts `x` to the point whose y-coordinate is the principal square
    /// root of `x³ + 7`. Returns `None` when `x` is not on the curve.
    pub fn set_xquad(x: &Field) -> Option<Affine> {
        let c = x.sqr().mul(x) + &Field::CURVE_B;
        let y = c.sqrt()?;
        Some(Affine::new(*x, y))
    }

    /// Lifts `x` to the point whose y-coordinate has the requested parity.
    pub fn set_xo_var(x: &Field, odd: bool) -> Option<Affine> {
        let mut r = Affine::set_xquad(x)?;
        r.y.normalize_var();
        if r.y.is_odd() != odd {
            r.y = r.y.neg(1);
            r.y.normalize_var();
        }
        Some(r)
    }

    /// Whether the point is at infinity.
    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    /// Whether the point satisfies the curve equation. Infinity is not
    /// considered valid.
    pub fn is_valid_var(&self) -> bool {
        if self.infinity {
            return false;
        }
        let y2 = self.y.sqr();
        let mut x3 = self.x.sqr().mul(&self.x);
        x3 += &Field::CURVE_B;
        x3.normalize_weak();
        y2.eq_var(&x3)
    }

    /// Negates the point.
    pub fn neg(&self) -> Affine {
        let mut y = self.y;
        y.normalize_weak();
        Affine {
            x: self.x,
            y: y.neg(1),
            infinity: self.infinity,
        }
    }

    /// Computes `λ·P` as `(β·x, y)`.
    pub fn mul_lambda(&self) -> Affine {
        Affine {
            x: self.x.mul(&BETA),
            y: self.y,
            infinity: self.infinity,
        }
    }

    /// Converts from Jacobian coordinates with a constant-time inversion.
    pub fn from_jacobian(a: &Jacobian) -> Affine {
        let zi = a.z.inv();
        let zi2 = zi.sqr();
        let zi3 = zi2.mul(&zi);
        let mut x = a.x.mul(&zi2);
        let mut y = a.y.mul(&zi3);
        x.normalize();
        y.normalize();
        Affine {
            x,
            y,
            infinity: a.infinity,
        }
    }

    /// Converts from Jacobian coordinates for a public point.
    pub fn from_jacobian_var(a: &Jacobian) -> Affine {
        if a.infinity {
            return Affine::INFINITY;
        }
        let zi = a.z.inv_var();
        let mut r = Affine::from_jacobian_zinv(a, &zi);
        r.x.normalize_var();
        r.y.normalize_var();
        r
    }

    /// Scales an affine point by a known `Z` inverse: returns
    /// `(x·zi², y·zi³)`.
    pub fn set_ge_zinv(a: &Affine, zi: &Field) -> Affine {
        let zi2 = zi.sqr();
        let zi3 = zi2.mul(zi);
        Affine {
            x: a.x.mul(&zi2),
            y: a.y.mul(&zi3),
            infinity: a.infinity,
        }
    }

    /// Converts a Jacobian point given the inverse of its `Z`.
    pub(crate) fn from_jacobian_zinv(a: &Jacobian, zi: &Field) -> Affine {
        let zi2 = zi.sqr();
        let zi3 = zi2.mul(zi);
        Affine {
            x: a.x.mul(&zi2),
            y: a.y.mul(&zi3),
            infinity: a.infinity,
        }
    }

    /// Converts many Jacobian points to affine with a single field inversion.
    /// Points at infinity stay at infinity.
    #[cfg(feature = "alloc")]
    pub fn set_all_gej_var(a: &[Jacobian]) -> Vec<Affine> {
        let mut acc: Vec<Field> = Vec::with_capacity(a.len());
        let mut r = Vec::with_capacity(a.len());
        let mut running: Option<Field> = None;
        // prefix products of the non-infinity z coordinates
        for point in a {
            if !point.infinity {
                running = Some(match running {
                    None => point.z,
                    Some(prev) => prev.mul(&point.z),
                });
            }
            acc.push(running.unwrap_or(Field::ONE));
        }

        let mut u = match running {
            Some(product) => product.inv_var(),
            None => return a.iter().map(|_| Affine::INFINITY).collect(),
        };

        r.resize(a.len(), Affine::INFINITY);
        let first_finite = a.iter().position(|point| !point.infinity);
        for i in (0..a.len()).rev() {
            if a[i].infinity {
                continue;
            }
            let zi = if Some(i) == first_finite {
                u
            } else {
                // acc[i - 1] holds the product of the finite z's before i
                let zi = acc[i - 1].mul(&u);
                u = u.mul(&a[i].z);
                zi
            };
            let mut point = Affine::from_jacobian_zinv(&a[i], &zi);
            point.x.normalize_var();
            point.y.normalize_var();
            r[i] = point;
        }
        r
    }

    /// Packs a non-infinity point for table storage.
    pub fn to_storage(&self) -> AffineStorage {
        debug_assert!(!self.infinity);
        let mut x = self.x;
        let mut y = self.y;
        x.normalize();
        y.normalize();
        AffineStorage {
            x: x.to_storage(),
            y: y.to_storage(),
        }
    }

    /// Unpacks a stored point.
    pub fn from_storage(a: &AffineStorage) -> Affine {
        Affine::new(Field::from_storage(&a.x), Field::from_storage(&a.y))
    }

    /// Sets `self` to `other` when `flag` is set, without branching.
    pub fn cmov(&mut self, other: &Affine, flag: Choice) {
        self.x.cmov(&other.x, flag);
        self.y.cmov(&other.y, flag);
        let infinity = u8::conditional_select(&(self.infinity as u8), &(other.infinity as u8), flag);
        self.infinity = infinity == 1;
    }
}

impl PartialEq for Affine {
    fn eq(&self, other: &Affine) -> bool {
        match (self.infinity, other.infinity) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

impl Eq for Affine {}

impl ConditionallySelectable for AffineStorage {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        AffineStorage {
            x: FieldStorage::conditional_select(&a.x, &b.x, choice),
            y: FieldStorage::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl AffineStorage {
    /// Packs a non-infinity affine point.
    pub fn from_affine(a: &Affine) -> Self {
        a.to_storage()
    }

    /// Unpacks into an affine point.
    pub fn to_affine(&self) -> Affine {
        Affine::from_storage(self)
    }

    /// Sets `self` to `other` when `flag` is set, without branching.
    pub fn cmov(&mut self, other: &AffineStorage, flag: Choice) {
        self.conditional_assign(other, flag)
    }
}

impl Jacobian {
    /// The point at infinity.
    pub const INFINITY: Jacobian = Jacobian {
        x: Field::ZERO,
        y: Field::ZERO,
        z: Field::ZERO,
        infinity: true,
    };

    /// Lifts an affine point with `Z = 1`.
    pub fn from_affine(a: &Affine) -> Jacobian {
        Jacobian {
            x: a.x,
            y: a.y,
            z: Field::ONE,
            infinity: a.infinity,
        }
    }

    /// Whether the point is at infinity.
    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    /// Negates the point.
    pub fn neg(&self) -> Jacobian {
        let mut y = self.y;
        y.normalize_weak();
        Jacobian {
            x: self.x,
            y: y.neg(1),
            z: self.z,
            infinity: self.infinity,
        }
    }

    /// Checks whether the affine x-coordinate of this point equals `x`
    /// without inverting `Z`. The point must not be infinity.
    pub fn eq_x_var(&self, x: &Field) -> bool {
        debug_assert!(!self.infinity);
        let r = self.z.sqr().mul(x);
        let mut r2 = self.x;
        r2.normalize_weak();
        r.eq_var(&r2)
    }

    /// Multiplies `Z` by `s` and rescales `X` and `Y` to represent the same
    /// point. `s` must not be zero.
    pub fn rescale(&mut self, s: &Field) {
        debug_assert!(!s.normalizes_to_zero_var());
        let zz = s.sqr();
        self.x = self.x.mul(&zz);
        self.y = self.y.mul(&zz.mul(s));
        self.z = self.z.mul(s);
    }

    /// Doubles the point in constant time.
    pub fn double(&self) -> Jacobian {
        let a = self;
        let mut z = a.z.mul(&a.y);
        z.mul_int(2);
        let mut t1 = a.x.sqr();
        t1.mul_int(3);
        let t2 = t1.sqr();
        let mut t3 = a.y.sqr();
        t3.mul_int(2);
        let mut t4 = t3.sqr();
        t4.mul_int(2);
        t3 = t3.mul(&a.x);
        let mut x = t3;
        x.mul_int(4);
        x = x.neg(4);
        x += &t2;
        let t2 = t2.neg(1);
        t3.mul_int(6);
        t3 += &t2;
        let mut y = t1.mul(&t3);
        y += &t4.neg(2);
        Jacobian {
            x,
            y,
            z,
            infinity: a.infinity,
        }
    }

    /// Doubles a point known not to be infinity.
    pub fn double_nonzero(&self) -> Jacobian {
        debug_assert!(!self.infinity);
        self.double()
    }

    /// Doubles the point, optionally writing the ratio between the new and
    /// old `Z` into `rzr`.
    pub fn double_var(&self, rzr: Option<&mut Field>) -> Jacobian {
        if self.infinity {
            if let Some(rzr) = rzr {
                *rzr = Field::ONE;
            }
            return Jacobian::INFINITY;
        }
        if let Some(rzr) = rzr {
            let mut ratio = self.y;
            ratio.normalize_weak();
            ratio.mul_int(2);
            *rzr = ratio;
        }
        self.double()
    }

    /// Adds two Jacobian points. Handles doubling and inverse inputs.
    pub fn add_var(&self, b: &Jacobian, rzr: Option<&mut Field>) -> Jacobian {
        let a = self;
        if a.infinity {
            debug_assert!(rzr.is_none());
            return *b;
        }
        if b.infinity {
            if let Some(rzr) = rzr {
                *rzr = Field::ONE;
            }
            return *a;
        }
        let z22 = b.z.sqr();
        let z12 = a.z.sqr();
        let u1 = a.x.mul(&z22);
        let u2 = b.x.mul(&z12);
        let s1 = a.y.mul(&z22).mul(&b.z);
        let s2 = b.y.mul(&z12).mul(&a.z);
        let h = u1.neg(1) + u2;
        let i = s1.neg(1) + s2;
        if h.normalizes_to_zero_var() {
            if i.normalizes_to_zero_var() {
                return a.double_var(rzr);
            }
            if let Some(rzr) = rzr {
                *rzr = Field::ZERO;
            }
            return Jacobian::INFINITY;
        }
        let t = h.mul(&b.z);
        if let Some(rzr) = rzr {
            *rzr = t;
        }
        let z = a.z.mul(&t);
        Jacobian::add_finish(&u1, &s1, &h, &i, z)
    }

    /// Adds an affine point. Handles doubling and inverse inputs.
    pub fn add_ge_var(&self, b: &Affine, rzr: Option<&mut Field>) -> Jacobian {
        let a = self;
        if a.infinity {
            debug_assert!(rzr.is_none());
            return Jacobian::from_affine(b);
        }
        if b.infinity {
            if let Some(rzr) = rzr {
                *rzr = Field::ONE;
            }
            return *a;
        }
        let z12 = a.z.sqr();
        let mut u1 = a.x;
        u1.normalize_weak();
        let u2 = b.x.mul(&z12);
        let mut s1 = a.y;
        s1.normalize_weak();
        let s2 = b.y.mul(&z12).mul(&a.z);
        let h = u1.neg(1) + u2;
        let i = s1.neg(1) + s2;
        if h.normalizes_to_zero_var() {
            if i.normalizes_to_zero_var() {
                return a.double_var(rzr);
            }
            if let Some(rzr) = rzr {
                *rzr = Field::ZERO;
            }
            return Jacobian::INFINITY;
        }
        if let Some(rzr) = rzr {
            *rzr = h;
        }
        let z = a.z.mul(&h);
        Jacobian::add_finish(&u1, &s1, &h, &i, z)
    }

    /// Adds the affine point `b` whose coordinates were produced with the
    /// global `Z` of a table; `bzinv` is the inverse of that `Z`.
    pub fn add_zinv_var(&self, b: &Affine, bzinv: &Field) -> Jacobian {
        let a = self;
        if b.infinity {
            return *a;
        }
        if a.infinity {
            let bzinv2 = bzinv.sqr();
            let bzinv3 = bzinv2.mul(bzinv);
            return Jacobian {
                x: b.x.mul(&bzinv2),
                y: b.y.mul(&bzinv3),
                z: Field::ONE,
                infinity: false,
            };
        }
        let az = a.z.mul(bzinv);
        let z12 = az.sqr();
        let mut u1 = a.x;
        u1.normalize_weak();
        let u2 = b.x.mul(&z12);
        let mut s1 = a.y;
        s1.normalize_weak();
        let s2 = b.y.mul(&z12).mul(&az);
        let h = u1.neg(1) + u2;
        let i = s1.neg(1) + s2;
        if h.normalizes_to_zero_var() {
            if i.normalizes_to_zero_var() {
                return a.double_var(None);
            }
            return Jacobian::INFINITY;
        }
        let z = a.z.mul(&h);
        Jacobian::add_finish(&u1, &s1, &h, &i, z)
    }

    /// The tail shared by the variable-time additions once `Z` is known.
    fn add_finish(u1: &Field, s1: &Field, h: &Field, i: &Field, z: Field) -> Jacobian {
        let i2 = i.sqr();
        let h2 = h.sqr();
        let h3 = h.mul(&h2);
        let t = u1.mul(&h2);
        let mut x = t;
        x.mul_int(2);
        x += h3;
        x = x.neg(3);
        x += i2;
        let mut y = x.neg(5);
        y += t;
        y = y.mul(i);
        y += h3.neg(1).mul(s1);
        Jacobian {
            x,
            y,
            z,
            infinity: false,
        }
    }

    /// Adds a non-infinity affine point in constant time.
    ///
    /// Complete for every input, including `a == b`, `a == -b` and the case
    /// where `x(a)³ == x(b)³` with `x(a) != x(b)`.
    pub fn add_ge(&self, b: &Affine) -> Jacobian {
        debug_assert!(!b.infinity);
        let a = self;
        let a_infinity = Choice::from(a.infinity as u8);

        let zz = a.z.sqr();
        let mut u1 = a.x;
        u1.normalize_weak();
        let u2 = b.x.mul(&zz);
        let mut s1 = a.y;
        s1.normalize_weak();
        let s2 = b.y.mul(&zz).mul(&a.z);
        let mut t = u1 + u2;
        let m = s1 + s2;
        let mut rr = t.sqr();
        let mut m_alt = u2.neg(1);
        let tt = u1.mul(&m_alt);
        rr += tt;

        // R/M is 0/0 only when y1 = -y2 and x1 = β·x2 (or the reverse); the
        // alternative (y1 - y2)/(x1 - x2) is well defined there
        let degenerate = Choice::from((m.normalizes_to_zero() & rr.normalizes_to_zero()) as u8);
        let mut rr_alt = s1;
        rr_alt.mul_int(2);
        m_alt += u1;

        rr_alt.cmov(&rr, !degenerate);
        m_alt.cmov(&m, !degenerate);

        let mut n = m_alt.sqr();
        let mut q = n.mul(&t);
        // either M == Malt or M == 0, so M³·Malt is Malt⁴ or zero
        n = n.sqr();
        n.cmov(&m, degenerate);
        t = rr_alt.sqr();
        let mut z = a.z.mul(&m_alt);
        let infinity = z.normalizes_to_zero() & !a.infinity;
        z.mul_int(2);
        q = q.neg(1);
        t += q;
        t.normalize_weak();
        let mut x = t;
        t.mul_int(2);
        t += q;
        t = t.mul(&rr_alt);
        t += n;
        let mut y = t.neg(3);
        y.normalize_weak();
        x.mul_int(4);
        y.mul_int(4);

        x.cmov(&b.x, a_infinity);
        y.cmov(&b.y, a_infinity);
        z.cmov(&Field::ONE, a_infinity);

        Jacobian { x, y, z, infinity }
    }

    /// Sets `self` to `other` when `flag` is set, without branching.
    pub fn cmov(&mut self, other: &Jacobian, flag: Choice) {
        self.x.cmov(&other.x, flag);
        self.y.cmov(&other.y, flag);
        self.z.cmov(&other.z, flag);
        let infinity = u8::conditional_select(&(self.infinity as u8), &(other.infinity as u8), flag);
        self.infinity = infinity == 1;
    }

    /// Converts to affine for a public point.
    pub fn to_affine_var(&self) -> Affine {
        Affine::from_jacobian_var(self)
    }
}
