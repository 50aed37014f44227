//! Constant-time multiplication of an arbitrary point by a secret scalar.
use super::{
    WINDOW_A, odd_multiples_table, table_size,
    wnaf::{wnaf_const, wnaf_const_len},
};
use crate::{
    Scalar,
    field::Field,
    group::{Affine, Jacobian},
};
use subtle::{Choice, ConstantTimeEq};

const TABLE_SIZE: usize = table_size(WINDOW_A);
const WNAF_LEN: usize = wnaf_const_len(128, WINDOW_A - 1);

/// Brings a table of Jacobian points with known successive `Z` ratios onto
/// a single shared `Z`, returned as the second element. The affine
/// coordinates are only meaningful on the curve isomorphism given by that
/// `Z`.
fn globalz_set_table_gej(
    a: &[Jacobian; TABLE_SIZE],
    zr: &[Field; TABLE_SIZE],
) -> ([Affine; TABLE_SIZE], Field) {
    let mut r = [Affine::INFINITY; TABLE_SIZE];
    let mut i = TABLE_SIZE - 1;
    r[i] = Affine::new(a[i].x, a[i].y);
    r[i].y.normalize_weak();
    let globalz = a[i].z;
    let mut zs = zr[i];
    while i > 0 {
        if i != TABLE_SIZE - 1 {
            zs = zs.mul(&zr[i]);
        }
        i -= 1;
        r[i] = Affine::from_jacobian_zinv(&a[i], &zs);
    }
    (r, globalz)
}

/// Reads the entry for the odd digit `n` out of `pre` without branching or
/// indexing on `n`, negating it when `n` is negative.
fn table_get(pre: &[Affine; TABLE_SIZE], n: i32) -> Affine {
    debug_assert!(n & 1 == 1);
    debug_assert!(n.unsigned_abs() < (1 << (WINDOW_A - 1)));
    let mask = n >> 31;
    let abs_n = (n ^ mask) - mask;
    let idx_n = (abs_n >> 1) as u32;

    let mut r = Affine::new(pre[0].x, pre[0].y);
    for (m, entry) in pre.iter().enumerate().skip(1) {
        let hit = (m as u32).ct_eq(&idx_n);
        r.x.cmov(&entry.x, hit);
        r.y.cmov(&entry.y, hit);
    }
    let neg_y = r.y.neg(1);
    r.y.cmov(&neg_y, Choice::from((mask & 1) as u8));
    r
}

/// Computes `q·A` in constant time with respect to `q`.
///
/// `q` (or its negation) must fit in `size` bits. Above 128 bits the scalar
/// is split with [`Scalar::split_lambda`] and both halves run through one
/// shared doubling chain. `a` must not be infinity.
pub fn ecmult_const(a: &Affine, q: &Scalar, size: usize) -> Jacobian {
    debug_assert!(!a.infinity);
    let mut wnaf_1 = [0i32; WNAF_LEN];
    let mut wnaf_lam = [0i32; WNAF_LEN];
    let split = size > 128;

    let (rsize, skew_1, skew_lam) = if split {
        let (q_1, q_lam) = q.split_lambda();
        let skew_1 = wnaf_const(&mut wnaf_1, &q_1, WINDOW_A - 1, 128);
        let skew_lam = wnaf_const(&mut wnaf_lam, &q_lam, WINDOW_A - 1, 128);
        (128, skew_1, skew_lam)
    } else {
        (size, wnaf_const(&mut wnaf_1, q, WINDOW_A - 1, size), 0)
    };

    // Every table entry shares the same Z, so the additions below run on the
    // isomorphic curve where that Z is 1 and the result is scaled back once.
    let mut prej = [Jacobian::INFINITY; TABLE_SIZE];
    let mut zr = [Field::ZERO; TABLE_SIZE];
    odd_multiples_table(&mut prej, &mut zr, &Jacobian::from_affine(a));
    let (pre_a, z) = globalz_set_table_gej(&prej, &zr);
    let mut pre_a_lam = [Affine::INFINITY; TABLE_SIZE];
    if split {
        for (lam, entry) in pre_a_lam.iter_mut().zip(pre_a.iter()) {
            *lam = entry.mul_lambda();
        }
    }

    let top = rsize.div_ceil(WINDOW_A - 1);
    let mut r = Jacobian::from_affine(&table_get(&pre_a, wnaf_1[top]));
    if split {
        r = r.add_ge(&table_get(&pre_a_lam, wnaf_lam[top]));
    }
    for i in (0..top).rev() {
        for _ in 0..WINDOW_A - 1 {
            r = r.double();
        }
        r = r.add_ge(&table_get(&pre_a, wnaf_1[i]));
        if split {
            r = r.add_ge(&table_get(&pre_a_lam, wnaf_lam[i]));
        }
    }
    r.z = r.z.mul(&z);

    // remove the skew: subtract a for a skew of 1 or 2a for a skew of 2
    let a2 = Affine::from_jacobian(&Jacobian::from_affine(a).double_var(None));
    let a_stor = a.to_storage();
    let a2_stor = a2.to_storage();
    let mut correction_1 = a_stor;
    correction_1.cmov(&a2_stor, Choice::from((skew_1 == 2) as u8));
    r = r.add_ge(&Affine::from_storage(&correction_1).neg());
    if split {
        let mut correction_lam = a_stor;
        correction_lam.cmov(&a2_stor, Choice::from((skew_lam == 2) as u8));
        r = r.add_ge(&Affine::from_storage(&correction_lam).neg().mul_lambda());
    }
    r
}
