//! Strauss' interleaved multi-scalar multiplication over wNAF digits.
use super::{ECMultContext, WINDOW_A, WINDOW_G, odd_multiples_var, table_size, wnaf::wnaf_var};
use crate::{
    Scalar,
    group::{Affine, AffineStorage, Jacobian},
};
use alloc::vec::Vec;

const TABLE_SIZE_A: usize = table_size(WINDOW_A);
/// Digits for a λ-split half: up to 129 bits once a negative half is negated,
/// plus the final carry.
const WNAF_LEN_SPLIT: usize = 130;
/// Digits for a 128-bit half of the generator scalar.
const WNAF_LEN_G: usize = 129;

/// The wNAF digits of one input scalar after splitting it with λ.
struct StraussPointState {
    wnaf_na_1: [i32; WNAF_LEN_SPLIT],
    wnaf_na_lam: [i32; WNAF_LEN_SPLIT],
    bits_na_1: usize,
    bits_na_lam: usize,
}

impl StraussPointState {
    fn new(na: &Scalar) -> Self {
        let (na_1, na_lam) = na.split_lambda();
        let mut state = StraussPointState {
            wnaf_na_1: [0; WNAF_LEN_SPLIT],
            wnaf_na_lam: [0; WNAF_LEN_SPLIT],
            bits_na_1: 0,
            bits_na_lam: 0,
        };
        state.bits_na_1 = wnaf_var(&mut state.wnaf_na_1, &na_1, WINDOW_A);
        state.bits_na_lam = wnaf_var(&mut state.wnaf_na_lam, &na_lam, WINDOW_A);
        state
    }

    fn bits(&self) -> usize {
        self.bits_na_1.max(self.bits_na_lam)
    }
}

/// The entry for the odd digit `n`, negated when `n` is negative.
fn table_get_ge(pre: &[Affine], n: i32) -> Affine {
    debug_assert!(n & 1 == 1);
    if n > 0 {
        pre[((n - 1) / 2) as usize]
    } else {
        pre[((-n - 1) / 2) as usize].neg()
    }
}

fn table_get_ge_storage(pre: &[AffineStorage], n: i32) -> Affine {
    debug_assert!(n & 1 == 1);
    if n > 0 {
        Affine::from_storage(&pre[((n - 1) / 2) as usize])
    } else {
        Affine::from_storage(&pre[((-n - 1) / 2) as usize]).neg()
    }
}

/// Computes `Σ scalars[i]·points[i] + ng·G` with one shared doubling chain.
///
/// Points at infinity and zero scalars are skipped. Every point's odd
/// multiples are converted to affine together with a single inversion.
pub(crate) fn ecmult_strauss_wnaf(
    ctx: &ECMultContext,
    points: &[Jacobian],
    scalars: &[Scalar],
    ng: Option<&Scalar>,
) -> Jacobian {
    let mut states = Vec::with_capacity(points.len());
    let mut prej = Vec::with_capacity(points.len() * TABLE_SIZE_A);
    let mut bits = 0;

    for (a, na) in points.iter().zip(scalars) {
        if a.infinity || na.is_zero() {
            continue;
        }
        let state = StraussPointState::new(na);
        bits = bits.max(state.bits());
        prej.extend(odd_multiples_var(a, TABLE_SIZE_A));
        states.push(state);
    }
    let pre_a = Affine::set_all_gej_var(&prej);
    let pre_a_lam: Vec<Affine> = pre_a.iter().map(Affine::mul_lambda).collect();

    let mut wnaf_ng_1 = [0i32; WNAF_LEN_G];
    let mut wnaf_ng_128 = [0i32; WNAF_LEN_G];
    let mut bits_ng_1 = 0;
    let mut bits_ng_128 = 0;
    if let Some(ng) = ng {
        let (ng_1, ng_128) = ng.split_128();
        bits_ng_1 = wnaf_var(&mut wnaf_ng_1, &ng_1, WINDOW_G);
        bits_ng_128 = wnaf_var(&mut wnaf_ng_128, &ng_128, WINDOW_G);
        bits = bits.max(bits_ng_1).max(bits_ng_128);
    }

    let mut r = Jacobian::INFINITY;
    for i in (0..bits).rev() {
        r = r.double_var(None);
        for (np, state) in states.iter().enumerate() {
            let table = np * TABLE_SIZE_A..(np + 1) * TABLE_SIZE_A;
            if i < state.bits_na_1 && state.wnaf_na_1[i] != 0 {
                let p = table_get_ge(&pre_a[table.clone()], state.wnaf_na_1[i]);
                r = r.add_ge_var(&p, None);
            }
            if i < state.bits_na_lam && state.wnaf_na_lam[i] != 0 {
                let p = table_get_ge(&pre_a_lam[table], state.wnaf_na_lam[i]);
                r = r.add_ge_var(&p, None);
            }
        }
        if i < bits_ng_1 && wnaf_ng_1[i] != 0 {
            r = r.add_ge_var(&table_get_ge_storage(&ctx.pre_g, wnaf_ng_1[i]), None);
        }
        if i < bits_ng_128 && wnaf_ng_128[i] != 0 {
            r = r.add_ge_var(&table_get_ge_storage(&ctx.pre_g_128, wnaf_ng_128[i]), None);
        }
    }
    r
}
