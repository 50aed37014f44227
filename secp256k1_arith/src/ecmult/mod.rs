//! Scalar multiplication.
//!
//! - [`ECMultContext`] computes `na·A + ng·G` (and sums over many points)
//!   in variable time for public inputs.
//! - [`constant::ecmult_const`] computes `q·A` in constant time.
//! - [`generator::ECMultGenContext`] computes `k·G` in constant time.
pub mod constant;
pub mod generator;
mod strauss;
pub mod wnaf;

use crate::{
    Scalar,
    field::Field,
    group::{Affine, AffineStorage, G, Jacobian},
};
use alloc::vec::Vec;

/// Window width used for the odd-multiples tables of arbitrary points.
pub const WINDOW_A: usize = 5;
/// Window width of the precomputed tables for `G` and `2^128·G`.
pub const WINDOW_G: usize = 15;

/// The number of odd multiples `P, 3P, ..., (2^(w-1) - 1)P` a window of
/// width `w` needs.
pub const fn table_size(w: usize) -> usize {
    1 << (w - 2)
}

/// Fills `prej` with the odd multiples of `a` on the curve isomorphism where
/// `2a` is affine, and `zr` with the ratio between successive `Z`s. Only the
/// last entry carries its true `Z`.
pub(crate) fn odd_multiples_table(prej: &mut [Jacobian], zr: &mut [Field], a: &Jacobian) {
    debug_assert!(!prej.is_empty() && prej.len() == zr.len());
    debug_assert!(!a.infinity);
    let d = a.double_var(None);
    let d_ge = Affine::new(d.x, d.y);
    let a_ge = Affine::from_jacobian_zinv(a, &d.z);
    prej[0] = Jacobian {
        x: a_ge.x,
        y: a_ge.y,
        z: a.z,
        infinity: false,
    };
    zr[0] = d.z;
    for i in 1..prej.len() {
        prej[i] = prej[i - 1].add_ge_var(&d_ge, Some(&mut zr[i]));
    }
    let last = prej.len() - 1;
    prej[last].z = prej[last].z.mul(&d.z);
}

/// The odd multiples `a, 3a, 5a, ...` in Jacobian coordinates.
pub(crate) fn odd_multiples_var(a: &Jacobian, n: usize) -> Vec<Jacobian> {
    let d = a.double_var(None);
    let mut prej = Vec::with_capacity(n);
    let mut acc = *a;
    for _ in 0..n {
        prej.push(acc);
        acc = acc.add_var(&d, None);
    }
    prej
}

/// Precomputed odd multiples of `G` and `2^128·G` for [`WINDOW_G`].
#[derive(Clone)]
pub struct ECMultContext {
    pre_g: Vec<AffineStorage>,
    pre_g_128: Vec<AffineStorage>,
}

impl core::fmt::Debug for ECMultContext {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ECMultContext")
            .field("table_size", &self.pre_g.len())
            .finish()
    }
}

impl Default for ECMultContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ECMultContext {
    /// Builds both generator tables.
    pub fn new() -> Self {
        let g = Jacobian::from_affine(&G);
        let mut g_128 = g;
        for _ in 0..128 {
            g_128 = g_128.double_var(None);
        }
        let to_storage = |base: &Jacobian| -> Vec<AffineStorage> {
            Affine::set_all_gej_var(&odd_multiples_var(base, table_size(WINDOW_G)))
                .iter()
                .map(Affine::to_storage)
                .collect()
        };
        let ctx = ECMultContext {
            pre_g: to_storage(&g),
            pre_g_128: to_storage(&g_128),
        };
        crate::debug_event!(
            window = WINDOW_G,
            entries = ctx.pre_g.len() + ctx.pre_g_128.len(),
            "built generator multiplication tables"
        );
        ctx
    }

    /// Computes `na·a + ng·G`. Variable time: only use with public inputs.
    pub fn ecmult(&self, a: &Jacobian, na: &Scalar, ng: &Scalar) -> Jacobian {
        strauss::ecmult_strauss_wnaf(
            self,
            core::slice::from_ref(a),
            core::slice::from_ref(na),
            Some(ng),
        )
    }

    /// Computes `Σ scalars[i]·points[i]`, plus `ng·G` when given. Variable
    /// time: only use with public inputs.
    ///
    /// # Panics
    ///
    /// If `points` and `scalars` differ in length.
    pub fn ecmult_multi_var(
        &self,
        points: &[Affine],
        scalars: &[Scalar],
        ng: Option<&Scalar>,
    ) -> Jacobian {
        assert_eq!(
            points.len(),
            scalars.len(),
            "every point needs exactly one scalar"
        );
        let points: Vec<Jacobian> = points.iter().map(Jacobian::from_affine).collect();
        strauss::ecmult_strauss_wnaf(self, &points, scalars, ng)
    }
}
