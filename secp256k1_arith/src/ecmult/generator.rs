//! Constant-time multiplication of the generator.
//!
//! The scalar is read in [`COMB_BLOCKS`] windows of [`COMB_TEETH`] bits. Each
//! window selects one of 16 precomputed points with `cmov` over the whole
//! row, so neither the memory access pattern nor the number of additions
//! depends on the scalar.
use crate::{
    Scalar,
    field::Field,
    group::{Affine, AffineStorage, G, Jacobian},
};
use alloc::vec::Vec;
use digest::generic_array::typenum::U32;
use subtle::{Choice, ConstantTimeEq};

/// The number of scalar bits consumed per row of the table.
pub const COMB_TEETH: usize = 4;
/// The number of rows in the table.
pub const COMB_BLOCKS: usize = 256 / COMB_TEETH;
const COMB_POINTS: usize = 1 << COMB_TEETH;

/// x-coordinate (lifted with an even y) of a point `U` with no known
/// discrete log. It offsets every row so no partial sum is a multiple of `G`
/// alone.
const NUMS_X: [u8; 32] = [
    0x50, 0x92, 0x9b, 0x74, 0xc1, 0xa0, 0x49, 0x54, 0xb7, 0x8b, 0x4b, 0x60, 0x35, 0xe9, 0x7a, 0x5e,
    0x07, 0x8a, 0x5a, 0x0f, 0x28, 0xec, 0x96, 0xd5, 0x47, 0xbf, 0xee, 0x9a, 0xce, 0x80, 0x3a, 0xc0,
];

const BLIND_TAG: &[u8] = b"secp256k1_arith/ecmult_gen/blind";

/// Precomputed comb for `k·G` together with the current blinding.
///
/// Row `j`, entry `i` holds `i·16^j·G + 2^j·U` (the last row subtracts every
/// earlier offset so the `U` terms sum to zero). The computation starts from
/// `initial = b·G` and adds the rows for `k - b`, so the intermediate points
/// are unrelated to `k`.
#[derive(Clone)]
pub struct ECMultGenContext {
    prec: Vec<[AffineStorage; COMB_POINTS]>,
    blind: Scalar,
    initial: Jacobian,
}

impl core::fmt::Debug for ECMultGenContext {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ECMultGenContext")
            .field("blocks", &self.prec.len())
            .finish_non_exhaustive()
    }
}

impl Default for ECMultGenContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ECMultGenContext {
    /// Builds the table with the default blinding (`b = 1`).
    pub fn new() -> Self {
        // the constant is a valid x-coordinate
        let nums = Field::from_bytes(&NUMS_X)
            .and_then(|x| Affine::set_xo_var(&x, false))
            .map(|p| Jacobian::from_affine(&p))
            .unwrap_or(Jacobian::INFINITY);
        debug_assert!(!nums.is_infinity());

        let mut gbase = Jacobian::from_affine(&G);
        let mut numsbase = nums;
        let mut precj = Vec::with_capacity(COMB_BLOCKS * COMB_POINTS);
        for j in 0..COMB_BLOCKS {
            let mut entry = numsbase;
            precj.push(entry);
            for _ in 1..COMB_POINTS {
                entry = entry.add_var(&gbase, None);
                precj.push(entry);
            }
            for _ in 0..COMB_TEETH {
                gbase = gbase.double_var(None);
            }
            numsbase = numsbase.double_var(None);
            if j == COMB_BLOCKS - 2 {
                // the last row carries -(2^(COMB_BLOCKS-1) - 1)·U
                numsbase = numsbase.neg().add_var(&nums, None);
            }
        }
        let prec_affine = Affine::set_all_gej_var(&precj);
        let prec = prec_affine
            .chunks_exact(COMB_POINTS)
            .map(|row| {
                let mut out = [AffineStorage::default(); COMB_POINTS];
                for (slot, point) in out.iter_mut().zip(row) {
                    *slot = point.to_storage();
                }
                out
            })
            .collect::<Vec<_>>();

        crate::debug_event!(
            blocks = COMB_BLOCKS,
            teeth = COMB_TEETH,
            "built generator comb table"
        );
        let mut ctx = ECMultGenContext {
            prec,
            blind: Scalar::ZERO,
            initial: Jacobian::INFINITY,
        };
        ctx.reset_blinding();
        ctx
    }

    /// Goes back to the default blinding: `b = 1`, so `initial = G`.
    pub fn reset_blinding(&mut self) {
        self.blind = Scalar::ONE.negate();
        self.initial = Jacobian::from_affine(&G);
    }

    /// Computes `gn·G` in constant time.
    pub fn ecmult_gen(&self, gn: &Scalar) -> Jacobian {
        let gnb = *gn + self.blind;
        let mut r = self.initial;
        let mut add = AffineStorage::default();
        for (j, row) in self.prec.iter().enumerate() {
            let bits = gnb.get_bits(j * COMB_TEETH, COMB_TEETH);
            for (i, entry) in row.iter().enumerate() {
                add.cmov(entry, (i as u32).ct_eq(&bits));
            }
            r = r.add_ge(&Affine::from_storage(&add));
        }
        r
    }

    /// Rerandomizes the blinding from `seed`.
    ///
    /// The new blinding depends on both `seed` and the current one, so
    /// calling this repeatedly only ever adds entropy. The starting point's
    /// projective representation is randomized as well.
    pub fn blind<H>(&mut self, seed: &[u8; 32])
    where
        H: Default + digest::Update + digest::FixedOutput<OutputSize = U32>,
    {
        let blind_bytes = self.blind.to_bytes();
        let hash = |round: u8| {
            H::default()
                .chain(BLIND_TAG)
                .chain([round])
                .chain(blind_bytes)
                .chain(seed)
        };

        let s_bytes: [u8; 32] = hash(0).finalize_fixed().into();
        let s_candidate = Field::from_bytes(&s_bytes);
        let mut s = s_candidate.unwrap_or(Field::ONE);
        let retry = Choice::from((s_candidate.is_none() | s.is_zero()) as u8);
        s.cmov(&Field::ONE, retry);
        self.initial.rescale(&s);

        let mut b = Scalar::from_hash(hash(1));
        let retry = Choice::from(b.is_zero() as u8);
        b.cmov(&Scalar::ONE, retry);
        let gb = self.ecmult_gen(&b);
        self.blind = -b;
        self.initial = gb;
    }
}
