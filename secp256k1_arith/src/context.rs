use crate::ecmult::{ECMultContext, generator::ECMultGenContext};
use digest::generic_array::typenum::U32;

/// The precomputed tables every scalar multiplication by `G` reads from.
///
/// Building one is expensive and takes about 1 MiB of memory. After
/// construction it is only ever read, so one instance can be shared by
/// reference across threads. [`Context::global`] gives a process-wide one.
#[derive(Clone, Debug, Default)]
pub struct Context {
    /// Tables for variable-time `na·A + ng·G`.
    pub mult: ECMultContext,
    /// The comb for constant-time `k·G`.
    pub generator: ECMultGenContext,
}

impl Context {
    /// Builds both tables.
    pub fn new() -> Self {
        Context {
            mult: ECMultContext::new(),
            generator: ECMultGenContext::new(),
        }
    }

    /// Rerandomizes the blinding of the `k·G` computation. See
    /// [`ECMultGenContext::blind`].
    pub fn randomize<H>(&mut self, seed: &[u8; 32])
    where
        H: Default + digest::Update + digest::FixedOutput<OutputSize = U32>,
    {
        self.generator.blind::<H>(seed)
    }

    /// A lazily built, never mutated, process-wide context.
    #[cfg(feature = "std")]
    pub fn global() -> &'static Context {
        static GLOBAL: std::sync::OnceLock<Context> = std::sync::OnceLock::new();
        GLOBAL.get_or_init(Context::new)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Scalar, group::G};
    use sha2::Sha256;

    #[test]
    fn global_is_shared() {
        assert!(core::ptr::eq(Context::global(), Context::global()));
    }

    #[test]
    fn randomized_context_agrees() {
        let mut ctx = Context::global().clone();
        ctx.randomize::<Sha256>(&[42u8; 32]);
        let k = Scalar::from_int(77);
        let expected = Context::global().generator.ecmult_gen(&k).to_affine_var();
        assert_eq!(ctx.generator.ecmult_gen(&k).to_affine_var(), expected);
        let via_mult = ctx
            .mult
            .ecmult(&crate::Jacobian::from_affine(&G), &k, &Scalar::ZERO)
            .to_affine_var();
        assert_eq!(via_mult, expected);
    }
}
