//! Strategies for property-based testing with [`proptest`].
//!
//! [`proptest`]: https://github.com/altsysrq/proptest
use crate::{Scalar, group::Affine};
use ::proptest::prelude::*;

prop_compose! {
    /// Generate a random `Scalar`.
    pub fn scalar()(
        bytes in any::<[u8; 32]>(),
    ) -> Scalar {
        Scalar::from_bytes_mod_order(&bytes)
    }
}

prop_compose! {
    /// Generate a random, non-zero `Scalar`.
    pub fn non_zero_scalar()(
        scalar in scalar().prop_filter("Value cannot be zero", |s| !s.is_zero()),
    ) -> Scalar {
        scalar
    }
}

prop_compose! {
    /// Generate a random point that is not infinity.
    pub fn point()(
        point in any::<Affine>(),
    ) -> Affine {
        point
    }
}

#[cfg(feature = "std")]
prop_compose! {
    /// Generate a random public key together with its secret key.
    pub fn keypair()(
        x in non_zero_scalar(),
    ) -> (crate::eckey::SecretKey, crate::eckey::PublicKey) {
        // x is never zero
        let sk = crate::eckey::SecretKey::from_scalar(x).unwrap_or_else(|_| unreachable!());
        (sk, sk.public_key(crate::Context::global()))
    }
}
