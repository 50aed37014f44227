//! Bitcoin compatible ECDSA on top of [`secp256k1_arith`].
//!
//! ```
//! use secp256k1_arith::{Context, eckey::SecretKey};
//! use secp256k1_ecdsa::{ECDSA, nonce::{Derivation, NonceHash}};
//!
//! let ctx = Context::global();
//! let secret_key = SecretKey::from_bytes(&[42u8; 32]).unwrap();
//! let public_key = secret_key.public_key(ctx);
//! let ecdsa = ECDSA::new(NonceHash::<sha2::Sha256>::from_tag(b"my-app"));
//! let message = [7u8; 32];
//! let signature = ecdsa.sign(ctx, &secret_key, &message, Derivation::Deterministic);
//! assert!(ecdsa.verify(ctx, &public_key, &message, &signature));
//! ```
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

pub use secp256k1_arith;
use secp256k1_arith::{
    Affine, Context, Jacobian, Scalar,
    digest::{FixedOutput, Update, generic_array::typenum::U32},
    eckey::{PublicKey, SecretKey},
    ecmult::ECMultContext,
    field::Field,
};

pub mod der;
pub mod nonce;
mod signature;
pub use signature::Signature;

#[cfg(feature = "libsecp_compat")]
mod libsecp_compat;

use nonce::{Derivation, NonceGen, NonceHash};

/// The group order as a field element.
const ORDER_AS_FE: Field = Field::new(
    0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFE, 0xBAAEDCE6, 0xAF48A03B, 0xBFD25E8C, 0xD0364141,
);

/// `p - n`. An `r` below this may be the reduction of an `x` at or above `n`.
const P_MINUS_ORDER: Field = Field::new(
    0, 0, 0, 1, 0x45512319, 0x50B75FC4, 0x402DA172, 0x2FC9BAEE,
);

/// Checks `(r, s)` against `public_key` and the message scalar.
///
/// This is the bare verification equation. It does not look at whether `s`
/// is low. Variable time: every input is public.
pub fn sig_verify(
    ctx: &ECMultContext,
    r: &Scalar,
    s: &Scalar,
    public_key: &Affine,
    message: &Scalar,
) -> bool {
    if r.is_zero() || s.is_zero() {
        secp256k1_arith::debug_event!("rejected signature with a zero component");
        return false;
    }
    let sn = s.inv_var();
    let u1 = sn.mul(message);
    let u2 = sn.mul(r);
    let pr = ctx.ecmult(&Jacobian::from_affine(public_key), &u2, &u1);
    if pr.is_infinity() {
        secp256k1_arith::debug_event!("rejected signature whose nonce point is infinity");
        return false;
    }

    // r < n < p so this never fails
    let Some(mut xr) = Field::from_bytes(&r.to_bytes()) else {
        return false;
    };
    if pr.eq_x_var(&xr) {
        return true;
    }
    // x(R) may have been reduced mod n. That is only possible when r + n < p.
    if xr.cmp_var(&P_MINUS_ORDER) != core::cmp::Ordering::Less {
        secp256k1_arith::debug_event!("rejected signature whose r does not match");
        return false;
    }
    xr += &ORDER_AS_FE;
    let matched = pr.eq_x_var(&xr);
    if !matched {
        secp256k1_arith::debug_event!("rejected signature whose r does not match");
    }
    matched
}

/// An instance of the ECDSA signature scheme.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ECDSA<NH = ()> {
    /// Produces signing nonces. `()` for an instance that only verifies.
    pub nonce_hash: NH,
    /// Whether [`verify`] rejects signatures with a high `s` (see [BIP-146]).
    ///
    /// [`verify`]: ECDSA::verify
    /// [BIP-146]: https://github.com/bitcoin/bips/blob/master/bip-0146.mediawiki#low_s
    pub enforce_low_s: bool,
}

impl ECDSA<()> {
    /// Creates an instance that can verify signatures but not make them.
    pub fn verify_only() -> Self {
        ECDSA {
            nonce_hash: (),
            enforce_low_s: false,
        }
    }
}

impl<NH> ECDSA<NH> {
    /// Creates an instance that derives nonces with `nonce_hash`.
    pub fn new(nonce_hash: NH) -> Self {
        ECDSA {
            nonce_hash,
            enforce_low_s: false,
        }
    }

    /// Turns on the [BIP-146] low `s` rule for verification.
    ///
    /// [BIP-146]: https://github.com/bitcoin/bips/blob/master/bip-0146.mediawiki#low_s
    pub fn enforce_low_s(self) -> Self {
        ECDSA {
            nonce_hash: self.nonce_hash,
            enforce_low_s: true,
        }
    }

    /// Verifies a signature on a 32-byte message hash.
    pub fn verify(
        &self,
        ctx: &Context,
        public_key: &PublicKey,
        message: &[u8; 32],
        signature: &Signature,
    ) -> bool {
        if self.enforce_low_s && signature.s.is_high() {
            secp256k1_arith::debug_event!("rejected signature with a high s");
            return false;
        }
        let m = Scalar::from_bytes_mod_order(message);
        sig_verify(
            &ctx.mult,
            &signature.r,
            &signature.s,
            public_key.as_affine(),
            &m,
        )
    }

    /// Signs `message` with a caller provided nonce.
    ///
    /// Returns `None` when the nonce is zero or when `r` or `s` would be
    /// zero. The returned `s` is always low. The nonce must be secret,
    /// uniformly random and never reused.
    pub fn sign_with_nonce(
        ctx: &Context,
        secret_key: &SecretKey,
        message: &Scalar,
        nonce: &Scalar,
    ) -> Option<Signature> {
        if nonce.is_zero() {
            return None;
        }
        let nonce_point = Affine::from_jacobian(&ctx.generator.ecmult_gen(nonce));
        let r = Scalar::from_bytes_mod_order(&nonce_point.x.to_bytes());
        if r.is_zero() {
            return None;
        }
        let n = r.mul(secret_key.as_scalar()) + message;
        let mut s = nonce.inv().mul(&n);
        if s.is_zero() {
            return None;
        }
        // (r, s) and (r, -s) are both valid so always pick the low one
        let high = s.is_high();
        s.cond_neg(high);
        Some(Signature { r, s })
    }
}

impl<H> ECDSA<NonceHash<H>>
where
    H: Default + Clone + Update + FixedOutput<OutputSize = U32>,
{
    /// Creates a signing instance whose nonces are separated by `tag`.
    pub fn from_tag(tag: &[u8]) -> Self {
        ECDSA::new(NonceHash::from_tag(tag))
    }
}

impl<NG: NonceGen> ECDSA<NG> {
    /// Signs a 32-byte message hash with a nonce derived from the secret
    /// key and the message.
    ///
    /// With [`Derivation::Deterministic`] the same key and message always
    /// give the same signature.
    pub fn sign(
        &self,
        ctx: &Context,
        secret_key: &SecretKey,
        message: &[u8; 32],
        derivation: Derivation,
    ) -> Signature {
        let m = Scalar::from_bytes_mod_order(message);
        let mut counter = 0u32;
        loop {
            let nonce =
                self.nonce_hash
                    .derive(&derivation, secret_key.as_scalar(), message, counter);
            if let Some(signature) = Self::sign_with_nonce(ctx, secret_key, &m, &nonce) {
                return signature;
            }
            counter = counter.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::RngCore;
    use secp256k1_arith::{G, TEST_SOUNDNESS};
    use sha2::Sha256;

    fn ecdsa() -> ECDSA<NonceHash<Sha256>> {
        ECDSA::from_tag(b"test")
    }

    fn random_keypair() -> (SecretKey, PublicKey) {
        let secret_key = loop {
            if let Ok(sk) = SecretKey::from_scalar(Scalar::random(&mut rand::thread_rng())) {
                break sk;
            }
        };
        let public_key = secret_key.public_key(Context::global());
        (secret_key, public_key)
    }

    #[test]
    fn repeated_sign_and_verify() {
        let ctx = Context::global();
        let ecdsa = ecdsa();
        for _ in 0..TEST_SOUNDNESS {
            let mut message = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut message);
            let (secret_key, public_key) = random_keypair();
            let sig = ecdsa.sign(ctx, &secret_key, &message, Derivation::Deterministic);
            assert!(sig.is_low_s());
            assert!(ecdsa.verify(ctx, &public_key, &message, &sig));
            assert!(ECDSA::verify_only().verify(ctx, &public_key, &message, &sig));
        }
    }

    #[test]
    fn deterministic_and_aux_nonces() {
        let ctx = Context::global();
        let ecdsa = ecdsa();
        let (secret_key, public_key) = random_keypair();
        let message = [3u8; 32];
        let a = ecdsa.sign(ctx, &secret_key, &message, Derivation::Deterministic);
        let b = ecdsa.sign(ctx, &secret_key, &message, Derivation::Deterministic);
        let c = ecdsa.sign(ctx, &secret_key, &message, Derivation::Aux([1u8; 32]));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(ecdsa.verify(ctx, &public_key, &message, &c));
    }

    #[test]
    fn rfc6979_signatures_verify() {
        let ctx = Context::global();
        let ecdsa = ECDSA::new(nonce::Rfc6979::<Sha256>::default()).enforce_low_s();
        let (secret_key, public_key) = random_keypair();
        let message = [5u8; 32];
        let sig = ecdsa.sign(ctx, &secret_key, &message, Derivation::Deterministic);
        assert_eq!(sig, ecdsa.sign(ctx, &secret_key, &message, Derivation::Deterministic));
        assert!(ecdsa.verify(ctx, &public_key, &message, &sig));
    }

    #[test]
    fn low_s() {
        let ctx = Context::global();
        let ecdsa = ecdsa();
        let ecdsa_enforce_low_s = ecdsa.clone().enforce_low_s();
        for _ in 0..TEST_SOUNDNESS {
            let mut message = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut message);
            let (secret_key, public_key) = random_keypair();
            let mut sig = ecdsa.sign(ctx, &secret_key, &message, Derivation::Deterministic);
            assert!(ecdsa_enforce_low_s.verify(ctx, &public_key, &message, &sig));
            sig.s = -sig.s;
            assert!(!ecdsa_enforce_low_s.verify(ctx, &public_key, &message, &sig));
            assert!(ecdsa.verify(ctx, &public_key, &message, &sig));
        }
    }

    #[test]
    fn bit_flips_are_rejected() {
        let ctx = Context::global();
        let ecdsa = ecdsa();
        let (secret_key, public_key) = random_keypair();
        let message = [9u8; 32];
        let sig = ecdsa.sign(ctx, &secret_key, &message, Derivation::Deterministic);
        for bit in (0..256).step_by(7) {
            let mut flipped = message;
            flipped[bit / 8] ^= 1 << (bit % 8);
            assert!(!ecdsa.verify(ctx, &public_key, &flipped, &sig));

            let mut compact = sig.to_compact();
            compact[bit / 8] ^= 1 << (bit % 8);
            if let Some(bad) = Signature::from_compact(&compact) {
                assert!(!ecdsa.verify(ctx, &public_key, &message, &bad));
            }
        }
        let other = random_keypair().1;
        assert!(!ecdsa.verify(ctx, &other, &message, &sig));
    }

    #[test]
    fn zero_components_are_rejected() {
        // d = 1 so the public key is G
        let ctx = Context::global();
        let secret_key = SecretKey::from_scalar(Scalar::ONE).unwrap();
        let public_key = secret_key.public_key(ctx);
        assert_eq!(public_key.as_affine(), &G);
        let m = Scalar::new(1, 2, 3, 4, 5, 6, 7, 8);
        let nonce = Scalar::from_int(5);
        let sig = ECDSA::<()>::sign_with_nonce(ctx, &secret_key, &m, &nonce).unwrap();
        assert!(sig_verify(&ctx.mult, &sig.r, &sig.s, &G, &m));
        assert!(!sig_verify(&ctx.mult, &Scalar::ZERO, &sig.s, &G, &m));
        assert!(!sig_verify(&ctx.mult, &sig.r, &Scalar::ZERO, &G, &m));
        assert!(!sig_verify(&ctx.mult, &sig.r, &sig.s, &G, &m.negate()));
    }

    #[test]
    fn sign_with_nonce_matches_equation() {
        let ctx = Context::global();
        let (secret_key, public_key) = random_keypair();
        let m = Scalar::random(&mut rand::thread_rng());
        let k = Scalar::random(&mut rand::thread_rng());
        let sig = ECDSA::<()>::sign_with_nonce(ctx, &secret_key, &m, &k).unwrap();
        // k·s = m + r·d up to the sign of s
        let lhs = k.mul(&sig.s);
        let rhs = m + sig.r.mul(secret_key.as_scalar());
        assert!(lhs == rhs || lhs == rhs.negate());
        assert!(sig_verify(&ctx.mult, &sig.r, &sig.s, public_key.as_affine(), &m));
        assert!(ECDSA::<()>::sign_with_nonce(ctx, &secret_key, &m, &Scalar::ZERO).is_none());
    }

    #[test]
    fn order_constants_sum_to_p() {
        assert!((ORDER_AS_FE + &P_MINUS_ORDER).normalizes_to_zero_var());
        assert_eq!(
            Field::from_int(1).cmp_var(&P_MINUS_ORDER),
            core::cmp::Ordering::Less
        );
        assert_eq!(
            ORDER_AS_FE.cmp_var(&P_MINUS_ORDER),
            core::cmp::Ordering::Greater
        );
    }
}
