//! Deterministic nonce derivation.
//!
//! [`NonceHash`] reads nonces out of a tagged hash over the secret key, the
//! message and a retry counter. [`Rfc6979`] is the HMAC-DRBG construction
//! libsecp256k1 and Bitcoin Core sign with. Mixing in fresh randomness with
//! [`Derivation::Aux`] keeps the nonce unpredictable even if the hash is not.
use core::marker::PhantomData;
use secp256k1_arith::{
    Scalar,
    digest::{FixedOutput, Update, generic_array::typenum::U32},
    rand_core::{CryptoRng, RngCore},
};

/// Hashes `tag` once and returns a hash with `H(tag) || H(tag)` already
/// absorbed (the construction from [BIP-340]).
///
/// [BIP-340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki
pub fn tagged_hash<H>(tag: &[&[u8]]) -> H
where
    H: Default + Update + FixedOutput<OutputSize = U32>,
{
    let mut tag_hash = H::default();
    for part in tag {
        tag_hash.update(part);
    }
    let hashed_tag = tag_hash.finalize_fixed();
    H::default().chain(&hashed_tag).chain(&hashed_tag)
}

/// How a nonce is derived.
#[derive(Clone, Debug, PartialEq)]
pub enum Derivation {
    /// Only the secret key and the message determine the nonce.
    Deterministic,
    /// The secret key is masked with the hash of these bytes first.
    Aux([u8; 32]),
}

impl Derivation {
    /// Draws auxiliary randomness from `rng`.
    pub fn rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut aux = [0u8; 32];
        rng.fill_bytes(&mut aux);
        Derivation::Aux(aux)
    }
}

/// Something that turns a secret key and a message into signing nonces.
pub trait NonceGen {
    /// Derives the nonce for the `counter`th attempt at signing `message`.
    ///
    /// A zero return makes the signer move on to the next counter.
    fn derive(
        &self,
        derivation: &Derivation,
        secret: &Scalar,
        message: &[u8; 32],
        counter: u32,
    ) -> Scalar;
}

/// A pair of tagged hashes for deriving nonces and masking auxiliary
/// randomness.
#[derive(Debug, Clone, PartialEq)]
pub struct NonceHash<H> {
    /// Prefixed hash the nonce is read out of.
    pub nonce_hash: H,
    /// Prefixed hash auxiliary randomness goes through.
    pub aux_hash: H,
}

impl<H> NonceHash<H>
where
    H: Default + Clone + Update + FixedOutput<OutputSize = U32>,
{
    /// Creates both hashes from an application tag.
    pub fn from_tag(tag: &[u8]) -> Self {
        Self {
            nonce_hash: tagged_hash(&[tag, b"/nonce"]),
            aux_hash: tagged_hash(&[tag, b"/aux"]),
        }
    }
}

impl<H> NonceGen for NonceHash<H>
where
    H: Default + Clone + Update + FixedOutput<OutputSize = U32>,
{
    fn derive(
        &self,
        derivation: &Derivation,
        secret: &Scalar,
        message: &[u8; 32],
        counter: u32,
    ) -> Scalar {
        let mut key = secret.to_bytes();
        if let Derivation::Aux(aux) = derivation {
            let mask = self.aux_hash.clone().chain(aux).finalize_fixed();
            for (byte, mask) in key.iter_mut().zip(mask.iter()) {
                *byte ^= mask;
            }
        }
        Scalar::from_hash(
            self.nonce_hash
                .clone()
                .chain(key)
                .chain(message)
                .chain(counter.to_be_bytes()),
        )
    }
}

impl<H> Default for NonceHash<H>
where
    H: Default + Clone + Update + FixedOutput<OutputSize = U32>,
{
    fn default() -> Self {
        NonceHash::from_tag(b"secp256k1_ecdsa")
    }
}

/// [RFC 6979] nonces the way libsecp256k1 derives them.
///
/// The DRBG is keyed with `secret || message`, plus the auxiliary bytes for
/// [`Derivation::Aux`]. The `counter`th attempt takes the `counter + 1`th
/// output, and an output at or above the order is returned as zero. `H` must
/// be a hash with 64 byte blocks such as SHA-256.
///
/// [RFC 6979]: https://datatracker.ietf.org/doc/html/rfc6979
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rfc6979<H>(PhantomData<H>);

impl<H> Default for Rfc6979<H> {
    fn default() -> Self {
        Rfc6979(PhantomData)
    }
}

fn hmac<H>(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 32]
where
    H: Default + Update + FixedOutput<OutputSize = U32>,
{
    let mut pad = [0x36u8; 64];
    for (byte, k) in pad.iter_mut().zip(key) {
        *byte ^= k;
    }
    let mut inner = H::default().chain(pad);
    for part in parts {
        inner.update(part);
    }
    let inner = inner.finalize_fixed();

    let mut pad = [0x5cu8; 64];
    for (byte, k) in pad.iter_mut().zip(key) {
        *byte ^= k;
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&H::default().chain(pad).chain(inner).finalize_fixed());
    out
}

impl<H> NonceGen for Rfc6979<H>
where
    H: Default + Update + FixedOutput<OutputSize = U32>,
{
    fn derive(
        &self,
        derivation: &Derivation,
        secret: &Scalar,
        message: &[u8; 32],
        counter: u32,
    ) -> Scalar {
        let secret = secret.to_bytes();
        let aux: &[u8] = match derivation {
            Derivation::Deterministic => &[],
            Derivation::Aux(aux) => aux,
        };
        let mut v = [0x01u8; 32];
        let mut k = [0x00u8; 32];
        k = hmac::<H>(&k, &[&v, &[0x00], &secret, message, aux]);
        v = hmac::<H>(&k, &[&v]);
        k = hmac::<H>(&k, &[&v, &[0x01], &secret, message, aux]);
        v = hmac::<H>(&k, &[&v]);

        v = hmac::<H>(&k, &[&v]);
        for _ in 0..counter {
            k = hmac::<H>(&k, &[&v, &[0x00]]);
            v = hmac::<H>(&k, &[&v]);
            v = hmac::<H>(&k, &[&v]);
        }
        Scalar::from_bytes_checked(&v).unwrap_or(Scalar::ZERO)
    }
}
