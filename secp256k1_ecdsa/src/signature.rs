use crate::der;
use alloc::vec::Vec;
use secp256k1_arith::{Error, Scalar};

/// An ECDSA signature `(r, s)`.
///
/// Either component may be zero after decoding. [`ECDSA::verify`] rejects
/// those.
///
/// [`ECDSA::verify`]: crate::ECDSA::verify
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// The x-coordinate of the nonce point reduced mod the order.
    pub r: Scalar,
    /// The proof that the signer knew the secret key.
    pub s: Scalar,
}

impl Signature {
    /// Reads the 64-byte `r || s` encoding. Returns `None` when either half
    /// is not below the order.
    pub fn from_compact(bytes: &[u8; 64]) -> Option<Self> {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Some(Signature {
            r: Scalar::from_bytes_checked(&r)?,
            s: Scalar::from_bytes_checked(&s)?,
        })
    }

    /// Writes the 64-byte `r || s` encoding.
    pub fn to_compact(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r.to_bytes());
        bytes[32..].copy_from_slice(&self.s.to_bytes());
        bytes
    }

    /// Decodes a strict DER signature.
    ///
    /// Integers the parser had to clamp (negative, or not below the order)
    /// are rejected with [`Error::Overflow`].
    pub fn from_der(bytes: &[u8]) -> Result<Self, Error> {
        let parsed = der::parse_sig(bytes).ok_or(Error::InvalidDer)?;
        if parsed.overflow {
            return Err(Error::Overflow);
        }
        Ok(Signature {
            r: parsed.r,
            s: parsed.s,
        })
    }

    /// Encodes as DER. The result is between 8 and 72 bytes long.
    pub fn to_der(&self) -> Vec<u8> {
        let mut out = [0u8; der::MAX_SIG_LEN];
        let len = der::serialize_sig(&self.r, &self.s, &mut out);
        out[..len].to_vec()
    }

    /// Whether `s` is at most half the order.
    pub fn is_low_s(&self) -> bool {
        !self.s.is_high()
    }

    /// Replaces `s` with `-s` when it is high. Returns whether it did.
    pub fn normalize_s(&mut self) -> bool {
        let high = self.s.is_high();
        self.s.cond_neg(high);
        high
    }
}

secp256k1_arith::impl_fromstr_deserialize! {
    name => "secp256k1 ECDSA signature",
    fn from_bytes(bytes: [u8;64]) -> Option<Signature> {
        Signature::from_compact(&bytes)
    }
}

secp256k1_arith::impl_display_debug_serialize! {
    fn to_bytes(sig: &Signature) -> [u8;64] {
        sig.to_compact()
    }
}
