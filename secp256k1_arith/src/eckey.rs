//! Public and secret keys with their byte encodings and tweaks.
//!
//! Public keys are read from the 33-byte compressed, 65-byte uncompressed and
//! 65-byte hybrid (tags `06`/`07`) encodings. Secret keys can also be read
//! from and written to the SEC1 `ECPrivateKey` DER structure.
use crate::{
    Context, Error, Scalar,
    field::Field,
    group::{Affine, G, Jacobian},
};
#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use subtle::ConstantTimeEq;

/// Tag of a compressed key with an even y.
pub const TAG_PUBKEY_EVEN: u8 = 0x02;
/// Tag of a compressed key with an odd y.
pub const TAG_PUBKEY_ODD: u8 = 0x03;
/// Tag of an uncompressed key.
pub const TAG_PUBKEY_UNCOMPRESSED: u8 = 0x04;
/// Tag of a hybrid key with an even y.
pub const TAG_PUBKEY_HYBRID_EVEN: u8 = 0x06;
/// Tag of a hybrid key with an odd y.
pub const TAG_PUBKEY_HYBRID_ODD: u8 = 0x07;

/// A point on the curve that is not the point at infinity.
///
/// The coordinates are kept normalized so encoding and comparing never need
/// more than reading the limbs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(Affine);

impl PublicKey {
    /// Wraps a point, rejecting infinity and points off the curve.
    pub fn from_affine(point: &Affine) -> Result<Self, Error> {
        if point.is_infinity() {
            return Err(Error::InfinityResult);
        }
        let mut point = *point;
        point.x.normalize_var();
        point.y.normalize_var();
        if !point.is_valid_var() {
            return Err(Error::NotOnCurve);
        }
        Ok(PublicKey(point))
    }

    fn from_jacobian(point: &Jacobian) -> Result<Self, Error> {
        if point.is_infinity() {
            return Err(Error::InfinityResult);
        }
        Ok(PublicKey(point.to_affine_var()))
    }

    /// The underlying point.
    pub fn as_affine(&self) -> &Affine {
        &self.0
    }

    /// Decodes a compressed, uncompressed or hybrid encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use secp256k1_arith::{eckey::PublicKey, hex, G};
    /// let bytes = hex::decode_array::<33>(
    ///     "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    /// )
    /// .unwrap();
    /// let pk = PublicKey::parse(&bytes).unwrap();
    /// assert_eq!(pk.as_affine(), &G);
    /// ```
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        match bytes.len() {
            33 => {
                let tag = bytes[0];
                if tag != TAG_PUBKEY_EVEN && tag != TAG_PUBKEY_ODD {
                    return Err(Error::InvalidEncoding);
                }
                let x = read_field(&bytes[1..33])?;
                let point =
                    Affine::set_xo_var(&x, tag == TAG_PUBKEY_ODD).ok_or(Error::NotOnCurve)?;
                PublicKey::from_affine(&point)
            }
            65 => {
                let tag = bytes[0];
                let hybrid = tag == TAG_PUBKEY_HYBRID_EVEN || tag == TAG_PUBKEY_HYBRID_ODD;
                if tag != TAG_PUBKEY_UNCOMPRESSED && !hybrid {
                    return Err(Error::InvalidEncoding);
                }
                let x = read_field(&bytes[1..33])?;
                let y = read_field(&bytes[33..65])?;
                if hybrid && y.is_odd() != (tag == TAG_PUBKEY_HYBRID_ODD) {
                    return Err(Error::InvalidEncoding);
                }
                PublicKey::from_affine(&Affine::new(x, y))
            }
            _ => Err(Error::InvalidLength),
        }
    }

    /// The 33-byte compressed encoding.
    pub fn serialize(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out[0] = if self.0.y.is_odd() {
            TAG_PUBKEY_ODD
        } else {
            TAG_PUBKEY_EVEN
        };
        out[1..].copy_from_slice(&self.0.x.to_bytes());
        out
    }

    /// The 65-byte uncompressed encoding.
    pub fn serialize_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = TAG_PUBKEY_UNCOMPRESSED;
        out[1..33].copy_from_slice(&self.0.x.to_bytes());
        out[33..].copy_from_slice(&self.0.y.to_bytes());
        out
    }

    /// The point with the opposite y.
    pub fn negate(&self) -> Self {
        let mut y = self.0.y.neg(1);
        y.normalize_var();
        PublicKey(Affine::new(self.0.x, y))
    }

    /// Computes `Q + t·G`.
    ///
    /// The tweak must be below the order. Fails when the result is the point
    /// at infinity.
    pub fn tweak_add(&self, ctx: &Context, tweak: &[u8; 32]) -> Result<Self, Error> {
        let term = Scalar::from_bytes_checked(tweak).ok_or(Error::Overflow)?;
        let pt = ctx
            .mult
            .ecmult(&Jacobian::from_affine(&self.0), &Scalar::ONE, &term);
        PublicKey::from_jacobian(&pt)
    }

    /// Computes `t·Q` for a tweak in `[1, n)`.
    pub fn tweak_mul(&self, ctx: &Context, tweak: &[u8; 32]) -> Result<Self, Error> {
        let factor = Scalar::from_bytes_checked(tweak).ok_or(Error::Overflow)?;
        if factor.is_zero() {
            return Err(Error::ZeroScalar);
        }
        let pt = ctx
            .mult
            .ecmult(&Jacobian::from_affine(&self.0), &factor, &Scalar::ZERO);
        PublicKey::from_jacobian(&pt)
    }
}

fn read_field(bytes: &[u8]) -> Result<Field, Error> {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(bytes);
    Field::from_bytes(&buf).ok_or(Error::Overflow)
}

crate::impl_display_debug_serialize! {
    fn to_bytes(pk: &PublicKey) -> [u8;33] {
        PublicKey::serialize(pk)
    }
}

crate::impl_fromstr_deserialize! {
    name => "secp256k1 public key",
    fn from_bytes(bytes: [u8;33]) -> Option<PublicKey> {
        PublicKey::parse(&bytes).ok()
    }
}

/// A scalar in `[1, n)` used as a private key.
#[derive(Clone, Copy)]
pub struct SecretKey(Scalar);

impl SecretKey {
    /// Wraps a non-zero scalar.
    pub fn from_scalar(scalar: Scalar) -> Result<Self, Error> {
        if scalar.is_zero() {
            return Err(Error::ZeroScalar);
        }
        Ok(SecretKey(scalar))
    }

    /// Decodes 32 big-endian bytes, which must be in `[1, n)`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        let scalar = Scalar::from_bytes_checked(bytes).ok_or(Error::Overflow)?;
        SecretKey::from_scalar(scalar)
    }

    /// Whether `bytes` is a valid secret key.
    pub fn check(bytes: &[u8; 32]) -> bool {
        SecretKey::from_bytes(bytes).is_ok()
    }

    /// The 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// The secret scalar.
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }

    /// Computes `d·G` in constant time.
    pub fn public_key(&self, ctx: &Context) -> PublicKey {
        let pj = ctx.generator.ecmult_gen(&self.0);
        PublicKey(Affine::from_jacobian(&pj))
    }

    /// Computes `d + t`. Fails when `t` is not below the order or the sum is
    /// zero.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<Self, Error> {
        let term = Scalar::from_bytes_checked(tweak).ok_or(Error::Overflow)?;
        SecretKey::from_scalar(self.0 + term)
    }

    /// Computes `d·t` for a tweak in `[1, n)`.
    pub fn tweak_mul(&self, tweak: &[u8; 32]) -> Result<Self, Error> {
        let factor = Scalar::from_bytes_checked(tweak).ok_or(Error::Overflow)?;
        SecretKey::from_scalar(self.0 * factor)
    }

    /// Reads the key out of a SEC1 `ECPrivateKey` structure.
    ///
    /// Only the version and the private key octet string are looked at.
    /// Anything after them (curve parameters, public key) is ignored. Keys
    /// shorter than 32 bytes are left-padded with zeros.
    pub fn from_der(der: &[u8]) -> Result<Self, Error> {
        let rest = match der {
            [0x30, rest @ ..] => rest,
            _ => return Err(Error::InvalidDer),
        };
        let (&len_byte, rest) = rest.split_first().ok_or(Error::InvalidDer)?;
        if len_byte & 0x80 == 0 {
            return Err(Error::InvalidDer);
        }
        let lenb = (len_byte & !0x80) as usize;
        if !(1..=2).contains(&lenb) || rest.len() < lenb {
            return Err(Error::InvalidDer);
        }
        let len = rest[..lenb]
            .iter()
            .fold(0usize, |acc, byte| (acc << 8) | *byte as usize);
        let rest = &rest[lenb..];
        if rest.len() < len {
            return Err(Error::InvalidDer);
        }
        let rest = match rest {
            [0x02, 0x01, 0x01, rest @ ..] => rest,
            _ => return Err(Error::InvalidDer),
        };
        let key = match rest {
            [0x04, key_len, rest @ ..] if *key_len <= 0x20 && rest.len() >= *key_len as usize => {
                &rest[..*key_len as usize]
            }
            _ => return Err(Error::InvalidDer),
        };
        let mut out32 = [0u8; 32];
        out32[32 - key.len()..].copy_from_slice(key);
        SecretKey::from_bytes(&out32)
    }

    /// Writes the SEC1 `ECPrivateKey` structure with the full curve
    /// parameters and the public key, compressed (214 bytes) or uncompressed
    /// (279 bytes).
    #[cfg(feature = "alloc")]
    pub fn to_der(&self, ctx: &Context, compressed: bool) -> Vec<u8> {
        let public_key = self.public_key(ctx);
        let generator = PublicKey(G);
        let mut out = Vec::with_capacity(if compressed { 214 } else { 279 });
        if compressed {
            out.extend_from_slice(&[0x30, 0x81, 0xD3]);
        } else {
            out.extend_from_slice(&[0x30, 0x82, 0x01, 0x13]);
        }
        out.extend_from_slice(&[0x02, 0x01, 0x01, 0x04, 0x20]);
        out.extend_from_slice(&self.to_bytes());
        if compressed {
            out.extend_from_slice(&[0xA0, 0x81, 0x85, 0x30, 0x81, 0x82]);
        } else {
            out.extend_from_slice(&[0xA0, 0x81, 0xA5, 0x30, 0x81, 0xA2]);
        }
        // version, then the prime field
        out.extend_from_slice(&[
            0x02, 0x01, 0x01, 0x30, 0x2C, 0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x01, 0x01,
            0x02, 0x21, 0x00,
        ]);
        out.extend_from_slice(&FIELD_PRIME);
        // curve coefficients a = 0, b = 7
        out.extend_from_slice(&[0x30, 0x06, 0x04, 0x01, 0x00, 0x04, 0x01, 0x07]);
        if compressed {
            out.extend_from_slice(&[0x04, 0x21]);
            out.extend_from_slice(&generator.serialize());
        } else {
            out.extend_from_slice(&[0x04, 0x41]);
            out.extend_from_slice(&generator.serialize_uncompressed());
        }
        out.extend_from_slice(&[0x02, 0x21, 0x00]);
        out.extend_from_slice(&GROUP_ORDER);
        // cofactor
        out.extend_from_slice(&[0x02, 0x01, 0x01]);
        if compressed {
            out.extend_from_slice(&[0xA1, 0x24, 0x03, 0x22, 0x00]);
            out.extend_from_slice(&public_key.serialize());
        } else {
            out.extend_from_slice(&[0xA1, 0x44, 0x03, 0x42, 0x00]);
            out.extend_from_slice(&public_key.serialize_uncompressed());
        }
        debug_assert_eq!(out.len(), if compressed { 214 } else { 279 });
        out
    }
}

const FIELD_PRIME: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFC, 0x2F,
];

const GROUP_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

impl PartialEq for SecretKey {
    fn eq(&self, other: &SecretKey) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for SecretKey {}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hex;
    use alloc::string::ToString;
    use proptest::prelude::*;

    const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    fn ctx() -> &'static Context {
        Context::global()
    }

    fn one() -> SecretKey {
        SecretKey::from_scalar(Scalar::ONE).unwrap()
    }

    #[test]
    fn generator_encodings() {
        let pk = one().public_key(ctx());
        assert_eq!(hex::encode(&pk.serialize()), G_COMPRESSED);
        assert_eq!(hex::encode(&pk.serialize_uncompressed()), G_UNCOMPRESSED);
        assert_eq!(pk.to_string(), G_COMPRESSED);
        assert_eq!(G_COMPRESSED.parse::<PublicKey>().unwrap(), pk);
    }

    #[test]
    fn hybrid_tags() {
        let mut bytes = hex::decode_array::<65>(G_UNCOMPRESSED).unwrap();
        // y of G is even
        bytes[0] = TAG_PUBKEY_HYBRID_EVEN;
        assert_eq!(PublicKey::parse(&bytes).unwrap().as_affine(), &G);
        bytes[0] = TAG_PUBKEY_HYBRID_ODD;
        assert_eq!(PublicKey::parse(&bytes), Err(Error::InvalidEncoding));
        bytes[0] = 0x05;
        assert_eq!(PublicKey::parse(&bytes), Err(Error::InvalidEncoding));
    }

    #[test]
    fn rejected_encodings() {
        assert_eq!(PublicKey::parse(&[]), Err(Error::InvalidLength));
        assert_eq!(PublicKey::parse(&[0x02; 32]), Err(Error::InvalidLength));
        let mut bytes = hex::decode_array::<33>(G_COMPRESSED).unwrap();
        bytes[0] = 0x04;
        assert_eq!(PublicKey::parse(&bytes), Err(Error::InvalidEncoding));
        // x = 5 has no y since 5³ + 7 = 132 is not a square mod p
        let mut no_y = [0u8; 33];
        no_y[0] = TAG_PUBKEY_EVEN;
        no_y[32] = 5;
        assert_eq!(PublicKey::parse(&no_y), Err(Error::NotOnCurve));
        let mut too_big = [0xFFu8; 33];
        too_big[0] = TAG_PUBKEY_EVEN;
        assert_eq!(PublicKey::parse(&too_big), Err(Error::Overflow));
        let mut off_curve = hex::decode_array::<65>(G_UNCOMPRESSED).unwrap();
        off_curve[64] ^= 1;
        assert_eq!(PublicKey::parse(&off_curve), Err(Error::NotOnCurve));
    }

    #[test]
    fn negate_flips_parity() {
        let pk = one().public_key(ctx());
        let neg = pk.negate();
        assert_eq!(neg.serialize()[0], TAG_PUBKEY_ODD);
        assert_eq!(neg.serialize()[1..], pk.serialize()[1..]);
        assert_eq!(neg.negate(), pk);
    }

    #[test]
    fn secret_key_validity() {
        assert_eq!(SecretKey::from_bytes(&[0u8; 32]), Err(Error::ZeroScalar));
        assert_eq!(SecretKey::from_bytes(&GROUP_ORDER), Err(Error::Overflow));
        let mut n_minus_one = GROUP_ORDER;
        n_minus_one[31] -= 1;
        assert!(SecretKey::check(&n_minus_one));
        assert!(!SecretKey::check(&[0xFF; 32]));
    }

    #[test]
    fn tweaks_at_the_edges() {
        let sk = one();
        let pk = sk.public_key(ctx());
        let mut minus_one = GROUP_ORDER;
        minus_one[31] -= 1;
        assert_eq!(sk.tweak_add(&minus_one), Err(Error::ZeroScalar));
        assert_eq!(pk.tweak_add(ctx(), &minus_one), Err(Error::InfinityResult));
        assert_eq!(pk.tweak_add(ctx(), &GROUP_ORDER), Err(Error::Overflow));
        assert_eq!(sk.tweak_mul(&[0u8; 32]), Err(Error::ZeroScalar));
        assert_eq!(pk.tweak_mul(ctx(), &[0u8; 32]), Err(Error::ZeroScalar));
        assert_eq!(pk.tweak_add(ctx(), &[0u8; 32]), Ok(pk));
    }

    #[test]
    fn der_templates() {
        let sk = SecretKey::from_bytes(&[0x11; 32]).unwrap();
        let compressed = sk.to_der(ctx(), true);
        let uncompressed = sk.to_der(ctx(), false);
        assert_eq!(compressed.len(), 214);
        assert_eq!(uncompressed.len(), 279);
        assert_eq!(compressed[..8], [0x30, 0x81, 0xD3, 0x02, 0x01, 0x01, 0x04, 0x20]);
        assert_eq!(
            uncompressed[..9],
            [0x30, 0x82, 0x01, 0x13, 0x02, 0x01, 0x01, 0x04, 0x20]
        );
        let pk = sk.public_key(ctx());
        assert_eq!(compressed[214 - 33..], pk.serialize());
        assert_eq!(uncompressed[279 - 65..], pk.serialize_uncompressed());
        assert_eq!(SecretKey::from_der(&compressed), Ok(sk));
        assert_eq!(SecretKey::from_der(&uncompressed), Ok(sk));
    }

    #[test]
    fn der_lenient_and_rejected() {
        // a short octet string is right aligned
        let short = [0x30, 0x81, 0x06, 0x02, 0x01, 0x01, 0x04, 0x01, 0x07];
        let expected = SecretKey::from_scalar(Scalar::from_int(7)).unwrap();
        assert_eq!(SecretKey::from_der(&short), Ok(expected));
        // the length must use the long form
        let short_form = [0x30, 0x06, 0x02, 0x01, 0x01, 0x04, 0x01, 0x07];
        assert_eq!(SecretKey::from_der(&short_form), Err(Error::InvalidDer));
        let bad_version = [0x30, 0x81, 0x06, 0x02, 0x01, 0x02, 0x04, 0x01, 0x07];
        assert_eq!(SecretKey::from_der(&bad_version), Err(Error::InvalidDer));
        let truncated = [0x30, 0x81, 0x06, 0x02, 0x01, 0x01, 0x04, 0x02, 0x07];
        assert_eq!(SecretKey::from_der(&truncated), Err(Error::InvalidDer));
        let too_long = [0x30, 0x81, 0x10, 0x02, 0x01, 0x01, 0x04, 0x01, 0x07];
        assert_eq!(SecretKey::from_der(&too_long), Err(Error::InvalidDer));
        let zero = [0x30, 0x81, 0x06, 0x02, 0x01, 0x01, 0x04, 0x01, 0x00];
        assert_eq!(SecretKey::from_der(&zero), Err(Error::ZeroScalar));
        assert_eq!(SecretKey::from_der(&[]), Err(Error::InvalidDer));
    }

    proptest! {
        #[test]
        fn encodings_round_trip(sk in any::<Scalar>().prop_filter("non-zero", |s| !s.is_zero())) {
            let pk = SecretKey::from_scalar(sk).unwrap().public_key(ctx());
            prop_assert!(pk.as_affine().is_valid_var());
            prop_assert_eq!(PublicKey::parse(&pk.serialize()).unwrap(), pk);
            prop_assert_eq!(PublicKey::parse(&pk.serialize_uncompressed()).unwrap(), pk);
        }

        #[test]
        fn tweaks_commute_with_public_key(
            sk in any::<Scalar>().prop_filter("non-zero", |s| !s.is_zero()),
            tweak in any::<Scalar>().prop_filter("non-zero", |s| !s.is_zero()),
        ) {
            let sk = SecretKey::from_scalar(sk).unwrap();
            let pk = sk.public_key(ctx());
            let t = tweak.to_bytes();
            if let Ok(added) = sk.tweak_add(&t) {
                prop_assert_eq!(pk.tweak_add(ctx(), &t).unwrap(), added.public_key(ctx()));
            }
            let multiplied = sk.tweak_mul(&t).unwrap();
            prop_assert_eq!(pk.tweak_mul(ctx(), &t).unwrap(), multiplied.public_key(ctx()));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn public_key_serde() {
        let pk = one().public_key(ctx());
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json, alloc::format!("\"{}\"", G_COMPRESSED));
        assert_eq!(serde_json::from_str::<PublicKey>(&json).unwrap(), pk);
        let bad = json.replacen("02", "05", 1);
        assert!(serde_json::from_str::<PublicKey>(&bad).is_err());
    }
}
