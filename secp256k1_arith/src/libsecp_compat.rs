use crate::{
    Scalar,
    eckey::{PublicKey, SecretKey},
};

impl From<SecretKey> for secp256k1::SecretKey {
    fn from(sk: SecretKey) -> Self {
        match secp256k1::SecretKey::from_slice(&sk.to_bytes()) {
            Ok(sk) => sk,
            Err(_) => unreachable!("both libraries accept exactly [1, n)"),
        }
    }
}

impl From<secp256k1::SecretKey> for SecretKey {
    fn from(sk: secp256k1::SecretKey) -> Self {
        match SecretKey::from_bytes(&sk.secret_bytes()) {
            Ok(sk) => sk,
            Err(_) => unreachable!("both libraries accept exactly [1, n)"),
        }
    }
}

impl From<PublicKey> for secp256k1::PublicKey {
    fn from(pk: PublicKey) -> Self {
        match secp256k1::PublicKey::from_slice(&pk.serialize()) {
            Ok(pk) => pk,
            Err(_) => unreachable!("a PublicKey is always on the curve"),
        }
    }
}

impl From<secp256k1::PublicKey> for PublicKey {
    fn from(pk: secp256k1::PublicKey) -> Self {
        match PublicKey::parse(&pk.serialize()) {
            Ok(pk) => pk,
            Err(_) => unreachable!("a secp256k1::PublicKey is always on the curve"),
        }
    }
}

impl From<Scalar> for secp256k1::Scalar {
    fn from(scalar: Scalar) -> Self {
        match secp256k1::Scalar::from_be_bytes(scalar.to_bytes()) {
            Ok(scalar) => scalar,
            Err(_) => unreachable!("scalars are always reduced"),
        }
    }
}

impl From<secp256k1::Scalar> for Scalar {
    fn from(scalar: secp256k1::Scalar) -> Self {
        Scalar::from_bytes_mod_order(&scalar.to_be_bytes())
    }
}
