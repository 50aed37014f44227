use crate::Signature;
use secp256k1_arith::secp256k1::ecdsa;

impl From<Signature> for ecdsa::Signature {
    fn from(sig: Signature) -> Self {
        match ecdsa::Signature::from_compact(&sig.to_compact()) {
            Ok(sig) => sig,
            Err(_) => unreachable!("r and s are always below the order"),
        }
    }
}

impl From<ecdsa::Signature> for Signature {
    fn from(sig: ecdsa::Signature) -> Self {
        match Signature::from_compact(&sig.serialize_compact()) {
            Some(sig) => sig,
            None => unreachable!("libsecp256k1 keeps r and s below the order"),
        }
    }
}
