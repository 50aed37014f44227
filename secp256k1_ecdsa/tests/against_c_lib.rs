use secp256k1::{Message, PublicKey as CPublicKey, SecretKey as CSecretKey, ecdsa};
use secp256k1_arith::{Context, Scalar, TEST_SOUNDNESS, eckey::{PublicKey, SecretKey}};
use secp256k1_ecdsa::{
    ECDSA, Signature,
    nonce::{Derivation, NonceHash, Rfc6979},
};
use sha2::Sha256;

fn rand_32_bytes() -> [u8; 32] {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

fn random_secret_key() -> SecretKey {
    loop {
        if let Ok(sk) = SecretKey::from_bytes(&rand_32_bytes()) {
            return sk;
        }
    }
}

fn ecdsa() -> ECDSA<NonceHash<Sha256>> {
    ECDSA::from_tag(b"test")
}

/// Signatures we produce verify under libsecp256k1
#[test]
fn ecdsa_sign() {
    let secp = secp256k1::Secp256k1::new();
    let ctx = Context::global();

    for _ in 0..TEST_SOUNDNESS {
        let secret_key = random_secret_key();
        let c_secret_key = CSecretKey::from_slice(&secret_key.to_bytes()).unwrap();
        let c_public_key = CPublicKey::from_secret_key(&secp, &c_secret_key);

        let message = rand_32_bytes();
        let signature = ecdsa().sign(ctx, &secret_key, &message, Derivation::Deterministic);
        let c_message = Message::from_digest(message);
        let c_signature = ecdsa::Signature::from_compact(&signature.to_compact()).unwrap();
        assert!(secp.verify_ecdsa(&c_message, &c_signature, &c_public_key).is_ok());
    }
}

/// RFC 6979 nonces give the same signatures as libsecp256k1
#[test]
fn rfc6979_matches() {
    let secp = secp256k1::Secp256k1::new();
    let ctx = Context::global();
    let ecdsa = ECDSA::new(Rfc6979::<Sha256>::default());

    for _ in 0..TEST_SOUNDNESS {
        let secret_key = random_secret_key();
        let c_secret_key = CSecretKey::from_slice(&secret_key.to_bytes()).unwrap();
        let message = rand_32_bytes();
        let c_message = Message::from_digest(message);

        let signature = ecdsa.sign(ctx, &secret_key, &message, Derivation::Deterministic);
        let c_signature = secp.sign_ecdsa(&c_message, &c_secret_key);
        assert_eq!(signature.to_compact(), c_signature.serialize_compact());

        let aux = rand_32_bytes();
        let signature = ecdsa.sign(ctx, &secret_key, &message, Derivation::Aux(aux));
        let c_signature = secp.sign_ecdsa_with_noncedata(&c_message, &c_secret_key, &aux);
        assert_eq!(signature.to_compact(), c_signature.serialize_compact());
    }
}

/// Signatures libsecp256k1 produces verify under ours
#[test]
fn ecdsa_verify() {
    let secp = secp256k1::Secp256k1::new();
    let ctx = Context::global();
    let ecdsa = ECDSA::verify_only().enforce_low_s();

    for _ in 0..TEST_SOUNDNESS {
        let secret_key = random_secret_key();
        let c_secret_key = CSecretKey::from_slice(&secret_key.to_bytes()).unwrap();
        let message = rand_32_bytes();
        let c_signature = secp.sign_ecdsa(&Message::from_digest(message), &c_secret_key);
        let signature = Signature::from_compact(&c_signature.serialize_compact()).unwrap();

        let public_key = secret_key.public_key(ctx);
        assert!(ecdsa.verify(ctx, &public_key, &message, &signature));
    }
}

/// A message hash above the order is reduced the same way by both
#[test]
fn ecdsa_high_message() {
    let secp = secp256k1::Secp256k1::new();
    let ctx = Context::global();
    let secret_key = random_secret_key();
    let c_secret_key = CSecretKey::from_slice(&secret_key.to_bytes()).unwrap();
    let c_public_key = CPublicKey::from_secret_key(&secp, &c_secret_key);
    let message = [0xFF; 32];
    let c_message = Message::from_digest(message);

    let c_signature = secp.sign_ecdsa(&c_message, &c_secret_key);
    let signature = Signature::from_compact(&c_signature.serialize_compact()).unwrap();
    let public_key = secret_key.public_key(ctx);
    assert!(ECDSA::verify_only().verify(ctx, &public_key, &message, &signature));

    let signature = ecdsa().sign(ctx, &secret_key, &message, Derivation::Deterministic);
    let c_signature = ecdsa::Signature::from_compact(&signature.to_compact()).unwrap();
    assert!(secp.verify_ecdsa(&c_message, &c_signature, &c_public_key).is_ok());
}

/// DER encodings are byte for byte the same in both directions
#[test]
fn der_matches() {
    let secp = secp256k1::Secp256k1::new();
    for _ in 0..TEST_SOUNDNESS {
        let c_secret_key = CSecretKey::from_slice(&random_secret_key().to_bytes()).unwrap();
        let c_signature = secp.sign_ecdsa(&Message::from_digest(rand_32_bytes()), &c_secret_key);
        let der = c_signature.serialize_der();
        let signature = Signature::from_der(&der).unwrap();
        assert_eq!(signature.to_compact(), c_signature.serialize_compact());
        assert_eq!(signature.to_der(), der.to_vec());
    }

    // small values exercise the length stripping
    let small = Signature {
        r: Scalar::from_int(1),
        s: Scalar::from_int(0x80),
    };
    let c_small = ecdsa::Signature::from_compact(&small.to_compact()).unwrap();
    assert_eq!(small.to_der(), c_small.serialize_der().to_vec());
}

/// Whatever we accept libsecp256k1 accepts with the same values. It also
/// accepts clamped integers as zero where we report an overflow.
#[test]
fn der_rejections_agree() {
    let secp = secp256k1::Secp256k1::new();
    let c_secret_key = CSecretKey::from_slice(&random_secret_key().to_bytes()).unwrap();
    let c_signature = secp.sign_ecdsa(&Message::from_digest(rand_32_bytes()), &c_secret_key);
    let der = c_signature.serialize_der().to_vec();

    for i in 0..der.len() {
        for bit in 0..8 {
            let mut mutated = der.clone();
            mutated[i] ^= 1 << bit;
            if let Ok(ours) = Signature::from_der(&mutated) {
                let theirs = ecdsa::Signature::from_der(&mutated).unwrap();
                assert_eq!(ours.to_compact(), theirs.serialize_compact(), "byte {} bit {}", i, bit);
            }
        }
    }

    let mut trailing = der.clone();
    trailing.push(0);
    assert!(Signature::from_der(&trailing).is_err());
    assert!(ecdsa::Signature::from_der(&trailing).is_err());
}

/// Normalizing s agrees with libsecp256k1
#[test]
fn normalize_s_agrees() {
    let secp = secp256k1::Secp256k1::new();
    let secret_key = random_secret_key();
    let c_secret_key = CSecretKey::from_slice(&secret_key.to_bytes()).unwrap();
    let message = rand_32_bytes();
    let c_signature = secp.sign_ecdsa(&Message::from_digest(message), &c_secret_key);
    let mut high = Signature::from_compact(&c_signature.serialize_compact()).unwrap();
    high.s = -high.s;
    let mut c_high = ecdsa::Signature::from_compact(&high.to_compact()).unwrap();

    let public_key: PublicKey = secret_key.public_key(Context::global());
    assert!(ECDSA::verify_only().verify(Context::global(), &public_key, &message, &high));
    assert!(!ECDSA::verify_only().enforce_low_s().verify(Context::global(), &public_key, &message, &high));

    assert!(high.normalize_s());
    c_high.normalize_s();
    assert_eq!(high.to_compact(), c_high.serialize_compact());
}
