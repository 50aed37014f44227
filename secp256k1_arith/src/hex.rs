//! Hex encoding for the `Display`, `FromStr` and human readable serde impls.
#[cfg(feature = "alloc")]
use alloc::string::String;
use core::fmt;

/// Why a hex string could not be turned into a value.
#[derive(Debug, Clone, PartialEq)]
pub enum HexError {
    /// A character outside `[0-9a-fA-F]`, or an odd number of them.
    InvalidHex,
    /// The wrong number of bytes for the target type.
    InvalidLength,
    /// The bytes were not a valid encoding of the target type.
    InvalidEncoding,
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use HexError::*;
        match self {
            InvalidHex => write!(f, "invalid hex string"),
            InvalidLength => write!(f, "hex string had the wrong length"),
            InvalidEncoding => write!(f, "hex value did not encode the expected type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HexError {}

#[cfg(feature = "alloc")]
const DIGITS: &[u8; 16] = b"0123456789abcdef";

fn nibble(c: u8) -> Result<u8, HexError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(HexError::InvalidHex),
    }
}

/// Encodes bytes as lowercase hex.
///
/// ```
/// use secp256k1_arith::{hex, G};
/// assert_eq!(
///     hex::encode(&G.x.to_bytes()),
///     "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
/// );
/// ```
#[cfg(feature = "alloc")]
pub fn encode(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push(DIGITS[(byte >> 4) as usize] as char);
        hex.push(DIGITS[(byte & 0x0F) as usize] as char);
    }
    hex
}

/// Decodes exactly `N` bytes of hex in either case.
///
/// ```
/// use secp256k1_arith::{hex, G};
/// let g_x: [u8; 32] = hex::decode_array(
///     "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
/// )
/// .unwrap();
/// assert_eq!(g_x, G.x.to_bytes());
/// ```
pub fn decode_array<const N: usize>(hex: &str) -> Result<[u8; N], HexError> {
    if hex.len() % 2 != 0 {
        return Err(HexError::InvalidHex);
    }
    if hex.len() != N * 2 {
        return Err(HexError::InvalidLength);
    }
    let mut bytes = [0u8; N];
    for (pair, byte) in hex.as_bytes().chunks_exact(2).zip(bytes.iter_mut()) {
        *byte = (nibble(pair[0])? << 4) | nibble(pair[1])?;
    }
    Ok(bytes)
}
