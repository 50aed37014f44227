//! Errors from decoding keys and applying tweaks.
use core::fmt;

/// Why an encoding or a key operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input did not have one of the accepted lengths.
    InvalidLength,
    /// The input had an unknown tag or a malformed layout.
    InvalidEncoding,
    /// A 32-byte value was not below the modulus.
    Overflow,
    /// A scalar that must be non-zero was zero.
    ZeroScalar,
    /// The coordinates did not describe a point on the curve.
    NotOnCurve,
    /// The operation would have produced the point at infinity.
    InfinityResult,
    /// A DER structure was rejected.
    InvalidDer,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;
        match self {
            InvalidLength => write!(f, "input had an invalid length"),
            InvalidEncoding => write!(f, "input was not a valid encoding"),
            Overflow => write!(f, "value was not below the modulus"),
            ZeroScalar => write!(f, "scalar was zero"),
            NotOnCurve => write!(f, "point is not on the curve"),
            InfinityResult => write!(f, "result was the point at infinity"),
            InvalidDer => write!(f, "invalid DER encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
