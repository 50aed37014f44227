//! Strict DER for ECDSA signatures (`SEQUENCE { INTEGER r, INTEGER s }`).
//!
//! Parsing follows X.690 DER with one deliberate leniency: an integer that is
//! negative or does not fit below the group order is not a parse failure.
//! It comes back as zero with its overflow flag set, and rejecting it is up
//! to the caller. [`Signature::from_der`] does that.
//!
//! [`Signature::from_der`]: crate::Signature::from_der
use secp256k1_arith::Scalar;

/// The longest DER signature: two 33-byte integers plus headers.
pub const MAX_SIG_LEN: usize = 72;

/// Reads a length field and advances `sig` past it.
///
/// Rejects the reserved `0xFF` byte, the indefinite form, long forms with a
/// leading zero or more than four bytes, long forms for lengths below 128,
/// and any length running past the end of `sig`.
pub fn read_len(sig: &mut &[u8]) -> Option<usize> {
    let (&b1, rest) = sig.split_first()?;
    *sig = rest;
    if b1 == 0xFF {
        return None;
    }
    if b1 & 0x80 == 0 {
        return Some(b1 as usize);
    }
    if b1 == 0x80 {
        return None;
    }
    let mut lenleft = (b1 & 0x7F) as usize;
    if lenleft > sig.len() {
        return None;
    }
    if sig[0] == 0 {
        // not the shortest encoding
        return None;
    }
    if lenleft > 4 {
        return None;
    }
    let mut ret = 0usize;
    while lenleft > 0 {
        ret = (ret << 8) | sig[0] as usize;
        if ret + lenleft > sig.len() {
            return None;
        }
        *sig = &sig[1..];
        lenleft -= 1;
    }
    if ret < 128 {
        return None;
    }
    Some(ret)
}

/// Reads an `INTEGER` and advances `sig` past it.
///
/// Returns the value and whether it overflowed. An overflowed value is
/// always [`Scalar::ZERO`].
pub fn parse_integer(sig: &mut &[u8]) -> Option<(Scalar, bool)> {
    match sig.split_first() {
        Some((0x02, rest)) => *sig = rest,
        _ => return None,
    }
    let mut rlen = read_len(sig)?;
    if rlen == 0 || rlen > sig.len() {
        return None;
    }
    if sig[0] == 0x00 && rlen > 1 && sig[1] & 0x80 == 0x00 {
        // excessive 0x00 padding
        return None;
    }
    if sig[0] == 0xFF && rlen > 1 && sig[1] & 0x80 == 0x80 {
        // excessive 0xFF padding
        return None;
    }
    // negative
    let mut overflow = sig[0] & 0x80 == 0x80;
    while rlen > 0 && sig[0] == 0 {
        rlen -= 1;
        *sig = &sig[1..];
    }
    if rlen > 32 {
        overflow = true;
    }
    let mut r = Scalar::ZERO;
    if !overflow {
        let mut ra = [0u8; 32];
        ra[32 - rlen..].copy_from_slice(&sig[..rlen]);
        let (value, too_big) = Scalar::from_bytes(&ra);
        overflow = too_big;
        if !overflow {
            r = value;
        }
    }
    *sig = &sig[rlen..];
    Some((r, overflow))
}

/// The two integers of a parsed signature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedSignature {
    /// `r`, or zero when it overflowed.
    pub r: Scalar,
    /// `s`, or zero when it overflowed.
    pub s: Scalar,
    /// Whether either integer was negative or not below the order.
    pub overflow: bool,
}

/// Parses a complete DER signature. Nothing may follow the sequence and
/// nothing may follow `s` inside it.
pub fn parse_sig(sig: &[u8]) -> Option<ParsedSignature> {
    let mut sig = match sig.split_first() {
        Some((0x30, rest)) => rest,
        _ => return None,
    };
    let rlen = read_len(&mut sig)?;
    if rlen != sig.len() {
        // out of bounds or garbage after the tuple
        return None;
    }
    let (r, overflow_r) = parse_integer(&mut sig)?;
    let (s, overflow_s) = parse_integer(&mut sig)?;
    if !sig.is_empty() {
        // garbage inside the tuple
        return None;
    }
    Some(ParsedSignature {
        r,
        s,
        overflow: overflow_r || overflow_s,
    })
}

/// Writes the minimal encoding of a scalar as an `INTEGER` body: leading
/// zeros stripped, one `0x00` kept when the top bit would read as a sign.
fn integer_body(scalar: &Scalar) -> ([u8; 33], usize) {
    let mut buf = [0u8; 33];
    buf[1..].copy_from_slice(&scalar.to_bytes());
    let mut start = 0;
    while start < 32 && buf[start] == 0 && buf[start + 1] < 0x80 {
        start += 1;
    }
    (buf, start)
}

/// Encodes `(r, s)` into `out` and returns the number of bytes written.
pub fn serialize_sig(r: &Scalar, s: &Scalar, out: &mut [u8; MAX_SIG_LEN]) -> usize {
    let (r_buf, r_start) = integer_body(r);
    let (s_buf, s_start) = integer_body(s);
    let r_body = &r_buf[r_start..];
    let s_body = &s_buf[s_start..];
    let len = 6 + r_body.len() + s_body.len();
    out[0] = 0x30;
    out[1] = (4 + r_body.len() + s_body.len()) as u8;
    out[2] = 0x02;
    out[3] = r_body.len() as u8;
    out[4..4 + r_body.len()].copy_from_slice(r_body);
    let s_at = 4 + r_body.len();
    out[s_at] = 0x02;
    out[s_at + 1] = s_body.len() as u8;
    out[s_at + 2..len].copy_from_slice(s_body);
    len
}
