//! Print and parse behaviour attached to registered extensions.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use der::{
    asn1::{IntRef, OctetStringRef},
    Decode, Encode,
};
use num_bigint::BigInt;
use num_traits::Signed;

use crate::errors::{Error, Result};

/// Values narrower than this many bits are rendered in decimal.
const DECIMAL_MAX_BITS: usize = 128;

/// Value-level behaviour of an extension: how its DER payload is rendered
/// for inspection and how a textual value is turned back into DER.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueMethod {
    /// Payload is an ASN.1 `INTEGER`.
    Integer,

    /// Payload is an ASN.1 `OCTET STRING`.
    OctetString,
}

impl ValueMethod {
    /// Render a DER-encoded payload as text.
    pub fn render(self, value: &[u8]) -> Result<String> {
        match self {
            ValueMethod::Integer => {
                let int = IntRef::from_der(value)?;
                Ok(format_integer(&BigInt::from_signed_bytes_be(int.as_bytes())))
            }
            ValueMethod::OctetString => {
                let octets = OctetStringRef::from_der(value)?;
                Ok(format_octets(octets.as_bytes()))
            }
        }
    }

    /// Parse a textual value into a DER-encoded payload.
    ///
    /// Integers accept an optional leading `-` followed by decimal digits or
    /// `0x`-prefixed hex. Octet strings accept hex with optional `:`
    /// separators.
    pub fn parse(self, text: &str) -> Result<Vec<u8>> {
        match self {
            ValueMethod::Integer => {
                let value = parse_integer(text.trim())?;
                let bytes = value.to_signed_bytes_be();
                Ok(IntRef::new(&bytes)?.to_der()?)
            }
            ValueMethod::OctetString => {
                let bytes = parse_octets(text.trim())?;
                Ok(OctetStringRef::new(&bytes)?.to_der()?)
            }
        }
    }
}

/// Fallback rendering for extensions without a [`ValueMethod`]: the raw
/// payload as ASCII, with non-printable bytes shown as `.`.
pub(crate) fn render_raw(value: &[u8]) -> String {
    value
        .iter()
        .map(|&b| {
            if b == b' ' || b.is_ascii_graphic() {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

fn format_integer(value: &BigInt) -> String {
    if value.bits() < DECIMAL_MAX_BITS {
        return value.to_string();
    }

    let mut digits = value.abs().to_str_radix(16).to_uppercase();
    if digits.len() % 2 == 1 {
        digits.insert(0, '0');
    }

    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}0x{digits}")
}

fn format_octets(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        out.push_str(&hex::encode_upper([*byte]));
    }
    out
}

fn parse_integer(text: &str) -> Result<BigInt> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::invalid_value(format!("`{text}` is not an integer")));
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| Error::invalid_value(format!("`{text}` is not an integer")))?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Colons may only separate whole bytes: every group between them must hold
/// an even number of hex digits.
fn parse_octets(text: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.len() / 2);
    for group in text.split(':') {
        let decoded = hex::decode(group)
            .map_err(|err| Error::invalid_value(format!("`{text}`: {err}")))?;
        bytes.extend_from_slice(&decoded);
    }
    Ok(bytes)
}
