//! ⚠️ Low-level "hazmat" extension construction.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module wraps caller-supplied bytes into an extension record without
//! checking that they are a well-formed DER encoding of the type the
//! extension is registered with. A boot ROM parsing such an extension may
//! reject the certificate, or worse, misinterpret it.
//!
//! Prefer the typed encoders on [`ExtensionEncoder`].

use crate::{
    encode::{ExtensionEncoder, ExtensionRecord},
    errors::Result,
    object::Nid,
};

/// Place `payload` verbatim inside the `extnValue` octet string of a new
/// extension record.
pub fn build_extension(
    encoder: &ExtensionEncoder<'_>,
    nid: Nid,
    critical: bool,
    payload: &[u8],
) -> Result<ExtensionRecord> {
    encoder.build_extension(nid, critical, payload)
}
