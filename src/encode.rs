//! Extension encoding.
//!
//! Every encoder produces an [`ExtensionRecord`]: the extension identifier,
//! its criticality, and the `extnValue` octet string whose contents are the
//! DER encoding of the typed payload.
//!
//! ```text
//! Extension  ::=  SEQUENCE  {
//!      extnID      OBJECT IDENTIFIER,
//!      critical    BOOLEAN DEFAULT FALSE,
//!      extnValue   OCTET STRING  }
//! ```

use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{OctetString, OctetStringRef},
    Decode, Encode,
};
use digest::Digest;
use log::{debug, trace};
use spki::{EncodePublicKey, SubjectPublicKeyInfoRef};
use x509_cert::ext::Extension;

use crate::{
    errors::{Error, Result},
    object::{Nid, ObjectInfo},
    registry::Registry,
};

/// Maximum size of a DER-encoded `SubjectPublicKeyInfo` accepted by
/// [`ExtensionEncoder::encode_public_key`].
pub const MAX_PUBLIC_KEY_LEN: usize = 4096;

/// Encoded extension, ready to be placed in a certificate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionRecord {
    nid: Nid,
    oid: ObjectIdentifier,
    critical: bool,
    value: OctetString,
}

impl ExtensionRecord {
    /// Registry identifier of the extension.
    pub fn nid(&self) -> Nid {
        self.nid
    }

    /// Object identifier of the extension.
    pub fn oid(&self) -> ObjectIdentifier {
        self.oid
    }

    /// Must a consumer that does not understand this extension reject the
    /// certificate?
    pub fn is_critical(&self) -> bool {
        self.critical
    }

    /// The `extnValue` octet string.
    pub fn value(&self) -> &OctetString {
        &self.value
    }

    /// DER encoding of the payload carried inside `extnValue`.
    pub fn payload(&self) -> &[u8] {
        self.value.as_bytes()
    }

    /// Convert into the RFC 5280 `Extension` structure.
    pub fn to_extension(&self) -> Extension {
        Extension {
            extn_id: self.oid,
            critical: self.critical,
            extn_value: self.value.clone(),
        }
    }

    /// DER encoding of the complete `Extension` SEQUENCE.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(self.to_extension().to_der()?)
    }
}

impl From<ExtensionRecord> for Extension {
    fn from(record: ExtensionRecord) -> Extension {
        Extension {
            extn_id: record.oid,
            critical: record.critical,
            extn_value: record.value,
        }
    }
}

/// Builds [`ExtensionRecord`]s for the extensions known to a [`Registry`].
///
/// Obtained from [`Registry::encoder`]. Encoding only reads the registry.
#[derive(Clone, Copy, Debug)]
pub struct ExtensionEncoder<'r> {
    registry: &'r Registry,
}

impl<'r> ExtensionEncoder<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    fn object(&self, nid: Nid) -> Result<&'r ObjectInfo> {
        self.registry
            .object(nid)
            .ok_or(Error::UnknownExtension(nid))
    }

    /// Wrap an already DER-encoded payload into an extension record.
    pub(crate) fn build_extension(
        &self,
        nid: Nid,
        critical: bool,
        payload: &[u8],
    ) -> Result<ExtensionRecord> {
        let object = self.object(nid)?;

        let record = ExtensionRecord {
            nid,
            oid: object.oid(),
            critical,
            value: OctetString::new(payload)?,
        };

        trace!(
            "built {} ({}), critical: {critical}, {} byte payload",
            object.oid(),
            object.short_name(),
            payload.len()
        );
        Ok(record)
    }

    /// Encode a digest as an `OCTET STRING` extension.
    ///
    /// The digest is treated as an opaque byte string and may be empty.
    pub fn encode_hash(&self, nid: Nid, critical: bool, digest: &[u8]) -> Result<ExtensionRecord> {
        let payload = OctetStringRef::new(digest)?.to_der()?;
        self.build_extension(nid, critical, &payload)
    }

    /// Hash `data` with `D` and encode the result as with
    /// [`encode_hash`][Self::encode_hash].
    pub fn encode_digest<D: Digest>(
        &self,
        nid: Nid,
        critical: bool,
        data: &[u8],
    ) -> Result<ExtensionRecord> {
        self.encode_hash(nid, critical, &D::digest(data))
    }

    /// Encode a non-volatile counter as an `INTEGER` extension.
    ///
    /// Anti-rollback counters are non-negative. Negative values are not
    /// rejected here and produce a negative `INTEGER`.
    pub fn encode_counter(&self, nid: Nid, critical: bool, value: i64) -> Result<ExtensionRecord> {
        let payload = value.to_der()?;
        self.build_extension(nid, critical, &payload)
    }

    /// Encode a public key as a DER `SubjectPublicKeyInfo` extension.
    ///
    /// Keys whose encoding exceeds [`MAX_PUBLIC_KEY_LEN`] are rejected with
    /// [`Error::KeyTooLarge`].
    pub fn encode_public_key<K>(&self, nid: Nid, critical: bool, key: &K) -> Result<ExtensionRecord>
    where
        K: EncodePublicKey + ?Sized,
    {
        let oid = self.object(nid)?.oid();

        let document = key
            .to_public_key_der()
            .map_err(|error| Error::KeySerializationFailed { oid, error })?;

        let spki = SubjectPublicKeyInfoRef::from_der(document.as_bytes()).map_err(|err| {
            Error::KeySerializationFailed {
                oid,
                error: err.into(),
            }
        })?;

        let len = usize::try_from(spki.encoded_len()?)?;
        if len > MAX_PUBLIC_KEY_LEN {
            return Err(Error::KeyTooLarge {
                oid,
                len,
                max: MAX_PUBLIC_KEY_LEN,
            });
        }

        let mut payload = Vec::with_capacity(len);
        spki.encode_to_vec(&mut payload)?;
        debug_assert_eq!(payload.len(), len);

        debug!("encoded {} public key, {len} bytes", spki.algorithm.oid);
        self.build_extension(nid, critical, &payload)
    }

    /// Encode a textual value using the extension's registered
    /// [`ValueMethod`][crate::ValueMethod].
    pub fn encode_text(&self, nid: Nid, critical: bool, text: &str) -> Result<ExtensionRecord> {
        let method = self.registry.method(nid).ok_or_else(|| match self.registry.object(nid) {
            Some(object) => Error::invalid_value(format!(
                "{} has no value methods",
                object.short_name()
            )),
            None => Error::UnknownExtension(nid),
        })?;

        let payload = method.parse(text)?;
        self.build_extension(nid, critical, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtensionDefinition, ValueKind};
    use hex_literal::hex;

    const DEFINITIONS: &[ExtensionDefinition] = &[
        ExtensionDefinition::new("1.2.3.4", "tbbHash", "TBB Hash", ValueKind::OctetString),
        ExtensionDefinition::new("1.2.3.5", "nvCounter", "NV Counter", ValueKind::Integer),
        ExtensionDefinition::new("1.2.3.6", "opaque", "Opaque", ValueKind::Unsupported),
        ExtensionDefinition::sentinel(),
    ];

    fn registry() -> Registry {
        Registry::initialize(DEFINITIONS).unwrap()
    }

    #[test]
    fn test_encode_hash() {
        let registry = registry();
        let nid = registry.nid("tbbHash").unwrap();
        let record = registry.encoder().encode_hash(nid, true, &hex!("0102")).unwrap();

        assert_eq!(record.nid(), nid);
        assert_eq!(record.oid(), ObjectIdentifier::new_unwrap("1.2.3.4"));
        assert!(record.is_critical());
        assert_eq!(record.payload(), hex!("04020102"));
        assert_eq!(
            record.to_der().unwrap(),
            hex!("300e 0603 2a0304 0101ff 0404 04020102")
        );
    }

    #[test]
    fn test_non_critical_omits_flag() {
        let registry = registry();
        let nid = registry.nid("nvCounter").unwrap();
        let record = registry.encoder().encode_counter(nid, false, 5).unwrap();

        assert_eq!(record.payload(), hex!("020105"));
        assert_eq!(record.to_der().unwrap(), hex!("300a 0603 2a0305 0403 020105"));
    }

    #[test]
    fn test_encode_counter_minimal() {
        let registry = registry();
        let nid = registry.nid("nvCounter").unwrap();
        let encoder = registry.encoder();

        let cases: [(i64, &[u8]); 6] = [
            (0, &hex!("020100")),
            (127, &hex!("02017f")),
            (128, &hex!("02020080")),
            (256, &hex!("02020100")),
            (16777216, &hex!("020401000000")),
            (-1, &hex!("0201ff")),
        ];

        for (value, expected) in cases {
            let record = encoder.encode_counter(nid, false, value).unwrap();
            assert_eq!(record.payload(), expected, "counter {value}");
        }
    }

    #[test]
    fn test_unknown_nid() {
        let registry = registry();
        let other = Registry::initialize(&[
            ExtensionDefinition::new("1.2.3.4", "a", "A", ValueKind::Integer),
            ExtensionDefinition::new("1.2.3.5", "b", "B", ValueKind::Integer),
            ExtensionDefinition::new("1.2.3.6", "c", "C", ValueKind::Integer),
            ExtensionDefinition::new("1.2.3.7", "d", "D", ValueKind::Integer),
        ])
        .unwrap();
        let foreign = other.nid("d").unwrap();

        assert_eq!(
            registry.encoder().encode_counter(foreign, false, 1),
            Err(Error::UnknownExtension(foreign))
        );
    }

    #[test]
    fn test_nid_from_other_registry_in_range() {
        let registry = registry();
        let other = Registry::initialize(crate::tbbr::EXTENSIONS).unwrap();
        let bl2 = other.nid(crate::tbbr::TRUSTED_BOOT_FW_HASH).unwrap();

        // Same numeric value as one of our own identifiers.
        assert!(bl2.get() as usize <= registry.len());

        let encoder = registry.encoder();
        assert_eq!(
            encoder.encode_hash(bl2, true, &[0xab; 32]),
            Err(Error::UnknownExtension(bl2))
        );
        assert_eq!(
            encoder.encode_counter(bl2, true, 1),
            Err(Error::UnknownExtension(bl2))
        );
        assert_eq!(encoder.encode_text(bl2, true, "1"), Err(Error::UnknownExtension(bl2)));

        let record = other.encoder().encode_hash(bl2, true, &[0xab; 32]).unwrap();
        assert_eq!(registry.render(&record), Err(Error::UnknownExtension(bl2)));
        assert!(other.render(&record).is_ok());
    }

    #[test]
    fn test_encode_text() {
        let registry = registry();
        let encoder = registry.encoder();

        let counter = registry.nid("nvCounter").unwrap();
        let record = encoder.encode_text(counter, false, "0x10").unwrap();
        assert_eq!(record.payload(), hex!("020110"));

        let hash = registry.nid("tbbHash").unwrap();
        let record = encoder.encode_text(hash, true, "de:ad").unwrap();
        assert_eq!(record.payload(), hex!("0402dead"));
        assert_eq!(registry.render(&record).unwrap(), "DE:AD");

        let opaque = registry.nid("opaque").unwrap();
        assert!(matches!(
            encoder.encode_text(opaque, false, "1"),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_into_extension() {
        let registry = registry();
        let nid = registry.nid("tbbHash").unwrap();
        let record = registry.encoder().encode_hash(nid, false, &[]).unwrap();

        let extension = Extension::from(record.clone());
        assert_eq!(extension, record.to_extension());
        assert!(!extension.critical);
        assert_eq!(extension.extn_value.as_bytes(), hex!("0400"));
    }
}
