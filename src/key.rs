//! Public keys embedded in certificate extensions.

use const_oid::ObjectIdentifier;
use der::Document;
use spki::{EncodePublicKey, SubjectPublicKeyInfoRef};

#[cfg(feature = "pem")]
use {pkcs1::DecodeRsaPublicKey, spki::DecodePublicKey};

/// PEM label of a `SubjectPublicKeyInfo`.
#[cfg(feature = "pem")]
const SPKI_PEM_LABEL: &str = "PUBLIC KEY";

/// PEM label of a PKCS#1 `RSAPublicKey`.
#[cfg(feature = "pem")]
const PKCS1_PEM_LABEL: &str = "RSA PUBLIC KEY";

/// Algorithm-agnostic public key, held as a DER `SubjectPublicKeyInfo`.
///
/// Any type implementing [`EncodePublicKey`] can be handed to
/// [`ExtensionEncoder::encode_public_key`][crate::ExtensionEncoder::encode_public_key];
/// this type covers keys loaded from PEM or DER without a typed key
/// implementation at hand.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubjectPublicKey {
    algorithm: ObjectIdentifier,
    document: Document,
}

impl SubjectPublicKey {
    /// Algorithm identifier OID of the key.
    pub fn algorithm(&self) -> ObjectIdentifier {
        self.algorithm
    }

    /// DER encoding of the `SubjectPublicKeyInfo`.
    pub fn as_bytes(&self) -> &[u8] {
        self.document.as_bytes()
    }

    /// Parse a PEM-encoded key labelled either `PUBLIC KEY`
    /// (`SubjectPublicKeyInfo`) or `RSA PUBLIC KEY` (PKCS#1).
    #[cfg(feature = "pem")]
    pub fn from_pem(s: &str) -> spki::Result<Self> {
        let (label, document) = Document::from_pem(s)?;

        if label == SPKI_PEM_LABEL {
            Self::from_public_key_der(document.as_bytes())
        } else if label == PKCS1_PEM_LABEL {
            Self::from_pkcs1_der(document.as_bytes()).map_err(|_| spki::Error::KeyMalformed)
        } else {
            Err(der::Error::from(der::pem::Error::Label).into())
        }
    }
}

impl TryFrom<SubjectPublicKeyInfoRef<'_>> for SubjectPublicKey {
    type Error = spki::Error;

    fn try_from(spki: SubjectPublicKeyInfoRef<'_>) -> spki::Result<Self> {
        if spki.subject_public_key.raw_bytes().is_empty() {
            return Err(spki::Error::KeyMalformed);
        }

        Ok(Self {
            algorithm: spki.algorithm.oid,
            document: spki.try_into()?,
        })
    }
}

impl EncodePublicKey for SubjectPublicKey {
    fn to_public_key_der(&self) -> spki::Result<Document> {
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::{asn1::BitStringRef, Decode};
    use spki::AlgorithmIdentifierRef;

    const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

    #[test]
    fn test_from_spki_ref() {
        let key_material = [0x04; 65];
        let spki = SubjectPublicKeyInfoRef {
            algorithm: AlgorithmIdentifierRef {
                oid: ID_EC_PUBLIC_KEY,
                parameters: None,
            },
            subject_public_key: BitStringRef::from_bytes(&key_material).unwrap(),
        };

        let key = SubjectPublicKey::try_from(spki).unwrap();
        assert_eq!(key.algorithm(), ID_EC_PUBLIC_KEY);
        assert_eq!(key.to_public_key_der().unwrap().as_bytes(), key.as_bytes());

        let decoded = SubjectPublicKeyInfoRef::from_der(key.as_bytes()).unwrap();
        assert_eq!(decoded.subject_public_key.raw_bytes(), key_material);
    }

    #[test]
    fn test_empty_key_rejected() {
        let spki = SubjectPublicKeyInfoRef {
            algorithm: AlgorithmIdentifierRef {
                oid: ID_EC_PUBLIC_KEY,
                parameters: None,
            },
            subject_public_key: BitStringRef::from_bytes(&[]).unwrap(),
        };

        assert_eq!(
            SubjectPublicKey::try_from(spki),
            Err(spki::Error::KeyMalformed)
        );
    }

    #[cfg(feature = "pem")]
    #[test]
    fn test_unexpected_pem_label() {
        let pem = "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        assert!(SubjectPublicKey::from_pem(pem).is_err());
    }
}
