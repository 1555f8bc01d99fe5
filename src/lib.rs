#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! # Usage
//!
//! ## Registering extensions
//!
//! ```
//! use tbb_ext::{tbbr, Registry};
//!
//! let registry = Registry::initialize(tbbr::EXTENSIONS)?;
//! let counter = registry.nid(tbbr::TRUSTED_FW_NVCOUNTER).expect("registered");
//! assert_eq!(registry.object(counter).unwrap().short_name(), "TrustedNvCounter");
//! # Ok::<(), tbb_ext::Error>(())
//! ```
//!
//! ## Encoding hashes and counters
//!
//! ```
//! use tbb_ext::{tbbr, Registry};
//!
//! let registry = Registry::initialize(tbbr::EXTENSIONS)?;
//! let encoder = registry.encoder();
//!
//! let bl2 = registry.nid(tbbr::TRUSTED_BOOT_FW_HASH).expect("registered");
//! let hash = encoder.encode_hash(bl2, true, &[0xab; 32])?;
//! assert_eq!(&hash.payload()[..2], &[0x04, 0x20]);
//!
//! let nv = registry.nid(tbbr::TRUSTED_FW_NVCOUNTER).expect("registered");
//! let counter = encoder.encode_counter(nv, true, 31)?;
//! assert_eq!(registry.render(&counter)?, "31");
//! # Ok::<(), tbb_ext::Error>(())
//! ```
//!
//! ## Encoding public keys
//!
//! Any [`spki::EncodePublicKey`] implementation can be embedded. Keys
//! loaded from PEM or DER can use [`SubjectPublicKey`]:
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # #[cfg(feature = "pem")]
//! # {
//! use tbb_ext::{tbbr, Registry, SubjectPublicKey};
//!
//! let pem = "-----BEGIN PUBLIC KEY-----
//! MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAtsQsUV8QpqrygsY+2+JC
//! Q6Fw8/omM71IM2N/R8pPbzbgOl0p78MZGsgPOQ2HSznjD0FPzsH8oO2B5Uftws04
//! LHb2HJAYlz25+lN5cqfHAfa3fgmC38FfwBkn7l582UtPWZ/wcBOnyCgb3yLcvJrX
//! yrt8QxHJgvWO23ITrUVYszImbXQ67YGS0YhMrbixRzmo2tpm3JcIBtnHrEUMsT0N
//! fFdfsZhTT8YbxBvA8FdODgEwx7u/vf3J9qbi4+Kv8cvqyJuleIRSjVXPsIMnoejI
//! n04APPKIjpMyQdnWlby7rNyQtE4+CV+jcFjqJbE/Xilcvqxt6DirjFCvYeKYl1uH
//! LwIDAQAB
//! -----END PUBLIC KEY-----";
//!
//! let key = SubjectPublicKey::from_pem(pem)?;
//! let registry = Registry::initialize(tbbr::EXTENSIONS)?;
//! let nid = registry.nid(tbbr::TRUSTED_WORLD_PK).expect("registered");
//! let record = registry.encoder().encode_public_key(nid, true, &key)?;
//! assert_eq!(record.payload(), key.as_bytes());
//! # }
//! # Ok(())
//! # }
//! ```

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use const_oid;
pub use der;
pub use digest;
pub use pkcs1;
pub use spki;
pub use x509_cert;

pub mod errors;
pub mod tbbr;

mod encode;
mod key;
mod method;
mod object;
mod registry;

#[cfg(feature = "sha2")]
pub use sha2;

pub use crate::{
    encode::{ExtensionEncoder, ExtensionRecord, MAX_PUBLIC_KEY_LEN},
    errors::{Error, Result},
    key::SubjectPublicKey,
    method::ValueMethod,
    object::{Nid, ObjectInfo},
    registry::{
        ExtensionDefinition, Registry, ValueKind, ID_CE_CRL_NUMBER, ID_CE_DELTA_CRL_INDICATOR,
        ID_CE_SUBJECT_KEY_IDENTIFIER,
    },
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
