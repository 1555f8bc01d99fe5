//! Error types.

use alloc::string::String;
use core::fmt;

use const_oid::ObjectIdentifier;

use crate::object::Nid;

/// Alias for [`core::result::Result`] with the `tbb-ext` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An extension definition was rejected while building a registry.
    RegistrationFailed {
        /// Object identifier of the rejected definition, as supplied.
        oid: String,
        /// Diagnostic describing why registration failed.
        reason: String,
    },

    /// The process-wide registry has already been initialized.
    AlreadyInitialized,

    /// No extension with this identifier is known to the registry.
    UnknownExtension(Nid),

    /// The public key could not be serialized as a `SubjectPublicKeyInfo`.
    KeySerializationFailed {
        /// Extension the key was being encoded for.
        oid: ObjectIdentifier,
        /// Underlying serialization error.
        error: spki::Error,
    },

    /// The serialized public key exceeds the maximum supported size.
    KeyTooLarge {
        /// Extension the key was being encoded for.
        oid: ObjectIdentifier,
        /// Length of the DER-encoded `SubjectPublicKeyInfo`.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// Textual extension value could not be parsed.
    InvalidValue {
        /// Diagnostic describing the malformed input.
        reason: String,
    },

    /// ASN.1 DER-related errors.
    Der(der::Error),
}

impl core::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RegistrationFailed { oid, reason } => {
                write!(f, "failed to register extension {oid}: {reason}")
            }
            Error::AlreadyInitialized => write!(f, "extension registry already initialized"),
            Error::UnknownExtension(nid) => write!(f, "unknown extension identifier {nid}"),
            Error::KeySerializationFailed { oid, error } => {
                write!(f, "public key for extension {oid}: serialization failed: {error}")
            }
            Error::KeyTooLarge { oid, len, max } => {
                write!(
                    f,
                    "public key for extension {oid}: encoded key is {len} bytes, limit is {max}"
                )
            }
            Error::InvalidValue { reason } => write!(f, "invalid extension value: {reason}"),
            Error::Der(err) => write!(f, "DER error: {err}"),
        }
    }
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Der(err)
    }
}

impl Error {
    pub(crate) fn registration(oid: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::RegistrationFailed {
            oid: oid.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_value(reason: impl Into<String>) -> Self {
        Error::InvalidValue {
            reason: reason.into(),
        }
    }
}
