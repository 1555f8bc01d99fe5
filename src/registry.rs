//! Extension registry.
//!
//! A [`Registry`] interns the object identifiers of custom extensions and
//! records the [`ValueMethod`] used to render and parse each of them. It is
//! built once from a table of [`ExtensionDefinition`]s and is read-only
//! afterwards, so it can be shared freely between threads.
//!
//! ```
//! use tbb_ext::{ExtensionDefinition, Registry, ValueKind};
//!
//! const DEFINITIONS: &[ExtensionDefinition] = &[
//!     ExtensionDefinition::new("1.2.3.4", "tbbHash", "TBB Hash", ValueKind::OctetString),
//!     ExtensionDefinition::sentinel(),
//! ];
//!
//! let registry = Registry::initialize(DEFINITIONS)?;
//! let nid = registry.nid("1.2.3.4").expect("registered");
//! let record = registry.encoder().encode_hash(nid, true, &[0xab; 32])?;
//! assert!(record.is_critical());
//! # Ok::<(), tbb_ext::Error>(())
//! ```

use alloc::{borrow::Cow, collections::BTreeMap, string::String};
use core::fmt;

use const_oid::ObjectIdentifier;
use log::{debug, warn};

use crate::{
    encode::{ExtensionEncoder, ExtensionRecord},
    errors::{Error, Result},
    method::{render_raw, ValueMethod},
    object::{Nid, ObjectInfo, ObjectTable},
};

/// `subjectKeyIdentifier` (RFC 5280 § 4.2.1.2).
pub const ID_CE_SUBJECT_KEY_IDENTIFIER: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("2.5.29.14");

/// `cRLNumber` (RFC 5280 § 5.2.3).
pub const ID_CE_CRL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.20");

/// `deltaCRLIndicator` (RFC 5280 § 5.2.4).
pub const ID_CE_DELTA_CRL_INDICATOR: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.27");

/// Extensions every registry starts out with.
const BUILTIN: &[ExtensionDefinition] = &[
    ExtensionDefinition::new(
        "2.5.29.14",
        "subjectKeyIdentifier",
        "X509v3 Subject Key Identifier",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        "2.5.29.20",
        "crlNumber",
        "X509v3 CRL Number",
        ValueKind::Integer,
    ),
    ExtensionDefinition::new(
        "2.5.29.27",
        "deltaCRL",
        "X509v3 Delta CRL Indicator",
        ValueKind::Integer,
    ),
];

/// ASN.1 type of an extension's payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
    /// ASN.1 `INTEGER`, e.g. a non-volatile counter.
    Integer,

    /// ASN.1 `OCTET STRING`, e.g. a digest or an encoded public key.
    OctetString,

    /// Any other type. The identifier is interned but no [`ValueMethod`] is
    /// attached, so the payload renders as raw text.
    Unsupported,
}

impl ValueKind {
    /// Textual name, as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::OctetString => "octet-string",
            ValueKind::Unsupported => "unsupported",
        }
    }

    /// Look up a kind by name. Unknown names map to [`ValueKind::Unsupported`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "integer" => ValueKind::Integer,
            "octet-string" => ValueKind::OctetString,
            _ => ValueKind::Unsupported,
        }
    }

    fn method(self) -> Option<ValueMethod> {
        match self {
            ValueKind::Integer => Some(ValueMethod::Integer),
            ValueKind::OctetString => Some(ValueMethod::OctetString),
            ValueKind::Unsupported => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a custom extension, supplied when building a [`Registry`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtensionDefinition {
    /// Dotted-decimal object identifier. Empty marks the end of a table.
    pub oid: Cow<'static, str>,

    /// Short display name.
    pub short_name: Cow<'static, str>,

    /// Long display name.
    pub long_name: Cow<'static, str>,

    /// Existing extension (OID or name) whose behaviour is reused.
    #[cfg_attr(feature = "serde", serde(default))]
    pub alias: Option<Cow<'static, str>>,

    /// Payload type, ignored when `alias` is set.
    #[cfg_attr(feature = "serde", serde(default = "unsupported"))]
    pub value_kind: ValueKind,
}

#[cfg(feature = "serde")]
fn unsupported() -> ValueKind {
    ValueKind::Unsupported
}

impl ExtensionDefinition {
    /// Define an extension carrying a payload of the given kind.
    pub const fn new(
        oid: &'static str,
        short_name: &'static str,
        long_name: &'static str,
        value_kind: ValueKind,
    ) -> Self {
        Self {
            oid: Cow::Borrowed(oid),
            short_name: Cow::Borrowed(short_name),
            long_name: Cow::Borrowed(long_name),
            alias: None,
            value_kind,
        }
    }

    /// Define an extension that behaves like the existing extension `target`.
    pub const fn aliased(
        oid: &'static str,
        short_name: &'static str,
        long_name: &'static str,
        target: &'static str,
    ) -> Self {
        Self {
            oid: Cow::Borrowed(oid),
            short_name: Cow::Borrowed(short_name),
            long_name: Cow::Borrowed(long_name),
            alias: Some(Cow::Borrowed(target)),
            value_kind: ValueKind::Unsupported,
        }
    }

    /// End-of-table marker.
    pub const fn sentinel() -> Self {
        Self::new("", "", "", ValueKind::Unsupported)
    }

    /// Is this the end-of-table marker?
    pub fn is_sentinel(&self) -> bool {
        self.oid.is_empty()
    }
}

/// Table of known extensions and their value behaviour.
#[derive(Clone, Debug)]
pub struct Registry {
    objects: ObjectTable,
    methods: BTreeMap<Nid, ValueMethod>,
}

impl Registry {
    /// Build a registry from `definitions`.
    ///
    /// Definitions are processed in order up to the first
    /// [sentinel][ExtensionDefinition::sentinel] or the end of the slice.
    /// Registration is all-or-nothing: the first rejected definition aborts
    /// with [`Error::RegistrationFailed`] and nothing is kept.
    pub fn initialize(definitions: &[ExtensionDefinition]) -> Result<Self> {
        let mut registry = Self::builtin()?;

        for definition in definitions.iter().take_while(|d| !d.is_sentinel()) {
            if let Err(err) = registry.register(definition) {
                warn!("{err}");
                return Err(err);
            }
        }

        debug!("extension registry initialized with {} objects", registry.len());
        Ok(registry)
    }

    fn builtin() -> Result<Self> {
        let mut registry = Self {
            objects: ObjectTable::new(),
            methods: BTreeMap::new(),
        };

        for definition in BUILTIN {
            registry.register(definition)?;
        }

        Ok(registry)
    }

    fn register(&mut self, definition: &ExtensionDefinition) -> Result<()> {
        let nid = self.objects.intern(
            &definition.oid,
            &definition.short_name,
            &definition.long_name,
        )?;

        let method = match &definition.alias {
            Some(target) => self.alias_target(&definition.oid, target)?,
            None => match definition.value_kind.method() {
                Some(method) => method,
                None => {
                    warn!(
                        "{} ({}) has unsupported value kind, no methods attached",
                        definition.oid, definition.short_name
                    );
                    return Ok(());
                }
            },
        };

        if let Some(previous) = self.methods.insert(nid, method) {
            debug!("{nid}: replaced {previous:?} methods with {method:?}");
        } else {
            debug!("{nid}: attached {method:?} methods");
        }

        Ok(())
    }

    fn alias_target(&self, oid: &str, target: &str) -> Result<ValueMethod> {
        let target_nid = self.objects.lookup(target).ok_or_else(|| {
            Error::registration(oid, format!("alias target `{target}` is not registered"))
        })?;

        self.methods.get(&target_nid).copied().ok_or_else(|| {
            Error::registration(oid, format!("alias target `{target}` has no extension methods"))
        })
    }

    /// Resolve dotted OID text, a short name or a long name to an identifier.
    pub fn nid(&self, text: &str) -> Option<Nid> {
        self.objects.lookup(text)
    }

    /// Identifier of an object identifier, if registered.
    pub fn nid_for_oid(&self, oid: &ObjectIdentifier) -> Option<Nid> {
        self.objects.lookup_oid(oid)
    }

    /// Names registered for `nid`.
    pub fn object(&self, nid: Nid) -> Option<&ObjectInfo> {
        self.objects.get(nid)
    }

    /// Value behaviour attached to `nid`, if any.
    pub fn method(&self, nid: Nid) -> Option<ValueMethod> {
        self.methods.get(&nid).copied()
    }

    /// Number of interned objects, built-in extensions included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects have been interned.
    pub fn is_empty(&self) -> bool {
        self.objects.len() == 0
    }

    /// Encoder producing [`ExtensionRecord`]s for extensions of this registry.
    pub fn encoder(&self) -> ExtensionEncoder<'_> {
        ExtensionEncoder::new(self)
    }

    /// Render the payload of `record` for human inspection.
    ///
    /// Extensions without a [`ValueMethod`] fall back to a raw rendering.
    pub fn render(&self, record: &ExtensionRecord) -> Result<String> {
        let nid = record.nid();
        if self.object(nid).is_none() {
            return Err(Error::UnknownExtension(nid));
        }

        match self.method(nid) {
            Some(method) => method.render(record.payload()),
            None => Ok(render_raw(record.payload())),
        }
    }
}

#[cfg(feature = "std")]
static GLOBAL: std::sync::OnceLock<Registry> = std::sync::OnceLock::new();

#[cfg(feature = "std")]
impl Registry {
    /// Initialize the process-wide registry.
    ///
    /// Succeeds exactly once per process; later calls return
    /// [`Error::AlreadyInitialized`] without touching the installed registry.
    pub fn init_global(definitions: &[ExtensionDefinition]) -> Result<&'static Registry> {
        if GLOBAL.get().is_some() {
            return Err(Error::AlreadyInitialized);
        }

        let registry = Self::initialize(definitions)?;
        GLOBAL
            .set(registry)
            .map_err(|_| Error::AlreadyInitialized)?;
        GLOBAL.get().ok_or(Error::AlreadyInitialized)
    }

    /// The process-wide registry, if [`Registry::init_global`] has succeeded.
    pub fn global() -> Option<&'static Registry> {
        GLOBAL.get()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValueKind {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ValueKind {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = <Cow<'de, str>>::deserialize(deserializer)?;
        Ok(ValueKind::from_name(&name))
    }
}
