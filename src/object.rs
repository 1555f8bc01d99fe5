//! Object identifier interning.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use core::{
    fmt,
    sync::atomic::{AtomicU32, Ordering},
};

use const_oid::ObjectIdentifier;
use log::{debug, trace};

use crate::errors::{Error, Result};

/// Numeric extension identifier assigned by a [`Registry`][crate::Registry].
///
/// Identifiers are handed out sequentially in interning order and stay valid
/// for the lifetime of the registry that issued them. Each identifier is
/// bound to its issuing registry: any other registry treats it as unknown.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Nid {
    table: u32,
    id: u32,
}

impl Nid {
    /// Returns the raw numeric value.
    pub const fn get(self) -> u32 {
        self.id
    }

    fn index(self) -> usize {
        self.id as usize - 1
    }
}

impl fmt::Display for Nid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Source of [`ObjectTable`] identities.
static NEXT_TABLE: AtomicU32 = AtomicU32::new(1);

/// Names attached to an interned object identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObjectInfo {
    oid: ObjectIdentifier,
    short_name: String,
    long_name: String,
}

impl ObjectInfo {
    /// Object identifier.
    pub fn oid(&self) -> ObjectIdentifier {
        self.oid
    }

    /// Short display name, e.g. `tbbHash`.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Long display name, e.g. `TBB Hash`.
    pub fn long_name(&self) -> &str {
        &self.long_name
    }
}

/// Table mapping object identifiers and their names to [`Nid`]s.
#[derive(Clone, Debug)]
pub(crate) struct ObjectTable {
    id: u32,
    objects: Vec<ObjectInfo>,
    by_oid: BTreeMap<ObjectIdentifier, Nid>,
    by_name: BTreeMap<String, Nid>,
}

impl ObjectTable {
    pub(crate) fn new() -> Self {
        Self {
            id: NEXT_TABLE.fetch_add(1, Ordering::Relaxed),
            objects: Vec::new(),
            by_oid: BTreeMap::new(),
            by_name: BTreeMap::new(),
        }
    }

    /// Intern `oid` under the given names, returning its identifier.
    ///
    /// Interning an OID that is already present returns the existing
    /// identifier and keeps the names it was first registered with.
    pub(crate) fn intern(&mut self, oid: &str, short_name: &str, long_name: &str) -> Result<Nid> {
        let parsed = ObjectIdentifier::new(oid)
            .map_err(|err| Error::registration(oid, format!("invalid object identifier: {err}")))?;

        if short_name.is_empty() || long_name.is_empty() {
            return Err(Error::registration(oid, "short and long names must be non-empty"));
        }

        if let Some(&nid) = self.by_oid.get(&parsed) {
            trace!("{parsed} already interned as {nid}");
            return Ok(nid);
        }

        for name in [short_name, long_name] {
            if let Some(&other) = self.by_name.get(name) {
                return Err(Error::registration(
                    oid,
                    format!("name `{name}` already used by {}", self.objects[other.index()].oid),
                ));
            }
        }

        let next = u32::try_from(self.objects.len() + 1)
            .map_err(|_| Error::registration(oid, "object table is full"))?;
        let nid = Nid {
            table: self.id,
            id: next,
        };

        self.objects.push(ObjectInfo {
            oid: parsed,
            short_name: short_name.to_string(),
            long_name: long_name.to_string(),
        });
        self.by_oid.insert(parsed, nid);
        self.by_name.insert(short_name.to_string(), nid);
        self.by_name.insert(long_name.to_string(), nid);

        debug!("interned {parsed} ({short_name}) as {nid}");
        Ok(nid)
    }

    /// Resolve dotted OID text, a short name or a long name.
    pub(crate) fn lookup(&self, text: &str) -> Option<Nid> {
        match ObjectIdentifier::new(text) {
            Ok(oid) => self.lookup_oid(&oid),
            Err(_) => self.by_name.get(text).copied(),
        }
    }

    pub(crate) fn lookup_oid(&self, oid: &ObjectIdentifier) -> Option<Nid> {
        self.by_oid.get(oid).copied()
    }

    pub(crate) fn get(&self, nid: Nid) -> Option<&ObjectInfo> {
        if nid.table != self.id {
            return None;
        }
        nid.id.checked_sub(1).and_then(|i| self.objects.get(i as usize))
    }

    pub(crate) fn len(&self) -> usize {
        self.objects.len()
    }
}
