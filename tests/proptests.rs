//! Property-based tests.

use proptest::prelude::*;
use tbb_ext::{
    der::{asn1::OctetStringRef, Decode},
    tbbr, Registry,
};

/// Content length of the minimal two's complement encoding of `value`.
fn minimal_len(value: i64) -> usize {
    let significant_bits = 64 - value.leading_zeros() as usize;
    significant_bits / 8 + 1
}

proptest! {
    #[test]
    fn hash_roundtrip(digest in prop::collection::vec(any::<u8>(), 0..512)) {
        let registry = Registry::initialize(tbbr::EXTENSIONS).unwrap();
        let nid = registry.nid(tbbr::TRUSTED_BOOT_FW_HASH).unwrap();

        let record = registry.encoder().encode_hash(nid, true, &digest).unwrap();
        let decoded = OctetStringRef::from_der(record.payload()).unwrap();
        prop_assert_eq!(decoded.as_bytes(), digest.as_slice());
    }

    #[test]
    fn hash_is_injective(a in any::<Vec<u8>>(), b in any::<Vec<u8>>()) {
        prop_assume!(a != b);
        let registry = Registry::initialize(tbbr::EXTENSIONS).unwrap();
        let nid = registry.nid(tbbr::SCP_FW_HASH).unwrap();
        let encoder = registry.encoder();

        let ra = encoder.encode_hash(nid, false, &a).unwrap();
        let rb = encoder.encode_hash(nid, false, &b).unwrap();
        prop_assert_ne!(ra.payload(), rb.payload());
    }

    #[test]
    fn counter_roundtrip(value in 0..=i64::MAX) {
        let registry = Registry::initialize(tbbr::EXTENSIONS).unwrap();
        let nid = registry.nid(tbbr::NON_TRUSTED_FW_NVCOUNTER).unwrap();

        let record = registry.encoder().encode_counter(nid, false, value).unwrap();
        prop_assert_eq!(i64::from_der(record.payload()).unwrap(), value);
        prop_assert_eq!(record.payload().len(), 2 + minimal_len(value));
        prop_assert_eq!(registry.render(&record).unwrap(), value.to_string());
    }
}
