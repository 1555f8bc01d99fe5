//! Process-wide registry.

#![cfg(feature = "std")]

use tbb_ext::{tbbr, Error, Registry};

#[test]
fn global_registry_initializes_once() {
    assert!(Registry::global().is_none());

    let registry = Registry::init_global(tbbr::EXTENSIONS).unwrap();
    let nid = registry.nid(tbbr::TRUSTED_FW_NVCOUNTER).unwrap();

    assert_eq!(
        Registry::init_global(tbbr::EXTENSIONS).unwrap_err(),
        Error::AlreadyInitialized
    );

    let global = Registry::global().unwrap();
    assert_eq!(global.nid(tbbr::TRUSTED_FW_NVCOUNTER), Some(nid));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let registry = Registry::global().unwrap();
                let record = registry.encoder().encode_counter(nid, true, i).unwrap();
                registry.render(&record).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i.to_string());
    }
}
