#![no_main]

// Harness: restore_session
// Arbitrary bytes in the persisted record must never panic the store and must
// always restore a session whose flag agrees with its user.

use libfuzzer_sys::fuzz_target;
use gatehouse_core::{config::DEFAULT_STORAGE_KEY, MemoryStorage, SessionStore};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let storage = MemoryStorage::new().with_record(DEFAULT_STORAGE_KEY, raw.into_owned());
    let store = SessionStore::with_defaults(storage);

    let session = store.session();
    assert!(session.is_consistent());
    if !session.is_authenticated {
        assert!(!store.can_access_admin());
        assert!(!store.can_access_developer());
    }
});
