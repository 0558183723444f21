#![no_main]

// Harness: guard_decide
// For any location and role, the guard redirects exactly when the capability
// matrix denies entry, and evaluating twice never navigates twice.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use gatehouse_core::{
    guard::{decide, RecordingNavigator},
    rights, MemoryStorage, Role, RouteGuard, RouteLayout, SessionStore,
};

#[derive(Arbitrary, Debug, Clone)]
struct GuardFrame {
    role: Option<u8>,
    location: String,
}

fuzz_target!(|frame: GuardFrame| {
    let role = frame.role.map(|r| Role::ALL[usize::from(r) % Role::ALL.len()]);
    let mut store = SessionStore::with_defaults(MemoryStorage::new());
    if let Some(role) = role {
        let _ = store.login("fuzz", role);
    }

    let layout = RouteLayout::default();
    let redirect = decide(store.session(), &frame.location, &layout);
    if let Some(role) = role {
        let zone = rights::classify_with(&frame.location, &layout);
        assert_eq!(redirect.is_none(), rights::can_enter(role, zone));
    }

    let mut guard = RouteGuard::attach(&mut store, RecordingNavigator::pinned(frame.location));
    guard.evaluate();
    guard.evaluate();
    assert!(guard.navigator().calls.len() <= 1);
});
