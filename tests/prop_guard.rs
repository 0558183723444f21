use proptest::prelude::*;
use gatehouse_core::guard::{decide, RecordingNavigator};
use gatehouse_core::rights;
use gatehouse_core::{MemoryStorage, Role, RouteGuard, RouteLayout, Session, SessionStore, User};

fn any_session() -> impl Strategy<Value = Session> {
    prop_oneof![
        Just(Session::anonymous()),
        prop_oneof![Just(Role::User), Just(Role::Admin), Just(Role::Developer)].prop_map(|role| {
            Session::authenticated(User {
                id: "p".to_string(),
                username: "prop".to_string(),
                role,
                email: None,
            })
        }),
    ]
}

fn any_location() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        Just("/login".to_string()),
        Just("/admin".to_string()),
        Just("/developer".to_string()),
        "/admin(/[a-z]{1,6}){0,2}",
        "/admin/developer(/[a-z]{1,6}){0,2}",
        "/[a-z]{1,8}",
    ]
}

proptest! {
    /// Signed-in redirects happen exactly where the capability matrix denies entry.
    #[test]
    fn prop_guard_matches_matrix(session in any_session(), location in any_location()) {
        let layout = RouteLayout::default();
        let redirect = decide(&session, &location, &layout);
        match session.role() {
            Some(role) => {
                let allowed = rights::can_enter(role, rights::classify_with(&location, &layout));
                prop_assert_eq!(redirect.is_none(), allowed);
            }
            None => prop_assert_eq!(redirect.is_none(), layout.is_login(&location)),
        }
    }

    /// A redirect target is always somewhere the guard would leave the visitor alone,
    /// except for a user bounced from a developer page to the admin root.
    #[test]
    fn prop_targets_are_stable(session in any_session(), location in any_location()) {
        let layout = RouteLayout::default();
        if let Some(redirect) = decide(&session, &location, &layout) {
            let second = decide(&session, &redirect.target, &layout);
            if session.role() == Some(Role::User) && redirect.target == layout.admin_root {
                prop_assert_eq!(second.map(|r| r.target), Some(layout.home.clone()));
            } else {
                prop_assert_eq!(second, None);
            }
        }
    }

    /// Repeated evaluation with unchanged inputs issues at most one navigation.
    #[test]
    fn prop_evaluation_is_idempotent(
        role in prop::option::of(prop_oneof![Just(Role::User), Just(Role::Admin), Just(Role::Developer)]),
        location in any_location(),
        repeats in 1usize..6,
    ) {
        let mut store = SessionStore::with_defaults(MemoryStorage::new());
        if let Some(role) = role {
            store.login("prop", role).unwrap();
        }
        let mut guard = RouteGuard::attach(&mut store, RecordingNavigator::pinned(location));
        for _ in 0..repeats {
            guard.evaluate();
        }
        prop_assert!(guard.navigator().calls.len() <= 1);
    }
}
