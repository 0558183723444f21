#![cfg(test)]

use crate::config::RouteLayout;
use crate::guard::{decide, Navigator, RecordingNavigator, RedirectReason, RouteGuard};
use crate::storage::MemoryStorage;
use crate::store::SessionStore;
use crate::types::{Role, Session, User, Zone};

// --- Test Utilities ---

fn store() -> SessionStore<MemoryStorage> {
    SessionStore::with_defaults(MemoryStorage::new())
}

fn signed_in(role: Role) -> Session {
    Session::authenticated(User {
        id: "fixed-id".to_string(),
        username: "tester".to_string(),
        role,
        email: None,
    })
}

// --- decide ---

#[test]
fn test_decide_signed_out() {
    let layout = RouteLayout::default();
    let anon = Session::anonymous();

    let redirect = decide(&anon, "/admin/x", &layout).unwrap();
    assert_eq!(redirect.target, "/login");
    assert_eq!(redirect.reason, RedirectReason::Unauthenticated);

    // Even public pages send signed-out visitors to the login page.
    assert_eq!(decide(&anon, "/", &layout).unwrap().target, "/login");
    assert_eq!(decide(&anon, "/login", &layout), None);
    assert_eq!(decide(&anon, "/login?next=/admin", &layout), None);
}

#[test]
fn test_decide_admin_in_developer_zone() {
    let redirect = decide(&signed_in(Role::Admin), "/admin/developer/y", &RouteLayout::default()).unwrap();
    assert_eq!(redirect.target, "/admin");
    assert_eq!(
        redirect.reason,
        RedirectReason::InsufficientRole { role: Role::Admin, zone: Zone::DeveloperProtected }
    );
}

#[test]
fn test_decide_user_in_protected_zones() {
    let layout = RouteLayout::default();
    let user = signed_in(Role::User);
    assert_eq!(decide(&user, "/admin/developer/y", &layout).unwrap().target, "/admin");
    assert_eq!(decide(&user, "/admin", &layout).unwrap().target, "/");
    assert_eq!(decide(&user, "/videos", &layout), None);
}

#[test]
fn test_decide_sees_through_alternate_spellings() {
    let layout = RouteLayout::default();
    let user = signed_in(Role::User);
    let admin = signed_in(Role::Admin);

    assert_eq!(decide(&user, "//admin/x", &layout).unwrap().target, "/");
    assert_eq!(decide(&user, "/videos/../admin", &layout).unwrap().target, "/");
    assert_eq!(decide(&admin, "/admin//developer/y", &layout).unwrap().target, "/admin");
    assert_eq!(decide(&admin, "/admin/./developer/y", &layout).unwrap().target, "/admin");
    assert_eq!(decide(&admin, "//admin/x/", &layout), None);
}

#[test]
fn test_decide_developer_goes_anywhere() {
    let layout = RouteLayout::default();
    let dev = signed_in(Role::Developer);
    for path in ["/", "/admin", "/admin/developer/y", "/developer", "/login"] {
        assert_eq!(decide(&dev, path, &layout), None, "{path}");
    }
}

#[test]
fn test_decide_ignores_user_when_flag_is_false() {
    // Never produced by the store, but the guard must not trust the user alone.
    let mut session = signed_in(Role::Developer);
    session.is_authenticated = false;
    let redirect = decide(&session, "/admin", &RouteLayout::default()).unwrap();
    assert_eq!(redirect.reason, RedirectReason::Unauthenticated);
}

// --- RouteGuard ---

#[test]
fn test_guard_redirects_signed_out_visitor_once() {
    let mut store = store();
    let mut guard = RouteGuard::attach(&mut store, RecordingNavigator::pinned("/admin/x"));

    assert!(guard.evaluate().is_some());
    assert_eq!(guard.evaluate(), None);
    assert_eq!(guard.evaluate(), None);
    assert_eq!(guard.navigator().calls, vec!["/login".to_string()]);
}

#[test]
fn test_guard_following_navigator_settles_on_login() {
    let mut store = store();
    let mut guard = RouteGuard::attach(&mut store, RecordingNavigator::at("/admin/x"));

    guard.evaluate();
    assert_eq!(guard.navigator().current_location(), "/login");
    assert_eq!(guard.evaluate(), None);
    assert_eq!(guard.navigator().calls.len(), 1);
}

#[test]
fn test_guard_reissues_after_visitor_moves() {
    let mut store = store();
    let mut guard = RouteGuard::attach(&mut store, RecordingNavigator::pinned("/admin/x"));

    guard.evaluate();
    guard.navigator_mut().set_location("/admin/y");
    assert!(guard.evaluate().is_some());
    assert_eq!(guard.navigator().calls, vec!["/login".to_string(), "/login".to_string()]);
}

#[test]
fn test_guard_sees_login_and_logout() {
    let mut store = store();
    let mut guard = RouteGuard::attach(&mut store, RecordingNavigator::at("/login"));
    assert_eq!(guard.evaluate(), None);

    let landing = store.login("alice", Role::Admin).unwrap();
    guard.navigator_mut().set_location(landing);
    assert_eq!(guard.evaluate(), None);
    assert!(guard.session().is_authenticated);

    guard.navigator_mut().set_location("/admin/developer/logs");
    let redirect = guard.evaluate().unwrap();
    assert_eq!(redirect.target, "/admin");
    assert_eq!(guard.navigator().current_location(), "/admin");

    store.logout();
    let redirect = guard.evaluate().unwrap();
    assert_eq!(redirect.reason, RedirectReason::Unauthenticated);
    assert_eq!(guard.navigator().current_location(), "/login");
}

#[test]
fn test_guard_picks_up_session_restored_at_startup() {
    let shared = MemoryStorage::new();
    let mut first = SessionStore::with_defaults(shared.clone());
    first.login("bob", Role::Developer).unwrap();

    let mut store = SessionStore::with_defaults(shared);
    let mut guard = RouteGuard::attach(&mut store, RecordingNavigator::pinned("/admin/developer/y"));
    assert_eq!(guard.evaluate(), None);
    assert!(guard.navigator().calls.is_empty());
}

#[test]
fn test_user_sent_to_admin_root_ends_up_home() {
    let mut store = store();
    store.login("carol", Role::User).unwrap();
    let mut guard = RouteGuard::attach(&mut store, RecordingNavigator::at("/admin/developer/y"));

    guard.evaluate();
    guard.evaluate();
    assert_eq!(guard.evaluate(), None);
    assert_eq!(guard.navigator().calls, vec!["/admin".to_string(), "/".to_string()]);
}

#[test]
fn test_guard_uses_store_layout() {
    let config = crate::config::SessionConfig::from_json_str(
        r#"{ "layout": { "login": "/sign-in" } }"#,
    )
    .unwrap();
    let mut store = SessionStore::open(MemoryStorage::new(), config);
    let mut guard = RouteGuard::attach(&mut store, RecordingNavigator::at("/admin"));
    assert_eq!(guard.evaluate().unwrap().target, "/sign-in");
    assert_eq!(guard.layout().login, "/sign-in");
}
