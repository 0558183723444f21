//!
//! Route guard: decides whether the visitor must be moved elsewhere and, if so,
//! tells the navigator once.

use crate::config::RouteLayout;
use crate::events::Subscription;
use crate::rights;
use crate::storage::SessionStorage;
use crate::store::SessionStore;
use crate::types::{Role, Session, Zone};

use super::navigator::Navigator;

/// Why the guard moved the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Nobody is signed in.
    Unauthenticated,
    /// The signed-in role may not enter the zone of the requested location.
    InsufficientRole { role: Role, zone: Zone },
}

/// A redirect decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub reason: RedirectReason,
}

/// Decides whether `location` must be left, given `session`.
///
/// First match wins:
/// 1. signed out, not on the login page → login page;
/// 2. signed in, developer-protected location, role cannot enter it → admin root;
/// 3. signed in, admin-protected location, role cannot enter it → home;
/// 4. otherwise stay.
///
/// Rules 2 and 3 both defer to [`rights::can_enter`], so the guard denies exactly
/// the (role, zone) pairs the capability matrix denies.
pub fn decide(session: &Session, location: &str, layout: &RouteLayout) -> Option<Redirect> {
    let Some(role) = session.role().filter(|_| session.is_authenticated) else {
        if layout.is_login(location) {
            return None;
        }
        return Some(Redirect {
            target: layout.login.clone(),
            reason: RedirectReason::Unauthenticated,
        });
    };

    let zone = rights::classify_with(location, layout);
    if rights::can_enter(role, zone) {
        return None;
    }
    let target = match zone {
        Zone::DeveloperProtected => &layout.admin_root,
        Zone::AdminProtected => &layout.home,
        // Every role may enter public pages.
        Zone::Public => return None,
    };
    Some(Redirect {
        target: target.clone(),
        reason: RedirectReason::InsufficientRole { role, zone },
    })
}

/// Inputs and outcome of the last redirect the guard issued.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IssuedRedirect {
    session: Session,
    location: String,
    target: String,
}

/// Reactive evaluator over a session subscription and a navigator.
///
/// Hosts call [`evaluate`](Self::evaluate) whenever the location may have changed
/// (every navigation tick or re-render is fine); session changes are picked up from
/// the store's event channel at the start of each evaluation.
#[derive(Debug)]
pub struct RouteGuard<N: Navigator> {
    navigator: N,
    layout: RouteLayout,
    events: Subscription,
    session: Session,
    last: Option<IssuedRedirect>,
}

impl<N: Navigator> RouteGuard<N> {
    /// Subscribes to `store` and snapshots its current session.
    pub fn attach<S: SessionStorage>(store: &mut SessionStore<S>, navigator: N) -> Self {
        RouteGuard {
            navigator,
            layout: store.config().layout.clone(),
            events: store.subscribe(),
            session: store.session().clone(),
            last: None,
        }
    }

    /// Applies pending session events, then redirects if the current location is
    /// not allowed. Returns the redirect issued by this call, if any.
    ///
    /// A redirect is not issued again while the session and the location are the
    /// same as when it was last issued.
    pub fn evaluate(&mut self) -> Option<Redirect> {
        self.sync();
        let location = self.navigator.current_location();

        let Some(redirect) = decide(&self.session, &location, &self.layout) else {
            self.last = None;
            return None;
        };

        if rights::normalize_path(&redirect.target) == rights::normalize_path(&location) {
            tracing::debug!(%location, "already at redirect target");
            return None;
        }

        let issued = IssuedRedirect {
            session: self.session.clone(),
            location,
            target: redirect.target.clone(),
        };
        if self.last.as_ref() == Some(&issued) {
            tracing::trace!(to = %issued.target, "redirect already issued for these inputs");
            return None;
        }

        tracing::info!(
            from = %issued.location,
            to = %redirect.target,
            reason = ?redirect.reason,
            "route guard redirect"
        );
        self.navigator.navigate(&redirect.target);
        self.last = Some(issued);
        Some(redirect)
    }

    /// The session as last seen by the guard.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn layout(&self) -> &RouteLayout {
        &self.layout
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn into_navigator(self) -> N {
        self.navigator
    }

    fn sync(&mut self) {
        if let Some(event) = self.events.latest() {
            tracing::debug!(?event, "route guard observed session change");
            self.session = event.session();
        }
    }
}
