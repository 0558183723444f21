//!
//! The session store: sole owner and writer of the `Session`.

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::events::{EventBus, SessionEvent, Subscription};
use crate::rights;
use crate::storage::SessionStorage;
use crate::types::{Role, Session, User, Zone};

/// Owns the session, persists it after every mutation and notifies observers.
///
/// Construction restores the persisted record; `close` flushes it and hands the
/// storage backend back. There is no ambient instance: callers create a store and
/// pass it (or a subscription to it) to whatever needs it.
#[derive(Debug)]
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    config: SessionConfig,
    session: Session,
    events: EventBus,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Opens a store over `storage`, restoring any persisted session.
    ///
    /// Never fails: a missing, unreadable or malformed record yields the anonymous session.
    pub fn open(mut storage: S, config: SessionConfig) -> Self {
        let session = restore(&mut storage, &config.storage_key);
        tracing::debug!(
            key = %config.storage_key,
            authenticated = session.is_authenticated,
            "session store opened"
        );
        SessionStore {
            storage,
            config,
            session,
            events: EventBus::new(),
        }
    }

    /// Opens a store with the default configuration.
    pub fn with_defaults(storage: S) -> Self {
        Self::open(storage, SessionConfig::default())
    }

    /// Re-reads the persisted record, replacing the in-memory session, and emits
    /// `SessionEvent::Restored`.
    pub fn rehydrate(&mut self) -> &Session {
        self.session = restore(&mut self.storage, &self.config.storage_key);
        self.events.publish(SessionEvent::Restored(self.session.clone()));
        &self.session
    }

    /// Signs `username` in with `role` and returns the post-login destination.
    ///
    /// The previous user, if any, is replaced wholesale. The store never navigates;
    /// the caller is expected to send the visitor to the returned path.
    pub fn login(&mut self, username: &str, role: Role) -> Result<String, SessionError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SessionError::EmptyUsername);
        }
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            role,
            email: derive_email(username, self.config.email_domain.as_deref()),
        };
        tracing::info!(username = %user.username, %role, "login");

        self.commit(Session::authenticated(user.clone()), SessionEvent::LoggedIn(user));
        Ok(self.config.layout.landing_path(role).to_string())
    }

    /// Like [`login`](Self::login), for a role given by name.
    ///
    /// Unrecognised role names are rejected with `SessionError::UnknownRole` and
    /// leave the session untouched.
    pub fn login_as(&mut self, username: &str, role: &str) -> Result<String, SessionError> {
        let role: Role = role.parse()?;
        self.login(username, role)
    }

    /// Signs out. Calling this while signed out leaves the same end state.
    pub fn logout(&mut self) {
        if let Some(user) = &self.session.user {
            tracing::info!(username = %user.username, "logout");
        } else {
            tracing::debug!("logout while already signed out");
        }
        self.commit(Session::anonymous(), SessionEvent::LoggedOut);
    }

    /// `true` iff a user is signed in and their role may enter the admin area.
    pub fn can_access_admin(&self) -> bool {
        self.can_enter(Zone::AdminProtected)
    }

    /// `true` iff a user is signed in with the `developer` role.
    pub fn can_access_developer(&self) -> bool {
        self.can_enter(Zone::DeveloperProtected)
    }

    /// `true` iff a user is signed in and their role may enter `zone`.
    pub fn can_enter(&self, zone: Zone) -> bool {
        self.session
            .role()
            .is_some_and(|role| rights::can_enter(role, zone))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    /// Where the signed-in user lands after login. `None` when signed out.
    pub fn landing_path(&self) -> Option<&str> {
        self.role().map(|role| self.config.layout.landing_path(role))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Registers an observer for session changes made after this call.
    pub fn subscribe(&mut self) -> Subscription {
        self.events.subscribe()
    }

    /// Writes the current session to storage, surfacing any failure.
    pub fn flush(&mut self) -> Result<(), SessionError> {
        let record = self.session.to_record()?;
        self.storage.save(&self.config.storage_key, &record)?;
        Ok(())
    }

    /// Flushes the session and returns the storage backend.
    pub fn close(mut self) -> S {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "failed to flush session on close");
        }
        self.storage
    }

    /// Applies a new session, persists it, then notifies observers, in that order.
    fn commit(&mut self, session: Session, event: SessionEvent) {
        debug_assert!(session.is_consistent());
        self.session = session;
        if let Err(e) = self.flush() {
            // The in-memory session stays authoritative; the next write retries.
            tracing::warn!(error = %e, key = %self.config.storage_key, "failed to persist session");
        }
        self.events.publish(event);
    }
}

/// Reads the persisted session under `key`, falling back to the anonymous session.
///
/// A record that cannot be decoded is removed so later restores start clean.
fn restore<S: SessionStorage>(storage: &mut S, key: &str) -> Session {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(%key, "no persisted session");
            return Session::anonymous();
        }
        Err(e) => {
            tracing::warn!(error = %e, %key, "failed to read persisted session, starting signed out");
            return Session::anonymous();
        }
    };
    match Session::from_record(&raw) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, %key, "discarding malformed persisted session");
            if let Err(e) = storage.remove(key) {
                tracing::warn!(error = %e, %key, "failed to remove malformed session record");
            }
            Session::anonymous()
        }
    }
}

/// A username that already looks like an address is used as-is; otherwise an
/// address is built from the configured domain, if there is one.
fn derive_email(username: &str, domain: Option<&str>) -> Option<String> {
    if username.contains('@') {
        return Some(username.to_string());
    }
    domain
        .map(|d| d.trim_start_matches('@'))
        .filter(|d| !d.is_empty())
        .map(|d| format!("{}@{}", username.to_lowercase().replace(' ', "."), d))
}
