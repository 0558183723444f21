#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Gatehouse-Core is the session and route-guard core of the site's admin area.
//!
//! It tracks whether a visitor is signed in and with which role, persists that
//! state across restarts, and decides which URL subtrees the role may reach. The
//! host supplies the storage backend and the navigator; this crate never renders
//! anything and never talks to a network.
//!
//! ```
//! use gatehouse_core::{MemoryStorage, Role, RouteGuard, SessionStore};
//! # use gatehouse_core::guard::Navigator;
//! # struct Router(String);
//! # impl Navigator for Router {
//! #     fn current_location(&self) -> String { self.0.clone() }
//! #     fn navigate(&mut self, path: &str) { self.0 = path.to_string(); }
//! # }
//!
//! let mut store = SessionStore::with_defaults(MemoryStorage::new());
//! let mut guard = RouteGuard::attach(&mut store, Router("/admin/videos".into()));
//!
//! guard.evaluate(); // signed out: sent to /login
//! assert_eq!(guard.navigator().current_location(), "/login");
//!
//! let landing = store.login("alice", Role::Admin).unwrap();
//! assert_eq!(landing, "/admin");
//! assert!(store.can_access_admin());
//! ```

// Shared data types (Role, Zone, User, Session).
pub mod types;

// Capability matrix: zone bits, role policy, location classification.
pub mod rights;

// Route layout and store configuration.
pub mod config;

// Error types.
pub mod error;

// Session change notifications.
pub mod events;

// Persistence backends.
pub mod storage;

// The session store.
pub mod store;

// The route guard and the navigator seam.
pub mod guard;

#[cfg(feature = "logging")]
pub mod logging;

pub use config::{RouteLayout, SessionConfig};
pub use error::{ConfigError, SessionError, StorageError};
pub use events::{SessionEvent, Subscription};
pub use guard::{Navigator, Redirect, RedirectReason, RouteGuard};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::SessionStore;
pub use types::{Role, Session, User, Zone, ZoneMask};
