//!
//! Shared data types for the session core: roles, zones, users and the session record.
//!
//! `Session` is the only unit that is ever persisted or restored. Its serde
//! representation is the on-disk record, so field names here follow the stored
//! JSON layout (`isAuthenticated`, `user`).

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// ZoneMask, an 8-bit field.
/// - Bit 0: public
/// - Bit 1: admin-protected
/// - Bit 2: developer-protected
/// - Bits 3-7: unused, must be zero.
pub type ZoneMask = u8;

/// Capability level of a user.
///
/// The variants are declared in capability order, so the derived `Ord` matches the
/// zone-superset order: `User < Admin < Developer`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Plain visitor account. Public pages only.
    User = 0,
    /// Site administrator. Public and admin pages.
    Admin = 1,
    /// Developer. Everything an admin can reach plus the developer tools.
    Developer = 2,
}

impl Role {
    /// Every role, lowest capability first.
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Developer];

    /// Returns the role name as stored in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Developer => "developer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = SessionError;

    /// Parses an exact, lowercase role name. Anything else is rejected rather than
    /// normalised to a default role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "developer" => Ok(Role::Developer),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }
}

/// Classification of a URL subtree by the privilege it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    Public,
    AdminProtected,
    DeveloperProtected,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Public, Zone::AdminProtected, Zone::DeveloperProtected];

    /// The single bit representing this zone in a `ZoneMask`.
    pub fn bit(&self) -> ZoneMask {
        match self {
            Zone::Public => crate::rights::zones::PUBLIC,
            Zone::AdminProtected => crate::rights::zones::ADMIN,
            Zone::DeveloperProtected => crate::rights::zones::DEVELOPER,
        }
    }
}

/// Identity record created by a successful login.
///
/// A `User` is never patched in place; a new login replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque unique token.
    pub id: String,
    pub username: String,
    pub role: Role,
    pub email: Option<String>,
}

/// Top-level authentication state.
///
/// Invariant: `is_authenticated == user.is_some()`. The constructors below are the
/// only way this crate builds a `Session`; a restored record that breaks the
/// invariant is rejected by [`Session::from_record`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl Session {
    /// The signed-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in session for `user`.
    pub fn authenticated(user: User) -> Self {
        Session {
            is_authenticated: true,
            user: Some(user),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Returns `true` if the `is_authenticated` flag agrees with the presence of a user.
    pub fn is_consistent(&self) -> bool {
        self.is_authenticated == self.user.is_some()
    }

    /// Serializes the session into the persisted JSON record.
    pub fn to_record(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a persisted JSON record.
    ///
    /// Missing fields, unknown roles and records that break the
    /// authenticated/user invariant are all errors; callers that must not fail
    /// (store initialization) fall back to [`Session::anonymous`].
    pub fn from_record(raw: &str) -> Result<Self, SessionError> {
        let session: Session = serde_json::from_str(raw)?;
        if !session.is_consistent() {
            return Err(SessionError::InconsistentRecord);
        }
        Ok(session)
    }
}
