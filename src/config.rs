//!
//! Configuration for the session store and route guard.
//!
//! Everything has a default matching the site's routes, so `SessionConfig::default()`
//! is a complete configuration. Hosts that need different paths load a JSON document
//! with only the fields they want to override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rights;
use crate::types::{Role, Zone};

/// Default storage key of the persisted session record.
pub const DEFAULT_STORAGE_KEY: &str = "auth-storage";

/// Where the site's entry points and protected subtrees live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteLayout {
    /// The sign-in page. Unauthenticated visitors are sent here.
    pub login: String,
    /// Landing page for the `user` role.
    pub home: String,
    /// Landing page for `admin`, and the fallback for non-developers in developer pages.
    pub admin_root: String,
    /// Landing page for `developer`.
    pub developer_root: String,
    /// Subtrees that classify as admin-protected.
    pub admin_prefixes: Vec<String>,
    /// Subtrees that classify as developer-protected. Checked before `admin_prefixes`.
    pub developer_prefixes: Vec<String>,
}

impl Default for RouteLayout {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            home: "/".to_string(),
            admin_root: "/admin".to_string(),
            developer_root: "/developer".to_string(),
            admin_prefixes: vec!["/admin".to_string()],
            developer_prefixes: vec!["/admin/developer".to_string(), "/developer".to_string()],
        }
    }
}

impl RouteLayout {
    /// The canonical post-login destination for a role.
    pub fn landing_path(&self, role: Role) -> &str {
        match role {
            Role::Developer => &self.developer_root,
            Role::Admin => &self.admin_root,
            Role::User => &self.home,
        }
    }

    /// Returns `true` if `path` is the login page once both are normalised.
    pub fn is_login(&self, path: &str) -> bool {
        rights::normalize_path(path) == rights::normalize_path(&self.login)
    }

    /// Checks that the layout can be used by the guard without redirect loops.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("login", &self.login),
            ("home", &self.home),
            ("admin_root", &self.admin_root),
            ("developer_root", &self.developer_root),
        ];
        for (name, path) in named {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidLayout(format!(
                    "{name} must be an absolute path, got {path:?}"
                )));
            }
        }
        for prefix in self.admin_prefixes.iter().chain(&self.developer_prefixes) {
            if !prefix.starts_with('/') {
                return Err(ConfigError::InvalidLayout(format!(
                    "protected prefix must be an absolute path, got {prefix:?}"
                )));
            }
            if rights::normalize_path(prefix) == "/" {
                return Err(ConfigError::InvalidLayout(
                    "the site root cannot be a protected prefix".to_string(),
                ));
            }
        }
        if rights::classify_with(&self.login, self) != Zone::Public {
            return Err(ConfigError::InvalidLayout(format!(
                "login page {:?} must be public",
                self.login
            )));
        }
        if rights::classify_with(&self.home, self) != Zone::Public {
            return Err(ConfigError::InvalidLayout(format!(
                "home page {:?} must be public",
                self.home
            )));
        }
        // Rule 2 of the guard sends non-developers to the admin root.
        if rights::classify_with(&self.admin_root, self) == Zone::DeveloperProtected {
            return Err(ConfigError::InvalidLayout(format!(
                "admin root {:?} must not be developer-protected",
                self.admin_root
            )));
        }
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key under which the session record is persisted.
    pub storage_key: String,
    /// Domain used to derive an email for usernames without one. `None` leaves email unset.
    pub email_domain: Option<String>,
    pub layout: RouteLayout,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            email_domain: None,
            layout: RouteLayout::default(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded session config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidLayout(
                "storage_key must not be empty".to_string(),
            ));
        }
        self.layout.validate()
    }
}
