//!
//! Capability matrix for the session core.
//! Defines the zone bit flags, the role → zone policy, and classification of
//! locations into zones. Everything in here is pure and total.

use std::borrow::Cow;

use crate::config::RouteLayout;
use crate::types::{Role, Zone, ZoneMask};

/// Zone bit flags (bits 0-2 defined, 3-7 unused).
pub mod zones {
    use super::ZoneMask;

    /// Pages any visitor may see.
    pub const PUBLIC: ZoneMask = 1 << 0; // 0b001
    /// The admin area. Implies `PUBLIC`.
    pub const ADMIN: ZoneMask = 1 << 1; // 0b010
    /// The developer tools. Implies `ADMIN`.
    pub const DEVELOPER: ZoneMask = 1 << 2; // 0b100

    /// Every defined zone bit.
    pub const ALL: ZoneMask = PUBLIC | ADMIN | DEVELOPER;
}

/// Canonicalizes a zone mask by adding every implied zone.
///
/// `DEVELOPER` implies `ADMIN`, and `ADMIN` implies `PUBLIC`. Unused bits are dropped.
#[inline]
pub fn canonicalise(mask: ZoneMask) -> ZoneMask {
    let mut m = mask & zones::ALL;
    if (m & zones::DEVELOPER) == zones::DEVELOPER {
        m |= zones::ADMIN;
    }
    if (m & zones::ADMIN) == zones::ADMIN {
        m |= zones::PUBLIC;
    }
    m
}

/// Checks if `have` grants every zone in `need`: `(canonicalise(have) & need) == need`.
#[inline]
pub fn sufficient(have: ZoneMask, need: ZoneMask) -> bool {
    (canonicalise(have) & need) == need
}

/// Returns the zones a role may enter.
///
/// `user` → public; `admin` → public + admin; `developer` → all three.
pub fn accessible_zones(role: Role) -> ZoneMask {
    let granted = match role {
        Role::User => zones::PUBLIC,
        Role::Admin => zones::ADMIN,
        Role::Developer => zones::DEVELOPER,
    };
    canonicalise(granted)
}

/// The allow/deny decision shared by the store predicates and the route guard.
#[inline]
pub fn can_enter(role: Role, zone: Zone) -> bool {
    sufficient(accessible_zones(role), zone.bit())
}

/// Classifies a location against the default route layout.
pub fn classify(path: &str) -> Zone {
    classify_with(path, &RouteLayout::default())
}

/// Classifies a location into a zone.
///
/// The developer subtrees are checked first, so a developer subtree nested inside
/// the admin subtree (`/admin/developer`) classifies as developer-protected.
pub fn classify_with(path: &str, layout: &RouteLayout) -> Zone {
    let normalized = normalize_path(path);
    let path: &str = &normalized;
    if layout
        .developer_prefixes
        .iter()
        .any(|prefix| is_under(path, prefix))
    {
        Zone::DeveloperProtected
    } else if layout.admin_prefixes.iter().any(|prefix| is_under(path, prefix)) {
        Zone::AdminProtected
    } else {
        Zone::Public
    }
}

/// Reduces a location to its canonical path.
///
/// The query string and fragment are dropped, empty and `.` segments are removed
/// and `..` pops the previous segment (never above the root). The result always
/// starts with `/` unless the input path is empty.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let end = path.find(&['?', '#'][..]).unwrap_or(path.len());
    let path = &path[..end];
    if path.is_empty() {
        return Cow::Borrowed(path);
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    let normalized = format!("/{}", segments.join("/"));
    if normalized == path {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(normalized)
    }
}

/// Returns `true` if `path` is `prefix` or lies below it on a segment boundary.
pub fn is_under(path: &str, prefix: &str) -> bool {
    let prefix = normalize_path(prefix);
    if prefix == "/" {
        return path.starts_with('/');
    }
    match path.strip_prefix(&*prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
