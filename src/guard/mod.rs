pub mod core;
pub mod navigator;

#[cfg(test)]
mod tests;

pub use self::core::{decide, Redirect, RedirectReason, RouteGuard};
pub use navigator::Navigator;
#[cfg(any(test, feature = "test-utils"))]
pub use navigator::RecordingNavigator;
