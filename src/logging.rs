//! Optional `tracing-subscriber` setup for hosts that do not install their own.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global formatting subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. `"gatehouse_core=debug"`)
/// is used. Returns `false` if a global subscriber was already installed.
pub fn init(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
