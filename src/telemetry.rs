//! Tracing setup for binaries and demos embedding the crate.
//!
//! | Variable | Default |
//! |---|---|
//! | `MARKETVIEW_LOG` (falls back to `RUST_LOG`) | `info` |
//! | `MARKETVIEW_LOG_JSON` | `false` |

use std::env;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn env_filter() -> EnvFilter {
    env::var("MARKETVIEW_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install a global subscriber. Fails if one is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    let filter = env_filter();
    if env_bool("MARKETVIEW_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    }
}
