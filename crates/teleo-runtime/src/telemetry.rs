//! `tracing` subscriber initialisation.
//!
//! Call [`init_tracing`] once at process startup, before the first tick.
//!
//! # Environment variables
//!
//! | Variable | Effect |
//! |---|---|
//! | `RUST_LOG` | Log filter (default `"info"`). |
//! | `TELEO_LOG_FORMAT=json` | Emit newline-delimited JSON logs. |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global `tracing` subscriber.
///
/// Honours `RUST_LOG` for filtering (falling back to `info`) and
/// `TELEO_LOG_FORMAT=json` for structured output.  Must be called at most
/// once per process; a second call panics because the global subscriber is
/// already set.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = std::env::var("TELEO_LOG_FORMAT").as_deref() == Ok("json");

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
