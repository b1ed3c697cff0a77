use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "kakeibo_core=info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_DIRECTIVE);
}

/// Like [`init_tracing`], but falls back to `default_directive` instead.
///
/// `RUST_LOG` always wins when it is set.
pub fn init_tracing_with_default(default_directive: &str) {
    TRACING_INIT.call_once(|| {
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = env_filter(rust_log.as_deref(), default_directive);
        let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    });
}

fn env_filter(rust_log: Option<&str>, default_directive: &str) -> EnvFilter {
    rust_log
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive))
}
