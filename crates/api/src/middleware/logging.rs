//! Tracing setup for the ad-targeting service.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies
//! service-wide with sqlx statement logging capped at warn so matching
//! pipelines don't flood the output with per-query lines.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Installs the global tracing subscriber from `LoggingConfig`.
///
/// `format = "json"` emits one structured line per event for log shippers;
/// any other value falls back to the pretty human-readable format.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_current_span(true)
                    .with_target(true),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true),
            )
            .init();
    }
}

fn default_directives(level: &str) -> String {
    format!("{level},sqlx::query=warn,hyper=warn")
}
