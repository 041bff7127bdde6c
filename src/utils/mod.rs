pub mod persistence;

use std::sync::Once;

use tracing_subscriber::filter::Directive;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "finance_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    init_tracing_with(None);
}

/// Same as [`init_tracing`] but with an extra filter directive, e.g. from config.
/// Unparseable directives fall back to the default.
pub fn init_tracing_with(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = directive
            .and_then(|raw| raw.parse::<Directive>().ok())
            .or_else(|| DEFAULT_DIRECTIVE.parse::<Directive>().ok());
        let mut filter = EnvFilter::from_default_env();
        if let Some(directive) = directive {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
