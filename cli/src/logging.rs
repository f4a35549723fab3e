use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// init_logging sets up the tracing subscriber. The filter is read from the RUST_LOG environment
/// variable and falls back to "qohwah=info,cli=info,warn".
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("qohwah=info,cli=info,warn"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
