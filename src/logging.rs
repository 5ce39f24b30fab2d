use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over the verbose flag.
pub fn init(verbose: bool) {
    let default = if verbose {
        "info,lotto_stats=debug,tower_http=debug"
    } else {
        "info,tower_http=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
