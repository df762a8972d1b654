use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use vless_relay_domain::Config;

/// `RUST_LOG` wins when set; otherwise the configured level applies to the
/// relay crates and everything else stays at `warn`.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.logging.level;
        EnvFilter::new(format!(
            "warn,vless_relay={level},vless_relay_application={level},vless_relay_infrastructure={level},vless_relay_domain={level}"
        ))
    });

    let verbose = matches!(config.logging.level.as_str(), "debug" | "trace");

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_ansi(std::io::stdout().is_terminal())
        .init();
}
