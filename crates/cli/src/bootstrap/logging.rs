use cdnsight_domain::Config;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout is reserved for native-messaging frames.
pub fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = config.logging.level.clone();

        if !filter.contains("sqlx") {
            filter.push_str(",sqlx=warn");
        }
        if !filter.contains("hyper") {
            filter.push_str(",hyper=warn");
        }

        EnvFilter::new(filter)
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
