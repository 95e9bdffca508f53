use anyhow::{anyhow, Result};
use storefront_core::config::{LogFormat, LoggingConfig};
use tracing::Level;

/// Installs the global subscriber. Output goes to stderr so stdout stays parseable.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow!("failed to initialize logging: {error}"))
}

#[cfg(test)]
mod tests {
    use storefront_core::config::{LogFormat, LoggingConfig};

    use super::init;

    #[test]
    fn second_initialization_is_reported_as_an_error() {
        let logging = LoggingConfig { level: "debug".to_string(), format: LogFormat::Json };

        let _ = init(&logging);
        let error = init(&logging).expect_err("global subscriber is already installed");
        assert!(error.to_string().starts_with("failed to initialize logging"));
    }
}
