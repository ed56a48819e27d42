use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_SERVER_FILTER: &str = "lexflow=debug,tower_http=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryFormat {
    Pretty,
    Json,
}

impl TelemetryFormat {
    pub fn for_environment(environment: &str) -> Self {
        match environment.to_lowercase().as_str() {
            "production" | "prod" => TelemetryFormat::Json,
            _ => TelemetryFormat::Pretty,
        }
    }
}

/// Initialize server tracing. `RUST_LOG` overrides the default filter.
pub fn init_telemetry(
    service_name: &str,
    environment: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_SERVER_FILTER.into());

    match TelemetryFormat::for_environment(environment) {
        TelemetryFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()?,
        TelemetryFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()?,
    }

    tracing::info!(
        service = %service_name,
        environment = %environment,
        "Tracing initialized"
    );
    Ok(())
}

/// Initialize tracing for command-line tools (default level `info`).
pub fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_logs_as_json() {
        assert_eq!(TelemetryFormat::for_environment("production"), TelemetryFormat::Json);
        assert_eq!(TelemetryFormat::for_environment("PROD"), TelemetryFormat::Json);
        assert_eq!(
            TelemetryFormat::for_environment("development"),
            TelemetryFormat::Pretty
        );
    }
}
