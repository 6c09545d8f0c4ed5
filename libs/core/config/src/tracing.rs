use crate::Environment;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Install the color-eyre panic and error report hooks for `main`.
///
/// A second call is ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

fn default_filter(environment: Environment) -> EnvFilter {
    match environment {
        Environment::Production => EnvFilter::new("info,sea_orm=warn,sqlx=warn"),
        Environment::Development => EnvFilter::new("debug,tower_http=debug,sqlx=info"),
    }
}

fn output_layer(environment: Environment) -> Box<dyn Layer<Registry> + Send + Sync> {
    match environment {
        Environment::Production => fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed(),
        Environment::Development => fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .pretty()
            .boxed(),
    }
}

/// Install the global subscriber.
///
/// Production logs flattened JSON events; development logs pretty text.
/// `RUST_LOG` replaces the default filter. `tracing_error::ErrorLayer` is
/// always installed so error paths can capture a `SpanTrace` of the
/// request. Only the first call has any effect.
pub fn init_tracing(environment: &Environment) {
    let environment = *environment;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(environment));

    let installed = tracing_subscriber::registry()
        .with(output_layer(environment))
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(?environment, "Tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_filter_quiets_database_logs() {
        let directives = default_filter(Environment::Production).to_string();
        assert!(directives.contains("sea_orm=warn"));
        assert!(directives.contains("sqlx=warn"));
    }

    #[test]
    fn test_development_filter_is_verbose() {
        assert!(default_filter(Environment::Development).to_string().contains("tower_http=debug"));
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(&Environment::Production);
        init_tracing(&Environment::Development);
    }
}
