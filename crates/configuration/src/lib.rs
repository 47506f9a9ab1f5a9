use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, ServerSettings, Settings};

/// Prefix for environment overrides, e.g. `FLEET__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "FLEET";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, an optional
/// `config.toml` in the working directory, `FLEET__*` environment variables,
/// and finally `DATABASE_URL` for the connection string.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(
        config::File::with_name("config").required(false),
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
        std::env::var("DATABASE_URL").ok(),
    )
}

/// Builds and validates `Settings` from explicit sources.
pub fn load_settings_from<F, E>(
    file: F,
    environment: E,
    database_url: Option<String>,
) -> Result<Settings, ConfigError>
where
    F: config::Source + Send + Sync + 'static,
    E: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.url", "")?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("database.run_migrations", false)?
        .add_source(file)
        .add_source(environment)
        .set_override_option("database.url", database_url)?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(
        host = %settings.server.host,
        port = settings.server.port,
        max_connections = settings.database.max_connections,
        "Configuration loaded."
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Environment, File, FileFormat, Map};

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(Some(Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Map<String, String>>();
        no_env().source(Some(map))
    }

    fn toml(contents: &'static str) -> impl config::Source + Send + Sync + 'static {
        File::from_str(contents, FileFormat::Toml)
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_given() {
        let settings = load_settings_from(
            toml(""),
            no_env(),
            Some("postgres://fleet@localhost/fleet".to_string()),
        )
        .unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.url, "postgres://fleet@localhost/fleet");
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.database.acquire_timeout().as_secs(), 5);
        assert!(!settings.database.run_migrations);
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = load_settings_from(
            toml(
                r#"
                [server]
                port = 8080

                [database]
                url = "postgres://file@localhost/fleet"
                max_connections = 4
                run_migrations = true
                "#,
            ),
            no_env(),
            None,
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url, "postgres://file@localhost/fleet");
        assert_eq!(settings.database.max_connections, 4);
        assert!(settings.database.run_migrations);
    }

    #[test]
    fn environment_overrides_file_and_database_url_wins() {
        let settings = load_settings_from(
            toml(
                r#"
                [server]
                port = 8080

                [database]
                url = "postgres://file@localhost/fleet"
                "#,
            ),
            env(&[("FLEET__SERVER__PORT", "9090")]),
            Some("postgres://env@localhost/fleet".to_string()),
        )
        .unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.database.url, "postgres://env@localhost/fleet");
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let err = load_settings_from(toml(""), no_env(), None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn zero_connections_is_rejected() {
        let err = load_settings_from(
            toml("[database]\nmax_connections = 0"),
            no_env(),
            Some("postgres://localhost/fleet".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
