//! Application configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `HABITAT_*` environment variables, or a
//! configuration file, in that precedence order.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Runtime settings for the habit tracker backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HABITAT")]
pub struct AppConfig {
    /// Interface to bind the HTTP listener on.
    pub host: Option<String>,
    /// Port to bind the HTTP listener on.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Required unless demo mode is enabled.
    pub database_url: Option<String>,
    /// Serve from seeded in-memory storage instead of PostgreSQL.
    #[ortho_config(default = false)]
    pub demo_mode: bool,
    /// Maximum connections in the database pool.
    pub db_pool_size: Option<u32>,
}

impl AppConfig {
    /// Return the configured bind host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured bind port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured pool size, falling back to the default.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppConfig {
        AppConfig::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("HABITAT_HOST", None::<String>),
            ("HABITAT_PORT", None::<String>),
            ("HABITAT_DATABASE_URL", None::<String>),
            ("HABITAT_DEMO_MODE", None::<String>),
            ("HABITAT_DB_POOL_SIZE", None::<String>),
        ]);

        let config = load_from_empty_args();
        assert_eq!(config.host(), DEFAULT_HOST);
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.db_pool_size(), DEFAULT_POOL_SIZE);
        assert!(!config.demo_mode);
        assert!(config.database_url.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("HABITAT_HOST", Some("127.0.0.1".to_owned())),
            ("HABITAT_PORT", Some("9090".to_owned())),
            (
                "HABITAT_DATABASE_URL",
                Some("postgres://localhost/habits".to_owned()),
            ),
            ("HABITAT_DEMO_MODE", Some("true".to_owned())),
            ("HABITAT_DB_POOL_SIZE", Some("4".to_owned())),
        ]);

        let config = load_from_empty_args();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 9090);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/habits")
        );
        assert!(config.demo_mode);
        assert_eq!(config.db_pool_size(), 4);
    }
}
