//! Configuration loading
//!
//! Connection settings come from command-line options first, then from
//! environment variables, optionally read from a .env file.

use crate::prelude::ViewliftError;
use std::{env, path::Path};
use tracing::{debug, error, trace, warn};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 3306;

/// Connection settings given explicitly, e.g. on the command line
#[derive(Debug, Default, Clone)]
pub struct ConnectionOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

/// Database connection configuration
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    /// Fill unset options from variables returned by `lookup`
    ///
    /// Variables:
    /// - DB_HOST (default: localhost)
    /// - DB_PORT (default: 3306)
    /// - DB_NAME (required)
    /// - DB_USER (default: empty)
    /// - DB_PASSWORD (default: empty)
    pub fn resolve<F>(options: ConnectionOptions, lookup: F) -> Result<Self, ViewliftError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let given = |value: Option<String>| value.filter(|value| !value.is_empty());

        let host = given(options.host).or_else(|| var("DB_HOST"));
        let user = given(options.user).or_else(|| var("DB_USER"));
        let database = given(options.database).or_else(|| var("DB_NAME"));
        let password = given(options.password).or_else(|| var("DB_PASSWORD"));

        if host.is_none() && user.is_none() && database.is_none() {
            return Err(ViewliftError::Usage(
                "no connection settings given: pass --host, --username and --database".to_string(),
            ));
        }

        let database = database.ok_or_else(|| {
            error!("Database name is not set");
            ViewliftError::Config("--database (or DB_NAME) is required".to_string())
        })?;

        let port = match options.port {
            Some(port) => port,
            None => match var("DB_PORT") {
                Some(port_str) => port_str.parse::<u16>().map_err(|e| {
                    error!(port = ?port_str, error = ?e, "Invalid DB_PORT value");
                    ViewliftError::Config("DB_PORT must be a valid port number".to_string())
                })?,
                None => {
                    trace!("Port not set, using default");
                    DEFAULT_PORT
                }
            },
        };

        let host = host.unwrap_or_else(|| {
            trace!("Host not set, using default");
            DEFAULT_HOST.to_string()
        });

        let config = Self {
            host,
            port,
            database,
            user: user.unwrap_or_default(),
            password: password.unwrap_or_default(),
        };
        debug!(
            host = ?config.host,
            port = ?config.port,
            database = ?config.database,
            user = ?config.user,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Resolve against the process environment
    pub fn from_env(options: ConnectionOptions) -> Result<Self, ViewliftError> {
        Self::resolve(options, |key| env::var(key).ok())
    }

    /// Load a .env file and then resolve against the environment
    pub fn load(env_file: &Path, options: ConnectionOptions) -> Result<Self, ViewliftError> {
        if env_file.exists() {
            debug!(path = ?env_file, "Loading environment file");
            dotenvy::from_path(env_file).map_err(|e| {
                error!(path = ?env_file, error = ?e, "Failed to load environment file");
                ViewliftError::Config(format!("Failed to load {}: {}", env_file.display(), e))
            })?;
        } else {
            warn!(path = ?env_file, "Environment file not found, using existing environment");
        }

        Self::from_env(options)
    }

    /// Build MySQL connection options
    #[cfg(feature = "mysql")]
    pub fn mysql_opts(&self) -> mysql::Opts {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

        mysql::OptsBuilder::new()
            .ip_or_hostname(Some(self.host.clone()))
            .tcp_port(self.port)
            .user(non_empty(&self.user))
            .pass(non_empty(&self.password))
            .db_name(Some(self.database.clone()))
            .into()
    }

    /// Build a connection string with password redacted (for logs and error messages)
    pub fn redacted_connection_string(&self) -> String {
        format!(
            "mysql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}
