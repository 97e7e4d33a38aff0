//! Store connection configuration

use serde::{Deserialize, Serialize};

/// Connection parameters for the relational store.
///
/// Always injected by the caller; nothing in this crate reads connection
/// parameters from ambient process state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store host name
    pub host: String,
    /// Store port
    pub port: u16,
    /// Database name
    pub database: String,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "retail_db".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create a config with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the database name
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the user
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Key/value connection string in libpq format
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            self.host, self.port, self.database, self.user, self.password
        )
    }

    /// Display form with the password elided
    pub fn display(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mirrors_local_store() {
        let config = StoreConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "retail_db");
    }

    #[test]
    fn test_connection_string() {
        let config = StoreConfig::new()
            .with_host("db.internal")
            .with_port(5433)
            .with_database("sales")
            .with_user("etl")
            .with_password("secret");

        assert_eq!(
            config.connection_string(),
            "host=db.internal port=5433 dbname=sales user=etl password=secret"
        );
    }

    #[test]
    fn test_display_elides_password() {
        let config = StoreConfig::new().with_password("secret");
        assert!(!config.display().contains("secret"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"host": "db.internal"}"#).unwrap();
        assert_eq!(config.host, "db.internal");
        // Everything else falls back to defaults
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "postgres");
    }
}
