//! Application settings loaded from environment variables.

use std::env;
use std::fmt;

use super::constants::{
    DEFAULT_APP_ENV, DEFAULT_AWS_REGION, DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_TEST_DATABASE_URL,
};

/// Deployment mode, controls how much error detail reaches clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
    Test,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl From<&str> for Environment {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            _ => Environment::Production,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
        }
    }
}

/// Object storage settings for the direct-upload helper
#[derive(Clone, Default)]
pub struct StorageConfig {
    pub bucket: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    secret_access_key: Option<String>,
}

impl StorageConfig {
    pub fn new(
        bucket: Option<String>,
        region: impl Into<String>,
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
    ) -> Self {
        Self {
            bucket,
            region: region.into(),
            access_key_id,
            secret_access_key,
        }
    }

    /// Secret key used to derive request signing keys.
    pub fn secret_access_key(&self) -> Option<&str> {
        self.secret_access_key.as_deref()
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "[REDACTED]"))
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub test_database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub storage: StorageConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("database_url", &"[REDACTED]")
            .field("test_database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("storage", &self.storage)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from(
            env::var("APP_ENV")
                .unwrap_or_else(|_| DEFAULT_APP_ENV.to_string())
                .as_str(),
        );

        let storage = StorageConfig::new(
            env::var("S3_BUCKET").ok().filter(|v| !v.is_empty()),
            env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_AWS_REGION.to_string()),
            env::var("AWS_ACCESS_KEY_ID").ok().filter(|v| !v.is_empty()),
            env::var("AWS_SECRET_ACCESS_KEY").ok().filter(|v| !v.is_empty()),
        );

        if storage.bucket.is_none() {
            tracing::warn!("S3_BUCKET not set, upload signing will fail");
        }

        Self {
            environment,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            test_database_url: env::var("TEST_DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            storage,
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            test_database_url: DEFAULT_TEST_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            storage: StorageConfig::new(None, DEFAULT_AWS_REGION, None, None),
        }
    }
}
