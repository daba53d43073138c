use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub api_server: ServerConfig,
    pub redirect_server: ServerConfig,
    pub redirect_status: RedirectMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
    pub max_connections: u32,
    /// Total connection attempts before startup fails
    pub connect_attempts: u32,
    pub connect_retry_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Status code used by the redirect server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectMode {
    /// 307, so every visit reaches the server and is counted
    #[default]
    Temporary,
    /// 308, cacheable by clients
    Permanent,
}

impl DatabaseConfig {
    const fn default_max_connections() -> u32 {
        5
    }

    const fn default_connect_attempts() -> u32 {
        10
    }

    const fn default_connect_retry_secs() -> u64 {
        2
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let backend = match env_or("DATABASE_BACKEND", "sqlite").to_lowercase().as_str() {
            "sqlite" => DatabaseBackend::Sqlite,
            "postgres" | "postgresql" => DatabaseBackend::Postgres,
            "memory" => DatabaseBackend::Memory,
            other => {
                tracing::warn!(
                    "Unknown DATABASE_BACKEND '{other}', falling back to 'sqlite'. Supported values: sqlite, postgres, memory"
                );
                DatabaseBackend::Sqlite
            }
        };

        let database_url = env_or("DATABASE_URL", "sqlite://./tern.db?mode=rwc");
        let max_connections = parse_env(
            "DATABASE_MAX_CONNECTIONS",
            DatabaseConfig::default_max_connections(),
        )?;
        let connect_attempts = parse_env(
            "DATABASE_CONNECT_ATTEMPTS",
            DatabaseConfig::default_connect_attempts(),
        )?;
        let connect_retry_secs = parse_env(
            "DATABASE_CONNECT_RETRY_SECS",
            DatabaseConfig::default_connect_retry_secs(),
        )?;

        let api_host = env_or("API_HOST", "127.0.0.1");
        let api_port = parse_env("API_PORT", 8080u16)?;

        let redirect_host = env_or("REDIRECT_HOST", "127.0.0.1");
        let redirect_port = parse_env("REDIRECT_PORT", 3000u16)?;

        let redirect_status = match env_or("REDIRECT_STATUS", "temporary")
            .to_lowercase()
            .as_str()
        {
            "temporary" | "307" => RedirectMode::Temporary,
            "permanent" | "308" => RedirectMode::Permanent,
            other => {
                tracing::warn!(
                    "Unknown REDIRECT_STATUS '{other}', falling back to 'temporary'. Supported values: temporary, permanent"
                );
                RedirectMode::Temporary
            }
        };

        Ok(Config {
            database: DatabaseConfig {
                backend,
                url: database_url,
                max_connections,
                connect_attempts,
                connect_retry_secs,
            },
            api_server: ServerConfig {
                host: api_host,
                port: api_port,
            },
            redirect_server: ServerConfig {
                host: redirect_host,
                port: redirect_port,
            },
            redirect_status,
        })
    }
}
