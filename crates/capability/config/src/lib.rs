//! 应用运行配置加载。

use std::env;
use std::time::Duration;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 存储后端。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// 嵌入式 SQLite 文件。
    Sqlite { path: String },
    /// 外部 PostgreSQL。
    Postgres { database_url: String },
    /// 进程内存（演示用，重启即丢失）。
    Memory,
}

/// Basic 认证凭据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub storage: StorageBackend,
    pub db_max_connections: u32,
    pub request_timeout: Duration,
    pub cleanup_interval: Duration,
    pub cleanup_timeout: Duration,
    pub retention_months: u32,
    pub basic_auth: Option<BasicAuthConfig>,
    pub cors_allow_origin: String,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr =
            env::var("NOISE_HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let storage = read_storage_backend()?;
        let db_max_connections = read_u32_with_default("NOISE_DB_MAX_CONNECTIONS", 8)?;
        let request_timeout =
            Duration::from_millis(read_u64_with_default("NOISE_REQUEST_TIMEOUT_MS", 2_000)?);
        let cleanup_interval = Duration::from_secs(read_u64_with_default(
            "NOISE_CLEANUP_INTERVAL_SECONDS",
            24 * 60 * 60,
        )?);
        let cleanup_timeout =
            Duration::from_secs(read_u64_with_default("NOISE_CLEANUP_TIMEOUT_SECONDS", 30)?);
        let retention_months = read_u32_with_default("NOISE_RETENTION_MONTHS", 6)?;
        let basic_auth = match (
            read_optional("NOISE_BASIC_AUTH_USERNAME"),
            read_optional("NOISE_BASIC_AUTH_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BasicAuthConfig { username, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::Missing("NOISE_BASIC_AUTH_PASSWORD".to_string()));
            }
            (None, Some(_)) => {
                return Err(ConfigError::Missing("NOISE_BASIC_AUTH_USERNAME".to_string()));
            }
        };
        let cors_allow_origin =
            env::var("NOISE_CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string());

        if cleanup_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "NOISE_CLEANUP_INTERVAL_SECONDS".to_string(),
                "0".to_string(),
            ));
        }
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "NOISE_DB_MAX_CONNECTIONS".to_string(),
                "0".to_string(),
            ));
        }

        Ok(Self {
            http_addr,
            storage,
            db_max_connections,
            request_timeout,
            cleanup_interval,
            cleanup_timeout,
            retention_months,
            basic_auth,
            cors_allow_origin,
        })
    }
}

/// 读取存储后端，Postgres 需要连接串（兼容 EXTERNAL_DATABASE_URL）。
fn read_storage_backend() -> Result<StorageBackend, ConfigError> {
    let kind = env::var("NOISE_STORAGE").unwrap_or_else(|_| "sqlite".to_string());
    match kind.to_ascii_lowercase().as_str() {
        "sqlite" => Ok(StorageBackend::Sqlite {
            path: env::var("NOISE_SQLITE_PATH").unwrap_or_else(|_| "production.db".to_string()),
        }),
        "postgres" | "postgresql" => {
            let database_url = read_optional("NOISE_DATABASE_URL")
                .or_else(|| read_optional("EXTERNAL_DATABASE_URL"))
                .ok_or_else(|| ConfigError::Missing("NOISE_DATABASE_URL".to_string()))?;
            Ok(StorageBackend::Postgres { database_url })
        }
        "memory" => Ok(StorageBackend::Memory),
        _ => Err(ConfigError::Invalid("NOISE_STORAGE".to_string(), kind)),
    }
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
