//! Configuration module
//!
//! Configuration is read from the process environment (after loading `.env` when
//! present). The deployment credential is deliberately optional here: a missing
//! `VERCEL_TOKEN` is reported per request as `MissingCredential`, not at startup.

use std::env;
use std::str::FromStr;

const SERVER_PORT: u16 = 3000;
const MAX_UPLOAD_SIZE_MB: usize = 50;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const VERCEL_API_URL: &str = "https://api.vercel.com";
const VERCEL_TIMEOUT_SECS: u64 = 120;
const OWNER_ID_HEADER: &str = "x-user-id";

/// Console log format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unsupported LOG_FORMAT: {}", other)),
        }
    }
}

/// Which metadata store receives project records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataStoreKind {
    Postgres,
    Supabase,
}

impl FromStr for MetadataStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(MetadataStoreKind::Postgres),
            "supabase" => Ok(MetadataStoreKind::Supabase),
            other => Err(anyhow::anyhow!("Unsupported METADATA_STORE: {}", other)),
        }
    }
}

/// How archive entry paths are treated before they reach the manifest.
/// Paths are never rewritten; the policy only decides whether unsafe ones are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchivePathPolicy {
    #[default]
    RejectUnsafe,
    Verbatim,
}

impl FromStr for ArchivePathPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject-unsafe" | "reject_unsafe" | "strict" => Ok(ArchivePathPolicy::RejectUnsafe),
            "verbatim" => Ok(ArchivePathPolicy::Verbatim),
            other => Err(anyhow::anyhow!("Unsupported ARCHIVE_PATH_POLICY: {}", other)),
        }
    }
}

/// Remote deployment platform settings
#[derive(Clone)]
pub struct VercelConfig {
    pub token: Option<String>,
    pub api_url: String,
    pub team_id: Option<String>,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for VercelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VercelConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("team_id", &self.team_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for VercelConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: VERCEL_API_URL.to_string(),
            team_id: None,
            timeout_secs: VERCEL_TIMEOUT_SECS,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub max_upload_size_bytes: usize,
    pub http_concurrency_limit: usize,
    pub log_format: LogFormat,
    pub vercel: VercelConfig,
    pub metadata_store: MetadataStoreKind,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub supabase_url: Option<String>,
    pub supabase_service_role_key: Option<String>,
    pub owner_id_header: String,
    pub default_owner_id: Option<String>,
    pub archive_path_policy: ArchivePathPolicy,
}

/// Read a variable, treating empty values as unset.
fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a set value; only an unset variable falls back to `default`.
fn parse_or_default<T: FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, anyhow::Error> {
    match raw {
        Some(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", key, v)),
        None => Ok(default),
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, anyhow::Error> {
    parse_or_default(key, env_opt(key), default)
}

fn megabytes_to_bytes(mb: usize) -> Result<usize, anyhow::Error> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", mb))
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env_opt("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match env_opt("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let log_format = match env_opt("LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::Compact,
        };

        let database_url = env_opt("DATABASE_URL");
        let supabase_url = env_opt("SUPABASE_URL");

        let metadata_store = match env_opt("METADATA_STORE") {
            Some(v) => v.parse()?,
            None if supabase_url.is_some() && database_url.is_none() => {
                MetadataStoreKind::Supabase
            }
            None => MetadataStoreKind::Postgres,
        };

        let archive_path_policy = match env_opt("ARCHIVE_PATH_POLICY") {
            Some(v) => v.parse()?,
            None => ArchivePathPolicy::default(),
        };

        let max_upload_size_mb = env_parse("MAX_UPLOAD_SIZE_MB", MAX_UPLOAD_SIZE_MB)?;

        Ok(Config {
            server_port,
            environment,
            cors_origins,
            max_upload_size_bytes: megabytes_to_bytes(max_upload_size_mb)?,
            http_concurrency_limit: env_parse("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT)?
                .max(1),
            log_format,
            vercel: VercelConfig {
                token: env_opt("VERCEL_TOKEN"),
                api_url: env_opt("VERCEL_API_URL").unwrap_or_else(|| VERCEL_API_URL.to_string()),
                team_id: env_opt("VERCEL_TEAM_ID"),
                timeout_secs: env_parse("VERCEL_TIMEOUT_SECS", VERCEL_TIMEOUT_SECS)?,
            },
            metadata_store,
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
            supabase_url,
            supabase_service_role_key: env_opt("SUPABASE_SERVICE_ROLE_KEY"),
            owner_id_header: env_opt("OWNER_ID_HEADER")
                .unwrap_or_else(|| OWNER_ID_HEADER.to_string())
                .to_lowercase(),
            default_owner_id: env_opt("DEFAULT_OWNER_ID"),
            archive_path_policy,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if !self.vercel.api_url.starts_with("http://") && !self.vercel.api_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!("VERCEL_API_URL must be an http(s) URL"));
        }

        match self.metadata_store {
            MetadataStoreKind::Postgres => {
                let url = self.database_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL must be set when using the postgres store")
                })?;
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ));
                }
            }
            MetadataStoreKind::Supabase => {
                if self.supabase_url.is_none() || self.supabase_service_role_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY must be set when using the supabase store"
                    ));
                }
            }
        }

        if self.owner_id_header.is_empty() {
            return Err(anyhow::anyhow!("OWNER_ID_HEADER must not be empty"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            log_format: LogFormat::Compact,
            vercel: VercelConfig::default(),
            metadata_store: MetadataStoreKind::Postgres,
            database_url: None,
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            supabase_url: None,
            supabase_service_role_key: None,
            owner_id_header: OWNER_ID_HEADER.to_string(),
            default_owner_id: None,
            archive_path_policy: ArchivePathPolicy::default(),
        }
    }
}
