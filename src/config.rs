use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded images
    #[serde(default = "default_media_path")]
    pub media_path: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: i64,
    /// Larger `limit` values are clamped to this
    #[serde(default = "default_max_limit")]
    pub max_limit: i64,
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_db_path() -> String {
    "data/postdeck.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_media_path() -> String {
    "static/images".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

fn default_limit() -> i64 {
    10
}

fn default_max_limit() -> i64 {
    100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_path: default_media_path(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_env_overrides();
        config.ensure_pagination_bounds();
        config.ensure_directories()?;
        Ok(config)
    }

    /// Load configuration from config.toml or conf.ini
    fn load_from_file() -> anyhow::Result<Self> {
        let config_paths = ["config.toml", "conf.ini", "data/config.toml", "data/conf.ini"];

        for path in config_paths {
            if Path::new(path).exists() {
                let content = fs::read_to_string(path)?;
                let config = Self::from_toml(&content)?;
                tracing::info!("Loaded configuration from {}", path);
                return Ok(config);
            }
        }

        tracing::info!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides
    /// Format: PD_CONF_<SECTION>_<KEY>
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(val) = lookup("PD_CONF_SERVER_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("PD_CONF_SERVER_PORT") {
            parse_into(&mut self.server.port, "PD_CONF_SERVER_PORT", &val);
        }

        // Database overrides
        if let Some(val) = lookup("PD_CONF_DATABASE_PATH") {
            self.database.path = val;
        }
        if let Some(val) = lookup("PD_CONF_DATABASE_MAX_CONNECTIONS") {
            parse_into(
                &mut self.database.max_connections,
                "PD_CONF_DATABASE_MAX_CONNECTIONS",
                &val,
            );
        }

        // Storage overrides
        if let Some(val) = lookup("PD_CONF_STORAGE_MEDIA_PATH") {
            if !val.trim().is_empty() {
                self.storage.media_path = val;
            }
        }
        if let Some(val) = lookup("PD_CONF_STORAGE_MAX_UPLOAD_BYTES") {
            parse_into(
                &mut self.storage.max_upload_bytes,
                "PD_CONF_STORAGE_MAX_UPLOAD_BYTES",
                &val,
            );
        }

        // Pagination overrides
        if let Some(val) = lookup("PD_CONF_PAGINATION_DEFAULT_LIMIT") {
            parse_into(
                &mut self.pagination.default_limit,
                "PD_CONF_PAGINATION_DEFAULT_LIMIT",
                &val,
            );
        }
        if let Some(val) = lookup("PD_CONF_PAGINATION_MAX_LIMIT") {
            parse_into(
                &mut self.pagination.max_limit,
                "PD_CONF_PAGINATION_MAX_LIMIT",
                &val,
            );
        }
    }

    fn ensure_pagination_bounds(&mut self) {
        if self.pagination.max_limit < 1 {
            tracing::warn!(
                "pagination.max_limit={} is invalid, using {}",
                self.pagination.max_limit,
                default_max_limit()
            );
            self.pagination.max_limit = default_max_limit();
        }
        self.pagination.default_limit = self
            .pagination
            .default_limit
            .clamp(0, self.pagination.max_limit);
    }

    /// Ensure required directories exist
    fn ensure_directories(&self) -> anyhow::Result<()> {
        // Ensure database directory exists
        if let Some(parent) = Path::new(&self.database.path).parent() {
            fs::create_dir_all(parent)?;
        }

        // Ensure media directory exists
        fs::create_dir_all(&self.storage.media_path)?;

        Ok(())
    }
}

fn parse_into<T: std::str::FromStr>(target: &mut T, key: &str, val: &str) {
    match val.trim().parse() {
        Ok(parsed) => *target = parsed,
        Err(_) => tracing::warn!("Ignoring invalid value for {}: {:?}", key, val),
    }
}
