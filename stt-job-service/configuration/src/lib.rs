use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use config::ConfigError;

mod logging;

pub use logging::setup_logging;

pub type AppConfig = SttJobsConfig;

pub const CONFIG_PREFIX: &str = "STT_JOBS";
pub const CONFIG_PATH_ENV: &str = "STT_JOBS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SttJobsConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Create missing tables at startup.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the user id verified by the upstream gateway.
    #[serde(default = "default_user_header")]
    pub user_header: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: 0,
            connect_timeout_secs: default_connect_timeout_secs(),
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
        }
    }
}

/// Defaults, then the TOML file named by `STT_JOBS_CONFIG` (or
/// `config/default.toml` when present), then `STT_JOBS__*` variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let builder = config::Config::builder().add_source(config::Config::try_from(
        &AppConfig::default(),
    )?);
    let builder = if path.exists() {
        builder.add_source(config::File::from(path))
    } else {
        builder
    };

    builder
        .add_source(
            config::Environment::with_prefix(CONFIG_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_database_url() -> String {
    "sqlite://data/stt-jobs.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_user_header() -> String {
    "x-user-id".to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn config_defaults_are_deterministic() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
        assert_eq!(cfg.database.max_connections, 10);
        assert!(cfg.database.run_migrations);
        assert_eq!(cfg.service.auth.user_header, "x-user-id");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config_from(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let path = std::env::temp_dir().join(format!(
            "stt-jobs-config-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9191\n\n[logging]\nformat = \"json\"\n\n[database]\nurl = \"sqlite::memory:\"\n\n[service.auth]\nuser_header = \"x-forwarded-user\""
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.server.port, 9191);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.connect_timeout_secs, 5);
        assert_eq!(cfg.service.auth.user_header, "x-forwarded-user");
    }
}
