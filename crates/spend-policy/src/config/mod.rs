use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::policy::{PolicyConfig, PolicyError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub policy: PolicyConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let policy = match env::var_os("POLICY_CONFIG_PATH") {
            Some(path) => load_policy(Path::new(&path))?,
            None => PolicyConfig::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            policy,
        })
    }
}

/// Reads a JSON policy document; absent keys keep their defaults.
pub fn load_policy(path: &Path) -> Result<PolicyConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::PolicyFile {
        path: path.to_path_buf(),
        source,
    })?;
    let policy: PolicyConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::PolicyParse {
            path: path.to_path_buf(),
            source,
        })?;
    policy.validate().map_err(ConfigError::InvalidPolicy)?;
    Ok(policy)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    PolicyFile {
        path: PathBuf,
        source: std::io::Error,
    },
    PolicyParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidPolicy(PolicyError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::PolicyFile { path, .. } => {
                write!(f, "unable to read policy config {}", path.display())
            }
            ConfigError::PolicyParse { path, source } => {
                write!(f, "policy config {} is not valid: {}", path.display(), source)
            }
            ConfigError::InvalidPolicy(err) => write!(f, "inconsistent policy config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidPolicy(source) => Some(source),
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::PolicyFile { source, .. } => Some(source),
            ConfigError::PolicyParse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("POLICY_CONFIG_PATH");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.policy, PolicyConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "http");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();
    }

    #[test]
    fn policy_file_overrides_selected_thresholds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("policy.json");
        let mut file = fs::File::create(&path).expect("create policy file");
        writeln!(
            file,
            r#"{{ "charging": {{ "threshold": 120000 }}, "other": {{ "basketCap": 800000 }} }}"#
        )
        .expect("write policy file");

        env::set_var("POLICY_CONFIG_PATH", &path);
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.policy.charging.threshold, 120_000);
        assert_eq!(config.policy.charging.basket_cap, 300_000);
        assert_eq!(config.policy.other.basket_cap, 800_000);
        assert_eq!(config.policy.rides, PolicyConfig::default().rides);
        reset_env();
    }

    #[test]
    fn missing_policy_file_is_reported_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");

        match load_policy(&path) {
            Err(ConfigError::PolicyFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected policy file error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_policy_document_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("policy.json");
        fs::write(&path, r#"{ "rides": { "windowStart": "6am" } }"#).expect("write");

        assert!(matches!(
            load_policy(&path),
            Err(ConfigError::PolicyParse { .. })
        ));
    }

    #[test]
    fn inconsistent_policy_document_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("policy.json");
        fs::write(&path, r#"{ "other": { "threshold": 2000000 } }"#).expect("write");

        assert!(matches!(
            load_policy(&path),
            Err(ConfigError::InvalidPolicy(PolicyError::ThresholdAboveCap {
                threshold: "other.threshold",
                ..
            }))
        ));
    }
}
