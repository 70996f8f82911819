use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::screening::domain::RiskLevel;
use crate::screening::notify::Channel;

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

/// Top-level configuration, loaded once at startup and passed into the
/// services that need it. Nothing below reads the environment at call time.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub notify: NotifyConfig,
    pub history: HistoryConfig,
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

        let notify_enabled = env::var("NOTIFY_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .trim()
            .eq_ignore_ascii_case("true");
        let threshold_raw =
            env::var("NOTIFY_THRESHOLD").unwrap_or_else(|_| "medium".to_string());
        let threshold = RiskLevel::parse_label(&threshold_raw)
            .ok_or(ConfigError::InvalidThreshold { value: threshold_raw })?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            notify: NotifyConfig {
                enabled: notify_enabled,
                access_token: non_empty_var("LINE_CHANNEL_ACCESS_TOKEN"),
                group_id: non_empty_var("LINE_GROUP_ID"),
                alert_user_id: non_empty_var("LINE_ALERT_USER_ID"),
                threshold,
            },
            history: HistoryConfig {
                username: non_empty_var("HISTORY_USERNAME"),
                password: non_empty_var("HISTORY_PASSWORD"),
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
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

/// Alert dispatch configuration. The threshold decides which risk levels
/// notify; the channel list is derived here so the dispatcher never touches
/// the environment.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub access_token: Option<String>,
    pub group_id: Option<String>,
    pub alert_user_id: Option<String>,
    pub threshold: RiskLevel,
}

impl NotifyConfig {
    /// The group channel always exists (a missing group id fails that
    /// channel at dispatch time, not silently here); a direct-user channel
    /// is added only when configured.
    pub fn channels(&self) -> Vec<Channel> {
        let mut channels = vec![Channel {
            destination: self.group_id.clone().unwrap_or_default(),
            label: "line-group".to_string(),
        }];

        if let Some(user_id) = &self.alert_user_id {
            channels.push(Channel {
                destination: user_id.clone(),
                label: "line-user".to_string(),
            });
        }

        channels
    }
}

/// Credential pair backing the static history gate. Left unset, the history
/// surface stays locked.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { value } => {
                write!(
                    f,
                    "NOTIFY_THRESHOLD '{value}' is not one of none/low/medium/high"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThreshold { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "NOTIFY_ENABLED",
            "NOTIFY_THRESHOLD",
            "LINE_CHANNEL_ACCESS_TOKEN",
            "LINE_GROUP_ID",
            "LINE_ALERT_USER_ID",
            "HISTORY_USERNAME",
            "HISTORY_PASSWORD",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert!(config.notify.enabled);
        assert_eq!(config.notify.threshold, RiskLevel::Medium);
        assert!(config.notify.access_token.is_none());
        assert!(config.history.username.is_none());
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NOTIFY_THRESHOLD", "urgent");
        let error = AppConfig::load().expect_err("threshold rejected");
        assert!(matches!(error, ConfigError::InvalidThreshold { .. }));
        reset_env();
    }

    #[test]
    fn channels_include_optional_user_destination() {
        let notify = NotifyConfig {
            enabled: true,
            access_token: Some("token".to_string()),
            group_id: Some("G123".to_string()),
            alert_user_id: Some("U456".to_string()),
            threshold: RiskLevel::Medium,
        };

        let channels = notify.channels();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].label, "line-group");
        assert_eq!(channels[0].destination, "G123");
        assert_eq!(channels[1].label, "line-user");
    }

    #[test]
    fn group_channel_exists_even_without_destination() {
        let notify = NotifyConfig {
            enabled: true,
            access_token: None,
            group_id: None,
            alert_user_id: None,
            threshold: RiskLevel::Medium,
        };

        let channels = notify.channels();
        assert_eq!(channels.len(), 1);
        assert!(channels[0].destination.is_empty());
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
}
