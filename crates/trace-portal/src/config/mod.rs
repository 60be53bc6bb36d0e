use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Signature granted root admin rights when no override is configured.
pub const DEFAULT_ROOT_SIGNATURE: &str = "#INELUDIBLE";

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

/// Top-level configuration for the portal service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub portal: PortalConfig,
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

        let root_signature = env::var("PORTAL_ROOT_SIGNATURE")
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_ROOT_SIGNATURE.to_string());
        let portal = PortalConfig::new(root_signature)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            portal,
        })
    }
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Community rules that are not part of the traces rubric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    root_signature: String,
}

impl PortalConfig {
    pub fn new(root_signature: impl Into<String>) -> Result<Self, ConfigError> {
        let root_signature = root_signature.into();
        if !root_signature.starts_with('#') || root_signature.len() < 2 {
            return Err(ConfigError::InvalidRootSignature {
                value: root_signature,
            });
        }
        Ok(Self { root_signature })
    }

    /// The only member allowed to grant or revoke admin rights.
    pub fn root_signature(&self) -> &str {
        &self.root_signature
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            root_signature: DEFAULT_ROOT_SIGNATURE.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRootSignature { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRootSignature { value } => write!(
                f,
                "PORTAL_ROOT_SIGNATURE must start with '#' followed by a handle (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidRootSignature { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
