//! Service configuration loaded from the environment

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// API service configuration
///
/// # Environment Variables
/// - `API_HOST`: Bind address (default: "0.0.0.0")
/// - `API_PORT`: Bind port (default: 3001)
/// - `API_JWT_PUBLIC_KEY`: RS256 public key, PEM text or path to a PEM file
/// - `API_JWT_SECRET`: HS256 shared secret, used when no public key is set
/// - `API_JWT_ISSUER`: Expected `iss` claim (optional)
/// - `API_JWT_AUDIENCE`: Expected `aud` claim (optional, unchecked when unset)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub jwt_public_key: Option<String>,
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default)]
    pub jwt_issuer: Option<String>,
    #[serde(default)]
    pub jwt_audience: Option<String>,
}

impl AppConfig {
    /// Load the configuration from `API_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001)?
            .add_source(Environment::with_prefix("API").prefix_separator("_"))
            .build()?
            .try_deserialize()?;

        if config.jwt_public_key.is_none() && config.jwt_secret.is_none() {
            return Err(ConfigError::Message(
                "either API_JWT_PUBLIC_KEY or API_JWT_SECRET must be set".to_string(),
            ));
        }

        Ok(config)
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
