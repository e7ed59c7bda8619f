use crate::{
    errors::ApiError,
    validation::{validate_http_url, validate_prefix},
    Result,
};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Output format of the log subscriber
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Configuration for the API server
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Address to bind the server to
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// Port to run the server on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Name shown in the generated API documentation
    #[serde(default = "default_project_name")]
    pub project_name: String,
    /// Prefix for every API route, e.g. `/api/v1`. Empty mounts at the root
    #[serde(default)]
    pub api_prefix: String,
    /// Serve the OpenAPI document and the docs UIs
    #[serde(default = "default_docs_enabled")]
    pub docs_enabled: bool,
    /// Comma separated list of allowed CORS origins. CORS is disabled when empty
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Requests per second accepted across all clients
    #[serde(default = "default_rate_limit_per_second")]
    pub rate_limit_per_second: u64,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8000
}

fn default_project_name() -> String {
    "backend-api".to_string()
}

fn default_docs_enabled() -> bool {
    true
}

fn default_rate_limit_per_second() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            project_name: default_project_name(),
            api_prefix: String::new(),
            docs_enabled: default_docs_enabled(),
            cors_origins: Vec::new(),
            rate_limit_per_second: default_rate_limit_per_second(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Reads the configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config: Config = envy::from_iter(vars)?;
        config.cors_origins = config
            .cors_origins
            .iter()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_prefix(&self.api_prefix)?;

        if self.rate_limit_per_second == 0 {
            return Err(ApiError::InvalidConfig(
                "RATE_LIMIT_PER_SECOND must be greater than zero".to_string(),
            ));
        }

        for origin in &self.cors_origins {
            validate_http_url(origin).map_err(|reason| ApiError::InvalidOrigin {
                origin: origin.clone(),
                reason,
            })?;
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.docs_enabled);
    }

    #[test]
    fn test_from_vars() {
        let config = Config::from_vars(vars(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("PROJECT_NAME", "demo"),
            ("API_PREFIX", "/api/v1"),
            ("DOCS_ENABLED", "false"),
            (
                "CORS_ORIGINS",
                "http://localhost:3000,https://app.example.com",
            ),
            ("RATE_LIMIT_PER_SECOND", "5"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.project_name, "demo");
        assert_eq!(config.api_prefix, "/api/v1");
        assert!(!config.docs_enabled);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "https://app.example.com"]
        );
        assert_eq!(config.rate_limit_per_second, 5);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_vars(vars(&[("API_PREFIX", "api")])),
            Err(ApiError::PrefixWithoutLeadingSlash(_))
        ));
        assert!(matches!(
            Config::from_vars(vars(&[("API_PREFIX", "/api/")])),
            Err(ApiError::PrefixWithTrailingSlash(_))
        ));
        assert!(matches!(
            Config::from_vars(vars(&[("RATE_LIMIT_PER_SECOND", "0")])),
            Err(ApiError::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_vars(vars(&[("CORS_ORIGINS", "ftp://example.com")])),
            Err(ApiError::InvalidOrigin { .. })
        ));
        assert!(matches!(
            Config::from_vars(vars(&[("PORT", "not-a-port")])),
            Err(ApiError::Config(_))
        ));
    }
}
