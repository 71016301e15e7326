use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("CIPHERFORM_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CIPHERFORM_HOST: {e}"))?;

        let port: u16 = env_or("CIPHERFORM_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid CIPHERFORM_PORT: {e}"))?;

        Ok(ApiConfig { host, port })
    }
}

/// Development server settings. Only the upstream API host is read from the
/// environment; everything else is a fixed default.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Where requests under the proxy prefix are forwarded.
    pub upstream: String,
    pub host: IpAddr,
    pub port: u16,
    /// Static content root.
    pub root: PathBuf,
    /// Path prefix stripped before forwarding.
    pub proxy_prefix: String,
    /// When on, static responses are marked uncacheable so edits show up on refresh.
    pub hot: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        DevServerConfig {
            upstream: "http://localhost:5000".to_string(),
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            root: PathBuf::from("./public"),
            proxy_prefix: "/api".to_string(),
            hot: true,
        }
    }
}

impl DevServerConfig {
    pub fn from_env() -> Self {
        DevServerConfig {
            upstream: env_or("API_HOST", "http://localhost:5000"),
            ..DevServerConfig::default()
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
