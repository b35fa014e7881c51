use super::env::{parse_or, read};

/// Server configuration for HTTP listener
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load server configuration from environment variables
    ///
    /// Environment variables:
    /// - SERVICE_IP: IP address to bind (default: "127.0.0.1")
    /// - SERVICE_PORT: Port to bind (default: 8080)
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            ip: read("SERVICE_IP").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or("SERVICE_PORT", read("SERVICE_PORT"), 8080)?,
        })
    }

    /// Get the bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }

    /// Base URL advertised in the OpenAPI document
    pub fn public_url(&self) -> String {
        format!("http://{}", self.bind_address())
    }
}
