//! Gateway configuration from flags and environment

use std::net::SocketAddr;

use clap::Parser;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key cannot be empty")]
    EmptyApiKey,
}

#[derive(Clone, Parser)]
#[command(
    name = "honeypot-gateway",
    version,
    about = "Scam engagement honeypot HTTP gateway"
)]
pub struct GatewayConfig {
    #[arg(
        long,
        env = "HONEYPOT_BIND_ADDR",
        default_value = "0.0.0.0:8080",
        help = "Address to listen on"
    )]
    pub bind: SocketAddr,

    #[arg(
        long,
        env = "API_KEY",
        hide_env_values = true,
        help = "Shared secret callers must send in the x-api-key header"
    )]
    pub api_key: String,

    #[arg(long, env = "HONEYPOT_LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(())
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("bind", &self.bind)
            .field("api_key", &"<redacted>")
            .field("log_json", &self.log_json)
            .finish()
    }
}
