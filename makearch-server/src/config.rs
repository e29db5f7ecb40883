//! Server configuration from environment variables.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use makearch_ai::AiConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub ai: AiConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_addr: std::env::var("MAKEARCH_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
                .parse()
                .context("Invalid MAKEARCH_BIND_ADDR")?,
            ai: AiConfig::from_env()?,
        })
    }
}
