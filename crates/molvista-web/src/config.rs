//! Server configuration from the environment.

use std::net::SocketAddr;

use molvista_common::error::{MolvistaError, Result};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3001";

/// Bind address: `MOLVISTA_ADDR` if set, otherwise [`DEFAULT_ADDR`].
pub fn bind_addr() -> Result<SocketAddr> {
    let raw = std::env::var("MOLVISTA_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    parse_addr(&raw)
}

fn parse_addr(raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .map_err(|e| MolvistaError::Config(format!("invalid bind address \"{raw}\": {e}")))
}
