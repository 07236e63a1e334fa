//! Registry process settings loaded via OrthoConfig.
//!
//! Values come from `REGISTRY_*` environment variables or matching
//! command-line flags (`--host`, `--port`, `--metrics`).

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Listener and instrumentation settings for the registry server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct ServerSettings {
    /// Interface address to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Expose Prometheus metrics on `/metrics` when built with `metrics`.
    #[ortho_config(default = false)]
    pub metrics: bool,
}

impl ServerSettings {
    /// Return the configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the listener address.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when `host` is not an IP
    /// address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let ip = match self.host.as_deref() {
            None => DEFAULT_HOST,
            Some(host) => host.trim().parse().map_err(|error| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("REGISTRY_HOST {host:?} is not an IP address: {error}"),
                )
            })?,
        };
        Ok(SocketAddr::new(ip, self.port()))
    }
}
