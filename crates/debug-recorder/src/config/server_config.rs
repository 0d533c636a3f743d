use crate::config::default_port;

use std::net::{Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Local control surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Loopback port of the control surface.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Loopback socket the control surface binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}
