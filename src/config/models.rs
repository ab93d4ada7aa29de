use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use super::validation::ValidationError;
use crate::engine::{DEFAULT_PORT, MatchMode};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Socket address built from `host` and `port`.
    ///
    /// Checked when serving rather than at load time, so commands that never
    /// bind are not blocked by it.
    pub fn bind_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ValidationError::InvalidHost {
                host: self.host.clone(),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Application tree location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Directory scanned for convention files
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Base for a relative `root`; the process working directory when unset
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            cwd: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("./app")
}

/// Route assembly options
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoutingConfig {
    /// `prefix` (default) or `segment`
    #[serde(default)]
    pub middleware_match: MatchMode,
}
