//! Server settings loaded via OrthoConfig and the runtime configuration
//! derived from them.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use camino::Utf8PathBuf;
use coursehub::domain::SeedPolicy;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_FILE: &str = "db.json";

/// Settings read from `COURSEHUB_*` variables, config files and flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSEHUB")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// JSON file holding users and courses.
    pub data_file: Option<PathBuf>,
    /// Write the starter accounts when the data file does not exist.
    #[ortho_config(default = true)]
    pub seed: bool,
}

impl ServerSettings {
    /// Resolve host and port into a socket address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port.unwrap_or(DEFAULT_PORT);
        (host, port).to_socket_addrs()?.next().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("{host}:{port} did not resolve"),
            )
        })
    }

    /// Configured data file, falling back to `db.json` in the working
    /// directory.
    pub fn data_file(&self) -> std::io::Result<Utf8PathBuf> {
        let path = self
            .data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Utf8PathBuf::from_path_buf(path).map_err(|path| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("data file path is not UTF-8: {}", path.display()),
            )
        })
    }

    /// Whether an absent data file is seeded.
    pub fn seed_policy(&self) -> SeedPolicy {
        if self.seed {
            SeedPolicy::Seed
        } else {
            SeedPolicy::Empty
        }
    }
}

/// Runtime configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration from session and bind settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }
}
