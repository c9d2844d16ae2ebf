//! Layered settings: built-in defaults, an optional TOML file,
//! then `NAVMESH_*` environment variables

use std::fmt;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/navmesh.toml";
pub const CONFIG_PATH_VAR: &str = "NAVMESH_CONFIG";
pub const DEFAULT_ENDPOINT: &str = "https://dsc.dev.aukiverse.com/spatial/restricttonavmesh";
pub const DEFAULT_RADIUS: f64 = 0.5;
pub const DEFAULT_POSEMESH_URL: &str = "https://api.posemesh.org";
pub const DEFAULT_DDS_URL: &str = "https://dds.posemesh.org";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub endpoint: String,
    pub domain_id: String,
    pub domain_server_url: String,
    pub radius: f64,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    pub auth: AuthSettings,
    pub mock: MockSettings,
}

/// Posemesh account used to obtain a domain token when no `access_token` is set
#[derive(Clone, PartialEq, Deserialize)]
pub struct AuthSettings {
    pub posemesh_url: String,
    pub dds_url: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl AuthSettings {
    /// Email and password, when both are set and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("posemesh_url", &self.posemesh_url)
            .field("dds_url", &self.dds_url)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MockSettings {
    pub bind_addr: String,
    /// Walkable rectangle as `[min_x, min_z, max_x, max_z]`
    pub walkable: [f64; 4],
}

impl Settings {
    /// Loads settings from `NAVMESH_CONFIG` (or the default path) and the environment
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    /// Loads settings with the given file layered over the defaults.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading navmesh settings");

        let builder = Self::defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("NAVMESH").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        debug!(
            endpoint = %settings.endpoint,
            domain_id = %settings.domain_id,
            radius = settings.radius,
            has_credentials = settings.auth.credentials().is_some(),
            "Resolved settings"
        );
        Ok(settings)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("domain_id", "test")?
            .set_default("domain_server_url", "test")?
            .set_default("radius", DEFAULT_RADIUS)?
            .set_default("auth.posemesh_url", DEFAULT_POSEMESH_URL)?
            .set_default("auth.dds_url", DEFAULT_DDS_URL)?
            .set_default("mock.bind_addr", "127.0.0.1:3000")?
            .set_default("mock.walkable", vec![-10.0, -10.0, 10.0, 10.0])?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            domain_id: "test".to_string(),
            domain_server_url: "test".to_string(),
            radius: DEFAULT_RADIUS,
            access_token: None,
            timeout_secs: None,
            auth: AuthSettings {
                posemesh_url: DEFAULT_POSEMESH_URL.to_string(),
                dds_url: DEFAULT_DDS_URL.to_string(),
                email: None,
                password: None,
            },
            mock: MockSettings {
                bind_addr: "127.0.0.1:3000".to_string(),
                walkable: [-10.0, -10.0, 10.0, 10.0],
            },
        }
    }
}
