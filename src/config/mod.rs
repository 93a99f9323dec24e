// ABOUTME: Client configuration: the optional config.yml plus environment overrides.
// ABOUTME: Merges file, environment and command-line endpoint settings by precedence.

mod env;

pub use env::{ENV_CONTAINER_HOST, ENV_RUNTIME, ENV_SOCKET, ENV_URL, from_env};

use crate::args::DetachKey;
use crate::error::{Error, Result};
use crate::runtime::{RuntimeConfig, RuntimeType};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_DIR: &str = "podremote";
pub const CONFIG_FILENAME: &str = "config.yml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub runtime: Option<RuntimeType>,

    /// Unix socket of the engine.
    #[serde(default)]
    pub socket: Option<String>,

    /// `tcp://host:port` or `http://host:port`.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Tracing filter used when neither RUST_LOG nor --verbose is given.
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub detach_keys: Option<DetachKey>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            runtime: None,
            socket: None,
            url: None,
            timeout: default_timeout(),
            log_level: None,
            detach_keys: None,
        }
    }
}

impl ClientConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// `$XDG_CONFIG_HOME/podremote/config.yml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
    }

    /// Load `explicit`, or the default file when there is one.
    ///
    /// A missing default file gives the defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.exists() => return Err(Error::ConfigNotFound(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    /// Endpoint settings from this file alone.
    pub fn file_layer(&self) -> RuntimeConfig {
        RuntimeConfig {
            runtime: self.runtime,
            socket: self.socket.clone(),
            url: self.url.clone(),
        }
    }

    /// Combine command-line settings, the environment and this file.
    pub fn runtime_config(&self, cli: &RuntimeConfig) -> Result<RuntimeConfig> {
        Ok(layer([cli, &from_env()?, &self.file_layer()]))
    }
}

/// Merge endpoint settings, highest precedence first.
///
/// The socket/url pair comes whole from the first layer that names an
/// endpoint, so a lower layer's url cannot override a higher layer's socket.
/// The runtime flavour comes from the first layer that names one.
pub fn layer<const N: usize>(layers: [&RuntimeConfig; N]) -> RuntimeConfig {
    let endpoint = layers
        .iter()
        .find(|l| l.url.is_some() || l.socket.is_some());

    RuntimeConfig {
        runtime: layers.iter().find_map(|l| l.runtime),
        socket: endpoint.and_then(|l| l.socket.clone()),
        url: endpoint.and_then(|l| l.url.clone()),
    }
}
