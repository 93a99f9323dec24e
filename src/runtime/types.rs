// ABOUTME: Runtime type and engine endpoint definitions.
// ABOUTME: An endpoint is a unix socket or an HTTP URL plus the engine flavour.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The container engine flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "docker"),
            RuntimeType::Podman => write!(f, "podman"),
        }
    }
}

impl FromStr for RuntimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docker" => Ok(RuntimeType::Docker),
            "podman" => Ok(RuntimeType::Podman),
            other => Err(format!("unknown runtime \"{other}\", expected docker or podman")),
        }
    }
}

/// How the engine is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// Path of a unix socket.
    Unix(String),
    /// `http://host:port` base URL.
    Http(String),
}

/// A resolved engine endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub runtime_type: RuntimeType,
    pub transport: Transport,
}

impl Endpoint {
    pub fn unix(runtime_type: RuntimeType, path: impl Into<String>) -> Self {
        Self {
            runtime_type,
            transport: Transport::Unix(path.into()),
        }
    }

    pub fn socket_path(&self) -> Option<&str> {
        match &self.transport {
            Transport::Unix(path) => Some(path),
            Transport::Http(_) => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.transport {
            Transport::Unix(path) => write!(f, "{} at unix://{}", self.runtime_type, path),
            Transport::Http(url) => write!(f, "{} at {}", self.runtime_type, url),
        }
    }
}

/// Explicit endpoint settings, each overriding auto-detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub runtime: Option<RuntimeType>,
    /// Unix socket path.
    pub socket: Option<String>,
    /// `tcp://` or `http://` URL. Wins over `socket`.
    pub url: Option<String>,
}
