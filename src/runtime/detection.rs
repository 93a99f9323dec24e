// ABOUTME: Engine endpoint selection from explicit settings or local sockets.
// ABOUTME: Auto-detection checks Podman sockets first, then Docker.

use super::types::{Endpoint, RuntimeConfig, RuntimeType, Transport};
use std::path::Path;

/// Error during endpoint detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked Podman and Docker sockets)")]
    NoRuntimeFound,

    #[error("unsupported engine URL \"{0}\", expected unix://, tcp:// or http://")]
    UnsupportedUrl(String),
}

/// Pick the endpoint for `config`, falling back to local detection.
pub fn detect_endpoint(config: &RuntimeConfig) -> Result<Endpoint, DetectionError> {
    if let Some(url) = &config.url {
        return endpoint_from_url(url, config.runtime);
    }

    if let Some(socket) = &config.socket {
        let runtime_type = config.runtime.unwrap_or_else(|| guess_runtime(socket));
        return Ok(Endpoint::unix(runtime_type, socket.clone()));
    }

    match config.runtime {
        Some(RuntimeType::Podman) => Ok(rootless_podman()
            .unwrap_or_else(|| Endpoint::unix(RuntimeType::Podman, ROOTFUL_PODMAN))),
        Some(RuntimeType::Docker) => Ok(Endpoint::unix(RuntimeType::Docker, DOCKER_SOCKET)),
        None => detect_local(),
    }
}

/// Parse a `unix://`, `tcp://` or `http(s)://` engine URL.
pub fn endpoint_from_url(
    url: &str,
    runtime: Option<RuntimeType>,
) -> Result<Endpoint, DetectionError> {
    if let Some(path) = url.strip_prefix("unix://") {
        let runtime_type = runtime.unwrap_or_else(|| guess_runtime(path));
        return Ok(Endpoint::unix(runtime_type, path));
    }

    let http = if let Some(rest) = url.strip_prefix("tcp://") {
        format!("http://{rest}")
    } else if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        return Err(DetectionError::UnsupportedUrl(url.to_string()));
    };

    Ok(Endpoint {
        runtime_type: runtime.unwrap_or(RuntimeType::Podman),
        transport: Transport::Http(http),
    })
}

/// Detect a container engine on the local system.
///
/// Detection order:
/// 1. Rootless Podman socket (`$XDG_RUNTIME_DIR/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker socket (`/var/run/docker.sock`)
pub fn detect_local() -> Result<Endpoint, DetectionError> {
    if let Some(endpoint) = rootless_podman() {
        return Ok(endpoint);
    }

    if Path::new(ROOTFUL_PODMAN).exists() {
        return Ok(Endpoint::unix(RuntimeType::Podman, ROOTFUL_PODMAN));
    }

    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(Endpoint::unix(RuntimeType::Docker, DOCKER_SOCKET));
    }

    Err(DetectionError::NoRuntimeFound)
}

fn rootless_podman() -> Option<Endpoint> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .ok()
        .or_else(|| get_uid().map(|uid| format!("/run/user/{uid}")))?;
    let socket = format!("{runtime_dir}/podman/podman.sock");
    Path::new(&socket)
        .exists()
        .then(|| Endpoint::unix(RuntimeType::Podman, socket))
}

fn guess_runtime(socket: &str) -> RuntimeType {
    if socket.contains("docker") {
        RuntimeType::Docker
    } else {
        RuntimeType::Podman
    }
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";
