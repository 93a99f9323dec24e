// ABOUTME: Endpoint settings read from environment variables.
// ABOUTME: Empty variables count as unset.

use crate::error::{Error, Result};
use crate::runtime::{RuntimeConfig, RuntimeType};

pub const ENV_SOCKET: &str = "PODREMOTE_SOCKET";
pub const ENV_URL: &str = "PODREMOTE_URL";
pub const ENV_RUNTIME: &str = "PODREMOTE_RUNTIME";
/// Podman's own remote URL variable, used when PODREMOTE_URL is unset.
pub const ENV_CONTAINER_HOST: &str = "CONTAINER_HOST";

pub fn from_env() -> Result<RuntimeConfig> {
    let runtime = var(ENV_RUNTIME)
        .map(|raw| {
            raw.parse::<RuntimeType>()
                .map_err(|e| Error::InvalidConfig(format!("{ENV_RUNTIME}: {e}")))
        })
        .transpose()?;

    Ok(RuntimeConfig {
        runtime,
        socket: var(ENV_SOCKET),
        url: var(ENV_URL).or_else(|| var(ENV_CONTAINER_HOST)),
    })
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
