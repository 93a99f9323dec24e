// ABOUTME: Remote container engine access for Docker and Podman.
// ABOUTME: Endpoint detection, connection setup and the capability traits.

mod bollard;
mod detection;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod libpod;
mod traits;
mod types;

pub use self::bollard::BollardRuntime;
pub use detection::{DetectionError, detect_endpoint, detect_local, endpoint_from_url};
pub use error::{ConnectError, ConnectErrorKind};
pub use traits::*;
pub use types::{Endpoint, RuntimeConfig, RuntimeType, Transport};

use std::time::Duration;

/// Resolve the endpoint for `config` and connect to it.
pub async fn connect(
    config: &RuntimeConfig,
    timeout: Duration,
) -> Result<BollardRuntime, ConnectError> {
    let endpoint = detect_endpoint(config)?;
    tracing::debug!(%endpoint, "using engine");
    BollardRuntime::connect(&endpoint, timeout).await
}
