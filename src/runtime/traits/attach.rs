// ABOUTME: Attaching the local terminal to a container's standard streams.
// ABOUTME: Returns the raw output stream and an input writer.

use super::container::ContainerError;
use super::sealed::Sealed;
use super::shared_types::{AttachIo, AttachOptions};
use crate::types::ContainerId;
use async_trait::async_trait;

#[async_trait]
pub trait AttachOps: Sealed + Send + Sync {
    async fn attach_container(
        &self,
        id: &ContainerId,
        opts: &AttachOptions,
    ) -> Result<AttachIo, ContainerError>;
}
