// ABOUTME: Container log retrieval.
// ABOUTME: Logs arrive as a stream of raw output chunks.

use super::container::ContainerError;
use super::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

pub type LogStream = Pin<Box<dyn Stream<Item = Result<Bytes, ContainerError>> + Send>>;

#[async_trait]
pub trait LogOps: Sealed + Send + Sync {
    async fn container_logs(
        &self,
        id: &ContainerId,
        opts: &LogOptions,
    ) -> Result<LogStream, ContainerError>;
}

/// Options for log retrieval.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub stdout: bool,
    pub stderr: bool,
    /// Keep the stream open for new output.
    pub follow: bool,
    pub timestamps: bool,
}

impl LogOptions {
    /// Everything written so far, both streams, no follow.
    pub fn history() -> Self {
        Self {
            stdout: true,
            stderr: true,
            follow: false,
            timestamps: false,
        }
    }
}
