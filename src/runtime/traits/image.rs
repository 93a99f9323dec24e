// ABOUTME: Image operations: pull, lookup, push and remove.
// ABOUTME: Image identifiers are passed through to the engine as typed.

use super::sealed::Sealed;
use super::shared_types::Image;
use super::{Fault, FaultKind};
use crate::types::ImageRef;
use async_trait::async_trait;

#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// Pull an image from its registry.
    async fn pull_image(&self, reference: &ImageRef) -> Result<(), ImageError>;

    /// Look up a local image by id or name.
    async fn get_image(&self, ident: &str) -> Result<Image, ImageError>;

    /// Push a local image to `destination`.
    async fn push_image(
        &self,
        ident: &str,
        destination: &str,
        tls_verify: bool,
    ) -> Result<(), ImageError>;

    async fn remove_image(&self, ident: &str, force: bool) -> Result<(), ImageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Image \"{0}\" not found")]
    NotFound(String),

    #[error("lost connection to the engine: {0}")]
    Connection(String),

    #[error("{0}")]
    Runtime(String),
}

impl Fault for ImageError {
    fn kind(&self) -> FaultKind {
        match self {
            ImageError::NotFound(_) => FaultKind::NotFound,
            ImageError::Connection(_) => FaultKind::Connection,
            ImageError::Runtime(_) => FaultKind::Remote,
        }
    }
}
