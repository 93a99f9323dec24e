// ABOUTME: Capability traits for talking to a remote container engine.
// ABOUTME: Container, image, pod, log, attach and system-info operations.

mod attach;
mod container;
mod image;
mod logs;
mod pod;
mod runtime_info;
pub(crate) mod sealed;
mod shared_types;

pub use attach::AttachOps;
pub use container::{ContainerError, ContainerFilters, ContainerOps};
pub use image::{ImageError, ImageOps};
pub use logs::{LogOps, LogOptions, LogStream};
pub use pod::{PodError, PodOps};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};
pub use shared_types::*;

/// How a failed remote call affects the rest of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The named object does not exist. Reported, then skipped.
    NotFound,
    /// The engine refused or failed the request.
    Remote,
    /// The engine could not be reached at all.
    Connection,
}

/// Classification shared by every runtime error type.
pub trait Fault: std::error::Error + Send + Sync {
    fn kind(&self) -> FaultKind;
}

/// Everything a command may ask of the engine.
pub trait FullRuntime:
    ContainerOps + ImageOps + PodOps + LogOps + AttachOps + RuntimeInfo
{
}

impl<T> FullRuntime for T where
    T: ContainerOps + ImageOps + PodOps + LogOps + AttachOps + RuntimeInfo
{
}
