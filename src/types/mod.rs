// ABOUTME: Typed identifiers and validated image references.
// ABOUTME: Shared by the runtime layer and every command.

mod id;
mod image_ref;

pub use id::{ContainerId, Id, ImageId, PodId};
pub use image_ref::{ImageRef, ParseImageRefError};
