// ABOUTME: pull: copy images from a registry onto the engine host.
// ABOUTME: Each image is pulled in turn and printed once it is present.

use super::{Action, Batch, Context};
use crate::args::UsageError;
use crate::types::ImageRef;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct PullArgs {
    /// Images to pull (name[:tag] or name@digest)
    #[arg(required = true)]
    pub images: Vec<ImageRef>,
}

#[derive(Debug)]
pub struct Pull {
    images: Vec<ImageRef>,
}

impl Pull {
    pub fn new(args: PullArgs) -> Result<Self, UsageError> {
        if args.images.is_empty() {
            return Err(UsageError::Conflict("You must give image(s) to pull".into()));
        }
        Ok(Self {
            images: args.images,
        })
    }
}

#[async_trait]
impl Action for Pull {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let mut batch = Batch::new(ctx.out);

        for image in &self.images {
            tracing::debug!(%image, "pulling image");
            let pulled = match ctx.runtime.pull_image(image).await {
                Ok(()) => ctx.runtime.get_image(&image.to_string()).await,
                Err(e) => Err(e),
            };
            match pulled {
                Ok(found) => batch.done(found.id.as_str()),
                Err(e) => {
                    if batch.failed(&e).is_break() {
                        break;
                    }
                }
            }
        }

        batch.status()
    }
}
