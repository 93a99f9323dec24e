// ABOUTME: rmi: delete images from the engine host.
// ABOUTME: Unknown images are reported and skipped.

use super::{Action, Batch, Context};
use crate::args::UsageError;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct RmiArgs {
    /// Remove the image even if containers use it
    #[arg(short, long)]
    pub force: bool,

    /// Images to delete
    #[arg(required = true)]
    pub targets: Vec<String>,
}

#[derive(Debug)]
pub struct Rmi {
    targets: Vec<String>,
    force: bool,
}

impl Rmi {
    pub fn new(args: RmiArgs) -> Result<Self, UsageError> {
        if args.targets.is_empty() {
            return Err(UsageError::no_targets("image"));
        }
        Ok(Self {
            targets: args.targets,
            force: args.force,
        })
    }
}

#[async_trait]
impl Action for Rmi {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let mut batch = Batch::new(ctx.out);

        for ident in &self.targets {
            match ctx.runtime.remove_image(ident, self.force).await {
                Ok(()) => batch.done(ident),
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
