// ABOUTME: commit: create a new image from a container's changes.
// ABOUTME: --change applies Dockerfile instructions to the committed image.

use super::{Action, Context, EXIT_OK, fail};
use crate::args::{ChangeAction, ChangeDirective, InputAction, UsageError, help_for};
use crate::runtime::CommitConfig;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    #[arg(
        short,
        long,
        value_name = ChangeAction::METAVAR,
        help = help_for::<ChangeAction>("Dockerfile instruction for the new image.")
    )]
    pub change: Vec<ChangeDirective>,

    /// Commit message for the new image
    #[arg(short, long)]
    pub message: Option<String>,

    /// Author of the new image
    #[arg(short, long)]
    pub author: Option<String>,

    /// Pause the container while committing
    #[arg(short, long)]
    pub pause: bool,

    /// Container to commit
    pub container: String,

    /// Name of the new image, repository[:tag]
    pub image: Option<String>,
}

#[derive(Debug)]
pub struct Commit {
    container: String,
    config: CommitConfig,
}

impl Commit {
    pub fn new(args: CommitArgs) -> Result<Self, UsageError> {
        Ok(Self {
            container: args.container,
            config: CommitConfig {
                image: args.image,
                changes: args.change,
                message: args.message,
                author: args.author,
                pause: args.pause,
            },
        })
    }
}

#[async_trait]
impl Action for Commit {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let container = match ctx.runtime.get_container(&self.container).await {
            Ok(container) => container,
            Err(e) => return fail(ctx.out, &e),
        };
        match ctx.runtime.commit_container(&container.id, &self.config).await {
            Ok(image) => {
                ctx.out.item(image.as_str());
                EXIT_OK
            }
            Err(e) => fail(ctx.out, &e),
        }
    }
}
