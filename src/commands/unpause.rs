// ABOUTME: unpause: resume paused containers.
// ABOUTME: With --all, every paused container is resumed.

use super::{Action, Batch, Context, fail};
use crate::args::UsageError;
use crate::resolve::{Containers, Targets, resolve};
use crate::runtime::Container;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct UnpauseArgs {
    /// Unpause all paused containers
    #[arg(short, long)]
    pub all: bool,

    /// Containers to unpause
    pub containers: Vec<String>,
}

#[derive(Debug)]
pub struct Unpause {
    targets: Targets,
}

impl Unpause {
    pub fn new(args: UnpauseArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::exclusive(args.all, args.containers, "container")?,
        })
    }
}

#[async_trait]
impl Action for Unpause {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let mut resolved = match resolve(&Containers(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };
        if self.targets.is_all() {
            resolved.retain(Container::paused);
        }

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        for found in &resolved.found {
            match ctx.runtime.unpause_container(&found.entity.id).await {
                Ok(()) => batch.done(&found.ident),
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
