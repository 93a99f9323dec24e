// ABOUTME: rm: delete containers.
// ABOUTME: Running containers are only removed with --force.

use super::{Action, Batch, Context, fail};
use crate::args::UsageError;
use crate::resolve::{Containers, Targets, resolve};
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct RmArgs {
    /// Force delete of running container(s)
    #[arg(short, long)]
    pub force: bool,

    /// Containers to delete
    #[arg(required = true)]
    pub targets: Vec<String>,
}

#[derive(Debug)]
pub struct Rm {
    targets: Targets,
    force: bool,
}

impl Rm {
    pub fn new(args: RmArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::named(args.targets, "container")?,
            force: args.force,
        })
    }
}

#[async_trait]
impl Action for Rm {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let resolved = match resolve(&Containers(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        for found in &resolved.found {
            match ctx
                .runtime
                .remove_container(&found.entity.id, self.force)
                .await
            {
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
