// ABOUTME: pause: freeze the processes of containers.
// ABOUTME: With --all, every running container is paused.

use super::{Action, Batch, Context, fail};
use crate::args::UsageError;
use crate::resolve::{Containers, Targets, resolve};
use crate::runtime::Container;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct PauseArgs {
    /// Pause all running containers
    #[arg(short, long)]
    pub all: bool,

    /// Containers to pause
    pub containers: Vec<String>,
}

#[derive(Debug)]
pub struct Pause {
    targets: Targets,
}

impl Pause {
    pub fn new(args: PauseArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::exclusive(args.all, args.containers, "container")?,
        })
    }
}

#[async_trait]
impl Action for Pause {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let mut resolved = match resolve(&Containers(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };
        if self.targets.is_all() {
            resolved.retain(Container::running);
        }

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        for found in &resolved.found {
            match ctx.runtime.pause_container(&found.entity.id).await {
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
