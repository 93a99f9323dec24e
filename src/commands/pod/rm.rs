// ABOUTME: pod rm: delete pods, optionally with their running containers.

use crate::args::UsageError;
use crate::commands::{Action, Batch, Context, fail};
use crate::resolve::{Pods, Targets, resolve};
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct PodRmArgs {
    /// Remove all pods
    #[arg(short, long)]
    pub all: bool,

    /// Stop and remove running containers first
    #[arg(short, long)]
    pub force: bool,

    /// Pods to delete
    pub pods: Vec<String>,
}

#[derive(Debug)]
pub struct PodRm {
    targets: Targets,
    force: bool,
}

impl PodRm {
    pub fn new(args: PodRmArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::exclusive(args.all, args.pods, "pod")?,
            force: args.force,
        })
    }
}

#[async_trait]
impl Action for PodRm {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let resolved = match resolve(&Pods(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        for found in &resolved.found {
            match ctx.runtime.remove_pod(&found.entity.id, self.force).await {
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
