// ABOUTME: stop: stop containers, killing them after a grace period.
// ABOUTME: With --all, every running container is stopped.

use super::{Action, Batch, Context, fail};
use crate::args::{InputAction, PositiveInt, PositiveIntAction, UsageError, help_for};
use crate::resolve::{Containers, Targets, resolve};
use crate::runtime::Container;
use async_trait::async_trait;
use clap::Args;
use std::time::Duration;

#[derive(Debug, Clone, Args)]
pub struct StopArgs {
    /// Stop all running containers
    #[arg(short, long)]
    pub all: bool,

    #[arg(
        short,
        long,
        default_value = "10",
        value_name = PositiveIntAction::METAVAR,
        help = help_for::<PositiveIntAction>("Seconds to wait before killing the container.")
    )]
    pub timeout: PositiveInt,

    /// Containers to stop
    pub containers: Vec<String>,
}

#[derive(Debug)]
pub struct Stop {
    targets: Targets,
    timeout: Duration,
}

impl Stop {
    pub fn new(args: StopArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::exclusive(args.all, args.containers, "container")?,
            timeout: Duration::from_secs(args.timeout.get()),
        })
    }
}

#[async_trait]
impl Action for Stop {
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
            match ctx.runtime.stop_container(&found.entity.id, self.timeout).await {
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
