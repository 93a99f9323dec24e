// ABOUTME: restart: stop and start containers again.
// ABOUTME: Each target gets the same grace period before being killed.

use super::{Action, Batch, Context, fail};
use crate::args::{InputAction, PositiveInt, PositiveIntAction, UsageError, help_for};
use crate::resolve::{Containers, Targets, resolve};
use async_trait::async_trait;
use clap::Args;
use std::time::Duration;

#[derive(Debug, Clone, Args)]
pub struct RestartArgs {
    #[arg(
        long,
        default_value = "10",
        value_name = PositiveIntAction::METAVAR,
        help = help_for::<PositiveIntAction>(
            "Timeout to wait before forcibly stopping the container (default: 10 seconds)."
        )
    )]
    pub timeout: PositiveInt,

    /// Containers to restart
    #[arg(required = true)]
    pub targets: Vec<String>,
}

#[derive(Debug)]
pub struct Restart {
    targets: Targets,
    timeout: Duration,
}

impl Restart {
    pub fn new(args: RestartArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::named(args.targets, "container")?,
            timeout: Duration::from_secs(args.timeout.get()),
        })
    }
}

#[async_trait]
impl Action for Restart {
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
                .restart_container(&found.entity.id, self.timeout)
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
