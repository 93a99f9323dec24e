// ABOUTME: mount: show where container filesystems are mounted on the engine host.
// ABOUTME: Without names, every container is listed.

use super::{Action, Batch, Context, EXIT_FAILURE, fail};
use crate::args::UsageError;
use crate::output::Table;
use crate::resolve::{Containers, Targets, resolve};
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct MountArgs {
    /// Containers to show; all containers when omitted
    pub containers: Vec<String>,
}

#[derive(Debug)]
pub struct Mount {
    targets: Targets,
}

impl Mount {
    pub fn new(args: MountArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::or_all(args.containers),
        })
    }
}

#[async_trait]
impl Action for Mount {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let resolved = match resolve(&Containers(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };
        if resolved.found.is_empty() && resolved.missing.is_empty() {
            ctx.out.error("Unable to find any containers.");
            return EXIT_FAILURE;
        }

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        let mut table = Table::new(["CONTAINER ID", "DESTINATION"]);
        for found in &resolved.found {
            match ctx.runtime.inspect_container(&found.entity.id).await {
                Ok(details) => table.push(vec![
                    found.entity.id.short().to_string(),
                    details.merged_dir.unwrap_or_default(),
                ]),
                Err(e) => {
                    if batch.failed(&e).is_break() {
                        break;
                    }
                }
            }
        }

        if !table.is_empty() {
            ctx.out.table(&table);
        }
        batch.status()
    }
}
