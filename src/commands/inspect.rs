// ABOUTME: inspect: print the engine's full description of containers.
// ABOUTME: Found documents are printed together as one JSON array.

use super::{Action, Batch, Context, fail};
use crate::args::UsageError;
use crate::resolve::{Containers, Targets, resolve};
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Containers to inspect
    #[arg(required = true)]
    pub containers: Vec<String>,
}

#[derive(Debug)]
pub struct Inspect {
    targets: Targets,
}

impl Inspect {
    pub fn new(args: InspectArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::named(args.containers, "container")?,
        })
    }
}

#[async_trait]
impl Action for Inspect {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let resolved = match resolve(&Containers(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        let mut documents = Vec::with_capacity(resolved.found.len());
        for found in &resolved.found {
            match ctx.runtime.inspect_container(&found.entity.id).await {
                Ok(details) => documents.push(details.document),
                Err(e) => {
                    if batch.failed(&e).is_break() {
                        break;
                    }
                }
            }
        }

        if !documents.is_empty() {
            ctx.out.document(&documents);
        }
        batch.status()
    }
}
