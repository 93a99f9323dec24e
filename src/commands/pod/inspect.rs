// ABOUTME: pod inspect: print libpod's description of pods as one JSON array.

use crate::args::UsageError;
use crate::commands::{Action, Batch, Context, fail};
use crate::resolve::{Pods, Targets, resolve};
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct PodInspectArgs {
    /// Pods to inspect
    #[arg(required = true)]
    pub pods: Vec<String>,
}

#[derive(Debug)]
pub struct PodInspect {
    targets: Targets,
}

impl PodInspect {
    pub fn new(args: PodInspectArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::named(args.pods, "pod")?,
        })
    }
}

#[async_trait]
impl Action for PodInspect {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let resolved = match resolve(&Pods(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        let mut documents = Vec::with_capacity(resolved.found.len());
        for found in &resolved.found {
            match ctx.runtime.inspect_pod(&found.entity.id).await {
                Ok(document) => documents.push(document),
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
