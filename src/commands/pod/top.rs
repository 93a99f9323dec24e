// ABOUTME: pod top: show the processes running in a pod's containers.

use crate::args::UsageError;
use crate::commands::top::process_table;
use crate::commands::{Action, Context, EXIT_OK, fail};
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct PodTopArgs {
    /// Pod to examine
    pub pod: String,
}

#[derive(Debug)]
pub struct PodTop {
    pod: String,
}

impl PodTop {
    pub fn new(args: PodTopArgs) -> Result<Self, UsageError> {
        Ok(Self { pod: args.pod })
    }
}

#[async_trait]
impl Action for PodTop {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let pod = match ctx.runtime.get_pod(&self.pod).await {
            Ok(pod) => pod,
            Err(e) => return fail(ctx.out, &e),
        };
        match ctx.runtime.top_pod(&pod.id).await {
            Ok(processes) => {
                ctx.out.table(&process_table(processes));
                EXIT_OK
            }
            Err(e) => fail(ctx.out, &e),
        }
    }
}
