// ABOUTME: pod pause, unpause, restart and stop.
// ABOUTME: One command shape; the verb picks the libpod call and the --all filter.

use crate::args::UsageError;
use crate::commands::{Action, Batch, Context, fail};
use crate::resolve::{Pods, Targets, resolve};
use crate::runtime::{Pod, PodError, PodStatus};
use crate::types::PodId;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodVerb {
    Pause,
    Unpause,
    Restart,
    Stop,
}

impl PodVerb {
    /// Which pods `--all` selects.
    fn selects(self, pod: &Pod) -> bool {
        match self {
            PodVerb::Pause | PodVerb::Stop => pod.running(),
            PodVerb::Unpause => pod.paused(),
            PodVerb::Restart => !matches!(pod.status, PodStatus::Unknown),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct PodLifecycleArgs {
    /// Act on all pods
    #[arg(short, long)]
    pub all: bool,

    /// Pods to act on
    pub pods: Vec<String>,
}

#[derive(Debug)]
pub struct PodLifecycle {
    verb: PodVerb,
    targets: Targets,
}

impl PodLifecycle {
    pub fn new(verb: PodVerb, args: PodLifecycleArgs) -> Result<Self, UsageError> {
        Ok(Self {
            verb,
            targets: Targets::exclusive(args.all, args.pods, "pod")?,
        })
    }

    async fn apply(&self, ctx: &Context<'_>, id: &PodId) -> Result<(), PodError> {
        match self.verb {
            PodVerb::Pause => ctx.runtime.pause_pod(id).await,
            PodVerb::Unpause => ctx.runtime.unpause_pod(id).await,
            PodVerb::Restart => ctx.runtime.restart_pod(id).await,
            PodVerb::Stop => ctx.runtime.stop_pod(id).await,
        }
    }
}

#[async_trait]
impl Action for PodLifecycle {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let mut resolved = match resolve(&Pods(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };
        if self.targets.is_all() {
            resolved.retain(|pod| self.verb.selects(pod));
        }

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        for found in &resolved.found {
            tracing::debug!(pod = %found.ident, verb = ?self.verb, "pod lifecycle");
            match self.apply(ctx, &found.entity.id).await {
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
