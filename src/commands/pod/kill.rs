// ABOUTME: pod kill: signal every container of the given pods.

use crate::args::{InputAction, Signal, SignalAction, UsageError, help_for};
use crate::commands::{Action, Batch, Context, fail};
use crate::resolve::{Pods, Targets, resolve};
use crate::runtime::Pod;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct PodKillArgs {
    /// Send signal to all running pods
    #[arg(short, long)]
    pub all: bool,

    #[arg(
        short,
        long,
        default_value = "KILL",
        value_name = SignalAction::METAVAR,
        help = help_for::<SignalAction>("Signal to send to the pod.")
    )]
    pub signal: Signal,

    /// Pods to signal
    pub pods: Vec<String>,
}

#[derive(Debug)]
pub struct PodKill {
    targets: Targets,
    signal: Signal,
}

impl PodKill {
    pub fn new(args: PodKillArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::exclusive(args.all, args.pods, "pod")?,
            signal: args.signal,
        })
    }
}

#[async_trait]
impl Action for PodKill {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let mut resolved = match resolve(&Pods(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };
        if self.targets.is_all() {
            resolved.retain(Pod::running);
        }

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        for found in &resolved.found {
            tracing::debug!(pod = %found.ident, signal = %self.signal, "kill");
            match ctx.runtime.kill_pod(&found.entity.id, self.signal).await {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Output, OutputMode};
    use crate::runtime::PodStatus;
    use crate::runtime::fake::FakeRuntime;

    #[tokio::test]
    async fn all_signals_running_pods() {
        let rt = FakeRuntime::new()
            .with_pod("a", PodStatus::Running)
            .with_pod("b", PodStatus::Exited)
            .with_pod("c", PodStatus::Degraded);
        let (out, captured) = Output::capture(OutputMode::Text);
        let kill = PodKill::new(PodKillArgs {
            all: true,
            signal: Signal::TERM,
            pods: vec![],
        })
        .unwrap();

        assert_eq!(kill.run(&Context::new(&rt, &out)).await, 0);
        assert_eq!(captured.stdout(), "a\nc\n");
        assert_eq!(rt.calls_to("kill_pod"), ["a", "c"]);
    }

    #[test]
    fn requires_pods_or_all() {
        let err = PodKill::new(PodKillArgs {
            all: false,
            signal: Signal::KILL,
            pods: vec![],
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "You must give pod(s) or use --all");
    }
}
