// ABOUTME: kill: send a signal to running containers.
// ABOUTME: Targets are explicit containers or --all; stopped ones are skipped.

use super::{Action, Batch, Context, fail};
use crate::args::{InputAction, Signal, SignalAction, UsageError, help_for};
use crate::resolve::{Containers, Targets, resolve};
use crate::runtime::Container;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct KillArgs {
    /// Send signal to all running containers
    #[arg(short, long)]
    pub all: bool,

    #[arg(
        short,
        long,
        default_value = "KILL",
        value_name = SignalAction::METAVAR,
        help = help_for::<SignalAction>("Signal to send to the container.")
    )]
    pub signal: Signal,

    /// Containers to signal
    pub containers: Vec<String>,
}

#[derive(Debug)]
pub struct Kill {
    targets: Targets,
    signal: Signal,
}

impl Kill {
    pub fn new(args: KillArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::exclusive(args.all, args.containers, "container")?,
            signal: args.signal,
        })
    }
}

#[async_trait]
impl Action for Kill {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let mut resolved = match resolve(&Containers(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };
        resolved.retain(Container::running);

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        for found in &resolved.found {
            tracing::debug!(container = %found.ident, signal = %self.signal, "kill");
            match ctx.runtime.kill_container(&found.entity.id, self.signal).await {
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
    use crate::runtime::ContainerState;
    use crate::runtime::ContainerError;
    use crate::runtime::fake::FakeRuntime;

    fn args(all: bool, containers: &[&str]) -> KillArgs {
        KillArgs {
            all,
            signal: Signal::KILL,
            containers: containers.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn all_and_names_conflict() {
        let err = Kill::new(args(true, &["a"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "You may give container(s) or use --all, but not both"
        );
    }

    #[test]
    fn needs_targets() {
        assert!(Kill::new(args(false, &[])).is_err());
    }

    #[tokio::test]
    async fn all_signals_only_running_containers() {
        let rt = FakeRuntime::new()
            .with_container("c1", ContainerState::Running)
            .with_container("c2", ContainerState::Exited)
            .with_container("c3", ContainerState::Running);
        let (out, captured) = Output::capture(OutputMode::Text);

        let code = Kill::new(args(true, &[]))
            .unwrap()
            .run(&Context::new(&rt, &out))
            .await;

        assert_eq!(code, 0);
        assert_eq!(rt.calls_to("kill"), ["c1", "c3"]);
        assert_eq!(captured.stdout(), "c1\nc3\n");
    }

    #[tokio::test]
    async fn missing_container_is_reported_and_skipped() {
        let rt = FakeRuntime::new()
            .with_container("a", ContainerState::Running)
            .with_container("b", ContainerState::Running);
        let (out, captured) = Output::capture(OutputMode::Text);

        let code = Kill::new(args(false, &["a", "missing", "b"]))
            .unwrap()
            .run(&Context::new(&rt, &out))
            .await;

        assert_eq!(code, 1);
        assert_eq!(rt.calls_to("kill"), ["a", "b"]);
        assert_eq!(captured.stdout(), "a\nb\n");
        assert_eq!(captured.stderr(), "Container \"missing\" not found.\n");
    }

    #[tokio::test]
    async fn remote_error_stops_the_batch() {
        let rt = FakeRuntime::new()
            .with_container("a", ContainerState::Running)
            .with_container("b", ContainerState::Running)
            .failing("kill:a", ContainerError::Runtime("permission denied".into()));
        let (out, captured) = Output::capture(OutputMode::Text);

        let code = Kill::new(args(false, &["a", "b"]))
            .unwrap()
            .run(&Context::new(&rt, &out))
            .await;

        assert_eq!(code, 1);
        assert_eq!(rt.calls_to("kill"), ["a"]);
        assert_eq!(captured.stderr(), "Permission denied.\n");
    }
}
