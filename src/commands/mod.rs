// ABOUTME: One module per verb, plus the contract every command follows.
// ABOUTME: Construction validates flags; run talks to the engine and returns an exit code.

mod attach;
mod commit;
mod create;
mod export;
mod info;
mod inspect;
mod kill;
mod logs;
mod mount;
mod pause;
pub mod pod;
mod pull;
mod push;
mod restart;
mod rm;
mod rmi;
mod run;
mod start;
mod stop;
mod top;
mod unpause;

pub use attach::{Attach, AttachArgs};
pub use commit::{Commit, CommitArgs};
pub use create::{Create, CreateArgs, CreateOptions};
pub use export::{Export, ExportArgs};
pub use info::{Info, InfoArgs};
pub use inspect::{Inspect, InspectArgs};
pub use kill::{Kill, KillArgs};
pub use logs::{Logs, LogsArgs};
pub use mount::{Mount, MountArgs};
pub use pause::{Pause, PauseArgs};
pub use pull::{Pull, PullArgs};
pub use push::{Push, PushArgs};
pub use restart::{Restart, RestartArgs};
pub use rm::{Rm, RmArgs};
pub use rmi::{Rmi, RmiArgs};
pub use run::{Run, RunArgs};
pub use start::{Start, StartArgs};
pub use stop::{Stop, StopArgs};
pub use top::{Top, TopArgs};
pub use unpause::{Unpause, UnpauseArgs};

use crate::args::DetachKey;
use crate::output::Output;
use crate::resolve::Resolved;
use crate::runtime::{AttachIo, ContainerError, Fault, FaultKind, FullRuntime};
use crate::session::{self, DISCONNECT_NOTICE, InterruptPolicy, SessionEnd};
use crate::types::ContainerId;
use async_trait::async_trait;
use std::fmt::Display;
use std::ops::ControlFlow;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Bad flags or flag combinations. Matches clap's own status.
pub const EXIT_USAGE: i32 = 2;

/// What a running command may use.
pub struct Context<'a> {
    pub runtime: &'a dyn FullRuntime,
    pub out: &'a Output,
    /// Detach key used when a command is not given `--detach-keys`.
    pub detach_key: DetachKey,
    terminal_input: bool,
}

impl<'a> Context<'a> {
    pub fn new(runtime: &'a dyn FullRuntime, out: &'a Output) -> Self {
        Self {
            runtime,
            out,
            detach_key: DetachKey::default(),
            terminal_input: true,
        }
    }

    pub fn with_detach_key(mut self, key: DetachKey) -> Self {
        self.detach_key = key;
        self
    }

    /// Never read the local stdin, even for interactive sessions.
    pub fn without_terminal_input(mut self) -> Self {
        self.terminal_input = false;
        self
    }

    fn stdin(&self, wanted: bool) -> Option<tokio::io::Stdin> {
        (wanted && self.terminal_input).then(tokio::io::stdin)
    }
}

/// How an attached session is driven from the terminal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionOptions {
    pub stdin: bool,
    pub sig_proxy: bool,
    pub detach_key: DetachKey,
}

/// Copy an attached container session to the terminal until it ends.
///
/// Prints the disconnect notice when the container was left running.
pub(crate) async fn drive_session(
    ctx: &Context<'_>,
    io: AttachIo,
    id: &ContainerId,
    opts: SessionOptions,
) -> Result<SessionEnd, ContainerError> {
    let policy = if opts.sig_proxy {
        InterruptPolicy::Forward {
            runtime: ctx.runtime,
            id,
        }
    } else {
        InterruptPolicy::Disconnect
    };

    let mut stdout = ctx.out.stream();
    let end = session::pump(
        io,
        ctx.stdin(opts.stdin),
        &mut stdout,
        opts.detach_key,
        session::ctrl_c(),
        policy,
    )
    .await?;

    tracing::debug!(container = %id, ?end, "session ended");
    if end.left_running() {
        ctx.out.notice(DISCONNECT_NOTICE);
    }
    Ok(end)
}

/// A constructed command, ready to run.
///
/// Commands are built from their parsed arguments first, so flag conflicts
/// are rejected before any connection is made.
#[async_trait]
pub trait Action: Send + Sync {
    /// Run against the engine and return the process exit status.
    async fn run(&self, ctx: &Context<'_>) -> i32;
}

/// `"no such pod"` becomes `"No such pod."`.
pub fn format_reason(reason: &str) -> String {
    let reason = reason.trim();
    let mut chars = reason.chars();
    let Some(first) = chars.next() else {
        return "Unknown error.".to_string();
    };

    let mut formatted: String = first.to_uppercase().chain(chars).collect();
    if !formatted.ends_with(['.', '!', '?']) {
        formatted.push('.');
    }
    formatted
}

/// Report an error that ends the command.
pub(crate) fn fail(out: &Output, err: &impl Display) -> i32 {
    out.error(&format_reason(&err.to_string()));
    EXIT_FAILURE
}

/// Accumulates per-entity outcomes of a multi-target command.
///
/// Not-found failures are reported and skipped. Any other failure is
/// reported and stops the batch. Either makes the exit status 1.
pub(crate) struct Batch<'a> {
    out: &'a Output,
    failed: bool,
}

impl<'a> Batch<'a> {
    pub fn new(out: &'a Output) -> Self {
        Self { out, failed: false }
    }

    /// Report the not-found identifiers met while resolving.
    pub fn report_missing<E, F: Fault>(&mut self, resolved: &Resolved<E, F>) {
        for err in &resolved.missing {
            self.out.error(&format_reason(&err.to_string()));
            self.failed = true;
        }
    }

    /// One entity was handled.
    pub fn done(&self, ident: &str) {
        self.out.item(ident);
    }

    /// One entity failed. Breaks unless the failure was a not-found.
    pub fn failed<E: Fault>(&mut self, err: &E) -> ControlFlow<()> {
        self.out.error(&format_reason(&err.to_string()));
        self.failed = true;
        match err.kind() {
            FaultKind::NotFound => ControlFlow::Continue(()),
            FaultKind::Remote | FaultKind::Connection => ControlFlow::Break(()),
        }
    }

    /// Record a failure that is not an engine error.
    pub fn refuse(&mut self, message: &str) {
        self.out.error(&format_reason(message));
        self.failed = true;
    }

    pub fn status(&self) -> i32 {
        if self.failed { EXIT_FAILURE } else { EXIT_OK }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputMode;
    use crate::runtime::{ContainerError, PodError};

    #[test]
    fn reason_is_capitalized_and_terminated() {
        assert_eq!(format_reason("no such pod"), "No such pod.");
        assert_eq!(format_reason("Already done."), "Already done.");
        assert_eq!(format_reason("  what?  "), "What?");
        assert_eq!(format_reason(""), "Unknown error.");
    }

    #[test]
    fn reason_keeps_the_rest_of_the_text() {
        assert_eq!(
            format_reason("container ABC is not running"),
            "Container ABC is not running."
        );
    }

    #[test]
    fn batch_continues_past_not_found_only() {
        let (out, captured) = Output::capture(OutputMode::Text);
        let mut batch = Batch::new(&out);

        let flow = batch.failed(&ContainerError::NotFound("a".into()));
        assert_eq!(flow, ControlFlow::Continue(()));

        let flow = batch.failed(&PodError::Runtime("pod is paused".into()));
        assert_eq!(flow, ControlFlow::Break(()));

        assert_eq!(batch.status(), EXIT_FAILURE);
        assert_eq!(
            captured.stderr(),
            "Container \"a\" not found.\nPod is paused.\n"
        );
    }

    #[test]
    fn clean_batch_exits_zero() {
        let (out, captured) = Output::capture(OutputMode::Text);
        let batch = Batch::new(&out);
        batch.done("abc");
        assert_eq!(batch.status(), EXIT_OK);
        assert_eq!(captured.stdout(), "abc\n");
    }
}
