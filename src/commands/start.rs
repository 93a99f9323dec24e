// ABOUTME: start: start stopped or created containers.
// ABOUTME: With --attach, each container's session runs in turn on the terminal.

use super::{Action, Batch, Context, SessionOptions, drive_session, fail};
use crate::args::{DetachKey, DetachKeyAction, InputAction, UsageError, help_for};
use crate::resolve::{Containers, Targets, resolve};
use crate::runtime::{AttachOptions, Container, ContainerError};
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct StartArgs {
    /// Attach the container's output and forward signals
    #[arg(short, long)]
    pub attach: bool,

    /// Attach the container's stdin
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(
        long,
        value_name = DetachKeyAction::METAVAR,
        help = help_for::<DetachKeyAction>("Key for detaching from the container.")
    )]
    pub detach_keys: Option<DetachKey>,

    /// Forward interrupts to the container instead of disconnecting
    #[arg(long)]
    pub sig_proxy: bool,

    /// Containers to start
    #[arg(required = true)]
    pub containers: Vec<String>,
}

#[derive(Debug)]
pub struct Start {
    targets: Targets,
    attach: bool,
    interactive: bool,
    detach_key: Option<DetachKey>,
    sig_proxy: bool,
}

impl Start {
    pub fn new(args: StartArgs) -> Result<Self, UsageError> {
        Ok(Self {
            targets: Targets::named(args.containers, "container")?,
            attach: args.attach,
            interactive: args.interactive,
            detach_key: args.detach_keys,
            sig_proxy: args.sig_proxy,
        })
    }

    /// Start one container, attaching first when asked to.
    async fn start_one(
        &self,
        ctx: &Context<'_>,
        container: &Container,
    ) -> Result<(), ContainerError> {
        if !self.attach {
            return ctx.runtime.start_container(&container.id).await;
        }

        let session = SessionOptions {
            stdin: self.interactive,
            sig_proxy: self.sig_proxy,
            detach_key: self.detach_key.unwrap_or(ctx.detach_key),
        };
        let attach = AttachOptions {
            stdin: session.stdin,
            detach_key: session.detach_key,
        };
        let io = ctx.runtime.attach_container(&container.id, &attach).await?;
        ctx.runtime.start_container(&container.id).await?;
        drive_session(ctx, io, &container.id, session).await?;
        Ok(())
    }
}

#[async_trait]
impl Action for Start {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let resolved = match resolve(&Containers(ctx.runtime), &self.targets).await {
            Ok(resolved) => resolved,
            Err(e) => return fail(ctx.out, &e),
        };

        let mut batch = Batch::new(ctx.out);
        batch.report_missing(&resolved);

        for found in &resolved.found {
            if self.attach && !found.entity.state.startable() {
                batch.refuse(&format!(
                    "container {} is {}, only created or exited containers can be attached",
                    found.ident, found.entity.state
                ));
                continue;
            }
            match self.start_one(ctx, &found.entity).await {
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
