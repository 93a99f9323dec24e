// ABOUTME: attach: connect the terminal to a running container.
// ABOUTME: The detach key or an interrupt leaves the container running.

use super::{Action, Context, EXIT_FAILURE, EXIT_OK, SessionOptions, drive_session, fail};
use crate::args::{DetachKey, DetachKeyAction, InputAction, UsageError, help_for};
use crate::runtime::AttachOptions;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct AttachArgs {
    #[arg(
        long,
        value_name = DetachKeyAction::METAVAR,
        help = help_for::<DetachKeyAction>("Key for detaching from the container.")
    )]
    pub detach_keys: Option<DetachKey>,

    /// Attach stdin (default)
    #[arg(long, overrides_with = "no_stdin")]
    pub stdin: bool,

    /// Do not attach stdin
    #[arg(long, overrides_with = "stdin")]
    pub no_stdin: bool,

    /// Forward interrupts to the container instead of disconnecting
    #[arg(long)]
    pub sig_proxy: bool,

    /// Container to attach to
    pub container: String,
}

#[derive(Debug)]
pub struct Attach {
    container: String,
    stdin: bool,
    detach_key: Option<DetachKey>,
    sig_proxy: bool,
}

impl Attach {
    pub fn new(args: AttachArgs) -> Result<Self, UsageError> {
        Ok(Self {
            container: args.container,
            stdin: !args.no_stdin,
            detach_key: args.detach_keys,
            sig_proxy: args.sig_proxy,
        })
    }
}

#[async_trait]
impl Action for Attach {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let container = match ctx.runtime.get_container(&self.container).await {
            Ok(container) => container,
            Err(e) => return fail(ctx.out, &e),
        };
        if !container.running() {
            ctx.out.error("You can only attach to running containers.");
            return EXIT_FAILURE;
        }

        let session = SessionOptions {
            stdin: self.stdin,
            sig_proxy: self.sig_proxy,
            detach_key: self.detach_key.unwrap_or(ctx.detach_key),
        };
        let attach = AttachOptions {
            stdin: session.stdin,
            detach_key: session.detach_key,
        };
        let io = match ctx.runtime.attach_container(&container.id, &attach).await {
            Ok(io) => io,
            Err(e) => return fail(ctx.out, &e),
        };

        match drive_session(ctx, io, &container.id, session).await {
            Ok(_) => EXIT_OK,
            Err(e) => fail(ctx.out, &e),
        }
    }
}
