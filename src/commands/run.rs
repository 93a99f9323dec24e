// ABOUTME: run: pull an image, create a container from it and start it.
// ABOUTME: Attaches the terminal unless --detach; --rm removes the container afterwards.

use super::create::CreateOptions;
use super::{Action, Context, EXIT_OK, SessionOptions, drive_session, fail};
use crate::args::UsageError;
use crate::runtime::AttachOptions;
use crate::types::{ContainerId, ImageRef};
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub options: CreateOptions,

    /// Run in the background and print the container id
    #[arg(short, long)]
    pub detach: bool,

    /// Remove the container when it exits
    #[arg(long)]
    pub rm: bool,

    /// Forward interrupts to the container instead of disconnecting
    #[arg(long)]
    pub sig_proxy: bool,

    /// Image to run
    pub image: ImageRef,

    /// Command and arguments to run in the container
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Debug)]
pub struct Run {
    options: CreateOptions,
    image: ImageRef,
    command: Vec<String>,
    detach: bool,
    remove: bool,
    sig_proxy: bool,
}

impl Run {
    pub fn new(args: RunArgs) -> Result<Self, UsageError> {
        if args.detach && args.rm {
            return Err(UsageError::incompatible("--detach", "--rm"));
        }
        Ok(Self {
            options: args.options,
            image: args.image,
            command: args.command,
            detach: args.detach,
            remove: args.rm,
            sig_proxy: args.sig_proxy,
        })
    }

    async fn attached(&self, ctx: &Context<'_>, id: &ContainerId) -> i32 {
        let session = SessionOptions {
            stdin: self.options.interactive,
            sig_proxy: self.sig_proxy,
            detach_key: self.options.detach_keys.unwrap_or(ctx.detach_key),
        };
        let attach = AttachOptions {
            stdin: session.stdin,
            detach_key: session.detach_key,
        };

        // Attach before starting so no early output is lost.
        let io = match ctx.runtime.attach_container(id, &attach).await {
            Ok(io) => io,
            Err(e) => return fail(ctx.out, &e),
        };
        let mut code = match ctx.runtime.start_container(id).await {
            Ok(()) => {
                tracing::debug!(container = %id, "started container");
                match drive_session(ctx, io, id, session).await {
                    Ok(_) => EXIT_OK,
                    Err(e) => fail(ctx.out, &e),
                }
            }
            Err(e) => fail(ctx.out, &e),
        };

        if self.remove {
            match ctx.runtime.remove_container(id, true).await {
                Ok(()) => tracing::debug!(container = %id, "removed container"),
                Err(e) => code = fail(ctx.out, &e),
            }
        }
        code
    }
}

#[async_trait]
impl Action for Run {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        if let Err(e) = ctx.runtime.pull_image(&self.image).await {
            return fail(ctx.out, &e);
        }
        tracing::debug!(image = %self.image, "pulled image");

        let image = match ctx.runtime.get_image(&self.image.to_string()).await {
            Ok(image) => image,
            Err(e) => return fail(ctx.out, &e),
        };

        let config =
            self.options
                .container_config(self.image.clone(), self.command.clone(), ctx.detach_key);
        let id = match ctx.runtime.create_container(&config).await {
            Ok(id) => id,
            Err(e) => return fail(ctx.out, &e),
        };
        tracing::debug!(container = %id, image = %image.id, "created container");

        if !self.detach {
            return self.attached(ctx, &id).await;
        }

        match ctx.runtime.start_container(&id).await {
            Ok(()) => {
                tracing::debug!(container = %id, "started container");
                ctx.out.item(id.as_str());
                EXIT_OK
            }
            Err(e) => fail(ctx.out, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Output, OutputMode};
    use crate::runtime::{ContainerError, ContainerState, ImageError};
    use crate::runtime::fake::FakeRuntime;

    fn run(args: impl FnOnce(&mut RunArgs)) -> Run {
        let mut base = RunArgs {
            options: CreateOptions::default(),
            detach: false,
            rm: false,
            sig_proxy: false,
            image: "alpine".parse().unwrap(),
            command: vec!["echo".into(), "hi".into()],
        };
        args(&mut base);
        Run::new(base).unwrap()
    }

    #[test]
    fn detach_and_rm_conflict() {
        let err = Run::new(RunArgs {
            options: CreateOptions::default(),
            detach: true,
            rm: true,
            sig_proxy: false,
            image: "alpine".parse().unwrap(),
            command: vec![],
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Incompatible options: --detach and --rm");
    }

    #[tokio::test]
    async fn detached_prints_id_after_start() {
        let rt = FakeRuntime::new();
        let (out, captured) = Output::capture(OutputMode::Text);

        let code = run(|a| a.detach = true)
            .run(&Context::new(&rt, &out).without_terminal_input())
            .await;

        assert_eq!(code, 0);
        assert_eq!(captured.stdout(), "ctr1\n");
        assert_eq!(
            rt.calls(),
            [
                "pull:alpine:latest",
                "get_image:alpine:latest",
                "create:alpine:latest",
                "start:ctr1",
            ]
        );
        assert_eq!(rt.container_state("ctr1"), Some(ContainerState::Running));
    }

    #[tokio::test]
    async fn attached_run_attaches_before_start_and_removes() {
        let rt = FakeRuntime::new();
        let (out, captured) = Output::capture(OutputMode::Text);

        let code = run(|a| a.rm = true)
            .run(&Context::new(&rt, &out).without_terminal_input())
            .await;

        assert_eq!(code, 0);
        assert_eq!(
            rt.calls()[3..].to_vec(),
            ["attach:ctr1", "start:ctr1", "remove:ctr1"]
        );
        assert!(!rt.has_container("ctr1"));
        // The session closed on its own, so no disconnect notice.
        assert_eq!(captured.stdout(), "");
    }

    #[tokio::test]
    async fn missing_image_stops_the_pipeline() {
        let rt = FakeRuntime::new()
            .failing("pull:nosuch:latest", ImageError::NotFound("nosuch:latest".into()));
        let (out, captured) = Output::capture(OutputMode::Text);

        let code = run(|a| a.image = "nosuch".parse().unwrap())
            .run(&Context::new(&rt, &out).without_terminal_input())
            .await;

        assert_eq!(code, 1);
        assert_eq!(captured.stderr(), "Image \"nosuch:latest\" not found.\n");
        assert!(rt.created().is_empty());
    }

    #[tokio::test]
    async fn failed_start_still_removes_with_rm() {
        let rt = FakeRuntime::new().failing(
            "start:ctr1",
            ContainerError::Runtime("executable file not found in $PATH".into()),
        );
        let (out, captured) = Output::capture(OutputMode::Text);

        let code = run(|a| a.rm = true)
            .run(&Context::new(&rt, &out).without_terminal_input())
            .await;

        assert_eq!(code, 1);
        assert_eq!(captured.stderr(), "Executable file not found in $PATH.\n");
        assert!(!rt.has_container("ctr1"));
    }
}
