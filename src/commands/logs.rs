// ABOUTME: logs: print what a container wrote to its output streams.
// ABOUTME: With --tail, only the last N lines are kept and printed at the end.

use super::{Action, Context, EXIT_OK, fail};
use crate::args::{PositiveInt, PositiveIntAction, UsageError, help_for};
use crate::runtime::{ContainerError, LogOptions, LogStream};
use async_trait::async_trait;
use clap::Args;
use futures::StreamExt;
use std::collections::VecDeque;
use std::io;

#[derive(Debug, Clone, Args)]
pub struct LogsArgs {
    #[arg(
        long,
        value_name = "LINES",
        help = help_for::<PositiveIntAction>(
            "Output the specified number of LINES at the end of the logs."
        )
    )]
    pub tail: Option<PositiveInt>,

    /// Keep printing new output until the container stops
    #[arg(short, long)]
    pub follow: bool,

    /// Prefix each line with its timestamp
    #[arg(short, long)]
    pub timestamps: bool,

    /// Container to read
    pub container: String,
}

#[derive(Debug)]
pub struct Logs {
    container: String,
    tail: Option<usize>,
    options: LogOptions,
}

impl Logs {
    pub fn new(args: LogsArgs) -> Result<Self, UsageError> {
        let tail = match args.tail {
            Some(n) => Some(
                usize::try_from(n.get())
                    .map_err(|_| UsageError::NotPositive(n.to_string()))?,
            ),
            None => None,
        };
        Ok(Self {
            container: args.container,
            tail,
            options: LogOptions {
                follow: args.follow,
                timestamps: args.timestamps,
                ..LogOptions::history()
            },
        })
    }
}

#[async_trait]
impl Action for Logs {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let container = match ctx.runtime.get_container(&self.container).await {
            Ok(container) => container,
            Err(e) => return fail(ctx.out, &e),
        };
        let stream = match ctx.runtime.container_logs(&container.id, &self.options).await {
            Ok(stream) => stream,
            Err(e) => return fail(ctx.out, &e),
        };

        let written = match self.tail {
            Some(n) => match last_lines(stream, n).await {
                Ok(lines) => lines.iter().try_for_each(|line| ctx.out.raw(line)),
                Err(e) => return fail(ctx.out, &e),
            },
            None => match copy(stream, |chunk| ctx.out.raw(chunk)).await {
                Ok(written) => written,
                Err(e) => return fail(ctx.out, &e),
            },
        };

        match written {
            Ok(()) => EXIT_OK,
            // The reader went away, e.g. `logs web | head`.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => EXIT_OK,
            Err(e) => fail(ctx.out, &e),
        }
    }
}

/// Stream chunks to `write` as they arrive. The outer error is the engine's,
/// the inner one the local writer's.
async fn copy(
    mut stream: LogStream,
    mut write: impl FnMut(&[u8]) -> io::Result<()>,
) -> Result<io::Result<()>, ContainerError> {
    while let Some(chunk) = stream.next().await {
        if let Err(e) = write(&chunk?) {
            return Ok(Err(e));
        }
    }
    Ok(Ok(()))
}

/// Drain the stream, keeping the last `n` lines with their newlines.
/// Trailing output without a newline counts as a line.
async fn last_lines(mut stream: LogStream, n: usize) -> Result<VecDeque<Vec<u8>>, ContainerError> {
    let mut lines = VecDeque::with_capacity(n + 1);
    let mut partial = Vec::new();

    let keep = |line: Vec<u8>, lines: &mut VecDeque<Vec<u8>>| {
        lines.push_back(line);
        if lines.len() > n {
            lines.pop_front();
        }
    };

    while let Some(chunk) = stream.next().await {
        partial.extend_from_slice(&chunk?);
        while let Some(pos) = partial.iter().position(|b| *b == b'\n') {
            let rest = partial.split_off(pos + 1);
            keep(std::mem::replace(&mut partial, rest), &mut lines);
        }
    }
    if !partial.is_empty() {
        keep(partial, &mut lines);
    }
    Ok(lines)
}
