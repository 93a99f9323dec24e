// ABOUTME: Pumps an attached container session between engine and terminal.
// ABOUTME: Ends on stream close, detach key, broken pipe or interrupt.

use crate::args::{DetachKey, Signal};
use crate::runtime::{AttachIo, ContainerError, FullRuntime};
use crate::types::ContainerId;
use futures::{Stream, StreamExt};
use std::io;
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Printed when the terminal lets go of a session that is still running.
pub const DISCONNECT_NOTICE: &str = "\nContainer disconnected.";

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The container closed its output.
    Closed,
    /// The detach key was typed.
    Detached,
    /// The terminal went away or was interrupted.
    Disconnected,
}

impl SessionEnd {
    /// Whether the user left a container that may still be running.
    pub fn left_running(self) -> bool {
        !matches!(self, SessionEnd::Closed)
    }
}

/// What an interrupt from the terminal does.
#[derive(Clone, Copy)]
pub enum InterruptPolicy<'a> {
    /// End the session.
    Disconnect,
    /// Send SIGINT to the container and keep going.
    Forward {
        runtime: &'a dyn FullRuntime,
        id: &'a ContainerId,
    },
}

/// Interrupts from the controlling terminal.
pub fn ctrl_c() -> Pin<Box<dyn Stream<Item = ()> + Send>> {
    Box::pin(futures::stream::unfold((), |()| async {
        tokio::signal::ctrl_c().await.ok().map(|()| ((), ()))
    }))
}

/// Copy container output to `stdout` and `stdin` to the container until
/// something ends the session.
///
/// Bytes typed before the detach key on the same read are still forwarded.
/// A failed read of `stdin` just stops forwarding input.
pub async fn pump<I, O, S>(
    io: AttachIo,
    mut stdin: Option<I>,
    stdout: &mut O,
    detach: DetachKey,
    mut interrupts: S,
    policy: InterruptPolicy<'_>,
) -> Result<SessionEnd, ContainerError>
where
    I: AsyncRead + Unpin,
    O: AsyncWrite + Unpin,
    S: Stream<Item = ()> + Unpin,
{
    let AttachIo {
        mut output,
        mut input,
    } = io;
    let mut buf = [0u8; 1024];

    loop {
        tokio::select! {
            biased;

            Some(()) = interrupts.next() => match policy {
                InterruptPolicy::Disconnect => return Ok(SessionEnd::Disconnected),
                InterruptPolicy::Forward { runtime, id } => {
                    tracing::debug!(container = %id, "forwarding SIGINT");
                    if let Err(e) = runtime.kill_container(id, Signal::INT).await {
                        tracing::warn!("cannot forward interrupt: {e}");
                    }
                }
            },

            read = read_some(&mut stdin, &mut buf) => match read {
                Ok(0) | Err(_) => {
                    stdin = None;
                    if let Err(e) = input.shutdown().await {
                        tracing::debug!("closing container stdin: {e}");
                    }
                }
                Ok(n) => {
                    let chunk = &buf[..n];
                    let key = chunk.iter().position(|b| *b == detach.byte());
                    let forward = key.map_or(chunk, |pos| &chunk[..pos]);
                    if !forward.is_empty()
                        && let Err(e) = send(&mut input, forward).await
                    {
                        tracing::debug!("container stdin closed: {e}");
                        stdin = None;
                    }
                    if key.is_some() {
                        return Ok(SessionEnd::Detached);
                    }
                }
            },

            chunk = output.next() => match chunk {
                Some(Ok(bytes)) => {
                    if let Err(e) = send(stdout, &bytes).await {
                        if e.kind() == io::ErrorKind::BrokenPipe {
                            return Ok(SessionEnd::Disconnected);
                        }
                        return Err(ContainerError::Io {
                            path: "stdout".to_string(),
                            reason: e.to_string(),
                        });
                    }
                }
                Some(Err(e)) => return Err(e),
                None => return Ok(SessionEnd::Closed),
            },
        }
    }
}

async fn read_some<I: AsyncRead + Unpin>(
    stdin: &mut Option<I>,
    buf: &mut [u8],
) -> io::Result<usize> {
    match stdin {
        Some(reader) => reader.read(buf).await,
        None => std::future::pending().await,
    }
}

async fn send<W: AsyncWrite + Unpin + ?Sized>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    writer.write_all(bytes).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ContainerState;
    use crate::runtime::fake::FakeRuntime;
    use bytes::Bytes;
    use std::task::{Context, Poll};

    fn attach_io(
        chunks: Vec<&'static str>,
        input: impl AsyncWrite + Send + 'static,
    ) -> AttachIo {
        let items = chunks
            .into_iter()
            .map(|c| Ok::<Bytes, ContainerError>(Bytes::from_static(c.as_bytes())));
        AttachIo {
            output: Box::pin(futures::stream::iter(items)),
            input: Box::pin(input),
        }
    }

    fn silent_output(input: impl AsyncWrite + Send + 'static) -> AttachIo {
        AttachIo {
            output: Box::pin(futures::stream::pending::<Result<Bytes, ContainerError>>()),
            input: Box::pin(input),
        }
    }

    fn no_interrupts() -> futures::stream::Pending<()> {
        futures::stream::pending()
    }

    struct BrokenPipe;

    impl AsyncWrite for BrokenPipe {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn copies_output_until_closed() {
        let io = attach_io(vec!["hello ", "world\n"], tokio::io::sink());
        let mut stdout = Vec::new();

        let end = pump(
            io,
            None::<&[u8]>,
            &mut stdout,
            DetachKey::default(),
            no_interrupts(),
            InterruptPolicy::Disconnect,
        )
        .await
        .unwrap();

        assert_eq!(end, SessionEnd::Closed);
        assert_eq!(stdout, b"hello world\n");
    }

    #[tokio::test]
    async fn detach_key_forwards_prefix_and_stops() {
        let (container_side, mut peer) = tokio::io::duplex(64);
        let io = silent_output(container_side);
        let mut stdout = Vec::new();

        let end = pump(
            io,
            Some(&b"ls\x04exit\n"[..]),
            &mut stdout,
            DetachKey::default(),
            no_interrupts(),
            InterruptPolicy::Disconnect,
        )
        .await
        .unwrap();

        assert_eq!(end, SessionEnd::Detached);
        let mut forwarded = Vec::new();
        peer.read_to_end(&mut forwarded).await.unwrap();
        assert_eq!(forwarded, b"ls");
    }

    #[tokio::test]
    async fn interrupt_disconnects() {
        let io = silent_output(tokio::io::sink());
        let mut stdout = Vec::new();

        let end = pump(
            io,
            None::<&[u8]>,
            &mut stdout,
            DetachKey::default(),
            futures::stream::iter([()]),
            InterruptPolicy::Disconnect,
        )
        .await
        .unwrap();

        assert_eq!(end, SessionEnd::Disconnected);
        assert!(end.left_running());
    }

    #[tokio::test]
    async fn broken_pipe_is_a_disconnect() {
        let io = attach_io(vec!["data"], tokio::io::sink());

        let end = pump(
            io,
            None::<&[u8]>,
            &mut BrokenPipe,
            DetachKey::default(),
            no_interrupts(),
            InterruptPolicy::Disconnect,
        )
        .await
        .unwrap();

        assert_eq!(end, SessionEnd::Disconnected);
    }

    #[tokio::test]
    async fn forwarded_interrupt_signals_container() {
        let rt = FakeRuntime::new().with_container("web", ContainerState::Running);
        let id = ContainerId::new("web");
        let io = attach_io(vec!["bye\n"], tokio::io::sink());
        let mut stdout = Vec::new();

        let end = pump(
            io,
            None::<&[u8]>,
            &mut stdout,
            DetachKey::default(),
            futures::stream::iter([()]),
            InterruptPolicy::Forward {
                runtime: &rt,
                id: &id,
            },
        )
        .await
        .unwrap();

        assert_eq!(end, SessionEnd::Closed);
        assert_eq!(rt.calls_to("kill"), ["web"]);
    }

    #[tokio::test]
    async fn stdin_eof_keeps_output_flowing() {
        let io = attach_io(vec!["still here\n"], tokio::io::sink());
        let mut stdout = Vec::new();

        let end = pump(
            io,
            Some(&b""[..]),
            &mut stdout,
            DetachKey::default(),
            no_interrupts(),
            InterruptPolicy::Disconnect,
        )
        .await
        .unwrap();

        assert_eq!(end, SessionEnd::Closed);
        assert_eq!(stdout, b"still here\n");
    }
}
