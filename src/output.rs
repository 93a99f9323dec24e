// ABOUTME: Terminal output for command results and diagnostics.
// ABOUTME: Text or JSON-lines mode; sinks can be captured for tests.

use parking_lot::Mutex;
use serde::Serialize;
use std::io::{self, Write};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;

/// Output mode selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Plain lines and aligned tables
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Clone)]
enum Sink {
    Stdout,
    Stderr,
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl Sink {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            Sink::Stderr => io::stderr().lock().write_all(bytes),
            Sink::Buffer(buf) => {
                buf.lock().extend_from_slice(bytes);
                Ok(())
            }
        }
    }

    fn line(&self, line: &str) {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        if let Err(e) = self.write_all(&bytes) {
            tracing::debug!("dropped output line: {e}");
        }
    }
}

/// Handles command output based on the configured mode.
///
/// Results go to stdout, errors to stderr. Logging never goes through here.
#[derive(Clone)]
pub struct Output {
    mode: OutputMode,
    stdout: Sink,
    stderr: Sink,
}

/// Buffers behind an [`Output`] created with [`Output::capture`].
#[derive(Clone)]
pub struct Captured {
    stdout: Arc<Mutex<Vec<u8>>>,
    stderr: Arc<Mutex<Vec<u8>>>,
}

impl Captured {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.stdout.lock()).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.stderr.lock()).into_owned()
    }
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            stdout: Sink::Stdout,
            stderr: Sink::Stderr,
        }
    }

    /// An output whose streams are kept in memory.
    pub fn capture(mode: OutputMode) -> (Self, Captured) {
        let captured = Captured {
            stdout: Arc::default(),
            stderr: Arc::default(),
        };
        let output = Self {
            mode,
            stdout: Sink::Buffer(Arc::clone(&captured.stdout)),
            stderr: Sink::Buffer(Arc::clone(&captured.stderr)),
        };
        (output, captured)
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Print one result, usually the identifier a command acted upon.
    pub fn item(&self, value: &str) {
        match self.mode {
            OutputMode::Text => self.stdout.line(value),
            OutputMode::Json => self.stdout.line(&event("item", value)),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Text => self.stderr.line(message),
            OutputMode::Json => self.stderr.line(&event("error", message)),
        }
    }

    /// Print an informational line that is not a command result.
    pub fn notice(&self, message: &str) {
        match self.mode {
            OutputMode::Text => self.stdout.line(message),
            OutputMode::Json => self.stdout.line(&event("notice", message.trim())),
        }
    }

    /// Print a structured document: pretty JSON in text mode, one line in JSON mode.
    pub fn document<T: Serialize>(&self, value: &T) {
        let rendered = match self.mode {
            OutputMode::Text => serde_json::to_string_pretty(value),
            OutputMode::Json => serde_json::to_string(value),
        };
        match rendered {
            Ok(text) => self.stdout.line(&text),
            Err(e) => self.error(&format!("cannot render document: {e}")),
        }
    }

    /// Print a pre-rendered block of text as is.
    pub fn block(&self, text: &str) {
        self.stdout.line(text.trim_end_matches('\n'));
    }

    /// Print a table: aligned columns in text mode, one object per row in JSON mode.
    pub fn table(&self, table: &Table) {
        match self.mode {
            OutputMode::Text => {
                for line in table.render() {
                    self.stdout.line(&line);
                }
            }
            OutputMode::Json => {
                for row in &table.rows {
                    let object: serde_json::Map<String, serde_json::Value> = table
                        .headers
                        .iter()
                        .zip(row)
                        .map(|(h, v)| (h.clone(), serde_json::Value::String(v.clone())))
                        .collect();
                    match serde_json::to_string(&object) {
                        Ok(text) => self.stdout.line(&text),
                        Err(e) => self.error(&format!("cannot render row: {e}")),
                    }
                }
            }
        }
    }

    /// Copy raw bytes to stdout. Fails on a closed pipe.
    pub fn raw(&self, bytes: &[u8]) -> io::Result<()> {
        self.stdout.write_all(bytes)
    }

    /// Stdout as an async writer, for copying an attached session.
    pub fn stream(&self) -> RawStream {
        RawStream(self.stdout.clone())
    }
}

/// Unformatted stdout. Writes complete before `poll_write` returns.
pub struct RawStream(Sink);

impl AsyncWrite for RawStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(self.0.write_all(buf).map(|()| buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
}

fn event(kind: &str, message: &str) -> String {
    serde_json::to_string(&JsonEvent {
        event: kind,
        message,
    })
    .unwrap_or_else(|_| message.to_string())
}

/// A simple report: header row plus string cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn render(&self) -> Vec<String> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(cell.chars().count()),
                    None => widths.push(cell.chars().count()),
                }
            }
        }

        std::iter::once(&self.headers)
            .chain(&self.rows)
            .map(|row| {
                let last = row.len().saturating_sub(1);
                let mut line = String::new();
                for (i, cell) in row.iter().enumerate() {
                    line.push_str(cell);
                    if i < last {
                        let pad = widths[i] - cell.chars().count() + 2;
                        line.extend(std::iter::repeat_n(' ', pad));
                    }
                }
                line
            })
            .collect()
    }
}
