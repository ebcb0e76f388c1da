// src/exec/capture.rs

//! Incremental capture of a child's standard streams.
//!
//! Each stream is read on its own Tokio task and every `read` is forwarded
//! as a [`Chunk`] over an mpsc channel. The consumer owns the accumulation
//! buffers in [`Captured`]; chunks of one stream arrive in order, the two
//! streams may interleave.
//!
//! For the pipeline log, chunks are regrouped into lines by a
//! [`LineBuffer`]. A trailing partial line is flushed once the child has been
//! quiet for [`IDLE_FLUSH`], so progress text without a newline still shows
//! up while the child runs, while a secret written in one burst is never
//! split across two log lines.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How long a partial line may wait for the rest of its line.
pub const IDLE_FLUSH: Duration = Duration::from_millis(100);

const READ_BUF_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub stream: Stream,
    pub bytes: Vec<u8>,
}

/// Everything read so far from both streams, byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Captured {
    pub fn push(&mut self, chunk: &Chunk) {
        match chunk.stream {
            Stream::Stdout => self.stdout.extend_from_slice(&chunk.bytes),
            Stream::Stderr => self.stderr.extend_from_slice(&chunk.bytes),
        }
    }

    /// Stdout if anything was written there, stderr otherwise.
    pub fn log(&self) -> String {
        let bytes = if self.stdout.is_empty() {
            &self.stderr
        } else {
            &self.stdout
        };
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Regroups raw chunks of one stream into log lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Append `bytes` and return every line completed by them, newline
    /// stripped.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let Some(last_newline) = self.pending.iter().rposition(|b| *b == b'\n') else {
            return Vec::new();
        };
        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        complete[..complete.len() - 1]
            .split(|b| *b == b'\n')
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    /// Take the pending partial line, if any.
    pub fn flush(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let partial = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&partial).into_owned())
    }
}

/// Spawn a reader task forwarding every read of `reader` to `tx`.
pub fn spawn_reader<R>(reader: R, stream: Stream, tx: mpsc::Sender<Chunk>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = pump(reader, stream, tx).await {
            warn!(?stream, error = %e, "error reading child output");
        }
    })
}

async fn pump<R>(mut reader: R, stream: Stream, tx: mpsc::Sender<Chunk>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; READ_BUF_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        let chunk = Chunk {
            stream,
            bytes: buf[..n].to_vec(),
        };
        if tx.send(chunk).await.is_err() {
            debug!(?stream, "capture receiver dropped; stopping reader");
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(stream: Stream, text: &str) -> Chunk {
        Chunk {
            stream,
            bytes: text.as_bytes().to_vec(),
        }
    }

    #[test]
    fn stdout_preferred_over_stderr() {
        let mut c = Captured::default();
        c.push(&chunk(Stream::Stderr, "warn\n"));
        c.push(&chunk(Stream::Stdout, "OK\n"));
        assert_eq!(c.log(), "OK\n");
    }

    #[test]
    fn stderr_used_when_stdout_empty() {
        let mut c = Captured::default();
        c.push(&chunk(Stream::Stderr, "only stderr"));
        assert_eq!(c.log(), "only stderr");
    }

    #[test]
    fn multibyte_text_split_across_chunks_is_kept_intact() {
        let mut c = Captured::default();
        let bytes = "héllo".as_bytes();
        c.push(&Chunk { stream: Stream::Stdout, bytes: bytes[..2].to_vec() });
        c.push(&Chunk { stream: Stream::Stdout, bytes: bytes[2..].to_vec() });
        assert_eq!(c.log(), "héllo");
    }

    #[test]
    fn line_buffer_emits_complete_lines_and_keeps_partial() {
        let mut lines = LineBuffer::default();
        assert!(lines.feed(b"progress").is_empty());
        assert_eq!(lines.feed(b" 50%\nnext\nhal"), vec!["progress 50%", "next"]);
        assert_eq!(lines.feed(b"f\n"), vec!["half"]);
        assert_eq!(lines.flush(), None);
    }

    #[test]
    fn line_buffer_flushes_pending_partial_once() {
        let mut lines = LineBuffer::default();
        lines.feed(b"a\n\nb");
        assert_eq!(lines.flush().as_deref(), Some("b"));
        assert_eq!(lines.flush(), None);
    }

    #[test]
    fn blank_lines_are_kept() {
        let mut lines = LineBuffer::default();
        assert_eq!(lines.feed(b"a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[tokio::test]
    async fn reader_forwards_all_bytes_in_order() {
        let (tx, mut rx) = mpsc::channel(8);
        let data: &[u8] = b"one\ntwo\nthree";
        let handle = spawn_reader(data, Stream::Stdout, tx);

        let mut bytes = Vec::new();
        while let Some(c) = rx.recv().await {
            assert_eq!(c.stream, Stream::Stdout);
            bytes.extend(c.bytes);
        }
        handle.await.unwrap();

        assert_eq!(bytes, b"one\ntwo\nthree");
    }
}
