use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Context;
use bytes::{Bytes, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::oneshot;
use tokio::time::timeout;

use crate::files;
use crate::http::parser::{self, ParseError};
use crate::http::request::{Method, Request, Version};
use crate::http::response::{self, Status};
use crate::http::writer::ResponseWriter;
use crate::transfer::Transfer;
use crate::transfer::scheduler::SchedulerHandle;

/// Upper bound on a buffered request head.
const MAX_REQUEST_SIZE: usize = 2048;

/// Base keep-alive timeout the adaptive wait is computed from.
pub const BASE_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Drives one client connection through its lifecycle:
/// `Accepted → (Serving)+ → Closed`.
///
/// Each serving cycle reads one request, dispatches it, and then either
/// loops for the next request (persistent connection, bounded by an
/// adaptive keep-alive wait) or closes the socket. The write half is lent
/// to the transfer scheduler for GET bodies and reclaimed on completion,
/// so at most one request per connection is ever in flight.
pub struct Connection {
    reader: OwnedReadHalf,
    writer: Option<OwnedWriteHalf>,
    buffer: BytesMut,
    root: PathBuf,
    scheduler: SchedulerHandle,
    open_connections: Arc<AtomicUsize>,
    base_timeout: Duration,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        root: PathBuf,
        scheduler: SchedulerHandle,
        open_connections: Arc<AtomicUsize>,
        base_timeout: Duration,
    ) -> Self {
        open_connections.fetch_add(1, Ordering::Relaxed);
        let (reader, writer) = stream.into_split();
        Self {
            reader,
            writer: Some(writer),
            buffer: BytesMut::with_capacity(MAX_REQUEST_SIZE),
            root,
            scheduler,
            open_connections,
            base_timeout,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut first = true;

        loop {
            let raw = match self.read_request(first).await? {
                Some(raw) => raw,
                None => break,
            };
            first = false;

            if !self.serve(&raw).await? {
                break;
            }
        }

        Ok(())
    }

    /// Reads until a blank-line terminator is buffered.
    ///
    /// The first request of a connection is waited for indefinitely;
    /// subsequent waits carry the adaptive keep-alive timeout. Returns
    /// `None` when the connection should close (peer EOF or wait timeout).
    async fn read_request(&mut self, first: bool) -> anyhow::Result<Option<Bytes>> {
        loop {
            if let Some(end) = parser::find_request_end(&self.buffer) {
                return Ok(Some(self.buffer.split_to(end).freeze()));
            }

            if self.buffer.len() >= MAX_REQUEST_SIZE {
                anyhow::bail!("request head exceeds {} bytes", MAX_REQUEST_SIZE);
            }

            // The adaptive timeout covers the wait for the next request to
            // start arriving; once bytes are buffered, reads block freely.
            let n = if first || !self.buffer.is_empty() {
                self.reader.read_buf(&mut self.buffer).await?
            } else {
                match timeout(self.keepalive_timeout(), self.reader.read_buf(&mut self.buffer))
                    .await
                {
                    Ok(read) => read?,
                    Err(_) => {
                        tracing::debug!("Keep-alive wait timed out");
                        return Ok(None);
                    }
                }
            };

            if n == 0 {
                return Ok(None);
            }
        }
    }

    /// Serves one buffered request. Returns whether the connection persists.
    async fn serve(&mut self, raw: &[u8]) -> anyhow::Result<bool> {
        let request = match parser::parse_request(raw) {
            Ok(request) => request,
            Err(ParseError::NotImplemented { version }) => {
                tracing::info!(status = 501, "Unsupported method");
                let body = response::error_response(version, "", Status::NotImplemented);
                self.write_single_shot(body).await?;
                return Ok(version.persistent());
            }
            Err(_) => {
                // No trustworthy version on a malformed line, so the
                // connection closes after the error response.
                tracing::info!(status = 400, "Malformed request");
                let body = response::error_response(Version::HTTP_10, "", Status::BadRequest);
                self.write_single_shot(body).await?;
                return Ok(false);
            }
        };

        tracing::info!(
            method = ?request.method,
            target = %request.target,
            version = %request.version,
            "Handling request"
        );

        let persistent = request.persistent();

        if request.method == Method::OPTIONS {
            self.write_single_shot(response::options_response(request.version))
                .await?;
            return Ok(persistent);
        }

        let size = match files::check_target(&self.root, &request.target).await {
            Ok(size) => size,
            Err(guard) => {
                let status = guard.status();
                tracing::info!(target = %request.target, status = status.as_u16(), "Request rejected");
                let body = response::error_response(request.version, &request.target, status);
                self.write_single_shot(body).await?;
                return Ok(persistent);
            }
        };

        let header = response::build_header(
            request.version,
            Status::Ok,
            request.method,
            &request.target,
            size,
        );

        if request.method == Method::HEAD {
            self.write_single_shot(header.into_bytes()).await?;
        } else {
            self.stream_file(&request, size, header.into_bytes()).await?;
        }
        Ok(persistent)
    }

    /// Lends the write half to the scheduler for a GET body and awaits its
    /// return. A transfer failure is fatal: the head is already flushed, so
    /// the socket is simply closed.
    async fn stream_file(
        &mut self,
        request: &Request,
        size: u64,
        header: Vec<u8>,
    ) -> anyhow::Result<()> {
        let writer = self
            .writer
            .take()
            .context("socket write half already lent out")?;
        let (done, completion) = oneshot::channel();

        let transfer = Transfer::new(
            writer,
            files::rooted(&self.root, &request.target),
            size,
            header,
            done,
        );
        if self.scheduler.submit(transfer).is_err() {
            anyhow::bail!("transfer scheduler is not running");
        }

        match completion.await.context("transfer dropped by scheduler")? {
            Ok(writer) => {
                self.writer = Some(writer);
                Ok(())
            }
            Err(error) => Err(anyhow::anyhow!(
                "transfer of {} failed: {:?}",
                request.target,
                error
            )),
        }
    }

    async fn write_single_shot(&mut self, bytes: Vec<u8>) -> anyhow::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .context("socket write half already lent out")?;
        ResponseWriter::new(bytes).write_to(writer).await
    }

    /// Adaptive keep-alive timeout: fewer open connections afford longer
    /// waits, higher load shrinks the timeout to reclaim sockets sooner.
    fn keepalive_timeout(&self) -> Duration {
        let open = self.open_connections.load(Ordering::Relaxed) as f64;
        let base = self.base_timeout.as_millis() as f64;
        let slack = ((100.0 - open) / 100.0).clamp(0.0, 1.0);
        Duration::from_millis((0.75 * base + 0.25 * base * slack) as u64)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.open_connections.fetch_sub(1, Ordering::Relaxed);
    }
}
