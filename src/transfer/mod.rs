//! In-progress GET transfers and the scheduler that drains them.
//!
//! A GET response body is never written in one go. The connection hands its
//! socket write half to the scheduler as a [`Transfer`], which streams the
//! file in bounded chunks interleaved with every other in-flight transfer,
//! then hands the write half back so the connection can decide whether to
//! keep the socket open.

pub mod scheduler;

use std::io::SeekFrom;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::oneshot;

/// Default chunk size per scheduler step, sized to fit comfortably under
/// common link MTUs.
pub const PACKET_SIZE: usize = 1450;

/// Why an in-flight transfer was abandoned.
///
/// All variants are fatal to the connection: the response head has already
/// been flushed, so no corrective status can be sent.
#[derive(Debug)]
pub enum TransferError {
    /// The file could not be (re)opened or positioned
    Open(std::io::Error),
    /// The file became shorter than its advertised size mid-stream
    ShortRead { cursor: u64, size: u64 },
    /// The socket write failed
    Write(std::io::Error),
}

/// Delivered to the owning connection when a transfer leaves the queue:
/// the write half comes back on success, or the error that killed the
/// connection.
pub type Completion = oneshot::Sender<Result<OwnedWriteHalf, TransferError>>;

/// One in-progress file transfer.
///
/// State machine: header pending (first service sends the response head as
/// a standalone write) → streaming (one chunk per service) → done. The file
/// handle stays bundled with the transfer across queue turns and is only
/// reopened if it is missing.
pub struct Transfer {
    socket: OwnedWriteHalf,
    path: PathBuf,
    size: u64,
    cursor: u64,
    file: Option<File>,
    header: Option<Vec<u8>>,
    done: Completion,
}

impl Transfer {
    pub fn new(
        socket: OwnedWriteHalf,
        path: PathBuf,
        size: u64,
        header: Vec<u8>,
        done: Completion,
    ) -> Self {
        Self {
            socket,
            path,
            size,
            cursor: 0,
            file: None,
            header: Some(header),
            done,
        }
    }

    /// Bytes of the file body already delivered. Always within `[0, size]`.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Performs one bounded service step.
    ///
    /// The first step opens the file and sends the response head; each
    /// subsequent step delivers at most `chunk_size` body bytes, advancing
    /// the cursor by the bytes actually read. Returns the transfer for
    /// re-queueing while incomplete, or `None` once it has completed or
    /// failed (the completion channel is signalled either way).
    pub async fn step(mut self, chunk_size: usize) -> Option<Transfer> {
        match self.service(chunk_size).await {
            Ok(()) if self.cursor >= self.size => {
                tracing::debug!(path = %self.path.display(), size = self.size, "Transfer complete");
                let _ = self.done.send(Ok(self.socket));
                None
            }
            Ok(()) => Some(self),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    cursor = self.cursor,
                    error = ?error,
                    "Transfer abandoned"
                );
                // Dropping the write half closes the socket; no status can
                // be retrofitted once the head has been sent.
                let _ = self.done.send(Err(error));
                None
            }
        }
    }

    async fn service(&mut self, chunk_size: usize) -> Result<(), TransferError> {
        if let Some(header) = self.header.take() {
            let file = File::open(&self.path).await.map_err(TransferError::Open)?;
            self.file = Some(file);

            return self
                .socket
                .write_all(&header)
                .await
                .map_err(TransferError::Write);
        }

        if self.cursor >= self.size {
            return Ok(());
        }

        let mut file = match self.file.take() {
            Some(f) => f,
            None => File::open(&self.path).await.map_err(TransferError::Open)?,
        };

        file.seek(SeekFrom::Start(self.cursor))
            .await
            .map_err(TransferError::Open)?;

        let want = chunk_size.min((self.size - self.cursor) as usize);
        let mut buf = vec![0u8; want];
        let n = file.read(&mut buf).await.map_err(TransferError::Open)?;
        self.file = Some(file);

        // A read shorter than requested at a position short of the known
        // file size means the file shrank underneath us.
        if n < want {
            return Err(TransferError::ShortRead {
                cursor: self.cursor,
                size: self.size,
            });
        }

        self.socket
            .write_all(&buf[..n])
            .await
            .map_err(TransferError::Write)?;

        self.cursor += n as u64;
        Ok(())
    }
}
