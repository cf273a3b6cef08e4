use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes a single-shot response (head and optional body) to a socket.
///
/// Used for HEAD, OPTIONS and error responses; GET bodies go through the
/// transfer scheduler instead.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(buffer: Vec<u8>) -> Self {
        Self { buffer, written: 0 }
    }

    pub async fn write_to<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        Ok(())
    }
}
