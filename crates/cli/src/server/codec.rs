//! Native-messaging framing: a 4-byte little-endian length followed by that
//! many bytes of UTF-8 JSON.

use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Largest frame accepted in either direction (the browser's own limit for
/// host-to-extension messages).
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    Message(Vec<u8>),
    /// Payload exceeded `MAX_FRAME_LEN`; its bytes were consumed and dropped.
    Oversized(usize),
}

/// Reads one frame. `Ok(None)` on a clean end of stream between frames; a
/// stream that ends inside a frame is `UnexpectedEof`.
pub async fn read_frame<R>(reader: &mut R) -> io::Result<Option<Frame>>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        let n = reader.read(&mut len_buf[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended inside frame header",
            ));
        }
        filled += n;
    }

    let len = u32::from_le_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        let mut rest = (&mut *reader).take(len as u64);
        let skipped = tokio::io::copy(&mut rest, &mut tokio::io::sink()).await?;
        if skipped < len as u64 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended inside oversized frame",
            ));
        }
        return Ok(Some(Frame::Oversized(len)));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(Some(Frame::Message(payload)))
}

pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > MAX_FRAME_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("frame of {} bytes exceeds {} byte limit", payload.len(), MAX_FRAME_LEN),
        ));
    }

    writer.write_all(&(payload.len() as u32).to_le_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await
}
