//! Raw content returned by download URLs.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{Result, TaleoError};

/// A download in progress.
///
/// The body is not interpreted; read it chunk by chunk with [`chunk`],
/// all at once with [`bytes`], or stream it into a writer with [`copy_to`].
///
/// [`chunk`]: Download::chunk
/// [`bytes`]: Download::bytes
/// [`copy_to`]: Download::copy_to
#[derive(Debug)]
pub struct Download {
    response: Response,
}

impl Download {
    pub(crate) fn new(response: Response) -> Self {
        Self { response }
    }

    /// The `Content-Type` reported by the server.
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// The `Content-Length` reported by the server.
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// The next chunk of the body, or `None` at the end.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>> {
        self.response.chunk().await.map_err(TaleoError::HttpError)
    }

    /// The whole body.
    pub async fn bytes(self) -> Result<Bytes> {
        self.response.bytes().await.map_err(TaleoError::HttpError)
    }

    /// Stream the body into `writer`, returning the number of bytes written.
    pub async fn copy_to<W>(mut self, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }
}
