/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
//! Chunked streaming of large downloads.
//!
//! A [`ChunkStream`] owns the HTTP response it reads from. The connection goes
//! back to the client once the last chunk has been read, once a read fails, or
//! once the stream is dropped, whichever happens first.

use crate::error::AppError;
use bytes::Bytes;
use futures_util::Stream;
use futures_util::stream;
use reqwest::Response;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Body of a streamed GET, read chunk by chunk as the transport delivers it
#[derive(Debug)]
pub struct ChunkStream {
    url: String,
    response: Option<Response>,
}

impl ChunkStream {
    pub(crate) fn new(url: impl Into<String>, response: Response) -> Self {
        Self {
            url: url.into(),
            response: Some(response),
        }
    }

    /// URL being streamed
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the underlying connection has been released
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.response.is_none()
    }

    /// Declared body length, when the server sent one and the stream is still open
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.response.as_ref().and_then(Response::content_length)
    }

    /// Reads the next chunk; `Ok(None)` once the body is exhausted
    ///
    /// # Errors
    /// `AppError::Network` if the transport fails mid-body. The connection is
    /// released and later calls return `Ok(None)`.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>, AppError> {
        let Some(response) = self.response.as_mut() else {
            return Ok(None);
        };
        match response.chunk().await {
            Ok(Some(chunk)) => Ok(Some(chunk)),
            Ok(None) => {
                self.close();
                Ok(None)
            }
            Err(e) => {
                self.close();
                Err(AppError::Network(e))
            }
        }
    }

    /// Releases the connection without reading the rest of the body
    pub fn close(&mut self) {
        if self.response.take().is_some() {
            debug!("Released stream for {}", self.url);
        }
    }

    /// Copies the remaining body into `writer`, returning the number of bytes written
    ///
    /// # Errors
    /// `AppError::Network` on transport failure, `AppError::Io` on write failure
    pub async fn write_to<W>(&mut self, writer: &mut W) -> Result<u64, AppError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written: u64 = 0;
        while let Some(chunk) = self.next_chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }

    /// Adapts the chunk stream to a [`Stream`]
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, AppError>> + Send {
        stream::unfold(self, |mut chunks| async move {
            match chunks.next_chunk().await {
                Ok(Some(chunk)) => Some((Ok(chunk), chunks)),
                Ok(None) => None,
                Err(e) => Some((Err(e), chunks)),
            }
        })
    }
}

impl Drop for ChunkStream {
    fn drop(&mut self) {
        if self.response.is_some() {
            debug!("Stream for {} dropped before the last chunk", self.url);
        }
    }
}
