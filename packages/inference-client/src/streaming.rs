//! SSE streaming parser for text-generation responses.
//!
//! Converts a raw `reqwest` byte stream into `TokenChunk` values.
//! Handles `data: [DONE]`, in-band error events, partial lines and
//! multi-byte characters split across network chunks.

use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::InferenceError;

/// A single token event from a streaming generation.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenChunk {
    /// The text fragment carried by this event.
    pub text: String,
    /// Whether the backend marked the token as special (e.g. `</s>`).
    pub special: bool,
    /// Whether this event closes the generation.
    pub done: bool,
}

/// Raw streaming event from the backend.
#[derive(Debug, serde::Deserialize)]
struct StreamEventRaw {
    #[serde(default)]
    token: Option<TokenRaw>,
    #[serde(default)]
    generated_text: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_type: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct TokenRaw {
    text: String,
    #[serde(default)]
    special: bool,
}

type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

type TokenResult = Result<TokenChunk, InferenceError>;

/// Stream adapter that converts raw SSE bytes into `TokenChunk` values.
///
/// Ends after the first error or after the closing event. A body that ends
/// before the closing event yields `MalformedStream`, so a truncated
/// generation is never mistaken for a complete one.
pub struct TokenStream {
    inner: ByteStream,
    buffer: Vec<u8>,
    body_ended: bool,
    saw_final: bool,
    finished: bool,
}

impl TokenStream {
    pub(crate) fn new(
        byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: Vec::new(),
            body_ended: false,
            saw_final: false,
            finished: false,
        }
    }

    fn finish(&mut self, item: TokenResult) -> Poll<Option<TokenResult>> {
        match &item {
            Ok(chunk) if chunk.done => {
                self.saw_final = true;
                self.finished = true;
            }
            Ok(_) => {}
            Err(_) => self.finished = true,
        }
        Poll::Ready(Some(item))
    }
}

impl Stream for TokenStream {
    type Item = TokenResult;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.finished {
            return Poll::Ready(None);
        }

        loop {
            // Try to parse a complete line from the buffer
            if let Some(item) = try_parse_line(&mut this.buffer) {
                return this.finish(item);
            }

            if this.body_ended {
                this.finished = true;
                if this.saw_final {
                    return Poll::Ready(None);
                }
                return Poll::Ready(Some(Err(InferenceError::MalformedStream(
                    "stream ended before the final event".into(),
                ))));
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    this.buffer.extend_from_slice(&bytes);
                }
                Poll::Ready(Some(Err(e))) => {
                    return this.finish(Err(InferenceError::from(e)));
                }
                Poll::Ready(None) => {
                    this.body_ended = true;
                    // Body ended without a trailing newline
                    if !this.buffer.iter().all(u8::is_ascii_whitespace) {
                        this.buffer.push(b'\n');
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Try to extract and parse a complete SSE line from the buffer.
/// Returns `None` if no complete data line is available yet.
fn try_parse_line(buffer: &mut Vec<u8>) -> Option<Result<TokenChunk, InferenceError>> {
    loop {
        let newline_pos = buffer.iter().position(|b| *b == b'\n')?;
        let raw_line: Vec<u8> = buffer.drain(..=newline_pos).collect();

        let line = match std::str::from_utf8(&raw_line) {
            Ok(line) => line.trim(),
            Err(e) => {
                return Some(Err(InferenceError::MalformedStream(format!(
                    "Invalid UTF-8 in stream: {}",
                    e
                ))));
            }
        };

        // Skip blank separators and non-data fields ("event:", "id:", ":keep-alive")
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();

        if data == "[DONE]" {
            return Some(Ok(TokenChunk {
                text: String::new(),
                special: false,
                done: true,
            }));
        }

        return Some(parse_event(data));
    }
}

fn parse_event(data: &str) -> Result<TokenChunk, InferenceError> {
    let raw: StreamEventRaw = serde_json::from_str(data).map_err(|e| {
        InferenceError::MalformedStream(format!(
            "Failed to parse stream event: {} (data: {})",
            e,
            truncate(data, 200)
        ))
    })?;

    if let Some(message) = raw.error {
        return Err(InferenceError::Api(match raw.error_type {
            Some(kind) => format!("{} ({})", message, kind),
            None => message,
        }));
    }

    let token = raw.token.ok_or_else(|| {
        InferenceError::MalformedStream(format!(
            "Stream event has no token (data: {})",
            truncate(data, 200)
        ))
    })?;

    Ok(TokenChunk {
        text: token.text,
        special: token.special,
        done: raw.generated_text.is_some(),
    })
}

fn truncate(data: &str, max: usize) -> &str {
    match data.char_indices().nth(max) {
        Some((idx, _)) => &data[..idx],
        None => data,
    }
}
