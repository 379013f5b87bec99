// file: src/provider/client.rs
// description: reqwest wrapper for JSON POSTs with server-sent-event streaming
// reference: https://docs.rs/reqwest

use crate::error::{AssistantError, Result};
use futures::stream::{self, Stream, StreamExt};
use reqwest::header::HeaderMap;
use serde::{Serialize, de::DeserializeOwned};
use std::pin::Pin;
use tracing::warn;

pub type BoxedStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
}

impl ApiClient {
    pub fn with_headers(headers: HeaderMap) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AssistantError::Provider(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// POSTs a JSON request and decodes the `data:` lines of the SSE response
    /// body into `T` values.
    ///
    /// Bytes arrive in arbitrary chunk boundaries, so a line buffer carries
    /// partial lines across chunks. Lines that are not `data:` events are
    /// ignored; a `data:` payload that fails to decode is logged and skipped.
    /// Transport failures mid-stream become `Err` items.
    pub async fn post_sse<S, T>(&self, url: &str, request: &S) -> Result<BoxedStream<Result<T>>>
    where
        S: Serialize,
        T: DeserializeOwned + Send + 'static,
    {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| AssistantError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(AssistantError::Provider(format!(
                "request failed with status {status}: {body}"
            )));
        }

        let events = response
            .bytes_stream()
            .scan(String::new(), |buffer, chunk| {
                let items: Vec<Result<T>> = match chunk {
                    Ok(bytes) => {
                        buffer.push_str(&String::from_utf8_lossy(&bytes));
                        drain_data_lines(buffer)
                            .into_iter()
                            .filter_map(|payload| decode_event(&payload))
                            .collect()
                    }
                    Err(e) => vec![Err(AssistantError::Stream(e.to_string()))],
                };
                futures::future::ready(Some(items))
            })
            .flat_map(stream::iter);

        Ok(Box::pin(events))
    }
}

fn decode_event<T: DeserializeOwned>(payload: &str) -> Option<Result<T>> {
    match serde_json::from_str::<T>(payload) {
        Ok(event) => Some(Ok(event)),
        Err(e) => {
            warn!("Skipping malformed stream event: {e}");
            None
        }
    }
}

/// Pulls every complete `data: ` line out of the buffer, leaving any
/// trailing partial line in place for the next chunk.
fn drain_data_lines(buffer: &mut String) -> Vec<String> {
    let mut payloads = Vec::new();
    let mut consumed = 0;

    for (idx, _) in buffer.match_indices('\n') {
        let line = buffer[consumed..idx].trim_end_matches('\r');
        consumed = idx + 1;

        if let Some(payload) = line.strip_prefix("data: ") {
            if !payload.trim().is_empty() {
                payloads.push(payload.to_string());
            }
        }
    }

    buffer.drain(..consumed);
    payloads
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestEvent {
        text: String,
    }

    #[test]
    fn test_drain_complete_lines() {
        let mut buffer = "data: {\"text\":\"a\"}\ndata: {\"text\":\"b\"}\n".to_string();
        let payloads = drain_data_lines(&mut buffer);

        assert_eq!(payloads, vec!["{\"text\":\"a\"}", "{\"text\":\"b\"}"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_drain_keeps_partial_line() {
        let mut buffer = "data: {\"text\":\"a\"}\ndata: {\"te".to_string();
        let payloads = drain_data_lines(&mut buffer);

        assert_eq!(payloads, vec!["{\"text\":\"a\"}"]);
        assert_eq!(buffer, "data: {\"te");
    }

    #[test]
    fn test_drain_ignores_non_data_lines() {
        let mut buffer = "\nevent: ping\ndata: {\"text\":\"a\"}\n\n".to_string();
        let payloads = drain_data_lines(&mut buffer);

        assert_eq!(payloads, vec!["{\"text\":\"a\"}"]);
    }

    #[test]
    fn test_drain_handles_crlf() {
        let mut buffer = "data: {\"text\":\"a\"}\r\n".to_string();
        let payloads = drain_data_lines(&mut buffer);

        assert_eq!(payloads, vec!["{\"text\":\"a\"}"]);
    }

    #[test]
    fn test_decode_event_skips_malformed() {
        assert!(decode_event::<TestEvent>("{not json").is_none());

        let decoded = decode_event::<TestEvent>("{\"text\":\"ok\"}").unwrap().unwrap();
        assert_eq!(decoded, TestEvent { text: "ok".to_string() });
    }

    #[test]
    fn test_split_across_chunks_reassembles() {
        // The same payload fed one byte at a time yields exactly one event.
        let data = "data: {\"text\":\"hello\"}\n";
        let mut buffer = String::new();
        let mut events = Vec::new();

        for byte in data.bytes() {
            buffer.push(byte as char);
            for payload in drain_data_lines(&mut buffer) {
                if let Some(event) = decode_event::<TestEvent>(&payload) {
                    events.push(event.unwrap());
                }
            }
        }

        assert_eq!(events, vec![TestEvent { text: "hello".to_string() }]);
    }
}
