//! Helpers for draining the body of a response returned by `FluentRequest::run`.
//!
//! None of these look at the status code; a 404 body is read like any other.

use crate::http_handler::http_request::request_common::RequestError;
use futures::StreamExt;

/// Reads the whole response body chunk by chunk.
///
/// # Errors
/// Returns a `TransportError` if the connection fails while the body is streamed.
pub async fn collect_body(response: reqwest::Response) -> Result<Vec<u8>, RequestError> {
    let mut collected: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk?[..]);
    }
    Ok(collected)
}

/// Reads the whole response body as text, replacing invalid UTF-8 sequences.
///
/// # Errors
/// See [`collect_body`].
pub async fn read_text(response: reqwest::Response) -> Result<String, RequestError> {
    let bytes = collect_body(response).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reads the whole response body and deserializes it from JSON.
///
/// # Errors
/// Returns a `TransportError` if reading fails or the body is not valid JSON for `T`.
pub async fn read_json<T>(response: reqwest::Response) -> Result<T, RequestError>
where T: serde::de::DeserializeOwned {
    Ok(response.json::<T>().await?)
}
