//! Shared HTTP plumbing for the external API calls.
//!
//! Every stage sends exactly one request through [`send_request`], which logs
//! the exchange and maps transport and status failures onto [`PipelineError`].

use log::{debug, error, info};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::PipelineError;

/// Builds the HTTP client shared by all stages of one run.
///
/// No explicit timeout is configured; calls wait as long as the client's
/// defaults allow.
pub fn build_client() -> Client {
    Client::new()
}

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum length in characters before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!("{}... [truncated, {} total bytes]", truncated, text.len())
    } else {
        sanitized
    }
}

/// Sends a prepared request and returns the body of a successful response.
///
/// # Parameters
///
/// - `request_builder`: A configured reqwest::RequestBuilder ready to send
/// - `operation`: Human-readable name for the operation (for logging)
///
/// # Returns
///
/// - `Ok(String)`: The response body on a 2xx status
/// - `Err(PipelineError::Transport)`: If the request could not be sent or read
/// - `Err(PipelineError::Status)`: On any other status, carrying the error body
pub(crate) async fn send_request(
    request_builder: RequestBuilder,
    operation: &'static str,
) -> Result<String, PipelineError> {
    info!("Sending request for operation: {}", operation);

    // Request URLs carry API keys in their query strings.
    let response = request_builder
        .send()
        .await
        .map_err(|source| PipelineError::Transport {
            operation,
            source: source.without_url(),
        })?;

    let status = response.status();
    info!(
        "Received response with status: {} for operation: {}",
        status, operation
    );

    if status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|source| PipelineError::Transport {
                operation,
                source: source.without_url(),
            })?;
        debug!(
            "Response summary for '{}': {} bytes received",
            operation,
            body.len()
        );
        return Ok(body);
    }

    let body = response.text().await.unwrap_or_default();
    error!("Operation '{}' failed - Status: {}", operation, status);
    debug!(
        "Error response for '{}': {}",
        operation,
        sanitize_for_logging(&body, 200)
    );
    Err(PipelineError::Status {
        operation,
        status,
        body,
    })
}

/// Decodes a response body into a typed record.
pub(crate) fn decode<T: DeserializeOwned>(
    body: &str,
    operation: &'static str,
) -> Result<T, PipelineError> {
    serde_json::from_str(body).map_err(|source| PipelineError::Decode { operation, source })
}
