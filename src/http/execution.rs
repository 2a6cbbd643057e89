use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Request};
use tokio::time::Instant;

/// Status, timing and body of one completed exchange.
#[derive(Debug)]
pub(super) struct Exchange {
    pub(super) status: u16,
    pub(super) elapsed: Duration,
    pub(super) body: String,
}

/// Sends `request` and reads the full body. The elapsed time covers connect,
/// TLS, the request, and the whole response body.
pub(super) async fn execute_exchange(
    client: &Client,
    request: Request,
) -> Result<Exchange, reqwest::Error> {
    let start = Instant::now();
    let response = client.execute(request).await?;
    let status = response.status().as_u16();
    let body = read_body(response).await?;
    Ok(Exchange {
        status,
        elapsed: start.elapsed(),
        body,
    })
}

async fn read_body(response: reqwest::Response) -> Result<String, reqwest::Error> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Flattens an error and its sources into one line.
pub(super) fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.contains(&text) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}
