//! HTTP helper with timeout and retry logic.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use tracing::warn;

use crate::error::{EngineError, Result};

/// Thin wrapper over [`reqwest::Client`] adding bounded
/// exponential-backoff retries for transient failures.
#[derive(Clone)]
pub struct RetryClient {
    client: Client,
    max_retries: u32,
}

impl RetryClient {
    /// Build a client with a per-request timeout.
    pub fn new(request_timeout: Duration, max_retries: u32) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            max_retries,
        })
    }

    /// GET with query parameters, retrying timeouts and connect errors.
    pub async fn get_with_query<Q: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        query: &Q,
    ) -> Result<Response> {
        let req = self.client.get(url).query(query);
        let resp = self.execute_with_retry(req).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(EngineError::ExternalService(format!(
                "HTTP {} fetching {}",
                status, url
            )));
        }
        Ok(resp)
    }

    /// Execute a request with exponential backoff retry.
    async fn execute_with_retry(&self, request: RequestBuilder) -> Result<Response> {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff_ms = 100u64 * 2u64.pow(attempt - 1);
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }

            match request.try_clone() {
                Some(cloned) => match cloned.send().await {
                    Ok(resp) => return Ok(resp),
                    Err(e) if e.is_timeout() || e.is_connect() => {
                        warn!(attempt, error = %e, "retrying transient HTTP failure");
                        last_err = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                },
                None => return Ok(request.send().await?),
            }
        }

        Err(last_err
            .map(EngineError::from)
            .unwrap_or_else(|| EngineError::ExternalService("retries exhausted".into())))
    }
}
