//! Blocking JSON-over-HTTP with retries and a circuit breaker.
//!
//! Shared by every HTTP-backed source. Handles:
//! - 403 → trip the breaker immediately
//! - 429 → record a failure, remember `retry-after`, retry with backoff
//! - 401 → authentication error, no retry
//! - 404 → asset not found, no retry
//! - other non-2xx and connect/timeout errors → retry with backoff

use super::circuit_breaker::CircuitBreaker;
use super::provider::DataError;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("coinlens/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    breaker: Arc<CircuitBreaker>,
    policy: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(breaker: Arc<CircuitBreaker>, policy: RetryPolicy) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(policy.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            breaker,
            policy,
        })
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// GET `url` and decode the JSON body. `subject` names the asset or
    /// resource for error messages.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, String)],
        subject: &str,
    ) -> Result<T, DataError> {
        if !self.breaker.is_allowed() {
            return Err(DataError::CircuitBreakerTripped);
        }

        let mut last_error = None;

        for attempt in 0..=self.policy.max_retries {
            if attempt > 0 {
                let delay = self.policy.base_delay * 2u32.pow(attempt - 1);
                debug!(url, attempt, ?delay, "retrying request");
                std::thread::sleep(delay);
            }

            if !self.breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            let mut request = self.client.get(url);
            for (name, value) in headers {
                request = request.header(*name, value);
            }

            debug!(url, "GET");
            match request.send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::FORBIDDEN {
                        self.breaker.trip();
                        return Err(DataError::CircuitBreakerTripped);
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.breaker.record_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        warn!(url, retry_after, "rate limited");
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED {
                        return Err(DataError::AuthenticationRequired(format!(
                            "HTTP 401 for {subject}"
                        )));
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(DataError::AssetNotFound {
                            asset: subject.to_string(),
                        });
                    }

                    if !status.is_success() {
                        self.breaker.record_failure();
                        last_error = Some(DataError::Other(format!("HTTP {status} for {subject}")));
                        continue;
                    }

                    let body = resp.text().map_err(|e| {
                        DataError::NetworkUnreachable(format!(
                            "failed to read response for {subject}: {e}"
                        ))
                    })?;
                    let decoded = serde_json::from_str(&body).map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse response for {subject}: {e}"
                        ))
                    })?;
                    self.breaker.record_success();
                    return Ok(decoded);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}
