//! Rate-limited HTTP executor shared by all source clients.
//!
//! Every client owns one `Fetcher`, so the inter-request delay and the api
//! call counter are per source. The throttle is the only place a task
//! suspends for rate limiting; retries with exponential backoff happen here
//! so the clients above only ever see the final outcome.

use {
    serde::de::DeserializeOwned,
    std::{
        sync::atomic::{AtomicU64, Ordering},
        time::Duration,
    },
    tokio::{sync::Mutex, time::Instant},
};

const MAX_RETRIES: u32 = 3;
const BACKOFF_BASE: f64 = 2.0;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 401/403. Not retryable; the operator has to rotate credentials or
    /// headers before any further request can succeed.
    #[error("access denied (http {0})")]
    AccessDenied(reqwest::StatusCode),
    /// Transient failures exhausted the retry budget.
    #[error("source unavailable after {MAX_RETRIES} attempts: {0}")]
    Unavailable(String),
    /// The remote answered but the payload makes no sense.
    #[error("malformed payload: {0}")]
    Semantic(String),
}

pub struct Fetcher {
    client: reqwest::Client,
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
    api_calls: AtomicU64,
}

impl Fetcher {
    pub fn new(
        delay: Duration,
        default_headers: reqwest::header::HeaderMap,
    ) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self {
            client,
            delay,
            last_request: Mutex::new(None),
            api_calls: AtomicU64::new(0),
        })
    }

    /// Requests made so far, counting every retry. Drives the batch cooldown.
    pub fn api_call_count(&self) -> u64 {
        self.api_calls.load(Ordering::Relaxed)
    }

    pub fn reset_api_call_count(&self) {
        self.api_calls.store(0, Ordering::Relaxed);
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let text = self.get_text(url, query).await?;
        serde_json::from_str(&text).map_err(|err| Error::Semantic(format!("json decode: {err}")))
    }

    pub async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, Error> {
        self.throttle().await;
        let mut last_error = String::new();
        for attempt in 1..=MAX_RETRIES {
            self.api_calls.fetch_add(1, Ordering::Relaxed);
            match self.client.get(url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .text()
                            .await
                            .map_err(|err| Error::Semantic(format!("body read: {err}")));
                    }
                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        // sources rate limit aggressively; wait twice as long
                        let wait = backoff(attempt).mul_f64(2.0);
                        tracing::warn!(%url, attempt, ?wait, "rate limited, backing off");
                        last_error = format!("http {status}");
                        tokio::time::sleep(wait).await;
                        continue;
                    }
                    if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(Error::AccessDenied(status));
                    }
                    tracing::warn!(%url, %status, attempt, "unexpected status");
                    last_error = format!("http {status}");
                }
                Err(err) => {
                    tracing::warn!(%url, attempt, ?err, "transport error");
                    last_error = err.to_string();
                }
            }
            if attempt < MAX_RETRIES {
                tokio::time::sleep(backoff(attempt)).await;
            }
        }
        Err(Error::Unavailable(last_error))
    }

    /// Enforces the minimum delay between requests of this client. Holding
    /// the lock across the sleep serializes concurrent callers.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(at) = *last {
            tokio::time::sleep_until(at + self.delay).await;
        }
        *last = Some(Instant::now());
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_secs_f64(BACKOFF_BASE.powf(f64::from(attempt)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff(1), Duration::from_secs(2));
        assert_eq!(backoff(2), Duration::from_secs(4));
        assert_eq!(backoff(3), Duration::from_secs(8));
        // the 429 variant waits twice as long
        assert_eq!(backoff(2).mul_f64(2.0), Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn throttle_spaces_out_requests() {
        let fetcher = Fetcher::new(Duration::from_secs(1), Default::default()).unwrap();
        let started = Instant::now();
        fetcher.throttle().await;
        fetcher.throttle().await;
        fetcher.throttle().await;
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
