//! Bounded-retry wrapper over the fetch boundary

use crate::fetch::adapter::FetchAdapter;
use crate::FetchError;
use std::time::Duration;

/// Retry policy applied to every logical fetch
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum underlying adapter calls per logical fetch
    pub max_attempts: u32,

    /// Fixed delay between attempts; zero disables waiting
    pub delay: Duration,
}

/// A fetch adapter paired with a bounded retry policy
///
/// One logical fetch performs at most `max_attempts` adapter calls and then
/// gives up with [`FetchError::AttemptsExhausted`], returned to the caller
/// rather than raised. Whether exhaustion kills a page or a whole entity is
/// the caller's decision.
pub struct Fetcher<A> {
    adapter: A,
    policy: RetryPolicy,
}

impl<A: FetchAdapter> Fetcher<A> {
    pub fn new(adapter: A, policy: RetryPolicy) -> Self {
        Self { adapter, policy }
    }

    /// The per-logical-fetch attempt bound
    ///
    /// The pagination driver reuses this as its extraction-retry budget.
    pub fn max_attempts(&self) -> u32 {
        self.policy.max_attempts
    }

    /// Fetches `url`, retrying failed attempts up to the policy bound
    ///
    /// Every failed attempt is logged with its counter. Each attempt is
    /// all-or-nothing; a success returns immediately.
    pub async fn fetch_with_retry(&self, url: &str, render_js: bool) -> Result<String, FetchError> {
        for attempt in 1..=self.policy.max_attempts {
            match self.adapter.fetch(url, render_js).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    tracing::warn!(
                        "Fetch attempt {}/{} failed for {}: {}",
                        attempt,
                        self.policy.max_attempts,
                        url,
                        e
                    );
                    if attempt < self.policy.max_attempts && !self.policy.delay.is_zero() {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                }
            }
        }

        tracing::warn!(
            "Giving up on {} after {} attempts",
            url,
            self.policy.max_attempts
        );
        Err(FetchError::AttemptsExhausted {
            url: url.to_string(),
            attempts: self.policy.max_attempts,
        })
    }
}
