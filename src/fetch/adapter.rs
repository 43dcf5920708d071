//! Fetch boundary: URL in, rendered markup out
//!
//! Everything downstream of this module is transport-agnostic. The production
//! adapter calls a remote rendering API; swapping in a local browser driver
//! only means implementing [`FetchAdapter`] again, the pagination driver and
//! the extractors never change.

use crate::FetchError;
use reqwest::Client;
use std::time::Duration;

/// A transport that turns a URL into rendered page markup.
///
/// Each call is all-or-nothing: the complete body on success, an error
/// otherwise, never a partially-fetched page. `render_js` asks the transport
/// to execute client-side scripts before returning the markup.
#[allow(async_fn_in_trait)]
pub trait FetchAdapter {
    async fn fetch(&self, url: &str, render_js: bool) -> Result<String, FetchError>;
}

/// Fetch adapter backed by a remote rendering API
///
/// Issues `GET <endpoint>?api_key=<key>&url=<target>&render_js=<flag>` and
/// accepts only a success status; anything else is surfaced as
/// [`FetchError::Status`] with the upstream status code.
#[derive(Debug, Clone)]
pub struct RenderApi {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RenderApi {
    /// Builds the adapter with an explicitly bounded HTTP client
    ///
    /// The rendering service enforces no timeout of its own, so the client
    /// carries one.
    pub fn new(
        endpoint: &str,
        api_key: String,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
        })
    }
}

impl FetchAdapter for RenderApi {
    async fn fetch(&self, url: &str, render_js: bool) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("url", url),
                ("render_js", if render_js { "true" } else { "false" }),
            ])
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
