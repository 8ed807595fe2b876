use std::time::Duration;

use super::client::HttpClient;
use async_trait::async_trait;

/// Upper bound on establishing a TCP/TLS connection to a provider.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Added to the caller's deadline so that reqwest's own timeout is only a
/// backstop and the caller's deadline always fires first.
const DEADLINE_SLACK: Duration = Duration::from_secs(1);

/// Sends requests with a shared `reqwest::Client`.
#[derive(Clone)]
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }

    /// Builds a client for callers that enforce `deadline` themselves.
    ///
    /// Requests are abandoned by reqwest only once `deadline` plus a fixed
    /// slack has passed, so an expired caller deadline is reported as such
    /// rather than as a transport error.
    pub fn with_backstop(deadline: Duration) -> reqwest::Result<Self> {
        let backstop = deadline + DEADLINE_SLACK;
        let client = reqwest::Client::builder()
            .timeout(backstop)
            .connect_timeout(CONNECT_TIMEOUT.min(backstop))
            .build()?;
        Ok(Self(client))
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
