use async_trait::async_trait;
use reqwest::{Request, Response};

/// The seam between providers and the network.
///
/// Providers build a [`Request`] and hand it to an `HttpClient`; wrappers
/// such as [`UrlParam`](super::auth::UrlParam) decorate the request before
/// passing it on to the client that actually sends it.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
