// Thin JSON transport shared by every client component

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ClientError, ClientResult};

/// Injected HTTP dependency: gateway base URL plus a shared connection
/// pool. Timeouts are per call, since chat, translation, and content
/// loading tolerate very different waits.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS settings).
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiClient { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn get_json<T>(&self, path: &str, timeout: Duration) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        Ok(response.json::<T>().await?)
    }
}
