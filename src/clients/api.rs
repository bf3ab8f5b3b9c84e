//! HTTP-backed [`RecordStore`] talking to a running `watchlog serve`.

use crate::api::types::ApiResponse;
use crate::domain::RecordId;
use crate::models::{NewRecord, RawRecord, WatchRecord};
use crate::services::{RecordError, RecordStore, ingest};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`, e.g. `http://127.0.0.1:6790`.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("watchlog/1.0")
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self::with_shared_client(client, Self::parse_base(base_url)?))
    }

    #[must_use]
    pub const fn with_shared_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn parse_base(base_url: &str) -> anyhow::Result<Url> {
        let mut url = Url::parse(base_url.trim())
            .map_err(|e| anyhow::anyhow!("Invalid remote URL '{base_url}': {e}"))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, RecordError> {
        self.base_url
            .join(path)
            .map_err(|e| RecordError::Network(format!("Invalid endpoint '{path}': {e}")))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        id: Option<RecordId>,
    ) -> Result<Option<T>, RecordError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(RecordError::NotFound(id));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            return Err(RecordError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.success {
            return Err(RecordError::Rejected {
                status: status.as_u16(),
                message: envelope.error.unwrap_or_default(),
            });
        }
        Ok(envelope.data)
    }

    async fn fetch_list(&self, request: RequestBuilder) -> Result<Vec<WatchRecord>, RecordError> {
        let rows: Option<Vec<RawRecord>> = self.send(request, None).await?;
        let rows = rows.unwrap_or_default();
        debug!(count = rows.len(), "Fetched watch records");
        Ok(ingest(rows))
    }

    async fn fetch_one(
        &self,
        request: RequestBuilder,
        id: Option<RecordId>,
    ) -> Result<WatchRecord, RecordError> {
        let raw: Option<RawRecord> = self.send(request, id).await?;
        let raw = raw.ok_or_else(|| RecordError::Network("Empty response body".to_string()))?;
        Ok(WatchRecord::try_from(raw)?)
    }
}

#[async_trait::async_trait]
impl RecordStore for ApiClient {
    async fn list(&self) -> Result<Vec<WatchRecord>, RecordError> {
        let url = self.endpoint("api/logs")?;
        self.fetch_list(self.client.get(url)).await
    }

    async fn search(&self, term: &str) -> Result<Vec<WatchRecord>, RecordError> {
        let mut url = self.endpoint("api/search")?;
        url.query_pairs_mut().append_pair("q", term);
        self.fetch_list(self.client.get(url)).await
    }

    async fn create(&self, record: NewRecord) -> Result<WatchRecord, RecordError> {
        record.validate()?;
        let url = self.endpoint("api/logs")?;
        self.fetch_one(self.client.post(url).json(&record), None)
            .await
    }

    async fn update(&self, id: RecordId, record: NewRecord) -> Result<WatchRecord, RecordError> {
        record.validate()?;
        let url = self.endpoint(&format!("api/logs/{id}"))?;
        self.fetch_one(self.client.put(url).json(&record), Some(id))
            .await
    }

    async fn delete(&self, id: RecordId) -> Result<(), RecordError> {
        let url = self.endpoint(&format!("api/logs/{id}"))?;
        let _: Option<serde_json::Value> = self.send(self.client.delete(url), Some(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let c = client("http://localhost:6790");
        assert_eq!(
            c.endpoint("api/logs").unwrap().as_str(),
            "http://localhost:6790/api/logs"
        );

        let c = client("https://media.example.com/watchlog");
        assert_eq!(
            c.endpoint("api/logs/4").unwrap().as_str(),
            "https://media.example.com/watchlog/api/logs/4"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiClient::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        let c = client("http://127.0.0.1:9");
        assert!(matches!(c.list().await, Err(RecordError::Network(_))));
    }
}
