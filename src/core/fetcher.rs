use crate::config::ContentConfig;
use crate::domain::model::{EndpointDescriptor, RawContentBatch};
use crate::domain::ports::ContentSource;
use crate::utils::error::{ContentError, FetchError, Result};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// 透過 HTTP 向 CMS 後端抓取內容
pub struct HttpContentSource {
    client: Client,
    base_url: Url,
    query: Vec<(String, String)>,
    timeout: Duration,
}

impl HttpContentSource {
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.backend.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ContentError::InvalidConfigValueError {
                field: "backend.base_url".to_string(),
                value: config.backend.base_url.clone(),
                reason: "URL cannot carry endpoint paths".to_string(),
            });
        }
        // 補上結尾斜線，端點路徑才會接在前綴之後而不是取代它
        if !base_url.path().ends_with('/') {
            let prefixed = format!("{}/", base_url.path());
            base_url.set_path(&prefixed);
        }
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url,
            query: config
                .backend
                .query
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            timeout: config.request_timeout(),
        })
    }

    /// 組合端點完整 URL（含查詢參數）。路徑一律相對於 base URL，保留其路徑前綴。
    pub fn endpoint_url(&self, path: &str) -> std::result::Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| FetchError::InvalidUrl {
                path: path.to_string(),
                source,
            })?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    async fn fetch_one(&self, endpoint: &EndpointDescriptor) -> RawContentBatch {
        match self.request_json(endpoint).await {
            Ok(body) => {
                tracing::debug!("✅ {} fetched", endpoint.kind);
                RawContentBatch::body(endpoint.kind, body)
            }
            Err(error) => {
                tracing::warn!("⚠️ {} unavailable: {}", endpoint.kind, error);
                RawContentBatch::failed(endpoint.kind, error)
            }
        }
    }

    async fn request_json(
        &self,
        endpoint: &EndpointDescriptor,
    ) -> std::result::Result<serde_json::Value, FetchError> {
        let url = self.endpoint_url(&endpoint.path)?;
        let url_str = url.to_string();

        tracing::debug!("Making API request for {} to: {}", endpoint.kind, url_str);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&url_str, e))?;

        let status = response.status();
        tracing::debug!("API response status for {}: {}", endpoint.kind, status);

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }

        // 先讀完整內容再解析，讓格式錯誤與連線錯誤分開
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(&url_str, e))?;

        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
            url: url_str,
            source,
        })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_all(&self, endpoints: &[EndpointDescriptor]) -> Result<Vec<RawContentBatch>> {
        tracing::info!(
            "🚀 Fetching {} content endpoints from {}",
            endpoints.len(),
            self.base_url
        );

        // 全部同時送出，等每個請求都結束（不會因單一失敗而中斷其他請求）
        let batches = join_all(endpoints.iter().map(|endpoint| self.fetch_one(endpoint))).await;

        let failed = batches.iter().filter(|batch| batch.is_failure()).count();
        if failed > 0 {
            tracing::warn!("📡 {} of {} endpoints failed", failed, batches.len());
        }

        Ok(batches)
    }
}
