//! HTTP client for the Community Flow backend.

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::types::*;
use crate::config::ApiConfig;
use crate::TARGET_API_REQUEST;

/// Articles returned per cluster in the drill-down detail pane.
pub const DETAIL_ARTICLE_LIMIT: u32 = 5;

/// Read-only client over the backend's GET endpoints.
///
/// Every failure (transport, non-2xx status, undecodable body) is normalized
/// into a single error whose message names the failing URL and, where one
/// was received, the HTTP status and body text. Callers own any retry
/// policy; the client issues exactly one attempt per call.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        // Validate the base URL up front so a typo fails at construction,
        // not on the first request.
        Url::parse(&config.base_url)
            .map_err(|e| anyhow!("Invalid API base URL {}: {}", config.base_url, e))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `base_url + path [+ "?" + query]`, omitting pairs whose value
    /// is absent. Nested or repeated keys are not supported by the backend.
    fn endpoint(&self, path: &str, query: &[(&str, Option<String>)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| anyhow!("Invalid request URL {}{}: {}", self.base_url, path, e))?;
        let present: Vec<_> = query
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (*k, v.as_str())))
            .collect();
        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }
        Ok(url)
    }

    /// Issues the GET and rejects non-2xx responses with the status and the
    /// raw body text folded into the error message.
    async fn send(&self, url: Url) -> Result<reqwest::Response> {
        debug!(target: TARGET_API_REQUEST, "GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("GET {} failed: {}", url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("GET {} failed: {} {}", url, status.as_u16(), body));
        }
        Ok(response)
    }

    /// GET a JSON endpoint and deserialize the body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> Result<T> {
        let url = self.endpoint(path, query)?;
        let response = self.send(url.clone()).await?;
        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("GET {} failed: {}", url, e))?;
        serde_json::from_str(&body)
            .map_err(|e| anyhow!("GET {} returned unexpected JSON: {}", url, e))
    }

    /// GET a binary endpoint and return the raw bytes.
    pub async fn get_binary(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(path, &[])?;
        let response = self.send(url.clone()).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| anyhow!("GET {} failed: {}", url, e))?;
        debug!(target: TARGET_API_REQUEST, "GET {} returned {} bytes", url, bytes.len());
        Ok(bytes.to_vec())
    }

    pub async fn health(&self) -> Result<Value> {
        self.get("/health", &[]).await
    }

    pub async fn themes(&self) -> Result<ThemesSummary> {
        self.get("/themes", &[]).await
    }

    pub async fn clusters(&self) -> Result<ClustersResponse> {
        self.get("/clusters", &[]).await
    }

    /// Fetches one expanded cluster with up to `limit_articles` sample
    /// articles attached.
    pub async fn cluster_detail(&self, topic_id: i64, limit_articles: u32) -> Result<ClusterDetail> {
        self.get(
            "/clusters",
            &[
                ("topic_id", Some(topic_id.to_string())),
                ("include_articles", Some("true".to_string())),
                ("limit_articles", Some(limit_articles.to_string())),
            ],
        )
        .await
    }

    pub async fn map_data(&self) -> Result<MapSnapshot> {
        self.get("/map-data", &[]).await
    }

    /// Focused form of `/map-data`: aggregates for a single neighborhood.
    pub async fn neighborhood(&self, name: &str) -> Result<NeighborhoodStats> {
        self.get("/map-data", &[("neighborhood", Some(name.to_string()))])
            .await
    }

    pub async fn report_data(&self, limit: u32, sort: ReportSort) -> Result<ReportSnapshot> {
        self.get(
            "/report-data",
            &[
                ("limit", Some(limit.to_string())),
                ("sort", Some(sort.as_str().to_string())),
            ],
        )
        .await
    }

    pub async fn report_pdf(&self) -> Result<Vec<u8>> {
        self.get_binary("/report-pdf").await
    }
}
