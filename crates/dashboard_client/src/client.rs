use async_trait::async_trait;
use dashboard_core::{AnalysisRecord, AnalysisStatus, RecordId};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::error::{map_reqwest_error, ApiError};
use crate::settings::ClientSettings;

/// Server acknowledgement of a newly submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedJob {
    pub id: RecordId,
    pub status: AnalysisStatus,
}

/// Typed request/response boundary to the backend. Stateless; every call is
/// idempotent-by-id where applicable.
#[async_trait]
pub trait JobClient: Send + Sync {
    /// Fetches the full current dataset.
    async fn list(&self) -> Result<Vec<AnalysisRecord>, ApiError>;

    /// Submits one URL for analysis.
    async fn create(&self, url: &str) -> Result<CreatedJob, ApiError>;

    /// Bulk delete; any non-success response is one failed operation.
    async fn delete_many(&self, ids: &[RecordId]) -> Result<(), ApiError>;

    /// Triggers re-analysis per id, each request issued independently and
    /// concurrently.
    async fn rerun_many(&self, ids: &[RecordId]) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobClient {
    settings: ClientSettings,
    http: reqwest::Client,
}

impl ReqwestJobClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, http })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.endpoint(path));
        if let Some(token) = &self.settings.api_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            code: status.as_u16(),
        })
    }
}

#[async_trait]
impl JobClient for ReqwestJobClient {
    async fn list(&self) -> Result<Vec<AnalysisRecord>, ApiError> {
        let response = self
            .request(Method::GET, "/urls")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response)?;
        response
            .json::<Vec<AnalysisRecord>>()
            .await
            .map_err(map_reqwest_error)
    }

    async fn create(&self, url: &str) -> Result<CreatedJob, ApiError> {
        // The submission UI validates first; this is the boundary guard.
        let parsed = Url::parse(url).map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let response = self
            .request(Method::POST, "/urls")
            .json(&json!({ "url": url }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response)?;
        response.json::<CreatedJob>().await.map_err(map_reqwest_error)
    }

    async fn delete_many(&self, ids: &[RecordId]) -> Result<(), ApiError> {
        if ids.is_empty() {
            return Ok(());
        }
        let response = self
            .request(Method::DELETE, "/urls")
            .json(&json!({ "ids": ids }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).map(|_| ())
    }

    async fn rerun_many(&self, ids: &[RecordId]) -> Result<(), ApiError> {
        if ids.is_empty() {
            return Ok(());
        }
        // All requests go out together. A single failure marks the whole
        // batch failed, but requests already issued are not retracted.
        let requests = ids.iter().map(|id| {
            let builder = self.request(Method::PUT, &format!("/urls/{id}/process"));
            async move {
                let response = builder.send().await.map_err(map_reqwest_error)?;
                check_status(response).map(|_| ())
            }
        });
        let results = futures_util::future::join_all(requests).await;
        results.into_iter().collect()
    }
}
