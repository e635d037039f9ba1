use std::time::Duration;

use futures_util::StreamExt;
use leadgen_logging::leadgen_debug;
use serde_json::Value;
use url::Url;

use crate::{ApiError, DiscoveryRequest, FailureKind};

pub const LEADS_PATH: &str = "api/leads";
pub const DISCOVER_PATH: &str = "api/discover";
pub const PILOT_STATUS_PATH: &str = "api/pilot-status";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl ApiSettings {
    /// Settings with default timeouts; endpoint paths are resolved below `base_url`.
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self::new(url))
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

/// The three endpoints the dashboard consumes.
#[async_trait::async_trait]
pub trait LeadApi: Send + Sync {
    /// `GET /api/leads`; a body that is not JSON is `InvalidBody`.
    async fn fetch_leads(&self) -> Result<Value, ApiError>;

    /// `POST /api/discover`; only the status decides success.
    async fn discover(&self, request: &DiscoveryRequest) -> Result<Option<Value>, ApiError>;

    /// `GET /api/pilot-status`; a body that is not JSON is `Value::Null`.
    async fn pilot_status(&self) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestLeadApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestLeadApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let response = check_status(response)?;
        self.read_capped(response).await
    }

    async fn read_capped(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl LeadApi for ReqwestLeadApi {
    async fn fetch_leads(&self) -> Result<Value, ApiError> {
        let url = self.settings.endpoint(LEADS_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = self.read_body(response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::InvalidBody, err.to_string()))
    }

    async fn discover(&self, request: &DiscoveryRequest) -> Result<Option<Value>, ApiError> {
        let url = self.settings.endpoint(DISCOVER_PATH)?;
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        // Only the status decides the outcome; an unusable body just skips the optimistic update.
        let response = check_status(response)?;
        match self.read_capped(response).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).ok()),
            Err(err) => {
                leadgen_debug!("Ignoring discovery response body: {}", err);
                Ok(None)
            }
        }
    }

    async fn pilot_status(&self) -> Result<Value, ApiError> {
        let url = self.settings.endpoint(PILOT_STATUS_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = self.read_body(response).await?;
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            leadgen_debug!("Unparseable pilot status body: {}", err);
            Value::Null
        }))
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    Ok(response)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
