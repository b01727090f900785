use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use crate::errors::AppError;
use crate::models::UpstreamRequest;

/// Thin wrapper around a pooled [`reqwest::Client`] that opens one streamed
/// exchange with the text-generation service.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(AppError::ClientBuild)?;
        Ok(Self { http })
    }

    /// POSTs `request` to `url` and returns the response once the status line
    /// is in. The body is left unread so the caller can stream it.
    pub async fn open(
        &self,
        url: &str,
        request: &UpstreamRequest,
    ) -> Result<reqwest::Response, AppError> {
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                debug!("Upstream request to {url} failed: {e}");
                AppError::UpstreamUnavailable { url: url.to_string(), source: e }
            })?;

        let status = response.status();
        debug!("Upstream answered with HTTP {status}");

        if !status.is_success() {
            return Err(AppError::UpstreamStatus { status: status.as_u16() });
        }
        if matches!(status, StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT) {
            return Err(AppError::UpstreamNoBody { status: status.as_u16() });
        }

        Ok(response)
    }
}
