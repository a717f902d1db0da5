use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Request};
use tracing::{debug, warn};
use url::{ParseError, Url};

use crate::error::{ReportError, Result};

pub struct ReportClient {
    http: Client,
}

/// Value for the `Authorization` header: `Basic base64(user:password)`.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

impl ReportClient {
    /// Build a client whose requests give up after `timeout_secs`.
    /// Zero or negative disables the timeout.
    pub fn new(timeout_secs: i64) -> Result<Self> {
        let mut builder = Client::builder();
        if let Ok(secs) = u64::try_from(timeout_secs) {
            if secs > 0 {
                builder = builder.timeout(Duration::from_secs(secs));
            }
        }

        let http = builder
            .build()
            .map_err(|e| ReportError::RequestBuild(e.to_string()))?;

        Ok(Self { http })
    }

    /// An empty or scheme-less URL only fails once the request is sent, so it
    /// is reported as a request failure rather than a construction error.
    fn build_request(&self, url: &str, username: &str, password: &str) -> Result<Request> {
        let url = Url::parse(url).map_err(|e| match e {
            ParseError::RelativeUrlWithoutBase => ReportError::MissingScheme(url.to_string()),
            e => ReportError::RequestBuild(format!("{e}: {url:?}")),
        })?;

        let auth = HeaderValue::from_str(&basic_auth(username, password))
            .map_err(|e| ReportError::RequestBuild(e.to_string()))?;

        self.http
            .get(url)
            .header(AUTHORIZATION, auth)
            .build()
            .map_err(|e| ReportError::RequestBuild(e.to_string()))
    }

    /// GET `url` and return the whole body, whatever the status code.
    pub async fn fetch(&self, url: &str, username: &str, password: &str) -> Result<Vec<u8>> {
        let request = self.build_request(url, username, password)?;
        debug!(url = %request.url(), "requesting team report");

        let response = self.http.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "team endpoint returned a non-success status");
        }

        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "received team report");

        Ok(body.to_vec())
    }
}
