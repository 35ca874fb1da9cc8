// API client module: a small blocking HTTP client that talks to the
// document service's project file endpoint. Uploads are sequential, so a
// synchronous client is all this tool needs.

use anyhow::{Context, Result};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Base URL used when `BULK_IMPORT_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1717";

/// Header carrying the percent-encoded file name of an upload.
pub const FILE_NAME_HEADER: &str = "x-file-name";

/// Simple API client that holds a reqwest blocking client and the base URL
/// of the document service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Error body returned by the service on a non-success status.
#[derive(Deserialize, Debug)]
struct ErrorResponse {
    error: Option<String>,
}

impl ApiClient {
    /// Create an ApiClient configured from the environment variable
    /// `BULK_IMPORT_API_URL` or fallback to `http://localhost:1717`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("BULK_IMPORT_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(&base_url)
    }

    pub fn new(base_url: &str) -> Result<Self> {
        // Uploads have no size limit, so requests wait as long as the
        // service takes instead of reqwest's 30 s default.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST raw file bytes to `/api/projects/{project_id}/files` and return
    /// the parsed JSON response. On a non-success status the service's
    /// `error` field is used as the message, or the status reason if the
    /// body has none.
    pub fn upload_file(&self, project_id: &str, file_name: &str, body: Vec<u8>) -> Result<Value> {
        let url = format!("{}/api/projects/{}/files", &self.base_url, project_id);
        let encoded = urlencoding::encode(file_name).into_owned();
        debug!("POST {} ({}: {})", url, FILE_NAME_HEADER, encoded);

        let res = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
            .header(FILE_NAME_HEADER, encoded)
            .body(body)
            .send()
            .context("Failed to send upload request")?;

        let status = res.status();
        debug!("upload response status: {}", status);
        if !status.is_success() {
            let txt = res.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&txt)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or_else(|| status.to_string())
                });
            anyhow::bail!("upload failed: {}", message);
        }

        let resp: Value = res.json().context("Parsing upload response json")?;
        Ok(resp)
    }
}
