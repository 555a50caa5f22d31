use std::time::Duration;

use url::Url;

use crate::ConvertError;

/// Job endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://bx3sac0sc7.execute-api.us-east-1.amazonaws.com/Prod/job";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Job endpoint; submissions POST here and status queries GET `?job_id=`.
    pub api_url: String,
    pub connect_timeout: Duration,
    /// Timeout for backend calls (submission and status).
    pub request_timeout: Duration,
    /// Timeout for the direct write of file bytes.
    pub upload_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(300),
        }
    }
}

impl ClientSettings {
    pub(crate) fn parsed_api_url(&self) -> Result<Url, ConvertError> {
        Url::parse(&self.api_url)
            .map_err(|err| ConvertError::Client(format!("invalid api url {:?}: {err}", self.api_url)))
    }

    pub(crate) fn build_client(&self, timeout: Duration) -> Result<reqwest::Client, ConvertError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|err| ConvertError::Client(err.to_string()))
    }
}
