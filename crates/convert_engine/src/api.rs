use async_trait::async_trait;
use bytes::Bytes;
use convert_core::{ArtifactUrl, JobHandle, JobStatus};
use convert_logging::{convert_debug, convert_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ClientSettings, ConvertError};

/// Anything that can answer "what state is this job in".
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn job_status(&self, handle: &JobHandle) -> Result<JobStatus, ConvertError>;
}

/// Result of asking the backend for an upload job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub handle: JobHandle,
    /// Pre-authorized location that accepts a direct write of the file bytes.
    pub destination: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum CreateJobRequest<'a> {
    Upload {
        filename: &'a str,
        content_type: &'a str,
    },
    Reference {
        source_url: &'a str,
    },
}

#[derive(Debug, Deserialize)]
struct UploadJobResponse {
    presigned_url: String,
    job_id: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceJobResponse {
    job_id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    /// Anything that is not a string is kept raw and polled like an unknown status.
    #[serde(default)]
    status: serde_json::Value,
    #[serde(default)]
    urls: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the backend job endpoint.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    api_url: Url,
}

impl BackendClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ConvertError> {
        Ok(Self {
            client: settings.build_client(settings.request_timeout)?,
            api_url: settings.parsed_api_url()?,
        })
    }

    /// Creates a job for a fresh upload and returns where to write the bytes.
    pub async fn create_upload_job(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadTicket, ConvertError> {
        let (status, body) = self
            .post_job(&CreateJobRequest::Upload {
                filename,
                content_type,
            })
            .await?;
        let parsed: UploadJobResponse = parse_submission_body(status, &body)?;
        Ok(UploadTicket {
            handle: JobHandle::new(parsed.job_id),
            destination: parsed.presigned_url,
        })
    }

    /// Creates a job for a file that is already stored at `source_url`.
    pub async fn create_reference_job(&self, source_url: &str) -> Result<JobHandle, ConvertError> {
        let (status, body) = self
            .post_job(&CreateJobRequest::Reference { source_url })
            .await?;
        let parsed: ReferenceJobResponse = parse_submission_body(status, &body)?;
        Ok(JobHandle::new(parsed.job_id))
    }

    fn status_url(&self, handle: &JobHandle) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut().append_pair("job_id", handle.job_id());
        url
    }

    async fn post_job(
        &self,
        request: &CreateJobRequest<'_>,
    ) -> Result<(StatusCode, Bytes), ConvertError> {
        let payload = serde_json::to_vec(request)
            .map_err(|err| ConvertError::Client(format!("encoding job request: {err}")))?;

        let response = self
            .client
            .post(self.api_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|err| ConvertError::Submission {
                status: None,
                message: err.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| ConvertError::Submission {
            status: Some(status.as_u16()),
            message: err.to_string(),
        })?;

        if !status.is_success() {
            let message = rejection_message(status, &body);
            convert_warn!("Job request rejected status={} message={}", status, message);
            return Err(ConvertError::Submission {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok((status, body))
    }
}

#[async_trait]
impl StatusSource for BackendClient {
    async fn job_status(&self, handle: &JobHandle) -> Result<JobStatus, ConvertError> {
        let url = self.status_url(handle);
        convert_debug!("Querying status job_id={}", handle);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ConvertError::Poll(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::Poll(format!(
                "Failed to check job status: {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| ConvertError::Poll(err.to_string()))?;
        let parsed: StatusResponse = serde_json::from_slice(&body)
            .map_err(|err| ConvertError::Poll(format!("malformed status response: {err}")))?;

        let urls = parsed.urls.map(artifact_urls).transpose()?;
        let status = match parsed.status {
            serde_json::Value::String(status) => status,
            other => other.to_string(),
        };
        Ok(JobStatus::from_wire(&status, urls, parsed.message))
    }
}

/// Keeps the backend's key order; every value has to be a string.
fn artifact_urls(
    urls: serde_json::Map<String, serde_json::Value>,
) -> Result<Vec<ArtifactUrl>, ConvertError> {
    urls.into_iter()
        .map(|(name, value)| match value {
            serde_json::Value::String(url) => Ok(ArtifactUrl::new(name, url)),
            other => Err(ConvertError::Poll(format!(
                "malformed status response: url for {name:?} is not a string: {other}"
            ))),
        })
        .collect()
}

fn parse_submission_body<T: serde::de::DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ConvertError> {
    serde_json::from_slice(body).map_err(|err| ConvertError::Submission {
        status: Some(status.as_u16()),
        message: format!("malformed job response: {err}"),
    })
}

/// Uses `{message}` from a structured body, else the status reason text.
fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_structured_message() {
        let message = rejection_message(StatusCode::BAD_REQUEST, br#"{"message":"no source"}"#);
        assert_eq!(message, "no source");
    }

    #[test]
    fn rejection_falls_back_to_reason_text() {
        let message = rejection_message(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        assert_eq!(message, "Bad Gateway");
    }

    #[test]
    fn request_bodies_match_the_wire_contract() {
        let upload = serde_json::to_value(CreateJobRequest::Upload {
            filename: "a.pdf",
            content_type: "application/pdf",
        })
        .unwrap();
        assert_eq!(
            upload,
            serde_json::json!({"filename": "a.pdf", "content_type": "application/pdf"})
        );

        let reference = serde_json::to_value(CreateJobRequest::Reference {
            source_url: "https://x/y.doc",
        })
        .unwrap();
        assert_eq!(reference, serde_json::json!({"source_url": "https://x/y.doc"}));
    }

    #[test]
    fn status_url_encodes_job_id() {
        let backend = BackendClient::new(&ClientSettings {
            api_url: "https://api.example.com/Prod/job".to_string(),
            ..ClientSettings::default()
        })
        .unwrap();
        let url = backend.status_url(&JobHandle::new("a b&c"));
        assert_eq!(url.as_str(), "https://api.example.com/Prod/job?job_id=a+b%26c");
    }
}
