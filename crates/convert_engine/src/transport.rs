use async_trait::async_trait;
use bytes::Bytes;
use convert_logging::{convert_info, convert_warn};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{ClientSettings, ConvertError};

/// Writes file bytes straight to a pre-authorized destination.
///
/// One attempt per call; a failed write is returned, never retried.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn write_to(
        &self,
        destination: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<(), ConvertError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self, ConvertError> {
        Ok(Self {
            client: settings.build_client(settings.upload_timeout)?,
        })
    }
}

#[async_trait]
impl UploadTransport for ReqwestTransport {
    async fn write_to(
        &self,
        destination: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<(), ConvertError> {
        let url = Url::parse(destination).map_err(|err| {
            ConvertError::transport(None, format!("invalid destination url: {err}"))
        })?;
        let len = bytes.len();

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|err| ConvertError::transport(None, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            convert_warn!("Destination write rejected status={}", status);
            return Err(ConvertError::transport(
                Some(status.as_u16()),
                status.to_string(),
            ));
        }

        convert_info!("Wrote {} bytes to destination", len);
        Ok(())
    }
}
