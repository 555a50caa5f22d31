use std::sync::Arc;

use bytes::Bytes;
use convert_core::{JobHandle, Notification, SubmissionRequest};
use convert_logging::{convert_info, convert_warn};

use crate::{
    BackendClient, ClientSettings, ConvertError, DiscardSink, ReqwestTransport, StatusSink,
    UploadTransport,
};

const STAGE_REQUEST_DESTINATION: &str = "Getting presigned URL to upload file...";
const STAGE_UPLOADING: &str = "Uploading file...";
const STAGE_UPLOADED: &str = "File uploaded successfully. Checking job status...";
const STAGE_SUBMITTING_REFERENCE: &str = "Submitting existing file URL...";
const STAGE_REFERENCE_SUBMITTED: &str = "File URL submitted successfully. Checking job status...";

/// Turns a submission into a job handle the poller can follow.
pub struct SubmissionClient {
    backend: BackendClient,
    transport: Arc<dyn UploadTransport>,
}

impl SubmissionClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ConvertError> {
        Ok(Self::with_transport(
            BackendClient::new(settings)?,
            Arc::new(ReqwestTransport::new(settings)?),
        ))
    }

    pub fn with_transport(backend: BackendClient, transport: Arc<dyn UploadTransport>) -> Self {
        Self { backend, transport }
    }

    /// Creates an upload job, then writes `bytes` to the destination it names.
    ///
    /// The handle is only returned once the write has succeeded. A failed write
    /// may leave a job record behind on the backend; it is not cleaned up.
    pub async fn submit_upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: impl Into<Bytes>,
    ) -> Result<JobHandle, ConvertError> {
        self.upload(filename, content_type, bytes.into(), &DiscardSink)
            .await
    }

    /// Creates a job for a file the backend can already reach.
    pub async fn submit_reference(&self, source_url: &str) -> Result<JobHandle, ConvertError> {
        self.reference(source_url, &DiscardSink).await
    }

    /// Dispatches on the request kind and reports each stage to `sink`.
    pub async fn submit(
        &self,
        request: SubmissionRequest,
        sink: &dyn StatusSink,
    ) -> Result<JobHandle, ConvertError> {
        match request {
            SubmissionRequest::Upload {
                filename,
                content_type,
                bytes,
            } => {
                self.upload(&filename, &content_type, Bytes::from(bytes), sink)
                    .await
            }
            SubmissionRequest::Reference { source_url } => {
                self.reference(&source_url, sink).await
            }
        }
    }

    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Bytes,
        sink: &dyn StatusSink,
    ) -> Result<JobHandle, ConvertError> {
        sink.notify(Notification::stage(STAGE_REQUEST_DESTINATION));
        let ticket = self
            .backend
            .create_upload_job(filename, content_type)
            .await?;
        convert_info!(
            "Upload job created job_id={} filename={} bytes={}",
            ticket.handle,
            filename,
            bytes.len()
        );

        sink.notify(Notification::stage(STAGE_UPLOADING));
        if let Err(err) = self
            .transport
            .write_to(&ticket.destination, content_type, bytes)
            .await
        {
            convert_warn!(
                "Upload failed after job creation job_id={}: {}",
                ticket.handle,
                err
            );
            return Err(err);
        }

        sink.notify(Notification::stage(STAGE_UPLOADED));
        Ok(ticket.handle)
    }

    async fn reference(
        &self,
        source_url: &str,
        sink: &dyn StatusSink,
    ) -> Result<JobHandle, ConvertError> {
        sink.notify(Notification::stage(STAGE_SUBMITTING_REFERENCE));
        let handle = self.backend.create_reference_job(source_url).await?;
        convert_info!("Reference job created job_id={} source={}", handle, source_url);
        sink.notify(Notification::stage(STAGE_REFERENCE_SUBMITTED));
        Ok(handle)
    }
}
