use std::sync::Arc;

use convert_core::{Notification, PollSettings, ResultLink, SubmissionMode, SubmissionRequest};
use convert_logging::convert_error;

use crate::{
    BackendClient, ClientSettings, ConvertError, JobPoller, ReqwestTransport, StatusSink,
    SubmissionClient, TokioScheduler,
};

/// Submission followed by polling, with every step reported to a sink.
pub struct ConversionWorkflow {
    submission: SubmissionClient,
    poller: JobPoller,
}

impl ConversionWorkflow {
    pub fn new(client: &ClientSettings, poll: PollSettings) -> Result<Self, ConvertError> {
        let backend = BackendClient::new(client)?;
        let transport = Arc::new(ReqwestTransport::new(client)?);
        let poller = JobPoller::new(Arc::new(backend.clone()), Arc::new(TokioScheduler), poll);
        Ok(Self::from_parts(
            SubmissionClient::with_transport(backend, transport),
            poller,
        ))
    }

    pub fn from_parts(submission: SubmissionClient, poller: JobPoller) -> Self {
        Self { submission, poller }
    }

    /// Runs one request to a terminal state and returns the result links.
    ///
    /// Submission and upload failures are rendered to `sink` here; polling
    /// failures are rendered by the poll loop itself.
    pub async fn run(
        &self,
        request: SubmissionRequest,
        sink: &dyn StatusSink,
    ) -> Result<Vec<ResultLink>, ConvertError> {
        let mode = request.mode();
        let handle = match self.submission.submit(request, sink).await {
            Ok(handle) => handle,
            Err(err) => {
                convert_error!("Submission failed: {}", err);
                sink.notify(Notification::failed(submission_failure_text(mode, &err)));
                return Err(err);
            }
        };

        self.poller.poll(handle, sink).await
    }
}

fn submission_failure_text(mode: SubmissionMode, err: &ConvertError) -> String {
    match (mode, err) {
        (_, ConvertError::Transport { .. }) => format!("Error uploading file: {err}"),
        (SubmissionMode::Upload, _) => format!("Error submitting file: {err}"),
        (SubmissionMode::Reference, _) => format!("Error submitting file URL: {err}"),
    }
}
