use std::time::Duration;

use thiserror::Error;

/// Every way a conversion workflow can end without result links.
///
/// All of these are terminal for the job at hand; nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The backend rejected the job request.
    #[error("Failed to submit job: Status={}, message={message}", describe_status(.status))]
    Submission { status: Option<u16>, message: String },
    /// Writing the file bytes to the destination failed.
    #[error("Failed to upload file to destination: {message}")]
    Transport { status: Option<u16>, message: String },
    /// A status query failed or returned malformed data.
    #[error("Error checking job status: {0}")]
    Poll(String),
    /// The backend reported that the job itself failed.
    #[error("{0}")]
    Job(String),
    #[error("Polling stopped after {0:?} without a terminal job status")]
    Timeout(Duration),
    #[error("job {0} is already being polled")]
    AlreadyPolling(String),
    #[error("client setup failed: {0}")]
    Client(String),
}

impl ConvertError {
    pub(crate) fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// HTTP status attached to the failure, if the server answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Submission { status, .. } | Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}
