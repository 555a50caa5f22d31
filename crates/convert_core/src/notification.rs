use std::time::Duration;

use crate::{JobStatus, ResultLink};

const STARTED_TEXT: &str = "Job started successfully. Please wait...";
const IN_PROGRESS_TEXT: &str = "Job is in progress...";
const COMPLETED_TEXT: &str = "Job completed successfully:";

/// A single update for the presentation sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A submission phase; starts a fresh run, so any earlier links are dropped.
    Stage(String),
    /// The job is still running.
    Waiting(String),
    Completed { links: Vec<ResultLink> },
    Failed { message: String },
    TimedOut { after: Duration },
}

impl Notification {
    pub fn stage(text: impl Into<String>) -> Self {
        Self::Stage(text.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn status_text(&self) -> String {
        match self {
            Self::Stage(text) | Self::Waiting(text) => text.clone(),
            Self::Completed { .. } => COMPLETED_TEXT.to_string(),
            Self::Failed { message } => message.clone(),
            Self::TimedOut { after } => format!(
                "Polling stopped after {}. Please try again later.",
                describe_duration(*after)
            ),
        }
    }
}

/// The in-progress text for a non-terminal status, `None` for terminal ones.
pub fn waiting_text(status: &JobStatus) -> Option<&'static str> {
    match status {
        JobStatus::Started => Some(STARTED_TEXT),
        JobStatus::InProgress | JobStatus::Unknown(_) => Some(IN_PROGRESS_TEXT),
        JobStatus::Success(_) | JobStatus::Error(_) => None,
    }
}

/// Coalescing rule: a waiting notification is suppressed when the previous
/// status rendered the same text.
pub fn should_notify(previous: Option<&JobStatus>, current: &JobStatus) -> bool {
    match (previous.and_then(waiting_text), waiting_text(current)) {
        (Some(before), Some(now)) => before != now,
        _ => true,
    }
}

fn describe_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 && secs % 60 == 0 && duration.subsec_nanos() == 0 {
        let minutes = secs / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else if duration.subsec_millis() == 0 {
        format!("{secs} seconds")
    } else {
        format!("{} ms", duration.as_millis())
    }
}
