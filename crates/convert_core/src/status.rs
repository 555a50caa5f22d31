/// Fallback message when the backend reports an error without one.
pub(crate) const MISSING_ERROR_MESSAGE: &str = "Job failed without a message";

/// One named result artifact, in the order the backend listed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactUrl {
    pub name: String,
    pub url: String,
}

impl ArtifactUrl {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Started,
    InProgress,
    Success(Vec<ArtifactUrl>),
    Error(String),
    /// Unrecognized status string; polled like `InProgress`.
    Unknown(String),
}

impl JobStatus {
    /// Interprets the fields of a status response.
    pub fn from_wire(status: &str, urls: Option<Vec<ArtifactUrl>>, message: Option<String>) -> Self {
        match status {
            "started" => Self::Started,
            "in_progress" => Self::InProgress,
            // `urls` is optional on the wire; a success without it has no links.
            "success" => Self::Success(urls.unwrap_or_default()),
            "error" => Self::Error(
                message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| MISSING_ERROR_MESSAGE.to_string()),
            ),
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_status_is_kept_raw() {
        assert_eq!(
            JobStatus::from_wire("queued", None, None),
            JobStatus::Unknown("queued".to_string())
        );
        assert!(!JobStatus::Unknown("queued".to_string()).is_terminal());
    }

    #[test]
    fn error_without_message_gets_fallback() {
        assert_eq!(
            JobStatus::from_wire("error", None, Some("  ".to_string())),
            JobStatus::Error(MISSING_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn success_without_urls_is_empty() {
        assert_eq!(
            JobStatus::from_wire("success", None, None),
            JobStatus::Success(Vec::new())
        );
    }
}
