use std::fmt;

/// Opaque backend-assigned identifier for one submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle {
    job_id: String,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.job_id)
    }
}

/// What the caller hands to the submission client. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionRequest {
    /// Fresh file bytes, written to a destination the backend hands out.
    Upload {
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
    /// A file that is already stored somewhere the backend can reach.
    Reference { source_url: String },
}

impl SubmissionRequest {
    pub fn upload(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self::Upload {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn reference(source_url: impl Into<String>) -> Self {
        Self::Reference {
            source_url: source_url.into(),
        }
    }

    pub fn mode(&self) -> SubmissionMode {
        match self {
            Self::Upload { .. } => SubmissionMode::Upload,
            Self::Reference { .. } => SubmissionMode::Reference,
        }
    }
}

/// The two mutually exclusive input sections. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionMode {
    #[default]
    Upload,
    Reference,
}

impl SubmissionMode {
    /// Maps a selector value to a mode: `"0"` is upload, anything else is a reference.
    pub fn from_choice(choice: &str) -> Self {
        if choice.trim() == "0" {
            Self::Upload
        } else {
            Self::Reference
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Upload => Self::Reference,
            Self::Reference => Self::Upload,
        }
    }

    pub fn upload_active(self) -> bool {
        self == Self::Upload
    }

    pub fn reference_active(self) -> bool {
        self == Self::Reference
    }
}
