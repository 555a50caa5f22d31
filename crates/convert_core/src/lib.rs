//! Convert core: pure job polling state machine and view-model helpers.
mod effect;
mod msg;
mod notification;
mod request;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::PollEffect;
pub use msg::PollMsg;
pub use notification::{should_notify, waiting_text, Notification};
pub use request::{JobHandle, SubmissionMode, SubmissionRequest};
pub use state::{PollOutcome, PollSettings, PollState};
pub use status::{ArtifactUrl, JobStatus};
pub use update::update;
pub use view_model::{result_links, ResultLink, StatusView};
