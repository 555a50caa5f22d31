//! Convert engine: backend client, upload transport and the job polling driver.
mod api;
mod error;
mod poller;
mod scheduler;
mod settings;
mod sink;
mod submit;
mod transport;
mod workflow;

pub use api::{BackendClient, StatusSource, UploadTicket};
pub use error::ConvertError;
pub use poller::JobPoller;
pub use scheduler::{Scheduler, TokioScheduler};
pub use settings::{ClientSettings, DEFAULT_API_URL};
pub use sink::{DiscardSink, StatusSink};
pub use submit::SubmissionClient;
pub use transport::{ReqwestTransport, UploadTransport};
pub use workflow::ConversionWorkflow;
