#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use convert_core::{Notification, PollSettings, StatusView};
use convert_engine::{
    BackendClient, ClientSettings, ConversionWorkflow, JobPoller, ReqwestTransport, Scheduler,
    StatusSink, SubmissionClient,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(convert_logging::initialize_for_tests);
}

/// Collects notifications and keeps a rendered view alongside.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Notification>>,
    view: Mutex<StatusView>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap().clone()
    }

    pub fn view(&self) -> StatusView {
        self.view.lock().unwrap().clone()
    }
}

impl StatusSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.view.lock().unwrap().apply(&notification);
        self.events.lock().unwrap().push(notification);
    }
}

/// Returns immediately and remembers every requested wait.
#[derive(Default)]
pub struct InstantScheduler {
    waits: Mutex<Vec<Duration>>,
}

impl InstantScheduler {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scheduler for InstantScheduler {
    async fn sleep(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

pub fn settings_for(api_url: String) -> ClientSettings {
    ClientSettings {
        api_url,
        ..ClientSettings::default()
    }
}

pub fn job_url(server_uri: &str) -> String {
    format!("{server_uri}/Prod/job")
}

pub fn backend(server_uri: &str) -> BackendClient {
    BackendClient::new(&settings_for(job_url(server_uri))).expect("backend client")
}

pub fn poller(server_uri: &str, scheduler: Arc<InstantScheduler>) -> JobPoller {
    JobPoller::new(
        Arc::new(backend(server_uri)),
        scheduler,
        PollSettings::default(),
    )
}

pub fn workflow(server_uri: &str, scheduler: Arc<InstantScheduler>) -> ConversionWorkflow {
    let settings = settings_for(job_url(server_uri));
    let submission = SubmissionClient::with_transport(
        backend(server_uri),
        Arc::new(ReqwestTransport::new(&settings).expect("transport")),
    );
    ConversionWorkflow::from_parts(submission, poller(server_uri, scheduler))
}

/// An address nothing listens on: bound once, then released.
pub fn closed_port_uri() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
