use std::time::Duration;

use crate::{JobHandle, JobStatus, ResultLink};

/// Default gap between two status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5_000);
/// Default total polling budget per job.
pub const DEFAULT_MAX_POLL_DURATION: Duration = Duration::from_millis(120_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_duration: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_duration: DEFAULT_MAX_POLL_DURATION,
        }
    }
}

/// How a poll loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded(Vec<ResultLink>),
    JobFailed(String),
    QueryFailed(String),
    TimedOut(Duration),
}

/// State owned by the polling loop of a single job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    handle: JobHandle,
    elapsed: Duration,
    polls: u32,
    last_status: Option<JobStatus>,
    outcome: Option<PollOutcome>,
}

impl PollState {
    pub fn new(handle: JobHandle) -> Self {
        Self {
            handle,
            elapsed: Duration::ZERO,
            polls: 0,
            last_status: None,
            outcome: None,
        }
    }

    pub fn handle(&self) -> &JobHandle {
        &self.handle
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of status queries requested so far.
    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn last_status(&self) -> Option<&JobStatus> {
        self.last_status.as_ref()
    }

    pub fn outcome(&self) -> Option<&PollOutcome> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<PollOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub(crate) fn record_query(&mut self) {
        self.polls += 1;
    }

    /// Elapsed time only moves forward and never passes the deadline.
    pub(crate) fn advance(&mut self, interval: Duration, deadline: Duration) {
        self.elapsed = self.elapsed.saturating_add(interval).min(deadline).max(self.elapsed);
    }

    pub(crate) fn remember(&mut self, status: JobStatus) {
        self.last_status = Some(status);
    }

    pub(crate) fn finish(&mut self, outcome: PollOutcome) {
        self.outcome = Some(outcome);
    }
}
