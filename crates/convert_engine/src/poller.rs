use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use convert_core::{
    update, JobHandle, PollEffect, PollMsg, PollOutcome, PollSettings, PollState, ResultLink,
};
use convert_logging::{convert_debug, convert_info, convert_warn};

use crate::{ConvertError, Scheduler, StatusSink, StatusSource};

type ActiveJobs = Arc<Mutex<HashSet<String>>>;

/// Follows a job until the backend reports a terminal status or the budget runs out.
///
/// Polls for one job are strictly sequential. A second loop for a job that is
/// already being polled is refused.
pub struct JobPoller {
    source: Arc<dyn StatusSource>,
    scheduler: Arc<dyn Scheduler>,
    settings: PollSettings,
    active: ActiveJobs,
}

impl JobPoller {
    pub fn new(
        source: Arc<dyn StatusSource>,
        scheduler: Arc<dyn Scheduler>,
        settings: PollSettings,
    ) -> Self {
        Self {
            source,
            scheduler,
            settings,
            active: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn is_polling(&self, handle: &JobHandle) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(handle.job_id())
    }

    pub async fn poll(
        &self,
        handle: JobHandle,
        sink: &dyn StatusSink,
    ) -> Result<Vec<ResultLink>, ConvertError> {
        let _guard = ActivePoll::register(&self.active, &handle)?;
        convert_info!(
            "Polling job_id={} every {:?} for at most {:?}",
            handle,
            self.settings.interval,
            self.settings.max_duration
        );

        let mut state = PollState::new(handle);
        let mut inbox = VecDeque::from([PollMsg::Due]);

        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg, &self.settings);
            state = next;

            for effect in effects {
                match effect {
                    PollEffect::Query => {
                        let reply = match self.source.job_status(state.handle()).await {
                            Ok(status) => {
                                convert_debug!(
                                    "job_id={} poll={} elapsed={:?} status={:?}",
                                    state.handle(),
                                    state.polls(),
                                    state.elapsed(),
                                    status
                                );
                                PollMsg::Status(status)
                            }
                            Err(err) => PollMsg::QueryFailed(query_failure_reason(err)),
                        };
                        inbox.push_back(reply);
                    }
                    PollEffect::Wait(duration) => {
                        self.scheduler.sleep(duration).await;
                        inbox.push_back(PollMsg::Due);
                    }
                    PollEffect::Notify(notification) => sink.notify(notification),
                }
            }
        }

        let job_id = state.handle().job_id().to_string();
        match state.into_outcome() {
            Some(PollOutcome::Succeeded(links)) => {
                convert_info!("Job {} succeeded with {} links", job_id, links.len());
                Ok(links)
            }
            Some(PollOutcome::JobFailed(message)) => {
                convert_warn!("Job {} failed: {}", job_id, message);
                Err(ConvertError::Job(message))
            }
            Some(PollOutcome::QueryFailed(reason)) => {
                convert_warn!("Status query for job {} failed: {}", job_id, reason);
                Err(ConvertError::Poll(reason))
            }
            Some(PollOutcome::TimedOut(after)) => {
                convert_warn!("Gave up on job {} after {:?}", job_id, after);
                Err(ConvertError::Timeout(after))
            }
            None => Err(ConvertError::Poll(format!(
                "poll loop for job {job_id} ended without a terminal state"
            ))),
        }
    }
}

fn query_failure_reason(err: ConvertError) -> String {
    match err {
        ConvertError::Poll(reason) => reason,
        other => other.to_string(),
    }
}

/// Registration of one running poll loop; removed again on drop.
struct ActivePoll {
    active: ActiveJobs,
    job_id: String,
}

impl ActivePoll {
    fn register(active: &ActiveJobs, handle: &JobHandle) -> Result<Self, ConvertError> {
        let mut jobs = active.lock().unwrap_or_else(PoisonError::into_inner);
        if !jobs.insert(handle.job_id().to_string()) {
            return Err(ConvertError::AlreadyPolling(handle.job_id().to_string()));
        }
        Ok(Self {
            active: Arc::clone(active),
            job_id: handle.job_id().to_string(),
        })
    }
}

impl Drop for ActivePoll {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.job_id);
    }
}
