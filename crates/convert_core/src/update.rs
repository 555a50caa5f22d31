use crate::notification::should_notify;
use crate::{
    result_links, waiting_text, JobStatus, Notification, PollEffect, PollMsg, PollOutcome,
    PollSettings, PollState,
};

const QUERY_FAILED_PREFIX: &str = "Error checking job status: ";

/// Pure update function: applies a message to the poll state and returns any effects.
///
/// The caller runs effects in order and feeds their results back in as messages,
/// so polls for one job never overlap.
pub fn update(
    mut state: PollState,
    msg: PollMsg,
    settings: &PollSettings,
) -> (PollState, Vec<PollEffect>) {
    if state.is_finished() {
        return (state, Vec::new());
    }

    let effects = match msg {
        PollMsg::Due => {
            if state.elapsed() >= settings.max_duration {
                let after = state.elapsed();
                state.finish(PollOutcome::TimedOut(after));
                vec![PollEffect::Notify(Notification::TimedOut { after })]
            } else {
                state.record_query();
                vec![PollEffect::Query]
            }
        }
        PollMsg::Status(JobStatus::Success(urls)) => {
            let links = result_links(&urls);
            state.finish(PollOutcome::Succeeded(links.clone()));
            state.remember(JobStatus::Success(urls));
            vec![PollEffect::Notify(Notification::Completed { links })]
        }
        PollMsg::Status(JobStatus::Error(message)) => {
            state.finish(PollOutcome::JobFailed(message.clone()));
            state.remember(JobStatus::Error(message.clone()));
            vec![PollEffect::Notify(Notification::Failed { message })]
        }
        PollMsg::Status(status) => {
            let mut effects = Vec::with_capacity(2);
            if should_notify(state.last_status(), &status) {
                if let Some(text) = waiting_text(&status) {
                    effects.push(PollEffect::Notify(Notification::Waiting(text.to_string())));
                }
            }
            state.advance(settings.interval, settings.max_duration);
            state.remember(status);
            effects.push(PollEffect::Wait(settings.interval));
            effects
        }
        PollMsg::QueryFailed(reason) => {
            let message = format!("{QUERY_FAILED_PREFIX}{reason}");
            state.finish(PollOutcome::QueryFailed(reason));
            vec![PollEffect::Notify(Notification::Failed { message })]
        }
    };

    (state, effects)
}
