use std::sync::Once;
use std::time::Duration;

use convert_core::{
    update, ArtifactUrl, JobHandle, JobStatus, Notification, PollEffect, PollMsg, PollOutcome,
    PollSettings, PollState, ResultLink,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(convert_logging::initialize_for_tests);
}

fn fresh() -> PollState {
    PollState::new(JobHandle::new("abc"))
}

fn notifications(effects: &[PollEffect]) -> Vec<Notification> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            PollEffect::Notify(n) => Some(n.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn first_due_queries_immediately_at_zero() {
    init_logging();
    let settings = PollSettings::default();
    let state = fresh();
    assert_eq!(state.elapsed(), Duration::ZERO);

    let (state, effects) = update(state, PollMsg::Due, &settings);
    assert_eq!(effects, vec![PollEffect::Query]);
    assert_eq!(state.elapsed(), Duration::ZERO);
    assert_eq!(state.polls(), 1);
    assert!(!state.is_finished());
}

#[test]
fn started_schedules_next_poll_after_interval() {
    init_logging();
    let settings = PollSettings::default();
    let (state, _) = update(fresh(), PollMsg::Due, &settings);
    let (state, effects) = update(state, PollMsg::Status(JobStatus::Started), &settings);

    assert_eq!(
        effects,
        vec![
            PollEffect::Notify(Notification::Waiting(
                "Job started successfully. Please wait...".to_string()
            )),
            PollEffect::Wait(Duration::from_millis(5_000)),
        ]
    );
    assert_eq!(state.elapsed(), Duration::from_millis(5_000));
}

#[test]
fn consecutive_started_responses_notify_once() {
    init_logging();
    let settings = PollSettings::default();
    let mut state = fresh();
    let mut all = Vec::new();
    for _ in 0..2 {
        let (next, _) = update(state, PollMsg::Due, &settings);
        let (next, effects) = update(next, PollMsg::Status(JobStatus::Started), &settings);
        all.extend(notifications(&effects));
        state = next;
    }

    assert_eq!(
        all,
        vec![Notification::Waiting(
            "Job started successfully. Please wait...".to_string()
        )]
    );
}

#[test]
fn unknown_status_keeps_polling_with_in_progress_text() {
    init_logging();
    let settings = PollSettings::default();
    let (state, _) = update(fresh(), PollMsg::Due, &settings);
    let (state, effects) = update(state, PollMsg::Status(JobStatus::Started), &settings);
    assert_eq!(notifications(&effects).len(), 1);

    let (state, _) = update(state, PollMsg::Due, &settings);
    let (state, effects) = update(
        state,
        PollMsg::Status(JobStatus::Unknown("converting".to_string())),
        &settings,
    );
    assert_eq!(
        effects,
        vec![
            PollEffect::Notify(Notification::Waiting("Job is in progress...".to_string())),
            PollEffect::Wait(settings.interval),
        ]
    );

    // A different unrecognized string renders the same text, so it is coalesced.
    let (state, _) = update(state, PollMsg::Due, &settings);
    let (_state, effects) = update(state, PollMsg::Status(JobStatus::InProgress), &settings);
    assert_eq!(effects, vec![PollEffect::Wait(settings.interval)]);
}

#[test]
fn elapsed_grows_by_exactly_one_interval_per_non_terminal_response() {
    init_logging();
    let settings = PollSettings::default();
    let mut state = fresh();
    let mut seen = vec![state.elapsed()];

    for _ in 0..6 {
        let (next, _) = update(state, PollMsg::Due, &settings);
        let (next, _) = update(next, PollMsg::Status(JobStatus::Started), &settings);
        seen.push(next.elapsed());
        state = next;
    }

    for pair in seen.windows(2) {
        assert_eq!(pair[1] - pair[0], settings.interval);
    }
}

#[test]
fn deadline_reached_times_out_without_query() {
    init_logging();
    let settings = PollSettings::default();
    let mut state = fresh();
    let mut queries = 0;

    loop {
        let (next, effects) = update(state, PollMsg::Due, &settings);
        state = next;
        if effects.contains(&PollEffect::Query) {
            queries += 1;
            let (next, _) = update(state, PollMsg::Status(JobStatus::Started), &settings);
            state = next;
        } else {
            assert_eq!(
                effects,
                vec![PollEffect::Notify(Notification::TimedOut {
                    after: Duration::from_millis(120_000)
                })]
            );
            break;
        }
    }

    assert_eq!(queries, 24);
    assert_eq!(state.elapsed(), settings.max_duration);
    assert_eq!(
        state.outcome(),
        Some(&PollOutcome::TimedOut(Duration::from_millis(120_000)))
    );
}

#[test]
fn elapsed_never_passes_the_deadline() {
    init_logging();
    let settings = PollSettings {
        interval: Duration::from_millis(7),
        max_duration: Duration::from_millis(10),
    };
    let (state, _) = update(fresh(), PollMsg::Due, &settings);
    let (state, _) = update(state, PollMsg::Status(JobStatus::Started), &settings);
    let (state, _) = update(state, PollMsg::Due, &settings);
    let (state, _) = update(state, PollMsg::Status(JobStatus::Started), &settings);

    assert_eq!(state.elapsed(), Duration::from_millis(10));
    let (state, effects) = update(state, PollMsg::Due, &settings);
    assert!(state.is_finished());
    assert!(!effects.contains(&PollEffect::Query));
}

#[test]
fn success_renders_links_in_received_order() {
    init_logging();
    let settings = PollSettings::default();
    let urls = vec![ArtifactUrl::new("input", "u1"), ArtifactUrl::new("pdf", "u2")];
    let (state, _) = update(fresh(), PollMsg::Due, &settings);
    let (state, effects) = update(state, PollMsg::Status(JobStatus::Success(urls)), &settings);

    let links = vec![
        ResultLink {
            label: "INPUT file".to_string(),
            url: "u1".to_string(),
        },
        ResultLink {
            label: "PDF output".to_string(),
            url: "u2".to_string(),
        },
    ];
    assert_eq!(
        effects,
        vec![PollEffect::Notify(Notification::Completed {
            links: links.clone()
        })]
    );
    assert_eq!(state.into_outcome(), Some(PollOutcome::Succeeded(links)));
}

#[test]
fn job_error_stops_with_backend_message() {
    init_logging();
    let settings = PollSettings::default();
    let (state, _) = update(fresh(), PollMsg::Due, &settings);
    let (state, effects) = update(
        state,
        PollMsg::Status(JobStatus::Error("bad format".to_string())),
        &settings,
    );

    assert_eq!(effects, vec![PollEffect::Notify(Notification::failed("bad format"))]);
    assert_eq!(
        state.outcome(),
        Some(&PollOutcome::JobFailed("bad format".to_string()))
    );
}

#[test]
fn query_failure_stops_without_retry() {
    init_logging();
    let settings = PollSettings::default();
    let (state, _) = update(fresh(), PollMsg::Due, &settings);
    let (state, effects) = update(
        state,
        PollMsg::QueryFailed("connection refused".to_string()),
        &settings,
    );

    assert_eq!(
        effects,
        vec![PollEffect::Notify(Notification::failed(
            "Error checking job status: connection refused"
        ))]
    );
    assert!(state.is_finished());
}

#[test]
fn finished_state_ignores_further_messages() {
    init_logging();
    let settings = PollSettings::default();
    let (state, _) = update(fresh(), PollMsg::Due, &settings);
    let (state, _) = update(
        state,
        PollMsg::Status(JobStatus::Error("boom".to_string())),
        &settings,
    );

    let (next, effects) = update(state.clone(), PollMsg::Due, &settings);
    assert_eq!(state, next);
    assert!(effects.is_empty());
}
