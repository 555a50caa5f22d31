use std::time::Duration;

use crate::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEffect {
    /// Issue exactly one status query for the job.
    Query,
    /// Sleep for the given duration, then deliver `PollMsg::Due`.
    Wait(Duration),
    Notify(Notification),
}
