use crate::JobStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollMsg {
    /// The next poll is due (initially, and after every wait).
    Due,
    /// A status query returned and was parsed.
    Status(JobStatus),
    /// A status query failed at the network or parse level.
    QueryFailed(String),
}
