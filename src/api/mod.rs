//! Backend API clients.
//!
//! Every endpoint answers with an [`Envelope`]; failures of any kind come back as
//! [`EarnError`](crate::error::EarnError) values rather than panics. The traits are
//! the injection seam the stores depend on, so tests can swap in fakes.

mod client;
mod earn;
mod envelope;
mod leaders;

pub use client::RestClient;
pub use earn::{
    CompleteTaskRequest, CompletionAck, CompletionStatus, EarnApi, EarnCatalog, RawTask,
    RewardValue, TaskCompletion,
};
pub use envelope::Envelope;
pub use leaders::{LeaderboardPayload, LeadersApi, RawLeader};
