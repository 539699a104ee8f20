//! Earn endpoints: task catalog, per-user completion status, and task completion.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::RestClient;
use crate::error::EarnError;

const TASKS_PATH: &str = "earn/tasks";
const USER_TASKS_PATH: &str = "earn/userTasks";
const COMPLETE_TASK_PATH: &str = "earn/completeTask";

/// A reward amount as the backend sends it: sometimes a string, sometimes a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RewardValue {
    Text(String),
    Number(serde_json::Number),
}

impl RewardValue {
    /// Empty strings and numeric zero count as "not set".
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        }
    }
}

impl std::fmt::Display for RewardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One task as listed by `GET earn/tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTask {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reward: Option<RewardValue>,
    #[serde(default)]
    pub reward1: Option<RewardValue>,
    #[serde(default)]
    pub reward2: Option<RewardValue>,
    #[serde(default)]
    pub reward3: Option<RewardValue>,
    #[serde(default)]
    pub reward_symbol: String,
    /// Remaining time in milliseconds.
    #[serde(default)]
    pub end_time: i64,
    #[serde(default)]
    pub total_clicks: i64,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub task_list: Vec<String>,
}

/// Payload of `GET earn/tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnCatalog {
    pub tasks: Vec<RawTask>,
    /// Caller's reward tier (1-3). Anything else means base rewards.
    #[serde(default)]
    pub user_level: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Completed,
    Pending,
    #[serde(other)]
    Unknown,
}

/// One entry of `GET earn/userTasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub task_id: i64,
    pub status: CompletionStatus,
}

impl TaskCompletion {
    pub fn is_completed(&self) -> bool {
        self.status == CompletionStatus::Completed
    }
}

/// Body of `POST earn/completeTask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteTaskRequest {
    pub id: i64,
    pub reward: String,
}

/// Successful acknowledgement of a completion claim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionAck {
    pub message: Option<String>,
    pub payload: Option<serde_json::Value>,
}

/// Backend operations behind the earn screen.
#[async_trait]
pub trait EarnApi: Send + Sync {
    /// Fetch the task catalog and the caller's reward tier.
    async fn fetch_catalog(&self) -> Result<EarnCatalog, EarnError>;

    /// Fetch which tasks the caller has already completed.
    async fn fetch_completion_status(&self) -> Result<Vec<TaskCompletion>, EarnError>;

    /// Claim completion of a task.
    async fn complete_task(&self, request: &CompleteTaskRequest) -> Result<CompletionAck, EarnError>;
}

#[async_trait]
impl EarnApi for RestClient {
    async fn fetch_catalog(&self) -> Result<EarnCatalog, EarnError> {
        self.get_envelope::<EarnCatalog>(TASKS_PATH)
            .await?
            .into_payload()
    }

    async fn fetch_completion_status(&self) -> Result<Vec<TaskCompletion>, EarnError> {
        self.get_envelope::<Vec<TaskCompletion>>(USER_TASKS_PATH)
            .await?
            .into_payload()
    }

    async fn complete_task(&self, request: &CompleteTaskRequest) -> Result<CompletionAck, EarnError> {
        let (payload, message) = self
            .post_envelope::<_, serde_json::Value>(COMPLETE_TASK_PATH, request)
            .await?
            .into_optional_payload()?;
        Ok(CompletionAck { message, payload })
    }
}
