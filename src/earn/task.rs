//! Earn task domain type and normalisation from the raw catalog.

use serde::{Deserialize, Serialize};

use crate::api::{EarnCatalog, RawTask, RewardValue, TaskCompletion};

/// User tier selecting one of the three per-task reward amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardTier {
    One,
    Two,
    Three,
}

impl RewardTier {
    /// Map the backend's `user_level`. Levels outside 1-3 have no tier.
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    /// The tiered reward field this tier reads.
    fn reward_of<'a>(&self, raw: &'a RawTask) -> Option<&'a RewardValue> {
        match self {
            Self::One => raw.reward1.as_ref(),
            Self::Two => raw.reward2.as_ref(),
            Self::Three => raw.reward3.as_ref(),
        }
    }
}

/// A task as shown on the earn screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnTask {
    pub id: i64,
    pub avatar: String,
    pub name: String,
    pub description: String,
    /// `"<value> <symbol>"`, fixed at fetch time.
    pub amount: String,
    /// Remaining countdown in milliseconds. Can go negative.
    pub time: i64,
    pub tasks: Vec<String>,
    pub link: String,
    pub participants: i64,
    pub completed: bool,
}

/// Reward string for `raw` at `tier`, falling back to the base reward when the
/// tiered amount is missing or falsy.
pub fn reward_amount(raw: &RawTask, tier: Option<RewardTier>) -> String {
    let tiered = tier
        .and_then(|t| t.reward_of(raw))
        .filter(|v| v.is_truthy());
    let value = tiered
        .or(raw.reward.as_ref())
        .map(|v| v.to_string())
        .unwrap_or_default();
    format!("{} {}", value, raw.reward_symbol)
}

impl EarnTask {
    fn from_raw(raw: RawTask, tier: Option<RewardTier>, completed: bool) -> Self {
        let amount = reward_amount(&raw, tier);
        Self {
            id: raw.id,
            avatar: raw.image_link,
            name: raw.name,
            description: raw.description,
            amount,
            time: raw.end_time,
            tasks: raw.task_list,
            link: raw.link,
            participants: raw.total_clicks,
            completed,
        }
    }
}

/// Merge the catalog with completion statuses into the displayed task list.
///
/// Catalog order is preserved. A task is completed when any status entry with
/// its id says "completed".
pub fn to_domain(catalog: EarnCatalog, statuses: &[TaskCompletion]) -> Vec<EarnTask> {
    let tier = RewardTier::from_level(catalog.user_level);
    catalog
        .tasks
        .into_iter()
        .map(|raw| {
            let completed = statuses
                .iter()
                .any(|s| s.task_id == raw.id && s.is_completed());
            EarnTask::from_raw(raw, tier, completed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CompletionStatus;

    fn raw(id: i64) -> RawTask {
        RawTask {
            id,
            name: format!("Task {}", id),
            description: "desc".into(),
            reward: Some(RewardValue::Text("100".into())),
            reward1: Some(RewardValue::Text("150".into())),
            reward2: Some(RewardValue::Number(200.into())),
            reward3: None,
            reward_symbol: "DROPS".into(),
            end_time: 5000,
            total_clicks: 3,
            link: "https://x".into(),
            image_link: "https://img".into(),
            task_list: vec!["step".into()],
        }
    }

    #[test]
    fn test_tiered_rewards() {
        let task = raw(1);
        assert_eq!(reward_amount(&task, RewardTier::from_level(1)), "150 DROPS");
        assert_eq!(reward_amount(&task, RewardTier::from_level(2)), "200 DROPS");
        // reward3 absent -> base reward
        assert_eq!(reward_amount(&task, RewardTier::from_level(3)), "100 DROPS");
        assert_eq!(reward_amount(&task, RewardTier::from_level(0)), "100 DROPS");
    }

    #[test]
    fn test_falsy_tier_falls_back() {
        let mut task = raw(1);
        task.reward1 = Some(RewardValue::Text(String::new()));
        task.reward2 = Some(RewardValue::Number(0.into()));
        assert_eq!(reward_amount(&task, Some(RewardTier::One)), "100 DROPS");
        assert_eq!(reward_amount(&task, Some(RewardTier::Two)), "100 DROPS");
    }

    #[test]
    fn test_merge_completion() {
        let catalog = EarnCatalog {
            tasks: vec![raw(1), raw(2)],
            user_level: 1,
        };
        let statuses = vec![TaskCompletion {
            task_id: 1,
            status: CompletionStatus::Completed,
        }];

        let list = to_domain(catalog, &statuses);
        assert_eq!(list.len(), 2);
        assert!(list[0].completed);
        assert!(!list[1].completed);
    }

    #[test]
    fn test_pending_status_not_completed() {
        let catalog = EarnCatalog {
            tasks: vec![raw(1)],
            user_level: 2,
        };
        let statuses = vec![TaskCompletion {
            task_id: 1,
            status: CompletionStatus::Pending,
        }];

        let list = to_domain(catalog, &statuses);
        assert!(!list[0].completed);
    }

    #[test]
    fn test_field_mapping() {
        let catalog = EarnCatalog {
            tasks: vec![raw(7)],
            user_level: 2,
        };
        let task = to_domain(catalog, &[]).remove(0);
        assert_eq!(
            task,
            EarnTask {
                id: 7,
                avatar: "https://img".into(),
                name: "Task 7".into(),
                description: "desc".into(),
                amount: "200 DROPS".into(),
                time: 5000,
                tasks: vec!["step".into()],
                link: "https://x".into(),
                participants: 3,
                completed: false,
            }
        );
    }
}
