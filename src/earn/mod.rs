//! Earn screen: task domain type and its reactive store.

mod store;
mod task;

pub use store::{CountdownState, EarnStore};
pub use task::{reward_amount, to_domain, EarnTask, RewardTier};
