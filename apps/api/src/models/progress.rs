use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One `user_progress` row per (user, plan), created alongside the plan.
///
/// `completed_tasks` is stored as a Postgres TEXT[] but all domain logic
/// treats it as a set: membership only, duplicates never written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub completed_tasks: Vec<String>,
    pub overall_completion_percentage: i32,
    pub last_activity_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProgressRow {
    /// Completed task ids as the set the transitions operate on.
    pub fn completed_set(&self) -> BTreeSet<String> {
        self.completed_tasks.iter().cloned().collect()
    }
}
