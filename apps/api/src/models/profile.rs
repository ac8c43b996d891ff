use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub full_name: String,
    pub target_role: Option<String>,
    pub location: Option<String>,
    pub study_hours_per_week: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// A recorded skill. `proficiency_level` is a 1–5 self-rating; the match
/// scorer only counts levels at or above its held threshold.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub proficiency_level: i16,
    pub created_at: DateTime<Utc>,
}
