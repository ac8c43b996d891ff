use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Raw `learning_plans` row. `plan_data` holds the plan document as JSONB;
/// it is parsed into a typed `LearningPlan` at the store boundary and never
/// handed to callers as a loose `Value`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub duration_weeks: i32,
    pub total_hours: Option<i32>,
    pub plan_data: Value,
    pub created_at: DateTime<Utc>,
}

/// One task inside a plan week. Task ids are opaque strings, unique across
/// the whole plan; the progress record references them by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub estimated_hours: f64,
    #[serde(rename = "type")]
    pub task_type: String,
}

/// Serde shape of one week as it appears inside `plan_data`. Lenient on
/// optional fields; `week_number` may be absent and is defaulted to the
/// week's 1-based position during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanWeekDoc {
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default)]
    pub milestone: Option<String>,
    #[serde(default)]
    pub focus: Vec<String>,
    #[serde(default)]
    pub total_hours: Option<f64>,
    #[serde(default)]
    pub tasks: Vec<PlanTask>,
}

/// Serde shape of the whole `plan_data` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub weeks: Vec<PlanWeekDoc>,
}

/// A validated week. `week_number` is always set (1-based).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanWeek {
    pub week_number: u32,
    pub milestone: Option<String>,
    pub focus: Vec<String>,
    pub total_hours: Option<f64>,
    pub tasks: Vec<PlanTask>,
}

/// A fully validated learning plan: row fields plus the parsed document.
///
/// Invariants established at the store boundary: `duration_weeks >= 1`,
/// task ids non-empty and unique across weeks, week numbers populated.
/// `weeks.len()` may differ from `duration_weeks`; the schedule derivation
/// treats out-of-range weeks as having no tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub overview: Option<String>,
    pub duration_weeks: u32,
    pub total_hours: Option<i32>,
    pub weeks: Vec<PlanWeek>,
    pub created_at: DateTime<Utc>,
}
