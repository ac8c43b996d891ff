//! Plan and progress persistence.
//!
//! The JSONB plan document is parsed and validated here, at the boundary:
//! callers only ever see the typed `LearningPlan`, never a loose `Value`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::{LearningPlan, PlanDocument, PlanRow, PlanWeek, PlanWeekDoc};
use crate::models::progress::ProgressRow;

/// Loads the user's most recently created plan, parsed and validated.
pub async fn load_latest_plan(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<LearningPlan>, AppError> {
    let row = sqlx::query_as::<_, PlanRow>(
        "SELECT * FROM learning_plans WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(plan_from_row(row)?)),
        None => Ok(None),
    }
}

/// Converts a stored row into the typed domain plan.
///
/// A document that fails to parse or validate is data corruption, surfaced
/// as an internal error rather than skipped.
pub fn plan_from_row(row: PlanRow) -> Result<LearningPlan, AppError> {
    let document: PlanDocument = serde_json::from_value(row.plan_data).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("plan {} has a malformed document: {e}", row.id))
    })?;

    let weeks = build_weeks(&document.weeks).map_err(|reason| {
        AppError::Internal(anyhow::anyhow!("plan {} failed validation: {reason}", row.id))
    })?;

    Ok(LearningPlan {
        id: row.id,
        user_id: row.user_id,
        title: row.title,
        overview: document.overview,
        duration_weeks: row.duration_weeks.max(1) as u32,
        total_hours: row.total_hours,
        weeks,
        created_at: row.created_at,
    })
}

/// Normalizes document weeks into validated plan weeks.
///
/// Week numbers default to their 1-based position; task ids must be
/// non-empty and unique across the whole plan.
pub fn build_weeks(weeks: &[PlanWeekDoc]) -> Result<Vec<PlanWeek>, String> {
    let mut seen_ids = BTreeSet::new();
    let mut out = Vec::with_capacity(weeks.len());

    for (index, week) in weeks.iter().enumerate() {
        let week_number = week.week_number.unwrap_or(index as u32 + 1);

        for task in &week.tasks {
            if task.id.trim().is_empty() {
                return Err(format!("week {week_number} has a task with an empty id"));
            }
            if !seen_ids.insert(task.id.clone()) {
                return Err(format!("task id '{}' appears more than once", task.id));
            }
        }

        out.push(PlanWeek {
            week_number,
            milestone: week.milestone.clone(),
            focus: week.focus.clone(),
            total_hours: week.total_hours,
            tasks: week.tasks.clone(),
        });
    }

    Ok(out)
}

/// Parameters for storing a generated plan.
pub struct NewPlan<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub duration_weeks: i32,
    pub total_hours: Option<i32>,
    pub document: &'a PlanDocument,
}

/// Stores a plan together with its fresh progress record (empty set, 0%)
/// in one transaction; a plan row never lands without its progress row.
/// Returns (plan_id, progress_id).
pub async fn insert_plan(pool: &PgPool, params: NewPlan<'_>) -> Result<(Uuid, Uuid), AppError> {
    let plan_data = serde_json::to_value(params.document).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("failed to serialize plan document: {e}"))
    })?;

    let mut tx = pool.begin().await?;

    let plan_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO learning_plans (id, user_id, title, duration_weeks, total_hours, plan_data)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(plan_id)
    .bind(params.user_id)
    .bind(params.title)
    .bind(params.duration_weeks)
    .bind(params.total_hours)
    .bind(&plan_data)
    .execute(&mut *tx)
    .await?;

    let progress_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO user_progress (id, user_id, plan_id, completed_tasks, overall_completion_percentage)
        VALUES ($1, $2, $3, '{}', 0)
        "#,
    )
    .bind(progress_id)
    .bind(params.user_id)
    .bind(plan_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Stored plan {plan_id} ({} weeks) with progress record {progress_id} for user {}",
        params.duration_weeks, params.user_id
    );

    Ok((plan_id, progress_id))
}

/// The progress record for one (user, plan) pair.
pub async fn fetch_progress(
    pool: &PgPool,
    user_id: Uuid,
    plan_id: Uuid,
) -> Result<Option<ProgressRow>, AppError> {
    Ok(sqlx::query_as::<_, ProgressRow>(
        "SELECT * FROM user_progress WHERE user_id = $1 AND plan_id = $2",
    )
    .bind(user_id)
    .bind(plan_id)
    .fetch_optional(pool)
    .await?)
}

/// Writes the full progress snapshot in one statement. Last writer wins;
/// there is no compare-and-swap for concurrent sessions.
pub async fn save_progress(
    pool: &PgPool,
    progress_id: Uuid,
    completed: &BTreeSet<String>,
    percentage: u32,
    last_activity: NaiveDate,
) -> Result<(), AppError> {
    let completed_tasks: Vec<String> = completed.iter().cloned().collect();

    sqlx::query(
        r#"
        UPDATE user_progress
        SET completed_tasks = $1,
            overall_completion_percentage = $2,
            last_activity_date = $3,
            updated_at = NOW()
        WHERE id = $4
        "#,
    )
    .bind(&completed_tasks)
    .bind(percentage as i32)
    .bind(last_activity)
    .bind(progress_id)
    .execute(pool)
    .await?;

    info!(
        "Progress {progress_id}: {} tasks complete ({percentage}%)",
        completed_tasks.len()
    );

    Ok(())
}
