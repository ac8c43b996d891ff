//! Axum route handlers for the Plan API.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::{LearningPlan, PlanDocument, PlanTask, PlanWeekDoc};
use crate::models::progress::ProgressRow;
use crate::plan::progress::{
    completion_percentage, mark_complete, toggle_complete, total_tasks, week_progress,
    CompletionChange,
};
use crate::plan::schedule::current_week;
use crate::plan::store::{
    build_weeks, fetch_progress, insert_plan, load_latest_plan, save_progress, NewPlan,
};
use crate::profile::handlers::UserIdQuery;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PlanSummary {
    pub id: Uuid,
    pub title: String,
    pub overview: Option<String>,
    pub duration_weeks: u32,
    pub total_hours: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: PlanTask,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct WeekView {
    pub week_number: u32,
    pub milestone: Option<String>,
    pub focus: Vec<String>,
    pub total_hours: Option<f64>,
    pub progress: u32,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Serialize)]
pub struct ProgressView {
    pub completed_task_ids: Vec<String>,
    pub overall_completion_percentage: u32,
    pub last_activity_date: Option<NaiveDate>,
}

impl ProgressView {
    fn from_row(row: &ProgressRow) -> Self {
        ProgressView {
            completed_task_ids: row.completed_set().into_iter().collect(),
            overall_completion_percentage: row.overall_completion_percentage.max(0) as u32,
            last_activity_date: row.last_activity_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanDetailResponse {
    pub plan: PlanSummary,
    pub current_week: u32,
    pub total_tasks: usize,
    pub progress: ProgressView,
    pub weeks: Vec<WeekView>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub user_id: Uuid,
    pub title: String,
    pub duration_weeks: i32,
    pub total_hours: Option<i32>,
    pub overview: Option<String>,
    pub weeks: Vec<PlanWeekDoc>,
}

#[derive(Debug, Serialize)]
pub struct CreatePlanResponse {
    pub plan_id: Uuid,
    pub progress_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct TaskActionRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TaskCompleteResponse {
    pub newly_completed: bool,
    pub progress: ProgressView,
}

#[derive(Debug, Serialize)]
pub struct TaskToggleResponse {
    pub change: CompletionChange,
    pub progress: ProgressView,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/plan
///
/// The user's latest plan with derived schedule state: current week, total
/// task count, per-week progress, and per-task completion flags.
pub async fn handle_get_plan(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<PlanDetailResponse>, AppError> {
    let (plan, progress) = require_plan_and_progress(&state.db, params.user_id).await?;
    let completed = progress.completed_set();

    Ok(Json(PlanDetailResponse {
        current_week: current_week(&plan, Utc::now()),
        total_tasks: total_tasks(&plan),
        progress: ProgressView::from_row(&progress),
        weeks: build_week_views(&plan, &completed),
        plan: PlanSummary {
            id: plan.id,
            title: plan.title,
            overview: plan.overview,
            duration_weeks: plan.duration_weeks,
            total_hours: plan.total_hours,
            created_at: plan.created_at,
        },
    }))
}

/// POST /api/v1/plan
///
/// Stores an externally generated plan document and creates its progress
/// record. The document is validated before anything is written.
pub async fn handle_create_plan(
    State(state): State<AppState>,
    Json(request): Json<CreatePlanRequest>,
) -> Result<Json<CreatePlanResponse>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.duration_weeks < 1 {
        return Err(AppError::Validation(
            "duration_weeks must be at least 1".to_string(),
        ));
    }

    // Same rules the load path enforces, applied before the write.
    build_weeks(&request.weeks).map_err(AppError::Validation)?;

    let document = PlanDocument {
        overview: request.overview,
        weeks: request.weeks,
    };
    let (plan_id, progress_id) = insert_plan(
        &state.db,
        NewPlan {
            user_id: request.user_id,
            title: &request.title,
            duration_weeks: request.duration_weeks,
            total_hours: request.total_hours,
            document: &document,
        },
    )
    .await?;

    Ok(Json(CreatePlanResponse {
        plan_id,
        progress_id,
    }))
}

/// POST /api/v1/plan/tasks/:task_id/complete
///
/// Marks a task complete against the user's latest plan. Set semantics:
/// repeating the call changes nothing, but the snapshot (and the activity
/// stamp) is written either way.
pub async fn handle_complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(request): Json<TaskActionRequest>,
) -> Result<Json<TaskCompleteResponse>, AppError> {
    let (plan, progress) = require_plan_and_progress(&state.db, request.user_id).await?;

    let mut completed = progress.completed_set();
    let newly_completed = mark_complete(&mut completed, &task_id);

    let progress = persist_snapshot(&state.db, &plan, progress.id, &completed).await?;
    Ok(Json(TaskCompleteResponse {
        newly_completed,
        progress,
    }))
}

/// POST /api/v1/plan/tasks/:task_id/toggle
///
/// Flips a task's completion state (the plan page checkbox).
pub async fn handle_toggle_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(request): Json<TaskActionRequest>,
) -> Result<Json<TaskToggleResponse>, AppError> {
    let (plan, progress) = require_plan_and_progress(&state.db, request.user_id).await?;

    let mut completed = progress.completed_set();
    let change = toggle_complete(&mut completed, &task_id);

    let progress = persist_snapshot(&state.db, &plan, progress.id, &completed).await?;
    Ok(Json(TaskToggleResponse { change, progress }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Latest plan plus its progress record, or NotFound for either.
async fn require_plan_and_progress(
    db: &PgPool,
    user_id: Uuid,
) -> Result<(LearningPlan, ProgressRow), AppError> {
    let plan = load_latest_plan(db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No learning plan for user {user_id}")))?;

    let progress = fetch_progress(db, user_id, plan.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No progress record for plan {}", plan.id)))?;

    Ok((plan, progress))
}

/// Recomputes the percentage from the plan, stamps today's activity date,
/// and persists the whole snapshot.
async fn persist_snapshot(
    db: &PgPool,
    plan: &LearningPlan,
    progress_id: Uuid,
    completed: &BTreeSet<String>,
) -> Result<ProgressView, AppError> {
    let percentage = completion_percentage(completed.len(), total_tasks(plan));
    let today = Utc::now().date_naive();

    save_progress(db, progress_id, completed, percentage, today).await?;

    Ok(ProgressView {
        completed_task_ids: completed.iter().cloned().collect(),
        overall_completion_percentage: percentage,
        last_activity_date: Some(today),
    })
}

fn build_week_views(plan: &LearningPlan, completed: &BTreeSet<String>) -> Vec<WeekView> {
    plan.weeks
        .iter()
        .map(|week| WeekView {
            week_number: week.week_number,
            milestone: week.milestone.clone(),
            focus: week.focus.clone(),
            total_hours: week.total_hours,
            progress: week_progress(&week.tasks, completed),
            tasks: week
                .tasks
                .iter()
                .map(|task| TaskView {
                    completed: completed.contains(&task.id),
                    task: task.clone(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::PlanWeek;

    fn make_task(id: &str) -> PlanTask {
        PlanTask {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: "Work through the material".to_string(),
            estimated_hours: 2.0,
            task_type: "study".to_string(),
        }
    }

    fn make_plan(weeks: Vec<PlanWeek>) -> LearningPlan {
        LearningPlan {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Data Analyst in 12 Weeks".to_string(),
            overview: None,
            duration_weeks: 12,
            total_hours: None,
            weeks,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_week_views_carry_progress_and_flags() {
        let plan = make_plan(vec![PlanWeek {
            week_number: 1,
            milestone: Some("Foundations".to_string()),
            focus: vec!["SQL".to_string()],
            total_hours: Some(8.0),
            tasks: vec![make_task("t1"), make_task("t2")],
        }]);
        let completed: BTreeSet<String> = ["t1".to_string()].into_iter().collect();

        let views = build_week_views(&plan, &completed);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].progress, 50);
        assert!(views[0].tasks[0].completed);
        assert!(!views[0].tasks[1].completed);
    }

    #[test]
    fn test_progress_view_clamps_negative_percentages() {
        let row = ProgressRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            completed_tasks: vec!["t2".to_string(), "t1".to_string(), "t2".to_string()],
            overall_completion_percentage: -5,
            last_activity_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let view = ProgressView::from_row(&row);
        assert_eq!(view.overall_completion_percentage, 0);
        // Set semantics collapse the stored duplicate.
        assert_eq!(view.completed_task_ids, vec!["t1", "t2"]);
    }
}
