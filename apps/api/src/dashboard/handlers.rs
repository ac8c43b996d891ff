//! Axum route handler for the dashboard view.
//!
//! Fans out to the profile, plan, and jobs collaborators and assembles one
//! typed response. Absent plan state degrades to defaults instead of
//! failing: week 1, zero progress, no actions.

use std::collections::BTreeSet;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::handlers::{score_postings, ScoredJob};
use crate::jobs::source::JobQuery;
use crate::models::profile::{SkillRow, UserProfileRow};
use crate::plan::handlers::PlanSummary;
use crate::plan::progress::{next_actions, total_tasks, NextAction};
use crate::plan::schedule::current_week;
use crate::plan::store::{fetch_progress, load_latest_plan};
use crate::profile::handlers::UserIdQuery;
use crate::profile::store::{fetch_profile, fetch_skills};
use crate::state::AppState;

/// Cap on the dashboard's recommended-job list.
const RECOMMENDED_JOBS_LIMIT: usize = 4;

#[derive(Debug, Serialize)]
pub struct DashboardProgress {
    pub overall_completion_percentage: u32,
    pub completed_tasks: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub profile: UserProfileRow,
    pub skills_count: usize,
    pub plan: Option<PlanSummary>,
    pub current_week: u32,
    pub total_tasks: usize,
    pub progress: DashboardProgress,
    pub next_actions: Vec<NextAction>,
    pub recommended_jobs: Vec<ScoredJob>,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let profile = fetch_profile(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", params.user_id)))?;

    let skills = fetch_skills(&state.db, params.user_id).await?;
    let plan = load_latest_plan(&state.db, params.user_id).await?;
    let now = Utc::now();

    let mut response = DashboardResponse {
        skills_count: skills.len(),
        plan: None,
        current_week: 1,
        total_tasks: 0,
        progress: DashboardProgress {
            overall_completion_percentage: 0,
            completed_tasks: 0,
        },
        next_actions: vec![],
        recommended_jobs: recommend_jobs(&state, &profile, &skills).await?,
        profile,
    };

    if let Some(plan) = plan {
        // A plan without its progress record still derives actions; the
        // completed set is simply empty.
        let progress = fetch_progress(&state.db, params.user_id, plan.id).await?;
        let completed: BTreeSet<String> = progress
            .as_ref()
            .map(|row| row.completed_set())
            .unwrap_or_default();

        response.current_week = current_week(&plan, now);
        response.total_tasks = total_tasks(&plan);
        response.next_actions = next_actions(&plan, &completed, now);
        response.progress = DashboardProgress {
            overall_completion_percentage: progress
                .map(|row| row.overall_completion_percentage.max(0) as u32)
                .unwrap_or(0),
            completed_tasks: completed.len(),
        };
        response.plan = Some(PlanSummary {
            id: plan.id,
            title: plan.title,
            overview: plan.overview,
            duration_weeks: plan.duration_weeks,
            total_hours: plan.total_hours,
            created_at: plan.created_at,
        });
    }

    Ok(Json(response))
}

/// Top postings for the profile's target role, scored against the user's
/// skills and ranked best-first. Empty when there is no target role to
/// search for, or no recorded skills to score with.
async fn recommend_jobs(
    state: &AppState,
    profile: &UserProfileRow,
    skills: &[SkillRow],
) -> Result<Vec<ScoredJob>, AppError> {
    let target_role = match profile.target_role.as_deref() {
        Some(role) if !role.trim().is_empty() => role,
        _ => return Ok(vec![]),
    };
    if skills.is_empty() {
        return Ok(vec![]);
    }

    let query = JobQuery {
        keywords: target_role.to_string(),
        location: profile.location.clone(),
        limit: RECOMMENDED_JOBS_LIMIT,
    };
    let postings = state.jobs.search(&query).await?;

    let mut jobs = score_postings(state.matcher.as_ref(), postings, skills).await?;
    jobs.truncate(RECOMMENDED_JOBS_LIMIT);
    Ok(jobs)
}
