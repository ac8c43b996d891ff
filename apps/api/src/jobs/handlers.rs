//! Axum route handlers for the Jobs API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::matching::{MatchReport, MatchScorer};
use crate::jobs::source::{JobQuery, DEFAULT_SEARCH_LIMIT};
use crate::models::job::JobPosting;
use crate::models::profile::SkillRow;
use crate::profile::store::fetch_skills;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    pub user_id: Uuid,
    pub keywords: String,
    pub location: Option<String>,
    pub limit: Option<usize>,
}

/// One posting with its match report against the requesting user's skills.
#[derive(Debug, Serialize)]
pub struct ScoredJob {
    pub job: JobPosting,
    pub report: MatchReport,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<ScoredJob>,
    pub total: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/search
///
/// Searches the posting source and scores every hit against the user's
/// recorded skills. Results are sorted by score, best first.
pub async fn handle_job_search(
    State(state): State<AppState>,
    Json(request): Json<JobSearchRequest>,
) -> Result<Json<JobSearchResponse>, AppError> {
    if request.keywords.trim().is_empty() {
        return Err(AppError::Validation("keywords cannot be empty".to_string()));
    }

    let skills = fetch_skills(&state.db, request.user_id).await?;

    let query = JobQuery {
        keywords: request.keywords,
        location: request.location,
        limit: request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    };
    let postings = state.jobs.search(&query).await?;

    let jobs = score_postings(state.matcher.as_ref(), postings, &skills).await?;
    info!(
        "Job search '{}' returned {} scored postings for user {}",
        query.keywords,
        jobs.len(),
        request.user_id
    );

    Ok(Json(JobSearchResponse {
        total: jobs.len(),
        jobs,
    }))
}

/// Scores a batch of postings and ranks them best-first. Postings with equal
/// scores keep source order (the sort is stable).
pub async fn score_postings(
    matcher: &dyn MatchScorer,
    postings: Vec<JobPosting>,
    skills: &[SkillRow],
) -> Result<Vec<ScoredJob>, AppError> {
    let mut jobs = Vec::with_capacity(postings.len());
    for job in postings {
        let report = matcher.score(&job, skills).await?;
        jobs.push(ScoredJob { job, report });
    }
    jobs.sort_by(|a, b| b.report.score.cmp(&a.report.score));
    Ok(jobs)
}
