//! Axum route handlers for the Profile API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{SkillRow, UserProfileRow};
use crate::profile::store::{fetch_profile, fetch_skills, replace_skills, NewSkill};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SkillListResponse {
    pub skills: Vec<SkillRow>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct SkillPayload {
    pub name: String,
    pub category: Option<String>,
    pub proficiency_level: i16,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceSkillsRequest {
    pub user_id: Uuid,
    pub skills: Vec<SkillPayload>,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UserProfileRow>, AppError> {
    let profile = fetch_profile(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", params.user_id)))?;
    Ok(Json(profile))
}

/// GET /api/v1/skills
pub async fn handle_get_skills(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SkillListResponse>, AppError> {
    let skills = fetch_skills(&state.db, params.user_id).await?;
    Ok(Json(SkillListResponse {
        total: skills.len(),
        skills,
    }))
}

/// PUT /api/v1/skills
///
/// Replaces the user's recorded skill list. Names must be non-empty and
/// proficiency sits on the 1–5 self-rating scale.
pub async fn handle_replace_skills(
    State(state): State<AppState>,
    Json(request): Json<ReplaceSkillsRequest>,
) -> Result<Json<SkillListResponse>, AppError> {
    for skill in &request.skills {
        if skill.name.trim().is_empty() {
            return Err(AppError::Validation(
                "skill names cannot be empty".to_string(),
            ));
        }
        if !(1..=5).contains(&skill.proficiency_level) {
            return Err(AppError::Validation(format!(
                "proficiency_level for '{}' must be between 1 and 5",
                skill.name
            )));
        }
    }

    let new_skills: Vec<NewSkill<'_>> = request
        .skills
        .iter()
        .map(|skill| NewSkill {
            name: skill.name.trim(),
            category: skill.category.as_deref(),
            proficiency_level: skill.proficiency_level,
        })
        .collect();

    replace_skills(&state.db, request.user_id, &new_skills).await?;

    let skills = fetch_skills(&state.db, request.user_id).await?;
    Ok(Json(SkillListResponse {
        total: skills.len(),
        skills,
    }))
}
