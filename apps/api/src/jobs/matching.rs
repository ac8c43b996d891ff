//! Match scoring: a pluggable, trait-based scorer that measures a user's held
//! skills against a posting's requirements.
//!
//! Default: `SkillOverlapScorer` (pure-Rust, fast, deterministic, fully
//! testable). A semantic backend can implement `MatchScorer` later without
//! touching the endpoint, handler, or caller code.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, constructed at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::models::profile::SkillRow;

/// Minimum proficiency at which a recorded skill counts as held.
pub const HELD_PROFICIENCY_MIN: i16 = 2;

/// Score for a posting that lists no requirements: unknown, assume mild fit.
const EMPTY_REQUIREMENTS_SCORE: u32 = 30;

/// Score for a user with no recorded skills at all.
const NO_SKILLS_SCORE: u32 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Output data model (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// Match report for one posting against one user's skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: u32,             // 0 – 100
    pub matched: Vec<String>,   // requirements covered by a held skill
    pub gaps: Vec<String>,      // requirements with no covering skill
    pub scorer_backend: String, // "skill-overlap"; names the backend for clients
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap backends without touching
/// the search or dashboard handlers.
///
/// Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(
        &self,
        job: &JobPosting,
        skills: &[SkillRow],
    ) -> Result<MatchReport, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// SkillOverlapScorer: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Pure-Rust overlap scorer. No I/O, no model calls.
///
/// Algorithm:
/// 1. Posting has no requirements → score 30, nothing matched.
/// 2. User has no recorded skills → score 10, every requirement is a gap.
/// 3. Held set: lower-cased names of skills with proficiency ≥ 2.
/// 4. A requirement is matched when some held name contains it or is
///    contained by it (case-insensitive, both directions).
/// 5. score = round(100 × matched / total requirements).
pub struct SkillOverlapScorer;

#[async_trait]
impl MatchScorer for SkillOverlapScorer {
    async fn score(
        &self,
        job: &JobPosting,
        skills: &[SkillRow],
    ) -> Result<MatchReport, AppError> {
        Ok(compute_skill_overlap(job, skills))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core overlap algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_skill_overlap(job: &JobPosting, skills: &[SkillRow]) -> MatchReport {
    let backend = "skill-overlap".to_string();

    // Order matters: an empty requirement list wins over an empty skill list.
    if job.requirements.is_empty() {
        return MatchReport {
            score: EMPTY_REQUIREMENTS_SCORE,
            matched: vec![],
            gaps: vec![],
            scorer_backend: backend,
        };
    }

    if skills.is_empty() {
        return MatchReport {
            score: NO_SKILLS_SCORE,
            matched: vec![],
            gaps: job.requirements.clone(),
            scorer_backend: backend,
        };
    }

    // Skills below the threshold are recorded but not held; a user whose
    // every skill sits below it scores a genuine 0 here, not the 10 default.
    let held: Vec<String> = skills
        .iter()
        .filter(|s| s.proficiency_level >= HELD_PROFICIENCY_MIN)
        .map(|s| s.name.to_lowercase())
        .collect();

    let mut matched = Vec::new();
    let mut gaps = Vec::new();

    for requirement in &job.requirements {
        let req_lower = requirement.to_lowercase();

        // Loose on purpose: "sql" covers "Advanced SQL" and the reverse.
        let covered = held
            .iter()
            .any(|skill| skill.contains(&req_lower) || req_lower.contains(skill.as_str()));

        if covered {
            matched.push(requirement.clone());
        } else {
            gaps.push(requirement.clone());
        }
    }

    let score =
        ((matched.len() as f64 / job.requirements.len() as f64) * 100.0).round() as u32;

    MatchReport {
        score,
        matched,
        gaps,
        scorer_backend: backend,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_skill(name: &str, proficiency_level: i16) -> SkillRow {
        SkillRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            category: None,
            proficiency_level,
            created_at: Utc::now(),
        }
    }

    fn make_job(requirements: Vec<&str>) -> JobPosting {
        JobPosting {
            id: "job-test".to_string(),
            title: "Data Scientist".to_string(),
            company: "TechCorp Ltd".to_string(),
            location: "London, UK".to_string(),
            salary: "£60,000 - £80,000".to_string(),
            description: "Analytics role".to_string(),
            requirements: requirements.into_iter().map(String::from).collect(),
            url: "https://example.com/jobs/test".to_string(),
            source: "TechCorp".to_string(),
            posted_date: Utc::now(),
        }
    }

    #[test]
    fn test_full_coverage_scores_100() {
        let skills = vec![make_skill("Python", 4), make_skill("SQL", 3)];
        let job = make_job(vec!["Python", "SQL"]);

        let report = compute_skill_overlap(&job, &skills);
        assert_eq!(report.score, 100);
        assert_eq!(report.matched, vec!["Python", "SQL"]);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_below_threshold_skills_do_not_match() {
        // python held (3), sql recorded but below the held threshold (1):
        // only 1 of 3 requirements covered → round(100/3) = 33.
        let skills = vec![make_skill("python", 3), make_skill("sql", 1)];
        let job = make_job(vec!["Python", "SQL", "Machine Learning"]);

        let report = compute_skill_overlap(&job, &skills);
        assert_eq!(report.score, 33);
        assert_eq!(report.matched, vec!["Python"]);
        assert_eq!(report.gaps, vec!["SQL", "Machine Learning"]);
    }

    #[test]
    fn test_empty_requirements_scores_30() {
        let job = make_job(vec![]);

        // 30 regardless of what the user holds, and before the no-skills
        // default is even considered.
        let with_skills = compute_skill_overlap(&job, &[make_skill("Python", 5)]);
        assert_eq!(with_skills.score, 30);
        assert!(with_skills.matched.is_empty());
        assert!(with_skills.gaps.is_empty());

        let without_skills = compute_skill_overlap(&job, &[]);
        assert_eq!(without_skills.score, 30);
    }

    #[test]
    fn test_no_recorded_skills_scores_10() {
        let job = make_job(vec!["Python", "SQL"]);

        let report = compute_skill_overlap(&job, &[]);
        assert_eq!(report.score, 10);
        assert!(report.matched.is_empty());
        assert_eq!(report.gaps, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_all_skills_below_threshold_scores_zero_not_10() {
        let skills = vec![make_skill("Python", 1), make_skill("SQL", 1)];
        let job = make_job(vec!["Python", "SQL"]);

        let report = compute_skill_overlap(&job, &skills);
        assert_eq!(report.score, 0);
        assert_eq!(report.gaps.len(), 2);
    }

    #[test]
    fn test_substring_match_is_bidirectional() {
        // Held name inside the requirement...
        let report = compute_skill_overlap(
            &make_job(vec!["Advanced SQL"]),
            &[make_skill("sql", 3)],
        );
        assert_eq!(report.score, 100);

        // ...and requirement inside the held name.
        let report = compute_skill_overlap(
            &make_job(vec!["SQL"]),
            &[make_skill("Advanced SQL", 3)],
        );
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let report = compute_skill_overlap(
            &make_job(vec!["MACHINE LEARNING"]),
            &[make_skill("machine learning", 2)],
        );
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_threshold_boundary_proficiency_2_is_held() {
        let report = compute_skill_overlap(
            &make_job(vec!["Python"]),
            &[make_skill("Python", HELD_PROFICIENCY_MIN)],
        );
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let skills = vec![make_skill("Python", 5), make_skill("Tableau", 4)];
        for requirements in [
            vec![],
            vec!["Python"],
            vec!["Python", "Tableau"],
            vec!["Rust", "Go", "Haskell"],
        ] {
            let report = compute_skill_overlap(&make_job(requirements), &skills);
            assert!(report.score <= 100);
        }
    }

    #[test]
    fn test_matched_and_gaps_preserve_requirement_order() {
        let skills = vec![make_skill("Excel", 3), make_skill("Python", 3)];
        let job = make_job(vec!["Python", "Tableau", "Excel", "R"]);

        let report = compute_skill_overlap(&job, &skills);
        assert_eq!(report.matched, vec!["Python", "Excel"]);
        assert_eq!(report.gaps, vec!["Tableau", "R"]);
        assert_eq!(report.score, 50);
    }

    #[test]
    fn test_scorer_backend_label() {
        let report = compute_skill_overlap(&make_job(vec![]), &[]);
        assert_eq!(report.scorer_backend, "skill-overlap");
    }
}
