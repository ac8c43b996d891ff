//! Job source seam: where postings come from.
//!
//! Default: `StaticJobSource` over the built-in catalog. A live board
//! integration (Reed, Indeed) implements `JobSource` and slots into
//! `AppState` without touching the search or dashboard handlers.

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::jobs::postings::builtin_postings;
use crate::models::job::JobPosting;

/// Number of postings returned when a query does not set a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// A posting search query.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub keywords: String,
    pub location: Option<String>,
    pub limit: usize,
}

/// The posting source trait.
///
/// Carried in `AppState` as `Arc<dyn JobSource>`.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobPosting>, AppError>;
}

/// In-process source backed by the built-in catalog.
pub struct StaticJobSource {
    postings: Vec<JobPosting>,
}

impl StaticJobSource {
    pub fn builtin() -> Self {
        StaticJobSource {
            postings: builtin_postings(Utc::now()),
        }
    }
}

#[async_trait]
impl JobSource for StaticJobSource {
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobPosting>, AppError> {
        Ok(filter_postings(&self.postings, query))
    }
}

/// Filters a posting list by query.
///
/// Keyword matching is a case-insensitive substring test against title OR
/// description; an empty keyword string therefore matches every posting.
/// The optional location filter is the same substring test against the
/// posting's location. Results keep catalog order, truncated to the limit.
pub fn filter_postings(postings: &[JobPosting], query: &JobQuery) -> Vec<JobPosting> {
    let keywords = query.keywords.to_lowercase();

    let mut hits: Vec<JobPosting> = postings
        .iter()
        .filter(|job| {
            job.title.to_lowercase().contains(&keywords)
                || job.description.to_lowercase().contains(&keywords)
        })
        .cloned()
        .collect();

    if let Some(location) = &query.location {
        let location = location.to_lowercase();
        hits.retain(|job| job.location.to_lowercase().contains(&location));
    }

    hits.truncate(query.limit);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<JobPosting> {
        builtin_postings(Utc::now())
    }

    fn query(keywords: &str) -> JobQuery {
        JobQuery {
            keywords: keywords.to_string(),
            location: None,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    #[test]
    fn test_keyword_matches_title() {
        let hits = filter_postings(&catalog(), &query("data"));
        let ids: Vec<&str> = hits.iter().map(|j| j.id.as_str()).collect();
        // Catalog order preserved; job-3 and job-5 mention "data" nowhere.
        assert_eq!(ids, vec!["job-1", "job-2", "job-4"]);
    }

    #[test]
    fn test_keyword_matches_description_only() {
        // "MLOps" appears only in the ML engineer description, not a title.
        let hits = filter_postings(&catalog(), &query("mlops"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "job-3");
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let hits = filter_postings(&catalog(), &query("PYTHON"));
        let ids: Vec<&str> = hits.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["job-1", "job-2", "job-4"]);
    }

    #[test]
    fn test_location_filter_applies_after_keywords() {
        let mut q = query("data");
        q.location = Some("MANCHESTER".to_string());
        let hits = filter_postings(&catalog(), &q);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "job-2");
    }

    #[test]
    fn test_limit_truncates_in_catalog_order() {
        let mut q = query("data");
        q.limit = 2;
        let hits = filter_postings(&catalog(), &q);
        let ids: Vec<&str> = hits.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["job-1", "job-2"]);
    }

    #[test]
    fn test_omitted_limit_defaults_to_20() {
        // Callers fall back to the default when a request carries no limit.
        let requested: Option<usize> = None;
        let q = JobQuery {
            keywords: String::new(),
            location: None,
            limit: requested.unwrap_or(DEFAULT_SEARCH_LIMIT),
        };
        assert_eq!(q.limit, 20);
        assert_eq!(filter_postings(&catalog(), &q).len(), 5);
    }

    #[test]
    fn test_empty_keywords_matches_every_posting() {
        let hits = filter_postings(&catalog(), &query(""));
        assert_eq!(hits.len(), 5);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let hits = filter_postings(&catalog(), &query("blockchain"));
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_static_source_serves_catalog() {
        let source = StaticJobSource::builtin();
        let hits = source.search(&query("mlops")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "job-3");
    }
}
