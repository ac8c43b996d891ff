use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting as produced by a `JobSource`. Not persisted; every search
/// re-fetches from the source, so postings carry no database identity.
///
/// `requirements` are free-text labels with no canonical vocabulary; the
/// match scorer treats them as opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub url: String,
    pub source: String,
    pub posted_date: DateTime<Utc>,
}
