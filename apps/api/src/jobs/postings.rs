//! Built-in posting catalog served by `StaticJobSource`.
//!
//! Stands in for a live job-board integration (Reed, Indeed). The five
//! postings cover the data-career roles the coaching flows target; every
//! posting is stamped with the catalog's construction time.

use chrono::{DateTime, Utc};

use crate::models::job::JobPosting;

pub fn builtin_postings(posted_date: DateTime<Utc>) -> Vec<JobPosting> {
    let posting = |id: &str,
                   title: &str,
                   company: &str,
                   location: &str,
                   salary: &str,
                   description: &str,
                   url: &str,
                   source: &str,
                   requirements: &[&str]| JobPosting {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        salary: salary.to_string(),
        description: description.to_string(),
        requirements: requirements.iter().map(|r| r.to_string()).collect(),
        url: url.to_string(),
        source: source.to_string(),
        posted_date,
    };

    vec![
        posting(
            "job-1",
            "Data Scientist",
            "TechCorp Ltd",
            "London, UK",
            "£60,000 - £80,000",
            "We are seeking a Data Scientist to join our analytics team. You will work \
             with Python, SQL, and machine learning frameworks to analyze large datasets \
             and build predictive models.",
            "https://example.com/jobs/data-scientist-1",
            "TechCorp",
            &["Python", "SQL", "Machine Learning", "Pandas", "Statistics"],
        ),
        posting(
            "job-2",
            "Senior Data Analyst",
            "DataFlow Inc",
            "Manchester, UK",
            "£45,000 - £65,000",
            "Join our data team as a Senior Data Analyst. Use Python, SQL, and \
             visualization tools like Tableau to derive insights from complex datasets.",
            "https://example.com/jobs/data-analyst-2",
            "DataFlow",
            &["Python", "SQL", "Tableau", "Excel", "Statistics"],
        ),
        posting(
            "job-3",
            "Machine Learning Engineer",
            "AI Solutions",
            "Edinburgh, UK",
            "£70,000 - £90,000",
            "We need a Machine Learning Engineer experienced with TensorFlow, PyTorch, \
             and MLOps practices. You will deploy ML models at scale.",
            "https://example.com/jobs/ml-engineer-3",
            "AI Solutions",
            &["Python", "TensorFlow", "PyTorch", "Machine Learning", "Docker", "AWS"],
        ),
        posting(
            "job-4",
            "Junior Data Scientist",
            "StartupCo",
            "Remote",
            "£35,000 - £45,000",
            "Entry-level position for a Data Scientist. We will train you in Python, \
             SQL, and data analysis techniques.",
            "https://example.com/jobs/junior-ds-4",
            "StartupCo",
            &["Python", "SQL", "Statistics", "Excel"],
        ),
        posting(
            "job-5",
            "Business Intelligence Analyst",
            "Corporate Solutions",
            "Birmingham, UK",
            "£40,000 - £55,000",
            "BI Analyst role requiring SQL, Power BI, and Excel skills. You will create \
             dashboards and reports for executive team.",
            "https://example.com/jobs/bi-analyst-5",
            "Corporate Solutions",
            &["SQL", "Power BI", "Excel", "Tableau"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_postings_with_requirements() {
        let postings = builtin_postings(Utc::now());
        assert_eq!(postings.len(), 5);
        assert!(postings.iter().all(|p| !p.requirements.is_empty()));
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let postings = builtin_postings(Utc::now());
        let mut ids: Vec<&str> = postings.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
