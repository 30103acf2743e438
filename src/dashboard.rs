//! Read-only payloads behind the dashboard charts and candidate pages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub department: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub job_id: String,
}

/// One axis of the skills radar chart. Levels are normalized to 0.0..=1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    pub skill: String,
    pub candidate_level: f64,
    pub required_level: f64,
}

/// Candidate counts keyed by match band, e.g. "High Match (>=75%)".
pub type CategoryDistribution = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSlot {
    pub date: String,
    pub time: String,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub suggested_slots: Vec<InterviewSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_match_uses_camel_case_levels() {
        let matches: Vec<SkillMatch> = serde_json::from_str(
            r#"[{"skill": "rust", "candidateLevel": 1.0, "requiredLevel": 0.0}]"#,
        )
        .unwrap();
        assert_eq!(matches[0].skill, "rust");
        assert_eq!(matches[0].candidate_level, 1.0);
        assert_eq!(matches[0].required_level, 0.0);
    }

    #[test]
    fn job_summary_accepts_null_created_at() {
        let jobs: Vec<JobSummary> = serde_json::from_str(
            r#"[{"id": "j1", "title": "SRE", "department": "Ops", "created_at": null}]"#,
        )
        .unwrap();
        assert_eq!(jobs[0].created_at, None);
    }

    #[test]
    fn distribution_is_keyed_by_band() {
        let dist: CategoryDistribution = serde_json::from_str(
            r#"{"High Match (>=75%)": 2, "Medium Match (50-74%)": 0, "Low Match (<50%)": 5}"#,
        )
        .unwrap();
        assert_eq!(dist["Low Match (<50%)"], 5);
        assert_eq!(dist.values().sum::<u64>(), 7);
    }
}
