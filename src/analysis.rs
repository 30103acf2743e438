//! Response payloads of the two upload endpoints.
//!
//! Decoding is deliberately forgiving: a field of the wrong shape decodes as
//! absent (or empty) instead of failing the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured analysis of a job description, as produced by the backend.
/// Absent sections are empty; item order is the server's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "string_items")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "string_items")]
    pub experience: Vec<String>,
    #[serde(default, deserialize_with = "string_items")]
    pub qualifications: Vec<String>,
    #[serde(default, deserialize_with = "string_items")]
    pub responsibilities: Vec<String>,
}

impl AnalysisResult {
    /// Anything that is not a JSON object yields an empty result.
    pub fn from_value(value: Value) -> AnalysisResult {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => AnalysisResult::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.experience.is_empty()
            && self.qualifications.is_empty()
            && self.responsibilities.is_empty()
    }
}

/// Body of a successful `POST /api/job-description`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDescriptionResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub job_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub analysis: Option<Value>,
}

impl JobDescriptionResponse {
    /// Present only when the server sent an `analysis` object.
    pub fn analysis(&self) -> Option<AnalysisResult> {
        match &self.analysis {
            Some(value @ Value::Object(_)) => Some(AnalysisResult::from_value(value.clone())),
            _ => None,
        }
    }
}

/// Body of a successful `POST /api/resume`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub candidate_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub match_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub shortlisted: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub redirect: Option<String>,
}

/// Error body the backend attaches to 4xx/5xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn string_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_sections_decode_empty() {
        let result = AnalysisResult::from_value(json!({ "skills": ["Go", "Rust"] }));
        assert_eq!(result.skills, vec!["Go", "Rust"]);
        assert!(result.experience.is_empty());
        assert!(result.qualifications.is_empty());
        assert!(result.responsibilities.is_empty());
    }

    #[test]
    fn malformed_section_degrades_to_empty() {
        let result = AnalysisResult::from_value(json!({
            "skills": "Rust",
            "experience": null,
            "qualifications": { "degree": "BSc" },
            "responsibilities": ["Own the build", 3, null, ["nested"]],
        }));
        assert!(result.skills.is_empty());
        assert!(result.experience.is_empty());
        assert!(result.qualifications.is_empty());
        assert_eq!(result.responsibilities, vec!["Own the build", "3"]);
    }

    #[test]
    fn non_object_analysis_is_empty() {
        assert!(AnalysisResult::from_value(json!(["skills"])).is_empty());
        assert!(AnalysisResult::from_value(Value::Null).is_empty());
    }

    #[test]
    fn positional_array_is_not_an_analysis() {
        let result = AnalysisResult::from_value(json!([["Go"], [], [], []]));
        assert!(result.is_empty());
    }

    #[test]
    fn non_object_analysis_field_is_absent() {
        for body in [
            r#"{"analysis": null}"#,
            r#"{"analysis": "oops"}"#,
            r#"{"analysis": [["Go"]]}"#,
        ] {
            let resp: JobDescriptionResponse = serde_json::from_str(body).unwrap();
            assert!(resp.analysis().is_none(), "{body}");
        }
        let resp: JobDescriptionResponse = serde_json::from_str(r#"{"analysis": {}}"#).unwrap();
        assert_eq!(resp.analysis(), Some(AnalysisResult::default()));
    }

    #[test]
    fn job_description_response_without_analysis() {
        let resp: JobDescriptionResponse =
            serde_json::from_str(r#"{"success": true, "job_id": "abc"}"#).unwrap();
        assert_eq!(resp.job_id.as_deref(), Some("abc"));
        assert!(resp.analysis().is_none());
    }

    #[test]
    fn resume_response_ignores_wrongly_typed_redirect() {
        let resp: ResumeResponse =
            serde_json::from_str(r#"{"success": true, "redirect": 42, "match_score": 81.5}"#)
                .unwrap();
        assert_eq!(resp.redirect, None);
        assert_eq!(resp.match_score, Some(81.5));
    }
}
