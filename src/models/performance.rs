use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub title: String,
    /// exam, quiz, assignment or practical
    #[serde(rename = "type")]
    pub kind: String,
    pub total_marks: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub date: Option<NaiveDate>,
    pub classroom_id: String,
    pub subject_id: String,
    pub term_id: String,
}

fn default_weight() -> f64 {
    100.0
}

/// Body of `POST /grades/assessments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssessment {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub total_marks: f64,
    pub weight: f64,
    pub date: Option<NaiveDate>,
    pub classroom_id: String,
    pub subject_id: String,
    pub term_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub student_id: String,
    pub marks_obtained: f64,
    pub remarks: Option<String>,
}

/// Body of `POST /grades/bulk-enter`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBulkRequest {
    pub assessment_id: String,
    pub grades: Vec<GradeEntry>,
}
