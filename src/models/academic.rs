use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicYear {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_current: bool,
}

impl AcademicYear {
    /// Current year if one is flagged, otherwise the first one listed
    pub fn pick_current(years: &[AcademicYear]) -> Option<&AcademicYear> {
        years.iter().find(|y| y.is_current).or_else(|| years.first())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// upcoming, active or completed
    #[serde(default = "default_term_status")]
    pub status: String,
    pub academic_year_id: Option<String>,
}

fn default_term_status() -> String {
    "upcoming".to_string()
}

impl Term {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    pub fn pick_active(terms: &[Term]) -> Option<&Term> {
        terms.iter().find(|t| t.is_active()).or_else(|| terms.first())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub grade_level: String,
    pub section: Option<String>,
    pub room_number: Option<String>,
}

impl Classroom {
    /// First eight characters of the id, as shown on classroom cards
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAcademicYear {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTerm {
    pub academic_year_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubject {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClassroom {
    pub name: String,
    pub grade_level: String,
    pub section: Option<String>,
    pub room_number: Option<String>,
}
