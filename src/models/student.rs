use serde::{Deserialize, Serialize};

use crate::models::user::initials_of;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    #[serde(default)]
    pub admission_number: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    pub gender: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

impl Student {
    /// Full name, or the admission number when the API sent no name
    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let name = name.trim();
        if name.is_empty() {
            self.admission_number.clone()
        } else {
            name.to_string()
        }
    }

    pub fn initials(&self) -> String {
        initials_of(&[
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or(""),
        ])
    }

    /// Missing flag counts as active
    pub fn is_active(&self) -> bool {
        self.is_active != Some(false)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active() {
            "Active"
        } else {
            "Inactive"
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.display_name().to_lowercase().contains(&query)
            || self.admission_number.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nameless_student_falls_back_to_admission_number() {
        let student: Student = serde_json::from_value(serde_json::json!({
            "id": "s1", "admission_number": "ADM-001"
        }))
        .unwrap();
        assert_eq!(student.display_name(), "ADM-001");
        assert_eq!(student.initials(), "");
        assert_eq!(student.status_label(), "Active");
        assert!(student.matches("adm-0"));
    }
}
