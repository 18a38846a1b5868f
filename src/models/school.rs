use serde::{Deserialize, Serialize};

/// Tenant profile (`GET /schools/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub subscription_status: String,
}

impl School {
    /// Uppercased id prefix shown as the read-only school code
    pub fn display_code(&self) -> String {
        self.id.get(..8).unwrap_or(&self.id).to_uppercase()
    }
}

/// Editable profile fields (`PATCH /schools/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl SchoolUpdate {
    pub fn from_school(school: &School) -> Self {
        Self {
            name: Some(school.name.clone()),
            email: school.email.clone(),
            phone: school.phone.clone(),
            address: school.address.clone(),
        }
    }
}
