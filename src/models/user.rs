use serde::{Deserialize, Serialize};

/// Account returned by `/auth/me` and `/users/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    /// Tenant the account belongs to (absent for super admins)
    pub school_id: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub last_login: Option<String>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn initials(&self) -> String {
        initials_of(&[&self.first_name, &self.last_name])
    }

    pub fn department_label(&self) -> &str {
        self.department.as_deref().unwrap_or("General")
    }

    /// Date part of the last login, or "Never"
    pub fn last_login_label(&self) -> String {
        self.last_login
            .as_deref()
            .map(date_part)
            .unwrap_or_else(|| "Never".to_string())
    }
}

/// Credentials exchanged at `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// School + admin account creation (`POST /auth/register`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub school_name: String,
    pub password: String,
    pub role: String,
}

/// First letters of each non-empty part, uppercased
pub fn initials_of(parts: &[&str]) -> String {
    parts
        .iter()
        .filter_map(|part| part.trim().chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// `2025-03-14T09:30:00Z` -> `2025-03-14`
pub fn date_part(timestamp: &str) -> String {
    timestamp.split('T').next().unwrap_or(timestamp).to_string()
}
