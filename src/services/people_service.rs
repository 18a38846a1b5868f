use crate::models::{Student, User};
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use crate::utils::constants::ROLE_TEACHER;

impl ApiClient {
    /// All students, or only those actively enrolled in `classroom_id`
    pub async fn students(&self, classroom_id: Option<&str>) -> Result<Vec<Student>, ApiError> {
        match classroom_id {
            Some(id) => self.get(&format!("/students/?classroom_id={}", id)).await,
            None => self.get("/students/").await,
        }
    }

    pub async fn users_with_role(&self, role: &str) -> Result<Vec<User>, ApiError> {
        self.get(&format!("/users/?role={}", role)).await
    }

    pub async fn teachers(&self) -> Result<Vec<User>, ApiError> {
        self.users_with_role(ROLE_TEACHER).await
    }
}
