use crate::models::{School, SchoolUpdate};
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;

impl ApiClient {
    pub async fn school(&self, school_id: &str) -> Result<School, ApiError> {
        self.get(&format!("/schools/{}", school_id)).await
    }

    pub async fn update_school(&self, school_id: &str, update: &SchoolUpdate) -> Result<School, ApiError> {
        log::info!("🏫 Updating school {}", school_id);
        self.patch(&format!("/schools/{}", school_id), update).await
    }
}
