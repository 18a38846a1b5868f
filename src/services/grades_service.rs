use serde_json::Value;

use crate::models::{Assessment, GradeBulkRequest, NewAssessment};
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;

impl ApiClient {
    pub async fn create_assessment(&self, assessment: &NewAssessment) -> Result<Assessment, ApiError> {
        log::info!("📝 Creating assessment '{}'", assessment.title);
        self.post("/grades/assessments", assessment).await
    }

    pub async fn submit_grades(&self, request: &GradeBulkRequest) -> Result<Value, ApiError> {
        log::info!(
            "📝 Entering {} grades for assessment {}",
            request.grades.len(),
            request.assessment_id
        );
        self.post("/grades/bulk-enter", request).await
    }

    /// Absolute URL of the report-card PDF; opened by the browser, never parsed here
    pub fn report_card_url(&self, student_id: &str, term_id: &str) -> String {
        self.url(&format!("/reports/report-card/{}?term_id={}", student_id, term_id))
    }
}
