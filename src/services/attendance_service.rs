use serde_json::Value;

use crate::models::AttendanceBulkRequest;
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;

impl ApiClient {
    /// Returns the created records untouched; callers only need success
    pub async fn submit_attendance(&self, request: &AttendanceBulkRequest) -> Result<Value, ApiError> {
        log::info!(
            "📋 Submitting attendance for {} ({} students, {})",
            request.classroom_id,
            request.attendance_data.len(),
            request.date
        );
        self.post("/attendance/bulk", request).await
    }
}
