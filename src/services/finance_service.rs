use crate::models::{FinanceStats, NewPayment, Payment};
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;

impl ApiClient {
    pub async fn payments(&self) -> Result<Vec<Payment>, ApiError> {
        self.get("/finance/payments/all").await
    }

    pub async fn finance_stats(&self) -> Result<FinanceStats, ApiError> {
        self.get("/finance/stats").await
    }

    pub async fn record_payment(&self, payment: &NewPayment) -> Result<Payment, ApiError> {
        log::info!("💳 Recording payment of {} for {}", payment.amount_paid, payment.student_id);
        self.post("/finance/payments", payment).await
    }
}
