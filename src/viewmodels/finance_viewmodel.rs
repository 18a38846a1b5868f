// ============================================================================
// FINANCE VIEWMODEL - revenue stats + payment ledger
// ============================================================================

use crate::models::{format_currency, FinanceStats, NewPayment, Payment};
use crate::services::{ApiClient, ApiError};
use crate::state::{AppContext, ReactiveState};
use crate::viewmodels::action::{report, ActionError};
use crate::viewmodels::resource_loader::{ListView, LoadState, ResourceLoader};

pub const EMPTY_PAYMENTS: &str = "No recent transactions found.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinanceOverview {
    pub payments: Vec<Payment>,
    pub stats: FinanceStats,
}

/// Both requests in flight at once; either failing fails the page
async fn fetch_overview(api: ApiClient) -> Result<FinanceOverview, ApiError> {
    let (payments, stats) = futures::join!(api.payments(), api.finance_stats());
    Ok(FinanceOverview {
        payments: payments?,
        stats: stats?,
    })
}

#[derive(Clone)]
pub struct FinanceViewModel {
    ctx: AppContext,
    overview: ResourceLoader<FinanceOverview>,
    query: ReactiveState<String>,
    recording: ReactiveState<bool>,
}

impl FinanceViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            overview: ResourceLoader::new(),
            query: ReactiveState::default(),
            recording: ReactiveState::new(false),
        }
    }

    pub async fn load(&self) {
        self.overview
            .load(fetch_overview(self.ctx.api.clone()))
            .await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    pub fn set_query(&self, query: &str) {
        self.query.set(query.to_string());
    }

    pub fn stats(&self) -> Option<FinanceStats> {
        self.overview.data().map(|overview| overview.stats)
    }

    pub fn rows(&self) -> ListView<Payment> {
        let query = self.query.get();
        match self.overview.state() {
            LoadState::Idle | LoadState::Loading => ListView::Loading,
            LoadState::Failed(message) => ListView::Error(message),
            LoadState::Loaded(overview) => {
                let rows: Vec<Payment> = overview
                    .payments
                    .into_iter()
                    .filter(|payment| payment.matches(&query))
                    .collect();
                if rows.is_empty() {
                    ListView::Empty(EMPTY_PAYMENTS)
                } else {
                    ListView::Rows(rows)
                }
            }
        }
    }

    /// Sum over the rows currently listed (search applied)
    pub fn listed_total(&self) -> f64 {
        match self.rows() {
            ListView::Rows(rows) => rows.iter().map(|payment| payment.amount_paid).sum(),
            _ => 0.0,
        }
    }

    pub fn listed_total_label(&self) -> String {
        format_currency(self.listed_total())
    }

    pub fn is_recording(&self) -> bool {
        self.recording.get()
    }

    pub async fn record_payment(&self, payment: NewPayment) -> Result<Payment, ActionError> {
        let result = self.submit_payment(&payment).await;
        let result = report(&self.ctx.notifications, result, "Payment recorded successfully");
        if result.is_ok() {
            self.load().await;
        }
        result
    }

    async fn submit_payment(&self, payment: &NewPayment) -> Result<Payment, ActionError> {
        if payment.student_id.trim().is_empty() {
            return Err(ActionError::Rejected("Select a student"));
        }
        if payment.term_id.trim().is_empty() {
            return Err(ActionError::Rejected("Select a term"));
        }
        if !(payment.amount_paid > 0.0) {
            return Err(ActionError::Rejected("Amount must be greater than zero"));
        }
        if self.recording.get() {
            return Err(ActionError::Rejected("A payment is already being recorded"));
        }

        self.recording.set(true);
        let result = self.ctx.api.record_payment(payment).await;
        self.recording.set(false);
        Ok(result?)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.overview.subscribe(callback.clone());
        self.query.subscribe(callback.clone());
        self.recording.subscribe(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use crate::test_support::Harness;
    use futures::executor::block_on;
    use serde_json::json;

    fn script_ledger(harness: &Harness) {
        harness.transport.respond(
            "/finance/payments/all",
            200,
            json!([
                { "id": "p1", "student_id": "s1", "term_id": "t1", "amount_paid": 1200.0,
                  "payment_method": "Bank Transfer", "reference_number": "TRX-9",
                  "payment_date": "2025-01-10T09:00:00" },
                { "id": "p2", "student_id": "s2", "term_id": "t1", "amount_paid": 300.5,
                  "payment_method": "Cash", "date": "2025-01-11T09:00:00" }
            ]),
        );
        harness.transport.respond(
            "/finance/stats",
            200,
            json!({ "total_revenue": 1500.5, "monthly_revenue": 300.5 }),
        );
    }

    #[test]
    fn overview_combines_ledger_and_stats() {
        let harness = Harness::signed_in();
        script_ledger(&harness);
        let vm = FinanceViewModel::new(harness.ctx.clone());
        block_on(vm.load());

        assert_eq!(vm.stats().map(|s| s.total_revenue), Some(1500.5));
        assert_eq!(vm.listed_total_label(), "$1,500.50");

        vm.set_query("cash");
        assert_eq!(vm.listed_total(), 300.5);
        vm.set_query("trx-9");
        assert!(matches!(vm.rows(), ListView::Rows(rows) if rows[0].id == "p1"));
    }

    #[test]
    fn one_failed_request_fails_the_page() {
        let harness = Harness::signed_in();
        script_ledger(&harness);
        harness
            .transport
            .respond("/finance/stats", 500, json!({ "detail": "Stats unavailable" }));
        let vm = FinanceViewModel::new(harness.ctx.clone());
        block_on(vm.load());

        assert_eq!(vm.rows(), ListView::Error("Stats unavailable".into()));
        assert_eq!(vm.stats(), None);
    }

    #[test]
    fn empty_ledger_shows_message() {
        let harness = Harness::signed_in();
        harness
            .transport
            .respond("/finance/payments/all", 200, json!([]));
        harness.transport.respond("/finance/stats", 200, json!({}));
        let vm = FinanceViewModel::new(harness.ctx.clone());
        block_on(vm.load());

        assert_eq!(vm.rows(), ListView::Empty(EMPTY_PAYMENTS));
        assert_eq!(vm.stats(), Some(FinanceStats::default()));
        assert_eq!(vm.listed_total(), 0.0);
    }

    #[test]
    fn recording_a_payment_reloads_the_ledger() {
        let harness = Harness::signed_in();
        script_ledger(&harness);
        harness.transport.respond(
            "/finance/payments",
            200,
            json!({ "id": "p3", "student_id": "s3", "term_id": "t1",
                    "amount_paid": 50.0, "payment_method": "Cash" }),
        );
        let vm = FinanceViewModel::new(harness.ctx.clone());

        let payment = block_on(vm.record_payment(NewPayment {
            student_id: "s3".into(),
            term_id: "t1".into(),
            amount_paid: 50.0,
            payment_method: "Cash".into(),
            reference_number: None,
        }))
        .unwrap();

        assert_eq!(payment.id, "p3");
        assert_eq!(harness.transport.count("/finance/payments/all"), 1);
        assert_eq!(harness.ctx.notifications.notifications()[0].severity, Severity::Success);
        assert!(!vm.is_recording());
    }

    #[test]
    fn zero_amount_is_rejected_locally() {
        let harness = Harness::signed_in();
        let vm = FinanceViewModel::new(harness.ctx.clone());

        let error = block_on(vm.record_payment(NewPayment {
            student_id: "s3".into(),
            term_id: "t1".into(),
            amount_paid: 0.0,
            payment_method: "Cash".into(),
            reference_number: None,
        }))
        .unwrap_err();

        assert_eq!(error, ActionError::Rejected("Amount must be greater than zero"));
        assert_eq!(harness.transport.count("/finance/payments"), 0);
    }
}
