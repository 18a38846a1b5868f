// ============================================================================
// DASHBOARD VIEWMODEL - headline counts
// ============================================================================
// Fails open: any count that cannot be fetched shows as zero, and the page
// never lands in an error state.
// ============================================================================

use crate::models::{format_currency, FinanceStats};
use crate::services::{ApiClient, ApiError};
use crate::state::AppContext;
use crate::viewmodels::resource_loader::ResourceLoader;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub students: usize,
    pub teachers: usize,
    pub classrooms: usize,
    pub finance: FinanceStats,
}

impl DashboardStats {
    /// (label, value) pairs in display order
    pub fn cards(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Students", self.students.to_string()),
            ("Total Teachers", self.teachers.to_string()),
            ("Classes", self.classrooms.to_string()),
            ("Revenue This Month", format_currency(self.finance.monthly_revenue)),
        ]
    }
}

fn or_default<T: Default>(what: &str, result: Result<T, ApiError>) -> T {
    result.unwrap_or_else(|e| {
        log::warn!("⚠️ Dashboard {} unavailable: {}", what, e);
        T::default()
    })
}

async fn fetch_stats(api: ApiClient) -> Result<DashboardStats, ApiError> {
    let (students, teachers, classrooms, finance) = futures::join!(
        api.students(None),
        api.teachers(),
        api.classrooms(),
        api.finance_stats()
    );

    Ok(DashboardStats {
        students: or_default("students", students).len(),
        teachers: or_default("teachers", teachers).len(),
        classrooms: or_default("classrooms", classrooms).len(),
        finance: or_default("finance stats", finance),
    })
}

#[derive(Clone)]
pub struct DashboardViewModel {
    ctx: AppContext,
    stats: ResourceLoader<DashboardStats>,
}

impl DashboardViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            stats: ResourceLoader::new(),
        }
    }

    pub async fn load(&self) {
        self.stats.load(fetch_stats(self.ctx.api.clone())).await;
    }

    pub fn is_loading(&self) -> bool {
        self.stats.data().is_none()
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats.data().unwrap_or_default()
    }

    pub fn greeting(&self) -> String {
        match self.ctx.session.current_user() {
            Some(user) if !user.first_name.is_empty() => format!("Welcome back, {}", user.first_name),
            _ => "Welcome back".to_string(),
        }
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.stats.subscribe(callback);
    }
}
