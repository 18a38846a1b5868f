// ============================================================================
// VIEWMODELS - page state + UI logic, no DOM
// ============================================================================
// Every page view-model takes the AppContext, owns its loaders and exposes
// plain getters for the renderer plus a subscribe() for redraws.
// ============================================================================

pub mod academic_viewmodel;
pub mod action;
pub mod attendance_viewmodel;
pub mod auth_viewmodel;
pub mod dashboard_viewmodel;
pub mod finance_viewmodel;
pub mod grades_viewmodel;
pub mod page_guard;
pub mod report_cards_viewmodel;
pub mod resource_loader;
pub mod settings_viewmodel;
pub mod students_viewmodel;
pub mod teachers_viewmodel;

pub use academic_viewmodel::{AcademicTab, AcademicViewModel};
pub use action::ActionError;
pub use attendance_viewmodel::{AttendanceRow, AttendanceViewModel};
pub use auth_viewmodel::{LoginViewModel, RegisterViewModel};
pub use dashboard_viewmodel::{DashboardStats, DashboardViewModel};
pub use finance_viewmodel::FinanceViewModel;
pub use grades_viewmodel::GradesViewModel;
pub use page_guard::{page_access, PageAccess};
pub use report_cards_viewmodel::ReportCardsViewModel;
pub use resource_loader::{ListView, LoadState, ResourceLoader};
pub use settings_viewmodel::{SettingsSection, SettingsViewModel};
pub use students_viewmodel::StudentsViewModel;
pub use teachers_viewmodel::TeachersViewModel;
