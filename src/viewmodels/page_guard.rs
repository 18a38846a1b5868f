// ============================================================================
// PAGE GUARD - what a route shows for the current session status
// ============================================================================

use crate::app::Route;
use crate::state::AuthStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAccess {
    /// Session still resolving: neutral spinner, no page content, no redirect
    Loading,
    Render,
    Redirect(Route),
}

pub fn page_access(status: &AuthStatus, route: Route) -> PageAccess {
    match status {
        AuthStatus::Resolving => PageAccess::Loading,
        AuthStatus::Authenticated(_) if route.is_auth_page() => {
            PageAccess::Redirect(Route::Dashboard)
        }
        AuthStatus::Unauthenticated if route.requires_auth() => PageAccess::Redirect(Route::Login),
        _ => PageAccess::Render,
    }
}
