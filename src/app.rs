// ============================================================================
// APP - routes, page access and boot
// ============================================================================

use crate::state::{AppContext, ReactiveState};
use crate::viewmodels::page_guard::{page_access, PageAccess};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Students,
    Teachers,
    Academic,
    Attendance,
    Grades,
    ReportCards,
    Finance,
    Settings,
    NotFound,
}

impl Route {
    /// Sidebar order
    pub const NAVIGATION: [Route; 9] = [
        Route::Dashboard,
        Route::Students,
        Route::Teachers,
        Route::Academic,
        Route::Attendance,
        Route::Grades,
        Route::ReportCards,
        Route::Finance,
        Route::Settings,
    ];

    /// Query string and trailing slash are ignored
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.trim_end_matches('/');
        match path {
            "" => Route::Landing,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/students" => Route::Students,
            "/teachers" => Route::Teachers,
            "/academic" => Route::Academic,
            "/attendance" => Route::Attendance,
            "/performance/grades" => Route::Grades,
            "/performance/report-cards" => Route::ReportCards,
            "/finance" => Route::Finance,
            "/settings" => Route::Settings,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Students => "/students",
            Route::Teachers => "/teachers",
            Route::Academic => "/academic",
            Route::Attendance => "/attendance",
            Route::Grades => "/performance/grades",
            Route::ReportCards => "/performance/report-cards",
            Route::Finance => "/finance",
            Route::Settings => "/settings",
            Route::NotFound => "/404",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Landing => "SmartSchool",
            Route::Login => "Sign In",
            Route::Register => "Create Your School",
            Route::Dashboard => "Dashboard",
            Route::Students => "Students",
            Route::Teachers => "Teachers",
            Route::Academic => "Academic Setup",
            Route::Attendance => "Attendance",
            Route::Grades => "Assessments & Grades",
            Route::ReportCards => "Report Cards",
            Route::Finance => "Finance",
            Route::Settings => "Settings",
            Route::NotFound => "Page Not Found",
        }
    }

    pub fn requires_auth(self) -> bool {
        !matches!(
            self,
            Route::Landing | Route::Login | Route::Register | Route::NotFound
        )
    }

    /// Pages a signed-in user is sent away from
    pub fn is_auth_page(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// Current route + the session guard that keeps it legal
#[derive(Clone)]
pub struct App {
    ctx: AppContext,
    route: ReactiveState<Route>,
}

impl App {
    pub fn new(ctx: AppContext, initial: Route) -> Self {
        let app = Self {
            ctx,
            route: ReactiveState::new(initial),
        };

        // Re-check access whenever the session moves (login, logout, 401)
        let guard = app.clone();
        app.ctx.session.subscribe(move || {
            guard.apply_guard();
        });

        app
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn route(&self) -> Route {
        self.route.get()
    }

    pub fn navigate(&self, route: Route) {
        if self.route.get() != route {
            log::info!("🧭 {} -> {}", self.route.get().path(), route.path());
            self.route.set(route);
        }
    }

    pub fn access(&self) -> PageAccess {
        page_access(&self.ctx.session.status(), self.route.get())
    }

    /// Follow a redirect if the guard asks for one; returns what to show
    pub fn apply_guard(&self) -> PageAccess {
        match self.access() {
            PageAccess::Redirect(target) => {
                self.navigate(target);
                self.access()
            }
            access => access,
        }
    }

    /// Restore the stored session, then settle the initial route
    pub async fn boot(&self) -> PageAccess {
        log::info!("🚀 Booting on {}", self.route.get().path());
        self.ctx.session.restore().await;
        self.apply_guard()
    }

    pub fn logout(&self) {
        self.ctx.session.logout();
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.route.subscribe(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_json, Harness};
    use crate::utils::constants::STORAGE_KEY_AUTH_TOKEN;
    use crate::utils::storage::KeyValueStorage;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn paths_round_trip_and_tolerate_noise() {
        for route in Route::NAVIGATION {
            assert_eq!(Route::from_path(route.path()), route);
        }
        assert_eq!(Route::from_path("/"), Route::Landing);
        assert_eq!(Route::from_path("/login?registered=true"), Route::Login);
        assert_eq!(Route::from_path("/students/"), Route::Students);
        assert_eq!(Route::from_path("/nowhere"), Route::NotFound);
        assert!(!Route::NotFound.requires_auth());
    }

    #[test]
    fn boot_without_token_lands_on_login() {
        let harness = Harness::new();
        let app = App::new(harness.ctx.clone(), Route::Attendance);

        assert_eq!(block_on(app.boot()), PageAccess::Render);
        assert_eq!(app.route(), Route::Login);
        assert!(harness.transport.requests().is_empty());
    }

    #[test]
    fn boot_with_valid_token_keeps_the_page() {
        let harness = Harness::new();
        harness
            .storage
            .set_item(STORAGE_KEY_AUTH_TOKEN, "tok")
            .unwrap();
        harness.transport.respond("/auth/me", 200, admin_json());
        let app = App::new(harness.ctx.clone(), Route::Finance);

        assert_eq!(block_on(app.boot()), PageAccess::Render);
        assert_eq!(app.route(), Route::Finance);
    }

    #[test]
    fn signing_in_leaves_the_login_page() {
        let harness = Harness::new();
        harness.transport.respond("/auth/me", 200, admin_json());
        let app = App::new(harness.ctx.clone(), Route::Login);

        block_on(harness.ctx.session.login("tok")).unwrap();
        assert_eq!(app.route(), Route::Dashboard);
    }

    #[test]
    fn a_401_anywhere_sends_the_user_to_login() {
        let harness = Harness::signed_in();
        let app = App::new(harness.ctx.clone(), Route::Students);
        assert_eq!(app.apply_guard(), PageAccess::Render);

        harness
            .transport
            .respond("/students/", 401, json!({ "detail": "Token expired" }));
        let _ = block_on(harness.ctx.api.students(None));
        assert_eq!(app.route(), Route::Login);
    }

    #[test]
    fn logout_redirects_from_protected_pages() {
        let harness = Harness::signed_in();
        let app = App::new(harness.ctx.clone(), Route::Settings);
        app.logout();
        assert_eq!(app.route(), Route::Login);
        assert_eq!(harness.token(), None);
    }
}
