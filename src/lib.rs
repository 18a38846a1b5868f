// ============================================================================
// SCHOOL ADMIN DASHBOARD - FRONTEND MVVM (RUST + WASM)
// ============================================================================
// - Services: HTTP only (ApiClient + one impl block per API area)
// - State: process-wide stores (session, notifications) with Rc<RefCell>
// - ViewModels: page state + UI logic, one per page
// - Models: records shared with the backend
// Browser bindings sit behind seams so everything above runs natively in tests.
// The wasm build exports the session, notifications and routing to the JS
// shell; page view-models are driven from Rust (rlib) UI code.
// ============================================================================

pub mod app;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
mod test_support;

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::{App, Route};
    use crate::config::CONFIG;
    use crate::state::AppContext;
    use crate::viewmodels::{LoginViewModel, RegisterViewModel};

    /// Fired on `window` whenever the route, session or notifications change
    const CHANGE_EVENT: &str = "dashboard:change";

    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    fn current_hash_route() -> Route {
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .map(|hash| Route::from_path(hash.trim_start_matches('#')))
            .unwrap_or(Route::Landing)
    }

    fn announce_change() {
        let Some(window) = web_sys::window() else {
            return;
        };
        match web_sys::Event::new(CHANGE_EVENT) {
            Ok(event) => {
                if let Err(e) = window.dispatch_event(&event) {
                    log::error!("❌ Could not dispatch {}: {:?}", CHANGE_EVENT, e);
                }
            }
            Err(e) => log::error!("❌ Could not create {}: {:?}", CHANGE_EVENT, e),
        }
    }

    fn with_app<R>(f: impl FnOnce(&App) -> R) -> Result<R, JsValue> {
        APP.with(|cell| cell.borrow().as_ref().map(f))
            .ok_or_else(|| JsValue::from_str("Dashboard has not started"))
    }

    fn to_js_error(error: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&error.to_string())
    }

    fn write_hash(route: Route) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_hash(route.path()) {
                log::error!("❌ Could not update location: {:?}", e);
            }
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if CONFIG.enable_logging {
            wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
        }
        log::info!(
            "🚀 School admin dashboard ({}) -> {}",
            CONFIG.environment,
            CONFIG.api_base_url
        );

        let ctx = AppContext::browser(CONFIG.clone());
        let app = App::new(ctx, current_hash_route());

        // Route -> location.hash
        {
            let reader = app.clone();
            app.subscribe(move || write_hash(reader.route()));
        }

        app.subscribe(announce_change);
        app.context().session.subscribe(announce_change);
        app.context().notifications.subscribe(announce_change);

        // location.hash -> route (back/forward, typed URLs)
        if let Some(window) = web_sys::window() {
            let target = app.clone();
            let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                target.navigate(current_hash_route());
                target.apply_guard();
            }) as Box<dyn FnMut(web_sys::Event)>);
            window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
            // Registered once for the page lifetime
            closure.forget();
        }

        APP.with(|cell| {
            *cell.borrow_mut() = Some(app.clone());
        });

        wasm_bindgen_futures::spawn_local(async move {
            let access = app.boot().await;
            log::info!("✅ Boot finished on {} ({:?})", app.route().path(), access);
        });

        Ok(())
    }

    /// Route the JS shell should render right now
    #[wasm_bindgen]
    pub fn current_route() -> String {
        APP.with(|cell| {
            cell.borrow()
                .as_ref()
                .map(|app| app.route().path().to_string())
                .unwrap_or_else(|| Route::Landing.path().to_string())
        })
    }

    #[wasm_bindgen]
    pub fn navigate(path: String) -> Result<(), JsValue> {
        with_app(|app| {
            app.navigate(Route::from_path(&path));
            app.apply_guard();
        })
    }

    /// Signed-in user as JSON, if any
    #[wasm_bindgen]
    pub fn current_user() -> Result<Option<String>, JsValue> {
        let user = with_app(|app| app.context().session.current_user())?;
        user.map(|user| serde_json::to_string(&user).map_err(to_js_error))
            .transpose()
    }

    /// Exchanges credentials for a session; resolves with the user as JSON
    #[wasm_bindgen]
    pub async fn login(email: String, password: String) -> Result<JsValue, JsValue> {
        let vm = LoginViewModel::new(with_app(|app| app.context().clone())?);
        vm.set_email(&email);
        vm.set_password(&password);
        let user = vm.submit().await.map_err(to_js_error)?;
        let json = serde_json::to_string(&user).map_err(to_js_error)?;
        Ok(JsValue::from_str(&json))
    }

    #[wasm_bindgen]
    pub async fn register(
        first_name: String,
        last_name: String,
        email: String,
        password: String,
        school_name: String,
    ) -> Result<JsValue, JsValue> {
        let vm = RegisterViewModel::new(with_app(|app| app.context().clone())?);
        vm.edit(|form| {
            form.first_name = first_name;
            form.last_name = last_name;
            form.email = email;
            form.password = password;
            form.school_name = school_name;
        });
        let user = vm.submit().await.map_err(to_js_error)?;
        with_app(|app| app.navigate(Route::Login))?;
        Ok(JsValue::from_str(&user.email))
    }

    #[wasm_bindgen]
    pub fn logout() -> Result<(), JsValue> {
        with_app(App::logout)
    }

    /// Visible toasts as a JSON array, oldest first
    #[wasm_bindgen]
    pub fn notifications() -> Result<String, JsValue> {
        let items = with_app(|app| app.context().notifications.notifications())?;
        serde_json::to_string(&items).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn dismiss_notification(id: String) -> Result<bool, JsValue> {
        with_app(|app| app.context().notifications.dismiss(&id))
    }
}
