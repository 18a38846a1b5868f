// ============================================================================
// APP CONTEXT - everything a page needs, handed to its constructor
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::services::{ApiClient, HttpTransport};
use crate::state::notification_store::NotificationStore;
use crate::state::session_store::SessionStore;
use crate::utils::storage::KeyValueStorage;
use crate::utils::timer::Scheduler;

#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<AppConfig>,
    pub api: ApiClient,
    pub session: SessionStore,
    pub notifications: NotificationStore,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn KeyValueStorage>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        let api = ApiClient::new(&config.api_base_url, transport, storage);
        let session = SessionStore::new(api.clone());
        let notifications = NotificationStore::new(scheduler, config.notification_duration_ms);

        Self {
            config: Rc::new(config),
            api,
            session,
            notifications,
        }
    }

    /// fetch + localStorage + setTimeout
    #[cfg(target_arch = "wasm32")]
    pub fn browser(config: AppConfig) -> Self {
        use crate::services::FetchTransport;
        use crate::utils::{BrowserScheduler, BrowserStorage};

        Self::new(
            config,
            Rc::new(FetchTransport),
            Rc::new(BrowserStorage),
            Rc::new(BrowserScheduler),
        )
    }
}
