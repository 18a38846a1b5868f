// ============================================================================
// STATE MODULE - process-wide stores (Rc<RefCell> + subscribers)
// ============================================================================

pub mod app_context;
pub mod notification_store;
pub mod reactivity;
pub mod session_store;

pub use app_context::AppContext;
pub use notification_store::NotificationStore;
pub use reactivity::ReactiveState;
pub use session_store::{AuthStatus, SessionError, SessionStore};
