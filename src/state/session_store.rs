// ============================================================================
// SESSION STORE - who is logged in
// ============================================================================
// Unauthenticated -> Resolving on restore()/login()
// Resolving -> Authenticated | Unauthenticated when the user lookup settles
// Authenticated -> Unauthenticated on logout() or any 401
//
// A stored token always belongs to the authenticated user: login() persists
// the token only once /auth/me accepted it.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

use crate::models::User;
use crate::services::{ApiClient, ApiError};
use crate::state::reactivity::ReactiveState;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    Unauthenticated,
    Resolving,
    Authenticated(User),
}

impl AuthStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, AuthStatus::Resolving)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Sign-in returned an empty token")]
    EmptyToken,

    /// A newer restore/login/logout happened while this one was resolving
    #[error("Sign-in was interrupted, please try again")]
    Superseded,
}

#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    status: ReactiveState<AuthStatus>,
    generation: Rc<Cell<u64>>,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        let status = ReactiveState::new(AuthStatus::Unauthenticated);

        {
            let status = status.clone();
            api.on_unauthorized(move || {
                let was_authenticated =
                    status.with(|current| matches!(current, AuthStatus::Authenticated(_)));
                if was_authenticated {
                    log::warn!("🔒 Session rejected by the API, signing out");
                    status.set(AuthStatus::Unauthenticated);
                }
            });
        }

        Self {
            api,
            status,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status.get()
    }

    pub fn current_user(&self) -> Option<User> {
        self.status.with(|status| match status {
            AuthStatus::Authenticated(user) => Some(user.clone()),
            _ => None,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.status
            .with(|status| matches!(status, AuthStatus::Authenticated(_)))
    }

    pub fn is_resolving(&self) -> bool {
        !self.status.with(AuthStatus::is_settled)
    }

    pub fn token(&self) -> Option<String> {
        self.api.stored_token()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.status.subscribe(callback);
    }

    /// Best-effort restore from the stored token. Never reports an error.
    pub async fn restore(&self) -> Option<User> {
        let Some(token) = self.api.stored_token() else {
            log::info!("ℹ️ No stored token, starting signed out");
            self.invalidate();
            self.status.set(AuthStatus::Unauthenticated);
            return None;
        };

        let ticket = self.begin();
        log::info!("🔐 Restoring session from stored token");

        match self.api.me_with_token(&token).await {
            Ok(user) => {
                if !self.is_current(ticket) {
                    log::debug!("⏭️ Restore superseded, discarding result");
                    return self.current_user();
                }
                log::info!("✅ Session restored for {}", user.email);
                self.status.set(AuthStatus::Authenticated(user.clone()));
                Some(user)
            }
            Err(e) => {
                if self.is_current(ticket) {
                    log::warn!("⚠️ Stored token rejected ({}), clearing it", e);
                    self.api.clear_token();
                    self.status.set(AuthStatus::Unauthenticated);
                }
                None
            }
        }
    }

    /// Resolve the user behind `token`; only then persist the token
    pub async fn login(&self, token: &str) -> Result<User, SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let ticket = self.begin();
        log::info!("🔐 Resolving user for new token");

        match self.api.me_with_token(token).await {
            Ok(user) => {
                if !self.is_current(ticket) {
                    log::warn!("⏭️ Login superseded before it resolved");
                    return Err(SessionError::Superseded);
                }
                self.api.store_token(token);
                log::info!("✅ Logged in as {} ({})", user.email, user.role);
                self.status.set(AuthStatus::Authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                if self.is_current(ticket) {
                    log::error!("❌ Login failed: {}", e);
                    self.api.clear_token();
                    self.status.set(AuthStatus::Unauthenticated);
                }
                Err(e.into())
            }
        }
    }

    /// Synchronous, no network
    pub fn logout(&self) {
        log::info!("👋 Logout");
        self.invalidate();
        self.api.clear_token();
        self.status.set(AuthStatus::Unauthenticated);
    }

    fn begin(&self) -> u64 {
        let ticket = self.invalidate();
        self.status.set(AuthStatus::Resolving);
        ticket
    }

    fn invalidate(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.get() == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_json, json_response, Harness};
    use crate::utils::constants::STORAGE_KEY_AUTH_TOKEN;
    use crate::utils::storage::KeyValueStorage;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use serde_json::json;

    #[test]
    fn restore_without_token_makes_no_request() {
        let harness = Harness::new();
        let user = block_on(harness.ctx.session.restore());

        assert_eq!(user, None);
        assert_eq!(harness.ctx.session.status(), AuthStatus::Unauthenticated);
        assert!(harness.transport.requests().is_empty());
    }

    #[test]
    fn restore_resolves_stored_token() {
        let harness = Harness::new();
        harness.storage.set_item(STORAGE_KEY_AUTH_TOKEN, "tok").unwrap();
        harness.transport.respond("/auth/me", 200, admin_json());

        let user = block_on(harness.ctx.session.restore()).unwrap();
        assert_eq!(user.school_id.as_deref(), Some("school-1"));
        assert!(harness.ctx.session.is_authenticated());
        assert_eq!(
            harness.transport.requests()[0].header("authorization"),
            Some("Bearer tok")
        );
    }

    #[test]
    fn failed_restore_clears_token_silently() {
        let harness = Harness::new();
        harness.storage.set_item(STORAGE_KEY_AUTH_TOKEN, "expired").unwrap();
        harness
            .transport
            .respond("/auth/me", 401, json!({ "detail": "Could not validate credentials" }));

        assert_eq!(block_on(harness.ctx.session.restore()), None);
        assert_eq!(harness.token(), None);
        assert_eq!(harness.ctx.session.status(), AuthStatus::Unauthenticated);
        assert!(harness.ctx.notifications.notifications().is_empty());
    }

    #[test]
    fn login_then_logout_leaves_nothing_behind() {
        let harness = Harness::new();
        harness.transport.respond("/auth/me", 200, admin_json());

        let user = block_on(harness.ctx.session.login("tok-new")).unwrap();
        assert_eq!(user.first_name, "Grace");
        assert_eq!(harness.token().as_deref(), Some("tok-new"));

        harness.ctx.session.logout();
        assert_eq!(harness.token(), None);
        assert_eq!(harness.ctx.session.current_user(), None);
        assert_eq!(harness.transport.requests().len(), 1);
    }

    #[test]
    fn failed_login_does_not_store_token() {
        let harness = Harness::new();
        harness
            .transport
            .respond("/auth/me", 500, json!({ "detail": "Database unavailable" }));

        let error = block_on(harness.ctx.session.login("tok-new")).unwrap_err();
        assert_eq!(error.to_string(), "Database unavailable");
        assert_eq!(harness.token(), None);
        assert_eq!(harness.ctx.session.status(), AuthStatus::Unauthenticated);
    }

    #[test]
    fn empty_token_is_rejected_locally() {
        let harness = Harness::new();
        assert_eq!(
            block_on(harness.ctx.session.login("  ")),
            Err(SessionError::EmptyToken)
        );
        assert!(harness.transport.requests().is_empty());
    }

    #[test]
    fn any_401_ends_an_authenticated_session() {
        let harness = Harness::signed_in();
        assert!(harness.ctx.session.is_authenticated());
        harness
            .transport
            .respond("/students/", 401, json!({ "detail": "Token expired" }));

        let _ = block_on(harness.ctx.api.students(None));
        assert_eq!(harness.ctx.session.status(), AuthStatus::Unauthenticated);
        assert_eq!(harness.token(), None);
    }

    #[test]
    fn late_401_from_a_previous_session_is_ignored() {
        let harness = Harness::signed_in();
        let reply = harness.transport.defer("/students/");
        let mut pool = LocalPool::new();

        let api = harness.ctx.api.clone();
        pool.spawner()
            .spawn_local(async move {
                let _ = api.students(None).await;
            })
            .unwrap();
        pool.run_until_stalled();

        harness.ctx.session.logout();
        block_on(harness.ctx.session.login("tok-b")).unwrap();
        assert_eq!(harness.token().as_deref(), Some("tok-b"));

        reply
            .send(json_response(401, json!({ "detail": "Token expired" })))
            .unwrap();
        pool.run_until_stalled();

        assert_eq!(harness.token().as_deref(), Some("tok-b"));
        assert!(harness.ctx.session.is_authenticated());
    }

    #[test]
    fn status_is_resolving_while_lookup_is_pending() {
        let harness = Harness::new();
        let reply = harness.transport.defer("/auth/me");
        let mut pool = LocalPool::new();

        let session = harness.ctx.session.clone();
        pool.spawner()
            .spawn_local(async move {
                let _ = session.login("tok").await;
            })
            .unwrap();
        pool.run_until_stalled();
        assert!(harness.ctx.session.is_resolving());
        assert_eq!(harness.token(), None);

        reply.send(json_response(200, admin_json())).unwrap();
        pool.run_until_stalled();
        assert!(harness.ctx.session.is_authenticated());
        assert_eq!(harness.token().as_deref(), Some("tok"));
    }

    #[test]
    fn logout_during_login_wins() {
        let harness = Harness::new();
        let reply = harness.transport.defer("/auth/me");
        let mut pool = LocalPool::new();
        let outcome = Rc::new(std::cell::RefCell::new(None));

        let session = harness.ctx.session.clone();
        let sink = outcome.clone();
        pool.spawner()
            .spawn_local(async move {
                *sink.borrow_mut() = Some(session.login("tok").await);
            })
            .unwrap();
        pool.run_until_stalled();

        harness.ctx.session.logout();
        reply.send(json_response(200, admin_json())).unwrap();
        pool.run_until_stalled();

        assert_eq!(*outcome.borrow(), Some(Err(SessionError::Superseded)));
        assert_eq!(harness.ctx.session.status(), AuthStatus::Unauthenticated);
        assert_eq!(harness.token(), None);
    }

    #[test]
    fn subscribers_see_each_transition() {
        let harness = Harness::new();
        harness.transport.respond("/auth/me", 200, admin_json());
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));

        let session = harness.ctx.session.clone();
        let sink = seen.clone();
        harness
            .ctx
            .session
            .subscribe(move || sink.borrow_mut().push(session.is_authenticated()));

        block_on(harness.ctx.session.login("tok")).unwrap();
        harness.ctx.session.logout();
        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }
}
