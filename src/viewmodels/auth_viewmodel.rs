// ============================================================================
// AUTH VIEWMODELS - login and school registration forms
// ============================================================================
// Both forms report failures inline (error slot), not through toasts.
// ============================================================================

use crate::models::{RegisterRequest, User};
use crate::state::{AppContext, ReactiveState};
use crate::utils::constants::ROLE_SCHOOL_ADMIN;
use crate::viewmodels::action::ActionError;

#[derive(Clone)]
pub struct LoginViewModel {
    ctx: AppContext,
    email: ReactiveState<String>,
    password: ReactiveState<String>,
    error: ReactiveState<Option<String>>,
    submitting: ReactiveState<bool>,
}

impl LoginViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            email: ReactiveState::default(),
            password: ReactiveState::default(),
            error: ReactiveState::new(None),
            submitting: ReactiveState::new(false),
        }
    }

    pub fn set_email(&self, email: &str) {
        self.email.set(email.to_string());
    }

    pub fn set_password(&self, password: &str) {
        self.password.set(password.to_string());
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Credentials -> token -> session. The session only keeps the token once the user resolves.
    pub async fn submit(&self) -> Result<User, ActionError> {
        if self.submitting.get() {
            return Err(ActionError::Rejected("Signing in, please wait"));
        }
        self.error.set(None);
        self.submitting.set(true);
        let result = self.sign_in().await;
        self.submitting.set(false);

        if let Err(e) = &result {
            log::warn!("⚠️ Sign-in failed: {}", e);
            self.error.set(Some(e.to_string()));
        }
        result
    }

    async fn sign_in(&self) -> Result<User, ActionError> {
        let email = self.email.get();
        let password = self.password.get();
        if email.trim().is_empty() || password.is_empty() {
            return Err(ActionError::Rejected("Email and password are required"));
        }

        let token = self.ctx.api.sign_in(&email, &password).await?;
        Ok(self.ctx.session.login(&token.access_token).await?)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.error.subscribe(callback.clone());
        self.submitting.subscribe(callback);
    }
}

#[derive(Clone)]
pub struct RegisterViewModel {
    ctx: AppContext,
    form: ReactiveState<RegisterRequest>,
    error: ReactiveState<Option<String>>,
    submitting: ReactiveState<bool>,
}

impl RegisterViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: ReactiveState::new(RegisterRequest {
                role: ROLE_SCHOOL_ADMIN.to_string(),
                ..RegisterRequest::default()
            }),
            error: ReactiveState::new(None),
            submitting: ReactiveState::new(false),
        }
    }

    pub fn form(&self) -> RegisterRequest {
        self.form.get()
    }

    pub fn edit<F>(&self, change: F)
    where
        F: FnOnce(&mut RegisterRequest),
    {
        self.form.update(change);
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Creates the school and its admin. On Ok the page moves on to login.
    pub async fn submit(&self) -> Result<User, ActionError> {
        if self.submitting.get() {
            return Err(ActionError::Rejected("Creating your account, please wait"));
        }
        self.error.set(None);
        self.submitting.set(true);
        let result = self.register().await;
        self.submitting.set(false);

        match &result {
            Ok(user) => {
                log::info!("✅ Registered {}", user.email);
                self.ctx
                    .notifications
                    .success("Registration successful. Please sign in.");
            }
            Err(e) => self.error.set(Some(e.to_string())),
        }
        result
    }

    async fn register(&self) -> Result<User, ActionError> {
        let mut request = self.form.get();
        // Self-service sign-up always creates a school administrator
        request.role = ROLE_SCHOOL_ADMIN.to_string();

        let required = [
            &request.first_name,
            &request.last_name,
            &request.email,
            &request.school_name,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(ActionError::Rejected("All fields are required"));
        }
        if request.password.len() < 8 {
            return Err(ActionError::Rejected("Password must be at least 8 characters"));
        }

        Ok(self.ctx.api.register(&request).await?)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.form.subscribe(callback.clone());
        self.error.subscribe(callback.clone());
        self.submitting.subscribe(callback);
    }
}
