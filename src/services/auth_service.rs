use crate::models::{LoginRequest, RegisterRequest, TokenResponse, User};
use crate::services::api_client::{decode, ApiClient};
use crate::services::error::ApiError;
use crate::services::http_client::HttpMethod;

impl ApiClient {
    /// Exchange credentials for a bearer token
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        log::info!("🔐 Signing in {}", request.email);
        self.post("/auth/login", &request).await
    }

    /// Create a school admin account
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        log::info!("📝 Registering {} for {}", request.email, request.school_name);
        self.post("/auth/register", request).await
    }

    /// Current user for the stored token
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }

    /// Current user for a token that is not stored (yet)
    pub async fn me_with_token(&self, token: &str) -> Result<User, ApiError> {
        let value = self
            .fetch_with_token(HttpMethod::Get, "/auth/me", None, Some(token))
            .await?;
        decode(value)
    }
}
