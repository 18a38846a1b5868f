// ============================================================================
// API CLIENT - the only network boundary
// ============================================================================
// Attaches JSON + bearer headers, clears the stored token on 401 and turns
// failed responses into `ApiError` carrying the server `detail`.
// Endpoint methods live next to their domain in the other service modules.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::services::error::ApiError;
use crate::services::http_client::{HttpMethod, HttpRequest, HttpTransport};
use crate::utils::constants::STORAGE_KEY_AUTH_TOKEN;
use crate::utils::storage::KeyValueStorage;

type Listener = Rc<dyn Fn()>;

/// Cheap to clone; clones share transport, storage and listeners
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    transport: Rc<dyn HttpTransport>,
    storage: Rc<dyn KeyValueStorage>,
    unauthorized_listeners: Rc<RefCell<Vec<Listener>>>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn KeyValueStorage>,
    ) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
            transport,
            storage,
            unauthorized_listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Token currently persisted in storage
    pub fn stored_token(&self) -> Option<String> {
        self.storage
            .get_item(STORAGE_KEY_AUTH_TOKEN)
            .filter(|token| !token.is_empty())
    }

    pub fn store_token(&self, token: &str) {
        if let Err(e) = self.storage.set_item(STORAGE_KEY_AUTH_TOKEN, token) {
            log::error!("❌ Could not persist auth token: {}", e);
        }
    }

    pub fn clear_token(&self) {
        if let Err(e) = self.storage.remove_item(STORAGE_KEY_AUTH_TOKEN) {
            log::warn!("⚠️ Could not remove auth token: {}", e);
        }
    }

    /// Called after a 401 for the stored token, once it has been cleared
    pub fn on_unauthorized<F>(&self, listener: F)
    where
        F: Fn() + 'static,
    {
        self.unauthorized_listeners
            .borrow_mut()
            .push(Rc::new(listener));
    }

    /// Raw call: JSON in, JSON out, with the stored token
    pub async fn fetch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let token = self.stored_token();
        self.fetch_with_token(method, path, body, token.as_deref())
            .await
    }

    /// Raw call with an explicit token instead of the stored one
    pub async fn fetch_with_token(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let request = HttpRequest {
            method,
            url: self.url(path),
            headers,
            body: body.map(|value| value.to_string()),
        };

        log::debug!("➡️ {} {}", method.as_str(), path);
        let response = self.transport.send(request).await?;

        if response.status == 401 {
            // Only the token still in force may be revoked by a rejection
            if self.stored_token().as_deref() == token {
                log::warn!("🔒 {} {} answered 401, clearing stored token", method.as_str(), path);
                self.clear_token();
                self.notify_unauthorized();
            } else {
                log::debug!("⏭️ {} {} answered 401 for a replaced token, ignoring", method.as_str(), path);
            }
        }

        let parsed = parse_body(&response.body);

        if !response.ok() {
            let error = ApiError::from_status(response.status, parsed.as_ref().ok());
            log::error!("❌ {} {} -> {}: {}", method.as_str(), path, response.status, error);
            return Err(error);
        }

        parsed.map_err(ApiError::Decode)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.fetch(HttpMethod::Get, path, None).await?;
        decode(value)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.fetch(HttpMethod::Post, path, Some(encode(body)?)).await?;
        decode(value)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.fetch(HttpMethod::Patch, path, Some(encode(body)?)).await?;
        decode(value)
    }

    fn notify_unauthorized(&self) {
        // Snapshot so a listener may register another without a double borrow
        let listeners: Vec<Listener> = self.unauthorized_listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }
}

/// Empty body is JSON null (204 and friends)
fn parse_body(body: &str) -> Result<Value, String> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| format!("invalid JSON body: {}", e))
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("could not encode request: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedTransport, TEST_BASE_URL};
    use crate::utils::storage::MemoryStorage;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::Cell;

    fn client(transport: &ScriptedTransport, storage: &MemoryStorage) -> ApiClient {
        ApiClient::new(TEST_BASE_URL, Rc::new(transport.clone()), Rc::new(storage.clone()))
    }

    #[test]
    fn attaches_json_and_bearer_headers() {
        let transport = ScriptedTransport::new();
        transport.respond("/students/", 200, json!([]));
        let storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY_AUTH_TOKEN, "tok-1").unwrap();

        let value = block_on(client(&transport, &storage).fetch(HttpMethod::Get, "/students/", None)).unwrap();
        assert_eq!(value, json!([]));

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://api.test/api/v1/students/");
        assert_eq!(sent[0].header("content-type"), Some("application/json"));
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok-1"));
    }

    #[test]
    fn no_token_means_no_authorization_header() {
        let transport = ScriptedTransport::new();
        transport.respond("/auth/login", 200, json!({ "access_token": "t" }));
        let storage = MemoryStorage::new();

        let _: Value = block_on(client(&transport, &storage).post("/auth/login", &json!({ "email": "a" }))).unwrap();
        let sent = transport.requests();
        assert_eq!(sent[0].header("authorization"), None);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"email":"a"}"#));
    }

    #[test]
    fn unauthorized_clears_token_and_notifies() {
        let transport = ScriptedTransport::new();
        transport.respond("/auth/me", 401, json!({ "detail": "Token expired" }));
        let storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY_AUTH_TOKEN, "stale").unwrap();
        let api = client(&transport, &storage);

        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        api.on_unauthorized(move || counter.set(counter.get() + 1));

        let error = block_on(api.fetch(HttpMethod::Get, "/auth/me", None)).unwrap_err();
        assert_eq!(error, ApiError::Unauthorized { detail: "Token expired".into() });
        assert_eq!(storage.get_item(STORAGE_KEY_AUTH_TOKEN), None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unauthorized_for_a_replaced_token_keeps_the_new_one() {
        let transport = ScriptedTransport::new();
        transport.respond("/students/", 401, json!({ "detail": "Token expired" }));
        let storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY_AUTH_TOKEN, "tok-b").unwrap();
        let api = client(&transport, &storage);

        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        api.on_unauthorized(move || counter.set(counter.get() + 1));

        let error = block_on(api.fetch_with_token(HttpMethod::Get, "/students/", None, Some("tok-a")))
            .unwrap_err();
        assert!(matches!(error, ApiError::Unauthorized { .. }));
        assert_eq!(storage.get_item(STORAGE_KEY_AUTH_TOKEN).as_deref(), Some("tok-b"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn failure_without_json_body_uses_fallback() {
        let transport = ScriptedTransport::new();
        transport.respond_raw("/finance/stats", 502, "<html>Bad gateway</html>");
        let storage = MemoryStorage::new();

        let error = block_on(client(&transport, &storage).fetch(HttpMethod::Get, "/finance/stats", None)).unwrap_err();
        assert_eq!(error, ApiError::Status { status: 502, detail: "Something went wrong".into() });
    }

    #[test]
    fn success_with_garbage_body_is_a_decode_error() {
        let transport = ScriptedTransport::new();
        transport.respond_raw("/subjects/", 200, "not json");
        let storage = MemoryStorage::new();

        let error = block_on(client(&transport, &storage).fetch(HttpMethod::Get, "/subjects/", None)).unwrap_err();
        assert!(matches!(error, ApiError::Decode(_)));
    }

    #[test]
    fn empty_success_body_is_null() {
        let transport = ScriptedTransport::new();
        transport.respond_raw("/schools/s1", 204, "");
        let storage = MemoryStorage::new();

        let value = block_on(client(&transport, &storage).fetch(HttpMethod::Delete, "/schools/s1", None)).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn transport_failure_surfaces_as_network_error() {
        let transport = ScriptedTransport::new();
        let storage = MemoryStorage::new();

        let error = block_on(client(&transport, &storage).fetch(HttpMethod::Get, "/students/", None)).unwrap_err();
        assert!(matches!(error, ApiError::Network(_)));
    }
}
