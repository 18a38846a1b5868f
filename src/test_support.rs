// Test doubles for the transport/storage/timer seams

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use crate::config::AppConfig;
use crate::services::error::ApiError;
use crate::services::http_client::{HttpRequest, HttpResponse, HttpTransport};
use crate::state::AppContext;
use crate::utils::constants::STORAGE_KEY_AUTH_TOKEN;
use crate::utils::storage::{KeyValueStorage, MemoryStorage};
use crate::utils::timer::ManualScheduler;

pub const TEST_BASE_URL: &str = "http://api.test/api/v1";

enum Scripted {
    Ready(HttpResponse),
    Deferred(oneshot::Receiver<HttpResponse>),
}

#[derive(Default)]
struct Script {
    responses: RefCell<HashMap<String, VecDeque<Scripted>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

/// Answers by path (query included). The latest ready answer for a path repeats;
/// deferred answers are consumed once. Unscripted paths fail as network errors.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<Script>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.respond_raw(path, status, &body.to_string());
    }

    pub fn respond_raw(&self, path: &str, status: u16, body: &str) {
        self.push(
            path,
            Scripted::Ready(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    /// Hold the answer until the returned sender fires
    pub fn defer(&self, path: &str) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.push(path, Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.requests.borrow().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        let url = format!("{}{}", TEST_BASE_URL, path);
        self.script
            .requests
            .borrow()
            .iter()
            .filter(|request| request.url == url)
            .count()
    }

    fn push(&self, path: &str, scripted: Scripted) {
        let mut responses = self.script.responses.borrow_mut();
        let queue = responses.entry(path.to_string()).or_default();
        // A new ready answer replaces the previous one
        if matches!(scripted, Scripted::Ready(_)) {
            queue.retain(|s| matches!(s, Scripted::Deferred(_)));
        }
        queue.push_back(scripted);
    }

    fn next(&self, path: &str) -> Option<Scripted> {
        let mut responses = self.script.responses.borrow_mut();
        let queue = responses.get_mut(path)?;
        if queue.len() == 1 {
            if let Some(Scripted::Ready(response)) = queue.front() {
                return Some(Scripted::Ready(response.clone()));
            }
        }
        queue.pop_front()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request
            .url
            .strip_prefix(TEST_BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        self.script.requests.borrow_mut().push(request);

        match self.next(&path) {
            Some(Scripted::Ready(response)) => Ok(response),
            Some(Scripted::Deferred(rx)) => rx
                .await
                .map_err(|_| ApiError::Network(format!("{} was dropped", path))),
            None => Err(ApiError::Network(format!("no script for {}", path))),
        }
    }
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string(),
    }
}

/// Context wired to in-memory seams
pub struct Harness {
    pub transport: ScriptedTransport,
    pub storage: MemoryStorage,
    pub scheduler: ManualScheduler,
    pub ctx: AppContext,
}

impl Harness {
    pub fn new() -> Self {
        let transport = ScriptedTransport::new();
        let storage = MemoryStorage::new();
        let scheduler = ManualScheduler::new();
        let config = AppConfig {
            api_base_url: TEST_BASE_URL.to_string(),
            ..AppConfig::default()
        };
        let ctx = AppContext::new(
            config,
            Rc::new(transport.clone()),
            Rc::new(storage.clone()),
            Rc::new(scheduler.clone()),
        );
        Self {
            transport,
            storage,
            scheduler,
            ctx,
        }
    }

    /// Harness whose session is already authenticated as a school admin
    pub fn signed_in() -> Self {
        let harness = Self::new();
        harness
            .storage
            .set_item(STORAGE_KEY_AUTH_TOKEN, "tok-admin")
            .unwrap();
        harness.transport.respond("/auth/me", 200, admin_json());
        futures::executor::block_on(harness.ctx.session.restore());
        harness
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(STORAGE_KEY_AUTH_TOKEN)
    }
}

pub fn admin_json() -> Value {
    serde_json::json!({
        "id": "u-admin",
        "email": "admin@school.test",
        "first_name": "Grace",
        "last_name": "Hopper",
        "role": "school_admin",
        "school_id": "school-1",
        "is_active": true
    })
}

pub fn student_json(id: &str, first: &str, last: &str) -> Value {
    serde_json::json!({
        "id": id,
        "admission_number": format!("ADM-{}", id),
        "first_name": first,
        "last_name": last,
        "is_active": true
    })
}
