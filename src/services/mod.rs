// ============================================================================
// SERVICES - HTTP only, no page state
// ============================================================================

pub mod academic_service;
pub mod api_client;
pub mod attendance_service;
pub mod auth_service;
pub mod error;
pub mod finance_service;
pub mod grades_service;
pub mod http_client;
pub mod people_service;
pub mod school_service;

pub use api_client::ApiClient;
pub use error::ApiError;
pub use http_client::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

#[cfg(target_arch = "wasm32")]
pub use http_client::FetchTransport;
