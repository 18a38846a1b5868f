/// API root used when `API_BASE_URL` is not set at build time
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

/// localStorage key holding the bearer token
pub const STORAGE_KEY_AUTH_TOKEN: &str = "auth_token";

/// Message used when a failed response carries no usable `detail`
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// How long a notification stays on screen
pub const NOTIFICATION_DURATION_MS: u32 = 4000;

/// Role requested when a school registers its first account
pub const ROLE_SCHOOL_ADMIN: &str = "school_admin";
pub const ROLE_TEACHER: &str = "teacher";
