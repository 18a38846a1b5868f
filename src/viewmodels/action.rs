use thiserror::Error;

use crate::services::ApiError;
use crate::state::{NotificationStore, SessionError};

/// Why a user action (save, create, record) did not go through
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    /// Caught before any request was made
    #[error("{0}")]
    Rejected(&'static str),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Session(#[from] SessionError),
}

/// Mutations report through toasts: success message on Ok, error text otherwise
pub fn report<T>(
    notifications: &NotificationStore,
    result: Result<T, ActionError>,
    success: &str,
) -> Result<T, ActionError> {
    match &result {
        Ok(_) => {
            notifications.success(success);
        }
        Err(e) => {
            log::error!("❌ {}", e);
            notifications.error(e.to_string());
        }
    }
    result
}
