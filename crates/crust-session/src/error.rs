//! # Session Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Crust                                  │
//! │                                                                         │
//! │  Storefront UI               Rust                                       │
//! │  ─────────────               ────                                       │
//! │                                                                         │
//! │  session.toggle_drink("Sprite")                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  SessionResult<T>                                                │  │
//! │  │         │                                                        │  │
//! │  │  Catalog down?   ─── CatalogError ─────┐                         │  │
//! │  │  Sink refused?   ─── SinkError ────────┼──► SessionError         │  │
//! │  │  Bad selection?  ─── CoreError ────────┘        │                │  │
//! │  │                                                 ▼                │  │
//! │  │                                      ErrorReport { code, msg }   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  UI: e.code == "SLOT_LIMIT" → alert(e.message)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crust_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Collaborator Errors
// =============================================================================

/// Failures reported by a [`CatalogService`](crate::CatalogService).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No product with this id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The catalog could not be reached.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The catalog answered with data the engine cannot use.
    #[error("Malformed catalog data: {0}")]
    Malformed(String),
}

/// Failures reported by an [`OrderSink`](crate::OrderSink).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The sink received the order and refused it.
    #[error("Order rejected: {0}")]
    Rejected(String),

    /// The sink could not be reached.
    #[error("Order sink unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Session Error
// =============================================================================

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid or unreadable configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Core(CoreError::Validation(err))
    }
}

// =============================================================================
// Error Report (what the UI receives)
// =============================================================================

/// Machine-readable error codes for the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Value not offered, quantity below one, incomplete definition
    InvalidSelection,

    /// Sub-item index beyond the product's count
    IndexOutOfRange,

    /// Drink cap reached; the add was ignored
    SlotLimit,

    /// Order failed assembly-time validation
    ValidationError,

    /// Product id unknown to the catalog
    NotFound,

    /// Catalog unreachable or returned unusable data
    CatalogError,

    /// Order sink refused or was unreachable
    SubmitFailed,

    /// Configuration problem
    Internal,
}

/// Serialisable error handed to the UI layer.
///
/// ```json
/// { "code": "SLOT_LIMIT", "message": "You can select a maximum of 4 drinks", "field": "drinks" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    /// The selection field to highlight, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&SessionError> for ErrorReport {
    fn from(err: &SessionError) -> Self {
        let (code, field) = match err {
            SessionError::Core(CoreError::InvalidSelection { field, .. }) => {
                (ErrorCode::InvalidSelection, Some(field.clone()))
            }
            SessionError::Core(CoreError::IndexOutOfRange { .. }) => {
                (ErrorCode::IndexOutOfRange, Some("toppings".to_string()))
            }
            SessionError::Core(CoreError::SlotLimitExceeded { .. }) => {
                (ErrorCode::SlotLimit, Some("drinks".to_string()))
            }
            SessionError::Core(CoreError::Validation(v)) => {
                (ErrorCode::ValidationError, Some(v.field().to_string()))
            }
            SessionError::Catalog(CatalogError::NotFound(_)) => (ErrorCode::NotFound, None),
            SessionError::Catalog(_) => (ErrorCode::CatalogError, None),
            SessionError::Sink(_) => (ErrorCode::SubmitFailed, None),
            SessionError::Config(_) => (ErrorCode::Internal, None),
        };

        ErrorReport {
            code,
            message: err.to_string(),
            field,
        }
    }
}

impl From<SessionError> for ErrorReport {
    fn from(err: SessionError) -> Self {
        ErrorReport::from(&err)
    }
}
