//! # Error Types
//!
//! Domain-specific error types for crust-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  crust-core errors (this file)                                         │
//! │  ├── CoreError        - Rejected selections, pricing failures          │
//! │  └── ValidationError  - Assembly-time invariant violations             │
//! │                                                                         │
//! │  crust-session errors (separate crate)                                 │
//! │  └── SessionError     - Catalog / sink failures + CoreError            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → ErrorReport → UI   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a local, recoverable condition. The UI shows the message
//! and lets the customer correct the selection; nothing here ends a session.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while mutating or pricing a selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A value outside the allowed set, a quantity below one, or a
    /// definition too incomplete to price.
    ///
    /// ## When This Occurs
    /// - `set_variant("size", "Huge")` when sizes are Medium/Large
    /// - `set_quantity(0)`
    /// - Pricing a selection against a definition that lacks one of its axes
    #[error("Invalid selection for {field}: {reason}")]
    InvalidSelection { field: String, reason: String },

    /// Sub-item index beyond the composite count.
    #[error("Sub-item {index} does not exist (product has {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Drink cap reached. The add was rejected and the selection is unchanged.
    ///
    /// ## User Workflow
    /// ```text
    /// 4 drinks chosen, limit 4
    ///      │
    ///      ▼
    /// toggle_drink("Sprite")
    ///      │
    ///      ▼
    /// SlotLimitExceeded { limit: 4 }
    ///      │
    ///      ▼
    /// UI shows: "You can select a maximum of 4 drinks."
    /// ```
    #[error("You can select a maximum of {limit} drinks")]
    SlotLimitExceeded { limit: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidSelection`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidSelection {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Assembly-time validation failures.
///
/// Each variant names the `field` that failed so the caller can point the
/// customer at the right control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A collection does not have the length the definition requires.
    #[error("{field} must have {expected} entries, found {actual}")]
    CountMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// Selection and definition disagree on what kind of product this is.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::CountMismatch { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
