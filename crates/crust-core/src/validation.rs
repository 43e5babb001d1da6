//! # Validation Module
//!
//! Field-level rules shared by the definition model, the selection setters
//! and the order assembler.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  └── Widgets only offer catalog values (select, checkbox, min=1)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: SelectionState setters                                       │
//! │  └── Reject illegal values immediately (InvalidSelection, ...)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: OrderAssembler                                               │
//! │  └── Re-assert the invariants before the payload leaves the engine     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product, topping or beverage name accepted from the catalog.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog name (product, topping, beverage, axis value).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use crust_core::validation::validate_name;
///
/// assert!(validate_name("topping", "Pepperoni").is_ok());
/// assert!(validate_name("topping", "  ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Must be at least 1
/// - No upper bound; ordering limits are the order sink's policy
///
/// ## Example
/// ```rust
/// use crust_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(10_000).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog or order price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use crust_core::money::Money;
/// use crust_core::validation::validate_price;
///
/// assert!(validate_price("basePrice", Money::from_cents(2499)).is_ok());
/// assert!(validate_price("basePrice", Money::zero()).is_ok());
/// assert!(validate_price("basePrice", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that a chosen value belongs to its allowed set.
pub fn validate_allowed(field: &str, value: &str, allowed: &[String]) -> ValidationResult<()> {
    if allowed.iter().any(|a| a == value) {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed.to_vec(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
