//! # Error Types
//!
//! Domain-specific error types for stockbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Error Types                              │
//! │                                                                 │
//! │  stockbook-core errors (this file)                              │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  stockbook-db errors (separate crate)                           │
//! │  ├── DbError          - Storage operation failures              │
//! │  └── SaleError        - Sale ledger failures (stock, lookup,    │
//! │                         aborted transaction)                    │
//! │                                                                 │
//! │  Flow: ValidationError → DbError/SaleError → caller message     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, limits, cents)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when a product or sale request doesn't meet the
/// bookkeeping rules. Used for early validation before storage runs.
#[derive(Debug, Error)]
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

    /// Selling at or below cost.
    ///
    /// ## When This Occurs
    /// - Creating or editing a product with selling_price <= buying_price.
    ///   Historically this was only rejected by the entry form; the store
    ///   now rejects it on every path.
    #[error("selling price ({selling_cents} cents) must exceed buying price ({buying_cents} cents)")]
    PriceNotAboveCost { selling_cents: i64, buying_cents: i64 },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::PriceNotAboveCost {
            selling_cents: 500,
            buying_cents: 800,
        };
        assert_eq!(
            err.to_string(),
            "selling price (500 cents) must exceed buying price (800 cents)"
        );
    }
}
