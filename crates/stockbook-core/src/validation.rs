//! # Validation Module
//!
//! Input validation for products entering the inventory store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Validation Layers                           │
//! │                                                                 │
//! │  Layer 1: Entry form / API handler                              │
//! │  ├── Field formats, required fields                             │
//! │  └── Immediate user feedback                                    │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 2: THIS MODULE (storage boundary)                        │
//! │  ├── Price floor, quantity floor                                │
//! │  └── Price ordering (selling > buying) on EVERY path            │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 3: Database (SQLite)                                     │
//! │  ├── CHECK constraints, NOT NULL                                │
//! │  └── Foreign key constraints                                    │
//! │                                                                 │
//! │  Defense in depth: each layer catches different errors          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Price ordering used to be a form-only rule, which let any direct caller
//! store a product that sells at a loss. It is now checked here so the
//! invariant holds regardless of entry path.

use crate::error::ValidationError;
use crate::types::Product;
use crate::MIN_PRICE_CENTS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use stockbook_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Wireless Mouse").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a supplier name. Same shape as the product name rule.
pub fn validate_supplier(supplier: &str) -> ValidationResult<()> {
    let supplier = supplier.trim();

    if supplier.is_empty() {
        return Err(ValidationError::Required {
            field: "supplier".to_string(),
        });
    }

    if supplier.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "supplier".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be at least one cent. Zero-priced products would make profit
///   percentages and inventory valuation meaningless.
///
/// ## Example
/// ```rust
/// use stockbook_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("buying_price", 1).is_ok());
/// assert!(validate_price_cents("buying_price", 0).is_err());
/// assert!(validate_price_cents("buying_price", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < MIN_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: MIN_PRICE_CENTS,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the selling/buying price ordering: selling must exceed buying.
pub fn validate_price_ordering(buying_cents: i64, selling_cents: i64) -> ValidationResult<()> {
    if selling_cents <= buying_cents {
        return Err(ValidationError::PriceNotAboveCost {
            selling_cents,
            buying_cents,
        });
    }

    Ok(())
}

/// Validates a stock quantity as stored on a product.
///
/// ## Rules
/// - Must be non-negative. Zero is fine (out of stock).
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an optional customer name on a sale.
///
/// ## Rules
/// - Absent or empty is fine (walk-in customer)
/// - Must be at most 200 characters when present
pub fn validate_customer_name(customer_name: Option<&str>) -> ValidationResult<()> {
    if let Some(name) = customer_name {
        if name.trim().len() > 200 {
            return Err(ValidationError::TooLong {
                field: "customer_name".to_string(),
                max: 200,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates all storable fields of a product.
///
/// Called by the inventory store on insert and update, so the rules hold on
/// every path, not just form submissions.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_supplier(&product.supplier)?;
    validate_price_cents("buying_price", product.buying_price_cents)?;
    validate_price_cents("selling_price", product.selling_price_cents)?;
    validate_price_ordering(product.buying_price_cents, product.selling_price_cents)?;
    validate_stock_quantity(product.quantity)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
