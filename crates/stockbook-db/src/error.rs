//! # Database Error Types
//!
//! Error types for storage operations and the sale ledger.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Error Propagation                           │
//! │                                                                 │
//! │  SQLite Error (sqlx::Error)                                     │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  DbError (this module) ← Adds context and categorization        │
//! │       │                                                         │
//! │       ├── CRUD callers see DbError directly                     │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SaleError ← record_sale's typed failures; a DbError inside     │
//! │              the atomic block becomes TransactionAborted        │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  Form handler turns either into a user-visible message          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use stockbook_core::ValidationError;

/// Storage operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (e.g. duplicate username).
    #[error("Duplicate {field}: already exists")]
    UniqueViolation { field: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Referencing a non-existent product_id or user id
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Input failed validation before reaching storage.
    ///
    /// The inventory store validates on insert and update so the price and
    /// quantity rules hold on every path, not just form submissions.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: <table>.<column>"
                // "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation { field }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Sale Ledger Errors
// =============================================================================

/// Failures of the sale ledger's `record_sale` operation.
///
/// Every variant except `TransactionAborted` is deterministic: retrying
/// without changing the input cannot succeed. `TransactionAborted` is the
/// one case where a generic "try again" is appropriate. There is no
/// automatic retry anywhere - a stock-related failure retried blindly could
/// double-sell.
#[derive(Debug, Error)]
pub enum SaleError {
    /// The referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested more units than are in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// record_sale(qty: 3)
    ///      │
    ///      ▼
    /// Stock check: available = 2
    ///      │
    ///      ▼
    /// InsufficientStock { available: 2, requested: 3 }
    ///      │
    ///      ▼
    /// Form shows: "Insufficient stock. Available: 2, Requested: 3"
    /// ```
    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    /// Quantity sold must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Input failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Storage failed inside the atomic block; nothing was committed.
    #[error("Transaction aborted: {0}")]
    TransactionAborted(#[from] DbError),
}

impl From<sqlx::Error> for SaleError {
    fn from(err: sqlx::Error) -> Self {
        SaleError::TransactionAborted(DbError::from(err))
    }
}

/// Result type for sale ledger operations.
pub type SaleResult<T> = Result<T, SaleError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err = SaleError::InsufficientStock {
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock: available 2, requested 3"
        );
    }

    #[test]
    fn test_validation_converts_to_sale_error() {
        let err: SaleError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, SaleError::Validation(_)));
    }

    #[test]
    fn test_db_error_wraps_into_transaction_aborted() {
        let err: SaleError = DbError::PoolExhausted.into();
        assert!(matches!(err, SaleError::TransactionAborted(_)));
    }
}
