//! # stockbook-core: Pure Business Logic for stockbook
//!
//! This crate is the **heart** of stockbook. It contains the domain types and
//! profit arithmetic for the inventory/sales bookkeeping engine, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    stockbook Architecture                       │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐ │
//! │  │            Delivery layer (forms, exports, charts)        │ │
//! │  └────────────────────────────┬──────────────────────────────┘ │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐ │
//! │  │              ★ stockbook-core (THIS CRATE) ★              │ │
//! │  │                                                           │ │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────────────┐   │ │
//! │  │   │   types   │  │   money   │  │     validation     │   │ │
//! │  │   │  Product  │  │   Money   │  │  field + price     │   │ │
//! │  │   │   Sale    │  │ (cents)   │  │  ordering rules    │   │ │
//! │  │   └───────────┘  └───────────┘  └────────────────────┘   │ │
//! │  │                                                           │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS     │ │
//! │  └────────────────────────────┬──────────────────────────────┘ │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐ │
//! │  │               stockbook-db (Database Layer)               │ │
//! │  │    SQLite queries, migrations, inventory + sale ledger    │ │
//! │  └───────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, ProductCategory, User)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockbook_core::Money` instead of
// `use stockbook_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// A product with this many units or fewer counts as low stock.
///
/// ## Why a constant?
/// The threshold is part of the bookkeeping contract: dashboards, the
/// low-stock report and `Product::is_low_stock` must all agree on it.
/// It is deliberately not configurable.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Smallest storable price: one cent. Free products are not bookkeepable.
pub const MIN_PRICE_CENTS: i64 = 1;
