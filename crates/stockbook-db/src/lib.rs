//! # stockbook-db: Database Layer for stockbook
//!
//! This crate provides database access for the stockbook bookkeeping
//! engine. It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     stockbook Data Flow                         │
//! │                                                                 │
//! │  Caller (form handler / exporter / dashboard)                   │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                 stockbook-db (THIS CRATE)                 │  │
//! │  │                                                           │  │
//! │  │   ┌─────────────┐   ┌───────────────┐   ┌─────────────┐  │  │
//! │  │   │  Database   │   │ Repositories  │   │ Migrations  │  │  │
//! │  │   │  (pool.rs)  │   │ product/sale/ │   │ (embedded)  │  │  │
//! │  │   │             │◄──│ report/user   │   │ 001_init    │  │  │
//! │  │   └─────────────┘   └───────────────┘   └─────────────┘  │  │
//! │  │                                                           │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite Database (WAL mode, foreign keys on)                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and sale ledger error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_db::{Database, DbConfig, NewProduct, NewSale};
//!
//! let db = Database::new(DbConfig::new("./stockbook.db")).await?;
//!
//! let product = db.products().insert(&new_product).await?;
//! let sale = db.sales().record_sale(&NewSale {
//!     product_id: product.id.clone(),
//!     quantity_sold: 3,
//!     customer_name: None,
//!     notes: None,
//!     sold_by: None,
//! }).await?;
//!
//! let summary = db.reports().sales_summary(None, None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, SaleError, SaleResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::{generate_product_id, NewProduct, ProductRepository};
pub use repository::report::{
    DailyPoint, DashboardStats, ProductProfitRank, ProductSalesRank, ReportRepository,
    SalesSummary, SeriesField,
};
pub use repository::sale::{NewSale, SaleRepository};
pub use repository::user::UserRepository;
