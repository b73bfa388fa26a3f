//! # Repository Module
//!
//! Database repository implementations for stockbook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Repository Pattern Explained                   │
//! │                                                                 │
//! │  Caller (form handler, exporter, dashboard)                     │
//! │       │                                                         │
//! │       │  db.sales().record_sale(&new_sale)                      │
//! │       ▼                                                         │
//! │  SaleRepository                                                 │
//! │  ├── record_sale(&self, new)   ← the atomic transaction         │
//! │  ├── list(&self)                                                │
//! │  └── history(&self, start, end)                                 │
//! │       │                                                         │
//! │       │  SQL                                                    │
//! │       ▼                                                         │
//! │  SQLite Database                                                │
//! │                                                                 │
//! │  Repositories are explicit objects handed to the caller -       │
//! │  no ambient/global query state, tests inject an in-memory DB.   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Inventory store: product CRUD and stock views
//! - [`sale::SaleRepository`] - Sale ledger: atomic recording, history reads
//! - [`report::ReportRepository`] - Aggregations: summaries, rankings, series
//! - [`user::UserRepository`] - Minimal user identity

pub mod product;
pub mod report;
pub mod sale;
pub mod user;
