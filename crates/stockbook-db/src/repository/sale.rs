//! # Sale Repository (Sale Ledger)
//!
//! Database operations for the immutable sale ledger.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  record_sale(product, qty)                      │
//! │                                                                 │
//! │  1. Validate quantity (>= 1)                                    │
//! │  2. BEGIN TRANSACTION ─────────────────────────────┐            │
//! │  3. Load product ── missing? ── ProductNotFound    │            │
//! │  4. Freeze snapshots:                              │  one       │
//! │       total_cost = selling_price × qty             │  atomic    │
//! │       profit     = (selling − buying) × qty        │  unit      │
//! │  5. Stock check ── short? ── InsufficientStock     │            │
//! │  6. Guarded UPDATE quantity = quantity − qty       │            │
//! │         WHERE quantity >= qty                      │            │
//! │  7. INSERT ledger row                              │            │
//! │  8. COMMIT ────────────────────────────────────────┘            │
//! │                                                                 │
//! │  Any failure in 3-7 rolls back: no dangling ledger row,         │
//! │  no half-reduced stock.                                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `total_cost_cents` and `profit_cents` are copied from the product's
//! prices at the moment of sale. This preserves the ledger even if prices
//! change later.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbResult, SaleError, SaleResult};
use crate::repository::product::reduce_stock_in_tx;
use stockbook_core::validation::validate_customer_name;
use stockbook_core::{Product, Sale};

const SALE_COLUMNS: &str = "id, product_id, quantity_sold, total_cost_cents, profit_cents, \
     date_sold, sold_by, customer_name, notes";

/// A sale request, as handed over by a form handler that has already
/// resolved field formats and the acting user.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub product_id: String,
    pub quantity_sold: i64,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub sold_by: Option<String>,
}

/// Repository for sale ledger operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale: validates stock, freezes the financial snapshot,
    /// reduces inventory and persists the ledger row as one atomic unit.
    ///
    /// ## Concurrency
    /// Two simultaneous sales of the same product must not both pass a
    /// stale stock check. The transaction plus the guarded decrement in
    /// the inventory store serialize them: whichever commits second sees
    /// the reduced quantity, and the guard refuses to go negative. There
    /// is no separate lock.
    ///
    /// ## Errors
    /// * `InvalidQuantity` - quantity_sold < 1
    /// * `ProductNotFound` - no such product
    /// * `InsufficientStock` - requested more than available; stock and
    ///   ledger are untouched
    /// * `TransactionAborted` - storage failed mid-flight; rolled back
    pub async fn record_sale(&self, new: &NewSale) -> SaleResult<Sale> {
        if new.quantity_sold < 1 {
            return Err(SaleError::InvalidQuantity(new.quantity_sold));
        }
        validate_customer_name(new.customer_name.as_deref())?;

        debug!(product_id = %new.product_id, quantity = new.quantity_sold, "Recording sale");

        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, buying_price_cents, selling_price_cents,
                   quantity, supplier, date_added, added_by
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(&new.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| SaleError::ProductNotFound(new.product_id.clone()))?;

        // Frozen at the moment of sale; later price edits must not reach
        // this ledger row.
        let total_cost = product.selling_price().multiply_quantity(new.quantity_sold);
        let profit = product.profit_per_unit().multiply_quantity(new.quantity_sold);

        if !product.can_sell(new.quantity_sold) {
            return Err(SaleError::InsufficientStock {
                available: product.quantity,
                requested: new.quantity_sold,
            });
        }

        // The guard re-checks under the transaction; a false here means a
        // concurrent sale won the race between our read and this write.
        if !reduce_stock_in_tx(&mut tx, &product.id, new.quantity_sold).await? {
            return Err(SaleError::InsufficientStock {
                available: product.quantity,
                requested: new.quantity_sold,
            });
        }

        let date_sold = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO sales (
                product_id, quantity_sold, total_cost_cents, profit_cents,
                date_sold, sold_by, customer_name, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&new.product_id)
        .bind(new.quantity_sold)
        .bind(total_cost.cents())
        .bind(profit.cents())
        .bind(date_sold)
        .bind(&new.sold_by)
        .bind(&new.customer_name)
        .bind(&new.notes)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        tx.commit().await?;

        info!(
            sale_id = id,
            product_id = %new.product_id,
            quantity = new.quantity_sold,
            total_cost = %total_cost,
            profit = %profit,
            "Sale recorded"
        );

        Ok(Sale {
            id,
            product_id: new.product_id.clone(),
            quantity_sold: new.quantity_sold,
            total_cost_cents: total_cost.cents(),
            profit_cents: profit.cents(),
            date_sold,
            sold_by: new.sold_by.clone(),
            customer_name: new.customer_name.clone(),
            notes: new.notes.clone(),
        })
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists all sales, newest first.
    ///
    /// This ordering (date_sold descending, ties by id descending) is the
    /// iteration order exporters and history screens rely on.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY date_sold DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists the most recent sales (dashboard widget).
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY date_sold DESC, id DESC LIMIT ?1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists all sales of one product, newest first.
    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE product_id = ?1 ORDER BY date_sold DESC, id DESC"
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Sales history filtered to an optional closed date interval,
    /// newest first.
    pub async fn history(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            r#"
            SELECT {SALE_COLUMNS} FROM sales
            WHERE (?1 IS NULL OR date_sold >= ?1)
              AND (?2 IS NULL OR date_sold <= ?2)
            ORDER BY date_sold DESC, id DESC
            "#
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts all ledger rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Deletes a sale row.
    ///
    /// Administrative correction path only. The sold stock is NOT restored;
    /// a deletion erases the record, it does not undo the sale.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(crate::error::DbError::not_found("Sale", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
