//! # Product Repository (Inventory Store)
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD with storage-boundary validation
//! - Browse/search/filter queries for inventory screens
//! - Low-stock and out-of-stock views
//!
//! ## Stock Mutation
//! This repository deliberately does NOT expose a public stock-reduction
//! method. Reducing stock outside the sale ledger's transaction would let
//! two concurrent sales both pass a stale stock check, so the guarded
//! `UPDATE` lives in [`reduce_stock_in_tx`] and is crate-private to the
//! ledger's atomic block.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stockbook_core::validation::validate_product;
use stockbook_core::{Money, Product, ProductCategory, LOW_STOCK_THRESHOLD};

const PRODUCT_COLUMNS: &str = "id, name, category, buying_price_cents, selling_price_cents, \
     quantity, supplier, date_added, added_by";

/// Fields needed to create a product. The store assigns id and date_added.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: ProductCategory,
    pub buying_price_cents: i64,
    pub selling_price_cents: i64,
    pub quantity: i64,
    pub supplier: String,
    pub added_by: Option<String>,
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.insert(&new_product).await?;
/// let low = repo.list_low_stock().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product after validating it.
    ///
    /// Validation runs here, not only in the entry form, so the price floor
    /// and price-ordering rules hold on every path.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the stored product with generated id and timestamp
    /// * `Err(DbError::Validation)` - a field failed the bookkeeping rules
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        let product = Product {
            id: generate_product_id(),
            name: new.name.trim().to_string(),
            category: new.category,
            buying_price_cents: new.buying_price_cents,
            selling_price_cents: new.selling_price_cents,
            quantity: new.quantity,
            supplier: new.supplier.trim().to_string(),
            date_added: Utc::now(),
            added_by: new.added_by.clone(),
        };

        validate_product(&product)?;

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, category, buying_price_cents, selling_price_cents,
                quantity, supplier, date_added, added_by
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.category)
        .bind(product.buying_price_cents)
        .bind(product.selling_price_cents)
        .bind(product.quantity)
        .bind(&product.supplier)
        .bind(product.date_added)
        .bind(&product.added_by)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products, newest first.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY date_added DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists products in one category, newest first.
    pub async fn list_by_category(&self, category: ProductCategory) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = ?1 ORDER BY date_added DESC"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Searches products by name or supplier substring, newest first.
    ///
    /// Plain LIKE is plenty at bookkeeping scale; inventories here are
    /// hundreds of rows, not millions.
    pub async fn search(&self, term: &str, limit: u32) -> DbResult<Vec<Product>> {
        let term = term.trim();

        debug!(term = %term, limit = %limit, "Searching products");

        if term.is_empty() {
            return self.list().await;
        }

        let pattern = format!("%{}%", term);

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE name LIKE ?1 OR supplier LIKE ?1
            ORDER BY date_added DESC
            LIMIT ?2
            "#
        ))
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists products with stock available, by name.
    ///
    /// This is the set a sale entry form offers for selection.
    pub async fn list_in_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE quantity > 0 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists low-stock products (quantity at or below the fixed threshold),
    /// emptiest first.
    pub async fn list_low_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE quantity <= ?1 ORDER BY quantity, name"
        ))
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists products that are completely out of stock.
    pub async fn list_out_of_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE quantity = 0 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Updates an existing product's editable fields after validating them.
    ///
    /// `date_added` and `added_by` are set at creation and not editable.
    /// Stock corrections go through here too (e.g. restocking); only the
    /// sale ledger reduces stock as part of recording a sale.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        validate_product(product)?;

        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                category = ?3,
                buying_price_cents = ?4,
                selling_price_cents = ?5,
                quantity = ?6,
                supplier = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.category)
        .bind(product.buying_price_cents)
        .bind(product.selling_price_cents)
        .bind(product.quantity)
        .bind(&product.supplier)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Hard delete: the product's sales are cascade-deleted with it (FK
    /// `ON DELETE CASCADE`), removing the product from all history.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Total inventory value at buying price, across all products.
    pub async fn total_valuation(&self) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(buying_price_cents * quantity), 0) FROM products",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }
}

/// Decrements a product's stock inside the caller's transaction.
///
/// The `quantity >= ?1` guard makes the check-and-decrement one statement:
/// even if an earlier read saw stale stock, the update refuses to take the
/// quantity negative. Returns whether a row was updated; `false` means the
/// guard failed (insufficient stock) or the product vanished.
///
/// Crate-private on purpose - only the sale ledger may reduce stock, and
/// only between its stock check and its ledger insert.
pub(crate) async fn reduce_stock_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: &str,
    quantity: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE products SET quantity = quantity - ?1 WHERE id = ?2 AND quantity >= ?1")
            .bind(quantity)
            .bind(product_id)
            .execute(&mut **tx)
            .await?;

    Ok(result.rows_affected() == 1)
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockbook_core::ValidationError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn laptop() -> NewProduct {
        NewProduct {
            name: "Laptop".to_string(),
            category: ProductCategory::Electronics,
            buying_price_cents: 80000,
            selling_price_cents: 120000,
            quantity: 15,
            supplier: "TechSource".to_string(),
            added_by: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = test_db().await;

        let created = db.products().insert(&laptop()).await.unwrap();
        let loaded = db.products().get_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(loaded.name, "Laptop");
        assert_eq!(loaded.category, ProductCategory::Electronics);
        assert_eq!(loaded.buying_price_cents, 80000);
        assert_eq!(loaded.selling_price_cents, 120000);
        assert_eq!(loaded.quantity, 15);
        assert_eq!(loaded.supplier, "TechSource");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        let missing = db.products().get_by_id("no-such-id").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_price_at_or_below_cost() {
        let db = test_db().await;

        let mut bad = laptop();
        bad.selling_price_cents = bad.buying_price_cents;

        let err = db.products().insert(&bad).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::PriceNotAboveCost { .. })
        ));

        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_rejects_zero_price() {
        let db = test_db().await;

        let mut bad = laptop();
        bad.buying_price_cents = 0;

        assert!(db.products().insert(&bad).await.is_err());
    }

    #[tokio::test]
    async fn test_update_rejects_negative_quantity() {
        let db = test_db().await;

        let mut product = db.products().insert(&laptop()).await.unwrap();
        product.quantity = -1;

        assert!(db.products().update(&product).await.is_err());
    }

    #[tokio::test]
    async fn test_update_changes_fields() {
        let db = test_db().await;

        let mut product = db.products().insert(&laptop()).await.unwrap();
        product.selling_price_cents = 130000;
        product.quantity = 20;
        db.products().update(&product).await.unwrap();

        let loaded = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.selling_price_cents, 130000);
        assert_eq!(loaded.quantity, 20);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let db = test_db().await;

        let mut product = db.products().insert(&laptop()).await.unwrap();
        db.products().delete(&product.id).await.unwrap();

        product.quantity = 1;
        let err = db.products().update(&product).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_search_matches_name_and_supplier() {
        let db = test_db().await;

        db.products().insert(&laptop()).await.unwrap();
        let mut mouse = laptop();
        mouse.name = "Wireless Mouse".to_string();
        mouse.supplier = "Peripherals Inc".to_string();
        db.products().insert(&mouse).await.unwrap();

        let by_name = db.products().search("mouse", 10).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Wireless Mouse");

        let by_supplier = db.products().search("TechSource", 10).await.unwrap();
        assert_eq!(by_supplier.len(), 1);
        assert_eq!(by_supplier[0].name, "Laptop");

        let all = db.products().search("", 10).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_category_filter() {
        let db = test_db().await;

        db.products().insert(&laptop()).await.unwrap();
        let mut novel = laptop();
        novel.name = "Novel".to_string();
        novel.category = ProductCategory::Books;
        db.products().insert(&novel).await.unwrap();

        let books = db
            .products()
            .list_by_category(ProductCategory::Books)
            .await
            .unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Novel");
    }

    #[tokio::test]
    async fn test_stock_views() {
        let db = test_db().await;

        let mut plenty = laptop();
        plenty.quantity = 50;
        db.products().insert(&plenty).await.unwrap();

        let mut scarce = laptop();
        scarce.name = "Cable".to_string();
        scarce.quantity = 3;
        db.products().insert(&scarce).await.unwrap();

        let mut gone = laptop();
        gone.name = "Adapter".to_string();
        gone.quantity = 0;
        db.products().insert(&gone).await.unwrap();

        let low = db.products().list_low_stock().await.unwrap();
        assert_eq!(low.len(), 2); // Cable (3) and Adapter (0)
        assert_eq!(low[0].name, "Adapter"); // emptiest first

        let out = db.products().list_out_of_stock().await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Adapter");

        let sellable = db.products().list_in_stock().await.unwrap();
        assert_eq!(sellable.len(), 2);
    }

    #[tokio::test]
    async fn test_total_valuation() {
        let db = test_db().await;
        assert_eq!(db.products().total_valuation().await.unwrap().cents(), 0);

        db.products().insert(&laptop()).await.unwrap(); // 80000 × 15
        let mut cable = laptop();
        cable.name = "Cable".to_string();
        cable.buying_price_cents = 500;
        cable.selling_price_cents = 900;
        cable.quantity = 10;
        db.products().insert(&cable).await.unwrap(); // 500 × 10

        let valuation = db.products().total_valuation().await.unwrap();
        assert_eq!(valuation.cents(), 80000 * 15 + 500 * 10);
    }
}
