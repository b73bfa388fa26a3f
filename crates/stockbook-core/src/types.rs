//! # Domain Types
//!
//! Core domain types used throughout stockbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────┐   │
//! │  │    Product      │   │      Sale        │   │    User     │   │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────  │   │
//! │  │  id (UUID)      │   │  id (rowid)      │   │  id (UUID)  │   │
//! │  │  category       │   │  product_id (FK) │   │  username   │   │
//! │  │  prices (cents) │   │  frozen cost /   │   └─────────────┘   │
//! │  │  quantity       │   │  profit snapshot │                     │
//! │  └─────────────────┘   └──────────────────┘                     │
//! │                                                                 │
//! │  Product is the long-lived side; a Sale is immutable history.  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Sale.total_cost_cents` and `Sale.profit_cents` are computed from the
//! product's prices at the moment of sale and frozen. Later price edits
//! must never change historical ledger rows.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Product Category
// =============================================================================

/// The closed set of product categories.
///
/// Stored as lowercase text; anything outside this set is rejected at the
/// validation boundary, so reports can group by category without a
/// catch-all parse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Food,
    Books,
    Home,
    Sports,
    Toys,
    Beauty,
    Automotive,
    Other,
}

impl ProductCategory {
    /// Every category, in display order.
    pub const ALL: [ProductCategory; 10] = [
        ProductCategory::Electronics,
        ProductCategory::Clothing,
        ProductCategory::Food,
        ProductCategory::Books,
        ProductCategory::Home,
        ProductCategory::Sports,
        ProductCategory::Toys,
        ProductCategory::Beauty,
        ProductCategory::Automotive,
        ProductCategory::Other,
    ];

    /// The stored (lowercase) form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Clothing => "clothing",
            ProductCategory::Food => "food",
            ProductCategory::Books => "books",
            ProductCategory::Home => "home",
            ProductCategory::Sports => "sports",
            ProductCategory::Toys => "toys",
            ProductCategory::Beauty => "beauty",
            ProductCategory::Automotive => "automotive",
            ProductCategory::Other => "other",
        }
    }

    /// Human-readable label for selection lists.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "Electronics",
            ProductCategory::Clothing => "Clothing",
            ProductCategory::Food => "Food & Beverages",
            ProductCategory::Books => "Books",
            ProductCategory::Home => "Home & Garden",
            ProductCategory::Sports => "Sports & Outdoors",
            ProductCategory::Toys => "Toys & Games",
            ProductCategory::Beauty => "Beauty & Personal Care",
            ProductCategory::Automotive => "Automotive",
            ProductCategory::Other => "Other",
        }
    }
}

impl Default for ProductCategory {
    fn default() -> Self {
        ProductCategory::Other
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ProductCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: ProductCategory::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// An inventory item with pricing and stock information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Category from the closed set.
    pub category: ProductCategory,

    /// Cost price per unit, in cents.
    pub buying_price_cents: i64,

    /// Selling price per unit, in cents.
    pub selling_price_cents: i64,

    /// Current stock quantity. Never negative.
    pub quantity: i64,

    /// Supplier name.
    pub supplier: String,

    /// When the product was added.
    pub date_added: DateTime<Utc>,

    /// User who added this product. Nullified if that user is removed.
    pub added_by: Option<String>,
}

impl Product {
    /// Returns the cost price as a Money value.
    #[inline]
    pub fn buying_price(&self) -> Money {
        Money::from_cents(self.buying_price_cents)
    }

    /// Returns the selling price as a Money value.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }

    /// Profit earned per unit sold, at current prices.
    #[inline]
    pub fn profit_per_unit(&self) -> Money {
        self.selling_price() - self.buying_price()
    }

    /// Profit per unit as a percentage of the buying price.
    ///
    /// Returns 0.0 when the buying price is zero (the markup is undefined).
    pub fn profit_percentage(&self) -> f64 {
        self.profit_per_unit().percent_of(self.buying_price())
    }

    /// Total inventory value at buying price.
    #[inline]
    pub fn total_value(&self) -> Money {
        self.buying_price().multiply_quantity(self.quantity)
    }

    /// Whether stock is at or below [`LOW_STOCK_THRESHOLD`].
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= LOW_STOCK_THRESHOLD
    }

    /// Checks whether the requested quantity can be sold from current stock.
    ///
    /// Pure check, no side effect. The actual stock reduction happens only
    /// inside the sale ledger's transaction.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One recorded sale transaction.
///
/// Immutable history: core fields are written exactly once when the sale is
/// recorded. The id is the ledger rowid, so iteration by id is insertion
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,

    /// The product sold. Required; sales are cascade-deleted with it.
    pub product_id: String,

    /// Units sold. Always >= 1.
    pub quantity_sold: i64,

    /// Total selling price, frozen at the moment of sale.
    pub total_cost_cents: i64,

    /// Total profit, frozen at the moment of sale.
    pub profit_cents: i64,

    /// When the sale was recorded. Set once, immutable.
    pub date_sold: DateTime<Utc>,

    /// User who made this sale. Nullified if that user is removed.
    pub sold_by: Option<String>,

    /// Optional customer name.
    pub customer_name: Option<String>,

    /// Optional free-form notes.
    pub notes: Option<String>,
}

impl Sale {
    /// Returns the frozen total as a Money value.
    #[inline]
    pub fn total_cost(&self) -> Money {
        Money::from_cents(self.total_cost_cents)
    }

    /// Returns the frozen profit as a Money value.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }

    /// Profit as a percentage of revenue for this sale.
    ///
    /// Returns 0.0 when total_cost is zero (only reachable through a
    /// degenerate zero-price record).
    pub fn profit_margin(&self) -> f64 {
        self.profit().percent_of(self.total_cost())
    }

    /// Customer name for history rows and export lines.
    ///
    /// Exporters iterate sales and print every field; an absent customer
    /// renders as the fixed placeholder rather than an empty cell.
    pub fn customer_display(&self) -> &str {
        self.customer_name.as_deref().unwrap_or(UNATTRIBUTED)
    }
}

/// Placeholder exporters print for an absent customer or seller.
pub const UNATTRIBUTED: &str = "N/A";

// =============================================================================
// User
// =============================================================================

/// Minimal user identity.
///
/// Authentication and sessions live outside this system; this type exists so
/// `Product.added_by` / `Sale.sold_by` can reference someone and survive
/// that someone's removal (the references nullify, history stays).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(buying: i64, selling: i64, quantity: i64) -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            category: ProductCategory::Other,
            buying_price_cents: buying,
            selling_price_cents: selling,
            quantity,
            supplier: "Acme".to_string(),
            date_added: Utc::now(),
            added_by: None,
        }
    }

    #[test]
    fn test_profit_per_unit() {
        let p = product(80000, 120000, 15);
        assert_eq!(p.profit_per_unit().cents(), 40000);
    }

    #[test]
    fn test_profit_percentage() {
        let p = product(80000, 120000, 15);
        assert!((p.profit_percentage() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_profit_percentage_zero_buying_price() {
        // Not storable, but the derived property must still guard the ratio.
        let p = product(0, 120000, 15);
        assert_eq!(p.profit_percentage(), 0.0);
    }

    #[test]
    fn test_total_value() {
        let p = product(250, 400, 8);
        assert_eq!(p.total_value().cents(), 2000);
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(product(100, 200, 0).is_low_stock());
        assert!(product(100, 200, 5).is_low_stock());
        assert!(!product(100, 200, 6).is_low_stock());
    }

    #[test]
    fn test_can_sell() {
        let p = product(100, 200, 2);
        assert!(p.can_sell(1));
        assert!(p.can_sell(2));
        assert!(!p.can_sell(3));
    }

    #[test]
    fn test_sale_profit_margin() {
        let sale = Sale {
            id: 1,
            product_id: "p-1".to_string(),
            quantity_sold: 3,
            total_cost_cents: 360000,
            profit_cents: 120000,
            date_sold: Utc::now(),
            sold_by: None,
            customer_name: None,
            notes: None,
        };
        assert!((sale.profit_margin() - 33.333333).abs() < 0.001);
    }

    #[test]
    fn test_sale_profit_margin_zero_total() {
        let sale = Sale {
            id: 1,
            product_id: "p-1".to_string(),
            quantity_sold: 1,
            total_cost_cents: 0,
            profit_cents: 0,
            date_sold: Utc::now(),
            sold_by: None,
            customer_name: None,
            notes: None,
        };
        assert_eq!(sale.profit_margin(), 0.0);
    }

    #[test]
    fn test_customer_display_placeholder() {
        let mut sale = Sale {
            id: 1,
            product_id: "p-1".to_string(),
            quantity_sold: 1,
            total_cost_cents: 200,
            profit_cents: 100,
            date_sold: Utc::now(),
            sold_by: None,
            customer_name: None,
            notes: None,
        };
        assert_eq!(sale.customer_display(), "N/A");

        sale.customer_name = Some("Ada".to_string());
        assert_eq!(sale.customer_display(), "Ada");
    }

    #[test]
    fn test_category_round_trip() {
        for category in ProductCategory::ALL {
            let parsed: ProductCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        let err = "groceries".parse::<ProductCategory>();
        assert!(matches!(
            err,
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_category_default() {
        assert_eq!(ProductCategory::default(), ProductCategory::Other);
    }
}
