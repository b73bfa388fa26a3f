//! # Report Repository (Aggregation Engine)
//!
//! Read-only aggregations over the sale ledger and inventory store:
//! summaries, rankings and time-bucketed series for dashboards and reports.
//!
//! ## Read Consistency
//! These queries take no locks and need no transaction. A report may lag a
//! concurrently committing sale by one transaction; that is acceptable for
//! every consumer here.
//!
//! ## Gap-Filled Series
//! `daily_series` always returns exactly `days` points, one per trailing
//! local calendar day, zero-filled where nothing was sold - chart widgets
//! never special-case missing days.

use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockbook_core::{Money, LOW_STOCK_THRESHOLD};

// =============================================================================
// Read Models
// =============================================================================

/// Totals over a (possibly filtered) slice of the ledger.
///
/// Sums resolve to 0 when the slice is empty - never NULL, never an error.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SalesSummary {
    pub total_sales_cents: i64,
    pub total_profit_cents: i64,
    pub total_transactions: i64,
}

impl SalesSummary {
    /// Total revenue as Money.
    #[inline]
    pub fn total_sales(&self) -> Money {
        Money::from_cents(self.total_sales_cents)
    }

    /// Total profit as Money.
    #[inline]
    pub fn total_profit(&self) -> Money {
        Money::from_cents(self.total_profit_cents)
    }
}

/// One row of the top-sellers ranking.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductSalesRank {
    pub product_id: String,
    pub name: String,
    pub total_quantity: i64,
}

/// One row of the most-profitable ranking.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductProfitRank {
    pub product_id: String,
    pub name: String,
    pub total_profit_cents: i64,
}

/// Which ledger field a daily series sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesField {
    /// Sum of total_cost (revenue).
    Revenue,
    /// Sum of profit.
    Profit,
}

impl SeriesField {
    /// The ledger column this field sums. Closed enum, so interpolating it
    /// into SQL is safe.
    const fn column(&self) -> &'static str {
        match self {
            SeriesField::Revenue => "total_cost_cents",
            SeriesField::Profit => "profit_cents",
        }
    }
}

/// One day of a gap-filled series.
#[derive(Debug, Clone, Serialize)]
pub struct DailyPoint {
    /// The local calendar day.
    pub date: NaiveDate,
    /// Chart axis label, `MM/DD`.
    pub label: String,
    /// Summed value for the day, in cents. 0 when nothing was sold.
    pub value_cents: i64,
}

/// The dashboard's headline numbers.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub low_stock_count: i64,
    pub today_transactions: i64,
    pub today_sales_cents: i64,
    pub today_profit_cents: i64,
    pub week_profit_cents: i64,
    pub month_profit_cents: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Read-only aggregation queries for dashboards and reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Sums revenue and profit and counts transactions, optionally filtered
    /// to the closed interval `[start, end]`.
    pub async fn sales_summary(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DbResult<SalesSummary> {
        let summary = sqlx::query_as::<_, SalesSummary>(
            r#"
            SELECT
                COALESCE(SUM(total_cost_cents), 0) AS total_sales_cents,
                COALESCE(SUM(profit_cents), 0) AS total_profit_cents,
                COUNT(id) AS total_transactions
            FROM sales
            WHERE (?1 IS NULL OR date_sold >= ?1)
              AND (?2 IS NULL OR date_sold <= ?2)
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Top products by total units sold, descending.
    ///
    /// Ties are broken by product id ascending so rankings are stable
    /// across runs.
    pub async fn top_selling_products(&self, limit: u32) -> DbResult<Vec<ProductSalesRank>> {
        debug!(limit = limit, "Ranking top sellers");

        let rows = sqlx::query_as::<_, ProductSalesRank>(
            r#"
            SELECT
                p.id AS product_id,
                p.name AS name,
                SUM(s.quantity_sold) AS total_quantity
            FROM sales s
            INNER JOIN products p ON p.id = s.product_id
            GROUP BY s.product_id
            ORDER BY total_quantity DESC, p.id ASC
            LIMIT ?1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Top products by summed profit, descending. Same tie-break rule as
    /// [`top_selling_products`](Self::top_selling_products).
    pub async fn most_profitable_products(&self, limit: u32) -> DbResult<Vec<ProductProfitRank>> {
        debug!(limit = limit, "Ranking most profitable products");

        let rows = sqlx::query_as::<_, ProductProfitRank>(
            r#"
            SELECT
                p.id AS product_id,
                p.name AS name,
                SUM(s.profit_cents) AS total_profit_cents
            FROM sales s
            INNER JOIN products p ON p.id = s.product_id
            GROUP BY s.product_id
            ORDER BY total_profit_cents DESC, p.id ASC
            LIMIT ?1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Sums `field` per local calendar day for the trailing `days` days
    /// ending today, oldest first.
    ///
    /// The result always has exactly `days` entries; days without sales
    /// carry 0.
    pub async fn daily_series(&self, field: SeriesField, days: u32) -> DbResult<Vec<DailyPoint>> {
        let today = Local::now().date_naive();
        let column = field.column();

        let mut points = Vec::with_capacity(days as usize);

        for offset in (0..i64::from(days)).rev() {
            let date = today - Duration::days(offset);
            let (day_start, day_end) = local_day_bounds(date);

            let value_cents: i64 = sqlx::query_scalar(&format!(
                "SELECT COALESCE(SUM({column}), 0) FROM sales \
                 WHERE date_sold >= ?1 AND date_sold < ?2"
            ))
            .bind(day_start)
            .bind(day_end)
            .fetch_one(&self.pool)
            .await?;

            points.push(DailyPoint {
                date,
                label: date.format("%m/%d").to_string(),
                value_cents,
            });
        }

        Ok(points)
    }

    /// Headline numbers for the dashboard: product counts plus today /
    /// week-to-date / month-to-date sales figures.
    ///
    /// The week starts on Monday; the month on the 1st. All three windows
    /// use the local calendar, consistent with [`daily_series`](Self::daily_series).
    pub async fn dashboard_stats(&self) -> DbResult<DashboardStats> {
        let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let low_stock_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE quantity <= ?1")
                .bind(LOW_STOCK_THRESHOLD)
                .fetch_one(&self.pool)
                .await?;

        let today = Local::now().date_naive();
        let (today_start, _) = local_day_bounds(today);
        let week_start =
            local_day_bounds(today - Duration::days(i64::from(today.weekday().num_days_from_monday()))).0;
        let month_start = local_day_bounds(today.with_day(1).unwrap_or(today)).0;

        let today_totals = self.sales_summary(Some(today_start), None).await?;
        let week_totals = self.sales_summary(Some(week_start), None).await?;
        let month_totals = self.sales_summary(Some(month_start), None).await?;

        Ok(DashboardStats {
            total_products,
            low_stock_count,
            today_transactions: today_totals.total_transactions,
            today_sales_cents: today_totals.total_sales_cents,
            today_profit_cents: today_totals.total_profit_cents,
            week_profit_cents: week_totals.total_profit_cents,
            month_profit_cents: month_totals.total_profit_cents,
        })
    }
}

/// UTC bounds `[start, end)` of one local calendar day.
///
/// DST edge: if local midnight doesn't exist that day, fall back to reading
/// the naive midnight as UTC - a one-hour skew on two days a year beats a
/// panic.
fn local_day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight(date);
    let end = local_midnight(date + Duration::days(1));
    (start, end)
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => DateTime::from_naive_utc_and_offset(naive, Utc),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::NewProduct;
    use crate::repository::sale::NewSale;
    use stockbook_core::ProductCategory;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, buying: i64, selling: i64) -> String {
        db.products()
            .insert(&NewProduct {
                name: name.to_string(),
                category: ProductCategory::Other,
                buying_price_cents: buying,
                selling_price_cents: selling,
                quantity: 100,
                supplier: "Acme".to_string(),
                added_by: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn sell(db: &Database, product_id: &str, quantity: i64) {
        db.sales()
            .record_sale(&NewSale {
                product_id: product_id.to_string(),
                quantity_sold: quantity,
                customer_name: None,
                notes: None,
                sold_by: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_summary_empty_ledger_is_zeros() {
        let db = test_db().await;

        let summary = db.reports().sales_summary(None, None).await.unwrap();
        assert_eq!(summary.total_sales_cents, 0);
        assert_eq!(summary.total_profit_cents, 0);
        assert_eq!(summary.total_transactions, 0);
    }

    #[tokio::test]
    async fn test_summary_sums_ledger() {
        let db = test_db().await;
        let product_id = seed_product(&db, "Laptop", 80000, 120000).await;

        sell(&db, &product_id, 3).await; // 360000 revenue, 120000 profit
        sell(&db, &product_id, 1).await; // 120000 revenue, 40000 profit

        let summary = db.reports().sales_summary(None, None).await.unwrap();
        assert_eq!(summary.total_sales_cents, 480000);
        assert_eq!(summary.total_profit_cents, 160000);
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.total_sales(), Money::from_cents(480000));
    }

    #[tokio::test]
    async fn test_summary_respects_date_interval() {
        let db = test_db().await;
        let product_id = seed_product(&db, "Laptop", 80000, 120000).await;

        let before = Utc::now();
        sell(&db, &product_id, 1).await;

        let outside = db
            .reports()
            .sales_summary(None, Some(before))
            .await
            .unwrap();
        assert_eq!(outside.total_transactions, 0);
        assert_eq!(outside.total_sales_cents, 0);

        let inside = db
            .reports()
            .sales_summary(Some(before), Some(Utc::now()))
            .await
            .unwrap();
        assert_eq!(inside.total_transactions, 1);
    }

    #[tokio::test]
    async fn test_top_selling_products_ranks_by_quantity() {
        let db = test_db().await;
        let a = seed_product(&db, "A", 100, 200).await;
        let b = seed_product(&db, "B", 100, 200).await;

        // [(A,5), (B,10), (A,2)] - the classic ranking scenario.
        sell(&db, &a, 5).await;
        sell(&db, &b, 10).await;
        sell(&db, &a, 2).await;

        let top = db.reports().top_selling_products(1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].product_id, b);
        assert_eq!(top[0].total_quantity, 10);

        let both = db.reports().top_selling_products(10).await.unwrap();
        assert_eq!(both.len(), 2);
        assert_eq!(both[0].product_id, b);
        assert_eq!(both[1].product_id, a);
        assert_eq!(both[1].total_quantity, 7);
    }

    #[tokio::test]
    async fn test_most_profitable_products() {
        let db = test_db().await;
        // Thin margin, heavy volume...
        let volume = seed_product(&db, "Volume", 190, 200).await;
        // ...against fat margin, light volume.
        let margin = seed_product(&db, "Margin", 100, 1100).await;

        sell(&db, &volume, 50).await; // profit 500
        sell(&db, &margin, 1).await; // profit 1000

        let ranked = db.reports().most_profitable_products(10).await.unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].product_id, margin);
        assert_eq!(ranked[0].total_profit_cents, 1000);
        assert_eq!(ranked[1].total_profit_cents, 500);
    }

    #[tokio::test]
    async fn test_ranking_tie_breaks_by_product_id() {
        let db = test_db().await;
        let x = seed_product(&db, "X", 100, 200).await;
        let y = seed_product(&db, "Y", 100, 200).await;

        sell(&db, &x, 4).await;
        sell(&db, &y, 4).await;

        let ranked = db.reports().top_selling_products(2).await.unwrap();
        assert_eq!(ranked.len(), 2);
        let (first, second) = (&ranked[0].product_id, &ranked[1].product_id);
        assert!(first < second, "ties must order by product id ascending");
    }

    #[tokio::test]
    async fn test_daily_series_shape() {
        let db = test_db().await;

        // Empty ledger: still exactly 7 zero-filled points, oldest first.
        let series = db.reports().daily_series(SeriesField::Revenue, 7).await.unwrap();
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|p| p.value_cents == 0));
        for window in series.windows(2) {
            assert_eq!(window[1].date - window[0].date, Duration::days(1));
        }
        assert_eq!(series[6].date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_daily_series_buckets_todays_sales() {
        let db = test_db().await;
        let product_id = seed_product(&db, "Laptop", 80000, 120000).await;
        sell(&db, &product_id, 3).await;

        let revenue = db.reports().daily_series(SeriesField::Revenue, 7).await.unwrap();
        assert_eq!(revenue[6].value_cents, 360000);
        assert!(revenue[..6].iter().all(|p| p.value_cents == 0));

        let profit = db.reports().daily_series(SeriesField::Profit, 7).await.unwrap();
        assert_eq!(profit[6].value_cents, 120000);
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let db = test_db().await;
        let product_id = seed_product(&db, "Laptop", 80000, 120000).await;

        db.products()
            .insert(&NewProduct {
                name: "Cable".to_string(),
                category: ProductCategory::Electronics,
                buying_price_cents: 100,
                selling_price_cents: 300,
                quantity: 2,
                supplier: "Acme".to_string(),
                added_by: None,
            })
            .await
            .unwrap();

        sell(&db, &product_id, 3).await;

        let stats = db.reports().dashboard_stats().await.unwrap();
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.today_transactions, 1);
        assert_eq!(stats.today_sales_cents, 360000);
        assert_eq!(stats.today_profit_cents, 120000);
        // Today is inside both windows.
        assert_eq!(stats.week_profit_cents, 120000);
        assert_eq!(stats.month_profit_cents, 120000);
    }

    #[tokio::test]
    async fn test_report_payloads_serialize() {
        let db = test_db().await;

        let summary = db.reports().sales_summary(None, None).await.unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_transactions"], 0);

        let series = db.reports().daily_series(SeriesField::Profit, 2).await.unwrap();
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
    }
}
