//! # Purchase Repository
//!
//! Database operations for the purchase ledger.
//!
//! ## Storage Shape
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Purchase Storage                         │
//! │                                                              │
//! │  purchases                 purchase_items                    │
//! │  ┌──────────────────┐      ┌──────────────────────────────┐  │
//! │  │ id               │◄─────│ purchase_id (FK, CASCADE)    │  │
//! │  │ customer_name    │      │ position  (form order)       │  │
//! │  │ purchased_at     │      │ name / category snapshots    │  │
//! │  │ total_paise ...  │      │ quantity / price_paise       │  │
//! │  └──────────────────┘      └──────────────────────────────┘  │
//! │                                                              │
//! │  Header + items always move together inside one transaction. │
//! │  An edit replaces the item set wholesale (delete + insert);  │
//! │  items are snapshots, they have no identity to preserve.     │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use medstock_core::{LineItem, PaymentMode, Purchase};

const PURCHASE_COLUMNS: &str = "id, customer_name, purchased_at, total_paise, \
     discount_paise, due_paise, payment_mode, created_at, updated_at";

/// Header row of a purchase; items are fetched separately and attached.
#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: String,
    customer_name: String,
    purchased_at: DateTime<Utc>,
    total_paise: i64,
    discount_paise: i64,
    due_paise: i64,
    payment_mode: PaymentMode,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PurchaseRow {
    fn into_purchase(self, items: Vec<LineItem>) -> Purchase {
        Purchase {
            id: self.id,
            customer_name: self.customer_name,
            purchased_at: self.purchased_at,
            items,
            total_paise: self.total_paise,
            discount_paise: self.discount_paise,
            due_paise: self.due_paise,
            payment_mode: self.payment_mode,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Repository for purchase database operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Inserts a purchase with its line items in one transaction.
    pub async fn insert(&self, purchase: &Purchase) -> DbResult<()> {
        debug!(id = %purchase.id, items = purchase.items.len(), "Inserting purchase");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO purchases (
                id, customer_name, purchased_at,
                total_paise, discount_paise, due_paise, payment_mode,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&purchase.id)
        .bind(&purchase.customer_name)
        .bind(purchase.purchased_at)
        .bind(purchase.total_paise)
        .bind(purchase.discount_paise)
        .bind(purchase.due_paise)
        .bind(purchase.payment_mode)
        .bind(purchase.created_at)
        .bind(purchase.updated_at)
        .execute(&mut *tx)
        .await?;

        insert_items(&mut tx, &purchase.id, &purchase.items).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Gets a purchase (with items) by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Purchase>> {
        let row = sqlx::query_as::<_, PurchaseRow>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.get_items(&row.id).await?;
                Ok(Some(row.into_purchase(items)))
            }
            None => Ok(None),
        }
    }

    /// Overwrites a purchase's mutable fields and replaces its item set,
    /// in one transaction.
    ///
    /// `purchased_at` and `created_at` are not touched: edits never move a
    /// sale to a different ledger day.
    ///
    /// ## Returns
    /// * `Ok(())` - Updated
    /// * `Err(DbError::NotFound)` - Purchase doesn't exist
    pub async fn update(&self, purchase: &Purchase) -> DbResult<()> {
        debug!(id = %purchase.id, items = purchase.items.len(), "Updating purchase");

        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE purchases SET
                customer_name = ?2,
                total_paise = ?3,
                discount_paise = ?4,
                due_paise = ?5,
                payment_mode = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&purchase.id)
        .bind(&purchase.customer_name)
        .bind(purchase.total_paise)
        .bind(purchase.discount_paise)
        .bind(purchase.due_paise)
        .bind(purchase.payment_mode)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Purchase", &purchase.id));
        }

        sqlx::query("DELETE FROM purchase_items WHERE purchase_id = ?1")
            .bind(&purchase.id)
            .execute(&mut *tx)
            .await?;

        insert_items(&mut tx, &purchase.id, &purchase.items).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Lists purchases whose `purchased_at` falls inside `[start, end]`,
    /// newest first. This is the daily-ledger query.
    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<Purchase>> {
        let rows = sqlx::query_as::<_, PurchaseRow>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases \
             WHERE purchased_at >= ?1 AND purchased_at <= ?2 \
             ORDER BY purchased_at DESC"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Ledger window query");

        let mut purchases = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.get_items(&row.id).await?;
            purchases.push(row.into_purchase(items));
        }

        Ok(purchases)
    }

    /// Gets the line items of a purchase, in form order.
    async fn get_items(&self, purchase_id: &str) -> DbResult<Vec<LineItem>> {
        let items = sqlx::query_as::<_, LineItem>(
            r#"
            SELECT name, category, quantity, price_paise
            FROM purchase_items
            WHERE purchase_id = ?1
            ORDER BY position
            "#,
        )
        .bind(purchase_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts ledger entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchases")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    purchase_id: &str,
    items: &[LineItem],
) -> DbResult<()> {
    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO purchase_items (
                id, purchase_id, position, name, category, quantity, price_paise
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(purchase_id)
        .bind(position as i64)
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.quantity)
        .bind(item.price_paise)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Helper to generate a new purchase ID.
pub fn generate_purchase_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
