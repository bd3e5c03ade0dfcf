//! # Purchase Service
//!
//! Orchestrates the stock-reconciliation paths around the purchase ledger.
//!
//! ## Create and Edit Flows
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CREATE                          EDIT                        │
//! │                                                              │
//! │  validate fields                 validate fields             │
//! │       │                               │                      │
//! │       ▼                               ▼                      │
//! │  fetch on-hand quantities        fetch purchase (404)        │
//! │       │                               │                      │
//! │       ▼                               ▼                      │
//! │  plan_sale (two-pass)            restore OLD item quantities │
//! │       │                               │   (missing medicine: │
//! │       ▼                               │    skipped, warned)  │
//! │  apply decrements                     ▼                      │
//! │       │                          plan_sale on NEW items ──┐  │
//! │       ▼                               │                    │  │
//! │  insert purchase                      ▼               fail │  │
//! │                                  apply decrements          ▼  │
//! │                                       │              restore  │
//! │                                       ▼              stays    │
//! │                                  overwrite purchase  committed│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The edit path's failure window is inherited behavior: when validation of
//! the new items fails, the old items' restoration has already been applied
//! and is not rolled back, leaving inventory inflated until corrected by
//! hand. Tests pin this exact end state.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use medstock_core::ledger::{self, DailySummary};
use medstock_core::{stock, validation, CoreError, LineItem, PaymentMode, Purchase};
use medstock_db::repository::purchase::generate_purchase_id;
use medstock_db::{Database, DbError};

use crate::error::ApiError;

/// Stock-affecting fields of a purchase as submitted by the client.
///
/// Carries no total: the subtotal is always recomputed from the line-item
/// snapshots. `date` is honored on create only.
#[derive(Debug, Clone)]
pub struct PurchaseDraft {
    pub customer_name: String,
    pub items: Vec<LineItem>,
    pub discount_paise: i64,
    pub due_paise: i64,
    pub payment_mode: PaymentMode,
    pub date: Option<DateTime<Utc>>,
}

fn validate_draft(draft: &PurchaseDraft) -> Result<(), ApiError> {
    validation::validate_customer_name(&draft.customer_name)?;
    validation::validate_line_items(&draft.items)?;
    validation::validate_amount("discount", draft.discount_paise)?;
    validation::validate_amount("dueAmount", draft.due_paise)?;
    Ok(())
}

/// Fetches on-hand quantities for every distinct name in the line items.
/// Unknown names are simply absent from the map; the planner turns that
/// into `MedicineNotFound`.
async fn on_hand_quantities(
    db: &Database,
    items: &[LineItem],
) -> Result<HashMap<String, i64>, ApiError> {
    let repo = db.medicines();
    let mut available = HashMap::new();

    for item in items {
        if available.contains_key(&item.name) {
            continue;
        }
        if let Some(medicine) = repo.get_by_name(&item.name).await? {
            available.insert(medicine.name, medicine.quantity);
        }
    }

    Ok(available)
}

/// Applies a sale plan: one decrement per distinct medicine.
async fn apply_decrements(db: &Database, plan: &stock::SalePlan) -> Result<(), ApiError> {
    let repo = db.medicines();
    for delta in &plan.deltas {
        repo.adjust_quantity(&delta.name, -delta.quantity).await?;
    }
    Ok(())
}

// =============================================================================
// Create Path
// =============================================================================

/// Creates a purchase after validating and decrementing stock.
///
/// Two-pass: every line item is validated against the catalog before any
/// quantity moves, so a late failure leaves no partial mutation.
pub async fn create_purchase(db: &Database, draft: PurchaseDraft) -> Result<Purchase, ApiError> {
    validate_draft(&draft)?;

    let available = on_hand_quantities(db, &draft.items).await?;
    let plan = stock::plan_sale(&draft.items, &available)?;

    apply_decrements(db, &plan).await?;

    let now = Utc::now();
    let purchase = Purchase {
        id: generate_purchase_id(),
        customer_name: draft.customer_name,
        purchased_at: draft.date.unwrap_or(now),
        items: draft.items,
        total_paise: plan.total.paise(),
        discount_paise: draft.discount_paise,
        due_paise: draft.due_paise,
        payment_mode: draft.payment_mode,
        created_at: now,
        updated_at: now,
    };

    db.purchases().insert(&purchase).await?;

    info!(
        id = %purchase.id,
        customer = %purchase.customer_name,
        total = %purchase.total(),
        items = purchase.items.len(),
        "Purchase created"
    );

    Ok(purchase)
}

// =============================================================================
// Edit Path
// =============================================================================

/// Replaces a purchase's line items and payment fields, reconciling stock:
/// old quantities are restored, then the new items are validated and
/// consumed against the restored levels.
pub async fn update_purchase(
    db: &Database,
    id: &str,
    draft: PurchaseDraft,
) -> Result<Purchase, ApiError> {
    validate_draft(&draft)?;

    let existing = db
        .purchases()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::PurchaseNotFound(id.to_string()))?;

    // Restore the old line items. A medicine that has vanished from the
    // catalog since the sale is skipped: there is nothing to restore onto.
    let repo = db.medicines();
    for item in &existing.items {
        match repo.adjust_quantity(&item.name, item.quantity).await {
            Ok(()) => {}
            Err(DbError::NotFound { .. }) => {
                warn!(
                    purchase = %existing.id,
                    medicine = %item.name,
                    "Skipping stock restore for missing medicine"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Validate the new items against the restored levels. On failure the
    // restoration above stays committed (see module docs).
    let available = on_hand_quantities(db, &draft.items).await?;
    let plan = stock::plan_sale(&draft.items, &available)?;

    apply_decrements(db, &plan).await?;

    let updated = Purchase {
        id: existing.id,
        customer_name: draft.customer_name,
        purchased_at: existing.purchased_at,
        items: draft.items,
        total_paise: plan.total.paise(),
        discount_paise: draft.discount_paise,
        due_paise: draft.due_paise,
        payment_mode: draft.payment_mode,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    db.purchases().update(&updated).await?;

    info!(
        id = %updated.id,
        total = %updated.total(),
        items = updated.items.len(),
        "Purchase updated"
    );

    Ok(updated)
}

// =============================================================================
// Read Path
// =============================================================================

/// Purchases of one store-local calendar day, newest first.
/// `None` resolves to today (in store time).
pub async fn ledger_for_day(
    db: &Database,
    date: Option<NaiveDate>,
) -> Result<(NaiveDate, Vec<Purchase>), ApiError> {
    let date = date.unwrap_or_else(|| ledger::store_date_of(Utc::now()));
    let (start, end) = ledger::day_window(date);

    let purchases = db.purchases().list_between(start, end).await?;
    Ok((date, purchases))
}

/// The per-day aggregate shown on the home page.
pub async fn summary_for_day(
    db: &Database,
    date: Option<NaiveDate>,
) -> Result<(NaiveDate, DailySummary), ApiError> {
    let (date, purchases) = ledger_for_day(db, date).await?;
    Ok((date, ledger::daily_summary(&purchases)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::TimeZone;
    use medstock_core::Medicine;
    use medstock_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_medicine(db: &Database, name: &str, quantity: i64, price_paise: i64) {
        let now = Utc::now();
        db.medicines()
            .insert(&Medicine {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.to_string(),
                category: "Tablet".to_string(),
                price_paise,
                quantity,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    async fn quantity_of(db: &Database, name: &str) -> i64 {
        db.medicines()
            .get_by_name(name)
            .await
            .unwrap()
            .unwrap()
            .quantity
    }

    fn item(name: &str, quantity: i64, price_paise: i64) -> LineItem {
        LineItem {
            name: name.to_string(),
            category: "Tablet".to_string(),
            quantity,
            price_paise,
        }
    }

    fn draft(customer: &str, items: Vec<LineItem>) -> PurchaseDraft {
        PurchaseDraft {
            customer_name: customer.to_string(),
            items,
            discount_paise: 0,
            due_paise: 0,
            payment_mode: PaymentMode::Cash,
            date: None,
        }
    }

    #[tokio::test]
    async fn test_create_decrements_and_computes_total() {
        let db = test_db().await;
        seed_medicine(&db, "A", 10, 1000).await;
        seed_medicine(&db, "B", 5, 500).await;

        let purchase = create_purchase(&db, draft("Asha", vec![item("A", 2, 1000), item("B", 1, 500)]))
            .await
            .unwrap();

        // Server-computed total: 2×1000 + 1×500.
        assert_eq!(purchase.total_paise, 2500);
        assert_eq!(quantity_of(&db, "A").await, 8);
        assert_eq!(quantity_of(&db, "B").await, 4);

        // Persisted with its items.
        let stored = db.purchases().get_by_id(&purchase.id).await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.total_paise, 2500);
    }

    #[tokio::test]
    async fn test_create_is_atomic_on_insufficient_stock() {
        let db = test_db().await;
        seed_medicine(&db, "A", 10, 1000).await;
        seed_medicine(&db, "B", 1, 500).await;

        // B fails validation, so A must stay untouched too.
        let err = create_purchase(&db, draft("Asha", vec![item("A", 2, 1000), item("B", 3, 500)]))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("Available: 1"));
        assert_eq!(quantity_of(&db, "A").await, 10);
        assert_eq!(quantity_of(&db, "B").await, 1);
        assert_eq!(db.purchases().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_with_unknown_medicine() {
        let db = test_db().await;
        seed_medicine(&db, "A", 10, 1000).await;

        let err = create_purchase(&db, draft("Asha", vec![item("A", 1, 1000), item("Ghost", 1, 100)]))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("Ghost"));
        assert_eq!(quantity_of(&db, "A").await, 10);
    }

    #[tokio::test]
    async fn test_create_validation_rejects_bad_drafts() {
        let db = test_db().await;
        seed_medicine(&db, "A", 10, 1000).await;

        let err = create_purchase(&db, draft("", vec![item("A", 1, 1000)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = create_purchase(&db, draft("Asha", vec![])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut d = draft("Asha", vec![item("A", 1, 1000)]);
        d.discount_paise = -100;
        let err = create_purchase(&db, d).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(quantity_of(&db, "A").await, 10);
    }

    /// Spec scenario: edit [(A,2)] → [(A,5)] with 3 left in the catalog.
    /// Restoring 2 brings A to 5, validating 5≤5 succeeds, decrementing
    /// leaves A at 0.
    #[tokio::test]
    async fn test_edit_restores_then_consumes() {
        let db = test_db().await;
        seed_medicine(&db, "A", 5, 1000).await;

        let purchase = create_purchase(&db, draft("Asha", vec![item("A", 2, 1000)]))
            .await
            .unwrap();
        assert_eq!(quantity_of(&db, "A").await, 3);

        let updated = update_purchase(&db, &purchase.id, draft("Asha", vec![item("A", 5, 1000)]))
            .await
            .unwrap();

        assert_eq!(quantity_of(&db, "A").await, 0);
        assert_eq!(updated.total_paise, 5000);

        let stored = db.purchases().get_by_id(&purchase.id).await.unwrap().unwrap();
        assert_eq!(stored.items[0].quantity, 5);
        // Edits never move the sale to a different ledger day.
        assert_eq!(stored.purchased_at, purchase.purchased_at);
    }

    /// Spec scenario pinning the non-atomic edit window: when validation of
    /// the new items fails, the restoration has already been committed and
    /// stays committed. Catalog A ends at 5 — restored, not re-consumed —
    /// and the purchase record is unchanged.
    #[tokio::test]
    async fn test_edit_failure_leaves_restoration_committed() {
        let db = test_db().await;
        seed_medicine(&db, "A", 5, 1000).await;

        let purchase = create_purchase(&db, draft("Asha", vec![item("A", 2, 1000)]))
            .await
            .unwrap();
        assert_eq!(quantity_of(&db, "A").await, 3);

        let err = update_purchase(&db, &purchase.id, draft("Asha", vec![item("A", 100, 1000)]))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("Available: 5"));

        // The documented inflated end state.
        assert_eq!(quantity_of(&db, "A").await, 5);

        // Purchase record unchanged.
        let stored = db.purchases().get_by_id(&purchase.id).await.unwrap().unwrap();
        assert_eq!(stored.items[0].quantity, 2);
        assert_eq!(stored.total_paise, 2000);
    }

    #[tokio::test]
    async fn test_edit_skips_restore_for_vanished_medicine() {
        let db = test_db().await;
        seed_medicine(&db, "A", 5, 1000).await;
        seed_medicine(&db, "B", 5, 500).await;

        let purchase = create_purchase(&db, draft("Asha", vec![item("A", 2, 1000), item("B", 1, 500)]))
            .await
            .unwrap();

        // B disappears from the catalog entirely.
        sqlx::query("DELETE FROM medicines WHERE name = 'B'")
            .execute(db.pool())
            .await
            .unwrap();

        // Edit down to A only: B's restore is skipped, A's applies.
        let updated = update_purchase(&db, &purchase.id, draft("Asha", vec![item("A", 1, 1000)]))
            .await
            .unwrap();

        // 3 on hand + 2 restored - 1 consumed.
        assert_eq!(quantity_of(&db, "A").await, 4);
        assert_eq!(updated.items.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_unknown_purchase() {
        let db = test_db().await;
        seed_medicine(&db, "A", 5, 1000).await;

        let err = update_purchase(&db, "missing-id", draft("Asha", vec![item("A", 1, 1000)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("missing-id"));

        // Nothing restored, nothing consumed.
        assert_eq!(quantity_of(&db, "A").await, 5);
    }

    #[tokio::test]
    async fn test_ledger_day_window_filter_and_order() {
        let db = test_db().await;
        seed_medicine(&db, "A", 100, 1000).await;

        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        // 09:30 IST and 23:00 IST on the 10th, and 01:00 IST on the 11th.
        let morning = Utc.with_ymd_and_hms(2025, 3, 10, 4, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2025, 3, 10, 17, 30, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2025, 3, 10, 19, 30, 0).unwrap();

        for (customer, at) in [("Morning", morning), ("Night", night), ("NextDay", next_day)] {
            let mut d = draft(customer, vec![item("A", 1, 1000)]);
            d.date = Some(at);
            create_purchase(&db, d).await.unwrap();
        }

        let (resolved, purchases) = ledger_for_day(&db, Some(date)).await.unwrap();
        assert_eq!(resolved, date);

        let customers: Vec<String> = purchases.into_iter().map(|p| p.customer_name).collect();
        // Only the 10th (IST), newest first.
        assert_eq!(customers, vec!["Night", "Morning"]);
    }

    #[tokio::test]
    async fn test_daily_summary() {
        let db = test_db().await;
        seed_medicine(&db, "A", 100, 1000).await;

        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 4, 0, 0).unwrap();

        let mut first = draft("Asha", vec![item("A", 2, 1000)]);
        first.date = Some(at);
        first.discount_paise = 300;
        create_purchase(&db, first).await.unwrap();

        let mut second = draft("Ravi", vec![item("A", 1, 1000)]);
        second.date = Some(at);
        create_purchase(&db, second).await.unwrap();

        let (_, summary) = summary_for_day(&db, Some(date)).await.unwrap();
        assert_eq!(summary.purchase_count, 2);
        assert_eq!(summary.gross.paise(), 3000);
        assert_eq!(summary.discount.paise(), 300);
        assert_eq!(summary.net.paise(), 2700);
    }
}
