//! # Medicine Repository
//!
//! Database operations for the medicine catalog.
//!
//! ## Key Operations
//! - Exact-name lookup (the reconciliation key)
//! - Insert / full update
//! - Quantity adjustment by delta
//!
//! ## Delta Updates
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Quantity Update Strategy                     │
//! │                                                              │
//! │  ❌ Absolute update (clobbers interleaved writes)            │
//! │     UPDATE medicines SET quantity = 7 WHERE name = ?         │
//! │                                                              │
//! │  ✅ Delta update                                             │
//! │     UPDATE medicines SET quantity = quantity - 3             │
//! │                                                              │
//! │  Sale decrement, edit-path restore and re-decrement are all  │
//! │  the same operation with a different sign.                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use medstock_core::Medicine;

const MEDICINE_COLUMNS: &str =
    "id, name, category, price_paise, quantity, created_at, updated_at";

/// Repository for medicine database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MedicineRepository::new(pool);
///
/// let all = repo.list().await?;
/// let med = repo.get_by_name("Paracetamol").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Lists the full catalog, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Medicine>> {
        let medicines = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = medicines.len(), "Listed catalog");
        Ok(medicines)
    }

    /// Gets a medicine by exact name.
    ///
    /// Name matching is case-sensitive: SQLite's default BINARY collation on
    /// the `name` column matches the reconciliation contract.
    ///
    /// ## Returns
    /// * `Ok(Some(Medicine))` - Medicine found
    /// * `Ok(None)` - No such name
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Medicine>> {
        let medicine = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE name = ?1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(medicine)
    }

    /// Gets a medicine by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Medicine>> {
        let medicine = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(medicine)
    }

    /// Inserts a new medicine.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Name already exists
    pub async fn insert(&self, medicine: &Medicine) -> DbResult<()> {
        debug!(name = %medicine.name, "Inserting medicine");

        sqlx::query(
            r#"
            INSERT INTO medicines (
                id, name, category, price_paise, quantity, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&medicine.id)
        .bind(&medicine.name)
        .bind(&medicine.category)
        .bind(medicine.price_paise)
        .bind(medicine.quantity)
        .bind(medicine.created_at)
        .bind(medicine.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing medicine (full overwrite of mutable fields).
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Medicine doesn't exist
    pub async fn update(&self, medicine: &Medicine) -> DbResult<()> {
        debug!(id = %medicine.id, "Updating medicine");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE medicines SET
                name = ?2,
                category = ?3,
                price_paise = ?4,
                quantity = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&medicine.id)
        .bind(&medicine.name)
        .bind(&medicine.category)
        .bind(medicine.price_paise)
        .bind(medicine.quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", &medicine.id));
        }

        Ok(())
    }

    /// Adjusts a medicine's on-hand quantity by a signed delta.
    ///
    /// Negative for sales, positive for restore/restock. The caller is
    /// responsible for validating availability first; this is the mutate
    /// half of the two-pass contract.
    ///
    /// ## Returns
    /// * `Ok(())` - Adjusted
    /// * `Err(DbError::NotFound)` - No medicine with that name
    pub async fn adjust_quantity(&self, name: &str, delta: i64) -> DbResult<()> {
        debug!(name = %name, delta = %delta, "Adjusting quantity");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE medicines SET
                quantity = quantity + ?2,
                updated_at = ?3
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", name));
        }

        Ok(())
    }

    /// Counts catalog entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new medicine ID.
pub fn generate_medicine_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn medicine(name: &str, quantity: i64) -> Medicine {
        let now = Utc::now();
        Medicine {
            id: generate_medicine_id(),
            name: name.to_string(),
            category: "Tablet".to_string(),
            price_paise: 1250,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_by_name() {
        let db = test_db().await;
        let repo = db.medicines();

        repo.insert(&medicine("Paracetamol", 50)).await.unwrap();

        let found = repo.get_by_name("Paracetamol").await.unwrap().unwrap();
        assert_eq!(found.quantity, 50);
        assert_eq!(found.price_paise, 1250);

        assert!(repo.get_by_name("paracetamol").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = test_db().await;
        let repo = db.medicines();

        repo.insert(&medicine("Crocin", 10)).await.unwrap();
        let err = repo.insert(&medicine("Crocin", 5)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_is_name_ordered() {
        let db = test_db().await;
        let repo = db.medicines();

        repo.insert(&medicine("Zincovit", 5)).await.unwrap();
        repo.insert(&medicine("Azithral", 5)).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Azithral", "Zincovit"]);
    }

    #[tokio::test]
    async fn test_adjust_quantity() {
        let db = test_db().await;
        let repo = db.medicines();

        repo.insert(&medicine("Benadryl", 10)).await.unwrap();

        repo.adjust_quantity("Benadryl", -3).await.unwrap();
        repo.adjust_quantity("Benadryl", 1).await.unwrap();

        let found = repo.get_by_name("Benadryl").await.unwrap().unwrap();
        assert_eq!(found.quantity, 8);
    }

    #[tokio::test]
    async fn test_adjust_quantity_unknown_name() {
        let db = test_db().await;
        let err = db.medicines().adjust_quantity("Ghost", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let db = test_db().await;
        let repo = db.medicines();

        let mut med = medicine("Dolo", 10);
        repo.insert(&med).await.unwrap();

        med.price_paise = 3000;
        med.quantity = 25;
        repo.update(&med).await.unwrap();

        let found = repo.get_by_name("Dolo").await.unwrap().unwrap();
        assert_eq!(found.price_paise, 3000);
        assert_eq!(found.quantity, 25);
    }
}
