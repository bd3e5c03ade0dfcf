//! # Catalog Service
//!
//! Orchestrates medicine listing and the upsert-by-name operation.
//!
//! ## Upsert Contract
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Medicine Upsert                          │
//! │                                                              │
//! │  validate fields (before any lookup)                         │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  exact-name lookup                                           │
//! │       │                                                      │
//! │       ├── found:   price REPLACED, quantity ADDED            │
//! │       │            (restock merges into the same record)     │
//! │       │                                                      │
//! │       └── absent:  new record created                        │
//! │                                                              │
//! │  returns the record + created-vs-updated flag                │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::info;

use medstock_core::{validation, Medicine};
use medstock_db::repository::medicine::generate_medicine_id;
use medstock_db::Database;

use crate::error::ApiError;

/// Input of the upsert operation; all fields required.
#[derive(Debug, Clone)]
pub struct NewMedicine {
    pub name: String,
    pub category: String,
    pub price_paise: i64,
    pub quantity: i64,
}

/// Full catalog, name-ordered.
pub async fn list_catalog(db: &Database) -> Result<Vec<Medicine>, ApiError> {
    Ok(db.medicines().list().await?)
}

/// Creates a medicine or merges a restock into the existing record.
///
/// Returns the resulting record and `true` if it was newly created.
pub async fn upsert_medicine(
    db: &Database,
    new: NewMedicine,
) -> Result<(Medicine, bool), ApiError> {
    validation::validate_medicine_name(&new.name)?;
    validation::validate_category(&new.category)?;
    validation::validate_price(new.price_paise)?;
    validation::validate_quantity(new.quantity)?;

    let repo = db.medicines();

    match repo.get_by_name(&new.name).await? {
        Some(mut existing) => {
            // Quantities accumulate, price is replaced not summed.
            // Category stays as first recorded.
            existing.price_paise = new.price_paise;
            existing.quantity += new.quantity;
            repo.update(&existing).await?;

            info!(name = %existing.name, quantity = existing.quantity, "Merged restock");
            Ok((existing, false))
        }
        None => {
            let now = Utc::now();
            let medicine = Medicine {
                id: generate_medicine_id(),
                name: new.name,
                category: new.category,
                price_paise: new.price_paise,
                quantity: new.quantity,
                created_at: now,
                updated_at: now,
            };
            repo.insert(&medicine).await?;

            info!(name = %medicine.name, "Created medicine");
            Ok((medicine, true))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use medstock_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_med(name: &str, price_paise: i64, quantity: i64) -> NewMedicine {
        NewMedicine {
            name: name.to_string(),
            category: "Tablet".to_string(),
            price_paise,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_then_merge() {
        let db = test_db().await;

        let (med, created) = upsert_medicine(&db, new_med("Dolo", 1000, 20)).await.unwrap();
        assert!(created);
        assert_eq!(med.quantity, 20);

        // Same name again: quantities accumulate, price is the second post's.
        let (med, created) = upsert_medicine(&db, new_med("Dolo", 1200, 5)).await.unwrap();
        assert!(!created);
        assert_eq!(med.quantity, 25);
        assert_eq!(med.price_paise, 1200);

        // And that is what the catalog now holds.
        let stored = db.medicines().get_by_name("Dolo").await.unwrap().unwrap();
        assert_eq!(stored.quantity, 25);
        assert_eq!(stored.price_paise, 1200);
    }

    #[tokio::test]
    async fn test_name_is_case_sensitive() {
        let db = test_db().await;

        upsert_medicine(&db, new_med("Dolo", 1000, 20)).await.unwrap();
        let (_, created) = upsert_medicine(&db, new_med("dolo", 1000, 5)).await.unwrap();

        // Different case = different medicine.
        assert!(created);
        assert_eq!(db.medicines().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_validation_before_lookup() {
        let db = test_db().await;

        let err = upsert_medicine(&db, new_med("", 1000, 5)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = upsert_medicine(&db, new_med("Dolo", -1, 5)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = upsert_medicine(&db, new_med("Dolo", 1000, -5)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // Nothing was written.
        assert_eq!(db.medicines().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_is_name_ordered() {
        let db = test_db().await;

        upsert_medicine(&db, new_med("Zincovit", 100, 1)).await.unwrap();
        upsert_medicine(&db, new_med("Azithral", 100, 1)).await.unwrap();

        let names: Vec<String> = list_catalog(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Azithral", "Zincovit"]);
    }
}
