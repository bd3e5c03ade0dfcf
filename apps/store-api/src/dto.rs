//! # Data Transfer Objects
//!
//! Request/response shapes for the JSON API.
//!
//! ## Why DTOs?
//! - Decouples internal domain model from the API contract
//! - Allows selective field exposure and derived display values
//! - Handles serde rename to camelCase for the TypeScript frontend
//!
//! Line items are called `medicines` on the wire — that is what the store
//! UI calls them, and the ledger keeps the vocabulary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use medstock_core::ledger::{self, DailySummary};
use medstock_core::{LineItem, Medicine, PaymentMode, Purchase};

// =============================================================================
// Medicines
// =============================================================================

/// Catalog entry as the client sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDto {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price_paise: i64,
    pub quantity: i64,
    /// Display-only highlight; computed from category thresholds,
    /// never persisted and never blocking a sale.
    pub low_stock: bool,
}

impl From<Medicine> for MedicineDto {
    fn from(m: Medicine) -> Self {
        let low_stock = ledger::is_low_stock(&m.category, m.quantity);
        MedicineDto {
            id: m.id,
            name: m.name,
            category: m.category,
            price_paise: m.price_paise,
            quantity: m.quantity,
            low_stock,
        }
    }
}

/// Body of `POST /medicines`.
///
/// All fields are required, but kept optional here so a missing field
/// surfaces as a 400 `ValidationError` naming the field — before any
/// lookup — instead of a generic deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMedicineRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_paise: Option<i64>,
    pub quantity: Option<i64>,
}

/// Response of `POST /medicines`: the resulting record plus whether it was
/// created or merged into an existing one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMedicineResponse {
    pub created: bool,
    pub medicine: MedicineDto,
}

// =============================================================================
// Purchases
// =============================================================================

/// One line item on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDto {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub price_paise: i64,
}

impl From<LineItem> for LineItemDto {
    fn from(item: LineItem) -> Self {
        LineItemDto {
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            price_paise: item.price_paise,
        }
    }
}

impl From<LineItemDto> for LineItem {
    fn from(dto: LineItemDto) -> Self {
        LineItem {
            name: dto.name,
            category: dto.category,
            quantity: dto.quantity,
            price_paise: dto.price_paise,
        }
    }
}

/// Ledger entry as the client sees it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDto {
    pub id: String,
    pub customer_name: String,
    pub date: DateTime<Utc>,
    pub medicines: Vec<LineItemDto>,
    pub total_paise: i64,
    pub discount_paise: i64,
    pub due_paise: i64,
    pub payment_mode: PaymentMode,
    /// total − discount; display-derived.
    pub final_price_paise: i64,
}

impl From<Purchase> for PurchaseDto {
    fn from(p: Purchase) -> Self {
        let final_price_paise = p.final_price().paise();
        PurchaseDto {
            id: p.id,
            customer_name: p.customer_name,
            date: p.purchased_at,
            medicines: p.items.into_iter().map(LineItemDto::from).collect(),
            total_paise: p.total_paise,
            discount_paise: p.discount_paise,
            due_paise: p.due_paise,
            payment_mode: p.payment_mode,
            final_price_paise,
        }
    }
}

/// Body of `POST /purchases` and `PUT /purchases/{id}`.
///
/// No total field: the server recomputes the subtotal from the line items
/// and ignores anything a client might claim. `date` is only honored on
/// create; edits never move a sale to a different ledger day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub customer_name: String,
    pub medicines: Vec<LineItemDto>,
    #[serde(default)]
    pub discount_paise: i64,
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub due_paise: i64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Query string of the ledger endpoints: `?date=2025-03-10` (store-local
/// calendar date). Absent means "today".
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerQuery {
    pub date: Option<NaiveDate>,
}

/// Response of `GET /purchases/summary`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummaryDto {
    pub date: NaiveDate,
    pub purchase_count: usize,
    pub gross_paise: i64,
    pub discount_paise: i64,
    pub net_paise: i64,
}

impl DailySummaryDto {
    pub fn new(date: NaiveDate, summary: DailySummary) -> Self {
        DailySummaryDto {
            date,
            purchase_count: summary.purchase_count,
            gross_paise: summary.gross.paise(),
            discount_paise: summary.discount.paise(),
            net_paise: summary.net.paise(),
        }
    }
}

// =============================================================================
// Health
// =============================================================================

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medicine_dto_low_stock() {
        let now = Utc::now();
        let dto = MedicineDto::from(Medicine {
            id: "m-1".to_string(),
            name: "Dolo".to_string(),
            category: "Tablet".to_string(),
            price_paise: 1000,
            quantity: 4,
            created_at: now,
            updated_at: now,
        });
        assert!(dto.low_stock);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["lowStock"], true);
        assert_eq!(json["pricePaise"], 1000);
    }

    #[test]
    fn test_purchase_request_defaults() {
        let req: PurchaseRequest = serde_json::from_str(
            r#"{
                "customerName": "Asha",
                "medicines": [
                    {"name": "Dolo", "category": "Tablet", "quantity": 2, "pricePaise": 1000}
                ],
                "paymentMode": "cash"
            }"#,
        )
        .unwrap();

        assert_eq!(req.discount_paise, 0);
        assert_eq!(req.due_paise, 0);
        assert!(req.date.is_none());
        assert_eq!(req.medicines[0].quantity, 2);
    }

    #[test]
    fn test_purchase_dto_final_price() {
        let now = Utc::now();
        let dto = PurchaseDto::from(Purchase {
            id: "p-1".to_string(),
            customer_name: "Asha".to_string(),
            purchased_at: now,
            items: vec![],
            total_paise: 2500,
            discount_paise: 300,
            due_paise: 100,
            payment_mode: PaymentMode::Online,
            created_at: now,
            updated_at: now,
        });
        assert_eq!(dto.final_price_paise, 2200);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["paymentMode"], "online");
        assert_eq!(json["finalPricePaise"], 2200);
    }
}
