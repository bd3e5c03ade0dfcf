//! # Stock Reconciliation
//!
//! The validate-all-then-mutate-all planner behind purchase creation and
//! editing.
//!
//! ## Two-Pass Contract
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Sale Reconciliation Flow                     │
//! │                                                              │
//! │  line items          on-hand quantities (fetched by caller)  │
//! │      │                        │                              │
//! │      ▼                        ▼                              │
//! │  PASS 1: validate every item against the catalog             │
//! │  ├── unknown name          → MedicineNotFound                │
//! │  └── requested > available → InsufficientStock               │
//! │      │                                                       │
//! │      ▼  (only if EVERY item passed)                          │
//! │  PASS 2: emit one decrement per medicine                     │
//! │      │                                                       │
//! │      ▼                                                       │
//! │  SalePlan { deltas, total }                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failing line item therefore leaves no partial mutation: the caller
//! only applies deltas from a successfully returned plan.
//!
//! Duplicate names in the line items accumulate — two lines of the same
//! medicine are validated against their combined quantity, not per line.
//!
//! This module is pure. The caller fetches current quantities, hands them
//! over as a map, and applies the returned deltas; nothing here touches
//! storage. Note that this also means the check is only as fresh as the
//! snapshot: two concurrent sales can both pass validation against stale
//! stock. Single-operator semantics, accepted.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;

// =============================================================================
// Plan Types
// =============================================================================

/// A single stock movement: remove `quantity` units of `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDelta {
    pub name: String,
    pub quantity: i64,
}

/// The validated outcome of pass 1: what to decrement, and the
/// server-computed subtotal.
#[derive(Debug, Clone)]
pub struct SalePlan {
    /// One entry per distinct medicine, in first-seen line-item order.
    pub deltas: Vec<StockDelta>,
    /// Σ quantity × price over the line items. Independent of any
    /// client-supplied total.
    pub total: Money,
}

// =============================================================================
// Planner
// =============================================================================

/// Validates a sale's line items against on-hand quantities and returns the
/// decrement plan.
///
/// `available` maps medicine name → on-hand quantity; a name absent from the
/// map is an unknown medicine. Lookup is exact and case-sensitive, the same
/// rule the catalog applies.
///
/// ## Errors
/// - [`CoreError::MedicineNotFound`] for the first unknown name
/// - [`CoreError::InsufficientStock`] for the first medicine whose combined
///   requested quantity exceeds what is available
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use medstock_core::stock::plan_sale;
/// use medstock_core::types::LineItem;
///
/// let items = vec![LineItem {
///     name: "Paracetamol".into(),
///     category: "Tablet".into(),
///     quantity: 2,
///     price_paise: 1000,
/// }];
/// let available = HashMap::from([("Paracetamol".to_string(), 10)]);
///
/// let plan = plan_sale(&items, &available).unwrap();
/// assert_eq!(plan.total.paise(), 2000);
/// assert_eq!(plan.deltas[0].quantity, 2);
/// ```
pub fn plan_sale(items: &[LineItem], available: &HashMap<String, i64>) -> CoreResult<SalePlan> {
    // Pass 1: walk items in order, accumulating the requested quantity per
    // name so duplicates are checked against their running total.
    let mut order: Vec<String> = Vec::new();
    let mut requested: HashMap<&str, i64> = HashMap::new();

    for item in items {
        let on_hand = *available
            .get(&item.name)
            .ok_or_else(|| CoreError::MedicineNotFound(item.name.clone()))?;

        let entry = requested.entry(item.name.as_str()).or_insert_with(|| {
            order.push(item.name.clone());
            0
        });
        *entry += item.quantity;

        if *entry > on_hand {
            return Err(CoreError::InsufficientStock {
                name: item.name.clone(),
                available: on_hand,
                requested: *entry,
            });
        }
    }

    // Pass 2: every item passed; emit one delta per distinct medicine.
    let deltas = order
        .into_iter()
        .map(|name| {
            let quantity = requested[name.as_str()];
            StockDelta { name, quantity }
        })
        .collect();

    Ok(SalePlan {
        deltas,
        total: sale_total(items),
    })
}

/// Server-side subtotal: Σ quantity × price-snapshot over the line items.
pub fn sale_total(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::line_total).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: i64, price_paise: i64) -> LineItem {
        LineItem {
            name: name.to_string(),
            category: "Tablet".to_string(),
            quantity,
            price_paise,
        }
    }

    fn stock(entries: &[(&str, i64)]) -> HashMap<String, i64> {
        entries
            .iter()
            .map(|(name, qty)| (name.to_string(), *qty))
            .collect()
    }

    #[test]
    fn test_plan_decrements_and_total() {
        let items = vec![item("A", 2, 1000), item("B", 1, 500)];
        let plan = plan_sale(&items, &stock(&[("A", 10), ("B", 5)])).unwrap();

        assert_eq!(plan.total.paise(), 2500);
        assert_eq!(
            plan.deltas,
            vec![
                StockDelta { name: "A".into(), quantity: 2 },
                StockDelta { name: "B".into(), quantity: 1 },
            ]
        );
    }

    #[test]
    fn test_unknown_medicine_fails() {
        let items = vec![item("A", 1, 100), item("Ghost", 1, 100)];
        let err = plan_sale(&items, &stock(&[("A", 10)])).unwrap_err();
        assert!(matches!(err, CoreError::MedicineNotFound(name) if name == "Ghost"));
    }

    #[test]
    fn test_insufficient_stock_reports_available() {
        let items = vec![item("A", 7, 100)];
        let err = plan_sale(&items, &stock(&[("A", 3)])).unwrap_err();
        match err {
            CoreError::InsufficientStock { name, available, requested } => {
                assert_eq!(name, "A");
                assert_eq!(available, 3);
                assert_eq!(requested, 7);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    /// Lookup is case-sensitive: "a" does not match catalog "A".
    #[test]
    fn test_lookup_is_case_sensitive() {
        let items = vec![item("a", 1, 100)];
        let err = plan_sale(&items, &stock(&[("A", 10)])).unwrap_err();
        assert!(matches!(err, CoreError::MedicineNotFound(_)));
    }

    /// Two lines of the same medicine validate against their combined
    /// quantity, and the plan carries a single aggregated delta.
    #[test]
    fn test_duplicate_names_aggregate() {
        let items = vec![item("A", 3, 100), item("B", 1, 50), item("A", 4, 100)];
        let plan = plan_sale(&items, &stock(&[("A", 7), ("B", 1)])).unwrap();
        assert_eq!(
            plan.deltas,
            vec![
                StockDelta { name: "A".into(), quantity: 7 },
                StockDelta { name: "B".into(), quantity: 1 },
            ]
        );

        // One more unit of A than available and the combined check trips.
        let items = vec![item("A", 3, 100), item("A", 5, 100)];
        let err = plan_sale(&items, &stock(&[("A", 7)])).unwrap_err();
        match err {
            CoreError::InsufficientStock { available, requested, .. } => {
                assert_eq!(available, 7);
                assert_eq!(requested, 8);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    /// Exactly-available quantity passes; the plan drains stock to zero.
    #[test]
    fn test_exact_availability_passes() {
        let items = vec![item("A", 5, 100)];
        let plan = plan_sale(&items, &stock(&[("A", 5)])).unwrap();
        assert_eq!(plan.deltas[0].quantity, 5);
    }

    #[test]
    fn test_total_ignores_availability_map() {
        // The subtotal comes from the line-item snapshots alone.
        let items = vec![item("A", 2, 1099)];
        assert_eq!(sale_total(&items).paise(), 2198);
    }
}
