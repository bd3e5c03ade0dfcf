//! # Validation Module
//!
//! Input validation utilities for Medstock.
//!
//! ## Validation Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Validation Layers                        │
//! │                                                              │
//! │  Layer 1: Frontend (TypeScript forms)                        │
//! │  ├── Basic format checks (empty, length)                     │
//! │  └── Immediate user feedback                                 │
//! │           │                                                  │
//! │           ▼                                                  │
//! │  Layer 2: API handler (Rust)                                 │
//! │  ├── Type validation (deserialization)                       │
//! │  └── THIS MODULE: field rules, before any lookup             │
//! │           │                                                  │
//! │           ▼                                                  │
//! │  Layer 3: Database (SQLite)                                  │
//! │  ├── NOT NULL constraints                                    │
//! │  └── UNIQUE constraints                                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::LineItem;
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LEN, MAX_PURCHASE_ITEMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a medicine name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most `MAX_NAME_LEN` characters
///
/// ## Example
/// ```rust
/// use medstock_core::validation::validate_medicine_name;
///
/// assert!(validate_medicine_name("Paracetamol 500mg").is_ok());
/// assert!(validate_medicine_name("").is_err());
/// ```
pub fn validate_medicine_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name)
}

/// Validates a category.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_required_text("category", category)
}

/// Validates a customer name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_required_text("customerName", name)
}

fn validate_required_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in paise. Zero is a legal price (free samples).
pub fn validate_price(price_paise: i64) -> ValidationResult<()> {
    if price_paise < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock quantity being added to the catalog.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a monetary amount that must not be negative
/// (discount, due amount).
pub fn validate_amount(field: &str, paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates the line items of a purchase before reconciliation runs.
///
/// ## Rules
/// - At least one item, at most `MAX_PURCHASE_ITEMS`
/// - Every item: non-empty name/category, quantity in 1..=MAX_ITEM_QUANTITY,
///   non-negative price snapshot
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::EmptyLineItems);
    }

    if items.len() > MAX_PURCHASE_ITEMS {
        return Err(ValidationError::TooManyLineItems {
            max: MAX_PURCHASE_ITEMS,
        });
    }

    for item in items {
        validate_required_text("name", &item.name)?;
        validate_required_text("category", &item.category)?;
        validate_price(item.price_paise)?;

        if item.quantity < 1 || item.quantity > MAX_ITEM_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_ITEM_QUANTITY,
            });
        }
    }

    Ok(())
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

    #[test]
    fn test_name_rules() {
        assert!(validate_medicine_name("Paracetamol").is_ok());
        assert!(validate_medicine_name("  ").is_err());
        assert!(validate_medicine_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_price_and_quantity_rules() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(-1).is_err());
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(-5).is_err());
    }

    #[test]
    fn test_line_items_must_not_be_empty() {
        assert!(matches!(
            validate_line_items(&[]),
            Err(ValidationError::EmptyLineItems)
        ));
    }

    #[test]
    fn test_line_item_quantity_range() {
        assert!(validate_line_items(&[item("A", 1, 100)]).is_ok());
        assert!(validate_line_items(&[item("A", 0, 100)]).is_err());
        assert!(validate_line_items(&[item("A", MAX_ITEM_QUANTITY + 1, 100)]).is_err());
    }

    #[test]
    fn test_too_many_line_items() {
        let items: Vec<LineItem> = (0..=MAX_PURCHASE_ITEMS)
            .map(|i| item(&format!("med-{i}"), 1, 100))
            .collect();
        assert!(matches!(
            validate_line_items(&items),
            Err(ValidationError::TooManyLineItems { .. })
        ));
    }
}
