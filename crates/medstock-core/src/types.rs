//! # Domain Types
//!
//! Core domain types used throughout Medstock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Domain Types                           │
//! │                                                              │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐   │
//! │  │   Medicine    │   │   Purchase    │   │   LineItem    │   │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │   │
//! │  │ id (UUID)     │   │ id (UUID)     │   │ name          │   │
//! │  │ name (unique) │   │ customer_name │   │ category      │   │
//! │  │ category      │   │ purchased_at  │   │ quantity      │   │
//! │  │ price_paise   │   │ items[]       │   │ price_paise   │   │
//! │  │ quantity      │   │ total_paise   │   │ (snapshot)    │   │
//! │  └───────────────┘   └───────────────┘   └───────────────┘   │
//! │                                                              │
//! │                      ┌───────────────┐                       │
//! │                      │  PaymentMode  │                       │
//! │                      │  Cash|Online  │                       │
//! │                      └───────────────┘                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Ownership
//! A purchase's line items are independent copies of catalog data at time of
//! sale: editing a purchase later never rewrites historical price snapshots,
//! only current catalog quantities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Medicine
// =============================================================================

/// A stocked catalog item.
///
/// `name` is the business key: lookups during sale reconciliation use exact,
/// case-sensitive name matching. The UUID `id` exists for database relations
/// only and never appears in reconciliation logic.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Medicine {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name; unique within the catalog.
    pub name: String,

    /// Free-text category ("Tablet", "Syrup", ...). Drives low-stock
    /// thresholds, nothing else.
    pub category: String,

    /// Current selling price in paise.
    pub price_paise: i64,

    /// On-hand quantity. Never negative; enforced by validation before
    /// decrement, not by the storage layer.
    pub quantity: i64,

    /// When the medicine was first recorded.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the medicine was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

// =============================================================================
// Payment Mode
// =============================================================================

/// How the customer settled (or will settle) a purchase.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Physical cash at the counter.
    Cash,
    /// UPI or other online transfer.
    Online,
}

impl Default for PaymentMode {
    fn default() -> Self {
        PaymentMode::Cash
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One sold position within a purchase.
/// Uses the snapshot pattern to freeze catalog data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct LineItem {
    /// Medicine name at time of sale (also the reconciliation key).
    pub name: String,

    /// Category at time of sale (frozen).
    pub category: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price in paise at time of sale (frozen).
    pub price_paise: i64,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// One completed sale transaction in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Purchase {
    pub id: String,

    /// Customer the sale was rung up for.
    pub customer_name: String,

    /// Business instant of the sale; ledger day-windows filter on this.
    #[ts(as = "String")]
    pub purchased_at: DateTime<Utc>,

    /// Ordered line items, snapshots of catalog data at sale time.
    pub items: Vec<LineItem>,

    /// Subtotal in paise: Σ quantity × price over `items`. Always
    /// recomputed server-side, never taken from a client.
    pub total_paise: i64,

    /// Flat discount in paise applied to the subtotal.
    pub discount_paise: i64,

    /// Portion of the final price not yet collected.
    pub due_paise: i64,

    pub payment_mode: PaymentMode,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Purchase {
    /// Subtotal as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }

    /// Discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_paise(self.discount_paise)
    }

    /// Final price after discount. Display-derived, never persisted.
    #[inline]
    pub fn final_price(&self) -> Money {
        self.total() - self.discount()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
