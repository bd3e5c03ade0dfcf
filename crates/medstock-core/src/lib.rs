//! # medstock-core: Pure Business Logic for Medstock
//!
//! This crate is the **heart** of the medical-store tracker. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Medstock Architecture                     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                 Store UI (TypeScript)                  │  │
//! │  │   Catalog ──► Purchase form ──► Daily ledger           │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │                              │ HTTP/JSON                     │
//! │  ┌───────────────────────────▼────────────────────────────┐  │
//! │  │               apps/store-api (axum)                    │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │                              │                               │
//! │  ┌───────────────────────────▼────────────────────────────┐  │
//! │  │            ★ medstock-core (THIS CRATE) ★              │  │
//! │  │                                                        │  │
//! │  │  ┌─────────┐ ┌───────┐ ┌───────┐ ┌────────┐ ┌───────┐  │  │
//! │  │  │  types  │ │ money │ │ stock │ │ ledger │ │ valid │  │  │
//! │  │  │Medicine │ │ Money │ │ plan  │ │ window │ │ ation │  │  │
//! │  │  │Purchase │ │ paise │ │ sale  │ │ summary│ │ rules │  │  │
//! │  │  └─────────┘ └───────┘ └───────┘ └────────┘ └───────┘  │  │
//! │  │                                                        │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS    │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │                              │                               │
//! │  ┌───────────────────────────▼────────────────────────────┐  │
//! │  │              medstock-db (Database Layer)              │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, Purchase, LineItem, PaymentMode)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`stock`] - The two-pass sale reconciliation planner
//! - [`ledger`] - Day windows, daily aggregates, low-stock flags
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use medstock_core::Money` instead of
// `use medstock_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of free-text name fields (medicine, category, customer).
///
/// Keeps oversized form input out of the catalog; generous enough for any
/// real label.
pub const MAX_NAME_LEN: usize = 120;

/// Maximum line items allowed in a single purchase.
///
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_PURCHASE_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 10_000;
